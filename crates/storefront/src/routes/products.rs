//! Product listing route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use tower_sessions::Session;

use voltio_core::Category;

use crate::db::ProductFilter;
use crate::error::Result;
use crate::filters;
use crate::models::product::Product;
use crate::routes::cart::get_cart;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub product_type: String,
    pub price: String,
    pub image_url: String,
    pub description: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            product_type: product.product_type.clone(),
            price: product.price.to_string(),
            image_url: product.image_url.clone(),
            description: product.description.clone(),
        }
    }
}

/// A category checkbox in the filter sidebar.
pub struct FacetOption {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// A brand checkbox in the filter sidebar.
pub struct BrandOption {
    pub name: String,
    pub checked: bool,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductView>,
    pub facets: Vec<FacetOption>,
    pub brands: Vec<BrandOption>,
    pub search: String,
    /// Upper bound shown on the price input, floor-adjusted.
    pub price_ceiling: String,
    pub cart_count: u32,
}

fn facet_label(category: Category) -> &'static str {
    match category {
        Category::Phones => "Phones",
        Category::Laptops => "Laptops",
        Category::Tablets => "Tablets",
        Category::Wearables => "Wearables",
        Category::Accessories => "Accessories",
    }
}

/// Display the filtered product listing.
///
/// Query parameters arrive as repeated pairs (`category=phones&brand=Apple`)
/// and are folded into a [`ProductFilter`]; anything unrecognized or
/// unparseable simply doesn't constrain the listing.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<ProductsIndexTemplate> {
    let filter = ProductFilter::from_pairs(&params);
    let repo = state.products();

    let products = repo.list_available(&filter).await?;
    let all_brands = repo.distinct_brands().await?;

    // The floor is a display convenience for the price input, not a data
    // constraint: an empty or cheap catalog still gets a usable bound.
    let floor = state.config().max_price_floor;
    let price_ceiling = repo.max_price().await?.map_or(floor, |max| max.max(floor));

    let facets = Category::ALL
        .iter()
        .map(|&category| FacetOption {
            value: category.as_str().to_owned(),
            label: facet_label(category).to_owned(),
            checked: filter.categories.contains(&category),
        })
        .collect();

    let brands = all_brands
        .into_iter()
        .map(|name| BrandOption {
            checked: filter.brands.iter().any(|b| b == &name),
            name,
        })
        .collect();

    Ok(ProductsIndexTemplate {
        products: products.iter().map(ProductView::from).collect(),
        facets,
        brands,
        search: filter.search.unwrap_or_default(),
        price_ceiling: format!("{:.2}", price_ceiling.to_decimal()),
        cart_count: get_cart(&session).await.item_count(),
    })
}
