//! Catalog filter model and WHERE-clause construction.
//!
//! Facet selections are collected into a [`ProductFilter`] and rendered into
//! a parameterized WHERE clause by [`QueryClauses`]: a list of SQL fragments
//! with a parallel list of bindings, joined once with AND. User input only
//! ever travels through bindings, never through the SQL text.

use sqlx::Sqlite;
use sqlx::query::QueryAs;

use voltio_core::{Category, Price};

/// Recognized facet selections for the product listing.
///
/// Everything is optional; an empty filter matches every available product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Category facets. `Accessories` widens the selection to every
    /// non-principal type; it never narrows it.
    pub categories: Vec<Category>,
    /// Brand facets, matched exactly.
    pub brands: Vec<String>,
    /// Free-text term, substring-matched against name, brand and type.
    pub search: Option<String>,
    /// Upper price bound.
    pub max_price: Option<Price>,
}

impl ProductFilter {
    /// Build a filter from raw query-string pairs.
    ///
    /// Unknown keys and unknown category tokens are ignored; an unparseable
    /// `max_price` degrades to no constraint rather than an error.
    #[must_use]
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut filter = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "category" => {
                    if let Some(category) = Category::parse(value)
                        && !filter.categories.contains(&category)
                    {
                        filter.categories.push(category);
                    }
                }
                "brand" => {
                    let brand = value.trim();
                    if !brand.is_empty() && !filter.brands.iter().any(|b| b == brand) {
                        filter.brands.push(brand.to_owned());
                    }
                }
                "q" => {
                    let term = value.trim();
                    if !term.is_empty() {
                        filter.search = Some(term.to_owned());
                    }
                }
                "max_price" => {
                    filter.max_price = Price::parse(value);
                }
                _ => {}
            }
        }

        filter
    }

    /// Whether any facet is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.brands.is_empty()
            && self.search.is_none()
            && self.max_price.is_none()
    }
}

/// A bound query parameter.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BindValue {
    Text(String),
    Integer(i64),
}

/// Accumulated WHERE conditions with their bindings.
#[derive(Debug, Default)]
pub(crate) struct QueryClauses {
    conditions: Vec<String>,
    bindings: Vec<BindValue>,
}

impl QueryClauses {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a condition that binds nothing.
    pub(crate) fn push_condition(&mut self, condition: impl Into<String>) -> &mut Self {
        self.conditions.push(condition.into());
        self
    }

    pub(crate) fn bind_text(&mut self, value: impl Into<String>) -> &mut Self {
        self.bindings.push(BindValue::Text(value.into()));
        self
    }

    pub(crate) fn bind_i64(&mut self, value: i64) -> &mut Self {
        self.bindings.push(BindValue::Integer(value));
        self
    }

    /// Add an `IN (...)` condition over text values.
    pub(crate) fn add_in_condition<S: AsRef<str>>(
        &mut self,
        field: &str,
        values: &[S],
    ) -> &mut Self {
        self.conditions
            .push(format!("{field} IN ({})", placeholders(values.len())));
        for value in values {
            self.bindings
                .push(BindValue::Text(value.as_ref().to_owned()));
        }
        self
    }

    /// Add a LIKE search condition over multiple fields.
    pub(crate) fn add_search_condition(&mut self, fields: &[&str], term: &str) -> &mut Self {
        let field_conditions: Vec<String> =
            fields.iter().map(|field| format!("{field} LIKE ?")).collect();
        self.conditions
            .push(format!("({})", field_conditions.join(" OR ")));

        let pattern = format!("%{term}%");
        for _ in fields {
            self.bindings.push(BindValue::Text(pattern.clone()));
        }
        self
    }

    /// Add the category facet condition.
    ///
    /// Principal facets select their type; `accessories` selects the
    /// complement of the principal set. The two halves OR-combine, so adding
    /// a principal facet to an accessories selection only ever widens it.
    pub(crate) fn add_category_condition(&mut self, categories: &[Category]) -> &mut Self {
        let principal: Vec<&'static str> = categories
            .iter()
            .filter_map(Category::product_type)
            .collect();
        let accessories = categories.contains(&Category::Accessories);

        let complement = format!(
            "product_type NOT IN ({})",
            placeholders(Category::PRINCIPAL_TYPES.len())
        );

        match (principal.is_empty(), accessories) {
            (true, false) => return self,
            (false, false) => {
                self.conditions
                    .push(format!("product_type IN ({})", placeholders(principal.len())));
            }
            (true, true) => {
                self.conditions.push(complement);
            }
            (false, true) => {
                self.conditions.push(format!(
                    "(product_type IN ({}) OR {complement})",
                    placeholders(principal.len())
                ));
            }
        }

        for ty in &principal {
            self.bindings.push(BindValue::Text((*ty).to_owned()));
        }
        if accessories {
            for ty in Category::PRINCIPAL_TYPES {
                self.bindings.push(BindValue::Text(ty.to_owned()));
            }
        }
        self
    }

    /// Render the WHERE clause (empty string if no conditions).
    pub(crate) fn where_sql(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Apply the accumulated bindings, in order, to a `query_as`.
    pub(crate) fn apply_as<'a, 'b, O>(
        &'b self,
        mut query: QueryAs<'a, Sqlite, O, <Sqlite as sqlx::Database>::Arguments<'a>>,
    ) -> QueryAs<'a, Sqlite, O, <Sqlite as sqlx::Database>::Arguments<'a>>
    where
        'b: 'a,
    {
        for binding in &self.bindings {
            query = match binding {
                BindValue::Text(s) => query.bind(s),
                BindValue::Integer(i) => query.bind(*i),
            };
        }
        query
    }
}

/// Build the full clause set for an availability-scoped listing query.
pub(crate) fn listing_clauses(filter: &ProductFilter) -> QueryClauses {
    let mut clauses = QueryClauses::new();
    clauses.push_condition("available = 1");
    clauses.add_category_condition(&filter.categories);

    if !filter.brands.is_empty() {
        clauses.add_in_condition("brand", &filter.brands);
    }
    if let Some(term) = &filter.search {
        clauses.add_search_condition(&["name", "brand", "product_type"], term);
    }
    if let Some(max_price) = filter.max_price {
        clauses.push_condition("price <= ?");
        clauses.bind_i64(max_price.as_cents());
    }

    clauses
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pairs(input: &[(&str, &str)]) -> Vec<(String, String)> {
        input
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_empty_where_clause() {
        let clauses = QueryClauses::new();
        assert_eq!(clauses.where_sql(), "");
    }

    #[test]
    fn test_listing_always_scopes_to_available() {
        let clauses = listing_clauses(&ProductFilter::default());
        assert_eq!(clauses.where_sql(), " WHERE available = 1");
        assert!(clauses.bindings.is_empty());
    }

    #[test]
    fn test_principal_categories_render_in_clause() {
        let filter = ProductFilter {
            categories: vec![Category::Phones, Category::Tablets],
            ..ProductFilter::default()
        };
        let clauses = listing_clauses(&filter);
        assert_eq!(
            clauses.where_sql(),
            " WHERE available = 1 AND product_type IN (?, ?)"
        );
        assert_eq!(
            clauses.bindings,
            vec![
                BindValue::Text("phone".to_owned()),
                BindValue::Text("tablet".to_owned()),
            ]
        );
    }

    #[test]
    fn test_accessories_alone_renders_complement() {
        let filter = ProductFilter {
            categories: vec![Category::Accessories],
            ..ProductFilter::default()
        };
        let clauses = listing_clauses(&filter);
        assert_eq!(
            clauses.where_sql(),
            " WHERE available = 1 AND product_type NOT IN (?, ?, ?, ?)"
        );
        assert_eq!(clauses.bindings.len(), 4);
    }

    #[test]
    fn test_accessories_with_principal_widens_with_or() {
        let filter = ProductFilter {
            categories: vec![Category::Phones, Category::Accessories],
            ..ProductFilter::default()
        };
        let clauses = listing_clauses(&filter);
        assert_eq!(
            clauses.where_sql(),
            " WHERE available = 1 AND (product_type IN (?) OR product_type NOT IN (?, ?, ?, ?))"
        );
        // phone, then the four principal types for the complement
        assert_eq!(clauses.bindings.len(), 5);
    }

    #[test]
    fn test_search_condition_binds_per_field() {
        let filter = ProductFilter {
            search: Some("galaxy".to_owned()),
            ..ProductFilter::default()
        };
        let clauses = listing_clauses(&filter);
        assert_eq!(
            clauses.where_sql(),
            " WHERE available = 1 AND (name LIKE ? OR brand LIKE ? OR product_type LIKE ?)"
        );
        assert_eq!(
            clauses.bindings,
            vec![
                BindValue::Text("%galaxy%".to_owned()),
                BindValue::Text("%galaxy%".to_owned()),
                BindValue::Text("%galaxy%".to_owned()),
            ]
        );
    }

    #[test]
    fn test_user_text_never_lands_in_sql() {
        let filter = ProductFilter {
            search: Some("'; DROP TABLE product; --".to_owned()),
            brands: vec!["Robert'); --".to_owned()],
            ..ProductFilter::default()
        };
        let clauses = listing_clauses(&filter);
        assert!(!clauses.where_sql().contains("DROP"));
        assert!(!clauses.where_sql().contains("Robert"));
    }

    #[test]
    fn test_from_pairs_collects_facets() {
        let filter = ProductFilter::from_pairs(&pairs(&[
            ("category", "phones"),
            ("category", "accessories"),
            ("category", "phones"),
            ("brand", "Apple"),
            ("brand", " "),
            ("q", "  pro  "),
            ("max_price", "299.99"),
            ("utm_source", "newsletter"),
        ]));

        assert_eq!(
            filter.categories,
            vec![Category::Phones, Category::Accessories]
        );
        assert_eq!(filter.brands, vec!["Apple".to_owned()]);
        assert_eq!(filter.search.as_deref(), Some("pro"));
        assert_eq!(filter.max_price, Some(Price::from_cents(29_999)));
    }

    #[test]
    fn test_from_pairs_bad_price_degrades_to_unconstrained() {
        let filter = ProductFilter::from_pairs(&pairs(&[("max_price", "cheap")]));
        assert_eq!(filter.max_price, None);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_unknown_category_token_ignored() {
        let filter = ProductFilter::from_pairs(&pairs(&[("category", "gadgets")]));
        assert!(filter.categories.is_empty());
    }
}
