//! The customer cart ledger.
//!
//! An ordered list of product snapshots with quantities, held in the
//! session. At most one line exists per product; quantities stay within
//! `1..=min(10, aggregate stock)`, where the stock figure is supplied by the
//! caller on every stock-sensitive mutation. All operations are silent:
//! hitting a cap leaves the line unchanged rather than erroring.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use voltio_core::{Price, ProductId};

use crate::models::product::Product;

/// Hard per-line quantity cap, independent of stock.
pub const MAX_LINE_QUANTITY: u32 = 10;

/// A cart line: product snapshot plus quantity.
///
/// The snapshot is taken when the line is created, so later catalog edits
/// don't reprice a cart mid-session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub brand: String,
    pub product_type: String,
    pub price: Price,
    pub image_url: String,
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot a product into a fresh line with quantity 1.
    #[must_use]
    pub fn snapshot(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            product_type: product.product_type.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            quantity: 1,
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.line_total(self.quantity)
    }
}

/// Direction for a quantity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityAction {
    Increase,
    Decrease,
}

/// The customer cart: an ordered, per-product-deduplicated line list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `product`, given its current aggregate stock.
    ///
    /// With no stock there is nothing to add. An existing line gains one
    /// unit unless that would exceed min(10, stock); otherwise the cart is
    /// left unchanged. A new line starts at quantity 1.
    pub fn add(&mut self, product: &Product, available_stock: i64) {
        let cap = line_cap(available_stock);
        if cap == 0 {
            return;
        }

        if let Some(line) = self.line_mut(product.id) {
            if line.quantity < cap {
                line.quantity += 1;
            }
        } else {
            self.lines.push(CartLine::snapshot(product));
        }
    }

    /// Adjust the quantity of an existing line.
    ///
    /// No-op when the product has no line, when an increase would pass
    /// min(10, stock), or when a decrease would drop below 1.
    pub fn update(&mut self, product_id: ProductId, action: QuantityAction, available_stock: i64) {
        let cap = line_cap(available_stock);
        if let Some(line) = self.line_mut(product_id) {
            match action {
                QuantityAction::Increase if line.quantity < cap => line.quantity += 1,
                QuantityAction::Decrease if line.quantity > 1 => line.quantity -= 1,
                QuantityAction::Increase | QuantityAction::Decrease => {}
            }
        }
    }

    /// Remove the line for `product_id`, if present.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Empty the cart (checkout or explicit clear).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Order total. No tax or shipping modeling: total equals subtotal.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal()
    }

    /// Total units across all lines, for the header badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}

/// Effective per-line cap: min(10, stock), never negative.
fn line_cap(available_stock: i64) -> u32 {
    u32::try_from(available_stock.clamp(0, i64::from(MAX_LINE_QUANTITY))).unwrap_or(0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn phone() -> Product {
        Product {
            id: ProductId::new(1),
            name: "iPhone 15 Pro Max 256GB".to_owned(),
            brand: "Apple".to_owned(),
            product_type: "phone".to_owned(),
            price: Price::from_cents(28_999_00),
            description: String::new(),
            image_url: "/static/img/products/iphone15.jpg".to_owned(),
            available: true,
        }
    }

    fn charger() -> Product {
        Product {
            id: ProductId::new(6),
            name: "Fast Charger 30W".to_owned(),
            brand: "Samsung".to_owned(),
            product_type: "charger".to_owned(),
            price: Price::from_cents(899_00),
            description: String::new(),
            image_url: String::new(),
            available: true,
        }
    }

    #[test]
    fn test_add_creates_single_line_with_quantity_one() {
        let mut cart = Cart::default();
        cart.add(&phone(), 5);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.lines()[0].product_id, ProductId::new(1));
    }

    #[test]
    fn test_add_clamps_at_stock() {
        // stock=2: third add is a silent no-op
        let mut cart = Cart::default();
        for _ in 0..3 {
            cart.add(&phone(), 2);
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_clamps_at_ten_even_with_deep_stock() {
        let mut cart = Cart::default();
        for _ in 0..25 {
            cart.add(&phone(), 500);
        }

        assert_eq!(cart.lines()[0].quantity, MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_add_with_no_stock_is_a_no_op() {
        let mut cart = Cart::default();
        cart.add(&phone(), 0);
        cart.add(&phone(), -3);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_then_add_resets_quantity() {
        let mut cart = Cart::default();
        cart.add(&phone(), 5);
        cart.add(&phone(), 5);
        cart.remove(ProductId::new(1));
        cart.add(&phone(), 5);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_one_line_per_product_after_mixed_operations() {
        let mut cart = Cart::default();
        for _ in 0..4 {
            cart.add(&phone(), 10);
            cart.add(&charger(), 10);
        }
        cart.update(ProductId::new(6), QuantityAction::Decrease, 10);
        cart.remove(ProductId::new(1));
        cart.add(&phone(), 10);

        let mut ids: Vec<i64> = cart.lines().iter().map(|l| l.product_id.as_i64()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), cart.lines().len());
    }

    #[test]
    fn test_update_respects_bounds() {
        let mut cart = Cart::default();
        cart.add(&phone(), 2);
        cart.add(&phone(), 2);

        // at the stock cap: increase is a no-op
        cart.update(ProductId::new(1), QuantityAction::Increase, 2);
        assert_eq!(cart.lines()[0].quantity, 2);

        cart.update(ProductId::new(1), QuantityAction::Decrease, 2);
        assert_eq!(cart.lines()[0].quantity, 1);

        // at quantity 1: decrease is a no-op, not a removal
        cart.update(ProductId::new(1), QuantityAction::Decrease, 2);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_update_unknown_product_is_a_no_op() {
        let mut cart = Cart::default();
        cart.add(&phone(), 5);
        cart.update(ProductId::new(999), QuantityAction::Increase, 5);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_spec_scenario_stock_two() {
        // Add, add, add (capped), decrease, remove
        let mut cart = Cart::default();
        let product = phone();

        cart.add(&product, 2);
        assert_eq!(cart.lines()[0].quantity, 1);

        cart.add(&product, 2);
        assert_eq!(cart.lines()[0].quantity, 2);

        cart.add(&product, 2);
        assert_eq!(cart.lines()[0].quantity, 2);

        cart.update(product.id, QuantityAction::Decrease, 2);
        assert_eq!(cart.lines()[0].quantity, 1);

        cart.remove(product.id);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::default();
        cart.add(&phone(), 10);
        cart.add(&phone(), 10);
        cart.add(&charger(), 10);

        let expected = Price::from_cents(28_999_00).line_total(2)
            + Price::from_cents(899_00).line_total(1);
        assert_eq!(cart.subtotal(), expected);
        assert_eq!(cart.total(), expected);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_clear_always_empties() {
        let mut cart = Cart::default();
        cart.add(&phone(), 10);
        cart.add(&charger(), 10);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_snapshot_keeps_price_stable_across_catalog_changes() {
        let mut cart = Cart::default();
        let mut product = phone();
        cart.add(&product, 10);

        // catalog repricing after the fact does not touch the line
        product.price = Price::from_cents(1);
        cart.add(&product, 10);

        assert_eq!(cart.lines()[0].price, Price::from_cents(28_999_00));
    }
}
