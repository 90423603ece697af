//! The point-of-sale ledger.
//!
//! A second session-scoped line list, independent of the customer cart,
//! driven by scanning product ids at the register. Unlike the web cart,
//! scanning does not enforce the stock cap: the operator is holding the
//! physical item, so a lagging inventory count must not block the sale.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use voltio_core::ProductId;

use crate::cart::CartLine;
use crate::models::product::Product;

/// A register sale line. Same shape as a cart line.
pub type SaleLine = CartLine;

/// An in-progress register sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosSale {
    lines: Vec<SaleLine>,
}

impl PosSale {
    /// The sale lines, in scan order.
    #[must_use]
    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Record a scan of `product`: bump its line, or open one at quantity 1.
    pub fn scan(&mut self, product: &Product) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity += 1;
        } else {
            self.lines.push(SaleLine::snapshot(product));
        }
    }

    /// Remove the line for `product_id`, if present.
    pub fn remove_line(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Empty the sale, whether finalizing or abandoning it.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(SaleLine::line_total).sum()
    }

    /// Sale total. Same formula as the cart: no tax or shipping.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use voltio_core::Price;

    fn product(id: i64, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            brand: "Samsung".to_owned(),
            product_type: "charger".to_owned(),
            price: Price::from_cents(cents),
            description: String::new(),
            image_url: String::new(),
            available: true,
        }
    }

    #[test]
    fn test_scan_opens_line_then_increments() {
        let mut sale = PosSale::default();
        let item = product(3, 1_999);

        sale.scan(&item);
        assert_eq!(sale.lines().len(), 1);
        assert_eq!(sale.lines()[0].quantity, 1);

        sale.scan(&item);
        assert_eq!(sale.lines().len(), 1);
        assert_eq!(sale.lines()[0].quantity, 2);
    }

    #[test]
    fn test_scan_has_no_quantity_cap() {
        // staff override: the register trusts the physical item in hand
        let mut sale = PosSale::default();
        let item = product(3, 1_999);
        for _ in 0..40 {
            sale.scan(&item);
        }

        assert_eq!(sale.lines()[0].quantity, 40);
    }

    #[test]
    fn test_one_line_per_product() {
        let mut sale = PosSale::default();
        for _ in 0..3 {
            sale.scan(&product(1, 100));
            sale.scan(&product(2, 200));
        }
        sale.remove_line(ProductId::new(1));
        sale.scan(&product(1, 100));

        let mut ids: Vec<i64> = sale.lines().iter().map(|l| l.product_id.as_i64()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), sale.lines().len());
    }

    #[test]
    fn test_remove_line_missing_is_a_no_op() {
        let mut sale = PosSale::default();
        sale.scan(&product(1, 100));
        sale.remove_line(ProductId::new(99));

        assert_eq!(sale.lines().len(), 1);
    }

    #[test]
    fn test_totals_match_cart_formula() {
        let mut sale = PosSale::default();
        sale.scan(&product(1, 1_599_00));
        sale.scan(&product(1, 1_599_00));
        sale.scan(&product(2, 899_00));

        let expected =
            Price::from_cents(1_599_00).line_total(2) + Price::from_cents(899_00).line_total(1);
        assert_eq!(sale.subtotal(), expected);
        assert_eq!(sale.total(), expected);
        assert_eq!(sale.item_count(), 3);
    }

    #[test]
    fn test_clear_empties_unconditionally() {
        let mut sale = PosSale::default();
        sale.scan(&product(1, 100));
        sale.scan(&product(2, 200));
        sale.clear();

        assert!(sale.is_empty());
        assert_eq!(sale.subtotal(), Decimal::ZERO);
    }
}
