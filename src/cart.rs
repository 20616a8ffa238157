//! Local Cart Operations
//!
//! Pure functions over a cart's line items. Quantities never drop
//! below one through these helpers; removal is always explicit.

use serde::{Deserialize, Serialize};

use crate::models::{Contributor, LineItem};

pub const MIN_QUANTITY: i64 = 1;

/// Add `item`, merging into an existing entry with the same `item_id`.
pub fn add_item(items: &mut Vec<LineItem>, item: LineItem) {
    let added = item.quantity.max(MIN_QUANTITY);
    match items.iter_mut().find(|existing| existing.item_id == item.item_id) {
        Some(existing) => existing.quantity += added,
        None => items.push(LineItem {
            quantity: added,
            ..item
        }),
    }
}

/// Set an item's quantity, clamped to the floor. Returns false if absent.
pub fn set_quantity(items: &mut [LineItem], item_id: &str, quantity: i64) -> bool {
    match items.iter_mut().find(|item| item.item_id == item_id) {
        Some(item) => {
            item.quantity = quantity.max(MIN_QUANTITY);
            true
        }
        None => false,
    }
}

pub fn increment(items: &mut [LineItem], item_id: &str) -> bool {
    let current = quantity_of(items, item_id);
    current.is_some_and(|q| set_quantity(items, item_id, q + 1))
}

/// Decrementing at the floor leaves the quantity at one
pub fn decrement(items: &mut [LineItem], item_id: &str) -> bool {
    let current = quantity_of(items, item_id);
    current.is_some_and(|q| set_quantity(items, item_id, q - 1))
}

pub fn remove_item(items: &mut Vec<LineItem>, item_id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.item_id != item_id);
    items.len() != before
}

pub fn quantity_of(items: &[LineItem], item_id: &str) -> Option<i64> {
    items
        .iter()
        .find(|item| item.item_id == item_id)
        .map(|item| item.quantity)
}

/// Σ price × quantity over the whole cart
pub fn cart_total(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::line_total).fold(0.0, |acc, x| acc + x)
}

/// Units in the cart, shown on the nav badge
pub fn item_count(items: &[LineItem]) -> i64 {
    items.iter().map(|item| item.quantity).sum()
}

/// Copies of `items` attributed to `contributor`, as sent on join
pub fn stamp_contributor(items: &[LineItem], contributor: &Contributor) -> Vec<LineItem> {
    items
        .iter()
        .cloned()
        .map(|item| item.with_contributor(contributor.clone()))
        .collect()
}

/// Cart snapshot handed from the cart page to the checkout page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutHandoff {
    pub items: Vec<LineItem>,
    pub total: f64,
}

impl CheckoutHandoff {
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let total = cart_total(&items);
        Self { items, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::format_price;

    fn rice() -> LineItem {
        LineItem::new("A", "Rice", 100.0, 1)
    }

    #[test]
    fn test_duplicate_add_increments() {
        let mut items = Vec::new();
        add_item(&mut items, rice());
        add_item(&mut items, rice());

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_add_clamps_incoming_quantity() {
        let mut items = Vec::new();
        add_item(&mut items, LineItem::new("A", "Rice", 100.0, 0));
        assert_eq!(items[0].quantity, 1);
    }

    #[test]
    fn test_set_quantity_floor() {
        let mut items = vec![rice()];
        assert!(set_quantity(&mut items, "A", 0));
        assert_eq!(items[0].quantity, 1);
        assert!(set_quantity(&mut items, "A", -5));
        assert_eq!(items[0].quantity, 1);
        assert!(!set_quantity(&mut items, "missing", 3));
    }

    #[test]
    fn test_decrement_never_removes() {
        let mut items = vec![rice()];
        assert!(decrement(&mut items, "A"));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 1);
    }

    #[test]
    fn test_increment_then_decrement() {
        let mut items = vec![rice()];
        increment(&mut items, "A");
        increment(&mut items, "A");
        decrement(&mut items, "A");
        assert_eq!(quantity_of(&items, "A"), Some(2));
    }

    #[test]
    fn test_remove_item() {
        let mut items = vec![rice(), LineItem::new("B", "Oil", 150.0, 1)];
        assert!(remove_item(&mut items, "A"));
        assert!(!remove_item(&mut items, "A"));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_totals() {
        let items = vec![
            LineItem::new("A", "Rice", 100.0, 2),
            LineItem::new("B", "Oil", 150.0, 1),
        ];
        assert_eq!(cart_total(&items), 350.0);
        assert_eq!(item_count(&items), 3);
        assert_eq!(cart_total(&[]), 0.0);
    }

    #[test]
    fn test_empty_cart_renders_zero_total() {
        assert!(cart_total(&[]).is_sign_positive());
        assert_eq!(format_price(cart_total(&[])), "₹0.00");
    }

    #[test]
    fn test_stamp_contributor() {
        let alice = Contributor::new("Alice", "alice@x.com");
        let stamped = stamp_contributor(&[rice()], &alice);
        assert_eq!(stamped[0].added_by.as_ref(), Some(&alice));
    }

    #[test]
    fn test_handoff_total() {
        let handoff = CheckoutHandoff::from_items(vec![LineItem::new("A", "Rice", 100.0, 3)]);
        assert_eq!(handoff.total, 300.0);
    }
}
