//! Frontend Models
//!
//! Data structures matching backend payloads. Field names follow the
//! backend's camelCase JSON.

use serde::{Deserialize, Serialize};

/// Who added an item to a shared cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Contributor {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// One product entry in a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub item_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<Contributor>,
}

impl LineItem {
    pub fn new(item_id: impl Into<String>, name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            price,
            quantity,
            added_by: None,
        }
    }

    pub fn with_contributor(mut self, contributor: Contributor) -> Self {
        self.added_by = Some(contributor);
        self
    }

    /// price × quantity, unrounded
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Server-held multi-user cart, addressed by its code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedCartSession {
    pub code: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

/// Catalog product as listed under a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
}

impl Product {
    /// Single-unit line item for the local cart
    pub fn to_line_item(&self) -> LineItem {
        LineItem::new(self.id.clone(), self.name.clone(), self.price, 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub vehicle: Option<String>,
    #[serde(default)]
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopItem {
    pub name: String,
    pub quantity: i64,
    #[serde(default)]
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopAnalysis {
    pub total_orders: u64,
    pub total_revenue: f64,
    #[serde(default)]
    pub top_items: Vec<TopItem>,
}

/// Cached account fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(rename = "type", default)]
    pub account_type: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Profile {
    pub fn contributor(&self) -> Contributor {
        Contributor::new(self.name.clone(), self.email.clone())
    }
}

/// Issued by login, signup and Google sign-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: Profile,
}

/// Order created by the backend for the checkout widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayOrder {
    #[serde(alias = "id")]
    pub order_id: String,
    /// Minor currency units (paise)
    pub amount: u64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub key_id: Option<String>,
}

fn default_currency() -> String {
    "INR".to_string()
}

/// What the checkout widget hands back after a successful payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub razorpay_payment_id: String,
    pub razorpay_order_id: String,
    pub razorpay_signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransaction {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub amount: f64,
    /// "credit" or "debit"
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSummary {
    pub balance: f64,
    #[serde(default)]
    pub transactions: Vec<WalletTransaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub order_id: String,
    #[serde(default)]
    pub payment_id: Option<String>,
    pub amount: f64,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

/// Currency display; the only place amounts get rounded
pub fn format_price(amount: f64) -> String {
    // -0.0 and sub-paisa negatives would otherwise print as "-0.00"
    let amount = if amount.abs() < 0.005 { 0.0 } else { amount };
    format!("₹{:.2}", amount)
}

/// Backend timestamps are RFC 3339; anything else is shown verbatim
pub fn format_timestamp(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(at) => at.with_timezone(&chrono::Local).format("%d %b %Y, %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_wire_names() {
        let item = LineItem::new("A", "Rice", 100.0, 2)
            .with_contributor(Contributor::new("Alice", "alice@x.com"));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["itemId"], "A");
        assert_eq!(json["addedBy"]["email"], "alice@x.com");
    }

    #[test]
    fn test_unattributed_item_omits_added_by() {
        let json = serde_json::to_value(LineItem::new("A", "Rice", 100.0, 1)).unwrap();
        assert!(json.get("addedBy").is_none());
    }

    #[test]
    fn test_contributor_without_email() {
        let c: Contributor = serde_json::from_str(r#"{"name":"Guest"}"#).unwrap();
        assert_eq!(c.email, "");
    }

    #[test]
    fn test_store_products_default_empty() {
        let store: Store = serde_json::from_str(r#"{"_id":"s1","name":"Corner Shop"}"#).unwrap();
        assert_eq!(store.id, "s1");
        assert!(store.products.is_empty());
    }

    #[test]
    fn test_profile_type_field() {
        let p: Profile =
            serde_json::from_str(r#"{"name":"A","email":"a@x.com","type":"customer"}"#).unwrap();
        assert_eq!(p.account_type, "customer");
        assert_eq!(p.contributor(), Contributor::new("A", "a@x.com"));
    }

    #[test]
    fn test_gateway_order_accepts_id_alias() {
        let order: GatewayOrder = serde_json::from_str(r#"{"id":"order_1","amount":35000}"#).unwrap();
        assert_eq!(order.order_id, "order_1");
        assert_eq!(order.currency, "INR");
    }

    #[test]
    fn test_format_price_rounds_for_display_only() {
        assert_eq!(format_price(350.0), "₹350.00");
        assert_eq!(format_price(0.1 + 0.2), "₹0.30");
    }

    #[test]
    fn test_format_price_never_negative_zero() {
        assert_eq!(format_price(-0.0), "₹0.00");
        assert_eq!(format_price(-0.001), "₹0.00");
        assert_eq!(format_price(-12.5), "₹-12.50");
    }

    #[test]
    fn test_format_timestamp_fallback() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert!(format_timestamp("2024-03-01T10:30:00Z").contains("2024"));
    }
}
