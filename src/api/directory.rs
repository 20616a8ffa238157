//! Listing Endpoints
//!
//! Stores (with their products), drivers and the shop report.

use super::ApiClient;
use crate::error::AppResult;
use crate::models::{Driver, Product, ShopAnalysis, Store};

impl ApiClient {
    pub async fn stores(&self) -> AppResult<Vec<Store>> {
        self.get_json("/api/store").await
    }

    pub async fn drivers(&self) -> AppResult<Vec<Driver>> {
        self.get_json("/api/drivers").await
    }

    pub async fn shop_analysis(&self) -> AppResult<ShopAnalysis> {
        self.get_json("/api/shop-analysis").await
    }
}

/// Flatten every store's products into one catalog, tagging each with
/// its store when the backend left `storeId` out.
pub fn catalog(stores: &[Store]) -> Vec<Product> {
    stores
        .iter()
        .flat_map(|store| {
            store.products.iter().cloned().map(move |mut product| {
                if product.store_id.is_none() {
                    product.store_id = Some(store.id.clone());
                }
                product
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_tags_store() {
        let stores: Vec<Store> = serde_json::from_str(
            r#"[
                {"id":"s1","name":"Corner","products":[{"id":"p1","name":"Rice","price":100}]},
                {"id":"s2","name":"Mart","products":[{"id":"p2","name":"Oil","price":150,"storeId":"other"}]}
            ]"#,
        )
        .unwrap();

        let products = catalog(&stores);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].store_id.as_deref(), Some("s1"));
        assert_eq!(products[1].store_id.as_deref(), Some("other"));
    }
}
