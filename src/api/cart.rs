//! Shared Cart Endpoints
//!
//! Thin client for server-held carts addressed by code. The code is a
//! capability: anyone holding it can read and join the cart.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{encode_segment, ApiClient};
use crate::cart::MIN_QUANTITY;
use crate::error::AppResult;
use crate::models::{Contributor, LineItem, SharedCartSession};

/// Shared cart session lifecycle.
///
/// No retries and no sequencing: concurrent writers race and the
/// backend keeps the last write per item.
#[async_trait(?Send)]
pub trait CartSessionApi {
    /// `NotFound` for an unknown code, `Unauthorized` without a valid credential
    async fn fetch_session(&self, code: &str) -> AppResult<SharedCartSession>;

    /// Returns the new session's code
    async fn create_session(&self, items: &[LineItem], creator: Option<&Contributor>) -> AppResult<String>;

    /// Append `items` (already stamped with the caller's identity)
    async fn join_session(&self, code: &str, items: &[LineItem]) -> AppResult<()>;

    /// Sends nothing when `quantity` is below one
    async fn update_quantity(&self, code: &str, item_id: &str, quantity: i64) -> AppResult<()>;
}

// ========================
// Request Bodies
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionArgs<'a> {
    items: &'a [LineItem],
    #[serde(skip_serializing_if = "Option::is_none")]
    created_by: Option<&'a Contributor>,
}

#[derive(Deserialize)]
struct CreatedSession {
    code: String,
}

#[derive(Serialize)]
struct JoinSessionArgs<'a> {
    code: &'a str,
    items: &'a [LineItem],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateQuantityArgs<'a> {
    code: &'a str,
    item_id: &'a str,
    quantity: i64,
}

// ========================
// HTTP implementation
// ========================

#[async_trait(?Send)]
impl CartSessionApi for ApiClient {
    async fn fetch_session(&self, code: &str) -> AppResult<SharedCartSession> {
        let path = format!("/api/cart/{}", encode_segment(code));
        self.get_json(&path).await
    }

    async fn create_session(&self, items: &[LineItem], creator: Option<&Contributor>) -> AppResult<String> {
        let created: CreatedSession = self
            .post_json("/api/cart/create", &CreateSessionArgs { items, created_by: creator })
            .await?;
        log::info!("[CART] created shared cart {} with {} items", created.code, items.len());
        Ok(created.code)
    }

    async fn join_session(&self, code: &str, items: &[LineItem]) -> AppResult<()> {
        self.post_unit("/api/cart/join", &JoinSessionArgs { code, items }).await?;
        log::info!("[CART] joined shared cart {} with {} items", code, items.len());
        Ok(())
    }

    async fn update_quantity(&self, code: &str, item_id: &str, quantity: i64) -> AppResult<()> {
        if quantity < MIN_QUANTITY {
            log::debug!("[CART] ignoring quantity {} for {}", quantity, item_id);
            return Ok(());
        }
        self.post_unit(
            "/api/cart/update-quantity",
            &UpdateQuantityArgs { code, item_id, quantity },
        )
        .await
    }
}
