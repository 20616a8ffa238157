//! Wallet Endpoints
//!
//! Read-only balance. Top-ups go through `PaymentChannel::Wallet`.

use super::ApiClient;
use crate::error::AppResult;
use crate::models::WalletSummary;

impl ApiClient {
    pub async fn wallet(&self) -> AppResult<WalletSummary> {
        self.get_json("/api/wallet").await
    }
}
