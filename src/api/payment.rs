//! Payment Endpoints
//!
//! Gateway order bridging for both cart checkout and wallet top-up.

use async_trait::async_trait;
use serde::Serialize;

use super::ApiClient;
use crate::error::AppResult;
use crate::models::{CheckoutResponse, GatewayOrder, VerifyResponse};
use crate::payment::{PaymentBackend, PaymentChannel};

#[derive(Serialize)]
struct CreateOrderArgs<'a> {
    amount: f64,
    currency: &'a str,
}

#[derive(Serialize)]
struct VerifyArgs<'a> {
    #[serde(flatten)]
    response: &'a CheckoutResponse,
    amount: f64,
}

#[async_trait(?Send)]
impl PaymentBackend for ApiClient {
    async fn create_order(&self, channel: PaymentChannel, amount: f64) -> AppResult<GatewayOrder> {
        let args = CreateOrderArgs {
            amount,
            currency: &self.config().currency,
        };
        self.post_json(channel.create_order_path(), &args).await
    }

    async fn verify_payment(
        &self,
        channel: PaymentChannel,
        amount: f64,
        response: &CheckoutResponse,
    ) -> AppResult<VerifyResponse> {
        self.post_json(channel.verify_path(), &VerifyArgs { response, amount })
            .await
    }
}
