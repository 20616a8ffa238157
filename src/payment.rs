//! Payment Initiator
//!
//! Settles an amount in three steps: the backend creates a gateway
//! order, the checkout widget collects the payment, and the backend
//! verifies the widget's signature. The same flow serves cart checkout
//! and wallet top-up through `PaymentChannel`.

use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::models::{CheckoutResponse, GatewayOrder, Profile, VerifyResponse};

/// Which backend flow an amount is settled through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentChannel {
    Order,
    Wallet,
}

impl PaymentChannel {
    pub fn create_order_path(&self) -> &'static str {
        match self {
            PaymentChannel::Order => "/api/payment/create-order",
            PaymentChannel::Wallet => "/api/wallet/create-order",
        }
    }

    pub fn verify_path(&self) -> &'static str {
        match self {
            PaymentChannel::Order => "/api/payment/verify",
            PaymentChannel::Wallet => "/api/wallet/verify",
        }
    }
}

/// Backend half of the flow
#[async_trait(?Send)]
pub trait PaymentBackend {
    /// `amount` in major currency units
    async fn create_order(&self, channel: PaymentChannel, amount: f64) -> AppResult<GatewayOrder>;

    async fn verify_payment(
        &self,
        channel: PaymentChannel,
        amount: f64,
        response: &CheckoutResponse,
    ) -> AppResult<VerifyResponse>;
}

/// Third-party checkout UI
#[async_trait(?Send)]
pub trait CheckoutWidget {
    /// Resolves once the user pays; `Cancelled` if they close the widget
    async fn collect(&self, request: &CheckoutRequest) -> AppResult<CheckoutResponse>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Prefill {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl From<&Profile> for Prefill {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            contact: profile.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub key_id: String,
    pub order: GatewayOrder,
    pub merchant_name: String,
    pub description: String,
    pub prefill: Prefill,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub order_id: String,
    pub payment_id: String,
    pub amount: f64,
    pub message: Option<String>,
}

pub struct PaymentInitiator<'a, B, W> {
    backend: &'a B,
    widget: &'a W,
    config: &'a AppConfig,
}

impl<'a, B: PaymentBackend, W: CheckoutWidget> PaymentInitiator<'a, B, W> {
    pub fn new(backend: &'a B, widget: &'a W, config: &'a AppConfig) -> Self {
        Self { backend, widget, config }
    }

    pub async fn settle(
        &self,
        channel: PaymentChannel,
        amount: f64,
        description: &str,
        prefill: Prefill,
    ) -> AppResult<PaymentReceipt> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::Validation("Amount must be greater than zero".to_string()));
        }

        let order = self.backend.create_order(channel, amount).await?;
        log::info!("[PAYMENT] {:?} order {} for {}", channel, order.order_id, amount);

        let key_id = order
            .key_id
            .clone()
            .or_else(|| self.config.razorpay_key_id.clone())
            .ok_or_else(|| AppError::Validation("Payments are not configured".to_string()))?;

        let request = CheckoutRequest {
            key_id,
            order,
            merchant_name: self.config.merchant_name.clone(),
            description: description.to_string(),
            prefill,
        };
        let response = self.widget.collect(&request).await?;

        let verified = self.backend.verify_payment(channel, amount, &response).await?;
        if !verified.success {
            log::warn!("[PAYMENT] verification failed for {}", response.razorpay_order_id);
            return Err(AppError::Rejected(
                verified
                    .message
                    .unwrap_or_else(|| "Payment verification failed".to_string()),
            ));
        }

        log::info!("[PAYMENT] verified {}", response.razorpay_payment_id);
        Ok(PaymentReceipt {
            order_id: response.razorpay_order_id,
            payment_id: response.razorpay_payment_id,
            amount,
            message: verified.message,
        })
    }
}

// ========================
// Razorpay checkout widget
// ========================

#[wasm_bindgen]
extern "C" {
    type Razorpay;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &JsValue) -> Result<Razorpay, JsValue>;

    #[wasm_bindgen(method)]
    fn open(this: &Razorpay);

    #[wasm_bindgen(method)]
    fn on(this: &Razorpay, event: &str, callback: &JsValue);
}

/// Options object passed to `new Razorpay(...)`
#[derive(Serialize)]
struct CheckoutOptions<'a> {
    key: &'a str,
    amount: u64,
    currency: &'a str,
    name: &'a str,
    description: &'a str,
    order_id: &'a str,
    prefill: &'a Prefill,
}

const DISMISSED: &str = "dismissed";

/// Binds the Razorpay checkout script loaded by `index.html`
#[derive(Debug, Clone, Copy, Default)]
pub struct RazorpayWidget;

#[async_trait(?Send)]
impl CheckoutWidget for RazorpayWidget {
    async fn collect(&self, request: &CheckoutRequest) -> AppResult<CheckoutResponse> {
        let options = serde_wasm_bindgen::to_value(&CheckoutOptions {
            key: &request.key_id,
            amount: request.order.amount,
            currency: &request.order.currency,
            name: &request.merchant_name,
            description: &request.description,
            order_id: &request.order.order_id,
            prefill: &request.prefill,
        })
        .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut open_error = None;
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            // The widget calls `handler(response)` on success
            let _ = js_sys::Reflect::set(&options, &"handler".into(), &resolve);

            let on_dismiss = {
                let reject = reject.clone();
                Closure::once_into_js(move || {
                    let _ = reject.call1(&JsValue::NULL, &JsValue::from_str(DISMISSED));
                })
            };
            let modal = js_sys::Object::new();
            let _ = js_sys::Reflect::set(&modal, &"ondismiss".into(), &on_dismiss);
            let _ = js_sys::Reflect::set(&options, &"modal".into(), &modal);

            match Razorpay::new(&options) {
                Ok(checkout) => {
                    let on_failed = Closure::once_into_js(move |failure: JsValue| {
                        let _ = reject.call1(&JsValue::NULL, &JsValue::from_str(&failure_description(&failure)));
                    });
                    checkout.on("payment.failed", &on_failed);
                    checkout.open();
                }
                Err(e) => open_error = Some(e),
            }
        });

        if let Some(e) = open_error {
            log::error!("[PAYMENT] checkout script unavailable: {:?}", e);
            return Err(AppError::Network("Could not load the payment window".to_string()));
        }

        match JsFuture::from(promise).await {
            Ok(value) => serde_wasm_bindgen::from_value(value).map_err(|e| AppError::schema("checkout", e)),
            Err(reason) => match reason.as_string().as_deref() {
                Some(DISMISSED) | None => Err(AppError::Cancelled),
                Some(message) => Err(AppError::Rejected(message.to_string())),
            },
        }
    }
}

/// `response.error.description` from a `payment.failed` event
fn failure_description(failure: &JsValue) -> String {
    js_sys::Reflect::get(failure, &"error".into())
        .and_then(|error| js_sys::Reflect::get(&error, &"description".into()))
        .ok()
        .and_then(|d| d.as_string())
        .unwrap_or_else(|| "Payment failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeBackend {
        verify_ok: bool,
        key_id: Option<String>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeBackend {
        fn new(verify_ok: bool) -> Self {
            Self {
                verify_ok,
                key_id: Some("rzp_test_key".to_string()),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl PaymentBackend for FakeBackend {
        async fn create_order(&self, channel: PaymentChannel, amount: f64) -> AppResult<GatewayOrder> {
            self.calls.borrow_mut().push(channel.create_order_path().to_string());
            Ok(GatewayOrder {
                order_id: "order_1".to_string(),
                amount: (amount * 100.0).round() as u64,
                currency: "INR".to_string(),
                key_id: self.key_id.clone(),
            })
        }

        async fn verify_payment(
            &self,
            channel: PaymentChannel,
            _amount: f64,
            _response: &CheckoutResponse,
        ) -> AppResult<VerifyResponse> {
            self.calls.borrow_mut().push(channel.verify_path().to_string());
            Ok(VerifyResponse {
                success: self.verify_ok,
                message: (!self.verify_ok).then(|| "Signature mismatch".to_string()),
            })
        }
    }

    struct FakeWidget {
        outcome: AppResult<()>,
        seen: RefCell<Option<CheckoutRequest>>,
    }

    impl FakeWidget {
        fn paying() -> Self {
            Self { outcome: Ok(()), seen: RefCell::new(None) }
        }

        fn closed() -> Self {
            Self { outcome: Err(AppError::Cancelled), seen: RefCell::new(None) }
        }
    }

    #[async_trait(?Send)]
    impl CheckoutWidget for FakeWidget {
        async fn collect(&self, request: &CheckoutRequest) -> AppResult<CheckoutResponse> {
            *self.seen.borrow_mut() = Some(request.clone());
            self.outcome.clone()?;
            Ok(CheckoutResponse {
                razorpay_payment_id: "pay_1".to_string(),
                razorpay_order_id: request.order.order_id.clone(),
                razorpay_signature: "sig".to_string(),
            })
        }
    }

    fn config() -> AppConfig {
        AppConfig::from_values(Some("http://api"), None, None)
    }

    #[tokio::test]
    async fn test_settle_order_channel() {
        let backend = FakeBackend::new(true);
        let widget = FakeWidget::paying();
        let config = config();
        let receipt = PaymentInitiator::new(&backend, &widget, &config)
            .settle(PaymentChannel::Order, 350.0, "Groceries", Prefill::default())
            .await
            .unwrap();

        assert_eq!(receipt.payment_id, "pay_1");
        assert_eq!(receipt.order_id, "order_1");
        assert_eq!(
            *backend.calls.borrow(),
            vec!["/api/payment/create-order", "/api/payment/verify"]
        );
        let seen = widget.seen.borrow().clone().unwrap();
        assert_eq!(seen.order.amount, 35000);
        assert_eq!(seen.key_id, "rzp_test_key");
    }

    #[tokio::test]
    async fn test_wallet_channel_paths() {
        let backend = FakeBackend::new(true);
        let widget = FakeWidget::paying();
        let config = config();
        PaymentInitiator::new(&backend, &widget, &config)
            .settle(PaymentChannel::Wallet, 500.0, "Top-up", Prefill::default())
            .await
            .unwrap();
        assert_eq!(
            *backend.calls.borrow(),
            vec!["/api/wallet/create-order", "/api/wallet/verify"]
        );
    }

    #[tokio::test]
    async fn test_zero_amount_rejected_before_any_call() {
        let backend = FakeBackend::new(true);
        let widget = FakeWidget::paying();
        let config = config();
        let err = PaymentInitiator::new(&backend, &widget, &config)
            .settle(PaymentChannel::Order, 0.0, "Nothing", Prefill::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(backend.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_closed_widget_skips_verify() {
        let backend = FakeBackend::new(true);
        let widget = FakeWidget::closed();
        let config = config();
        let err = PaymentInitiator::new(&backend, &widget, &config)
            .settle(PaymentChannel::Order, 10.0, "Snacks", Prefill::default())
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Cancelled);
        assert_eq!(*backend.calls.borrow(), vec!["/api/payment/create-order"]);
    }

    #[tokio::test]
    async fn test_failed_verification_surfaces_message() {
        let backend = FakeBackend::new(false);
        let widget = FakeWidget::paying();
        let config = config();
        let err = PaymentInitiator::new(&backend, &widget, &config)
            .settle(PaymentChannel::Order, 10.0, "Snacks", Prefill::default())
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Rejected("Signature mismatch".to_string()));
    }

    #[tokio::test]
    async fn test_missing_key_is_validation_error() {
        let mut backend = FakeBackend::new(true);
        backend.key_id = None;
        let widget = FakeWidget::paying();
        let config = config();
        let err = PaymentInitiator::new(&backend, &widget, &config)
            .settle(PaymentChannel::Order, 10.0, "Snacks", Prefill::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(widget.seen.borrow().is_none());
    }

    #[test]
    fn test_prefill_from_profile() {
        let profile = Profile {
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            account_type: "customer".to_string(),
            username: None,
            phone: Some("999".to_string()),
        };
        let prefill = Prefill::from(&profile);
        assert_eq!(prefill.contact.as_deref(), Some("999"));
    }
}
