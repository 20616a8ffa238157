//! Build-time Configuration
//!
//! Public client settings baked in at compile time through environment
//! variables. Nothing here is secret.

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_CURRENCY: &str = "INR";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend origin, no trailing slash
    pub api_base_url: String,
    /// Public checkout key; the backend's order may override it
    pub razorpay_key_id: Option<String>,
    pub google_client_id: Option<String>,
    pub currency: String,
    pub merchant_name: String,
}

impl AppConfig {
    pub fn load() -> Self {
        Self::from_values(
            option_env!("QUICKCART_API_URL"),
            option_env!("QUICKCART_RAZORPAY_KEY"),
            option_env!("QUICKCART_GOOGLE_CLIENT_ID"),
        )
    }

    pub fn from_values(api_url: Option<&str>, razorpay_key: Option<&str>, google_client_id: Option<&str>) -> Self {
        let api_base_url = match non_empty(api_url) {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => {
                log::info!("[CONFIG] QUICKCART_API_URL not set, using default: {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            }
        };
        let razorpay_key_id = non_empty(razorpay_key).map(str::to_string);
        if razorpay_key_id.is_none() {
            log::warn!("[CONFIG] QUICKCART_RAZORPAY_KEY not set, relying on key from backend orders");
        }
        Self {
            api_base_url,
            razorpay_key_id,
            google_client_id: non_empty(google_client_id).map(str::to_string),
            currency: DEFAULT_CURRENCY.to_string(),
            merchant_name: "QuickCart".to_string(),
        }
    }

    /// Absolute URL for an `/api/...` path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
