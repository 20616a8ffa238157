//! Backend API Client
//!
//! Frontend bindings to the REST backend, organized by domain. Every
//! response body is parsed into an explicit schema at this boundary.

mod auth;
mod cart;
mod directory;
mod history;
mod payment;
mod wallet;

use leptos::prelude::*;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::storage::{bearer_token, SharedStorage};

pub use auth::{LoginRequest, SignupRequest};
pub use cart::CartSessionApi;
pub use directory::catalog;

/// Characters left as-is in a single path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: AppConfig,
    storage: SharedStorage,
}

impl ApiClient {
    pub fn new(config: AppConfig, storage: SharedStorage) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            storage,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match bearer_token(self.storage.as_ref()) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> AppResult<String> {
        let response = self.authorize(request).send().await.map_err(|e| {
            log::error!("[API] {} failed: {}", endpoint, e);
            AppError::from(e)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        if (200..300).contains(&status) {
            log::debug!("[API] {} -> {}", endpoint, status);
            Ok(body)
        } else {
            log::warn!("[API] {} -> {}", endpoint, status);
            Err(AppError::from_status(status, endpoint, &body))
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let request = self.http.get(self.config.endpoint(path));
        let body = self.send(path, request).await?;
        decode(path, &body)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, payload: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.config.endpoint(path)).json(payload);
        let body = self.send(path, request).await?;
        decode(path, &body)
    }

    /// POST where only the status matters
    pub(crate) async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, payload: &B) -> AppResult<()> {
        let request = self.http.post(self.config.endpoint(path)).json(payload);
        self.send(path, request).await.map(|_| ())
    }
}

/// Client from the context config and storage, as a `Copy` handle
/// for closures
pub fn use_api() -> StoredValue<ApiClient> {
    StoredValue::new(ApiClient::new(expect_context::<AppConfig>(), expect_context::<SharedStorage>()))
}

/// Parse a 2xx body into its schema
pub(crate) fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> AppResult<T> {
    serde_json::from_str(body).map_err(|e| {
        log::warn!("[API] {} schema mismatch: {}", endpoint, e);
        AppError::schema(endpoint, e)
    })
}

pub(crate) fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SharedCartSession;

    #[test]
    fn test_decode_valid_session() {
        let session: SharedCartSession = decode(
            "/api/cart/AB12",
            r#"{"code":"AB12","items":[{"itemId":"A","name":"Rice","price":100,"quantity":2}]}"#,
        )
        .unwrap();
        assert_eq!(session.items.len(), 1);
        assert_eq!(session.items[0].price, 100.0);
    }

    #[test]
    fn test_decode_mismatch_names_endpoint() {
        let err = decode::<SharedCartSession>("/api/cart/AB12", r#"{"items":"nope"}"#).unwrap_err();
        match err {
            AppError::SchemaMismatch { endpoint, .. } => assert_eq!(endpoint, "/api/cart/AB12"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("AB-12_x"), "AB-12_x");
        assert_eq!(encode_segment("a/b c"), "a%2Fb%20c");
    }
}
