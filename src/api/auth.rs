//! Auth Endpoints
//!
//! Session issuance. The caller caches the returned session.

use serde::Serialize;

use super::ApiClient;
use crate::error::AppResult;
use crate::models::AuthSession;

// ========================
// Request Bodies
// ========================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Account type, e.g. "customer" or "shopkeeper"
    #[serde(rename = "type")]
    pub account_type: String,
}

#[derive(Serialize)]
struct GoogleLoginRequest<'a> {
    credential: &'a str,
}

// ========================
// Endpoints
// ========================

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> AppResult<AuthSession> {
        log::info!("[AUTH] login {}", request.email);
        self.post_json("/api/auth/login", request).await
    }

    pub async fn signup(&self, request: &SignupRequest) -> AppResult<AuthSession> {
        log::info!("[AUTH] signup {}", request.email);
        self.post_json("/api/auth/signup", request).await
    }

    /// `credential` is the ID token from Google Identity Services
    pub async fn google_login(&self, credential: &str) -> AppResult<AuthSession> {
        self.post_json("/api/auth/google-login", &GoogleLoginRequest { credential })
            .await
    }
}
