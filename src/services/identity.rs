// SPDX-License-Identifier: MIT
// Copyright 2026 Aqualog Authors

//! Identity provider client for password sign-in.
//!
//! Exchanges email/password credentials for an access token against a
//! GoTrue-style auth endpoint (`POST {base}/token?grant_type=password`).
//! Bad credentials map to `Unauthorized`; provider outages map to
//! `AuthProvider` so callers can surface a 502 instead of blaming the user.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Identity provider API client.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Successful password grant response.
#[derive(Debug, Clone)]
pub struct SignInSession {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Wire shape of the provider's token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Lifetime in seconds; used when the provider omits `expires_at`.
    expires_in: i64,
    /// Absolute expiry as a Unix timestamp (newer providers send both).
    expires_at: Option<i64>,
}

impl IdentityClient {
    /// Create a new identity client for the given provider base URL.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Sign in with email and password, returning the provider's session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignInSession, AppError> {
        let url = format!("{}/token", self.base_url);

        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .http
            .post(&url)
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::AuthProvider(format!("Sign-in request failed: {}", e)))?;

        let status = response.status();

        if status.is_success() {
            let token: TokenResponse = response
                .json()
                .await
                .map_err(|e| AppError::AuthProvider(format!("JSON parse error: {}", e)))?;

            let expires_at = token
                .expires_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0))
                .unwrap_or_else(|| Utc::now() + chrono::Duration::seconds(token.expires_in));

            return Ok(SignInSession {
                access_token: token.access_token,
                expires_at,
            });
        }

        // The provider answers 400/401/403 for wrong credentials, unknown
        // accounts, and unconfirmed emails alike. All mean "not you".
        if matches!(status.as_u16(), 400 | 401 | 403) {
            return Err(AppError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = %status, body = %body, "Identity provider sign-in failed");
        Err(AppError::AuthProvider(format!(
            "Sign-in failed with status {}",
            status
        )))
    }
}
