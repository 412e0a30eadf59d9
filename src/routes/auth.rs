// SPDX-License-Identifier: MIT
// Copyright 2026 Aqualog Authors

//! Token issuance route.
//!
//! Delegates the credential check to the hosted identity provider and hands
//! the resulting access token back to the client. The protected routes then
//! verify that token's signature locally with the shared signing secret.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth/getJWT", get(get_jwt))
}

/// Query parameters for token issuance.
#[derive(Deserialize, Validate)]
pub struct GetJwtParams {
    #[validate(email)]
    email: String,
    password: String,
}

/// Token issuance response.
#[derive(Serialize)]
pub struct GetJwtResponse {
    pub token: String,
    pub expires_at: String,
}

/// Issue an access token for email/password credentials.
///
/// The account must already exist in the profile store; unknown emails get a
/// 404 before any provider round-trip. Wrong passwords surface as 401 from
/// the provider check.
async fn get_jwt(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GetJwtParams>,
) -> Result<Json<GetJwtResponse>> {
    params.validate()?;

    let profile = state
        .db
        .get_user_by_email(&params.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let session = state
        .identity
        .sign_in(&params.email, &params.password)
        .await?;

    tracing::info!(user_id = %profile.id, "Issued access token via password grant");

    Ok(Json(GetJwtResponse {
        token: session.access_token,
        expires_at: format_utc_rfc3339(session.expires_at),
    }))
}
