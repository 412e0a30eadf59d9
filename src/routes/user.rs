// SPDX-License-Identifier: MIT
// Copyright 2026 Aqualog Authors

//! Profile routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::ProfileUpdate;
use crate::time_utils::today_utc;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

/// Profile routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/user/information", get(get_information))
        .route("/api/user/profile/update", patch(update_profile))
}

/// Current user profile response.
#[derive(Serialize)]
pub struct UserInformationResponse {
    pub id: String,
    pub email: Option<String>,
    pub username: Option<String>,
    pub daily_goal_ml: i32,
    pub notifications_enabled: bool,
    pub weight_kg: Option<i32>,
    pub height_cm: Option<i32>,
}

/// Get current user profile.
async fn get_information(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserInformationResponse>> {
    let profile = state
        .db
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(UserInformationResponse {
        id: profile.id,
        email: profile.email,
        username: profile.username,
        daily_goal_ml: profile.daily_goal_ml,
        notifications_enabled: profile.notifications_enabled,
        weight_kg: profile.weight_kg,
        height_cm: profile.height_cm,
    }))
}

/// Update the current user's profile.
///
/// Accepts any subset of the editable fields; absent fields are left alone.
/// When the daily goal changes, today's summary (if one exists) gets the new
/// goal and a recomputed achieved flag, so the dashboard stays consistent
/// without waiting for the next drink.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(update): Json<ProfileUpdate>,
) -> Result<StatusCode> {
    update.validate()?;

    let mut profile = state
        .db
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    let goal_changed = update.apply_to(&mut profile);
    let new_goal = profile.daily_goal_ml;

    state.db.update_user(&profile).await?;

    if goal_changed {
        let updated = state
            .db
            .update_summary_goal(&user.user_id, today_utc(), new_goal)
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            new_goal,
            summary_updated = updated,
            "Daily goal changed"
        );
    }

    Ok(StatusCode::OK)
}
