// SPDX-License-Identifier: MIT
// Copyright 2026 Aqualog Authors

//! Water intake routes: logging, daily summary, history, reminders.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::drink::MAX_DRINK_AMOUNT_ML;
use crate::models::{DrinkEvent, ReminderLevel};
use crate::time_utils::{day_window_utc, minutes_since, today_utc};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Water routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/water/log-drinking", post(log_drinking))
        .route("/api/water/daily-summary", get(get_daily_summary))
        .route("/api/water/drinking-history", get(get_drinking_history))
        .route("/api/water/last-drinking-time", get(get_last_drinking_time))
}

// ─── Drink Logging ───────────────────────────────────────────

#[derive(Deserialize)]
struct LogDrinkingRequest {
    amount_ml: i32,
    /// Event time (RFC3339). Defaults to server time when absent. Values are
    /// taken as-is; backdated and future entries are the client's business.
    #[serde(default)]
    timestamp: Option<String>,
}

/// Response for drink logging.
#[derive(Serialize)]
pub struct LogDrinkingResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub success: bool,
    pub message: String,
}

fn parse_event_timestamp(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| {
                AppError::BadRequest("Invalid 'timestamp': must be RFC3339 datetime".to_string())
            }),
        None => Ok(Utc::now()),
    }
}

/// Log a drink and fold it into the day's summary.
///
/// The event insert is the commit point: once it succeeds the request
/// succeeds. The summary update runs after and is best-effort; a failure
/// there is logged and the summary catches up on the next drink, while the
/// event log stays the source of truth.
async fn log_drinking(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<LogDrinkingRequest>,
) -> Result<(StatusCode, Json<LogDrinkingResponse>)> {
    if req.amount_ml <= 0 {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(LogDrinkingResponse {
                id: None,
                success: false,
                message: "Amount must be greater than 0".to_string(),
            }),
        ));
    }

    if req.amount_ml > MAX_DRINK_AMOUNT_ML {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(LogDrinkingResponse {
                id: None,
                success: false,
                message: format!("Amount must be at most {}ml", MAX_DRINK_AMOUNT_ML),
            }),
        ));
    }

    let created_at = parse_event_timestamp(req.timestamp.as_deref())?;
    let event = DrinkEvent::new(&user.user_id, req.amount_ml, created_at);

    state.db.insert_drink(&event).await?;

    // The summary belongs to the event's UTC calendar date, not the server's.
    let event_date = created_at.date_naive();

    match state
        .db
        .record_drink_in_summary(&user.user_id, event_date, req.amount_ml)
        .await
    {
        Ok(summary) => {
            tracing::debug!(
                user_id = %user.user_id,
                date = %event_date,
                total_ml = summary.total_consumed_ml,
                drink_count = summary.drink_count,
                "Daily summary updated"
            );
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                user_id = %user.user_id,
                date = %event_date,
                drink_id = %event.id,
                "Failed to update daily summary after drink insert"
            );
        }
    }

    Ok((
        StatusCode::OK,
        Json(LogDrinkingResponse {
            id: Some(event.id),
            success: true,
            message: format!("Successfully logged {}ml", req.amount_ml),
        }),
    ))
}

// ─── Daily Summary ───────────────────────────────────────────

/// Daily summary response.
#[derive(Serialize)]
pub struct DailySummaryResponse {
    pub date: NaiveDate,
    pub total_consumed_ml: i32,
    pub goal_ml: i32,
    pub percentage_achieved: i32,
    pub goal_achieved: bool,
    pub drink_count: i32,
}

/// Get today's consumption summary.
///
/// Falls back to a zero-valued summary against the profile goal when the
/// user has not logged anything today. 404 only when there is no profile
/// to take a goal from.
async fn get_daily_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DailySummaryResponse>> {
    let today = today_utc();

    if let Some(summary) = state.db.get_daily_summary(&user.user_id, today).await? {
        return Ok(Json(DailySummaryResponse {
            date: summary.date,
            total_consumed_ml: summary.total_consumed_ml,
            goal_ml: summary.goal_ml,
            percentage_achieved: summary.percentage_achieved(),
            goal_achieved: summary.goal_achieved,
            drink_count: summary.drink_count,
        }));
    }

    let profile = state
        .db
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(DailySummaryResponse {
        date: today,
        total_consumed_ml: 0,
        goal_ml: profile.daily_goal_ml,
        percentage_achieved: 0,
        goal_achieved: false,
        drink_count: 0,
    }))
}

// ─── Drinking History ────────────────────────────────────────

/// One logged drink in the history response.
#[derive(Serialize)]
pub struct DrinkEntry {
    pub id: String,
    pub amount_ml: i32,
    pub created_at: String,
}

/// Drinking history response.
#[derive(Serialize)]
pub struct DrinkingHistoryResponse {
    pub date: NaiveDate,
    pub total_consumed_ml: i32,
    pub drink_count: i32,
    pub drinks: Vec<DrinkEntry>,
}

/// Get today's drink events, newest first.
///
/// Totals are recomputed from the events themselves rather than read from
/// the summary, so this endpoint stays correct even while the summary is
/// catching up.
async fn get_drinking_history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DrinkingHistoryResponse>> {
    let today = today_utc();
    let (start, end) = day_window_utc(today);

    let events = state.db.drinks_in_window(&user.user_id, start, end).await?;

    let total_consumed_ml = events.iter().map(|e| e.amount_ml).sum();
    let drink_count = events.len() as i32;

    let drinks = events
        .into_iter()
        .map(|e| DrinkEntry {
            id: e.id,
            amount_ml: e.amount_ml,
            created_at: e.created_at,
        })
        .collect();

    Ok(Json(DrinkingHistoryResponse {
        date: today,
        total_consumed_ml,
        drink_count,
        drinks,
    }))
}

// ─── Last Drink / Reminder ───────────────────────────────────

/// Last drinking time and reminder classification response.
#[derive(Serialize)]
pub struct LastDrinkingTimeResponse {
    pub last_drinking_time: Option<String>,
    pub minutes_since_last_drink: i64,
    pub reminder_level: ReminderLevel,
    pub should_send_reminder: bool,
}

/// Get the most recent drink and how urgently a reminder is due.
///
/// A user with no drinks on record gets the strongest nudge.
async fn get_last_drinking_time(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<LastDrinkingTimeResponse>> {
    match state.db.latest_drink(&user.user_id).await? {
        Some(event) => {
            let last = event.created_at_utc().ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "Malformed timestamp on drink {}",
                    event.id
                ))
            })?;

            let minutes = minutes_since(Utc::now(), last);
            let level = ReminderLevel::classify(minutes);

            Ok(Json(LastDrinkingTimeResponse {
                last_drinking_time: Some(event.created_at),
                minutes_since_last_drink: minutes,
                reminder_level: level,
                should_send_reminder: level.should_remind(),
            }))
        }
        None => Ok(Json(LastDrinkingTimeResponse {
            last_drinking_time: None,
            minutes_since_last_drink: 0,
            reminder_level: ReminderLevel::Important,
            should_send_reminder: true,
        })),
    }
}
