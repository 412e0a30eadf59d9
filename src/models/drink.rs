// SPDX-License-Identifier: MIT
// Copyright 2026 Aqualog Authors

//! Immutable drink event records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time_utils::format_utc_rfc3339;

/// Largest single drink the API accepts, milliliters (10 L).
pub const MAX_DRINK_AMOUNT_ML: i32 = 10_000;

/// One logged intake event (append-only; events are the source of truth,
/// daily summaries are derived from them).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinkEvent {
    /// Event ID (UUID v4; also used as document ID)
    pub id: String,
    /// Owning user ID (auth subject)
    pub user_id: String,
    /// Amount drunk in milliliters (1..=[`MAX_DRINK_AMOUNT_ML`], validated
    /// at the API edge)
    pub amount_ml: i32,
    /// When the drink happened (RFC3339 UTC, whole seconds)
    pub created_at: String,
}

impl DrinkEvent {
    /// Build a new event with a generated ID and normalized timestamp.
    pub fn new(user_id: &str, amount_ml: i32, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            amount_ml,
            created_at: format_utc_rfc3339(at),
        }
    }

    /// Parse the stored timestamp back into a UTC datetime.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
