// SPDX-License-Identifier: MIT
// Copyright 2026 Aqualog Authors

//! Reminder urgency classification from elapsed time since the last drink.

use serde::{Deserialize, Serialize};

/// Minutes without a drink before a normal reminder is due.
pub const NORMAL_REMINDER_AFTER_MINUTES: i64 = 180;
/// Minutes without a drink before the reminder becomes important.
pub const IMPORTANT_REMINDER_AFTER_MINUTES: i64 = 300;

/// Urgency of a hydration reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderLevel {
    None,
    Normal,
    Important,
}

impl ReminderLevel {
    /// Classify elapsed minutes since the last drink.
    ///
    /// Pure in its input; callers clamp negative elapsed time to zero before
    /// classifying. Users who never logged a drink are reported at the most
    /// urgent level by the handler, not here.
    pub fn classify(minutes_since_last_drink: i64) -> Self {
        if minutes_since_last_drink >= IMPORTANT_REMINDER_AFTER_MINUTES {
            ReminderLevel::Important
        } else if minutes_since_last_drink >= NORMAL_REMINDER_AFTER_MINUTES {
            ReminderLevel::Normal
        } else {
            ReminderLevel::None
        }
    }

    /// Whether any reminder should be surfaced to the user.
    pub fn should_remind(self) -> bool {
        !matches!(self, ReminderLevel::None)
    }
}
