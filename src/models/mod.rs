// SPDX-License-Identifier: MIT
// Copyright 2026 Aqualog Authors

//! Data models for the application.

pub mod drink;
pub mod reminder;
pub mod summary;
pub mod user;

pub use drink::DrinkEvent;
pub use reminder::ReminderLevel;
pub use summary::DailySummary;
pub use user::{ProfileUpdate, UserProfile};
