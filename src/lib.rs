// SPDX-License-Identifier: MIT
// Copyright 2026 Aqualog Authors

//! Aqualog: hydration tracking backend
//!
//! This crate provides the backend API for logging water intake, keeping
//! per-day consumption summaries, and deciding when a drink reminder is due.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::IdentityClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub identity: IdentityClient,
}
