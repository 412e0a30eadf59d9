// SPDX-License-Identifier: MIT
// Copyright 2026 Aqualog Authors

use aqualog::config::Config;
use aqualog::db::FirestoreDb;
use aqualog::routes::create_router;
use aqualog::services::IdentityClient;
use aqualog::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("Skipping test: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection against the emulator.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test JWT for the given user, signed like the identity provider
/// would sign it.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    aqualog::middleware::auth::create_jwt(user_id, signing_key).expect("Failed to create JWT")
}

#[allow(dead_code)]
fn app_with(db: FirestoreDb) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let identity = IdentityClient::new(config.auth_base_url.clone(), config.auth_api_key.clone());
    let state = Arc::new(AppState {
        config,
        db,
        identity,
    });
    (create_router(state.clone()), state)
}

/// Test app with offline mock dependencies; returns the router and state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    app_with(test_db_offline())
}

/// Test app backed by the Firestore emulator.
#[allow(dead_code)]
pub async fn create_emulator_app() -> (axum::Router, Arc<AppState>) {
    app_with(test_db().await)
}
