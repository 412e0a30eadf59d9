// SPDX-License-Identifier: MIT
// Copyright 2026 Aqualog Authors

//! Aqualog API Server
//!
//! Tracks water intake: drink logging, daily consumption summaries against a
//! personal goal, and reminder classification based on time since the last
//! drink.

use aqualog::{config::Config, db::FirestoreDb, services::IdentityClient, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env().expect("Failed to load configuration");

    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");
    let identity = IdentityClient::new(config.auth_base_url.clone(), config.auth_api_key.clone());

    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState {
        config,
        db,
        identity,
    });
    let app = aqualog::routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Aqualog API listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Structured JSON logging with flattened event fields, the shape Cloud
/// Logging ingests directly.
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("aqualog=debug".parse().unwrap())
        .add_directive("info".parse().unwrap());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(false)
                .with_current_span(true)
                .flatten_event(true),
        )
        .init();
}
