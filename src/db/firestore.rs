// SPDX-License-Identifier: MIT
// Copyright 2026 Aqualog Authors

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile storage)
//! - Drink events (append-only intake log)
//! - Daily summaries (per-user, per-day aggregates)
//!
//! Summary mutations run inside Firestore transactions with the read bound to
//! the transaction's consistency selector, so concurrent writers for the same
//! (user, date) cannot lose increments. Summary documents use the
//! deterministic ID `{user_id}_{date}`, which rules out duplicate aggregates
//! for a day by construction.

use crate::db::collections;
use crate::error::AppError;
use crate::models::user::DEFAULT_DAILY_GOAL_ML;
use crate::models::{DailySummary, DrinkEvent, UserProfile};
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, NaiveDate, Utc};

/// Attempts per transactional summary mutation before surfacing the error.
/// Firestore aborts a commit when a concurrent writer touched the read set.
const TXN_MAX_ATTEMPTS: usize = 5;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // The emulator ignores credentials; a static dummy JWT satisfies the SDK.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user profile by ID (the auth subject).
    pub async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Look up a user profile by email address.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserProfile>, AppError> {
        let email = email.to_string();
        let matches: Vec<UserProfile> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.field("email").eq(email.clone()))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(matches.into_iter().next())
    }

    /// Create or update a user profile.
    pub async fn update_user(&self, user: &UserProfile) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Drink Event Operations ──────────────────────────────────

    /// Append one drink event. Events are immutable once written.
    pub async fn insert_drink(&self, event: &DrinkEvent) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::DRINK_EVENTS)
            .document_id(&event.id)
            .object(event)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Drink events for a user inside `[start, end)`, newest first.
    ///
    /// Timestamps are stored as fixed-width RFC3339 strings, so the range
    /// filter compares lexicographically and matches chronological order.
    pub async fn drinks_in_window(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DrinkEvent>, AppError> {
        let user_id = user_id.to_string();
        let start = format_utc_rfc3339(start);
        let end = format_utc_rfc3339(end);

        self.get_client()?
            .fluent()
            .select()
            .from(collections::DRINK_EVENTS)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("created_at").greater_than_or_equal(start.clone()),
                    q.field("created_at").less_than(end.clone()),
                ])
            })
            .order_by([(
                "created_at",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Most recent drink event for a user, if any.
    pub async fn latest_drink(&self, user_id: &str) -> Result<Option<DrinkEvent>, AppError> {
        let user_id = user_id.to_string();
        let results: Vec<DrinkEvent> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::DRINK_EVENTS)
            .filter(move |q| q.field("user_id").eq(user_id.clone()))
            .order_by([(
                "created_at",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(results.into_iter().next())
    }

    // ─── Daily Summary Operations ────────────────────────────────

    /// Get the aggregate for (user, date), if one exists.
    pub async fn get_daily_summary(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailySummary>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::DAILY_SUMMARIES)
            .obj()
            .one(&DailySummary::doc_id(user_id, date))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fold one drink into the (user, date) aggregate, creating it on first
    /// drink of the day with the user's current profile goal.
    ///
    /// Runs as a read-modify-write inside a Firestore transaction: the read
    /// goes through the transaction's consistency selector, so a concurrent
    /// commit against the same document aborts ours and the loop re-reads
    /// fresh state. Returns the summary as written.
    pub async fn record_drink_in_summary(
        &self,
        user_id: &str,
        date: NaiveDate,
        amount_ml: i32,
    ) -> Result<DailySummary, AppError> {
        let doc_id = DailySummary::doc_id(user_id, date);

        // Goal snapshot for a first-drink creation; fetched fresh per log so
        // a just-updated profile goal is reflected immediately.
        let profile_goal = self
            .get_user(user_id)
            .await?
            .map(|u| u.daily_goal_ml)
            .unwrap_or(DEFAULT_DAILY_GOAL_ML);

        self.mutate_summary_atomic(&doc_id, move |existing| {
            let summary = match existing {
                Some(mut summary) => {
                    summary.register_drink(amount_ml);
                    summary
                }
                None => DailySummary::first_drink(user_id, date, amount_ml, profile_goal),
            };
            Some(summary)
        })
        .await?
        .ok_or_else(|| AppError::Database("Summary mutation produced no document".to_string()))
    }

    /// Overwrite the goal snapshot of an existing (user, date) aggregate and
    /// re-evaluate its achieved flag. Returns `false` when the user has no
    /// aggregate for that date (nothing to update).
    pub async fn update_summary_goal(
        &self,
        user_id: &str,
        date: NaiveDate,
        goal_ml: i32,
    ) -> Result<bool, AppError> {
        let doc_id = DailySummary::doc_id(user_id, date);

        let written = self
            .mutate_summary_atomic(&doc_id, move |existing| {
                existing.map(|mut summary| {
                    summary.apply_goal(goal_ml);
                    summary
                })
            })
            .await?;

        Ok(written.is_some())
    }

    /// Transactional read-modify-write on one summary document.
    ///
    /// `mutate` receives the current document (if any) and returns the
    /// document to write, or `None` to leave the collection untouched.
    /// Commit conflicts are retried with freshly read state, bounded by
    /// [`TXN_MAX_ATTEMPTS`].
    async fn mutate_summary_atomic<F>(
        &self,
        doc_id: &str,
        mutate: F,
    ) -> Result<Option<DailySummary>, AppError>
    where
        F: Fn(Option<DailySummary>) -> Option<DailySummary>,
    {
        let client = self.get_client()?;
        let mut last_err: Option<AppError> = None;

        for attempt in 1..=TXN_MAX_ATTEMPTS {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            // Read through the transaction so the document joins its read set
            // and conflicting commits are detected.
            let txn_reader = client.clone_with_consistency_selector(
                firestore::FirestoreConsistencySelector::Transaction(
                    transaction.transaction_id().clone(),
                ),
            );

            let current: Option<DailySummary> = txn_reader
                .fluent()
                .select()
                .by_id_in(collections::DAILY_SUMMARIES)
                .obj()
                .one(doc_id)
                .await
                .map_err(|e| {
                    AppError::Database(format!("Failed to read summary in transaction: {}", e))
                })?;

            let next = match mutate(current) {
                Some(next) => next,
                None => {
                    // Nothing to write for this state
                    let _ = transaction.rollback().await;
                    return Ok(None);
                }
            };

            client
                .fluent()
                .update()
                .in_col(collections::DAILY_SUMMARIES)
                .document_id(doc_id)
                .object(&next)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!("Failed to add summary to transaction: {}", e))
                })?;

            match transaction.commit().await {
                Ok(_) => {
                    if attempt > 1 {
                        tracing::debug!(doc_id, attempt, "Summary transaction committed after retry");
                    }
                    return Ok(Some(next));
                }
                Err(e) => {
                    tracing::debug!(
                        doc_id,
                        attempt,
                        error = %e,
                        "Summary transaction aborted, retrying with fresh state"
                    );
                    last_err = Some(AppError::Database(format!(
                        "Transaction commit failed: {}",
                        e
                    )));
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            AppError::Database("Summary transaction retries exhausted".to_string())
        }))
    }
}
