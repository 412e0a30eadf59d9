//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const DRINK_EVENTS: &str = "drink_events";
    /// Daily aggregates, keyed by `{user_id}_{date}`
    pub const DAILY_SUMMARIES: &str = "daily_summaries";
}
