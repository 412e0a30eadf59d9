//! User profile model and partial-update merge.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Daily goal assigned to profiles that never configured one.
pub const DEFAULT_DAILY_GOAL_ML: i32 = 2000;

fn default_daily_goal() -> i32 {
    DEFAULT_DAILY_GOAL_ML
}

fn default_role() -> String {
    "User".to_string()
}

fn default_notifications_enabled() -> bool {
    true
}

/// User profile stored in Firestore.
///
/// The document ID equals `id`, which in turn equals the `sub` claim of the
/// access tokens the identity provider issues for this user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque user ID (auth subject; also used as document ID)
    pub id: String,
    /// Email address (may be None if not shared)
    #[serde(default)]
    pub email: Option<String>,
    /// Display name
    #[serde(default)]
    pub username: Option<String>,
    /// Coarse role label; stored but not interpreted by this service
    #[serde(default = "default_role")]
    pub role: String,
    /// Daily hydration goal in milliliters
    #[serde(default = "default_daily_goal")]
    pub daily_goal_ml: i32,
    /// Whether hydration reminders are enabled
    #[serde(default = "default_notifications_enabled")]
    pub notifications_enabled: bool,
    /// Body weight in kilograms
    #[serde(default)]
    pub weight_kg: Option<i32>,
    /// Body height in centimeters
    #[serde(default)]
    pub height_cm: Option<i32>,
}

/// Partial profile update; unset fields leave the profile untouched.
///
/// The merge is an explicit field-by-field mapping rather than any kind of
/// name-based copying, so the set of updatable fields is closed and each
/// mapping is visible here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub username: Option<String>,
    #[validate(range(min = 1))]
    pub daily_goal_ml: Option<i32>,
    pub notifications_enabled: Option<bool>,
    #[validate(range(min = 1, max = 500))]
    pub weight_kg: Option<i32>,
    #[validate(range(min = 1, max = 500))]
    pub height_cm: Option<i32>,
}

impl ProfileUpdate {
    /// Merge the set fields onto `profile`.
    ///
    /// Returns `true` if the daily goal changed as a result; assigning the
    /// value the profile already holds does not count as a change, so callers
    /// can use the flag to decide whether today's aggregate needs its goal
    /// snapshot refreshed.
    pub fn apply_to(&self, profile: &mut UserProfile) -> bool {
        if let Some(email) = &self.email {
            profile.email = Some(email.clone());
        }
        if let Some(username) = &self.username {
            profile.username = Some(username.clone());
        }
        if let Some(enabled) = self.notifications_enabled {
            profile.notifications_enabled = enabled;
        }
        if let Some(weight) = self.weight_kg {
            profile.weight_kg = Some(weight);
        }
        if let Some(height) = self.height_cm {
            profile.height_cm = Some(height);
        }

        let mut goal_changed = false;
        if let Some(goal) = self.daily_goal_ml {
            goal_changed = profile.daily_goal_ml != goal;
            profile.daily_goal_ml = goal;
        }
        goal_changed
    }
}
