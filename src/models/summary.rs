//! Per-user, per-day hydration aggregates.
//!
//! A summary is a write-time denormalized cache of the day's drink events,
//! maintained incrementally so the summary endpoint costs one document read
//! instead of a query over events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily hydration summary stored in Firestore.
///
/// Kept under the deterministic document ID [`DailySummary::doc_id`], which
/// makes "at most one summary per (user, date)" a structural property of the
/// collection rather than something the write path has to check first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    /// Owning user ID (auth subject)
    pub user_id: String,
    /// Calendar date this row aggregates (UTC)
    pub date: NaiveDate,
    /// Running total of all drinks this day, milliliters
    pub total_consumed_ml: i32,
    /// Goal snapshot taken when the row was created or last re-goaled
    pub goal_ml: i32,
    /// `total_consumed_ml >= goal_ml`
    pub goal_achieved: bool,
    /// Number of drink events folded into the total
    pub drink_count: i32,
}

impl DailySummary {
    /// Deterministic document ID `{user_id}_{date}`.
    pub fn doc_id(user_id: &str, date: NaiveDate) -> String {
        format!("{}_{}", user_id, date)
    }

    /// Fresh aggregate seeded with the first drink of the day.
    pub fn first_drink(user_id: &str, date: NaiveDate, amount_ml: i32, goal_ml: i32) -> Self {
        Self {
            user_id: user_id.to_string(),
            date,
            total_consumed_ml: amount_ml,
            goal_ml,
            goal_achieved: amount_ml >= goal_ml,
            drink_count: 1,
        }
    }

    /// Fold one more drink into the running total. The total saturates at
    /// `i32::MAX` instead of wrapping.
    pub fn register_drink(&mut self, amount_ml: i32) {
        self.total_consumed_ml = self.total_consumed_ml.saturating_add(amount_ml);
        self.drink_count += 1;
        self.goal_achieved = self.total_consumed_ml >= self.goal_ml;
    }

    /// Replace the goal snapshot and re-evaluate the achieved flag against
    /// the unchanged total.
    pub fn apply_goal(&mut self, goal_ml: i32) {
        self.goal_ml = goal_ml;
        self.goal_achieved = self.total_consumed_ml >= self.goal_ml;
    }

    /// Percent of the goal consumed so far, floored.
    pub fn percentage_achieved(&self) -> i32 {
        percentage(self.total_consumed_ml, self.goal_ml)
    }
}

/// `floor(total / goal * 100)` via integer math, clamped to `0..=i32::MAX`;
/// 0 when the goal is unset.
pub fn percentage(total_ml: i32, goal_ml: i32) -> i32 {
    if goal_ml <= 0 {
        0
    } else {
        ((total_ml as i64 * 100) / goal_ml as i64).clamp(0, i32::MAX as i64) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn test_doc_id_is_per_user_and_date() {
        assert_eq!(
            DailySummary::doc_id("user-1", date()),
            "user-1_2026-03-14"
        );
        assert_ne!(
            DailySummary::doc_id("user-1", date()),
            DailySummary::doc_id("user-2", date())
        );
    }

    #[test]
    fn test_sequence_of_drinks_accumulates() {
        let amounts = [500, 600, 250, 400];
        let mut summary = DailySummary::first_drink("user-1", date(), amounts[0], 2000);
        for &amount in &amounts[1..] {
            summary.register_drink(amount);
        }

        assert_eq!(summary.total_consumed_ml, 1750);
        assert_eq!(summary.drink_count, 4);
        assert!(!summary.goal_achieved);

        summary.register_drink(250);
        assert_eq!(summary.total_consumed_ml, 2000);
        assert!(summary.goal_achieved, "achieved should flip at total == goal");
    }

    #[test]
    fn test_first_drink_can_achieve_goal_outright() {
        let summary = DailySummary::first_drink("user-1", date(), 500, 500);
        assert!(summary.goal_achieved);
        assert_eq!(summary.drink_count, 1);
    }

    #[test]
    fn test_two_drinks_scenario() {
        // New user with the default 2000ml goal logs 500ml then 600ml
        let mut summary = DailySummary::first_drink("user-1", date(), 500, 2000);
        summary.register_drink(600);

        assert_eq!(summary.total_consumed_ml, 1100);
        assert_eq!(summary.drink_count, 2);
        assert!(!summary.goal_achieved);
        assert_eq!(summary.percentage_achieved(), 55);
    }

    #[test]
    fn test_goal_change_preserves_total_and_count() {
        // 2000/2000 achieved, then the user raises the bar to 2500
        let mut summary = DailySummary::first_drink("user-1", date(), 2000, 2000);
        assert!(summary.goal_achieved);

        summary.apply_goal(2500);

        assert_eq!(summary.total_consumed_ml, 2000);
        assert_eq!(summary.drink_count, 1);
        assert_eq!(summary.goal_ml, 2500);
        assert!(!summary.goal_achieved);
    }

    #[test]
    fn test_goal_change_can_grant_achievement() {
        let mut summary = DailySummary::first_drink("user-1", date(), 1500, 2000);
        assert!(!summary.goal_achieved);

        summary.apply_goal(1200);
        assert!(summary.goal_achieved);
    }

    #[test]
    fn test_register_drink_saturates_at_i32_max() {
        let mut summary = DailySummary::first_drink("user-1", date(), i32::MAX - 50, 2000);
        summary.register_drink(10_000);

        assert_eq!(summary.total_consumed_ml, i32::MAX);
        assert_eq!(summary.drink_count, 2);
        assert!(summary.goal_achieved);
    }

    #[test]
    fn test_percentage_floors() {
        assert_eq!(percentage(1100, 2000), 55);
        assert_eq!(percentage(999, 1000), 99);
        assert_eq!(percentage(1, 3000), 0);
        assert_eq!(percentage(2500, 2000), 125);
    }

    #[test]
    fn test_percentage_zero_goal() {
        assert_eq!(percentage(1500, 0), 0);
    }

    #[test]
    fn test_percentage_clamps_extreme_ratios() {
        // A saturated total against a 1ml goal would overflow a bare cast
        assert_eq!(percentage(i32::MAX, 1), i32::MAX);
        assert_eq!(percentage(-500, 2000), 0);
    }
}
