use async_trait::async_trait;

use crate::domains::{HeadacheEntry, MoodEntry, ProfileUpdate, SleepEntry, UserRecord, WaterEntry};
use crate::error::Result;

/// Typed persistence operations over the five health-tracking tables.
///
/// Two interchangeable backends implement this: the embedded SQLite store
/// and the networked Postgres store. The backend is picked once at startup;
/// callers never branch on it.
#[async_trait]
pub trait HealthRepo: Send + Sync {
    /// Insert-or-refresh the identity columns; never touches profile fields.
    async fn upsert_user(&self, user_id: i64, username: &str, full_name: &str) -> Result<()>;
    async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>>;
    /// Writes demographics and all derived targets in one statement.
    async fn update_profile(&self, user_id: i64, profile: &ProfileUpdate) -> Result<()>;
    async fn has_profile(&self, user_id: i64) -> Result<bool>;

    async fn set_water_goal(&self, user_id: i64, goal_ml: i32) -> Result<()>;
    async fn get_water_goal(&self, user_id: i64) -> Result<Option<i32>>;
    async fn log_water(&self, user_id: i64, amount_ml: i32, day: &str, ts: i64) -> Result<()>;
    async fn water_today(&self, user_id: i64, day: &str) -> Result<i64>;
    /// Per-day totals within [first, last], only days with entries present.
    async fn water_week(&self, user_id: i64, first: &str, last: &str)
        -> Result<Vec<(String, i64)>>;

    async fn log_mood(
        &self,
        user_id: i64,
        emoji: &str,
        note: Option<&str>,
        day: &str,
        ts: i64,
    ) -> Result<()>;
    async fn mood_history(&self, user_id: i64, limit: i64) -> Result<Vec<MoodEntry>>;

    /// One entry per (user, date); a duplicate date is silently ignored.
    async fn log_sleep(
        &self,
        user_id: i64,
        sleep_date: &str,
        hours: f64,
        quality: Option<i32>,
        ts: i64,
    ) -> Result<()>;
    async fn sleep_history(&self, user_id: i64, limit: i64) -> Result<Vec<SleepEntry>>;

    #[allow(clippy::too_many_arguments)]
    async fn log_headache(
        &self,
        user_id: i64,
        intensity: i32,
        location: Option<&str>,
        triggers: Option<&str>,
        duration_min: Option<i32>,
        day: &str,
        ts: i64,
    ) -> Result<()>;
    async fn headache_history(&self, user_id: i64, limit: i64) -> Result<Vec<HeadacheEntry>>;
    async fn headache_count_today(&self, user_id: i64, day: &str) -> Result<i64>;

    // Full per-user dumps for CSV export, oldest first.
    async fn all_water(&self, user_id: i64) -> Result<Vec<WaterEntry>>;
    async fn all_mood(&self, user_id: i64) -> Result<Vec<MoodEntry>>;
    async fn all_sleep(&self, user_id: i64) -> Result<Vec<SleepEntry>>;
    async fn all_headache(&self, user_id: i64) -> Result<Vec<HeadacheEntry>>;

    /// Everyone the reminder jobs fan out to.
    async fn all_user_ids(&self) -> Result<Vec<i64>>;
}
