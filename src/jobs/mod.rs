//! Scheduled reminder jobs. Both jobs tick every minute and gate on the
//! local wall-clock hour, firing at most once per (day, hour) slot.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Timelike, Utc};
use chrono_tz::Tz;
use tracing::{info, warn};

use crate::error::Result;
use crate::interfaces::repository::HealthRepo;
use crate::interfaces::scheduler::ScheduledJob;
use crate::interfaces::transport::ChatTransport;
use crate::keyboards;
use crate::services::water;

pub const REMINDER_HOURS: [u32; 6] = [10, 12, 14, 16, 18, 20];
pub const EVENING_CHECKIN_HOUR: u32 = 21;

const TICK: Duration = Duration::from_secs(60);

/// From 14:00 on, users already at half their goal are left alone.
pub fn should_remind(hour: u32, today_ml: i64, goal_ml: i32) -> bool {
    if hour < 14 {
        return true;
    }
    today_ml < i64::from(goal_ml) / 2
}

pub fn water_reminder_text(today_ml: i64, goal_ml: i32) -> String {
    format!(
        "💧 Time for some water!\n{}",
        water::progress_bar(today_ml, goal_ml)
    )
}

pub fn evening_checkin_text(missing_mood: bool, missing_sleep: bool, low_water: bool) -> String {
    if !missing_mood && !missing_sleep && !low_water {
        return "🌙 Evening check-in\n\n🌟 Everything logged and on track today. Well done!"
            .to_string();
    }
    let mut lines = vec!["🌙 Evening check-in".to_string(), String::new()];
    if missing_mood {
        lines.push("😊 You haven't logged your mood today.".to_string());
    }
    if missing_sleep {
        lines.push("😴 You haven't logged your sleep today.".to_string());
    }
    if low_water {
        lines.push("💧 You're behind on water today.".to_string());
    }
    lines.join("\n")
}

/// Per-batch fan-out counters, logged once per slot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FanoutSummary {
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Remembers the last (day, hour) a job fired so a 60s tick cadence never
/// double-sends within the same hour.
#[derive(Default)]
struct SlotGate {
    last: Mutex<Option<(String, u32)>>,
}

impl SlotGate {
    /// True exactly once per slot.
    fn fire(&self, day: &str, hour: u32) -> bool {
        let mut guard = self.last.lock().unwrap();
        if guard.as_ref() == Some(&(day.to_string(), hour)) {
            return false;
        }
        *guard = Some((day.to_string(), hour));
        true
    }
}

async fn effective_goal(repo: &dyn HealthRepo, user_id: i64) -> Result<i32> {
    if let Some(goal) = repo.get_water_goal(user_id).await? {
        return Ok(goal);
    }
    let user = repo.get_user(user_id).await?;
    let (gender, weight) = user.map(|u| (u.gender, u.weight)).unwrap_or((None, None));
    Ok(water::calc_default_goal(gender.as_deref(), weight))
}

pub struct HydrationReminderJob {
    repo: Arc<dyn HealthRepo>,
    transport: Arc<dyn ChatTransport>,
    tz: Tz,
    gate: SlotGate,
}

impl HydrationReminderJob {
    pub fn new(repo: Arc<dyn HealthRepo>, transport: Arc<dyn ChatTransport>, tz: Tz) -> Self {
        Self {
            repo,
            transport,
            tz,
            gate: SlotGate::default(),
        }
    }

    pub async fn run_fanout(&self, day: &str, hour: u32) -> Result<FanoutSummary> {
        let mut summary = FanoutSummary::default();
        for user_id in self.repo.all_user_ids().await? {
            let today_ml = self.repo.water_today(user_id, day).await?;
            let goal = effective_goal(self.repo.as_ref(), user_id).await?;
            if !should_remind(hour, today_ml, goal) {
                summary.skipped += 1;
                continue;
            }
            let text = water_reminder_text(today_ml, goal);
            match self
                .transport
                .send_message(user_id, &text, Some(keyboards::water_checkin()))
                .await
            {
                Ok(()) => summary.sent += 1,
                Err(err) => {
                    warn!(user_id, %err, "hydration reminder delivery failed");
                    summary.failed += 1;
                }
            }
        }
        info!(
            hour,
            sent = summary.sent,
            skipped = summary.skipped,
            failed = summary.failed,
            "hydration reminders"
        );
        Ok(summary)
    }
}

#[async_trait]
impl ScheduledJob for HydrationReminderJob {
    fn name(&self) -> &str {
        "hydration_reminder"
    }

    fn interval(&self) -> Duration {
        TICK
    }

    async fn run(&self) -> Result<()> {
        let now = Utc::now().with_timezone(&self.tz);
        let hour = now.hour();
        if !REMINDER_HOURS.contains(&hour) {
            return Ok(());
        }
        let day = now.format("%Y-%m-%d").to_string();
        if !self.gate.fire(&day, hour) {
            return Ok(());
        }
        self.run_fanout(&day, hour).await.map(|_| ())
    }
}

pub struct EveningCheckinJob {
    repo: Arc<dyn HealthRepo>,
    transport: Arc<dyn ChatTransport>,
    tz: Tz,
    gate: SlotGate,
}

impl EveningCheckinJob {
    pub fn new(repo: Arc<dyn HealthRepo>, transport: Arc<dyn ChatTransport>, tz: Tz) -> Self {
        Self {
            repo,
            transport,
            tz,
            gate: SlotGate::default(),
        }
    }

    pub async fn run_fanout(&self, day: &str) -> Result<FanoutSummary> {
        let mut summary = FanoutSummary::default();
        for user_id in self.repo.all_user_ids().await? {
            let moods = self.repo.mood_history(user_id, 1).await?;
            let missing_mood = !moods.iter().any(|m| m.logged_day == day);
            let sleeps = self.repo.sleep_history(user_id, 1).await?;
            let missing_sleep = !sleeps.iter().any(|s| s.sleep_date == day);
            let today_ml = self.repo.water_today(user_id, day).await?;
            let goal = effective_goal(self.repo.as_ref(), user_id).await?;
            let low_water = today_ml * 100 < i64::from(goal) * 80;

            let all_done = !missing_mood && !missing_sleep && !low_water;
            let text = evening_checkin_text(missing_mood, missing_sleep, low_water);
            let keyboard = (!all_done).then(keyboards::evening_checkin);
            match self.transport.send_message(user_id, &text, keyboard).await
            {
                Ok(()) => summary.sent += 1,
                Err(err) => {
                    warn!(user_id, %err, "evening check-in delivery failed");
                    summary.failed += 1;
                }
            }
        }
        info!(
            sent = summary.sent,
            skipped = summary.skipped,
            failed = summary.failed,
            "evening check-ins"
        );
        Ok(summary)
    }
}

#[async_trait]
impl ScheduledJob for EveningCheckinJob {
    fn name(&self) -> &str {
        "evening_checkin"
    }

    fn interval(&self) -> Duration {
        TICK
    }

    async fn run(&self) -> Result<()> {
        let now = Utc::now().with_timezone(&self.tz);
        if now.hour() != EVENING_CHECKIN_HOUR {
            return Ok(());
        }
        let day = now.format("%Y-%m-%d").to_string();
        if !self.gate.fire(&day, EVENING_CHECKIN_HOUR) {
            return Ok(());
        }
        self.run_fanout(&day).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn morning_reminders_always_fire() {
        assert!(should_remind(10, 1900, 2000));
        assert!(should_remind(12, 0, 2000));
    }

    #[test]
    fn afternoon_reminders_respect_half_goal() {
        assert!(!should_remind(14, 1000, 2000));
        assert!(!should_remind(16, 1100, 2000));
        assert!(should_remind(16, 400, 2000));
        assert!(should_remind(20, 999, 2000));
    }

    #[test]
    fn slot_gate_fires_once_per_hour() {
        let gate = SlotGate::default();
        assert!(gate.fire("2026-06-01", 10));
        assert!(!gate.fire("2026-06-01", 10));
        assert!(gate.fire("2026-06-01", 12));
        assert!(gate.fire("2026-06-02", 12));
    }

    #[test]
    fn checkin_text_lists_missing_items() {
        let text = evening_checkin_text(true, false, true);
        assert!(text.contains("mood"));
        assert!(!text.contains("sleep"));
        assert!(text.contains("water"));

        let text = evening_checkin_text(false, false, false);
        assert!(text.contains("Well done"));
    }
}
