//! Inbound event routing: commands, free text, and callback tokens all land
//! here and fan out to the wizard modules.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, error};

use crate::dialogs::{DialogState, DialogStore};
use crate::error::Result;
use crate::interfaces::repository::HealthRepo;
use crate::interfaces::transport::{ChatTransport, Keyboard};
use crate::keyboards;
use crate::services::{stats, water};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command { name: String },
    Text(String),
    Callback { message_id: i64, action: String },
}

#[derive(Debug, Clone)]
pub struct Inbound {
    pub user_id: i64,
    pub username: String,
    pub full_name: String,
    pub event: Event,
}

pub struct Bot {
    pub(crate) repo: Arc<dyn HealthRepo>,
    pub(crate) transport: Arc<dyn ChatTransport>,
    pub(crate) dialogs: DialogStore,
    pub(crate) tz: Tz,
}

impl Bot {
    pub fn new(repo: Arc<dyn HealthRepo>, transport: Arc<dyn ChatTransport>, tz: Tz) -> Self {
        Self {
            repo,
            transport,
            dialogs: DialogStore::new(),
            tz,
        }
    }

    pub(crate) fn today(&self) -> String {
        self.local_date().format("%Y-%m-%d").to_string()
    }

    pub(crate) fn local_date(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }

    pub(crate) fn now_ts(&self) -> i64 {
        Utc::now().timestamp()
    }

    pub(crate) async fn send(
        &self,
        user_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<()> {
        self.transport.send_message(user_id, text, keyboard).await
    }

    /// Current water goal: explicit override wins, otherwise derived from
    /// the profile (or the flat default when there is no profile yet).
    pub(crate) async fn effective_water_goal(&self, user_id: i64) -> Result<i32> {
        if let Some(goal) = self.repo.get_water_goal(user_id).await? {
            return Ok(goal);
        }
        let user = self.repo.get_user(user_id).await?;
        let (gender, weight) = user
            .map(|u| (u.gender, u.weight))
            .unwrap_or((None, None));
        Ok(water::calc_default_goal(gender.as_deref(), weight))
    }

    /// Top-level entry point. Every failure is logged and turned into a
    /// generic apology so one bad update never kills the loop.
    pub async fn dispatch(&self, inbound: Inbound) {
        let user_id = inbound.user_id;
        if let Err(err) = self.handle(inbound).await {
            error!(user_id, %err, "update handling failed");
            let _ = self
                .send(user_id, "Something went wrong. Please try again.", None)
                .await;
        }
    }

    async fn handle(&self, inbound: Inbound) -> Result<()> {
        self.repo
            .upsert_user(inbound.user_id, &inbound.username, &inbound.full_name)
            .await?;
        debug!(user_id = inbound.user_id, event = ?inbound.event, "inbound");
        match inbound.event {
            Event::Command { name } => self.handle_command(inbound.user_id, &name).await,
            Event::Text(text) => self.handle_text(inbound.user_id, &text).await,
            Event::Callback { message_id, action } => {
                self.handle_callback(inbound.user_id, message_id, &action).await
            }
        }
    }

    async fn handle_command(&self, user_id: i64, name: &str) -> Result<()> {
        // Any command interrupts an in-flight wizard except /cancel, which
        // reports on it.
        if name != "cancel" {
            self.dialogs.clear(user_id);
        }
        match name {
            "start" => self.cmd_start(user_id).await,
            "help" => self.send(user_id, HELP_TEXT, None).await,
            "profile" => self.cmd_profile(user_id).await,
            "water" => self.show_water_status(user_id).await,
            "mood" => self.show_mood_prompt(user_id).await,
            "sleep" => self.start_sleep_wizard(user_id).await,
            "headache" => self.show_headache_status(user_id).await,
            "today" => self.cmd_today(user_id).await,
            "week" => self.cmd_week(user_id).await,
            "export" => self.cmd_export(user_id).await,
            "cancel" => self.cmd_cancel(user_id).await,
            _ => {
                self.send(user_id, "Unknown command. Try /help.", None).await
            }
        }
    }

    async fn handle_text(&self, user_id: i64, text: &str) -> Result<()> {
        match self.dialogs.snapshot(user_id) {
            Some(DialogState::Profile { step, draft }) => {
                self.profile_on_text(user_id, step, draft, text).await
            }
            Some(DialogState::Headache { step, draft }) => {
                self.headache_on_text(user_id, step, draft, text).await
            }
            Some(DialogState::Sleep { step, draft }) => {
                self.sleep_on_text(user_id, step, draft, text).await
            }
            Some(DialogState::WaterAmount) => self.water_amount_text(user_id, text).await,
            Some(DialogState::WaterGoal) => self.water_goal_text(user_id, text).await,
            Some(DialogState::MoodNote { emoji }) => {
                self.mood_note_text(user_id, &emoji, text).await
            }
            None => {
                self.send(user_id, "I did not catch that. Try /help.", None)
                    .await
            }
        }
    }

    async fn handle_callback(&self, user_id: i64, message_id: i64, action: &str) -> Result<()> {
        if action == "cancel" {
            self.dialogs.clear(user_id);
            return self
                .transport
                .edit_message(user_id, message_id, "Cancelled.", None)
                .await;
        }

        if let Some(rest) = action.strip_prefix("gender:") {
            return self.profile_gender_chosen(user_id, rest).await;
        }
        if let Some(rest) = action.strip_prefix("activity:") {
            return self.profile_activity_chosen(user_id, rest).await;
        }
        if let Some(rest) = action.strip_prefix("goal:") {
            return self.profile_goal_chosen(user_id, rest).await;
        }
        if action == "profile_setup_start" {
            return self.start_profile_wizard(user_id).await;
        }

        if let Some(rest) = action.strip_prefix("water_add:") {
            let amount: i32 = rest.parse().unwrap_or(0);
            return self.water_add(user_id, amount).await;
        }
        if action == "water_custom" {
            return self.prompt_water_custom(user_id).await;
        }
        if action == "water_set_goal" {
            return self.prompt_water_goal(user_id).await;
        }

        if let Some(rest) = action.strip_prefix("mood_pick:") {
            return self.mood_pick(user_id, rest).await;
        }
        if action == "skip" {
            return self.mood_skip_note(user_id).await;
        }
        if action == "mood_history" {
            return self.show_mood_history(user_id).await;
        }

        if let Some(rest) = action.strip_prefix("sleep_hours:") {
            return self.sleep_hours_chosen(user_id, rest).await;
        }
        if action == "sleep_custom" {
            return self.prompt_sleep_custom(user_id).await;
        }
        if let Some(rest) = action.strip_prefix("sleep_quality:") {
            let quality: i32 = rest.parse().unwrap_or(0);
            return self.sleep_quality_chosen(user_id, quality).await;
        }

        if action == "hd_start" {
            return self.start_headache_wizard(user_id).await;
        }
        if let Some(rest) = action.strip_prefix("hd_intensity:") {
            let intensity: i32 = rest.parse().unwrap_or(0);
            return self.headache_intensity_chosen(user_id, intensity).await;
        }
        if let Some(rest) = action.strip_prefix("hd_location:") {
            return self.headache_location_chosen(user_id, rest).await;
        }
        if let Some(rest) = action.strip_prefix("hd_trigger:") {
            return self
                .headache_trigger_toggled(user_id, message_id, rest)
                .await;
        }
        if action == "hd_triggers_done" || action == "hd_triggers_skip" {
            let skip = action == "hd_triggers_skip";
            return self.headache_triggers_done(user_id, skip).await;
        }
        if let Some(rest) = action.strip_prefix("hd_duration:") {
            let minutes: i32 = rest.parse().unwrap_or(0);
            return self.headache_duration_chosen(user_id, minutes).await;
        }
        if action == "hd_duration_custom" {
            return self.prompt_headache_duration_custom(user_id).await;
        }

        match action {
            "mood_checkin" => self.show_mood_prompt(user_id).await,
            "sleep_checkin" => self.start_sleep_wizard(user_id).await,
            "water_checkin" => self.show_water_status(user_id).await,
            _ => {
                debug!(user_id, action, "unknown callback");
                Ok(())
            }
        }
    }

    async fn cmd_start(&self, user_id: i64) -> Result<()> {
        if self.repo.has_profile(user_id).await? {
            self.send(user_id, WELCOME_BACK_TEXT, None).await
        } else {
            self.send(user_id, WELCOME_TEXT, Some(keyboards::profile_prompt()))
                .await
        }
    }

    async fn cmd_profile(&self, user_id: i64) -> Result<()> {
        match self.repo.get_user(user_id).await? {
            Some(user) if user.goal.is_some() => {
                let text = crate::dialogs::profile::format_profile(&user);
                self.send(user_id, &text, Some(keyboards::profile_prompt()))
                    .await
            }
            _ => self.start_profile_wizard(user_id).await,
        }
    }

    async fn cmd_cancel(&self, user_id: i64) -> Result<()> {
        if self.dialogs.clear(user_id) {
            self.send(user_id, "Cancelled.", None).await
        } else {
            self.send(user_id, "Nothing to cancel.", None).await
        }
    }

    async fn cmd_today(&self, user_id: i64) -> Result<()> {
        let day = self.today();
        let user = self.repo.get_user(user_id).await?;
        let water_ml = self.repo.water_today(user_id, &day).await?;
        let goal = self.effective_water_goal(user_id).await?;
        let moods = self.repo.mood_history(user_id, 1).await?;
        let mood = moods.iter().find(|m| m.logged_day == day);
        let sleeps = self.repo.sleep_history(user_id, 1).await?;
        let sleep = sleeps.iter().find(|s| s.sleep_date == day);
        let headaches = self.repo.headache_count_today(user_id, &day).await?;
        let text =
            stats::format_today_summary(user.as_ref(), water_ml, goal, mood, sleep, headaches);
        self.send(user_id, &text, None).await
    }

    async fn cmd_week(&self, user_id: i64) -> Result<()> {
        let days = water::week_dates(self.local_date());
        let totals = self
            .repo
            .water_week(user_id, &days[0], &days[6])
            .await?;
        let week = water::merge_week(&days, &totals);
        let goal = self.effective_water_goal(user_id).await?;

        let moods: Vec<_> = self
            .repo
            .mood_history(user_id, 50)
            .await?
            .into_iter()
            .filter(|m| m.logged_day >= days[0])
            .collect();
        let sleeps: Vec<_> = self
            .repo
            .sleep_history(user_id, 7)
            .await?
            .into_iter()
            .filter(|s| s.sleep_date >= days[0])
            .collect();
        let headaches: Vec<_> = self
            .repo
            .headache_history(user_id, 50)
            .await?
            .into_iter()
            .filter(|h| h.logged_day >= days[0])
            .collect();

        let text = stats::format_week_report(&week, goal, &moods, &sleeps, &headaches);
        self.send(user_id, &text, None).await
    }

    async fn cmd_export(&self, user_id: i64) -> Result<()> {
        let water = self.repo.all_water(user_id).await?;
        let moods = self.repo.all_mood(user_id).await?;
        let sleeps = self.repo.all_sleep(user_id).await?;
        let headaches = self.repo.all_headache(user_id).await?;

        if water.is_empty() && moods.is_empty() && sleeps.is_empty() && headaches.is_empty() {
            return self
                .send(user_id, "Nothing to export yet — log something first.", None)
                .await;
        }

        let bytes = stats::build_csv(&self.tz, &water, &moods, &sleeps, &headaches)?;
        let filename = format!("health_export_{}.csv", self.today());
        self.transport
            .send_document(user_id, &filename, bytes, "📄 Your full health log")
            .await
    }
}

const WELCOME_TEXT: &str = "👋 Hi! I'm your health tracking assistant.\n\n\
I can log your water, mood, sleep and headaches, and build daily and weekly \
summaries. Set up a profile to get personal nutrition and hydration targets.";

const WELCOME_BACK_TEXT: &str =
    "👋 Welcome back! Use /today for your daily summary or /help for all commands.";

const HELP_TEXT: &str = "📖 Commands\n\n\
/profile — nutrition profile and targets\n\
/water — log water\n\
/mood — log mood\n\
/sleep — log sleep\n\
/headache — log a headache\n\
/today — today's summary\n\
/week — weekly report\n\
/export — full CSV export\n\
/cancel — abort the current dialog";
