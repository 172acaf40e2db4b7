//! Water logging: quick-add buttons, custom amount, and goal override.

use crate::dialogs::DialogState;
use crate::error::Result;
use crate::keyboards;
use crate::router::Bot;
use crate::services::water;

pub(crate) fn parse_amount(text: &str) -> Option<i32> {
    let amount: i32 = text.trim().parse().ok()?;
    (10..=5000).contains(&amount).then_some(amount)
}

pub(crate) fn parse_goal(text: &str) -> Option<i32> {
    let goal: i32 = text.trim().parse().ok()?;
    (1000..=5000).contains(&goal).then_some(goal)
}

impl Bot {
    pub(crate) async fn show_water_status(&self, user_id: i64) -> Result<()> {
        let day = self.today();
        let current = self.repo.water_today(user_id, &day).await?;
        let goal = self.effective_water_goal(user_id).await?;
        let days = water::week_dates(self.local_date());
        let totals = self.repo.water_week(user_id, &days[0], &days[6]).await?;
        let week = water::merge_week(&days, &totals);
        let text = water::format_water_status(current, goal, &week);
        self.send(user_id, &text, Some(keyboards::water())).await
    }

    pub(crate) async fn water_add(&self, user_id: i64, amount_ml: i32) -> Result<()> {
        if !(10..=5000).contains(&amount_ml) {
            return Ok(());
        }
        let day = self.today();
        self.repo
            .log_water(user_id, amount_ml, &day, self.now_ts())
            .await?;
        let current = self.repo.water_today(user_id, &day).await?;
        let goal = self.effective_water_goal(user_id).await?;
        let bar = water::progress_bar(current, goal);
        let text = if current >= i64::from(goal) {
            format!("✅ +{amount_ml} ml\n{bar}\n\n🎉 Daily goal reached!")
        } else {
            format!("✅ +{amount_ml} ml\n{bar}")
        };
        self.send(user_id, &text, None).await
    }

    pub(crate) async fn prompt_water_custom(&self, user_id: i64) -> Result<()> {
        self.dialogs.set(user_id, DialogState::WaterAmount);
        self.send(
            user_id,
            "How much did you drink, in ml? (10-5000)",
            None,
        )
        .await
    }

    pub(crate) async fn water_amount_text(&self, user_id: i64, text: &str) -> Result<()> {
        let Some(amount) = parse_amount(text) else {
            return self
                .send(user_id, "Please enter a number between 10 and 5000 ml.", None)
                .await;
        };
        let day = self.today();
        self.repo
            .log_water(user_id, amount, &day, self.now_ts())
            .await?;
        self.dialogs.clear(user_id);
        let current = self.repo.water_today(user_id, &day).await?;
        let goal = self.effective_water_goal(user_id).await?;
        let text = format!("✅ +{amount} ml\n{}", water::progress_bar(current, goal));
        self.send(user_id, &text, None).await
    }

    pub(crate) async fn prompt_water_goal(&self, user_id: i64) -> Result<()> {
        self.dialogs.set(user_id, DialogState::WaterGoal);
        self.send(
            user_id,
            "What daily goal would you like, in ml? (1000-5000)",
            None,
        )
        .await
    }

    pub(crate) async fn water_goal_text(&self, user_id: i64, text: &str) -> Result<()> {
        let Some(goal) = parse_goal(text) else {
            return self
                .send(
                    user_id,
                    "Please enter a goal between 1000 and 5000 ml.",
                    None,
                )
                .await;
        };
        self.repo.set_water_goal(user_id, goal).await?;
        self.dialogs.clear(user_id);
        self.send(user_id, &format!("🎯 Daily water goal set to {goal} ml."), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_bounds() {
        assert_eq!(parse_amount("500"), Some(500));
        assert_eq!(parse_amount("9"), None);
        assert_eq!(parse_amount("5001"), None);
        assert_eq!(parse_amount("a lot"), None);
    }

    #[test]
    fn goal_bounds() {
        assert_eq!(parse_goal("2000"), Some(2000));
        assert_eq!(parse_goal("999"), None);
        assert_eq!(parse_goal("5001"), None);
    }
}
