//! Sleep logging: hours (preset or custom) then optional quality rating.
//! One entry per calendar day; repeats are silently ignored by the store.

use crate::dialogs::{DialogState, SleepDraft, SleepStep};
use crate::error::Result;
use crate::keyboards;
use crate::router::Bot;
use crate::services::sleep::{fmt_hours, format_sleep_status, quality_label};

pub(crate) fn parse_hours(text: &str) -> Option<f64> {
    let hours: f64 = text.trim().replace(',', ".").parse().ok()?;
    (1.0..=24.0).contains(&hours).then_some(hours)
}

impl Bot {
    pub(crate) async fn start_sleep_wizard(&self, user_id: i64) -> Result<()> {
        let rows = self.repo.sleep_history(user_id, 7).await?;
        let status = format_sleep_status(&rows);
        self.dialogs.set(
            user_id,
            DialogState::Sleep {
                step: SleepStep::Hours,
                draft: SleepDraft::default(),
            },
        );
        self.send(
            user_id,
            &format!("{status}\n\nHow long did you sleep last night?"),
            Some(keyboards::sleep_hours()),
        )
        .await
    }

    pub(crate) async fn sleep_hours_chosen(&self, user_id: i64, raw: &str) -> Result<()> {
        let Some(DialogState::Sleep {
            step: SleepStep::Hours,
            ..
        }) = self.dialogs.snapshot(user_id)
        else {
            return Ok(());
        };
        let Some(hours) = parse_hours(raw) else {
            return Ok(());
        };
        self.advance_to_quality(user_id, hours).await
    }

    pub(crate) async fn prompt_sleep_custom(&self, user_id: i64) -> Result<()> {
        let Some(DialogState::Sleep {
            step: SleepStep::Hours,
            ..
        }) = self.dialogs.snapshot(user_id)
        else {
            return Ok(());
        };
        self.send(user_id, "How many hours? (1-24, e.g. 7.5)", None)
            .await
    }

    pub(crate) async fn sleep_on_text(
        &self,
        user_id: i64,
        step: SleepStep,
        _draft: SleepDraft,
        text: &str,
    ) -> Result<()> {
        match step {
            SleepStep::Hours => match parse_hours(text) {
                Some(hours) => self.advance_to_quality(user_id, hours).await,
                None => {
                    self.send(
                        user_id,
                        "Please enter hours between 1 and 24, e.g. 7.5.",
                        None,
                    )
                    .await
                }
            },
            SleepStep::Quality => {
                self.send(user_id, "Please use the buttons above.", None)
                    .await
            }
        }
    }

    async fn advance_to_quality(&self, user_id: i64, hours: f64) -> Result<()> {
        self.dialogs.set(
            user_id,
            DialogState::Sleep {
                step: SleepStep::Quality,
                draft: SleepDraft { hours: Some(hours) },
            },
        );
        self.send(
            user_id,
            &format!("{}h. How was the quality?", fmt_hours(hours)),
            Some(keyboards::sleep_quality()),
        )
        .await
    }

    /// `quality` 0 means the user skipped the rating.
    pub(crate) async fn sleep_quality_chosen(&self, user_id: i64, quality: i32) -> Result<()> {
        let Some(DialogState::Sleep {
            step: SleepStep::Quality,
            draft: SleepDraft { hours: Some(hours) },
        }) = self.dialogs.snapshot(user_id)
        else {
            return Ok(());
        };
        if !(0..=3).contains(&quality) {
            return Ok(());
        }
        let quality = (quality > 0).then_some(quality);
        self.repo
            .log_sleep(user_id, &self.today(), hours, quality, self.now_ts())
            .await?;
        self.dialogs.clear(user_id);
        let quality_part = quality
            .map(|q| format!(" [{}]", quality_label(q)))
            .unwrap_or_default();
        self.send(
            user_id,
            &format!("✅ Sleep logged: {}h{quality_part}", fmt_hours(hours)),
            None,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_bounds_and_formats() {
        assert_eq!(parse_hours("7.5"), Some(7.5));
        assert_eq!(parse_hours("7,5"), Some(7.5));
        assert_eq!(parse_hours("8.0"), Some(8.0));
        assert_eq!(parse_hours("0.5"), None);
        assert_eq!(parse_hours("25"), None);
        assert_eq!(parse_hours("lots"), None);
    }
}
