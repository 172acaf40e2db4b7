//! Headache wizard: intensity -> location -> trigger multi-select ->
//! duration. Only intensity is mandatory.

use crate::dialogs::{DialogState, HeadacheDraft, HeadacheStep};
use crate::error::Result;
use crate::interfaces::transport::ignore_not_modified;
use crate::keyboards;
use crate::router::Bot;
use crate::services::headache::{
    format_duration, format_headache_status, triggers_to_str, LOCATIONS, TRIGGERS,
};

pub(crate) fn parse_duration_min(text: &str) -> Option<i32> {
    let minutes: i32 = text.trim().parse().ok()?;
    (1..=1440).contains(&minutes).then_some(minutes)
}

impl Bot {
    pub(crate) async fn show_headache_status(&self, user_id: i64) -> Result<()> {
        let rows = self.repo.headache_history(user_id, 5).await?;
        let text = format_headache_status(&rows);
        self.send(user_id, &text, Some(keyboards::headache_prompt()))
            .await
    }

    pub(crate) async fn start_headache_wizard(&self, user_id: i64) -> Result<()> {
        self.dialogs.set(
            user_id,
            DialogState::Headache {
                step: HeadacheStep::Intensity,
                draft: HeadacheDraft::default(),
            },
        );
        self.send(
            user_id,
            "How intense is the pain? (1 = mild, 10 = worst)",
            Some(keyboards::headache_intensity()),
        )
        .await
    }

    pub(crate) async fn headache_intensity_chosen(
        &self,
        user_id: i64,
        intensity: i32,
    ) -> Result<()> {
        let Some(DialogState::Headache {
            step: HeadacheStep::Intensity,
            mut draft,
        }) = self.dialogs.snapshot(user_id)
        else {
            return Ok(());
        };
        if !(1..=10).contains(&intensity) {
            return Ok(());
        }
        draft.intensity = Some(intensity);
        self.dialogs.set(
            user_id,
            DialogState::Headache {
                step: HeadacheStep::Location,
                draft,
            },
        );
        self.send(
            user_id,
            "Where does it hurt?",
            Some(keyboards::headache_location()),
        )
        .await
    }

    pub(crate) async fn headache_location_chosen(&self, user_id: i64, key: &str) -> Result<()> {
        let Some(DialogState::Headache {
            step: HeadacheStep::Location,
            mut draft,
        }) = self.dialogs.snapshot(user_id)
        else {
            return Ok(());
        };
        if key != "skip" {
            if !LOCATIONS.iter().any(|(k, _)| *k == key) {
                return Ok(());
            }
            draft.location = Some(key.to_string());
        }
        let selected = draft.triggers.clone();
        self.dialogs.set(
            user_id,
            DialogState::Headache {
                step: HeadacheStep::Triggers,
                draft,
            },
        );
        self.send(
            user_id,
            "Any likely triggers? Pick all that apply.",
            Some(keyboards::headache_triggers(&selected)),
        )
        .await
    }

    pub(crate) async fn headache_trigger_toggled(
        &self,
        user_id: i64,
        message_id: i64,
        key: &str,
    ) -> Result<()> {
        let Some(DialogState::Headache {
            step: HeadacheStep::Triggers,
            mut draft,
        }) = self.dialogs.snapshot(user_id)
        else {
            return Ok(());
        };
        if !TRIGGERS.iter().any(|(k, _)| *k == key) {
            return Ok(());
        }
        match draft.triggers.iter().position(|k| k == key) {
            Some(index) => {
                draft.triggers.remove(index);
            }
            None => draft.triggers.push(key.to_string()),
        }
        let selected = draft.triggers.clone();
        self.dialogs.set(
            user_id,
            DialogState::Headache {
                step: HeadacheStep::Triggers,
                draft,
            },
        );
        ignore_not_modified(
            self.transport
                .edit_keyboard(user_id, message_id, keyboards::headache_triggers(&selected))
                .await,
        )
    }

    pub(crate) async fn headache_triggers_done(&self, user_id: i64, skip: bool) -> Result<()> {
        let Some(DialogState::Headache {
            step: HeadacheStep::Triggers,
            mut draft,
        }) = self.dialogs.snapshot(user_id)
        else {
            return Ok(());
        };
        if skip {
            draft.triggers.clear();
        }
        self.dialogs.set(
            user_id,
            DialogState::Headache {
                step: HeadacheStep::Duration,
                draft,
            },
        );
        self.send(
            user_id,
            "How long did it last?",
            Some(keyboards::headache_duration()),
        )
        .await
    }

    /// `minutes` 0 means the user skipped the duration.
    pub(crate) async fn headache_duration_chosen(
        &self,
        user_id: i64,
        minutes: i32,
    ) -> Result<()> {
        let Some(DialogState::Headache {
            step: HeadacheStep::Duration,
            draft,
        }) = self.dialogs.snapshot(user_id)
        else {
            return Ok(());
        };
        if minutes != 0 && !(1..=1440).contains(&minutes) {
            return Ok(());
        }
        let duration = (minutes > 0).then_some(minutes);
        self.finish_headache(user_id, draft, duration).await
    }

    pub(crate) async fn prompt_headache_duration_custom(&self, user_id: i64) -> Result<()> {
        let Some(DialogState::Headache {
            step: HeadacheStep::Duration,
            draft,
        }) = self.dialogs.snapshot(user_id)
        else {
            return Ok(());
        };
        self.dialogs.set(
            user_id,
            DialogState::Headache {
                step: HeadacheStep::DurationCustom,
                draft,
            },
        );
        self.send(user_id, "How many minutes? (1-1440)", None).await
    }

    pub(crate) async fn headache_on_text(
        &self,
        user_id: i64,
        step: HeadacheStep,
        draft: HeadacheDraft,
        text: &str,
    ) -> Result<()> {
        match step {
            HeadacheStep::DurationCustom => match parse_duration_min(text) {
                Some(minutes) => self.finish_headache(user_id, draft, Some(minutes)).await,
                None => {
                    self.send(
                        user_id,
                        "Please enter a duration between 1 and 1440 minutes.",
                        None,
                    )
                    .await
                }
            },
            _ => {
                self.send(user_id, "Please use the buttons above.", None)
                    .await
            }
        }
    }

    async fn finish_headache(
        &self,
        user_id: i64,
        draft: HeadacheDraft,
        duration_min: Option<i32>,
    ) -> Result<()> {
        let Some(intensity) = draft.intensity else {
            self.dialogs.clear(user_id);
            return self.start_headache_wizard(user_id).await;
        };
        let triggers = triggers_to_str(&draft.triggers);
        self.repo
            .log_headache(
                user_id,
                intensity,
                draft.location.as_deref(),
                triggers.as_deref(),
                duration_min,
                &self.today(),
                self.now_ts(),
            )
            .await?;
        self.dialogs.clear(user_id);

        let duration_part = duration_min
            .map(|minutes| format!(" · {}", format_duration(minutes)))
            .unwrap_or_default();
        self.send(
            user_id,
            &format!(
                "✅ Headache logged: {intensity}/10{duration_part}\n\
                 Take care of yourself. 💊 /headache shows your history."
            ),
            None,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_bounds() {
        assert_eq!(parse_duration_min("90"), Some(90));
        assert_eq!(parse_duration_min("1"), Some(1));
        assert_eq!(parse_duration_min("1440"), Some(1440));
        assert_eq!(parse_duration_min("0"), None);
        assert_eq!(parse_duration_min("1441"), None);
        assert_eq!(parse_duration_min("an hour"), None);
    }
}
