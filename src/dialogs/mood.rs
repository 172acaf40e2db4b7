//! Mood logging: emoji pick, optional note, history with trend.

use crate::dialogs::DialogState;
use crate::error::Result;
use crate::keyboards;
use crate::router::Bot;
use crate::services::mood::{format_mood_history, MOOD_EMOJIS};

const MAX_NOTE_CHARS: usize = 500;
const HISTORY_LIMIT: i64 = 10;

impl Bot {
    pub(crate) async fn show_mood_prompt(&self, user_id: i64) -> Result<()> {
        self.send(
            user_id,
            "How are you feeling right now?",
            Some(keyboards::mood()),
        )
        .await
    }

    pub(crate) async fn mood_pick(&self, user_id: i64, emoji: &str) -> Result<()> {
        if !MOOD_EMOJIS.contains(&emoji) {
            return Ok(());
        }
        self.dialogs.set(
            user_id,
            DialogState::MoodNote {
                emoji: emoji.to_string(),
            },
        );
        self.send(
            user_id,
            &format!("{emoji} Noted. Want to add a short note?"),
            Some(keyboards::mood_note()),
        )
        .await
    }

    pub(crate) async fn mood_note_text(
        &self,
        user_id: i64,
        emoji: &str,
        text: &str,
    ) -> Result<()> {
        let note = text.trim();
        if note.chars().count() > MAX_NOTE_CHARS {
            return self
                .send(
                    user_id,
                    "That note is too long — 500 characters max.",
                    None,
                )
                .await;
        }
        self.repo
            .log_mood(user_id, emoji, Some(note), &self.today(), self.now_ts())
            .await?;
        self.dialogs.clear(user_id);
        self.send(user_id, &format!("✅ Mood logged: {emoji}"), None)
            .await
    }

    pub(crate) async fn mood_skip_note(&self, user_id: i64) -> Result<()> {
        let Some(DialogState::MoodNote { emoji }) = self.dialogs.snapshot(user_id) else {
            return Ok(());
        };
        self.repo
            .log_mood(user_id, &emoji, None, &self.today(), self.now_ts())
            .await?;
        self.dialogs.clear(user_id);
        self.send(user_id, &format!("✅ Mood logged: {emoji}"), None)
            .await
    }

    pub(crate) async fn show_mood_history(&self, user_id: i64) -> Result<()> {
        let rows = self.repo.mood_history(user_id, HISTORY_LIMIT).await?;
        let text = format_mood_history(&rows);
        self.send(user_id, &text, None).await
    }
}
