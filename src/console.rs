//! Terminal transport for local runs: messages render to stdout, inline
//! keyboards render as labelled action tokens the stdin loop can replay.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use console::{style, Term};

use crate::error::{HealthBotError, Result};
use crate::interfaces::transport::{ChatTransport, Keyboard};

pub struct ConsoleTransport {
    term: Term,
    next_message_id: AtomicI64,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            next_message_id: AtomicI64::new(1),
        }
    }

    pub fn last_message_id(&self) -> i64 {
        self.next_message_id.load(Ordering::SeqCst) - 1
    }

    fn write(&self, text: &str) -> Result<()> {
        self.term
            .write_line(text)
            .map_err(|e| HealthBotError::Transport(e.to_string()))
    }

    fn render_keyboard(&self, keyboard: &Keyboard) -> Result<()> {
        for row in &keyboard.rows {
            let line = row
                .iter()
                .map(|button| format!("[{}  :{}]", button.label, button.action))
                .collect::<Vec<_>>()
                .join(" ");
            self.write(&format!("  {}", style(line).dim()))?;
        }
        Ok(())
    }
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatTransport for ConsoleTransport {
    async fn send_message(
        &self,
        _user_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<()> {
        let id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        self.write(&format!("{} {text}", style(format!("#{id}")).cyan()))?;
        if let Some(keyboard) = keyboard {
            self.render_keyboard(&keyboard)?;
        }
        Ok(())
    }

    async fn edit_message(
        &self,
        _user_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<()> {
        self.write(&format!(
            "{} {text}",
            style(format!("#{message_id}~")).cyan()
        ))?;
        if let Some(keyboard) = keyboard {
            self.render_keyboard(&keyboard)?;
        }
        Ok(())
    }

    async fn edit_keyboard(
        &self,
        _user_id: i64,
        message_id: i64,
        keyboard: Keyboard,
    ) -> Result<()> {
        self.write(&format!(
            "{}",
            style(format!("#{message_id}~ (keyboard updated)")).cyan()
        ))?;
        self.render_keyboard(&keyboard)
    }

    async fn send_document(
        &self,
        _user_id: i64,
        filename: &str,
        bytes: Vec<u8>,
        caption: &str,
    ) -> Result<()> {
        std::fs::write(filename, &bytes)
            .map_err(|e| HealthBotError::Transport(format!("writing {filename}: {e}")))?;
        self.write(&format!(
            "{caption}\n{} ({} bytes)",
            style(filename).green(),
            bytes.len()
        ))
    }
}
