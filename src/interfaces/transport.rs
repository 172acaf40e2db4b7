use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

/// One inline button: a visible label and the opaque callback token it emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    pub action: String,
}

impl Button {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn row(mut self, buttons: Vec<Button>) -> Self {
        self.rows.push(buttons);
        self
    }
}

/// Outbound messaging boundary. The real chat network lives behind this;
/// the repo ships a console transport and tests use a recording one.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(
        &self,
        user_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<()>;

    async fn edit_message(
        &self,
        user_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<()>;

    /// Replace only the inline keyboard, leaving the message text alone.
    async fn edit_keyboard(&self, user_id: i64, message_id: i64, keyboard: Keyboard) -> Result<()>;

    async fn send_document(
        &self,
        user_id: i64,
        filename: &str,
        bytes: Vec<u8>,
        caption: &str,
    ) -> Result<()>;
}

/// Re-rendering identical content is reported as an error by some chat
/// networks ("message is not modified"); treat that class as success.
pub fn ignore_not_modified(result: Result<()>) -> Result<()> {
    match result {
        Err(crate::error::HealthBotError::Transport(msg))
            if msg.contains("message is not modified") =>
        {
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HealthBotError;

    #[test]
    fn not_modified_is_benign() {
        let res = Err(HealthBotError::Transport(
            "Bad Request: message is not modified".to_string(),
        ));
        assert!(ignore_not_modified(res).is_ok());

        let res: Result<()> = Err(HealthBotError::Transport("chat not found".to_string()));
        assert!(ignore_not_modified(res).is_err());
    }
}
