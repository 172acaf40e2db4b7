#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use vitalog::error::Result;
use vitalog::interfaces::repository::HealthRepo;
use vitalog::interfaces::transport::{ChatTransport, Keyboard};
use vitalog::providers::SqliteRepo;
use vitalog::router::{Bot, Event, Inbound};

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub user_id: i64,
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

/// Captures everything the bot tries to deliver.
#[derive(Default)]
pub struct RecordingTransport {
    pub messages: Mutex<Vec<SentMessage>>,
    pub documents: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingTransport {
    pub fn texts(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .map(|m| m.text.clone())
            .collect()
    }

    pub fn last_text(&self) -> String {
        self.texts().last().cloned().unwrap_or_default()
    }

    pub fn sent_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_message(
        &self,
        user_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<()> {
        self.messages.lock().unwrap().push(SentMessage {
            user_id,
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }

    async fn edit_message(
        &self,
        user_id: i64,
        _message_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<()> {
        self.send_message(user_id, text, keyboard).await
    }

    async fn edit_keyboard(&self, user_id: i64, _message_id: i64, keyboard: Keyboard) -> Result<()> {
        self.send_message(user_id, "", Some(keyboard)).await
    }

    async fn send_document(
        &self,
        _user_id: i64,
        filename: &str,
        bytes: Vec<u8>,
        _caption: &str,
    ) -> Result<()> {
        self.documents
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes));
        Ok(())
    }
}

pub async fn temp_repo() -> (TempDir, Arc<dyn HealthRepo>) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("health.db");
    let repo = SqliteRepo::connect(path.to_str().unwrap())
        .await
        .expect("sqlite repo");
    (dir, Arc::new(repo))
}

pub async fn test_bot() -> (TempDir, Arc<dyn HealthRepo>, Arc<RecordingTransport>, Bot) {
    let (dir, repo) = temp_repo().await;
    let transport = Arc::new(RecordingTransport::default());
    let bot = Bot::new(
        repo.clone(),
        transport.clone(),
        chrono_tz::Europe::Belgrade,
    );
    (dir, repo, transport, bot)
}

pub fn command(user_id: i64, name: &str) -> Inbound {
    Inbound {
        user_id,
        username: "tester".to_string(),
        full_name: "Test User".to_string(),
        event: Event::Command {
            name: name.to_string(),
        },
    }
}

pub fn text(user_id: i64, body: &str) -> Inbound {
    Inbound {
        user_id,
        username: "tester".to_string(),
        full_name: "Test User".to_string(),
        event: Event::Text(body.to_string()),
    }
}

pub fn callback(user_id: i64, action: &str) -> Inbound {
    Inbound {
        user_id,
        username: "tester".to_string(),
        full_name: "Test User".to_string(),
        event: Event::Callback {
            message_id: 1,
            action: action.to_string(),
        },
    }
}
