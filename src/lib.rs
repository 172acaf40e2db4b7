pub mod config;
pub mod console;
pub mod dialogs;
pub mod domains;
pub mod error;
pub mod interfaces;
pub mod jobs;
pub mod keyboards;
pub mod providers;
pub mod router;
pub mod scheduler;
pub mod services;

pub use crate::config::Settings;
pub use crate::error::{HealthBotError, Result};
pub use crate::router::{Bot, Event, Inbound};
