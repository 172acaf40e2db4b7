use thiserror::Error;

#[derive(Debug, Error)]
pub enum HealthBotError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("database error: {0}")]
    Database(String),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, HealthBotError>;
