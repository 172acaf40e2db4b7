use std::sync::Arc;

use crate::config::Settings;
use crate::error::{HealthBotError, Result};
use crate::interfaces::repository::HealthRepo;

pub mod postgres;
pub mod schema;
pub mod sqlite;

mod rows;

pub use postgres::PostgresRepo;
pub use sqlite::SqliteRepo;

/// Backend selection happens here, once; everything downstream holds the
/// trait object.
pub async fn connect(settings: &Settings) -> Result<Arc<dyn HealthRepo>> {
    match &settings.database_url {
        Some(url) => {
            tracing::info!("connecting to postgres backend");
            Ok(Arc::new(PostgresRepo::connect(url).await?))
        }
        None => {
            tracing::info!(path = %settings.database_path, "opening sqlite backend");
            Ok(Arc::new(SqliteRepo::connect(&settings.database_path).await?))
        }
    }
}

/// Log the failing operation label and surface the driver error unchanged.
pub(crate) fn db_err(op: &'static str, err: impl std::fmt::Display) -> HealthBotError {
    tracing::error!(operation = op, error = %err, "database operation failed");
    HealthBotError::Database(format!("{op}: {err}"))
}

pub(crate) fn ensure_parent_dir(path: &str) -> Result<()> {
    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| HealthBotError::Runtime(e.to_string()))?;
    }
    Ok(())
}
