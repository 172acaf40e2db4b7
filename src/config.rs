use std::str::FromStr;

use chrono_tz::Tz;

use crate::error::{HealthBotError, Result};

pub const DEFAULT_DATABASE_PATH: &str = "data/health_tracker.db";
pub const DEFAULT_TIMEZONE: &str = "Europe/Belgrade";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Staging,
    Production,
}

impl FromStr for AppEnv {
    type Err = HealthBotError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "development" => Ok(AppEnv::Development),
            "staging" => Ok(AppEnv::Staging),
            "production" => Ok(AppEnv::Production),
            other => Err(HealthBotError::Config(format!(
                "APP_ENV must be development, staging or production, got '{other}'"
            ))),
        }
    }
}

/// Runtime settings, resolved once at startup from CLI flags / environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Presence selects the networked Postgres backend.
    pub database_url: Option<String>,
    /// Embedded SQLite file, used when no URL is configured.
    pub database_path: String,
    pub timezone: Tz,
    pub app_env: AppEnv,
    pub debug: bool,
}

impl Settings {
    pub fn new(
        database_url: Option<String>,
        database_path: String,
        timezone: &str,
        app_env: &str,
        debug: bool,
    ) -> Result<Self> {
        let timezone: Tz = timezone
            .parse()
            .map_err(|_| HealthBotError::Config(format!("unknown timezone '{timezone}'")))?;
        let app_env = app_env.parse()?;
        let database_url = database_url.filter(|url| !url.trim().is_empty());
        Ok(Self {
            database_url,
            database_path,
            timezone,
            app_env,
            debug,
        })
    }

    pub fn use_postgres(&self) -> bool {
        self.database_url.is_some()
    }

    pub fn is_production(&self) -> bool {
        self.app_env == AppEnv::Production
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            timezone: chrono_tz::Europe::Belgrade,
            app_env: AppEnv::Development,
            debug: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_environment() {
        let err = Settings::new(None, "db.sqlite".into(), DEFAULT_TIMEZONE, "qa", false);
        assert!(err.is_err());
    }

    #[test]
    fn url_presence_selects_postgres() {
        let settings = Settings::new(
            Some("postgres://localhost/health".into()),
            DEFAULT_DATABASE_PATH.into(),
            DEFAULT_TIMEZONE,
            "production",
            false,
        )
        .unwrap();
        assert!(settings.use_postgres());
        assert!(settings.is_production());

        let settings = Settings::new(
            Some("  ".into()),
            DEFAULT_DATABASE_PATH.into(),
            DEFAULT_TIMEZONE,
            "development",
            true,
        )
        .unwrap();
        assert!(!settings.use_postgres());
    }

    #[test]
    fn rejects_bad_timezone() {
        let err = Settings::new(None, "db.sqlite".into(), "Mars/Olympus", "staging", false);
        assert!(err.is_err());
    }
}
