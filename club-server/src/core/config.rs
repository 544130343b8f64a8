//! Server configuration
//!
//! All settings come from environment variables with sensible defaults:
//!
//! | Env var | Default | Meaning |
//! |---------|---------|---------|
//! | WORK_DIR | /var/lib/pizza-club | Working directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | TIMEZONE | America/New_York | Club timezone for slot instants |
//! | SLOT_TIMES | 17:15 … 19:30 | Comma-separated per-night roster |
//! | SMS_GATEWAY_URL | (unset) | Confirmation gateway; unset = log only |
//! | ADMIN_PASSWORD | (unset) | Bootstrap password for an empty registry |

use std::path::PathBuf;

use chrono_tz::Tz;

use crate::scheduling::SlotRoster;

/// Server configuration
#[derive(Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Club timezone; slot past/future checks happen in this zone
    pub timezone: Tz,
    /// Per-night pickup slot roster
    pub roster: SlotRoster,
    /// SMS gateway endpoint for confirmations (None = log only)
    pub sms_gateway_url: Option<String>,
    /// Bootstrap password when the admin registry is empty
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, using defaults for
    /// anything unset and logging a warning for anything unparsable.
    pub fn from_env() -> Self {
        let timezone = match std::env::var("TIMEZONE") {
            Ok(tz) => tz.parse().unwrap_or_else(|_| {
                tracing::warn!(timezone = %tz, "Unknown TIMEZONE, falling back to America/New_York");
                chrono_tz::America::New_York
            }),
            Err(_) => chrono_tz::America::New_York,
        };

        let roster = match std::env::var("SLOT_TIMES") {
            Ok(spec) => SlotRoster::parse(&spec).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Invalid SLOT_TIMES, falling back to default roster");
                SlotRoster::default_evening()
            }),
            Err(_) => SlotRoster::default_evening(),
        };

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/pizza-club".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            timezone,
            roster,
            sms_gateway_url: std::env::var("SMS_GATEWAY_URL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }

    /// Override work dir and port (used by tests)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Database directory: `work_dir/database`
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Create the work directory structure if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(PathBuf::from(&self.work_dir).join("logs"))?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
