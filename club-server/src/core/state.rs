//! Server state - shared references to configuration, store and services

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::admin;
use crate::core::Config;
use crate::db::DbService;
use crate::notify::{self, Notifier};
use crate::scheduling::provisioning;
use crate::utils::AppResult;
use crate::utils::time::now_in;

/// Shared server state; cheap to clone, handed to every handler.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration (immutable after startup)
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Confirmation dispatcher
    pub notifier: Arc<dyn Notifier>,
}

impl ServerState {
    /// Initialize the server state:
    /// 1. Work directory structure
    /// 2. Database (work_dir/database/club.db) + migrations
    /// 3. Admin registry bootstrap
    /// 4. Notification dispatcher
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| shared::error::AppError::internal(format!(
                "Failed to create work directory structure: {e}"
            )))?;

        let db_path = config.database_dir().join("club.db");
        let db = DbService::new(&db_path.to_string_lossy()).await?;
        let pool = db.pool;

        admin::ensure_default_admin(&pool, config.admin_password.as_deref()).await?;

        let notifier = notify::from_gateway_url(config.sms_gateway_url.as_deref());

        Ok(Self {
            config: config.clone(),
            pool,
            notifier,
        })
    }

    /// Start background tasks. Must be called before `Server::run()` serves
    /// traffic.
    ///
    /// Tasks:
    /// - Schedule provisioning: materializes night/slot rows for the
    ///   current weekend immediately and refreshes hourly.
    pub fn start_background_tasks(&self) {
        let state = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(3600));
            loop {
                // First tick fires immediately: startup provisioning.
                interval.tick().await;
                let now = now_in(state.config.timezone);
                match provisioning::ensure_current_nights(&state.pool, &state.config.roster, now)
                    .await
                {
                    Ok(count) => {
                        tracing::debug!(nights = count, "Schedule provisioning refresh complete")
                    }
                    Err(e) => tracing::warn!(error = %e, "Schedule provisioning refresh failed"),
                }
            }
        });
    }
}
