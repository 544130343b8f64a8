//! Pizza Club Server - retro-terminal pizza night ordering backend
//!
//! # Architecture overview
//!
//! - **Scheduling** (`scheduling`): which nights are offerable, the slot
//!   roster, slot availability, schedule provisioning
//! - **Ordering** (`ordering`): pizza-name matching and the transactional
//!   order submission flow
//! - **Database** (`db`): SQLite store, migrations, repositories
//! - **Admin** (`admin`): per-call credential verification, slot locks,
//!   order cancellation and kitchen status flow
//! - **Notifications** (`notify`): best-effort SMS-shaped confirmations
//! - **HTTP API** (`api`): RESTful interface
//!
//! # Module structure
//!
//! ```text
//! club-server/src/
//! ├── core/          # Config, state, server lifecycle
//! ├── db/            # SQLite pool, models, repositories
//! ├── scheduling/    # Nights, roster, availability, provisioning
//! ├── ordering/      # Matcher, submission service
//! ├── admin/         # Privileged services (per-call credentials)
//! ├── notify/        # Confirmation dispatcher
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # Logging, time, validation helpers
//! ```

pub mod admin;
pub mod api;
pub mod core;
pub mod db;
pub mod notify;
pub mod ordering;
pub mod scheduling;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging from LOG_LEVEL / LOG_DIR.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
 ____  ___ __________  _      ____ _    _   _ ____
|  _ \|_ _|__  /__  / / \    / ___| |  | | | | __ )
| |_) || |  / /  / / / _ \  | |   | |  | | | |  _ \
|  __/ | | / /_ / /_/ ___ \ | |___| |__| |_| | |_) |
|_|   |___/____/____/_/  \_\ \____|_____\___/|____/
    "#
    );
}
