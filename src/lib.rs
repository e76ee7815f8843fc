//! QuickBite Server - food ordering marketplace backend
//!
//! # Architecture overview
//!
//! - **HTTP API** (`api`): RESTful routes, one directory per resource
//! - **Authentication** (`auth`): JWT + Argon2, role gating
//! - **Services** (`services`): order creation, lifecycle engine, delivery
//!   estimation
//! - **Database** (`db`): SQLite via sqlx, repositories as free functions
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT, passwords, extractor
//! ├── api/           # HTTP routes and handlers
//! ├── services/      # domain logic
//! ├── db/            # pool, migrations, models, repositories
//! └── utils/         # errors, response envelope, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - tracing with a dedicated target so security
// events can be filtered or shipped separately
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
