//! Server Configuration
//!
//! All settings come from environment variables with sensible defaults:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | HTTP_PORT | 3000 | HTTP API port |
//! | DATABASE_PATH | quickbite.db | SQLite database file |
//! | JWT_SECRET | generated (dev only) | token signing secret |
//! | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
//! | LOG_DIR | unset | optional rolling log directory |

use crate::auth::JwtConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "quickbite.db".into()),
            jwt: JwtConfig::default(),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }
}
