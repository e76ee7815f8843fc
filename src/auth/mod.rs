//! Authentication and Authorization
//!
//! - [`JwtService`] - token generation and validation
//! - [`CurrentUser`] - authenticated user context, extracted per request
//! - [`password`] - Argon2 credential hashing
//!
//! Role checks live on [`CurrentUser`]; ownership and assignment checks are
//! finer-grained and live with the order lifecycle engine.

pub mod extractor;
pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};

use crate::db::models::Role;
use crate::utils::AppError;

/// Authenticated user context, parsed from validated JWT claims
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

impl CurrentUser {
    /// Require an exact role; every operation is gated on a single role.
    ///
    /// The failure is a uniform 403 that carries no resource detail.
    pub fn require_role(&self, role: Role) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
