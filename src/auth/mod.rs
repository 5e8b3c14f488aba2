//! Session lookup against the auth platform.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;

pub mod supabase;

pub use supabase::SupabaseAuth;

/// Identity of the user behind a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Resolves a bearer token to the user it belongs to
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SessionVerifier: Send + Sync {
    /// `Ok(None)` when the token is unknown, expired or revoked
    async fn lookup(&self, token: &str) -> AppResult<Option<AuthUser>>;
}
