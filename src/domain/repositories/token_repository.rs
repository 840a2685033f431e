//! Repository trait for API token authentication.

use crate::domain::entities::ApiToken;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for API token management.
///
/// Tokens are stored as HMAC-SHA256 hashes; raw tokens never reach storage.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Stores a new token hash for a user.
    async fn create_token(&self, user_id: i64, token_hash: &str) -> Result<ApiToken, AppError>;

    /// Finds a non-revoked token by hash.
    async fn find_active(&self, token_hash: &str) -> Result<Option<ApiToken>, AppError>;

    /// Updates the `last_used_at` timestamp for a token.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError>;

    /// Lists all tokens, newest first.
    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError>;

    /// Revokes a token. Returns `false` if it does not exist or was already revoked.
    async fn revoke_token(&self, id: i64) -> Result<bool, AppError>;
}
