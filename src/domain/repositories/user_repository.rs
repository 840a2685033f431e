//! Repository trait for user accounts.

use crate::domain::entities::{User, UserFields};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts and their group memberships.
///
/// Writes touching both the account and its memberships must be atomic.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user, stamping `date_joined` with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the username is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, fields: UserFields) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Lists users, most recently joined first.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Replaces all mutable fields, memberships included.
    ///
    /// Returns `Ok(None)` if no user has this identifier.
    async fn update(&self, id: i64, fields: UserFields) -> Result<Option<User>, AppError>;

    /// Deletes a user together with its memberships and tokens.
    ///
    /// Returns `false` if the user did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Sets `last_login` to now.
    async fn record_login(&self, id: i64) -> Result<(), AppError>;
}
