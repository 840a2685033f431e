//! Repository trait for groups.

use crate::domain::entities::Group;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for groups.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgGroupRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Creates a group.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is already taken.
    async fn create(&self, name: &str) -> Result<Group, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, AppError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, AppError>;

    /// Lists groups ordered by identifier.
    async fn list(&self) -> Result<Vec<Group>, AppError>;

    /// Renames a group. Returns `Ok(None)` if it does not exist.
    async fn update(&self, id: i64, name: &str) -> Result<Option<Group>, AppError>;

    /// Deletes a group and its memberships. Returns `false` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
