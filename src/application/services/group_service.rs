//! Group management service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::Group;
use crate::domain::repositories::GroupRepository;
use crate::error::AppError;

/// Service for group CRUD with name uniqueness checks.
pub struct GroupService<R: GroupRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: GroupRepository + ?Sized> GroupService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, AppError> {
        self.repository.list().await
    }

    /// Retrieves a group by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the identifier is unknown.
    pub async fn get_group(&self, id: i64) -> Result<Group, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Creates a group.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is already taken.
    pub async fn create_group(&self, name: &str) -> Result<Group, AppError> {
        self.ensure_name_free(name, None).await?;
        self.repository.create(name).await
    }

    /// Renames a group.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the identifier is unknown.
    /// Returns [`AppError::Validation`] if another group already has the name.
    pub async fn update_group(&self, id: i64, name: &str) -> Result<Group, AppError> {
        self.get_group(id).await?;
        self.ensure_name_free(name, Some(id)).await?;
        self.repository
            .update(id, name)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Deletes a group; members lose the membership.
    pub async fn delete_group(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn ensure_name_free(&self, name: &str, own_id: Option<i64>) -> Result<(), AppError> {
        match self.repository.find_by_name(name).await? {
            Some(existing) if Some(existing.id) != own_id => Err(AppError::field(
                "name",
                "A group with that name already exists.",
            )),
            _ => Ok(()),
        }
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found("Group not found", json!({ "id": id }))
}
