//! User account management service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{User, UserFields};
use crate::domain::repositories::{GroupRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::hash_password;

/// Validated user input carrying the raw password.
///
/// Group references are already resolved to identifiers; their existence is
/// checked by [`UserService`].
#[derive(Debug, Clone)]
pub struct UserInput {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_superuser: bool,
    pub groups: Vec<i64>,
}

/// Service for user CRUD.
///
/// Enforces username uniqueness, checks that referenced groups exist and
/// hashes passwords before they reach the repository.
pub struct UserService<U: UserRepository + ?Sized, G: GroupRepository + ?Sized> {
    users: Arc<U>,
    groups: Arc<G>,
}

impl<U: UserRepository + ?Sized, G: GroupRepository + ?Sized> UserService<U, G> {
    pub fn new(users: Arc<U>, groups: Arc<G>) -> Self {
        Self { users, groups }
    }

    /// Lists users, most recently joined first.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    /// Retrieves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the identifier is unknown.
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the username is taken or a group
    /// does not exist.
    pub async fn create_user(&self, input: UserInput) -> Result<User, AppError> {
        let fields = self.prepare(input, None).await?;
        let user = self.users.create(fields).await?;
        tracing::info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Replaces all mutable fields of a user, password and groups included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the identifier is unknown, before any
    /// input check runs.
    /// Returns [`AppError::Validation`] as for [`Self::create_user`].
    pub async fn update_user(&self, id: i64, input: UserInput) -> Result<User, AppError> {
        self.get_user(id).await?;
        let fields = self.prepare(input, Some(id)).await?;
        self.users
            .update(id, fields)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Deletes a user with its memberships and tokens.
    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        if !self.users.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn prepare(&self, input: UserInput, own_id: Option<i64>) -> Result<UserFields, AppError> {
        if let Some(existing) = self.users.find_by_username(&input.username).await?
            && Some(existing.id) != own_id
        {
            return Err(AppError::field(
                "username",
                "A user with that username already exists.",
            ));
        }

        let mut groups = input.groups;
        groups.sort_unstable();
        groups.dedup();

        for group_id in &groups {
            if self.groups.find_by_id(*group_id).await?.is_none() {
                return Err(AppError::field(
                    "groups",
                    format!("Invalid hyperlink - group {group_id} does not exist."),
                ));
            }
        }

        Ok(UserFields {
            username: input.username,
            password_hash: hash_password(&input.password)?,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            is_staff: input.is_staff,
            is_active: input.is_active,
            is_superuser: input.is_superuser,
            groups,
        })
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found("User not found", json!({ "id": id }))
}
