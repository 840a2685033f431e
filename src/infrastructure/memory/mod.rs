//! In-process implementation of every repository trait.
//!
//! Used for local development without PostgreSQL (`STORAGE_BACKEND=memory`)
//! and as the backing store of the HTTP tests. All tables sit behind a single
//! [`RwLock`], so each repository call is atomic.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{ApiToken, Group, Todo, TodoFields, User, UserFields};
use crate::domain::repositories::{
    GroupRepository, TodoRepository, TokenRepository, UserRepository,
};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    todos: BTreeMap<i64, Todo>,
    users: BTreeMap<i64, User>,
    groups: BTreeMap<i64, Group>,
    tokens: BTreeMap<i64, ApiToken>,
    last_todo_id: i64,
    last_user_id: i64,
    last_group_id: i64,
    last_token_id: i64,
}

impl Tables {
    fn username_taken(&self, username: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.username == username && Some(u.id) != except)
    }

    fn unknown_group(&self, groups: &[i64]) -> Option<i64> {
        groups
            .iter()
            .copied()
            .find(|id| !self.groups.contains_key(id))
    }

    fn group_name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.groups
            .values()
            .any(|g| g.name == name && Some(g.id) != except)
    }
}

/// Store holding todos, users, groups and tokens in memory.
///
/// Identifiers are assigned from per-table counters starting at 1 and are
/// never reused.
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using in-memory store");
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn duplicate(field: &str) -> AppError {
    AppError::field(field, "A record with this value already exists.")
}

fn missing_group(id: i64) -> AppError {
    AppError::field(
        "groups",
        format!("Invalid hyperlink - group {id} does not exist."),
    )
}

#[async_trait]
impl TodoRepository for MemoryStore {
    async fn create(&self, fields: TodoFields) -> Result<Todo, AppError> {
        let mut t = self.tables.write().await;
        t.last_todo_id += 1;
        let todo = Todo::from_fields(t.last_todo_id, fields);
        t.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, AppError> {
        Ok(self.tables.read().await.todos.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Todo>, AppError> {
        Ok(self.tables.read().await.todos.values().cloned().collect())
    }

    async fn update(&self, id: i64, fields: TodoFields) -> Result<Option<Todo>, AppError> {
        let mut t = self.tables.write().await;
        Ok(t.todos.get_mut(&id).map(|todo| {
            *todo = Todo::from_fields(id, fields);
            todo.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().await.todos.remove(&id).is_some())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.todos.len() as i64)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, fields: UserFields) -> Result<User, AppError> {
        let mut t = self.tables.write().await;
        if t.username_taken(&fields.username, None) {
            return Err(duplicate("username"));
        }
        if let Some(group_id) = t.unknown_group(&fields.groups) {
            return Err(missing_group(group_id));
        }

        t.last_user_id += 1;
        let user = User {
            id: t.last_user_id,
            username: fields.username,
            password_hash: fields.password_hash,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            is_staff: fields.is_staff,
            is_active: fields.is_active,
            is_superuser: fields.is_superuser,
            last_login: None,
            date_joined: Utc::now(),
            groups: fields.groups,
        };
        t.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let t = self.tables.read().await;
        let mut users: Vec<User> = t.users.values().cloned().collect();
        users.sort_by(|a, b| b.date_joined.cmp(&a.date_joined).then(b.id.cmp(&a.id)));
        Ok(users)
    }

    async fn update(&self, id: i64, fields: UserFields) -> Result<Option<User>, AppError> {
        let mut t = self.tables.write().await;
        if !t.users.contains_key(&id) {
            return Ok(None);
        }
        if t.username_taken(&fields.username, Some(id)) {
            return Err(duplicate("username"));
        }
        if let Some(group_id) = t.unknown_group(&fields.groups) {
            return Err(missing_group(group_id));
        }

        Ok(t.users.get_mut(&id).map(|user| {
            user.username = fields.username;
            user.password_hash = fields.password_hash;
            user.first_name = fields.first_name;
            user.last_name = fields.last_name;
            user.email = fields.email;
            user.is_staff = fields.is_staff;
            user.is_active = fields.is_active;
            user.is_superuser = fields.is_superuser;
            user.groups = fields.groups;
            user.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        if t.users.remove(&id).is_none() {
            return Ok(false);
        }
        t.tokens.retain(|_, token| token.user_id != id);
        Ok(true)
    }

    async fn record_login(&self, id: i64) -> Result<(), AppError> {
        if let Some(user) = self.tables.write().await.users.get_mut(&id) {
            user.last_login = Some(Utc::now());
        }
        Ok(())
    }
}

#[async_trait]
impl GroupRepository for MemoryStore {
    async fn create(&self, name: &str) -> Result<Group, AppError> {
        let mut t = self.tables.write().await;
        if t.group_name_taken(name, None) {
            return Err(duplicate("name"));
        }

        t.last_group_id += 1;
        let group = Group {
            id: t.last_group_id,
            name: name.to_string(),
        };
        t.groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, AppError> {
        Ok(self.tables.read().await.groups.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .groups
            .values()
            .find(|g| g.name == name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Group>, AppError> {
        Ok(self.tables.read().await.groups.values().cloned().collect())
    }

    async fn update(&self, id: i64, name: &str) -> Result<Option<Group>, AppError> {
        let mut t = self.tables.write().await;
        if !t.groups.contains_key(&id) {
            return Ok(None);
        }
        if t.group_name_taken(name, Some(id)) {
            return Err(duplicate("name"));
        }

        Ok(t.groups.get_mut(&id).map(|group| {
            group.name = name.to_string();
            group.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        if t.groups.remove(&id).is_none() {
            return Ok(false);
        }
        for user in t.users.values_mut() {
            user.groups.retain(|g| *g != id);
        }
        Ok(true)
    }
}

#[async_trait]
impl TokenRepository for MemoryStore {
    async fn create_token(&self, user_id: i64, token_hash: &str) -> Result<ApiToken, AppError> {
        let mut t = self.tables.write().await;
        if !t.users.contains_key(&user_id) {
            return Err(AppError::not_found(
                "User not found",
                serde_json::json!({ "id": user_id }),
            ));
        }

        t.last_token_id += 1;
        let token = ApiToken {
            id: t.last_token_id,
            user_id,
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        t.tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_active(&self, token_hash: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .tokens
            .values()
            .find(|t| t.token_hash == token_hash && !t.is_revoked())
            .cloned())
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut t = self.tables.write().await;
        if let Some(token) = t
            .tokens
            .values_mut()
            .find(|t| t.token_hash == token_hash && !t.is_revoked())
        {
            token.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        Ok(self.tables.read().await.tokens.values().rev().cloned().collect())
    }

    async fn revoke_token(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        match t.tokens.get_mut(&id) {
            Some(token) if !token.is_revoked() => {
                token.revoked_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
