//! Shared application state handed to every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, GroupService, TodoService, UserService};
use crate::domain::repositories::{
    GroupRepository, TodoRepository, TokenRepository, UserRepository,
};
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::persistence::{
    PgGroupRepository, PgTodoRepository, PgTokenRepository, PgUserRepository,
};
use crate::utils::resource_url::ResourceLinks;

pub type DynTodoService = TodoService<dyn TodoRepository>;
pub type DynUserService = UserService<dyn UserRepository, dyn GroupRepository>;
pub type DynGroupService = GroupService<dyn GroupRepository>;
pub type DynAuthService = AuthService<dyn TokenRepository, dyn UserRepository>;

/// Services and link builder shared across requests.
///
/// Services are held behind trait objects so the same router serves
/// PostgreSQL and in-memory storage.
#[derive(Clone)]
pub struct AppState {
    pub todo_service: Arc<DynTodoService>,
    pub user_service: Arc<DynUserService>,
    pub group_service: Arc<DynGroupService>,
    pub auth_service: Arc<DynAuthService>,
    pub links: Arc<ResourceLinks>,
}

impl AppState {
    /// Wires services over the given repositories.
    pub fn from_repositories(
        todos: Arc<dyn TodoRepository>,
        users: Arc<dyn UserRepository>,
        groups: Arc<dyn GroupRepository>,
        tokens: Arc<dyn TokenRepository>,
        base_url: &str,
        token_signing_secret: String,
    ) -> Self {
        Self {
            todo_service: Arc::new(TodoService::new(todos)),
            user_service: Arc::new(UserService::new(users.clone(), groups.clone())),
            group_service: Arc::new(GroupService::new(groups)),
            auth_service: Arc::new(AuthService::new(tokens, users, token_signing_secret)),
            links: Arc::new(ResourceLinks::new(base_url)),
        }
    }

    /// State backed by PostgreSQL.
    pub fn postgres(pool: Arc<PgPool>, base_url: &str, token_signing_secret: String) -> Self {
        Self::from_repositories(
            Arc::new(PgTodoRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgGroupRepository::new(pool.clone())),
            Arc::new(PgTokenRepository::new(pool)),
            base_url,
            token_signing_secret,
        )
    }

    /// State backed by a fresh [`MemoryStore`].
    ///
    /// Returns the store as well so callers can seed it directly.
    pub fn in_memory(base_url: &str, token_signing_secret: String) -> (Self, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());

        let state = Self::from_repositories(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            base_url,
            token_signing_secret,
        );

        (state, store)
    }
}
