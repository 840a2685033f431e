//! PostgreSQL implementation of the group repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Group;
use crate::domain::repositories::GroupRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct GroupRow {
    id: i64,
    name: String,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Group {
            id: row.id,
            name: row.name,
        }
    }
}

/// PostgreSQL repository for groups.
///
/// Memberships are removed by the `ON DELETE CASCADE` on `auth_user_groups`.
pub struct PgGroupRepository {
    pool: Arc<PgPool>,
}

impl PgGroupRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn create(&self, name: &str) -> Result<Group, AppError> {
        let row = sqlx::query_as::<_, GroupRow>(
            "INSERT INTO auth_group (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, AppError> {
        let row = sqlx::query_as::<_, GroupRow>("SELECT id, name FROM auth_group WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Group::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, AppError> {
        let row =
            sqlx::query_as::<_, GroupRow>("SELECT id, name FROM auth_group WHERE name = $1")
                .bind(name)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Group::from))
    }

    async fn list(&self) -> Result<Vec<Group>, AppError> {
        let rows = sqlx::query_as::<_, GroupRow>("SELECT id, name FROM auth_group ORDER BY id")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Group::from).collect())
    }

    async fn update(&self, id: i64, name: &str) -> Result<Option<Group>, AppError> {
        let row = sqlx::query_as::<_, GroupRow>(
            "UPDATE auth_group SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Group::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM auth_group WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
