//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{User, UserFields};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

const USER_COLUMNS: &str = "id, username, password_hash, first_name, last_name, email, \
     is_staff, is_active, is_superuser, last_login, date_joined";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    email: String,
    is_staff: bool,
    is_active: bool,
    is_superuser: bool,
    last_login: Option<DateTime<Utc>>,
    date_joined: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, groups: Vec<i64>) -> User {
        User {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            is_staff: self.is_staff,
            is_active: self.is_active,
            is_superuser: self.is_superuser,
            last_login: self.last_login,
            date_joined: self.date_joined,
            groups,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MembershipRow {
    user_id: i64,
    group_id: i64,
}

/// PostgreSQL repository for user accounts.
///
/// Account rows and `auth_user_groups` memberships are written in one
/// transaction. Deleting a user cascades to memberships and tokens.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Loads memberships for a batch of users, keyed by user id.
    async fn memberships(&self, user_ids: &[i64]) -> Result<HashMap<i64, Vec<i64>>, AppError> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT user_id, group_id
            FROM auth_user_groups
            WHERE user_id = ANY($1)
            ORDER BY group_id
            "#,
        )
        .bind(user_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut map: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in rows {
            map.entry(row.user_id).or_default().push(row.group_id);
        }
        Ok(map)
    }

    async fn with_groups(&self, row: UserRow) -> Result<User, AppError> {
        let groups = self
            .memberships(&[row.id])
            .await?
            .remove(&row.id)
            .unwrap_or_default();
        Ok(row.into_user(groups))
    }

    async fn replace_memberships(
        tx: &mut Transaction<'_, Postgres>,
        user_id: i64,
        groups: &[i64],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM auth_user_groups WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut **tx)
            .await?;

        if !groups.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO auth_user_groups (user_id, group_id)
                SELECT $1, UNNEST($2::BIGINT[])
                "#,
            )
            .bind(user_id)
            .bind(groups)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, fields: UserFields) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO auth_user
                (username, password_hash, first_name, last_name, email,
                 is_staff, is_active, is_superuser)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&fields.username)
        .bind(&fields.password_hash)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.email)
        .bind(fields.is_staff)
        .bind(fields.is_active)
        .bind(fields.is_superuser)
        .fetch_one(&mut *tx)
        .await?;

        Self::replace_memberships(&mut tx, row.id, &fields.groups).await?;
        tx.commit().await?;

        Ok(row.into_user(fields.groups))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM auth_user WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row {
            Some(row) => Ok(Some(self.with_groups(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM auth_user WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row {
            Some(row) => Ok(Some(self.with_groups(row).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM auth_user ORDER BY date_joined DESC, id DESC"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut memberships = self.memberships(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let groups = memberships.remove(&row.id).unwrap_or_default();
                row.into_user(groups)
            })
            .collect())
    }

    async fn update(&self, id: i64, fields: UserFields) -> Result<Option<User>, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE auth_user SET
                username      = $2,
                password_hash = $3,
                first_name    = $4,
                last_name     = $5,
                email         = $6,
                is_staff      = $7,
                is_active     = $8,
                is_superuser  = $9
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&fields.username)
        .bind(&fields.password_hash)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.email)
        .bind(fields.is_staff)
        .bind(fields.is_active)
        .bind(fields.is_superuser)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        Self::replace_memberships(&mut tx, id, &fields.groups).await?;
        tx.commit().await?;

        Ok(Some(row.into_user(fields.groups)))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM auth_user WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_login(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE auth_user SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
