//! `SQLite` implementation of the directory storage engine.

use async_trait::async_trait;
use chrono::Utc;
use rd_model::Role;
use rd_storage::{DirectoryEngine, StorageError, StorageResult};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::entities::RoleRow;
use crate::error::from_sqlx_error;

/// `SQLite` directory storage engine.
#[derive(Debug, Clone)]
pub struct SqliteEngine {
    pool: SqlitePool,
}

impl SqliteEngine {
    /// Connects to the given database URL and applies the schema.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Unavailable` if the database cannot be
    /// reached.
    pub async fn connect(url: &str) -> StorageResult<Self> {
        tracing::debug!("connecting to role database: {url}");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(from_sqlx_error)?;

        let engine = Self { pool };
        engine.migrate().await?;
        Ok(engine)
    }

    /// Opens an in-memory database, for tests and ephemeral directories.
    ///
    /// The pool is capped at one connection: each `SQLite` in-memory
    /// connection is its own database.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Unavailable` if the database cannot be
    /// opened.
    pub async fn in_memory() -> StorageResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(from_sqlx_error)?;

        let engine = Self { pool };
        engine.migrate().await?;
        Ok(engine)
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(&self) -> StorageResult<()> {
        tracing::debug!("applying role database schema");

        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS roles (
                id TEXT PRIMARY KEY,
                application TEXT NOT NULL,
                name TEXT NOT NULL,
                name_key TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (application, name_key)
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS role_members (
                role_id TEXT NOT NULL,
                user_key TEXT NOT NULL,
                username TEXT NOT NULL,
                granted_at TEXT NOT NULL,
                PRIMARY KEY (role_id, user_key)
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        sqlx::query(
            r"CREATE INDEX IF NOT EXISTS idx_role_members_user ON role_members (user_key)",
        )
        .execute(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        Ok(())
    }

    /// Resolves a role's id by its normalized name.
    async fn role_id(&self, application: &str, name_key: &str) -> StorageResult<String> {
        let id: Option<String> =
            sqlx::query_scalar("SELECT id FROM roles WHERE application = ?1 AND name_key = ?2")
                .bind(application)
                .bind(name_key)
                .fetch_optional(&self.pool)
                .await
                .map_err(from_sqlx_error)?;

        id.ok_or_else(|| StorageError::not_found("Role", name_key))
    }
}

#[async_trait]
impl DirectoryEngine for SqliteEngine {
    async fn insert_role(&self, role: &Role) -> StorageResult<()> {
        let result = sqlx::query(
            r"INSERT INTO roles (id, application, name, name_key, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(role.id.to_string())
        .bind(&role.application)
        .bind(&role.name)
        .bind(role.name_key())
        .bind(role.created_at)
        .bind(role.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StorageError::duplicate("Role", role.name_key()))
            }
            Err(e) => Err(from_sqlx_error(e)),
        }
    }

    async fn delete_role(&self, application: &str, name_key: &str) -> StorageResult<()> {
        let role_id = self.role_id(application, name_key).await?;

        // Role and edges go in one transaction so no reader can observe
        // the role gone while its edges remain.
        let mut tx = self.pool.begin().await.map_err(from_sqlx_error)?;

        sqlx::query("DELETE FROM role_members WHERE role_id = ?1")
            .bind(&role_id)
            .execute(&mut *tx)
            .await
            .map_err(from_sqlx_error)?;

        sqlx::query("DELETE FROM roles WHERE id = ?1")
            .bind(&role_id)
            .execute(&mut *tx)
            .await
            .map_err(from_sqlx_error)?;

        tx.commit().await.map_err(from_sqlx_error)
    }

    async fn insert_member(
        &self,
        application: &str,
        name_key: &str,
        user: &str,
    ) -> StorageResult<()> {
        let role_id = self.role_id(application, name_key).await?;

        sqlx::query(
            r"INSERT OR IGNORE INTO role_members (role_id, user_key, username, granted_at)
            VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&role_id)
        .bind(rd_model::name_key(user))
        .bind(user)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        Ok(())
    }

    async fn remove_member(
        &self,
        application: &str,
        name_key: &str,
        user: &str,
    ) -> StorageResult<()> {
        let role_id = self.role_id(application, name_key).await?;

        sqlx::query("DELETE FROM role_members WHERE role_id = ?1 AND user_key = ?2")
            .bind(&role_id)
            .bind(rd_model::name_key(user))
            .execute(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        Ok(())
    }

    async fn list_roles(&self, application: &str) -> StorageResult<Vec<Role>> {
        let rows: Vec<RoleRow> = sqlx::query_as(
            r"SELECT id, application, name, created_at, updated_at
            FROM roles WHERE application = ?1 ORDER BY name_key",
        )
        .bind(application)
        .fetch_all(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        rows.into_iter().map(RoleRow::into_role).collect()
    }

    async fn list_members(&self, application: &str, name_key: &str) -> StorageResult<Vec<String>> {
        let role_id = self.role_id(application, name_key).await?;

        let members: Vec<String> = sqlx::query_scalar(
            "SELECT username FROM role_members WHERE role_id = ?1 ORDER BY user_key",
        )
        .bind(&role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        Ok(members)
    }
}
