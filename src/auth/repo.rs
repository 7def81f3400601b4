use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::debug;

use crate::auth::repo_types::{InsertOutcome, NewUser, User};
use crate::config::DatabaseConfig;

/// Credential store used by the auth handlers.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by (normalized) email.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    /// Insert a new user; a taken email is reported, not raised.
    async fn create(&self, new_user: &NewUser) -> anyhow::Result<InsertOutcome>;

    /// Round-trip to the backing store.
    async fn ping(&self) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .context("connect to database")?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, display_name, role, active, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("select user by email")?;
        Ok(user)
    }

    async fn create(&self, new_user: &NewUser) -> anyhow::Result<InsertOutcome> {
        let res = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, display_name)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, display_name, role, active, created_at
            "#,
        )
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.display_name)
        .fetch_one(&self.pool)
        .await;

        match res {
            Ok(user) => Ok(InsertOutcome::Created(user)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                debug!(email = %new_user.email, "insert hit unique email constraint");
                Ok(InsertOutcome::EmailTaken)
            }
            Err(e) => Err(anyhow::Error::new(e).context("insert user")),
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("ping database")?;
        anyhow::ensure!(one == 1, "unexpected ping result {one}");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryUserStore;
