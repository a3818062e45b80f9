use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use crate::config::RetryPolicy;
use crate::error::StartupError;
use crate::models::{NewPlayer, Player};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("player {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Everything the handlers need from persistence.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// All players, ordered by id ascending.
    async fn all(&self) -> Result<Vec<Player>, StoreError>;

    /// Stores a player and returns it with the id the store assigned.
    async fn insert(&self, player: &NewPlayer) -> Result<Player, StoreError>;

    async fn find(&self, id: i64) -> Result<Player, StoreError>;

    async fn delete(&self, player: &Player) -> Result<(), StoreError>;
}

// Connection and schema

/// Opens the pool, retrying with a fixed pause until the policy runs out.
pub async fn connect(url: &str, policy: RetryPolicy) -> Result<SqlitePool, StartupError> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;

    loop {
        match SqlitePool::connect(url).await {
            Ok(pool) => {
                tracing::info!(attempt, "Connected to the database");
                return Ok(pool);
            }
            Err(err) if attempt < attempts => {
                tracing::warn!(attempt, error = %err, "Failed to connect to the database");
                tokio::time::sleep(policy.interval).await;
                attempt += 1;
            }
            Err(err) => {
                tracing::warn!(attempt, error = %err, "Failed to connect to the database, giving up");
                return Err(StartupError::Connection(err));
            }
        }
    }
}

/// Creates the players table if it does not exist yet.
pub async fn sync_schema(pool: &SqlitePool) -> Result<(), StartupError> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS players (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               name TEXT NOT NULL CHECK (length(name) > 0)
           )"#
    )
    .execute(pool)
    .await
    .map_err(StartupError::Schema)?;

    tracing::info!("Database schema synchronized");
    Ok(())
}

// Player queries

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PlayerStore for SqliteStore {
    async fn all(&self) -> Result<Vec<Player>, StoreError> {
        let players = sqlx::query_as::<_, Player>(
            r#"SELECT id, name FROM players ORDER BY id"#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }

    async fn insert(&self, player: &NewPlayer) -> Result<Player, StoreError> {
        let stored = sqlx::query_as::<_, Player>(
            r#"INSERT INTO players (name) VALUES (?) RETURNING id, name"#
        )
        .bind(player.name())
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn find(&self, id: i64) -> Result<Player, StoreError> {
        sqlx::query_as::<_, Player>(
            r#"SELECT id, name FROM players WHERE id = ?"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, player: &Player) -> Result<(), StoreError> {
        let result = sqlx::query(r#"DELETE FROM players WHERE id = ?"#)
            .bind(player.id)
            .execute(&self.pool)
            .await?;

        // Someone else removed it between the lookup and now.
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(player.id));
        }

        Ok(())
    }
}
