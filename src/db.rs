use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;

use crate::config::AppConfig;

const CREATE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        username      TEXT NOT NULL,
        email         TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        created_at    TEXT NOT NULL DEFAULT '',
        updated_at    TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS diary_entries (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id    INTEGER NOT NULL,
        entry_date TEXT,
        created_at TEXT NOT NULL DEFAULT '',
        updated_at TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS diary_lines (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        diary_id   INTEGER NOT NULL,
        line_order INTEGER NOT NULL,
        language   TEXT NOT NULL,
        content    TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT '',
        updated_at TEXT NOT NULL DEFAULT ''
    )
    "#,
];

#[cfg(test)]
const DROP_TABLES: &[&str] = &[
    "DROP TABLE IF EXISTS diary_lines",
    "DROP TABLE IF EXISTS diary_entries",
    "DROP TABLE IF EXISTS users",
];

pub async fn connect(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let mut options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("parse database url {}", config.database_url))?
        .create_if_missing(true);
    if !config.db_echo {
        options = options.disable_statement_logging();
    }

    let mut pool_options = SqlitePoolOptions::new().max_connections(config.db_max_connections);
    // An in-memory database lives exactly as long as its single connection.
    if config.is_in_memory() {
        pool_options = pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    pool_options
        .connect_with(options)
        .await
        .context("connect to database")
}

/// Create every table that does not exist yet.
pub async fn create_schema(db: &SqlitePool) -> anyhow::Result<()> {
    for stmt in CREATE_TABLES {
        sqlx::query(*stmt)
            .execute(db)
            .await
            .context("create schema")?;
    }
    Ok(())
}

#[cfg(test)]
pub async fn drop_schema(db: &SqlitePool) -> anyhow::Result<()> {
    for stmt in DROP_TABLES {
        sqlx::query(*stmt)
            .execute(db)
            .await
            .context("drop schema")?;
    }
    Ok(())
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = connect(&AppConfig::in_memory())
        .await
        .expect("in-memory pool");
    create_schema(&pool).await.expect("schema");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_count(db: &SqlitePool) -> i64 {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' \
             AND name IN ('users', 'diary_entries', 'diary_lines')",
        )
        .fetch_one(db)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn create_schema_is_idempotent() {
        let db = test_pool().await;
        create_schema(&db).await.unwrap();
        assert_eq!(table_count(&db).await, 3);
    }

    #[tokio::test]
    async fn drop_schema_removes_all_tables() {
        let db = test_pool().await;
        drop_schema(&db).await.unwrap();
        assert_eq!(table_count(&db).await, 0);
    }

    #[tokio::test]
    async fn in_memory_pools_are_isolated() {
        let a = test_pool().await;
        let b = test_pool().await;
        sqlx::query("INSERT INTO users (username, email, password_hash) VALUES ('a', 'a@x', 'h')")
            .execute(&a)
            .await
            .unwrap();
        let in_b: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&b)
            .await
            .unwrap();
        assert_eq!(in_b, 0);
    }
}
