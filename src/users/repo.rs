use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    /// All users, in no particular order.
    pub async fn list(db: &SqlitePool) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            "#,
        )
        .fetch_all(db)
        .await
        .context("list users")?;
        Ok(users)
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    /// Email is not unique; the lowest id wins.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = ?
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    /// Insert a user. The password hash is stored as given.
    pub async fn create(
        db: &SqlitePool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES (?, ?, ?)
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .context("insert user")?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn create_assigns_fresh_ids_and_echoes_fields() {
        let db = test_pool().await;
        let a = User::create(&db, "alice", "alice@example.com", "x").await.unwrap();
        let b = User::create(&db, "bob", "bob@example.com", "y").await.unwrap();

        assert_eq!(a.username, "alice");
        assert_eq!(a.email, "alice@example.com");
        assert_eq!(a.password_hash, "x");
        assert_eq!(a.created_at, "");
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn find_by_id_round_trips_every_user() {
        let db = test_pool().await;
        let mut created = Vec::new();
        for i in 0..3 {
            let name = format!("user{i}");
            let email = format!("user{i}@example.com");
            created.push(User::create(&db, &name, &email, "h").await.unwrap());
        }

        for user in &created {
            let found = User::find_by_id(&db, user.id).await.unwrap().unwrap();
            assert_eq!(found.username, user.username);
            assert_eq!(found.email, user.email);
        }

        let max_id = created.iter().map(|u| u.id).max().unwrap();
        assert!(User::find_by_id(&db, max_id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_emails_are_accepted_and_first_wins() {
        let db = test_pool().await;
        let first = User::create(&db, "one", "same@example.com", "h").await.unwrap();
        User::create(&db, "two", "same@example.com", "h").await.unwrap();

        let found = User::find_by_email(&db, "same@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert!(User::find_by_email(&db, "missing@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_returns_all_users() {
        let db = test_pool().await;
        assert!(User::list(&db).await.unwrap().is_empty());
        User::create(&db, "a", "a@example.com", "h").await.unwrap();
        User::create(&db, "b", "b@example.com", "h").await.unwrap();
        assert_eq!(User::list(&db).await.unwrap().len(), 2);
    }
}
