use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiaryEntry {
    pub id: i64,
    pub user_id: i64,
    pub entry_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiaryLine {
    pub id: i64,
    pub diary_id: i64,
    pub line_order: i64,
    pub language: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DiaryEntry {
    /// Create an entry for `user_id`. Returns `None` when the user does not exist,
    /// in which case nothing is written.
    pub async fn create_for_user(
        db: &SqlitePool,
        user_id: i64,
    ) -> anyhow::Result<Option<DiaryEntry>> {
        let mut tx = db.begin().await.context("begin tx")?;

        let owner: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await
            .context("look up entry owner")?;
        if owner.is_none() {
            return Ok(None);
        }

        let entry = sqlx::query_as::<_, DiaryEntry>(
            r#"
            INSERT INTO diary_entries (user_id)
            VALUES (?)
            RETURNING id, user_id, entry_date, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .context("insert diary entry")?;

        tx.commit().await.context("commit tx")?;
        Ok(Some(entry))
    }
}

impl DiaryLine {
    /// Append a line. `diary_id` is not checked against existing entries and
    /// duplicate `(line_order, language)` pairs are allowed.
    pub async fn create(
        db: &SqlitePool,
        diary_id: i64,
        line_order: i64,
        language: &str,
        content: &str,
    ) -> anyhow::Result<DiaryLine> {
        let line = sqlx::query_as::<_, DiaryLine>(
            r#"
            INSERT INTO diary_lines (diary_id, line_order, language, content)
            VALUES (?, ?, ?, ?)
            RETURNING id, diary_id, line_order, language, content, created_at, updated_at
            "#,
        )
        .bind(diary_id)
        .bind(line_order)
        .bind(language)
        .bind(content)
        .fetch_one(db)
        .await
        .context("insert diary line")?;
        Ok(line)
    }

    pub async fn list_by_diary(db: &SqlitePool, diary_id: i64) -> anyhow::Result<Vec<DiaryLine>> {
        let rows = sqlx::query_as::<_, DiaryLine>(
            r#"
            SELECT id, diary_id, line_order, language, content, created_at, updated_at
              FROM diary_lines
             WHERE diary_id = ?
             ORDER BY line_order ASC, language ASC
            "#,
        )
        .bind(diary_id)
        .fetch_all(db)
        .await
        .context("list diary lines")?;
        Ok(rows)
    }

    /// Replace the content of the line identified by both `line_id` and `diary_id`.
    /// Order, language and timestamps are left as they are.
    pub async fn update_content(
        db: &SqlitePool,
        diary_id: i64,
        line_id: i64,
        content: &str,
    ) -> anyhow::Result<Option<DiaryLine>> {
        let line = sqlx::query_as::<_, DiaryLine>(
            r#"
            UPDATE diary_lines
               SET content = ?
             WHERE id = ? AND diary_id = ?
            RETURNING id, diary_id, line_order, language, content, created_at, updated_at
            "#,
        )
        .bind(content)
        .bind(line_id)
        .bind(diary_id)
        .fetch_optional(db)
        .await
        .context("update diary line")?;
        Ok(line)
    }
}
