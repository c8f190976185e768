use chrono::Utc;

use super::{models::Comment, Database};
use crate::error::Result;

const COMMENT_COLUMNS: &str = "id, content, created_at, edited, owner_id, ad_id";

impl Database {
    pub async fn create_comment(&self, ad_id: i64, owner_id: i64, content: &str) -> Result<Comment> {
        let created_at = Utc::now();

        let id = sqlx::query(
            "INSERT INTO comments (content, created_at, edited, owner_id, ad_id) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(content)
        .bind(created_at)
        .bind(false)
        .bind(owner_id)
        .bind(ad_id)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(Comment {
            id,
            content: content.to_string(),
            created_at,
            edited: false,
            owner_id,
            ad_id,
        })
    }

    pub async fn get_comment_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comment)
    }

    pub async fn get_comments_by_ad_id(&self, ad_id: i64) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE ad_id = ? ORDER BY id"
        ))
        .bind(ad_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    pub async fn get_comment_by_content(&self, ad_id: i64, content: &str) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE ad_id = ? AND content = ? LIMIT 1"
        ))
        .bind(ad_id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comment)
    }

    pub async fn list_comments(&self, limit: i64, offset: i64) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    /// Replaces the content. Any update marks the comment as edited.
    pub async fn update_comment(&self, id: i64, content: &str) -> Result<()> {
        sqlx::query("UPDATE comments SET content = ?, edited = 1 WHERE id = ?")
            .bind(content)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete_comment(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
