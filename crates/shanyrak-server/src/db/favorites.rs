use super::{models::FavoriteAd, Database};
use crate::error::Result;

impl Database {
    /// Adding a pair that already exists is a no-op.
    pub async fn add_favorite(&self, user_id: i64, ad_id: i64) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO favorites (user_id, ad_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(ad_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list_favorites(&self, user_id: i64) -> Result<Vec<FavoriteAd>> {
        let favorites = sqlx::query_as::<_, FavoriteAd>(
            r#"
            SELECT a.id, a.address
            FROM favorites f
            JOIN advertisements a ON a.id = f.ad_id
            WHERE f.user_id = ?
            ORDER BY a.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(favorites)
    }

    /// Returns `false` when the user had no such favorite.
    pub async fn remove_favorite(&self, user_id: i64, ad_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND ad_id = ?")
            .bind(user_id)
            .bind(ad_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
