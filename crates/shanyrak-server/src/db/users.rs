use super::{
    models::{NewUser, User},
    Database,
};
use crate::error::{AppError, Result};

const USER_COLUMNS: &str = "id, username, phone, password, name, city";

impl Database {
    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        let id = sqlx::query(
            "INSERT INTO users (username, phone, password, name, city) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.phone)
        .bind(&user.password)
        .bind(&user.name)
        .bind(&user.city)
        .execute(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("Username is already taken".to_string()),
            other => other,
        })?
        .last_insert_rowid();

        Ok(User {
            id,
            username: user.username.clone(),
            phone: user.phone.clone(),
            password: user.password.clone(),
            name: user.name.clone(),
            city: user.city.clone(),
        })
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Looks a user up by the stored credential string. Stored credentials
    /// are salted hashes, so this only matches an exact PHC string.
    pub async fn get_user_by_password(&self, password_hash: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE password = ?"
        ))
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn update_user_profile(
        &self,
        id: i64,
        phone: &str,
        name: &str,
        city: &str,
    ) -> Result<()> {
        sqlx::query("UPDATE users SET phone = ?, name = ?, city = ? WHERE id = ?")
            .bind(phone)
            .bind(name)
            .bind(city)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
