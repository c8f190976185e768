use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub city: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub phone: String,
    /// Argon2 PHC string, never the plaintext.
    pub password: String,
    pub name: String,
    pub city: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Ad {
    pub id: i64,
    #[serde(rename = "type")]
    pub ad_type: String,
    pub price: i64,
    pub address: String,
    pub area: f64,
    pub rooms_count: i64,
    pub description: String,
    #[serde(rename = "user_id")]
    pub owner_id: i64,
}

/// The mutable part of an ad. Updates replace every field at once.
#[derive(Debug, Clone, Deserialize)]
pub struct AdFields {
    #[serde(rename = "type")]
    pub ad_type: String,
    pub price: i64,
    pub address: String,
    pub area: f64,
    pub rooms_count: i64,
    pub description: String,
}

/// Conjunctive search filter; `None` leaves a dimension unconstrained.
#[derive(Debug, Clone, Default)]
pub struct AdFilter {
    pub ad_type: Option<String>,
    pub rooms_count: Option<i64>,
    pub price_from: Option<i64>,
    pub price_until: Option<i64>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub edited: bool,
    #[serde(rename = "author_id")]
    pub owner_id: i64,
    #[serde(skip_serializing)]
    pub ad_id: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FavoriteAd {
    #[serde(rename = "_id")]
    pub id: i64,
    pub address: String,
}
