use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::{
    db::models::User, error::Result, middleware::auth::AuthUser, routes::JsonBody, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(get_profile).patch(update_profile))
}

#[derive(Debug, Deserialize)]
pub struct ProfileEdit {
    pub phone: String,
    pub name: String,
    pub city: String,
}

async fn get_profile(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}

async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Json(body), _): JsonBody<ProfileEdit>,
) -> Result<StatusCode> {
    state
        .db
        .update_user_profile(auth.id(), &body.phone, &body.name, &body.city)
        .await?;
    Ok(StatusCode::OK)
}
