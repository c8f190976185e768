use axum::{extract::State, http::StatusCode, routing::post, Form, Json, Router};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    db::models::NewUser,
    error::{AppError, Result},
    middleware::auth::AuthUser,
    routes::{FormBody, JsonBody},
    services::password::{hash_password, verify_password},
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub phone: String,
    pub password: String,
    pub name: String,
    pub city: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

async fn signup(
    State(state): State<AppState>,
    WithRejection(Json(body), _): JsonBody<SignupRequest>,
) -> Result<StatusCode> {
    if body.username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }
    if body.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    if state.db.get_user_by_username(&body.username).await?.is_some() {
        return Err(AppError::Conflict("Username is already taken".to_string()));
    }

    let password = hash_password(body.password).await?;
    let user = state
        .db
        .create_user(&NewUser {
            username: body.username,
            phone: body.phone,
            password,
            name: body.name,
            city: body.city,
        })
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "user registered");
    Ok(StatusCode::OK)
}

async fn login(
    State(state): State<AppState>,
    WithRejection(Form(form), _): FormBody<LoginForm>,
) -> Result<Json<TokenResponse>> {
    let user = state
        .db
        .get_user_by_username(&form.username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !verify_password(form.password, user.password).await? {
        tracing::info!(username = %user.username, "rejected login");
        return Err(AppError::Unauthorized("Incorrect password".to_string()));
    }

    let access_token = state.tokens.issue(&user.username)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

async fn logout(State(state): State<AppState>, auth: AuthUser) -> Result<StatusCode> {
    state
        .db
        .revoke_token(&auth.token_id, auth.expires_at, Utc::now().timestamp())
        .await?;

    tracing::info!(user_id = auth.id(), "token revoked");
    Ok(StatusCode::OK)
}
