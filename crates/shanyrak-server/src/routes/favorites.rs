use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;

use crate::{
    db::models::FavoriteAd,
    error::{AppError, Result},
    middleware::auth::AuthUser,
    routes::{ads::load_ad, PathParams},
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favorites/shanyraks", get(list_favorites))
        .route(
            "/favorites/shanyraks/:id",
            post(add_favorite).delete(remove_favorite),
        )
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub shanyraks: Vec<FavoriteAd>,
}

async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(id), _): PathParams<i64>,
) -> Result<StatusCode> {
    let ad = load_ad(&state.db, id).await?;
    state.db.add_favorite(auth.id(), ad.id).await?;
    Ok(StatusCode::OK)
}

async fn list_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<FavoritesResponse>> {
    let shanyraks = state.db.list_favorites(auth.id()).await?;
    Ok(Json(FavoritesResponse { shanyraks }))
}

async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(id), _): PathParams<i64>,
) -> Result<StatusCode> {
    if !state.db.remove_favorite(auth.id(), id).await? {
        return Err(AppError::NotFound(
            "Shanyrak is not in favorites".to_string(),
        ));
    }
    Ok(StatusCode::OK)
}
