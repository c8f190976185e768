use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::{
    db::models::{Ad, Comment},
    error::{AppError, Result},
    middleware::auth::AuthUser,
    routes::{ads::load_ad, JsonBody, PathParams},
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/:id/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/:id/comments/:comment_id",
            patch(update_comment).delete(delete_comment),
        )
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CommentsListResponse {
    pub comments: Vec<Comment>,
}

fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(AppError::Validation(
            "Comment content is required".to_string(),
        ));
    }
    Ok(())
}

async fn load_comment(state: &AppState, ad_id: i64, comment_id: i64) -> Result<(Ad, Comment)> {
    let ad = load_ad(&state.db, ad_id).await?;
    let comment = state
        .db
        .get_comment_by_id(comment_id)
        .await?
        .filter(|c| c.ad_id == ad.id)
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;
    Ok((ad, comment))
}

async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(id), _): PathParams<i64>,
    WithRejection(Json(body), _): JsonBody<CommentRequest>,
) -> Result<StatusCode> {
    validate_content(&body.content)?;
    let ad = load_ad(&state.db, id).await?;

    if state
        .db
        .get_comment_by_content(ad.id, &body.content)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "The same comment already exists on this shanyrak".to_string(),
        ));
    }

    let comment = state
        .db
        .create_comment(ad.id, auth.id(), &body.content)
        .await?;
    tracing::info!(comment_id = comment.id, ad_id = ad.id, "comment created");
    Ok(StatusCode::OK)
}

async fn list_comments(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PathParams<i64>,
) -> Result<Json<CommentsListResponse>> {
    let ad = load_ad(&state.db, id).await?;
    let comments = state.db.get_comments_by_ad_id(ad.id).await?;
    Ok(Json(CommentsListResponse { comments }))
}

async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path((id, comment_id)), _): PathParams<(i64, i64)>,
    WithRejection(Json(body), _): JsonBody<CommentRequest>,
) -> Result<StatusCode> {
    let (ad, comment) = load_comment(&state, id, comment_id).await?;

    if comment.owner_id != auth.id() {
        return Err(AppError::Forbidden(
            "Only the author can edit this comment".to_string(),
        ));
    }
    validate_content(&body.content)?;

    if let Some(other) = state.db.get_comment_by_content(ad.id, &body.content).await? {
        if other.id != comment.id {
            return Err(AppError::Conflict(
                "The same comment already exists on this shanyrak".to_string(),
            ));
        }
    }

    state.db.update_comment(comment.id, &body.content).await?;
    Ok(StatusCode::OK)
}

async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path((id, comment_id)), _): PathParams<(i64, i64)>,
) -> Result<StatusCode> {
    let (ad, comment) = load_comment(&state, id, comment_id).await?;

    // Only author or ad owner can delete
    if comment.owner_id != auth.id() && ad.owner_id != auth.id() {
        return Err(AppError::Forbidden(
            "Cannot delete this comment".to_string(),
        ));
    }

    state.db.delete_comment(comment.id).await?;
    Ok(StatusCode::OK)
}
