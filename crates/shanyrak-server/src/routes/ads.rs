use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::{
    db::{
        models::{Ad, AdFields, AdFilter},
        Database,
    },
    error::{AppError, Result},
    middleware::auth::AuthUser,
    routes::{JsonBody, PathParams, QueryParams},
    AppState,
};

const MAX_PAGE_SIZE: i64 = 100;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_ads).post(create_ad))
        .route(
            "/:id",
            get(get_ad).patch(update_ad).delete(delete_ad),
        )
}

#[derive(Debug, Deserialize)]
pub struct AdSearchQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(rename = "type")]
    pub ad_type: Option<String>,
    pub rooms_count: Option<i64>,
    pub price_from: Option<i64>,
    pub price_until: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct AdDetailResponse {
    #[serde(flatten)]
    pub ad: Ad,
    pub total_comments: i64,
}

#[derive(Debug, Serialize)]
pub struct AdListResponse {
    pub total: i64,
    pub objects: Vec<Ad>,
}

fn validate_fields(fields: &AdFields) -> Result<()> {
    if fields.address.trim().is_empty() {
        return Err(AppError::Validation("Address is required".to_string()));
    }
    if fields.price < 0 {
        return Err(AppError::Validation("Price must not be negative".to_string()));
    }
    if !(fields.area.is_finite() && fields.area > 0.0) {
        return Err(AppError::Validation("Area must be positive".to_string()));
    }
    if fields.rooms_count < 0 {
        return Err(AppError::Validation(
            "Rooms count must not be negative".to_string(),
        ));
    }
    Ok(())
}

pub(crate) async fn load_ad(db: &Database, id: i64) -> Result<Ad> {
    db.get_ad_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Shanyrak not found".to_string()))
}

fn ensure_owner(ad: &Ad, auth: &AuthUser) -> Result<()> {
    if ad.owner_id != auth.id() {
        return Err(AppError::Forbidden(
            "Only the owner can modify this shanyrak".to_string(),
        ));
    }
    Ok(())
}

async fn create_ad(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Json(body), _): JsonBody<AdFields>,
) -> Result<Json<CreatedResponse>> {
    validate_fields(&body)?;

    if state.db.get_ad_by_address(&body.address).await?.is_some() {
        return Err(AppError::Conflict("Address is already taken".to_string()));
    }

    let id = state.db.create_ad(auth.id(), &body).await?;
    tracing::info!(ad_id = id, owner_id = auth.id(), "shanyrak created");

    Ok(Json(CreatedResponse { id }))
}

async fn get_ad(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PathParams<i64>,
) -> Result<Json<AdDetailResponse>> {
    let ad = load_ad(&state.db, id).await?;
    let total_comments = state.db.count_comments(ad.id).await?;

    Ok(Json(AdDetailResponse { ad, total_comments }))
}

async fn update_ad(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(id), _): PathParams<i64>,
    WithRejection(Json(body), _): JsonBody<AdFields>,
) -> Result<StatusCode> {
    let ad = load_ad(&state.db, id).await?;
    ensure_owner(&ad, &auth)?;
    validate_fields(&body)?;

    if body.address != ad.address {
        if let Some(other) = state.db.get_ad_by_address(&body.address).await? {
            if other.id != ad.id {
                return Err(AppError::Conflict("Address is already taken".to_string()));
            }
        }
    }

    state.db.update_ad(id, &body).await?;
    Ok(StatusCode::OK)
}

async fn delete_ad(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(id), _): PathParams<i64>,
) -> Result<StatusCode> {
    let ad = load_ad(&state.db, id).await?;
    ensure_owner(&ad, &auth)?;

    state.db.delete_ad(id).await?;
    tracing::info!(ad_id = id, "shanyrak deleted");
    Ok(StatusCode::OK)
}

async fn search_ads(
    State(state): State<AppState>,
    WithRejection(Query(query), _): QueryParams<AdSearchQuery>,
) -> Result<Json<AdListResponse>> {
    if let (Some(from), Some(until)) = (query.price_from, query.price_until) {
        if from > until {
            return Err(AppError::Validation(
                "price_from must not exceed price_until".to_string(),
            ));
        }
    }

    let limit = query.limit.unwrap_or(MAX_PAGE_SIZE).clamp(0, MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0).max(0);
    let filter = AdFilter {
        ad_type: query.ad_type,
        rooms_count: query.rooms_count,
        price_from: query.price_from,
        price_until: query.price_until,
    };

    let (total, objects) = state.db.list_ads(&filter, limit, offset).await?;
    Ok(Json(AdListResponse { total, objects }))
}
