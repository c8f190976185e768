pub mod ads;
pub mod auth;
pub mod comments;
pub mod favorites;
pub mod users;

use axum::{
    extract::{Path, Query},
    Form, Json,
};
use axum_extra::extract::WithRejection;

use crate::error::AppError;

// Extractors whose rejections render through `AppError`.
pub type JsonBody<T> = WithRejection<Json<T>, AppError>;
pub type FormBody<T> = WithRejection<Form<T>, AppError>;
pub type QueryParams<T> = WithRejection<Query<T>, AppError>;
pub type PathParams<T> = WithRejection<Path<T>, AppError>;
