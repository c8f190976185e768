pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use config::Config;
use db::Database;
use services::token::TokenCodec;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
    pub tokens: TokenCodec,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        let tokens = TokenCodec::new(
            &config.jwt_secret,
            chrono::Duration::minutes(
                config
                    .token_ttl_minutes
                    .clamp(1, crate::config::MAX_TOKEN_TTL_MINUTES),
            ),
        );
        Self { db, config, tokens }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest(
            "/auth/users",
            routes::auth::router()
                .merge(routes::users::router())
                .merge(routes::favorites::router()),
        )
        .nest(
            "/shanyraks",
            routes::ads::router().merge(routes::comments::router()),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn health_check() -> &'static str {
    "OK"
}
