use axum::{async_trait, extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{db::models::User, error::AppError, AppState};

/// The acting user behind a verified, unrevoked bearer token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user: User,
    pub token_id: String,
    pub expires_at: i64,
}

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.user.id
    }
}

fn unauthorized() -> AppError {
    AppError::Unauthorized("Could not validate credentials".to_string())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::Unauthorized("Not authenticated".to_string()))?;

        let claims = state.tokens.verify(bearer.token())?;

        if state.db.is_token_revoked(&claims.jti).await? {
            tracing::debug!(jti = %claims.jti, "revoked token presented");
            return Err(unauthorized());
        }

        // The account behind a still-valid token is gone only if the
        // database was reset.
        let user = state
            .db
            .get_user_by_username(&claims.sub)
            .await?
            .ok_or_else(unauthorized)?;

        Ok(AuthUser {
            user,
            token_id: claims.jti,
            expires_at: claims.exp,
        })
    }
}
