use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header, request::Parts},
};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::{warn, Span};

/// Present only on requests carrying a valid admin bearer token.
pub struct AdminUser;

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts.headers.get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .ok_or(AppError::Unauthorized)?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        if !app_state.admin_auth.is_authorized(token) {
            warn!("Rejected admin request with invalid token");
            return Err(AppError::Unauthorized);
        }

        Span::current().record("admin", true);
        Ok(AdminUser)
    }
}
