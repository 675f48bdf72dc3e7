use crate::auth::jwt::{get_bearer_token, JwtService};
use crate::auth::models::AuthUser;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Reject requests without a valid bearer token before the body is read.
pub async fn auth_middleware(
    State(jwt): State<Arc<JwtService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let user_id = match get_bearer_token(request.headers())
        .and_then(|token| jwt.validate_token(token))
    {
        Ok(user_id) => user_id,
        Err(err) => {
            tracing::debug!(
                path = %request.uri().path(),
                error = %err,
                "Authentication failed"
            );
            return HttpAppError(err).into_response();
        }
    };

    request.extensions_mut().insert(AuthUser { user_id });
    next.run(request).await
}
