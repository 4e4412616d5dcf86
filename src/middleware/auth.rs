use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Claims};
use crate::error::ApiError;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub username: String,
    pub is_admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.username,
            is_admin: claims.is_admin,
        }
    }
}

/// Decode a bearer token when one is present and store the user in request
/// extensions. A missing or invalid token is not an error here; the route
/// guards decide what anonymous callers may do.
pub async fn authenticate_jwt(headers: HeaderMap, mut request: Request, next: Next) -> Response {
    if let Some(token) = extract_bearer_token(&headers) {
        match auth::decode_jwt(token) {
            Ok(claims) => {
                let user = AuthUser::from(claims);
                tracing::debug!("Authenticated {} (admin: {})", user.username, user.is_admin);
                request.extensions_mut().insert(user);
            }
            Err(e) => tracing::debug!("Ignoring bearer token: {}", e),
        }
    }

    next.run(request).await
}

/// Reject callers that are not logged in as an admin
pub async fn ensure_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    match request.extensions().get::<AuthUser>() {
        None => Err(ApiError::unauthorized("Authentication required")),
        Some(user) if !user.is_admin => {
            tracing::warn!("Admin route denied for user '{}'", user.username);
            Err(ApiError::forbidden("Admin access required"))
        }
        Some(_) => Ok(next.run(request).await),
    }
}

/// Extract JWT token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
