use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use skybook_domain::user::{User, UserRole};

use crate::state::AppState;

// ============================================================================
// JWT Claims
// ============================================================================

/// The token carries only the user id; role and profile are read from the
/// freshly loaded user row, so a role change takes effect on the next request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

// ============================================================================
// Bearer Authentication Middleware
// ============================================================================

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // 1. Extract token from Authorization header
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 2. Decode and validate JWT
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| StatusCode::UNAUTHORIZED)?;

    // 3. Resolve the user behind the token
    let user_id =
        Uuid::parse_str(&token_data.claims.sub).map_err(|_| StatusCode::UNAUTHORIZED)?;

    let user = state
        .users
        .find_by_id(user_id)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 4. Inject the user into request extensions
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

// ============================================================================
// Admin Gate
// ============================================================================

/// Layered after `require_auth`; expects the loaded user in extensions.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, StatusCode> {
    let user = req
        .extensions()
        .get::<User>()
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if user.role != UserRole::Admin {
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(req).await)
}
