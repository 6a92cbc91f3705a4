use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use skybook_domain::user::{self, NewUser, User};
use skybook_domain::DomainError;

use crate::error::AppError;
use crate::middleware::auth::Claims;
use crate::state::{AppState, AuthConfig};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignupRequest {
    name: String,
    mobile_number: String,
    password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    mobile_number: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    user: User,
    token: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
}

async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    user::validate_mobile_number(&req.mobile_number)?;
    user::validate_password(&req.password)?;

    if state
        .users
        .find_by_mobile_number(&req.mobile_number)
        .await?
        .is_some()
    {
        return Err(DomainError::MobileNumberTaken(req.mobile_number).into());
    }

    let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?;

    let created = state
        .users
        .create(NewUser {
            name: req.name,
            mobile_number: req.mobile_number,
            password_hash,
        })
        .await?;

    let token = issue_token(&state.auth, created.id)?;

    info!(user_id = %created.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: created,
            token,
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let found = state
        .users
        .find_by_mobile_number(&req.mobile_number)
        .await?
        .ok_or(DomainError::UserNotFound(req.mobile_number))?;

    let matches = bcrypt::verify(&req.password, &found.password_hash)
        .map_err(|e| anyhow::anyhow!("password verification failed: {e}"))?;

    if !matches {
        return Err(DomainError::InvalidCredentials.into());
    }

    let token = issue_token(&state.auth, found.id)?;

    Ok(Json(AuthResponse { user: found, token }))
}

pub(crate) fn issue_token(auth: &AuthConfig, user_id: Uuid) -> Result<String, AppError> {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (Utc::now() + Duration::seconds(auth.expiration as i64)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.secret.as_bytes()),
    )
    .map_err(|e| anyhow::anyhow!("token encoding failed: {e}").into())
}
