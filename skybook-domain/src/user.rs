use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::{DomainError, DomainResult};

pub const MOBILE_NUMBER_LEN: usize = 10;
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub mobile_number: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: UserRole,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(UserRole::User),
            "ADMIN" => Ok(UserRole::Admin),
            other => Err(DomainError::Storage(format!("unknown user role: {other}"))),
        }
    }
}

/// Payload for registering a user. The password arrives already hashed; the
/// domain layer never sees plaintext credentials.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub mobile_number: String,
    pub password_hash: String,
}

pub fn validate_mobile_number(mobile_number: &str) -> DomainResult<()> {
    if mobile_number.len() != MOBILE_NUMBER_LEN
        || !mobile_number.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(DomainError::Validation(format!(
            "mobile number must be exactly {MOBILE_NUMBER_LEN} digits"
        )));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> DomainResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(DomainError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
