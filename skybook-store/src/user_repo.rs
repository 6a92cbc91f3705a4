use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use skybook_domain::repository::UserRepository;
use skybook_domain::user::{NewUser, User, UserRole};
use skybook_domain::{DomainError, DomainResult};

use crate::storage;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    mobile_number: String,
    password_hash: String,
    role: String,
    avatar: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> DomainResult<User> {
        Ok(User {
            id: self.id,
            name: self.name,
            mobile_number: self.mobile_number,
            password_hash: self.password_hash,
            role: self.role.parse::<UserRole>()?,
            avatar: self.avatar,
            created_at: self.created_at,
        })
    }
}

const SELECT_USER: &str =
    "SELECT id, name, mobile_number, password_hash, role, avatar, created_at FROM users";

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_mobile_number(&self, mobile_number: &str) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE mobile_number = $1"))
            .bind(mobile_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        row.map(UserRow::into_user).transpose()
    }

    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            mobile_number: new_user.mobile_number,
            password_hash: new_user.password_hash,
            role: UserRole::User,
            avatar: None,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, name, mobile_number, password_hash, role, avatar, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.mobile_number)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.avatar)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The unique index on mobile_number is the backstop for the
            // handler-level existence check.
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return DomainError::MobileNumberTaken(user.mobile_number.clone());
                }
            }
            storage(e)
        })?;

        Ok(user)
    }
}
