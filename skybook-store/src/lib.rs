pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod flight_repo;
pub mod user_repo;

pub use booking_repo::PgBookingRepository;
pub use database::DbClient;
pub use flight_repo::PgFlightRepository;
pub use user_repo::PgUserRepository;

use skybook_domain::DomainError;

pub(crate) fn storage(err: sqlx::Error) -> DomainError {
    DomainError::Storage(err.to_string())
}
