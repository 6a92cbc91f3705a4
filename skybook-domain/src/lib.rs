pub mod booking;
pub mod flight;
pub mod repository;
pub mod user;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("flight with id {0} does not exist")]
    FlightNotFound(String),
    #[error("user with mobile number {0} does not exist")]
    UserNotFound(String),
    #[error("no seats available for the flight with id {0}")]
    SeatsUnavailable(String),
    #[error("user with mobile number {0} already exists")]
    MobileNumberTaken(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
