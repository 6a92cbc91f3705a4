use async_trait::async_trait;
use uuid::Uuid;

use crate::booking::{Booking, BookingWithFlight, SeatRequest};
use crate::flight::{Flight, FlightDescriptor};
use crate::user::{NewUser, User};
use crate::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;

    async fn find_by_mobile_number(&self, mobile_number: &str) -> DomainResult<Option<User>>;

    async fn create(&self, new_user: NewUser) -> DomainResult<User>;
}

#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<Flight>>;

    async fn find(&self, id: &str) -> DomainResult<Option<Flight>>;

    async fn create(&self, descriptor: FlightDescriptor) -> DomainResult<Flight>;

    /// Overwrites the flight row. Fails with `FlightNotFound` for unknown ids.
    async fn update(&self, id: &str, descriptor: FlightDescriptor) -> DomainResult<Flight>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<BookingWithFlight>>;

    /// The booking operation: atomically decrement the flight's seat pools by
    /// the requested counts and append one ledger row per non-zero class.
    ///
    /// Fails with `FlightNotFound` for unknown flights and `SeatsUnavailable`
    /// when either pool cannot satisfy its count; in both cases nothing is
    /// written. No partial booking ever occurs.
    async fn book_seats(
        &self,
        user_id: Uuid,
        flight_id: &str,
        seats: &SeatRequest,
    ) -> DomainResult<Vec<Booking>>;
}
