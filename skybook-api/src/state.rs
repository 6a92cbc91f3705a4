use std::sync::Arc;

use skybook_domain::repository::{BookingRepository, FlightRepository, UserRepository};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub flights: Arc<dyn FlightRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub auth: AuthConfig,
}
