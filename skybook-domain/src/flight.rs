use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::SeatRequest;
use crate::{DomainError, DomainResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    pub departure_airport_code: String,
    pub departure_airport_name: String,
    pub arrival_airport_code: String,
    pub arrival_airport_name: String,
    pub departure_date_time: DateTime<Utc>,
    pub arrival_date_time: DateTime<Utc>,
    /// Flight time in hours.
    pub duration: f64,
    pub base_fare: f64,
    pub total_fare: f64,
    pub economy_seats: i32,
    pub business_seats: i32,
    pub flight_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flight {
    /// Whether both seat pools can satisfy the request.
    pub fn has_capacity(&self, seats: &SeatRequest) -> bool {
        seats.economy() <= self.economy_seats && seats.business() <= self.business_seats
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportRef {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub base_fare: f64,
    pub total_fare: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub economy: i32,
    pub business: i32,
}

/// Full flight payload accepted by the admin create/update operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDescriptor {
    pub airline: String,
    pub flight_number: String,
    pub duration: f64,
    pub flight_status: String,
    pub pricing: Pricing,
    pub availability: Availability,
    pub departure_airport: AirportRef,
    pub arrival_airport: AirportRef,
    pub departure_date_time: DateTime<Utc>,
    pub arrival_date_time: DateTime<Utc>,
}

impl FlightDescriptor {
    /// Seat pools must never go negative; no other pool validation applies.
    pub fn validate(&self) -> DomainResult<()> {
        if self.availability.economy < 0 || self.availability.business < 0 {
            return Err(DomainError::Validation(
                "seat counts must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
