use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::flight::Flight;
use crate::{DomainError, DomainResult};

/// One ledger row: a user's seats of a single class on a single flight.
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub flight_id: String,
    pub seat_class: SeatClass,
    pub number_of_seats: i32,
    pub booking_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatClass {
    #[serde(rename = "ECONOMY")]
    Economy,
    #[serde(rename = "BUSINESS")]
    Business,
}

impl SeatClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatClass::Economy => "ECONOMY",
            SeatClass::Business => "BUSINESS",
        }
    }
}

impl FromStr for SeatClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ECONOMY" => Ok(SeatClass::Economy),
            "BUSINESS" => Ok(SeatClass::Business),
            other => Err(DomainError::Storage(format!("unknown seat class: {other}"))),
        }
    }
}

/// Requested seat counts per class for one booking operation.
///
/// Constructing a request validates it: counts must be non-negative and at
/// least one class must be requested, so a value of this type always
/// describes a bookable quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatRequest {
    economy: i32,
    business: i32,
}

impl SeatRequest {
    pub fn new(economy: i32, business: i32) -> DomainResult<Self> {
        if economy < 0 || business < 0 {
            return Err(DomainError::Validation(
                "seat counts must be non-negative".to_string(),
            ));
        }
        if economy == 0 && business == 0 {
            return Err(DomainError::Validation(
                "at least one seat must be requested".to_string(),
            ));
        }
        Ok(Self { economy, business })
    }

    pub fn economy(&self) -> i32 {
        self.economy
    }

    pub fn business(&self) -> i32 {
        self.business
    }

    pub fn total(&self) -> i32 {
        self.economy + self.business
    }

    /// The classes with a strictly positive requested count. Each one maps to
    /// exactly one ledger row.
    pub fn classes(&self) -> Vec<(SeatClass, i32)> {
        [
            (SeatClass::Economy, self.economy),
            (SeatClass::Business, self.business),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect()
    }
}

/// A ledger row joined with the flight it books, as returned by the
/// user-facing booking listing.
#[derive(Debug, Clone, Serialize)]
pub struct BookingWithFlight {
    #[serde(flatten)]
    pub booking: Booking,
    pub flight: Flight,
}
