use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use skybook_domain::flight::{Flight, FlightDescriptor};
use skybook_domain::repository::FlightRepository;
use skybook_domain::{DomainError, DomainResult};

use crate::storage;

pub struct PgFlightRepository {
    pool: PgPool,
}

impl PgFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct FlightRow {
    pub(crate) id: String,
    pub(crate) airline: String,
    pub(crate) flight_number: String,
    pub(crate) departure_airport_code: String,
    pub(crate) departure_airport_name: String,
    pub(crate) arrival_airport_code: String,
    pub(crate) arrival_airport_name: String,
    pub(crate) departure_date_time: DateTime<Utc>,
    pub(crate) arrival_date_time: DateTime<Utc>,
    pub(crate) duration: f64,
    pub(crate) base_fare: f64,
    pub(crate) total_fare: f64,
    pub(crate) economy_seats: i32,
    pub(crate) business_seats: i32,
    pub(crate) flight_status: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: row.id,
            airline: row.airline,
            flight_number: row.flight_number,
            departure_airport_code: row.departure_airport_code,
            departure_airport_name: row.departure_airport_name,
            arrival_airport_code: row.arrival_airport_code,
            arrival_airport_name: row.arrival_airport_name,
            departure_date_time: row.departure_date_time,
            arrival_date_time: row.arrival_date_time,
            duration: row.duration,
            base_fare: row.base_fare,
            total_fare: row.total_fare,
            economy_seats: row.economy_seats,
            business_seats: row.business_seats,
            flight_status: row.flight_status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub(crate) const SELECT_FLIGHT: &str = "SELECT id, airline, flight_number, \
     departure_airport_code, departure_airport_name, \
     arrival_airport_code, arrival_airport_name, \
     departure_date_time, arrival_date_time, duration, base_fare, total_fare, \
     economy_seats, business_seats, flight_status, created_at, updated_at \
     FROM flights";

#[async_trait]
impl FlightRepository for PgFlightRepository {
    async fn list(&self) -> DomainResult<Vec<Flight>> {
        let rows =
            sqlx::query_as::<_, FlightRow>(&format!("{SELECT_FLIGHT} ORDER BY departure_date_time"))
                .fetch_all(&self.pool)
                .await
                .map_err(storage)?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn find(&self, id: &str) -> DomainResult<Option<Flight>> {
        let row = sqlx::query_as::<_, FlightRow>(&format!("{SELECT_FLIGHT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        Ok(row.map(Flight::from))
    }

    async fn create(&self, descriptor: FlightDescriptor) -> DomainResult<Flight> {
        let now = Utc::now();
        let flight = Flight {
            id: Uuid::new_v4().to_string(),
            airline: descriptor.airline,
            flight_number: descriptor.flight_number,
            departure_airport_code: descriptor.departure_airport.code,
            departure_airport_name: descriptor.departure_airport.name,
            arrival_airport_code: descriptor.arrival_airport.code,
            arrival_airport_name: descriptor.arrival_airport.name,
            departure_date_time: descriptor.departure_date_time,
            arrival_date_time: descriptor.arrival_date_time,
            duration: descriptor.duration,
            base_fare: descriptor.pricing.base_fare,
            total_fare: descriptor.pricing.total_fare,
            economy_seats: descriptor.availability.economy,
            business_seats: descriptor.availability.business,
            flight_status: descriptor.flight_status,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO flights (id, airline, flight_number,
                departure_airport_code, departure_airport_name,
                arrival_airport_code, arrival_airport_name,
                departure_date_time, arrival_date_time, duration,
                base_fare, total_fare, economy_seats, business_seats,
                flight_status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(&flight.id)
        .bind(&flight.airline)
        .bind(&flight.flight_number)
        .bind(&flight.departure_airport_code)
        .bind(&flight.departure_airport_name)
        .bind(&flight.arrival_airport_code)
        .bind(&flight.arrival_airport_name)
        .bind(flight.departure_date_time)
        .bind(flight.arrival_date_time)
        .bind(flight.duration)
        .bind(flight.base_fare)
        .bind(flight.total_fare)
        .bind(flight.economy_seats)
        .bind(flight.business_seats)
        .bind(&flight.flight_status)
        .bind(flight.created_at)
        .bind(flight.updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        Ok(flight)
    }

    async fn update(&self, id: &str, descriptor: FlightDescriptor) -> DomainResult<Flight> {
        let row = sqlx::query_as::<_, FlightRow>(
            r#"
            UPDATE flights SET airline = $2, flight_number = $3,
                departure_airport_code = $4, departure_airport_name = $5,
                arrival_airport_code = $6, arrival_airport_name = $7,
                departure_date_time = $8, arrival_date_time = $9, duration = $10,
                base_fare = $11, total_fare = $12,
                economy_seats = $13, business_seats = $14,
                flight_status = $15, updated_at = NOW()
            WHERE id = $1
            RETURNING id, airline, flight_number,
                departure_airport_code, departure_airport_name,
                arrival_airport_code, arrival_airport_name,
                departure_date_time, arrival_date_time, duration,
                base_fare, total_fare, economy_seats, business_seats,
                flight_status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&descriptor.airline)
        .bind(&descriptor.flight_number)
        .bind(&descriptor.departure_airport.code)
        .bind(&descriptor.departure_airport.name)
        .bind(&descriptor.arrival_airport.code)
        .bind(&descriptor.arrival_airport.name)
        .bind(descriptor.departure_date_time)
        .bind(descriptor.arrival_date_time)
        .bind(descriptor.duration)
        .bind(descriptor.pricing.base_fare)
        .bind(descriptor.pricing.total_fare)
        .bind(descriptor.availability.economy)
        .bind(descriptor.availability.business)
        .bind(&descriptor.flight_status)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.map(Flight::from)
            .ok_or_else(|| DomainError::FlightNotFound(id.to_string()))
    }
}
