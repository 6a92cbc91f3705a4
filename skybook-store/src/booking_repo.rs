use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use skybook_domain::booking::{Booking, BookingWithFlight, SeatClass, SeatRequest};
use skybook_domain::flight::Flight;
use skybook_domain::repository::BookingRepository;
use skybook_domain::{DomainError, DomainResult};

use crate::flight_repo::{FlightRow, SELECT_FLIGHT};
use crate::storage;

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    user_id: Uuid,
    flight_id: String,
    seat_class: String,
    number_of_seats: i32,
    booking_date: DateTime<Utc>,
}

impl BookingRow {
    fn into_booking(self) -> DomainResult<Booking> {
        Ok(Booking {
            id: self.id,
            user_id: self.user_id,
            flight_id: self.flight_id,
            seat_class: self.seat_class.parse::<SeatClass>()?,
            number_of_seats: self.number_of_seats,
            booking_date: self.booking_date,
        })
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<BookingWithFlight>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT id, user_id, flight_id, seat_class, number_of_seats, booking_date \
             FROM bookings WHERE user_id = $1 ORDER BY booking_date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        let mut bookings = Vec::with_capacity(rows.len());
        for row in rows {
            let booking = row.into_booking()?;
            let flight = sqlx::query_as::<_, FlightRow>(&format!("{SELECT_FLIGHT} WHERE id = $1"))
                .bind(&booking.flight_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage)?
                .map(Flight::from)
                .ok_or_else(|| {
                    DomainError::Storage(format!(
                        "booking {} references missing flight {}",
                        booking.id, booking.flight_id
                    ))
                })?;

            bookings.push(BookingWithFlight { booking, flight });
        }

        Ok(bookings)
    }

    async fn book_seats(
        &self,
        user_id: Uuid,
        flight_id: &str,
        seats: &SeatRequest,
    ) -> DomainResult<Vec<Booking>> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        // Conditional decrement: the WHERE guard makes the capacity check and
        // the pool update one atomic statement, so concurrent bookings cannot
        // drive either pool negative.
        let updated = sqlx::query(
            "UPDATE flights \
             SET economy_seats = economy_seats - $2, \
                 business_seats = business_seats - $3, \
                 updated_at = NOW() \
             WHERE id = $1 AND economy_seats >= $2 AND business_seats >= $3",
        )
        .bind(flight_id)
        .bind(seats.economy())
        .bind(seats.business())
        .execute(&mut *tx)
        .await
        .map_err(storage)?;

        if updated.rows_affected() == 0 {
            // Zero rows means unknown flight or not enough seats; probe to
            // tell the two apart.
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM flights WHERE id = $1)")
                    .bind(flight_id)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(storage)?;

            return Err(if exists {
                DomainError::SeatsUnavailable(flight_id.to_string())
            } else {
                DomainError::FlightNotFound(flight_id.to_string())
            });
        }

        let mut bookings = Vec::new();
        for (seat_class, count) in seats.classes() {
            let booking = Booking {
                id: Uuid::new_v4(),
                user_id,
                flight_id: flight_id.to_string(),
                seat_class,
                number_of_seats: count,
                booking_date: Utc::now(),
            };

            sqlx::query(
                "INSERT INTO bookings \
                 (id, user_id, flight_id, seat_class, number_of_seats, booking_date) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(booking.id)
            .bind(booking.user_id)
            .bind(&booking.flight_id)
            .bind(booking.seat_class.as_str())
            .bind(booking.number_of_seats)
            .bind(booking.booking_date)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

            bookings.push(booking);
        }

        tx.commit().await.map_err(storage)?;

        info!(flight_id, total = seats.total(), "seats booked");

        Ok(bookings)
    }
}
