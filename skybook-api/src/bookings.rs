use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use skybook_domain::booking::{Booking, BookingWithFlight, SeatRequest};
use skybook_domain::user::User;

use crate::error::AppError;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBookingRequest {
    flight_id: String,
    #[serde(default)]
    economy: i32,
    #[serde(default)]
    business: i32,
}

#[derive(Debug, Serialize)]
struct CreateBookingResponse {
    bookings: Vec<Booking>,
}

#[derive(Debug, Serialize)]
struct BookingListResponse {
    bookings: Vec<BookingWithFlight>,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/booking/user/get", get(list_user_bookings))
        .route("/api/booking/create", post(create_booking))
        .route_layer(axum::middleware::from_fn_with_state(state, require_auth))
}

async fn list_user_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<BookingListResponse>, AppError> {
    let bookings = state.bookings.list_for_user(user.id).await?;

    Ok(Json(BookingListResponse { bookings }))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    // Rejects non-positive requests before any storage call.
    let seats = SeatRequest::new(req.economy, req.business)?;

    let bookings = state
        .bookings
        .book_seats(user.id, &req.flight_id, &seats)
        .await?;

    info!(
        user_id = %user.id,
        flight_id = %req.flight_id,
        total = seats.total(),
        "booking created"
    );

    Ok((StatusCode::CREATED, Json(CreateBookingResponse { bookings })))
}
