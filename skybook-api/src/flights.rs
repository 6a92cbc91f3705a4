use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use skybook_domain::flight::{Flight, FlightDescriptor};

use crate::error::AppError;
use crate::middleware::auth::{require_admin, require_auth};
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct FlightListResponse {
    flights: Vec<Flight>,
}

#[derive(Debug, Serialize)]
struct FlightResponse {
    flight: Flight,
}

pub fn routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/api/flight/create", post(create_flight))
        .route("/api/flight/update/{id}", patch(update_flight))
        .route_layer(axum::middleware::from_fn(require_admin))
        .route_layer(axum::middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/api/flight/get", get(list_flights))
        .merge(admin)
}

async fn list_flights(State(state): State<AppState>) -> Result<Json<FlightListResponse>, AppError> {
    let flights = state.flights.list().await?;

    Ok(Json(FlightListResponse { flights }))
}

async fn create_flight(
    State(state): State<AppState>,
    Json(descriptor): Json<FlightDescriptor>,
) -> Result<(StatusCode, Json<FlightResponse>), AppError> {
    descriptor.validate()?;

    let flight = state.flights.create(descriptor).await?;

    info!(flight_id = %flight.id, "flight created");

    Ok((StatusCode::CREATED, Json(FlightResponse { flight })))
}

async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(descriptor): Json<FlightDescriptor>,
) -> Result<Json<FlightResponse>, AppError> {
    descriptor.validate()?;

    let flight = state.flights.update(&id, descriptor).await?;

    info!(flight_id = %flight.id, "flight updated");

    Ok(Json(FlightResponse { flight }))
}
