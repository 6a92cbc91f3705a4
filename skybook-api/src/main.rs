use std::net::SocketAddr;
use std::sync::Arc;

use skybook_api::{
    app,
    state::{AppState, AuthConfig},
};
use skybook_store::{DbClient, PgBookingRepository, PgFlightRepository, PgUserRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skybook_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = skybook_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Skybook API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to database");
    db.migrate().await.expect("Failed to run migrations");

    let state = AppState {
        users: Arc::new(PgUserRepository::new(db.pool.clone())),
        flights: Arc::new(PgFlightRepository::new(db.pool.clone())),
        bookings: Arc::new(PgBookingRepository::new(db.pool.clone())),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
