//! Bookwell scheduling server.
//!
//! Wires the in-memory reference adapters to the HTTP surface and the
//! event workers. Production deployments swap the store, bus, and token
//! verifier adapters behind the same ports.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookwell::adapters::auth::StaticTokenVerifier;
use bookwell::adapters::clock::SystemClock;
use bookwell::adapters::events::InMemoryEventBus;
use bookwell::adapters::http::{self, AppState};
use bookwell::adapters::memory::MemoryStore;
use bookwell::application::handlers::attendance::{CheckInHandler, OverrideAttendanceHandler};
use bookwell::application::handlers::booking::{CancelBookingHandler, CreateBookingHandler};
use bookwell::application::handlers::events::{
    BookingRequestedWorker, ConsultationRequestedWorker,
};
use bookwell::application::handlers::sessions::QuerySessionsHandler;
use bookwell::config::AppConfig;
use bookwell::domain::booking::detail_types;
use bookwell::ports::{EventSubscriber, TokenVerifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        environment = ?config.server.environment,
        bus = %config.events.bus_name,
        "starting bookwell scheduling server"
    );

    let store = MemoryStore::new();
    let clock = Arc::new(SystemClock);
    let bus = Arc::new(InMemoryEventBus::new());

    let sessions = Arc::new(QuerySessionsHandler::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
    ));
    let create_booking = Arc::new(CreateBookingHandler::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
    ));
    let cancel_booking = Arc::new(CancelBookingHandler::new(
        Arc::new(store.clone()),
        clock.clone(),
    ));
    let check_in = Arc::new(CheckInHandler::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        sessions.clone(),
        clock.clone(),
        config.checkin.window(),
    ));
    let override_attendance = Arc::new(OverrideAttendanceHandler::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        clock.clone(),
    ));

    // Event ingress: the same booking engine behind the bus.
    bus.subscribe(
        detail_types::BOOKING_REQUESTED,
        Arc::new(BookingRequestedWorker::new(
            create_booking.clone(),
            sessions.clone(),
            bus.clone(),
            config.events.source.clone(),
        )),
    );
    bus.subscribe(
        detail_types::CONSULTATION_REQUESTED,
        Arc::new(ConsultationRequestedWorker::new(
            create_booking.clone(),
            sessions.clone(),
            bus.clone(),
            config.events.source.clone(),
        )),
    );

    let state = AppState {
        programs: Arc::new(store.clone()),
        locations: Arc::new(store.clone()),
        schedules: Arc::new(store.clone()),
        exceptions: Arc::new(store.clone()),
        bookings: Arc::new(store.clone()),
        attendance: Arc::new(store.clone()),
        sessions,
        create_booking,
        cancel_booking,
        check_in,
        override_attendance,
    };

    let verifier: Arc<dyn TokenVerifier> = Arc::new(StaticTokenVerifier::new());
    let app = http::router(state, verifier);

    let addr = config.server.socket_addr();
    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
