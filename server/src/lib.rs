//! # Phonebook API
//!
//! REST service over a single contact collection, persisted in Redis.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | GET | /api/persons | 200 | — |
//! | GET | /api/persons/{id} | 200 | 404 |
//! | POST | /api/persons | 201 | 400 |
//! | PUT | /api/persons/{id} | 200 | 404, 400 |
//! | DELETE | /api/persons/{id} | 204 | 404 |
//! | GET | /info | 200 | — |
//!
//! Bodies are JSON; failures carry `{"error": "..."}`. Ids that are not
//! well-formed store keys map to 400, store validation failures surface
//! their message verbatim.
//!
//! # Setup
//!
//! Needs a reachable Redis (`REDIS_URL`, default `redis://127.0.0.1:6379`)
//! and binds to `PORT` (default 3001).
//!
//! ```sh
//! RUST_LOG=info cargo run -p phonebook-server
//! ```

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod fake_store;
pub mod middleware;
pub mod routes;
pub mod state;

use config::Config;
use middleware::request_logging;
use routes::{
    create_person_handler, delete_person_handler, get_person_handler, info_handler,
    list_persons_handler, update_person_handler,
};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();

    info!("Connecting to store...");
    let state = AppState::new(&config).await;

    info!("Starting server...");
    let app = router(state);

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            "/api/persons",
            get(list_persons_handler).post(create_person_handler),
        )
        .route(
            "/api/persons/{id}",
            get(get_person_handler)
                .put(update_person_handler)
                .delete(delete_person_handler),
        )
        .route("/info", get(info_handler))
        .layer(axum::middleware::from_fn(request_logging))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
