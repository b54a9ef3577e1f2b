//! HTTP facade for classwatch.
//!
//! Routes:
//!
//! | method | path                                             | auth            |
//! |--------|--------------------------------------------------|-----------------|
//! | POST   | `/log_incident/`                                 | open            |
//! | GET    | `/api/get_logs/{mode}/{class_id}/{date}`         | session cookie  |
//! | GET    | `/api/get_risk_ranking/{mode}/{class_id}/{date}` | session cookie  |
//! | GET    | `/login`, POST `/login`, GET `/logout`           | open            |
//! | GET    | `/`                                              | session cookie  |
//!
//! Handlers hold no business logic; they hand off to the
//! [`IncidentStore`], the [`query`](crate::query) functions and the
//! [`SessionGate`].

mod handlers;
mod pages;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::CookieJar;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::auth::{SessionGate, SharedSecretGate};
use crate::config::{Config, UnauthorizedReads};
use crate::error::{Error, Result};
use crate::store::IncidentStore;

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Incident store shared by ingestion and queries.
    pub store: Arc<IncidentStore>,
    /// Login and session checks.
    pub gate: Arc<dyn SessionGate>,
    /// Response policy for unauthorized queries.
    pub unauthorized_reads: UnauthorizedReads,
}

impl AppState {
    /// Assemble state from its parts.
    #[must_use]
    pub fn new(
        store: Arc<IncidentStore>,
        gate: Arc<dyn SessionGate>,
        unauthorized_reads: UnauthorizedReads,
    ) -> Self {
        Self {
            store,
            gate,
            unauthorized_reads,
        }
    }

    /// Build a fresh, empty state from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(IncidentStore::with_capacity(config.store.max_per_class)),
            Arc::new(SharedSecretGate::from_config(&config.auth)),
            config.auth.unauthorized_reads,
        )
    }

    /// Whether the request's cookies carry a valid session.
    #[must_use]
    pub fn is_authorized(&self, jar: &CookieJar) -> bool {
        let token = jar.get(self.gate.cookie_name()).map(|cookie| cookie.value());
        self.gate.authorize(token)
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/login", get(handlers::login_page).post(handlers::login))
        .route("/logout", get(handlers::logout))
        .route("/favicon.ico", get(handlers::favicon))
        .route("/log_incident", post(handlers::log_incident))
        .route("/log_incident/", post(handlers::log_incident))
        .route("/api/get_logs/:mode/:class_id/:date", get(handlers::get_logs))
        .route(
            "/api/get_risk_ranking/:mode/:class_id/:date",
            get(handlers::get_risk_ranking),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid, cannot be bound, or the
/// server fails while running.
pub async fn serve(config: &Config) -> Result<()> {
    let addr = config.socket_addr()?;
    let state = AppState::from_config(config);
    let store = Arc::clone(&state.store);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind { addr, source })?;
    info!("Listening on http://{}", listener.local_addr()?);
    info!(
        max_per_class = store.max_per_class(),
        unauthorized_reads = ?state.unauthorized_reads,
        "Incident store ready"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::Serve)?;

    let stats = store.stats();
    info!(
        classes = stats.classes,
        incidents = stats.incidents,
        "Server stopped; in-memory incidents discarded"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}
