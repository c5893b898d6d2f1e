//! Agency Ops Backend
//!
//! REST backend for the agency operations tool: content tasks, time tracking,
//! trips, gear, clients and the per-member dashboard, on SQLite.

mod api;
mod auth;
mod cache;
mod config;
mod dashboard;
mod db;
mod errors;
mod identity;
mod models;
mod realtime;
mod rows;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cache::LastGood;
use config::Config;
use db::Repository;
use models::{Content, TimeEntry};
use realtime::{ChangeFeed, RosterCache, RosterFeed};

/// How long startup waits for the first roster snapshot.
const ROSTER_WARMUP: Duration = Duration::from_secs(5);

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub roster: Arc<RosterCache>,
    pub content: Arc<LastGood<Vec<Content>>>,
    pub time_entries: Arc<LastGood<Vec<TimeEntry>>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire up state around `repo` and start the live roster.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(repo: Arc<Repository>, config: Config) -> Self {
        let feed = RosterFeed::new(Arc::clone(&repo), repo.changes().clone());
        let roster = Arc::new(RosterCache::spawn(&feed));

        Self {
            repo,
            roster,
            content: Arc::new(LastGood::new()),
            time_entries: Arc::new(LastGood::new()),
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Agency Ops Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (OPS_API_PSK). Authentication is disabled!");
    }
    if config.admin_emails.is_empty() {
        tracing::warn!("No admins configured (OPS_ADMIN_EMAILS). Every member can edit rates and roles!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool, ChangeFeed::new()));

    let state = AppState::new(repo, config.clone());

    match tokio::time::timeout(ROSTER_WARMUP, state.roster.wait_loaded()).await {
        Ok(roster) => tracing::info!("Roster loaded with {} members", roster.len()),
        Err(_) => tracing::warn!("Roster not loaded after {:?}, serving anyway", ROSTER_WARMUP),
    }

    // Build router
    let roster = Arc::clone(&state.roster);
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    roster.close();
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // API routes
    let api_routes = Router::new()
        // Team
        .route("/team", get(api::list_team).post(api::create_team_member))
        .route(
            "/team/{id}",
            get(api::get_team_member)
                .put(api::update_team_member)
                .delete(api::delete_team_member),
        )
        // Content
        .route("/content", get(api::list_content).post(api::create_content))
        .route(
            "/content/{id}",
            get(api::get_content)
                .put(api::update_content)
                .delete(api::delete_content),
        )
        .route("/content/{id}/status", patch(api::update_content_status))
        // Time entries
        .route(
            "/time-entries",
            get(api::list_time_entries).post(api::create_time_entry),
        )
        .route(
            "/time-entries/{id}",
            put(api::update_time_entry).delete(api::delete_time_entry),
        )
        // Trips
        .route("/trips", get(api::list_trips).post(api::create_trip))
        .route("/trips/{id}", put(api::update_trip).delete(api::delete_trip))
        // Gear
        .route("/gear", get(api::list_gear).post(api::create_gear))
        .route("/gear/{id}", put(api::update_gear).delete(api::delete_gear))
        // Clients
        .route("/clients", get(api::list_clients).post(api::create_client))
        .route(
            "/clients/{id}",
            put(api::update_client).delete(api::delete_client),
        )
        // Personal notes
        .route("/notes", get(api::get_notes).put(api::save_notes))
        // Caller
        .route("/me", get(api::get_me))
        .route("/me/provision", post(api::provision_me))
        .route("/me/notes", put(api::save_my_notes))
        // Dashboard
        .route("/dashboard", get(api::get_dashboard))
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod tests;
