//! HTTP layer serving the assessment form and its JSON views.

pub mod routes;
pub mod sessions;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::{assess::FlowConfig, config::Settings, llm::CompletionClient};

use self::sessions::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub flow: FlowConfig,
    pub client: Arc<dyn CompletionClient>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(settings: Settings, client: Arc<dyn CompletionClient>) -> Self {
        let flow = FlowConfig::from_settings(&settings);
        let sessions = SessionStore::new(settings.max_sessions, settings.session_idle());
        Self {
            settings,
            flow,
            client,
            sessions,
        }
    }
}

/// Build the router; the stylesheet is served from `settings.static_dir`.
pub fn router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.settings.static_dir);
    Router::new()
        .route("/", get(routes::index))
        .route("/risks", post(routes::fetch_risks))
        .route("/score", post(routes::fetch_score))
        .route("/reset", post(routes::reset))
        .route("/api/catalog", get(routes::catalog))
        .route("/api/session", get(routes::session))
        .route("/healthz", get(routes::healthz))
        .fallback_service(static_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState, host: String, port: u16) -> Result<()> {
    let comparison = state.flow.comparison;
    let router = router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, ?comparison, "serving phrs-assistant");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
