use analytics::AnalyticsEngine;
use axum::{Router, routing::get};
use configuration::Settings;
use std::net::SocketAddr;
use std::sync::Arc;
use store::TradeStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub store: TradeStore,
    pub engine: AnalyticsEngine,
    pub default_period: String,
}

/// The main function to configure and run the read-only journal API.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let app_state = Arc::new(AppState {
        store: TradeStore::new(&settings.journal.path),
        engine: AnalyticsEngine::new(),
        default_period: settings.report.default_period.clone(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // --- DEFINE THE APPLICATION ROUTES ---
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/trades", get(handlers::get_trades))
        .route("/api/report", get(handlers::get_report))
        .route("/api/breakdown", get(handlers::get_breakdown))
        .route("/api/calendar", get(handlers::get_calendar))
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Journal API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
