mod ats;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ats::advisory::{AdvisoryBlender, LlmAdvisor};
use crate::ats::engine::{AtsConfig, AtsEngine};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Compile vocabulary, cleaner and classifier patterns once
    let engine = AtsEngine::new(AtsConfig {
        signal_window: config.signal_window,
        ..AtsConfig::default()
    })?;
    info!("ATS engine initialized (signal window: {:?})", config.signal_window);

    let advisory = if config.advisory_enabled {
        let llm = LlmClient::new(
            config.advisory_url.clone(),
            config.advisory_model.clone(),
            config.advisory_timeout,
        )?;
        info!(
            "Advisory scorer enabled (model: {}, timeout: {:?})",
            llm.model(),
            config.advisory_timeout
        );
        AdvisoryBlender::new(Arc::new(LlmAdvisor(llm)), config.advisory_timeout)
    } else {
        info!("Advisory scorer disabled");
        AdvisoryBlender::disabled()
    };

    let state = AppState {
        engine: Arc::new(engine),
        advisory,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // caller is a browser extension

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
