use clap::Parser;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cpg_predictor::{
    Config, PREDICTOR_NAME,
    cpg::CpgEngine,
    handlers::{AppState, create_router, help_document},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let engine = CpgEngine::new(config.track_window);
    let help = help_document(config.help_file.as_deref(), &engine)?;

    let state = AppState {
        engine,
        help: Arc::new(help),
        max_payload: config.max_payload,
    };

    let app = create_router(state);
    let app = if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    let addr = config.bind_address();
    tracing::info!("Starting {} on {}", PREDICTOR_NAME, addr);
    tracing::info!("Track window: {} bp", engine.window());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
