/// HTTP Server wrapper for the research agent
/// Exposes the research pipeline as REST API endpoints

use std::sync::Arc;

use research_client::{init_tracing, router, ResearchAgent, ResearchConfig};

#[tokio::main]
async fn main() {
    // Load .env file
    let _ = dotenv::dotenv();
    init_tracing();

    let config = ResearchConfig::from_env();
    let agent = Arc::new(ResearchAgent::from_config(&config));

    tracing::info!("[INIT] Server configuration:");
    tracing::info!("  Port: {}", config.http_port);
    tracing::info!("  Model: {}", agent.model());
    tracing::info!("  Document source: {}", agent.source_name());

    let app = router(agent);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("[FATAL] Failed to bind port {}: {}", config.http_port, e);
            std::process::exit(1);
        }
    };

    tracing::info!("[STARTUP] ✓ Research HTTP Server running on http://0.0.0.0:{}", config.http_port);
    tracing::info!("  POST /research — Run the research pipeline for a query");
    tracing::info!("  GET  /health   — Check server health");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("[FATAL] Server failed: {}", e);
    }
}
