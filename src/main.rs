//! Banner studio - a live editor for event email banners.
//!
//! This is the main entry point for the banner studio web server.
//! The application is organized into the following modules:
//!
//! - `models`: The banner snapshot and API request/response types
//! - `banner`: The banner renderer shared by preview and export
//! - `state`: Form state store and its observers
//! - `templates`: Editor page and email document templates
//! - `suggest`: Search-term suggestions and stock photo search
//! - `handlers`: HTTP route handlers

use banner_studio::{router, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "banner_studio=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();
    let addr = config.bind_addr.clone();

    if config.anthropic_api_key.is_none() {
        tracing::warn!("ANTHROPIC_API_KEY not set; search-term suggestions are disabled");
    }
    if config.unsplash_access_key.is_none() {
        tracing::warn!("UNSPLASH_ACCESS_KEY not set; photo search is disabled");
    }

    let app = router(AppState::shared(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Banner studio running at http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
