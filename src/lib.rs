//! Banner studio library - re-exports for testing and external use.
//!
//! This module provides public access to the banner renderer, the form
//! state store and the service plumbing around them.

use std::sync::Arc;
use std::time::Duration;

pub mod banner;
pub mod client;
pub mod color;
pub mod config;
pub mod export;
pub mod handlers;
pub mod ingest;
pub mod models;
pub mod session;
pub mod state;
pub mod suggest;
pub mod templates;

// ============================================================================
// Configuration
// ============================================================================

/// Request bodies carry up to three embedded images.
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(20);

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self { config, http }
    }

    pub fn shared(config: config::Config) -> Arc<Self> {
        Arc::new(Self::new(config))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(config::Config::default())
    }
}

// Re-export commonly used types
pub use banner::{empty_state, html_escape, render_banner};
pub use client::{ClientError, StudioApi, StudioClient};
pub use color::{normalize_hex, HexColorInput, HexInput};
pub use config::Config;
pub use export::{local_image_warning, CaptureError, Clipboard, Confirm, PngDownload, RasterCapture};
pub use handlers::router;
pub use ingest::{encode_data_uri, ingest_bytes, is_embedded, read_image_file, IngestError};
pub use models::{BannerForm, BannerSnapshot, ImageResult};
pub use session::{EditorSession, ExportOutcome, Notifier, Toast};
pub use state::{
    Affordances, ColorField, FormStateStore, ImageOrigin, ImageSlot, SizeField, StateChange,
    TextField,
};
pub use templates::{render_editor_page, render_email_document};
