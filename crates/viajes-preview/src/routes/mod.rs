//! Route definitions for the preview service.
//!
//! ## Routes
//!
//! - `GET /health` - Health check (JSON)
//! - `GET /paquetes/{slug}` (and `/paquetes/{slug}/`) - Package preview for crawlers, SPA for everyone else
//! - anything else - Static SPA bundle, falling back to `index.html`

mod health;
mod package;

use axum::Router;
use axum::routing::get;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// Build the complete preview service router.
pub fn router(state: AppState) -> Router {
    let spa = ServeDir::new(&state.config.static_dir)
        .fallback(ServeFile::new(state.config.index_path()));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/paquetes/{slug}", get(package::package_handler))
        .route("/paquetes/{slug}/", get(package::package_handler))
        .fallback_service(spa)
        .with_state(state)
}
