//! Viajes Preview - SPA server with Open Graph previews for travel packages.
//!
//! The storefront is a client-rendered single-page application, which
//! link-preview crawlers cannot execute. This crate serves the pre-built SPA
//! bundle and, for crawlers only, renders package detail pages server-side
//! with Open Graph and Twitter Card tags.
//!
//! # Architecture
//!
//! - **Crawler**: Classifies the `User-Agent` against known link-preview bots
//! - **Resolve**: Fetches the public package listing from the upstream API
//! - **Render**: Generates the preview HTML using maud (compile-time templates)
//! - **Cache**: In-process moka cache of rendered pages + Cache-Control headers
//!
//! # URL Pattern
//!
//! ```text
//! GET /paquetes/{slug}
//! ```
//!
//! Crawlers receive the package preview (or a generic site preview when the
//! package cannot be resolved). Browsers, and every other path, receive the
//! SPA bundle.
//!
//! # Failure handling
//!
//! Upstream failures never surface as errors: a crawler gets the generic site
//! preview, and a rendering failure falls back to the SPA entry file.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod error;
pub mod render;
pub mod resolve;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
