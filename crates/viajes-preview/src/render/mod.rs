//! HTML rendering for package previews.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation; every dynamic value is escaped, including text that comes
//! from the package API.

pub mod components;
pub mod fallback;
pub mod package;

use maud::Markup;

use crate::catalog::Package;
use crate::config::Config;
use crate::error::PreviewError;

/// Render the crawler-facing page for a slug.
///
/// A resolved package gets its own preview page; anything else gets the
/// generic site page.
pub fn render_page(
    package: Option<&Package>,
    slug: &str,
    config: &Config,
) -> Result<Markup, PreviewError> {
    match package {
        Some(package) => package::render(package, slug, config),
        None => Ok(fallback::render(config)),
    }
}
