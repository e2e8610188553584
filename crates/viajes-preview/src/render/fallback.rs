//! Generic site preview, used when a package cannot be resolved.
//!
//! Advertises the storefront itself and refreshes to the site root at once.
//! Never mentions the requested slug.

use maud::{Markup, html};

use super::components::{OpenGraphData, page_shell};
use crate::config::Config;

/// Render the generic fallback page.
pub fn render(config: &Config) -> Markup {
    let root = format!("{}/", config.site_url);

    let og = OpenGraphData {
        title: &config.site_name,
        description: &config.site_description,
        url: &root,
        image: &config.default_image,
        og_type: "website",
        twitter_card_type: "summary_large_image",
    };

    let head_extra = html! {
        meta http-equiv="refresh" content=(format!("0;url={root}"));
    };

    let body = html! {
        section class="card" {
            h1 class="title" { (config.site_name) }
            p class="description" { (config.site_description) }
        }
        div class="actions" {
            a class="cta" href=(root) { "Ver paquetes" }
        }
    };

    page_shell(og, &config.site_name, head_extra, body)
}
