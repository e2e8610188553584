//! Package detail preview page.
//!
//! Shows the cover image, title, destinations, duration, price and a
//! truncated description, with OG/Twitter tags built from the same data.

use maud::{Markup, PreEscaped, html};

use super::components::{
    OpenGraphData, format_amount, format_price, page_shell, resolve_image_url, truncate,
};
use crate::catalog::Package;
use crate::config::Config;
use crate::error::PreviewError;

/// Maximum description length (characters) in meta tags.
pub const DESCRIPTION_MAX_CHARS: usize = 150;

/// Render the preview page for a resolved package.
pub fn render(package: &Package, slug: &str, config: &Config) -> Result<Markup, PreviewError> {
    let canonical = canonical_url(&config.site_url, slug)?;

    let name = package
        .titulo
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let title = match name {
        Some(name) => format!("{name} · {}", config.site_name),
        None => config.site_name.clone(),
    };

    let description = package
        .descripcion
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| truncate(d, DESCRIPTION_MAX_CHARS))
        .unwrap_or_else(|| config.site_description.clone());

    let image = package
        .image_candidates()
        .find_map(|c| resolve_image_url(c, &config.asset_base_url))
        .unwrap_or_else(|| config.default_image.clone());

    let destinations = package.destination_names().join(", ");
    let price = package
        .precio_total
        .map(|amount| format_price(amount, package.moneda.as_deref()));
    let duration = package.duracion_dias.map(|days| match days {
        1 => "1 día".to_string(),
        n => format!("{n} días"),
    });

    let og = OpenGraphData {
        title: &title,
        description: &description,
        url: &canonical,
        image: &image,
        og_type: "product",
        twitter_card_type: "summary_large_image",
    };

    let head_extra = html! {
        @if !destinations.is_empty() {
            meta name="twitter:label1" content="Destinos";
            meta name="twitter:data1" content=(destinations);
        }
        @if let Some(price) = &price {
            meta name="twitter:label2" content="Precio";
            meta name="twitter:data2" content=(price);
        }
        @if let Some(amount) = package.precio_total {
            meta property="product:price:amount" content=(format_amount(amount));
            @if let Some(currency) = package.moneda.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
                meta property="product:price:currency" content=(currency.to_uppercase());
            }
        }
        script { (PreEscaped(browser_redirect_script(&canonical))) }
    };

    let body = html! {
        article class="card" {
            img class="cover" src=(image) alt=(name.unwrap_or(&config.site_name));
            h1 class="title" { (name.unwrap_or(&config.site_name)) }
            div class="facts" {
                @if !destinations.is_empty() {
                    span class="destinations" { (destinations) }
                }
                @if let Some(duration) = &duration {
                    span class="duration" { (duration) }
                }
                @if let Some(price) = &price {
                    span class="price" { (price) }
                }
            }
            p class="description" { (description) }
        }
        div class="actions" {
            a class="cta" href=(canonical) { "Ver paquete" }
        }
    };

    Ok(page_shell(og, &config.site_name, head_extra, body))
}

/// `{site_url}/paquetes/{slug}` with the slug encoded as one path segment.
pub fn canonical_url(site_url: &str, slug: &str) -> Result<String, PreviewError> {
    let mut url = url::Url::parse(site_url)?;
    url.path_segments_mut()
        .map_err(|()| anyhow::anyhow!("site url {site_url} cannot be a base"))?
        .pop_if_empty()
        .push("paquetes")
        .push(slug);
    Ok(url.to_string())
}

/// Inline script that sends real browsers on to the SPA route.
///
/// Its bot test is deliberately looser than [`crate::crawler::is_crawler`]
/// and the two can disagree.
fn browser_redirect_script(target: &str) -> String {
    format!(
        "if(!/bot|crawler|spider|crawling/i.test(navigator.userAgent)){{window.location.replace({});}}",
        js_string(target)
    )
}

/// Encode a string as a JavaScript literal that is safe inside `<script>`.
fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string())
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
