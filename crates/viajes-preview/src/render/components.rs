//! Shared HTML components and text helpers for preview pages.

use maud::{Markup, PreEscaped, html};

/// Inline CSS for preview pages.
///
/// Crawlers ignore it; it only matters for the rare human who lands on a
/// preview with scripts disabled.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#fafafa;--fg:#111;--fg2:#555;--accent:#0a7ea4;--border:rgba(10,126,164,.2)}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:1.5rem 1rem}
main{max-width:680px;width:100%}
a{color:var(--accent);text-decoration:none}
.card{padding:1.5rem;border:1px solid var(--border);border-radius:10px}
.cover{width:100%;max-height:320px;object-fit:cover;border-radius:8px;margin-bottom:1rem}
.title{font-size:1.6rem;font-weight:700;letter-spacing:-.01em}
.facts{display:flex;flex-wrap:wrap;gap:.4rem 1.25rem;margin:.5rem 0 1rem;color:var(--fg2);font-size:.95rem}
.price{font-weight:700;color:var(--fg)}
.description{color:var(--fg2);white-space:pre-wrap}
.actions{margin-top:1.25rem;display:flex;justify-content:center}
.cta{display:inline-block;padding:.55rem 1.1rem;background:var(--accent);color:#fff;border-radius:6px;font-weight:500}
@media(prefers-color-scheme:dark){
:root{--bg:#0b1117;--fg:#e5e5e5;--fg2:#a0a0a0;--accent:#38bdf8;--border:rgba(56,189,248,.25)}
}
"#;

/// Content-Security-Policy header value.
///
/// Allows inline styles and the inline browser-redirect script only.
pub const CSP_HEADER: &str = "default-src 'none'; style-src 'unsafe-inline'; script-src 'unsafe-inline'; img-src https: http: data:; form-action 'none'; frame-ancestors 'none'";

/// Open Graph metadata for a page. Every field is mandatory so the head is
/// always complete.
pub struct OpenGraphData<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Absolute URL of the page (`og:url` and canonical link).
    pub url: &'a str,
    /// Absolute image URL.
    pub image: &'a str,
    /// OG type (e.g., "website", "product").
    pub og_type: &'a str,
    /// Twitter card type ("summary", "summary_large_image").
    pub twitter_card_type: &'a str,
}

/// Render the full HTML page shell with `<head>`, OG tags, and body content.
///
/// `head_extra` is appended inside `<head>` after the standard tags.
pub fn page_shell(og: OpenGraphData<'_>, site_name: &str, head_extra: Markup, body: Markup) -> Markup {
    html! {
        (maud::DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (og.title) }
                meta name="description" content=(og.description);
                link rel="canonical" href=(og.url);

                // Open Graph
                meta property="og:title" content=(og.title);
                meta property="og:description" content=(og.description);
                meta property="og:url" content=(og.url);
                meta property="og:image" content=(og.image);
                meta property="og:site_name" content=(site_name);
                meta property="og:type" content=(og.og_type);
                meta property="og:locale" content="es_MX";

                // Twitter Card
                meta name="twitter:card" content=(og.twitter_card_type);
                meta name="twitter:title" content=(og.title);
                meta name="twitter:description" content=(og.description);
                meta name="twitter:image" content=(og.image);

                (head_extra)

                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                main { (body) }
            }
        }
    }
}

/// Check if a URL is safe to use in `src` or `content` attributes.
pub fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Turn an image field from the API into an absolute URL.
///
/// Absolute http(s) URLs pass through, protocol-relative URLs get `https:`,
/// paths are joined onto `asset_base_url`. Anything else (`data:`,
/// `javascript:`, garbage) yields `None`.
pub fn resolve_image_url(candidate: &str, asset_base_url: &str) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }

    if let Some(rest) = candidate.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }

    let resolved = match url::Url::parse(candidate) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = url::Url::parse(&format!("{}/", asset_base_url.trim_end_matches('/'))).ok()?;
            base.join(candidate).ok()?
        }
        Err(_) => return None,
    };

    let resolved = resolved.to_string();
    is_safe_url(&resolved).then_some(resolved)
}

/// Truncate to at most `max_chars` characters, appending "..." if truncated.
///
/// Counts Unicode scalar values, not bytes, so accented text is not cut
/// short.
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((end, _)) => format!("{}...", &s[..end]),
    }
}

/// Format a price as "$12,000 MXN".
///
/// Comma thousands separator; cents only when the amount is fractional.
pub fn format_price(amount: f64, currency: Option<&str>) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    let whole = group_thousands(cents / 100);

    let mut out = if cents % 100 == 0 {
        format!("{sign}${whole}")
    } else {
        format!("{sign}${whole}.{:02}", cents % 100)
    };

    if let Some(code) = currency.map(str::trim).filter(|c| !c.is_empty()) {
        out.push(' ');
        out.push_str(&code.to_uppercase());
    }
    out
}

/// Format an amount for `product:price:amount` ("12000.00").
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_text_untouched() {
        assert_eq!(truncate("hola", 150), "hola");
        let exact = "a".repeat(150);
        assert_eq!(truncate(&exact, 150), exact);
    }

    #[test]
    fn truncate_long_text_to_exact_length() {
        let long = "é".repeat(200);
        let out = truncate(&long, 150);
        assert!(out.ends_with("..."));
        let body = out.strip_suffix("...").unwrap();
        assert_eq!(body.chars().count(), 150);
        assert_eq!(body, "é".repeat(150));
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(12000.0, Some("MXN")), "$12,000 MXN");
        assert_eq!(format_price(999.0, Some("usd")), "$999 USD");
        assert_eq!(format_price(1234567.5, Some("MXN")), "$1,234,567.50 MXN");
        assert_eq!(format_price(0.0, None), "$0");
        assert_eq!(format_price(100000.0, Some("  ")), "$100,000");
    }

    #[test]
    fn amount_formatting() {
        assert_eq!(format_amount(12000.0), "12000.00");
        assert_eq!(format_amount(99.5), "99.50");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12000), "12,000");
        assert_eq!(group_thousands(1_000_000), "1,000,000");
    }

    #[test]
    fn image_url_resolution() {
        let base = "https://api.example.com";
        assert_eq!(
            resolve_image_url("https://cdn.example.com/a.jpg", base).as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
        assert_eq!(
            resolve_image_url("/uploads/a.jpg", base).as_deref(),
            Some("https://api.example.com/uploads/a.jpg")
        );
        assert_eq!(
            resolve_image_url("uploads/a b.jpg", "https://api.example.com/static/").as_deref(),
            Some("https://api.example.com/static/uploads/a%20b.jpg")
        );
        assert_eq!(
            resolve_image_url("//cdn.example.com/a.jpg", base).as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
        assert_eq!(resolve_image_url("javascript:alert(1)", base), None);
        assert_eq!(resolve_image_url("data:image/png;base64,AAAA", base), None);
        assert_eq!(resolve_image_url("   ", base), None);
    }

    #[test]
    fn safe_url_check() {
        assert!(is_safe_url("https://example.com/img.jpg"));
        assert!(is_safe_url("http://example.com/img.jpg"));
        assert!(!is_safe_url("ftp://example.com/img.jpg"));
    }
}
