//! Social-media crawler detection.
//!
//! Link-preview bots cannot run the storefront SPA, so package pages are
//! rendered server-side for them. Detection is a case-insensitive substring
//! match of the `User-Agent` header against known preview agents.

/// Lowercase user-agent tokens of known link-preview crawlers.
pub const CRAWLER_TOKENS: &[&str] = &[
    "facebookexternalhit",
    "facebot",
    "facebookcatalog",
    "whatsapp",
    "twitterbot",
    "slackbot",
    "slack-imgproxy",
    "telegrambot",
    "discordbot",
    "pinterest",
    "redditbot",
    "linkedinbot",
    "skypeuripreview",
    "vkshare",
    "embedly",
    "quora link preview",
    "showyoubot",
    "outbrain",
    "w3c_validator",
];

/// Returns true if the user agent belongs to a known link-preview crawler.
///
/// A missing or empty header is treated as a regular browser.
pub fn is_crawler(user_agent: Option<&str>) -> bool {
    let Some(ua) = user_agent.filter(|ua| !ua.is_empty()) else {
        return false;
    };
    let ua = ua.to_lowercase();
    CRAWLER_TOKENS.iter().any(|token| ua.contains(token))
}

/// Who is asking for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
    Crawler,
    Browser,
}

/// Per-request context for a package-detail request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub slug: String,
    pub user_agent: Option<String>,
    pub requester: Requester,
}

impl RequestContext {
    pub fn new(slug: impl Into<String>, user_agent: Option<&str>) -> Self {
        let requester = if is_crawler(user_agent) {
            Requester::Crawler
        } else {
            Requester::Browser
        };
        Self {
            slug: slug.into(),
            user_agent: user_agent.map(str::to_string),
            requester,
        }
    }

    pub fn is_crawler(&self) -> bool {
        self.requester == Requester::Crawler
    }
}
