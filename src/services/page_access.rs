//! Reading a board page: pin count and image URLs.

use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

use crate::error::PageAccessError;
use crate::models::{BoardId, FetchConfig};

/// Pin selectors tried in order; the first one that yields images wins.
const IMAGE_SELECTORS: &[&str] = &[
    r#"[data-test-id="pin"] img"#,
    r#"[data-test-id="pinWrapper"] img"#,
    r#"img[src*="pinimg.com"]"#,
];

/// Raw listing read from a board page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageListing {
    /// Pin count as advertised by the page, if it advertises one
    pub pin_count: Option<usize>,
    /// Image URLs in page order, possibly with duplicates
    pub image_urls: Vec<String>,
}

/// Something that can look at a board and list its images.
#[async_trait]
pub trait PageAccess: Send + Sync {
    async fn resolve(&self, board: &BoardId) -> Result<PageListing, PageAccessError>;
}

/// Page access for environments without any way to load board pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailablePageAccess;

#[async_trait]
impl PageAccess for UnavailablePageAccess {
    async fn resolve(&self, _board: &BoardId) -> Result<PageListing, PageAccessError> {
        Err(PageAccessError::Unavailable)
    }
}

/// Fetches the board page over HTTP and scrapes the server-rendered markup.
///
/// This sees only what the page ships without JavaScript, which is usually
/// the first screenful of pins. The collector flags such boards as partial.
pub struct HtmlPageAccess {
    client: reqwest::Client,
}

impl HtmlPageAccess {
    pub fn new(config: &FetchConfig) -> Result<Self, PageAccessError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| PageAccessError::Network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageAccess for HtmlPageAccess {
    async fn resolve(&self, board: &BoardId) -> Result<PageListing, PageAccessError> {
        tracing::debug!(board = %board, "Loading board page");

        let response = self
            .client
            .get(board.url().clone())
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| PageAccessError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageAccessError::Status(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| PageAccessError::Network(e.to_string()))?;

        let listing = parse_board_html(&html, board.url())?;
        tracing::debug!(
            board = %board,
            images = listing.image_urls.len(),
            pin_count = ?listing.pin_count,
            "Parsed board page"
        );
        Ok(listing)
    }
}

/// Extract image URLs and the advertised pin count from board markup.
///
/// Relative image URLs are resolved against `base`; `data:` URIs are
/// dropped.
pub fn parse_board_html(html: &str, base: &Url) -> Result<PageListing, PageAccessError> {
    let document = Html::parse_document(html);

    let mut image_urls = Vec::new();
    for css in IMAGE_SELECTORS {
        let selector = Selector::parse(css)
            .map_err(|e| PageAccessError::Parse(format!("Invalid selector '{css}': {e:?}")))?;
        image_urls = document
            .select(&selector)
            .filter_map(|img| img.value().attr("src"))
            .filter_map(|src| resolve_image_url(src, base))
            .collect();
        if !image_urls.is_empty() {
            break;
        }
    }

    Ok(PageListing {
        pin_count: advertised_pin_count(html)?,
        image_urls,
    })
}

fn resolve_image_url(src: &str, base: &Url) -> Option<String> {
    let src = src.trim();
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }
    let url = base.join(src).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

static PIN_COUNT_JSON: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
static PIN_COUNT_TEXT: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

/// Compile `pattern` into `cell` on first use.
fn cached_regex(
    cell: &'static OnceLock<Result<Regex, regex::Error>>,
    pattern: &str,
) -> Result<&'static Regex, PageAccessError> {
    cell.get_or_init(|| Regex::new(pattern))
        .as_ref()
        .map_err(|e| PageAccessError::Parse(e.to_string()))
}

/// Pin count from embedded JSON (`"pin_count": 123`) or visible text
/// (`1,234 Pins`).
fn advertised_pin_count(html: &str) -> Result<Option<usize>, PageAccessError> {
    let json = cached_regex(&PIN_COUNT_JSON, r#""pin_count"\s*:\s*(\d+)"#)?;
    if let Some(count) = json.captures(html).and_then(|c| c[1].parse().ok()) {
        return Ok(Some(count));
    }

    let text = cached_regex(&PIN_COUNT_TEXT, r"(?i)\b(\d{1,3}(?:,\d{3})*|\d+)\s+pins\b")?;
    Ok(text
        .captures(html)
        .and_then(|c| c[1].replace(',', "").parse().ok()))
}
