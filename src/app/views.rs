use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::debug;

use super::error::ScrapeError;
use super::extract::text_content;
use super::fetch::DocumentFetcher;

/// Snippet the site uses to load the counter after page load.
const VIEWS_SCRIPT_MARKER: &str = "$.get(\"/profile/views?id=";

static VIEWS_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/profile/views\?id=(\d+)").expect("profile views pattern is valid")
});

/// Finds the view-count path (`/profile/views?id=<n>`) in the first inline
/// script that requests it.
pub fn find_views_path(document: &Html) -> Option<String> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "script")
        .find_map(|script| {
            let source = text_content(script);
            if !source.contains(VIEWS_SCRIPT_MARKER) {
                return None;
            }
            VIEWS_PATH_RE
                .find(&source)
                .map(|found| found.as_str().to_string())
        })
}

pub fn views_endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Fetches the plain-text counter. Any fetch failure is fatal.
pub async fn fetch_profile_views(
    fetcher: &DocumentFetcher,
    endpoint: &str,
) -> Result<String, ScrapeError> {
    debug!(endpoint, "fetching profile views");
    let body = fetcher
        .fetch_bytes(endpoint)
        .await
        .map_err(ScrapeError::ProfileViews)?;
    Ok(String::from_utf8_lossy(&body).trim().to_string())
}

/// Runs the second fetch when the page carried a counter script.
pub async fn resolve_profile_views(
    fetcher: &DocumentFetcher,
    base_url: &str,
    views_path: Option<&str>,
) -> Result<Option<String>, ScrapeError> {
    let Some(path) = views_path else {
        debug!("no profile views script on page");
        return Ok(None);
    };
    let endpoint = views_endpoint(base_url, path);
    fetch_profile_views(fetcher, &endpoint).await.map(Some)
}
