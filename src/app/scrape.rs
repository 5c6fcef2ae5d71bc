use scraper::Html;
use tracing::{debug, info};

use super::dedup::dedup_links;
use super::error::ScrapeError;
use super::extract::extract_profile;
use super::fetch::{DocumentFetcher, FetchConfig};
use super::types::{PROFILE_BASE_URL, ProfileRecord, ProfileTarget};
use super::views::{find_views_path, resolve_profile_views};

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Origin used for username URLs and the view-count endpoint.
    pub base_url: String,
    pub fetch: FetchConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: PROFILE_BASE_URL.to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

/// Scrapes profile pages. Holds no per-profile state, so one instance can
/// serve concurrent calls.
#[derive(Debug, Clone)]
pub struct Scraper {
    fetcher: DocumentFetcher,
    base_url: String,
}

impl Scraper {
    pub fn new(config: ScraperConfig) -> Result<Self, ScrapeError> {
        let fetcher = DocumentFetcher::new(&config.fetch)?;
        Ok(Self {
            fetcher,
            base_url: config.base_url,
        })
    }

    /// Entry point for a pre-classified `(username, url)` pair.
    pub async fn scrape_user_info(
        &self,
        username: Option<&str>,
        url: Option<&str>,
    ) -> Result<ProfileRecord, ScrapeError> {
        let target = ProfileTarget::from_parts(username, url)?;
        self.scrape(&target).await
    }

    /// Fetch, parse, extract, resolve the view counter, deduplicate links.
    /// Fails as a whole; no partial record is ever returned.
    pub async fn scrape(&self, target: &ProfileTarget) -> Result<ProfileRecord, ScrapeError> {
        let url = target.profile_url(&self.base_url);
        info!(url = %url, "scraping profile");

        let body = self.fetcher.fetch_bytes(&url).await?;
        let html = String::from_utf8(body).map_err(|err| ScrapeError::Parse {
            url: url.clone(),
            reason: err.to_string(),
        })?;

        // The parsed tree is not Send; keep it out of the await below.
        let (mut record, views_path) = {
            let document = Html::parse_document(&html);
            (
                extract_profile(&document, &target.username()),
                find_views_path(&document),
            )
        };
        debug!(links = record.links.len(), "extracted profile fields");

        record.profile_views =
            resolve_profile_views(&self.fetcher, &self.base_url, views_path.as_deref()).await?;

        let extracted = record.links.len();
        record.links = dedup_links(record.links);
        if record.links.len() < extracted {
            debug!(
                removed = extracted - record.links.len(),
                "dropped duplicate links"
            );
        }

        Ok(record)
    }
}
