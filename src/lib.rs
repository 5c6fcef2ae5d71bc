//! Scraper for public AllMyLinks profile pages.
//!
//! Fetches a profile, walks its HTML once for the profile fields and link
//! list, follows the embedded view-counter request, and returns a
//! [`ProfileRecord`] with duplicate links removed.

pub mod app;

pub use app::{
    FetchError, LinkEntry, PROFILE_BASE_URL, ProfileRecord, ProfileTarget, ScrapeError, Scraper,
    ScraperConfig,
};
