pub mod data_io;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod runtime;
pub mod scrape;
pub mod types;
pub mod views;

pub use error::{FetchError, ScrapeError};
pub use runtime::run;
pub use scrape::{Scraper, ScraperConfig};
pub use types::{LinkEntry, PROFILE_BASE_URL, ProfileRecord, ProfileTarget};
