use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use super::error::ScrapeError;

/// Origin every profile and view-count path is resolved against.
pub const PROFILE_BASE_URL: &str = "https://allmylinks.com";

/// One outbound link listed on a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_status: Option<String>,
}

impl fmt::Display for LinkEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} - {}", self.title, self.url)?;
        if let Some(subtitle) = &self.subtitle {
            write!(f, " ({subtitle})")?;
        }
        if let Some(status) = &self.connection_status {
            write!(f, " [{status}]")?;
        }
        Ok(())
    }
}

/// Structured data scraped from a single profile page.
///
/// Optional fields stay `None` when the page has no matching element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    pub username: String,
    pub avatar_url: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_views: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_online: Option<DateTime<Utc>>,
    pub qr_code_url: String,
    pub links: Vec<LinkEntry>,
}

impl ProfileRecord {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }
}

impl fmt::Display for ProfileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Username: {}", self.username)?;
        writeln!(f, "AvatarURL: {}", self.avatar_url)?;
        writeln!(f, "DisplayName: {}", self.display_name)?;
        let optional = [
            ("Birthday", &self.birthday),
            ("Bio", &self.bio),
            ("Content", &self.content),
            ("Location", &self.location),
            ("ProfileViews", &self.profile_views),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                writeln!(f, "{label}: {value}")?;
            }
        }
        if let Some(last_online) = &self.last_online {
            writeln!(f, "LastOnline: {}", last_online.format("%Y-%m-%d %H:%M:%S"))?;
        }
        writeln!(f, "QRCodeURL: {}", self.qr_code_url)?;
        writeln!(f)?;
        writeln!(f, "Links:")?;
        for link in &self.links {
            writeln!(f, "{link}")?;
        }
        Ok(())
    }
}

/// What to scrape: a bare username or a full profile URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileTarget {
    Username(String),
    Url(String),
}

impl ProfileTarget {
    /// Picks the target from a pre-classified argument pair. A non-empty
    /// username takes precedence over the URL.
    pub fn from_parts(username: Option<&str>, url: Option<&str>) -> Result<Self, ScrapeError> {
        let username = username.map(str::trim).filter(|v| !v.is_empty());
        let url = url.map(str::trim).filter(|v| !v.is_empty());
        match (username, url) {
            (Some(username), _) => Ok(ProfileTarget::Username(username.to_string())),
            (None, Some(url)) => Ok(ProfileTarget::Url(url.to_string())),
            (None, None) => Err(ScrapeError::MissingTarget),
        }
    }

    /// Classifies raw command-line input by its scheme prefix.
    pub fn classify(input: &str) -> Self {
        let input = input.trim();
        if input.starts_with("https://") || input.starts_with("http://") {
            ProfileTarget::Url(input.to_string())
        } else {
            ProfileTarget::Username(input.to_string())
        }
    }

    pub fn profile_url(&self, base_url: &str) -> String {
        match self {
            ProfileTarget::Username(username) => {
                format!("{}/{}", base_url.trim_end_matches('/'), username)
            }
            ProfileTarget::Url(url) => url.clone(),
        }
    }

    /// The given username, or the last path segment of the profile URL.
    pub fn username(&self) -> String {
        match self {
            ProfileTarget::Username(username) => username.clone(),
            ProfileTarget::Url(url) => Url::parse(url)
                .ok()
                .and_then(|u| {
                    u.path_segments()?
                        .rfind(|segment| !segment.is_empty())
                        .map(str::to_string)
                })
                .unwrap_or_default(),
        }
    }
}
