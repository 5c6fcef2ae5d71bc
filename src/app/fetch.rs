use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, warn};

use super::error::FetchError;

/// Desktop browser agent; the site rejects obvious non-browser clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Proxy for every request. `None` or an empty string connects directly.
    pub proxy_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            proxy_url: None,
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Issues browser-like GET requests, optionally through a proxy.
#[derive(Debug, Clone)]
pub struct DocumentFetcher {
    client: reqwest::Client,
}

impl DocumentFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        match config.proxy_url.as_deref().map(str::trim) {
            Some(proxy) if !proxy.is_empty() => {
                let proxy_cfg =
                    reqwest::Proxy::all(proxy).map_err(|source| FetchError::InvalidProxy {
                        proxy: proxy.to_string(),
                        source,
                    })?;
                debug!(proxy, "routing requests through proxy");
                builder = builder.proxy(proxy_cfg);
            }
            _ => builder = builder.no_proxy(),
        }

        let client = builder.build().map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    /// Sends the request and hands back the open response. Anything but
    /// `200 OK` is an error; the response is dropped, and its connection
    /// released, on that path.
    pub async fn fetch(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        debug!(url, "fetching document");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(url, status = status.as_u16(), "unexpected response status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Fetches `url` and drains the whole body.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.fetch(url).await?;
        let body = response.bytes().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;
        Ok(body.to_vec())
    }
}
