use crate::error::{Result, ScanError};
use crate::page::Page;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("wikistats/", env!("CARGO_PKG_VERSION"));

/// HTTP GET + HTML parse. One request per call, no retries.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &Url) -> Result<Page> {
        debug!("Fetching {}", url);

        let start = Instant::now();
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        debug!("{} -> {} in {:?}", url, status.as_u16(), start.elapsed());

        if status == StatusCode::NOT_FOUND {
            return Err(ScanError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ScanError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        // Relative links resolve against where we ended up after redirects.
        let final_url = response.url().clone();
        let body = response.text().await?;
        Ok(Page::parse(final_url, &body))
    }
}
