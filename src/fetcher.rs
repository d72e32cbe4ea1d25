use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, USER_AGENT};

use crate::config::ScraperConfig;
use crate::error::ScrapeError;

/// Fetches raw recipe pages by numeric id. Holds one blocking client with
/// the configured user-agent and timeout; no caching, no retries.
pub struct PageFetcher {
    client: Client,
    base_url: String,
}

impl PageFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        // Set up headers with a realistic browser user agent
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, config.user_agent.parse()?);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Fetch the HTML document for one recipe id. Any transport failure or
    /// non-2xx status is returned as an error; callers skip the id and
    /// move on.
    pub fn fetch(&self, id: u64) -> Result<String, ScrapeError> {
        let url = format!("{}?rid={}", self.base_url, id);
        debug!("fetching {url}");

        let body = self
            .client
            .get(&url)
            .send()?
            .error_for_status()?
            .text()?;

        Ok(body)
    }
}
