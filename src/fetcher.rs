use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error};

use crate::config::CrawlerConfig;
use crate::utils::error::Result;

/// Outcome of a single GET. `body` is only present for HTTP 200.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    pub url: String,
    /// `None` when the request never produced a response (DNS, reset, timeout)
    pub status: Option<u16>,
    pub body: Option<String>,
    pub response_time_ms: u64,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        self.body.is_some()
    }

    pub fn into_body(self) -> Option<String> {
        self.body
    }

    fn absent(url: &str, status: Option<u16>, start_time: Instant) -> Self {
        Self {
            url: url.to_string(),
            status,
            body: None,
            response_time_ms: start_time.elapsed().as_millis() as u64,
        }
    }
}

/// Retrieves raw markup. Implementations never fail: every HTTP or transport
/// problem is logged and reported as a page without a body.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchedPage;
}

/// `reqwest`-backed fetcher; one pooled client serves the whole crawl.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let mut builder = Client::builder().timeout(Duration::from_secs(config.request_timeout));

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchedPage {
        let start_time = Instant::now();

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to fetch page: {}, error: {}", url, e);
                return FetchedPage::absent(url, None, start_time);
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            error!("Failed to fetch page: {}, status code: {}", url, status.as_u16());
            return FetchedPage::absent(url, Some(status.as_u16()), start_time);
        }

        match response.text().await {
            Ok(body) => {
                let page = FetchedPage {
                    url: url.to_string(),
                    status: Some(status.as_u16()),
                    body: Some(body),
                    response_time_ms: start_time.elapsed().as_millis() as u64,
                };
                debug!("Fetched {} in {}ms", url, page.response_time_ms);
                page
            }
            Err(e) => {
                error!("Failed to read body of {}: {}", url, e);
                FetchedPage::absent(url, Some(status.as_u16()), start_time)
            }
        }
    }
}
