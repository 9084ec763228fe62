use crate::config::HttpConfig;
use crate::error::{Result, ScraperError};
use crate::types::PageResponse;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Source of region pages. The pipeline only talks to this port so tests
/// can serve canned HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<PageResponse>;
}

pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ScraperError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<PageResponse> {
        let transport = |source: reqwest::Error| ScraperError::Transport { url: url.to_string(), source };

        let resp = self.client.get(url).send().await.map_err(transport)?;
        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();
        let body = resp.text().await.map_err(transport)?;
        debug!(status, bytes = body.len(), url = %final_url, "Fetched page");

        Ok(PageResponse { status, url: final_url, body })
    }
}
