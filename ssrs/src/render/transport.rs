use super::error::FetchFailure;
use async_trait::async_trait;
use mockall::automock;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_USER_AGENT: &str = concat!("ssrs-render/", env!("CARGO_PKG_VERSION"));

/// Fetches the body behind a fully composed render URL.
///
/// Implementations decide which credentials go along with the request, the render call
/// never names any.
#[automock]
#[async_trait]
pub trait ReportTransport: Send + Sync {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchFailure>;
}

/// reqwest backed transport. Clones share one connection pool.
///
/// The only credentials it sends are the ambient ones: userinfo embedded in the URL and
/// whatever proxy configuration the environment provides.
#[derive(Debug, Clone)]
pub struct HttpReportTransport {
    client: reqwest::Client,
}

impl HttpReportTransport {
    pub fn with_options(timeout: Option<Duration>, user_agent: &str) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpReportTransport {
    fn default() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .unwrap_or_default();
        Self::from_client(client)
    }
}

#[async_trait]
impl ReportTransport for HttpReportTransport {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchFailure> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::new(url, e))?;

        let status = res.status();
        debug!(server = "ReportServer", "API Response status was {}", status);
        if !status.is_success() {
            warn!(server = "ReportServer", "Render request failed with {}", status);
            return Err(FetchFailure::status(url, status));
        }

        let body = res.bytes().await.map_err(|e| FetchFailure::new(url, e))?;
        Ok(body.to_vec())
    }
}
