use crate::core::FetchError;
use crate::holdings::types::HoldingRecord;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Anything that can produce the current holdings list.
///
/// The screen owns one of these and calls it once per refresh.
#[async_trait]
pub trait HoldingsSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<HoldingRecord>, FetchError>;
}

/// HTTP fetcher for the holdings endpoint.
///
/// Built once from config and passed to whoever needs it; there is no
/// process-wide client.
#[derive(Clone)]
pub struct HoldingsClient {
    http: reqwest::Client,
    url: Url,
}

impl HoldingsClient {
    pub fn new(url: Url, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, url })
    }

    async fn get(&self) -> Result<Vec<HoldingRecord>, FetchError> {
        let resp = self.http.get(self.url.clone()).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(FetchError::new(format!("HTTP {status}: {text}")));
        }

        debug!(bytes = text.len(), "holdings payload received");
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl HoldingsSource for HoldingsClient {
    async fn fetch(&self) -> Result<Vec<HoldingRecord>, FetchError> {
        match self.get().await {
            Ok(holdings) => {
                info!(url = %self.url, count = holdings.len(), "fetched holdings");
                Ok(holdings)
            }
            Err(e) => {
                warn!(url = %self.url, error = %e, "holdings fetch failed");
                Err(e)
            }
        }
    }
}
