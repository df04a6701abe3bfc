use std::{future::Future, time::Duration};

use anyhow::{Error, Result};
use reqwest::Client;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Status code and body of a GET, nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Only a plain `200` counts as success.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Anything that can GET a url.
pub trait Transport {
    fn get(&self, url: &str) -> impl Future<Output = Result<RawResponse, Error>> + Send;
}

#[derive(Clone)]
pub struct PriceClient {
    client: Client,
}

impl PriceClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client })
    }
}

impl Transport for PriceClient {
    async fn get(&self, url: &str) -> Result<RawResponse, Error> {
        let res = self.client.get(url).send().await?;

        let status = res.status().as_u16();
        let body = res.text().await?;
        debug!(status, bytes = body.len(), "received response");

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_200_is_ok() {
        let ok = RawResponse {
            status: 200,
            body: String::new(),
        };
        let created = RawResponse {
            status: 201,
            body: String::new(),
        };
        let missing = RawResponse {
            status: 404,
            body: String::new(),
        };

        assert!(ok.is_ok());
        assert!(!created.is_ok());
        assert!(!missing.is_ok());
    }

    #[test]
    fn test_client_builds() {
        assert!(PriceClient::new().is_ok());
        assert!(PriceClient::with_timeout(Duration::from_secs(1)).is_ok());
    }
}
