//! HTTP seam for identify requests.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::identify::IdentifyError;

/// GETs a URL and parses the body as JSON.
#[async_trait]
pub trait FeatureInfoFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, IdentifyError>;
}

/// [`FeatureInfoFetcher`] over reqwest.
///
/// The response status is not inspected: a WMS exception with a JSON body is
/// shown as-is, anything that is not JSON surfaces as a parse failure.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, IdentifyError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client))
    }

    /// Reuse an existing HTTP client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeatureInfoFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, IdentifyError> {
        let body = self.client.get(url).send().await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_is_an_http_error() {
        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher
            .fetch_json(&test_utils::unreachable_url().await)
            .await
            .unwrap_err();
        assert!(matches!(err, IdentifyError::Http(_)), "{err:?}");
    }
}
