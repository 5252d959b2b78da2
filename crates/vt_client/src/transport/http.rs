use async_trait::async_trait;
use tracing::debug;
use url::Url;
use vt_core::config::API_KEY_HEADER;
use vt_core::{Error, Result};
use super::Transport;

/// reqwest-backed transport. Timeouts are whatever reqwest defaults to.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("vitrine/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn get(&self, url: &Url, api_key: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .map_err(|e| Error::SourceUnavailable(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| Error::SourceUnavailable(format!("{}: {}", url, e)))
    }
}
