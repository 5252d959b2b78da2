use async_trait::async_trait;
use url::Url;
use vt_core::Result;

pub mod http;
pub mod memory;

pub use http::HttpTransport;
pub use memory::MemoryTransport;

/// Performs one authenticated GET against the content API and returns the raw body.
///
/// Implementations map network failures to `Error::SourceUnavailable` and
/// non-success statuses to `Error::Status`.
#[async_trait]
pub trait Transport: Send + Sync {
    fn name(&self) -> &str;

    async fn get(&self, url: &Url, api_key: &str) -> Result<String>;
}
