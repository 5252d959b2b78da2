use std::time::Duration;
use url::Url;
use crate::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://seo-authority-engine.vercel.app";
pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Settings for talking to the upstream content API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub api_key: String,
    pub cache_ttl: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base(base_url)?,
            api_key: String::new(),
            cache_ttl: DEFAULT_CACHE_TTL,
        })
    }

    pub fn with_url(mut self, url: &str) -> Result<Self> {
        self.base_url = parse_base(url)?;
        Ok(self)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Builds `{base}/api/public/{segments...}`, percent-encoding every segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "public"]).extend(segments);
        }
        url
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default API url is valid"),
            api_key: String::new(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// The public site the layer produces links for.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub site_url: Url,
}

impl SiteConfig {
    pub fn new(site_url: &str) -> Result<Self> {
        Ok(Self { site_url: parse_base(site_url)? })
    }

    /// Absolute link for a site-relative path, e.g. `link("/feed.xml")`.
    pub fn link(&self, path: &str) -> String {
        let base = self.site_url.as_str().trim_end_matches('/');
        if path.is_empty() || path == "/" {
            base.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { site_url: Url::parse(DEFAULT_SITE_URL).expect("default site url is valid") }
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("not a base URL: {}", raw)));
    }
    Ok(url)
}
