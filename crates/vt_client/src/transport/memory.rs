use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use url::{Position, Url};
use vt_core::{Error, Result};
use super::Transport;

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Status(u16),
    Unreachable,
}

/// In-memory stand-in for the content API, keyed by path and query
/// (e.g. `/api/public/articles?limit=1000`). Unknown routes answer 404.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    routes: RwLock<HashMap<String, Reply>>,
    calls: RwLock<HashMap<String, usize>>,
    total_calls: AtomicUsize,
    last_api_key: RwLock<Option<String>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, route: &str, body: impl Into<String>) -> &Self {
        self.set(route, Reply::Body(body.into()))
    }

    pub fn respond_json(&self, route: &str, value: &serde_json::Value) -> &Self {
        self.respond(route, value.to_string())
    }

    pub fn fail(&self, route: &str, status: u16) -> &Self {
        self.set(route, Reply::Status(status))
    }

    pub fn unreachable(&self, route: &str) -> &Self {
        self.set(route, Reply::Unreachable)
    }

    /// Number of requests made for one route.
    pub fn calls_to(&self, route: &str) -> usize {
        self.calls
            .read()
            .map(|calls| calls.get(route).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }

    pub fn last_api_key(&self) -> Option<String> {
        self.last_api_key.read().ok().and_then(|key| key.clone())
    }

    fn set(&self, route: &str, reply: Reply) -> &Self {
        if let Ok(mut routes) = self.routes.write() {
            routes.insert(route.to_string(), reply);
        }
        self
    }

    fn route_of(url: &Url) -> String {
        url[Position::BeforePath..].to_string()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, url: &Url, api_key: &str) -> Result<String> {
        let route = Self::route_of(url);
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut calls) = self.calls.write() {
            *calls.entry(route.clone()).or_insert(0) += 1;
        }
        if let Ok(mut key) = self.last_api_key.write() {
            *key = Some(api_key.to_string());
        }

        let reply = self
            .routes
            .read()
            .map_err(|_| Error::SourceUnavailable("memory transport poisoned".to_string()))?
            .get(&route)
            .cloned();

        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(Error::Status { status, url: url.to_string() }),
            Some(Reply::Unreachable) => {
                Err(Error::SourceUnavailable(format!("{}: connection refused", url)))
            }
            None => Err(Error::Status { status: 404, url: url.to_string() }),
        }
    }
}
