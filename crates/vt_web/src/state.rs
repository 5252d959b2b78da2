use std::sync::Arc;
use vt_client::ContentClient;
use vt_core::SiteConfig;

pub struct AppState {
    pub client: Arc<ContentClient>,
    pub site: SiteConfig,
}

impl AppState {
    pub fn new(client: Arc<ContentClient>, site: SiteConfig) -> Self {
        Self { client, site }
    }
}
