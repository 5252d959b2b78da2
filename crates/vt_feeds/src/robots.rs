use serde::Serialize;
use vt_core::SiteConfig;

pub const DISALLOWED_PATHS: [&str; 2] = ["/api/", "/internal/"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsRule {
    pub user_agent: String,
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RobotsDirectives {
    pub rules: Vec<RobotsRule>,
    pub sitemap: String,
}

impl RobotsDirectives {
    /// Allow everything except API and internal paths.
    pub fn for_site(site: &SiteConfig) -> Self {
        Self {
            rules: vec![RobotsRule {
                user_agent: "*".to_string(),
                allow: vec!["/".to_string()],
                disallow: DISALLOWED_PATHS.iter().map(|p| p.to_string()).collect(),
            }],
            sitemap: site.link("/sitemap.xml"),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            out.push_str(&format!("User-agent: {}\n", rule.user_agent));
            for path in &rule.allow {
                out.push_str(&format!("Allow: {}\n", path));
            }
            for path in &rule.disallow {
                out.push_str(&format!("Disallow: {}\n", path));
            }
            out.push('\n');
        }
        out.push_str(&format!("Sitemap: {}\n", self.sitemap));
        out
    }
}
