pub mod config;
pub mod error;
pub mod types;

pub use config::{ClientConfig, SiteConfig};
pub use error::{Error, Result};
pub use types::{
    Article, ArticleList, Cluster, ClusterList, ClusterRef, CustomAd, FaqItem, SiteInfo, TocItem,
};

pub mod prelude {
    pub use crate::{Article, Cluster, Error, Result, SiteInfo};
}
