use clap::Parser;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use vt_client::ContentClient;
use vt_core::config::{DEFAULT_API_URL, DEFAULT_SITE_URL};
use vt_core::{ClientConfig, SiteConfig};
use vt_feeds::{collect_feed, collect_sitemap, render_sitemap, RobotsDirectives};
use vt_query::{article_page, latest_articles, list_topic_clusters, search_page, HOME_ARTICLE_LIMIT};
use vt_web::{create_app, AppState};

mod logging;

/// Durations like `60`, `90s`, `1m30s` or `1h`. A bare number is seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut seen_number = false;

        for c in s.trim().chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
                continue;
            }
            let num: u64 = current_number
                .parse()
                .map_err(|_| format!("Expected a number before '{}'", c))?;
            let unit = match c {
                's' => 1,
                'm' => 60,
                'h' => 3600,
                _ => return Err(format!("Invalid duration unit: {}", c)),
            };
            total_seconds = num
                .checked_mul(unit)
                .and_then(|secs| total_seconds.checked_add(secs))
                .ok_or_else(|| "Duration is too large".to_string())?;
            current_number.clear();
            seen_number = true;
        }

        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_seconds = total_seconds
                .checked_add(num)
                .ok_or_else(|| "Duration is too large".to_string())?;
            seen_number = true;
        }

        if !seen_number {
            return Err("Duration must include a number".to_string());
        }
        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Content aggregation and derived views over the content API", long_about = None)]
struct Cli {
    /// Base URL of the content API
    #[arg(long, env = "SEO_ENGINE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Static key sent as X-API-Key
    #[arg(long, env = "SEO_ENGINE_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,
    /// Public site URL used for every absolute link
    #[arg(long, env = "SITE_URL", default_value = DEFAULT_SITE_URL)]
    site_url: String,
    /// How long upstream responses stay fresh (e.g. 60s, 2m)
    #[arg(long, env = "VITRINE_CACHE_TTL", default_value = "60s")]
    cache_ttl: HumanDuration,
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve feed, sitemap, robots and the JSON query API
    Serve {
        #[arg(long, env = "VITRINE_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },
    /// Print every enumerable article slug
    Slugs,
    /// List the newest articles
    Latest {
        #[arg(long, default_value_t = HOME_ARTICLE_LIMIT)]
        limit: u32,
    },
    /// Search article titles, excerpts and keywords
    Search { query: String },
    /// Print the derived article page as JSON
    Article { slug: String },
    /// List clusters that have a hub page
    Topics,
    /// Print the RSS feed
    Feed,
    /// Print the sitemap
    Sitemap,
    /// Print robots.txt
    Robots,
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = ClientConfig::new(&cli.api_url)?
        .with_api_key(cli.api_key.clone())
        .with_cache_ttl(cli.cache_ttl.0);
    let site = SiteConfig::new(&cli.site_url)?;
    let client = Arc::new(ContentClient::new(config)?);
    info!("🔌 Content API at {} (cache {}s)", cli.api_url, cli.cache_ttl.0.as_secs());

    match cli.command {
        Commands::Serve { bind } => {
            let app = create_app(AppState::new(client, site));
            let listener = tokio::net::TcpListener::bind(bind).await?;
            info!("🪟 Serving on http://{}", bind);
            axum::serve(listener, app).await?;
        }
        Commands::Slugs => {
            let list = client.list_all_slugs().await?;
            for slug in &list.slugs {
                println!("{}", slug);
            }
            if list.is_truncated() {
                eprintln!("Only {} of {} articles are enumerable", list.slugs.len(), list.total);
            }
        }
        Commands::Latest { limit } => {
            for article in latest_articles(&client, limit).await {
                println!("- {} ({})", article.title, article.slug);
            }
        }
        Commands::Search { query } => {
            let results = search_page(&client, &query).await;
            println!("{} resultaten voor \"{}\"", results.total, results.query);
            for article in &results.articles {
                println!("- {} ({})", article.title, article.slug);
            }
        }
        Commands::Article { slug } => match article_page(&client, &slug).await {
            Some(page) => print_json(&page)?,
            None => anyhow::bail!("Article not found: {}", slug),
        },
        Commands::Topics => {
            let clusters = client.fetch_clusters().await?.clusters;
            for topic in list_topic_clusters(&clusters) {
                println!(
                    "- {} /onderwerp/{} ({} artikelen)",
                    topic.display_title(),
                    topic.pillar_slug.as_deref().unwrap_or_default(),
                    topic.article_count
                );
            }
        }
        Commands::Feed => print!("{}", collect_feed(&client, &site).await),
        Commands::Sitemap => print!("{}", render_sitemap(&collect_sitemap(&client, &site).await)),
        Commands::Robots => print!("{}", RobotsDirectives::for_site(&site).render()),
    }

    Ok(())
}
