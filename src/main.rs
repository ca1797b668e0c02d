//! CLI entry point: fetch the aggregated article list and print it as JSON,
//! optionally filtering it or enriching a single story.

use std::error::Error;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use jamshedpur_news::cli::Cli;
use jamshedpur_news::{NewsPipeline, PipelineConfig, search, selection_token};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    debug!(?args.query, ?args.search, ?args.article, "Parsed CLI arguments");

    let pipeline = NewsPipeline::new(PipelineConfig {
        newsapi_key: args.newsapi_key,
        gnews_key: args.gnews_key,
        cache_ttl: Duration::from_secs(args.cache_ttl_sec),
    });

    let articles = pipeline.get_articles(&args.query).await;
    info!(count = articles.len(), query = %args.query, "Fetched article list");

    if let Some(index) = args.article {
        let token = selection_token(&articles);
        let Some(article) = pipeline.select_article(&token, index, &args.query).await else {
            return Err(format!("no article at index {index}").into());
        };
        println!("{}", serde_json::to_string_pretty(&article)?);
        return Ok(());
    }

    if let Some(needle) = args.search {
        let hits = search(&needle, &articles);
        info!(count = hits.len(), needle = %needle, "Search complete");
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&articles)?);
    Ok(())
}
