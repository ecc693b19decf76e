use anyhow::Context;
use clap::Parser;
use job_scout::logger::init_logger;
use job_scout::{Aggregator, AggregatorConfig, SearchRequest};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "job-scout")]
#[command(about = "Search Duunitori and Työmarkkinatori job listings in one go")]
struct Cli {
    /// Free-text search, e.g. "putkiasentaja"
    #[arg(short, long, default_value = "")]
    query: String,

    /// City or region, e.g. "Turku" or "uusimaa"
    #[arg(short, long, default_value = "")]
    location: String,

    /// Result page; anything but a positive number means 1
    #[arg(short, long, default_value = "1")]
    page: String,

    /// TOML file overriding the default settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as JSON instead of a list
    #[arg(long)]
    json: bool,

    /// Also write the result as JSON to this file
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = match &cli.config {
        Some(path) => AggregatorConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AggregatorConfig::default(),
    };

    let aggregator = Aggregator::new(config).context("Failed to set up job sources")?;
    let request = SearchRequest::new(
        cli.query.as_str(),
        cli.location.as_str(),
        SearchRequest::parse_page(&cli.page),
    );

    let result = aggregator.search(&request).await;

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&result)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved {} listings to {}", result.listings.len(), path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if let Some(error) = &result.error {
        eprintln!("⚠️  {}", error);
    }

    for (i, listing) in result.listings.iter().enumerate() {
        println!("{}. {}", i + 1, listing.title);
        println!("   {} · {}", listing.company, listing.location);
        println!("   {} ({})", listing.url, listing.source_id.display_name());
        for alternate in &listing.alternates {
            println!("   also on {}: {}", alternate.source_id.display_name(), alternate.url);
        }
        println!();
    }

    println!(
        "{} listings on page {}{}",
        result.listings.len(),
        request.page,
        if result.has_next_page { ", more available" } else { "" }
    );

    Ok(())
}
