use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use catalog_crawler::config::{CrawlMode, OutputFormat};
use catalog_crawler::utils::logging;
use catalog_crawler::{AppConfig, AppError, runner};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Configuration file layered over config/default
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Root page (categories mode) or first listing page (single mode)
    #[arg(long)]
    base_url: Option<String>,

    /// Output file path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    #[arg(long, value_enum)]
    mode: Option<CrawlMode>,

    /// Maximum detail pages fetched at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Maximum listing pages followed per walk
    #[arg(long)]
    max_pages: Option<usize>,
}

impl Args {
    fn apply(self, config: &mut AppConfig) {
        if let Some(base_url) = self.base_url {
            config.crawler.base_url = base_url;
        }
        if let Some(output) = self.output {
            config.output.path = output;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(mode) = self.mode {
            config.crawler.mode = mode;
        }
        if let Some(concurrency) = self.concurrency {
            config.crawler.max_concurrent_details = concurrency;
        }
        if let Some(max_pages) = self.max_pages {
            config.crawler.max_pages = max_pages;
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    let _guard = logging::init(&config.logging)?;

    match runner::run(&config).await {
        Ok(summary) => {
            info!("Saved {} records to {}", summary.records, summary.output.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(AppError::NoRecords) => Ok(ExitCode::from(2)),
        Err(e) => {
            error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
