use std::path::PathBuf;
use tracing::{error, info};

use crate::config::{AppConfig, CrawlMode};
use crate::crawl::{CrawlOptions, Crawler};
use crate::descriptor::PageDescriptor;
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::sink::sink_for;
use crate::utils::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub tables: usize,
    /// Where the output actually landed
    pub output: PathBuf,
}

/// Crawl with a fresh HTTP client and write the configured output.
pub async fn run(config: &AppConfig) -> Result<RunSummary> {
    let descriptor = PageDescriptor::from_config(&config.selectors)?;
    let fetcher = HttpFetcher::new(&config.crawler)?;
    run_with(fetcher, descriptor, config).await
}

/// Returns [`AppError::NoRecords`] without touching the output when nothing was scraped.
pub async fn run_with<F: PageFetcher>(
    fetcher: F,
    descriptor: PageDescriptor,
    config: &AppConfig,
) -> Result<RunSummary> {
    let sink = sink_for(config.output.format);
    let path = &config.output.path;
    let base_url = &config.crawler.base_url;

    info!("Starting the product scraping process...");

    // The crawler, and with it the HTTP client, is released before any output is written
    let summary = match config.crawler.mode {
        CrawlMode::Single => {
            let report = {
                let crawler = Crawler::new(fetcher, descriptor, CrawlOptions::from(&config.crawler));
                crawler.crawl_listing(base_url).await
            };
            if report.records.is_empty() {
                error!("No data scraped. Exiting the process.");
                return Err(AppError::NoRecords);
            }

            sink.write(&report.records, path)?;
            RunSummary {
                records: report.records.len(),
                tables: 1,
                output: path.clone(),
            }
        }
        CrawlMode::Categories => {
            let results = {
                let crawler = Crawler::new(fetcher, descriptor, CrawlOptions::from(&config.crawler));
                crawler.crawl_categories(base_url).await?
            };
            let records: usize = results.iter().map(|r| r.records.len()).sum();
            if records == 0 {
                error!("No data scraped. Exiting the process.");
                return Err(AppError::NoRecords);
            }

            let written = sink.write_sheets(&results, path)?;
            RunSummary {
                records,
                tables: written.tables,
                output: written.destination,
            }
        }
    };

    info!(
        "Wrote {} records in {} table(s) as {} to {}",
        summary.records,
        summary.tables,
        sink.name(),
        summary.output.display()
    );
    Ok(summary)
}
