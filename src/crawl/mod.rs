//! Crawl orchestration: listing pagination, detail fan-out and record merging.
//!
//! One [`Crawler`] owns one [`PageFetcher`] (and with it one pooled HTTP
//! client) for the whole crawl. Listing pages are walked strictly in sequence;
//! only detail pages are fetched concurrently, bounded by
//! `max_concurrent_details` and joined in input order.

pub mod categories;
pub mod details;
pub mod listing;
pub mod merge;


pub use details::DetailCollector;
pub use listing::ListingWalker;
pub use merge::{MergeOutcome, merge};

use tracing::{info, warn};
use url::Url;

use crate::config::CrawlerConfig;
use crate::descriptor::PageDescriptor;
use crate::fetcher::PageFetcher;
use crate::models::{CategoryResult, ProductRecord};
use crate::utils::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlOptions {
    pub max_pages: usize,
    pub max_concurrent_details: usize,
}

impl From<&CrawlerConfig> for CrawlOptions {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            max_concurrent_details: config.max_concurrent_details,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    pub records: Vec<ProductRecord>,
    pub stubs_found: usize,
    pub skipped: Vec<String>,
}

pub struct Crawler<F: PageFetcher> {
    fetcher: F,
    descriptor: PageDescriptor,
    options: CrawlOptions,
}

impl<F: PageFetcher> Crawler<F> {
    pub fn new(fetcher: F, descriptor: PageDescriptor, options: CrawlOptions) -> Self {
        Self {
            fetcher,
            descriptor,
            options,
        }
    }

    /// Walk one listing, collect its detail pages and merge the results.
    pub async fn crawl_listing(&self, start_url: &str) -> CrawlReport {
        let walker = ListingWalker::new(&self.fetcher, &self.descriptor, self.options.max_pages);
        let stubs = walker.walk(start_url).await;

        let urls: Vec<&str> = stubs.iter().map(|s| s.product_url.as_str()).collect();
        let collector = DetailCollector::new(
            &self.fetcher,
            &self.descriptor,
            self.options.max_concurrent_details,
        );
        let details = collector.collect_all(&urls).await;

        let MergeOutcome { records, skipped } = merge(&stubs, details);
        info!(
            "Scraping completed. Extracted data for {} of {} products.",
            records.len(),
            stubs.len()
        );

        CrawlReport {
            records,
            stubs_found: stubs.len(),
            skipped,
        }
    }

    /// Enumerate categories under `root_url` and crawl each one in order.
    pub async fn crawl_categories(&self, root_url: &str) -> Result<Vec<CategoryResult>> {
        let categories = categories::enumerate(&self.fetcher, root_url, &self.descriptor).await?;

        let mut results = Vec::with_capacity(categories.len());
        for category in categories {
            info!("Scraping category: {}", category.name);
            let report = self.crawl_listing(&category.url).await;
            if report.records.is_empty() {
                warn!("Category {} produced no records", category.name);
            }
            results.push(CategoryResult {
                name: category.name,
                records: report.records,
            });
        }

        Ok(results)
    }
}

/// Serialize `url` the way [`Url`] does, so `https://host` and `https://host/`
/// compare equal. Unparsable input is kept as-is.
pub(crate) fn canonical_url(url: &str) -> String {
    let url = url.trim();
    Url::parse(url)
        .map(String::from)
        .unwrap_or_else(|_| url.to_string())
}

/// Resolve `href` against the page it was found on. Unparsable input is kept as-is.
pub(crate) fn resolve_link(page_url: &str, href: &str) -> String {
    let href = href.trim();
    Url::parse(page_url)
        .and_then(|base| base.join(href))
        .map(String::from)
        .unwrap_or_else(|_| href.to_string())
}
