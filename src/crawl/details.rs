use futures::stream::{self, StreamExt};
use scraper::{ElementRef, Html};
use tracing::{info, warn};

use crate::descriptor::{PageDescriptor, element_text};
use crate::fetcher::PageFetcher;
use crate::models::{DetailRecord, NOT_AVAILABLE};

/// Fetches detail pages with bounded concurrency and extracts their attribute tables.
pub struct DetailCollector<'a, F: PageFetcher> {
    fetcher: &'a F,
    descriptor: &'a PageDescriptor,
    concurrency: usize,
}

impl<'a, F: PageFetcher> DetailCollector<'a, F> {
    pub fn new(fetcher: &'a F, descriptor: &'a PageDescriptor, concurrency: usize) -> Self {
        Self {
            fetcher,
            descriptor,
            concurrency: concurrency.max(1),
        }
    }

    /// One record per input URL, in input order regardless of completion order.
    /// Failed or link-less entries come back as empty records.
    pub async fn collect_all<S: AsRef<str>>(&self, urls: &[S]) -> Vec<DetailRecord> {
        stream::iter(urls)
            .map(|url| self.collect_one(url.as_ref()))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    async fn collect_one(&self, url: &str) -> DetailRecord {
        if url == NOT_AVAILABLE {
            warn!("Product has no detail link, skipping detail fetch");
            return DetailRecord::new();
        }

        info!("Scraping product details from {}", url);
        match self.fetcher.fetch(url).await.into_body() {
            Some(html) => parse_detail_table(&html, url, self.descriptor),
            None => {
                warn!("No detail page content for {}", url);
                DetailRecord::new()
            }
        }
    }
}

/// Reads `key: value` rows from the first table matching `detail_table`.
pub fn parse_detail_table(html: &str, url: &str, descriptor: &PageDescriptor) -> DetailRecord {
    let document = Html::parse_document(html);
    let mut record = DetailRecord::new();

    let Some(table) = document.select(&descriptor.detail_table).next() else {
        warn!("No product details table found for {}", url);
        return record;
    };

    for (index, row) in table.select(&descriptor.table_row).enumerate() {
        let cells: Vec<ElementRef> = row.select(&descriptor.table_cell).collect();
        match cells.as_slice() {
            [key, value] => {
                let key = element_text(key);
                let key = key.trim_end_matches(':').trim_end();
                record.insert(key.to_string(), element_text(value));
            }
            cells => warn!(
                "Skipping detail row {} with {} columns on {}",
                index,
                cells.len(),
                url
            ),
        }
    }

    record
}
