use scraper::{ElementRef, Html};
use std::collections::HashSet;
use tracing::{info, warn};

use super::{canonical_url, resolve_link};
use crate::descriptor::{PageDescriptor, element_text};
use crate::fetcher::PageFetcher;
use crate::models::{ItemStub, NOT_AVAILABLE};

/// Products and pagination link extracted from one listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub stubs: Vec<ItemStub>,
    /// Product containers matched, including ones that failed extraction
    pub containers: usize,
    pub next_url: Option<String>,
}

/// Follows "next page" links from a start URL, collecting product stubs.
pub struct ListingWalker<'a, F: PageFetcher> {
    fetcher: &'a F,
    descriptor: &'a PageDescriptor,
    max_pages: usize,
}

impl<'a, F: PageFetcher> ListingWalker<'a, F> {
    pub fn new(fetcher: &'a F, descriptor: &'a PageDescriptor, max_pages: usize) -> Self {
        Self {
            fetcher,
            descriptor,
            max_pages,
        }
    }

    /// Walk the pagination chain strictly in order. A failed fetch ends the walk and
    /// returns what was gathered so far. So does a URL seen before or the page bound.
    pub async fn walk(&self, start_url: &str) -> Vec<ItemStub> {
        let mut stubs = Vec::new();
        let mut visited = HashSet::new();
        // Next links come back through `Url::join`, so the start URL must share their form
        let mut current_url = Some(canonical_url(start_url));
        let mut page = 1;

        while let Some(url) = current_url.take() {
            if page > self.max_pages {
                warn!("Stopping at {}: page limit of {} reached", url, self.max_pages);
                break;
            }
            if !visited.insert(url.clone()) {
                warn!("Next page {} was already visited, stopping pagination", url);
                break;
            }

            info!("Scraping page {}: {}", page, url);
            let Some(html) = self.fetcher.fetch(&url).await.into_body() else {
                break;
            };

            let listing = parse_listing_page(&html, &url, self.descriptor);
            info!(
                "Scraped {} products from page {} ({} containers)",
                listing.stubs.len(),
                page,
                listing.containers
            );
            stubs.extend(listing.stubs);

            match listing.next_url {
                Some(next) => {
                    current_url = Some(next);
                    page += 1;
                }
                None => info!("No more pages found. Scraping completed."),
            }
        }

        stubs
    }
}

pub fn parse_listing_page(html: &str, page_url: &str, descriptor: &PageDescriptor) -> ListingPage {
    let document = Html::parse_document(html);
    let mut listing = ListingPage::default();

    for container in document.select(&descriptor.product_container) {
        listing.containers += 1;
        match extract_stub(container, page_url, descriptor) {
            Ok(stub) => listing.stubs.push(stub),
            Err(e) => warn!("Error extracting data for a product on {}: {}", page_url, e),
        }
    }

    listing.next_url = document
        .select(&descriptor.next_page)
        .next()
        .and_then(|link| link.value().attr(&descriptor.link_attribute))
        .map(|href| resolve_link(page_url, href));

    listing
}

/// A selector that matches nothing yields [`NOT_AVAILABLE`]. A matched element
/// missing its attribute is an extraction failure.
fn extract_stub(
    container: ElementRef,
    page_url: &str,
    descriptor: &PageDescriptor,
) -> Result<ItemStub, String> {
    let title = container
        .select(&descriptor.product_title)
        .next()
        .map(|el| element_text(&el))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let image_url = match container.select(&descriptor.product_image).next() {
        Some(el) => el
            .value()
            .attr(&descriptor.image_attribute)
            .map(|src| resolve_link(page_url, src))
            .ok_or_else(|| format!("image has no '{}' attribute", descriptor.image_attribute))?,
        None => NOT_AVAILABLE.to_string(),
    };

    let product_url = match container.select(&descriptor.product_link).next() {
        Some(el) => el
            .value()
            .attr(&descriptor.link_attribute)
            .map(|href| resolve_link(page_url, href))
            .ok_or_else(|| format!("link has no '{}' attribute", descriptor.link_attribute))?,
        None => NOT_AVAILABLE.to_string(),
    };

    Ok(ItemStub {
        title,
        image_url,
        product_url,
    })
}
