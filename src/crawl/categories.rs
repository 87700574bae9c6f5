use scraper::Html;
use tracing::{error, info, warn};

use super::resolve_link;
use crate::descriptor::{PageDescriptor, element_text};
use crate::fetcher::PageFetcher;
use crate::models::Category;
use crate::utils::error::{AppError, Result};

/// Fetch the root page and list its categories in selector order.
/// An unreachable root page yields an empty list.
pub async fn enumerate<F: PageFetcher>(
    fetcher: &F,
    root_url: &str,
    descriptor: &PageDescriptor,
) -> Result<Vec<Category>> {
    if descriptor.category_container.is_none() {
        return Err(AppError::Validation(
            "category_container selector is required to enumerate categories".to_string(),
        ));
    }

    info!("Fetching main categories from {}", root_url);
    let Some(html) = fetcher.fetch(root_url).await.into_body() else {
        error!("Failed to fetch categories.");
        return Ok(Vec::new());
    };

    let categories = parse_categories(&html, root_url, descriptor);
    info!("Found {} main categories.", categories.len());
    Ok(categories)
}

pub fn parse_categories(html: &str, root_url: &str, descriptor: &PageDescriptor) -> Vec<Category> {
    let Some(container) = &descriptor.category_container else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut categories = Vec::new();

    for element in document.select(container) {
        let name = element
            .select(&descriptor.category_name)
            .next()
            .map(|el| element_text(&el))
            .filter(|name| !name.is_empty());
        let href = element
            .select(&descriptor.category_link)
            .next()
            .and_then(|el| el.value().attr(&descriptor.link_attribute));

        match (name, href) {
            (Some(name), Some(href)) => categories.push(Category {
                name,
                url: resolve_link(root_url, href),
            }),
            (None, _) => warn!("Error extracting category: no name found"),
            (Some(name), None) => warn!("Error extracting category URL for {}", name),
        }
    }

    categories
}
