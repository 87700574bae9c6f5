//! Compiled selector bundle shared by every stage of a crawl.
//!
//! [`PageDescriptor`] is built once from [`SelectorConfig`] and is immutable for
//! the duration of the crawl. All CSS parsing happens here, so a bad selector is
//! reported before any request is made.

use scraper::{ElementRef, Selector};

use crate::config::SelectorConfig;
use crate::utils::error::{AppError, Result};

#[derive(Debug, Clone)]
pub struct PageDescriptor {
    pub category_container: Option<Selector>,
    pub category_name: Selector,
    pub category_link: Selector,
    pub product_container: Selector,
    pub product_title: Selector,
    pub product_image: Selector,
    pub product_link: Selector,
    pub next_page: Selector,
    pub detail_table: Selector,
    pub link_attribute: String,
    pub image_attribute: String,
    pub(crate) table_row: Selector,
    pub(crate) table_cell: Selector,
}

impl PageDescriptor {
    pub fn from_config(config: &SelectorConfig) -> Result<Self> {
        let category_container = config
            .category_container
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(compile)
            .transpose()?;

        // Without a dedicated link selector the detail URL is read off the title anchor
        let product_link = config
            .product_link
            .as_deref()
            .unwrap_or(config.product_title.as_str());

        Ok(Self {
            category_container,
            category_name: compile(&config.category_name)?,
            category_link: compile(&config.category_link)?,
            product_container: compile(&config.product_container)?,
            product_title: compile(&config.product_title)?,
            product_image: compile(&config.product_image)?,
            product_link: compile(product_link)?,
            next_page: compile(&config.next_page)?,
            detail_table: compile(&config.detail_table)?,
            link_attribute: config.link_attribute.clone(),
            image_attribute: config.image_attribute.clone(),
            table_row: compile("tr")?,
            table_cell: compile("td")?,
        })
    }
}

pub fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AppError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Whitespace-normalised text content of an element.
pub fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
