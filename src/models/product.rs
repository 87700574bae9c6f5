use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Placeholder for any stub field whose selector did not match.
pub const NOT_AVAILABLE: &str = "N/A";

pub const TITLE_KEY: &str = "Title";
pub const IMAGE_URL_KEY: &str = "Image URL";
pub const PRODUCT_URL_KEY: &str = "Product URL";

/// Summary of one product as it appears on a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStub {
    pub title: String,
    pub image_url: String,
    pub product_url: String,
}

/// Attribute table scraped from a detail page, in row order.
pub type DetailRecord = IndexMap<String, String>;

/// A listing stub joined with its detail attributes.
///
/// Detail columns come first in table order, followed by the three stub columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRecord {
    fields: IndexMap<String, String>,
}

impl ProductRecord {
    pub fn new(stub: &ItemStub, details: DetailRecord) -> Self {
        let mut fields = details;
        for (key, value) in [
            (TITLE_KEY, &stub.title),
            (IMAGE_URL_KEY, &stub.image_url),
            (PRODUCT_URL_KEY, &stub.product_url),
        ] {
            // A detail row with the same name gives way and its column moves to the end
            fields.shift_remove(key);
            fields.insert(key.to_string(), value.clone());
        }
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
