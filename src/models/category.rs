use serde::{Deserialize, Serialize};

use crate::models::ProductRecord;

/// A category entry found on the root navigation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub url: String,
}

/// Records scraped for one category, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub name: String,
    pub records: Vec<ProductRecord>,
}

impl CategoryResult {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
