use tracing::warn;

use crate::models::{DetailRecord, ItemStub, ProductRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub records: Vec<ProductRecord>,
    /// Titles of stubs dropped for lack of detail data
    pub skipped: Vec<String>,
}

/// Positional join of stubs with the detail records collected for them.
/// A stub whose detail record is empty is dropped.
pub fn merge(stubs: &[ItemStub], details: Vec<DetailRecord>) -> MergeOutcome {
    if stubs.len() != details.len() {
        warn!(
            "Merging {} stubs with {} detail records, unmatched entries are ignored",
            stubs.len(),
            details.len()
        );
    }

    let mut outcome = MergeOutcome::default();
    for (stub, details) in stubs.iter().zip(details) {
        if details.is_empty() {
            warn!("Skipping {} as no details were extracted.", stub.title);
            outcome.skipped.push(stub.title.clone());
        } else {
            outcome.records.push(ProductRecord::new(stub, details));
        }
    }
    outcome
}
