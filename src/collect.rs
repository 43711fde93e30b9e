use std::ops::RangeInclusive;

use crate::{
    fetch::PageSource,
    parse::{ExtractionPolicy, Listings, Record},
};

/// Every record scraped across the page range, in page order.
#[derive(Debug, Default)]
pub struct Collection {
    pub records: Vec<Record>,
    pub skipped: usize,
}

/// Fetches and extracts each page in turn. The first failure aborts the whole run.
pub async fn collect_records(
    source: &impl PageSource,
    pages: RangeInclusive<u32>,
    policy: ExtractionPolicy,
) -> crate::Result<Collection> {
    let mut collection = Collection::default();
    for page in pages {
        let Some(html) = source.fetch_page(page).await? else {
            continue;
        };
        let extraction = Listings::from_html(&html, policy)?;
        log::info!(
            "Page {page}: {} restaurants, {} skipped",
            extraction.records.len(),
            extraction.skipped
        );
        collection.records.extend(extraction.records);
        collection.skipped += extraction.skipped;
    }
    Ok(collection)
}
