use std::str::FromStr;

use scraper::Html;

use super::record::Record;
use crate::parse::Error;
use crate::static_selector;

/// What to do with a restaurant card that lacks one of its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionPolicy {
    /// Fail the whole page on the first incomplete card.
    Strict,
    /// Drop incomplete cards and count them.
    #[default]
    Lenient,
}

impl FromStr for ExtractionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(format!("unknown extraction policy `{other}`")),
        }
    }
}

/// Records pulled from one listing page, in document order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub skipped: usize,
}

pub struct Listings;

impl Listings {
    pub fn from_html(html: &str, policy: ExtractionPolicy) -> Result<Extraction, Error> {
        let document = Html::parse_document(html);
        Self::from_html_element(document.root_element(), policy)
    }

    pub fn from_html_element(
        element: scraper::ElementRef<'_>,
        policy: ExtractionPolicy,
    ) -> Result<Extraction, Error> {
        static_selector!(CARD_SELECTOR <- "div.restaurant-card");

        let cards = element.select(&CARD_SELECTOR);
        let mut extraction = Extraction {
            records: Vec::with_capacity(cards.size_hint().0),
            skipped: 0,
        };
        for (index, card) in cards.enumerate() {
            match Record::from_html_element(card) {
                Ok(record) => extraction.records.push(record),
                Err(e) if policy == ExtractionPolicy::Lenient => {
                    log::warn!("Skipping restaurant card #{index}: {e}");
                    extraction.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(extraction)
    }
}
