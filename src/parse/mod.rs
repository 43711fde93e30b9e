mod error;
mod listing_page;
mod static_selector;
mod text_from_selection;

pub use error::Error;
pub use listing_page::{ExtractionPolicy, Listings, Record};
