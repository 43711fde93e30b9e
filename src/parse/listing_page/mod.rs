mod listings;
mod record;

pub use listings::{ExtractionPolicy, Listings};
pub use record::Record;
