//! Tabular view over the scraped records and the per-cuisine summary built from it.

mod aggregate;
mod coerce;
mod export;

pub use aggregate::{Aggregate, CuisineRating};
pub use coerce::{coerce_delivery_time, coerce_rating};
pub use export::write_export;

use serde::{Deserialize, Serialize};

use crate::parse::Record;

/// One cleaned record. Column names follow the scraped card labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Cuisine")]
    pub cuisine: String,
    /// `None` when the card's rating was not a number.
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
    /// Minutes.
    #[serde(rename = "Delivery Time")]
    pub delivery_time: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// One row per record, in record order.
    ///
    /// # Errors
    /// Fails when a delivery time carries no digits.
    pub fn from_records(records: Vec<Record>) -> crate::Result<Self> {
        let rows = records
            .into_iter()
            .map(|record| -> crate::Result<Row> {
                Ok(Row {
                    rating: coerce_rating(record.rating()),
                    delivery_time: coerce_delivery_time(record.delivery_time())?,
                    name: record.name().to_owned(),
                    cuisine: record.cuisine().to_owned(),
                })
            })
            .collect::<crate::Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn missing_ratings(&self) -> usize {
        self.rows.iter().filter(|row| row.rating.is_none()).count()
    }

    pub fn average_rating_by_cuisine(&self) -> Aggregate {
        Aggregate::from_rows(&self.rows)
    }
}
