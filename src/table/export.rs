use std::{fs, path::Path};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Aggregate, Row, Table};

#[derive(Debug, Serialize)]
struct Export<'a> {
    scraped_at: DateTime<Utc>,
    rows: &'a [Row],
    averages: &'a Aggregate,
}

/// Writes the cleaned table and its averages as pretty json, replacing any previous file.
pub fn write_export(path: &Path, table: &Table, aggregate: &Aggregate) -> crate::Result<()> {
    let export = Export {
        scraped_at: Utc::now(),
        rows: table.rows(),
        averages: aggregate,
    };
    let f = fs::File::create(path)?;
    serde_json::to_writer_pretty(f, &export).map_err(From::from)
}
