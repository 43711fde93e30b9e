use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Row;

/// Mean rating of one cuisine; `None` when none of its ratings were numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuisineRating {
    pub cuisine: String,
    pub rating: Option<f64>,
}

impl CuisineRating {
    pub fn new(cuisine: impl Into<String>, rating: Option<f64>) -> Self {
        Self {
            cuisine: cuisine.into(),
            rating,
        }
    }
}

/// One entry per distinct cuisine, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    entries: Vec<CuisineRating>,
}

impl Aggregate {
    pub(super) fn from_rows(rows: &[Row]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(&str, f64, u32)> = Vec::new();
        for row in rows {
            let slot = *index.entry(row.cuisine.as_str()).or_insert_with(|| {
                groups.push((row.cuisine.as_str(), 0.0, 0));
                groups.len() - 1
            });
            if let Some(rating) = row.rating {
                let group = &mut groups[slot];
                group.1 += rating;
                group.2 += 1;
            }
        }
        let entries = groups
            .into_iter()
            .map(|(cuisine, sum, count)| {
                CuisineRating::new(cuisine, (count > 0).then(|| sum / f64::from(count)))
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CuisineRating] {
        &self.entries
    }

    #[cfg(test)]
    pub fn get(&self, cuisine: &str) -> Option<&CuisineRating> {
        self.entries.iter().find(|entry| entry.cuisine == cuisine)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<CuisineRating> for Aggregate {
    fn from_iter<I: IntoIterator<Item = CuisineRating>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
