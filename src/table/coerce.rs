use std::sync::OnceLock;

use regex::Regex;

use crate::Error;

/// Ratings that do not read as a finite number become the missing marker (`None`).
pub fn coerce_rating(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|rating| rating.is_finite())
}

/// Minutes from the first run of digits, so "30 mins" and "30-35 min" both give 30.
pub fn coerce_delivery_time(text: &str) -> crate::Result<u32> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"[0-9]+").expect("regex should be valid"));
    let digits = re
        .find(text)
        .ok_or_else(|| Error::Clean(format!("delivery time {text:?} has no digits")))?;
    digits
        .as_str()
        .parse()
        .map_err(|e| Error::Clean(format!("delivery time {text:?}: {e}")))
}
