use std::{env, ops::RangeInclusive, path::PathBuf, str::FromStr};

use url::Url;

use crate::{fetch::StatusPolicy, parse::ExtractionPolicy, Error};

pub const DEFAULT_BASE_URL: &str = "https://www.swiggy.com/";
pub const DEFAULT_FIRST_PAGE: u32 = 1;
pub const DEFAULT_LAST_PAGE: u32 = 5;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";
pub const DEFAULT_OUTPUT: &str = "average_rating_by_cuisine.png";

/// Everything a run needs to know, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: Url,
    pub pages: RangeInclusive<u32>,
    pub user_agent: String,
    pub output: PathBuf,
    pub export: Option<PathBuf>,
    pub status_policy: StatusPolicy,
    pub extraction: ExtractionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url should be valid"),
            pages: DEFAULT_FIRST_PAGE..=DEFAULT_LAST_PAGE,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            export: None,
            status_policy: StatusPolicy::default(),
            extraction: ExtractionPolicy::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> crate::Result<Self> {
        let defaults = Self::default();

        let base_url = match lookup("SCRAPE_BASE_URL") {
            Some(raw) => base_url(&raw)?,
            None => {
                log::info!("SCRAPE_BASE_URL not set, using {DEFAULT_BASE_URL}");
                defaults.base_url
            }
        };
        let first = parsed(&lookup, "SCRAPE_FIRST_PAGE")?.unwrap_or(DEFAULT_FIRST_PAGE);
        let last = parsed(&lookup, "SCRAPE_LAST_PAGE")?.unwrap_or(DEFAULT_LAST_PAGE);
        if first == 0 {
            return Err(Error::config_error("SCRAPE_FIRST_PAGE must be at least 1"));
        }
        if last < first {
            return Err(Error::Config(format!(
                "SCRAPE_LAST_PAGE ({last}) comes before SCRAPE_FIRST_PAGE ({first})"
            )));
        }

        Ok(Self {
            base_url,
            pages: first..=last,
            user_agent: lookup("SCRAPE_USER_AGENT").unwrap_or(defaults.user_agent),
            output: lookup("SCRAPE_OUTPUT").map_or(Ok(defaults.output), |raw| chart_path(&raw))?,
            export: lookup("SCRAPE_EXPORT").map(PathBuf::from),
            status_policy: parsed(&lookup, "SCRAPE_STATUS_POLICY")?
                .unwrap_or(defaults.status_policy),
            extraction: parsed(&lookup, "SCRAPE_EXTRACTION")?.unwrap_or(defaults.extraction),
        })
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> crate::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| Error::Config(format!("{key}={raw:?}: {e}")))
        })
        .transpose()
}

/// The bitmap backend picks its encoder from the extension, so only `.png` is accepted.
fn chart_path(raw: &str) -> crate::Result<PathBuf> {
    let path = PathBuf::from(raw);
    let is_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        Ok(path)
    } else {
        Err(Error::Config(format!(
            "SCRAPE_OUTPUT={raw:?} must name a .png file"
        )))
    }
}

/// The base is joined with relative paths, so it always ends in a slash.
fn base_url(raw: &str) -> crate::Result<Url> {
    let mut url =
        Url::parse(raw.trim()).map_err(|e| Error::Config(format!("SCRAPE_BASE_URL={raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!(
            "SCRAPE_BASE_URL={raw:?} cannot be used as a base url"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> crate::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url.as_str(), "https://www.swiggy.com/");
        assert_eq!(config.pages, 1..=5);
        assert_eq!(config.output, PathBuf::from("average_rating_by_cuisine.png"));
        assert_eq!(config.export, None);
        assert_eq!(config.status_policy, StatusPolicy::Abort);
        assert_eq!(config.extraction, ExtractionPolicy::Lenient);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SCRAPE_BASE_URL", "http://localhost:8080/food"),
            ("SCRAPE_FIRST_PAGE", "2"),
            ("SCRAPE_LAST_PAGE", "3"),
            ("SCRAPE_OUTPUT", "out/chart.png"),
            ("SCRAPE_EXPORT", "out/table.json"),
            ("SCRAPE_STATUS_POLICY", "skip"),
            ("SCRAPE_EXTRACTION", "strict"),
        ])
        .unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/food/");
        assert_eq!(config.pages, 2..=3);
        assert_eq!(config.output, PathBuf::from("out/chart.png"));
        assert_eq!(config.export, Some(PathBuf::from("out/table.json")));
        assert_eq!(config.status_policy, StatusPolicy::Skip);
        assert_eq!(config.extraction, ExtractionPolicy::Strict);
    }

    #[test]
    fn test_output_extension_case() {
        let config = config_from(&[("SCRAPE_OUTPUT", "Chart.PNG")]).unwrap();
        assert_eq!(config.output, PathBuf::from("Chart.PNG"));
    }

    #[test]
    fn test_invalid_values() {
        for pairs in [
            &[("SCRAPE_FIRST_PAGE", "0")][..],
            &[("SCRAPE_FIRST_PAGE", "one")][..],
            &[("SCRAPE_FIRST_PAGE", "4"), ("SCRAPE_LAST_PAGE", "2")][..],
            &[("SCRAPE_BASE_URL", "not a url")][..],
            &[("SCRAPE_BASE_URL", "mailto:food@example.com")][..],
            &[("SCRAPE_STATUS_POLICY", "retry")][..],
            &[("SCRAPE_EXTRACTION", "maybe")][..],
            &[("SCRAPE_OUTPUT", "chart.jpg")][..],
            &[("SCRAPE_OUTPUT", "out/chart")][..],
            &[("SCRAPE_OUTPUT", "chart.png_1234")][..],
        ] {
            assert!(
                matches!(config_from(pairs), Err(Error::Config(_))),
                "{pairs:?} should be rejected"
            );
        }
    }
}
