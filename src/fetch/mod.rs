use std::str::FromStr;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client, StatusCode,
};
use tracing::{instrument, Level};
use url::Url;

use crate::Error;

/// Where listing page html comes from. The collector only ever sees this trait,
/// which keeps the network out of its tests.
pub trait PageSource {
    /// Html body of listing page `page`, or `None` when the page should contribute nothing.
    async fn fetch_page(&self, page: u32) -> crate::Result<Option<String>>;
}

/// How to treat a listing page that answers with a non-success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    #[default]
    Abort,
    Skip,
    Ignore,
}

impl FromStr for StatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!("unknown status policy `{other}`")),
        }
    }
}

impl StatusPolicy {
    /// Whether the body of a response with `status` should be parsed.
    pub fn admit(self, page: u32, status: StatusCode) -> crate::Result<bool> {
        if status.is_success() {
            return Ok(true);
        }
        match self {
            Self::Abort => Err(Error::Status { page, status }),
            Self::Skip => {
                log::warn!("Skipping page {page}: server answered with {status}");
                Ok(false)
            }
            Self::Ignore => {
                log::debug!("Page {page} answered with {status}, parsing it anyway");
                Ok(true)
            }
        }
    }
}

pub fn make_client(user_agent: &str) -> crate::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent)
            .map_err(|e| Error::Config(format!("invalid user agent {user_agent:?}: {e}")))?,
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml"),
    );
    Client::builder()
        .default_headers(headers)
        .gzip(true)
        .build()
        .map_err(From::from)
}

/// `{base}restaurants?page={page}`
pub fn listing_page_url(base: &Url, page: u32) -> crate::Result<Url> {
    let mut url = base
        .join("restaurants")
        .map_err(|e| Error::Config(format!("cannot build listing url from {base}: {e}")))?;
    url.query_pairs_mut()
        .append_pair("page", page.to_string().as_str());
    Ok(url)
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base: Url,
    status_policy: StatusPolicy,
}

impl HttpSource {
    pub const fn new(client: Client, base: Url, status_policy: StatusPolicy) -> Self {
        Self {
            client,
            base,
            status_policy,
        }
    }
}

impl PageSource for HttpSource {
    #[instrument(skip(self), fields(base = %self.base), level = Level::TRACE)]
    async fn fetch_page(&self, page: u32) -> crate::Result<Option<String>> {
        let url = listing_page_url(&self.base, page)?;
        let start = std::time::Instant::now();
        let res = self.client.get(url).send().await?;
        if !self.status_policy.admit(page, res.status())? {
            return Ok(None);
        }
        let text = res.text().await?;
        log::trace!("Got text of page {page} in \t {:?}", start.elapsed());
        Ok(Some(text))
    }
}
