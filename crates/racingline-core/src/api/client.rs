//! HTTP fetcher for the schedule data bin.
//!
//! `Fetcher` is the seam the controller depends on; `ApiClient` is the
//! reqwest-backed implementation used outside of tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use tracing::{debug, warn};

use super::FetchError;

/// Header carrying the data bin access key (sent as `X-ACCESS-KEY`).
/// Static header names must be lowercase for `HeaderMap::insert`.
pub const ACCESS_KEY_HEADER: &str = "x-access-key";

/// Header asking the bin host to return the record without its metadata wrapper
pub const BIN_META_HEADER: &str = "x-bin-meta";

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` with `headers`, returning the raw body.
    ///
    /// Only transport failures are errors; the response status is not checked.
    /// Implementations leave error logging to the caller.
    async fn fetch(&self, url: &str, headers: &HeaderMap) -> Result<Vec<u8>, FetchError>;
}

/// Build the two static headers the data bin expects.
pub fn data_headers(access_key: &str) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCESS_KEY_HEADER,
        HeaderValue::from_str(access_key)
            .map_err(|_| FetchError::InvalidHeader(ACCESS_KEY_HEADER))?,
    );
    headers.insert(BIN_META_HEADER, HeaderValue::from_static("false"));
    Ok(headers)
}

/// Parse and validate an absolute http(s) URL.
pub fn parse_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// reqwest-backed fetcher.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Create a client that relies on the transport's default timeouts
    pub fn new() -> Result<Self, FetchError> {
        Self::build(None)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Fetcher for ApiClient {
    async fn fetch(&self, url: &str, headers: &HeaderMap) -> Result<Vec<u8>, FetchError> {
        let parsed = parse_url(url)?;

        let response = self
            .client
            .get(parsed)
            .headers(headers.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Not an error here; the body goes on to the decoder
            warn!(url = url, status = %status, "Data download returned non-success status");
        }

        let body = response.bytes().await?;

        debug!(url = url, bytes = body.len(), "Data download complete");
        Ok(body.to_vec())
    }
}
