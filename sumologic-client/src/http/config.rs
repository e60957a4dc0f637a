//! # Common HTTP Configuration.

use http::header::{InvalidHeaderName, InvalidHeaderValue, AUTHORIZATION};
use http::{HeaderMap, HeaderName, HeaderValue};
use std::str::FromStr;
use std::time::Duration;
use url::{ParseError, Url};

/// A struct representing the configuration shared by the Sumo Logic clients.
///
/// # Examples
///
/// Creating a new `HttpConfig` with the API endpoint and an access token:
///
/// ```rust
/// use sumologic_client::http::HttpConfig;
///
/// let config = HttpConfig::new("https://api.sumologic.com/api/v1/", "c3VtbzpzZWNyZXQ=").unwrap();
/// ```
///
/// Adding custom headers to the configuration:
///
/// ```rust
/// use sumologic_client::http::HttpConfig;
///
/// let config = HttpConfig::new("https://api.sumologic.com/api/v1/", "c3VtbzpzZWNyZXQ=").unwrap();
/// let config = config.with_headers(vec![("User-Agent", "provisioner/1.0")]).unwrap();
/// ```
///
/// Bounding the duration of every request:
///
/// ```rust
/// use std::time::Duration;
/// use sumologic_client::http::HttpConfig;
///
/// let config = HttpConfig::new("https://api.sumologic.com/api/v1/", "c3VtbzpzZWNyZXQ=").unwrap();
/// let config = config.with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub(crate) url: Url,
    pub(crate) headers: HeaderMap,
    pub(crate) timeout: Option<Duration>,
}

/// An enumeration of potential errors related to the HTTP configuration.
#[derive(thiserror::Error, Debug)]
pub enum HttpConfigError {
    /// HTTP client with an invalid url.
    #[error("invalid endpoint url: `{0}`")]
    InvalidUrl(#[from] ParseError),
    /// The endpoint cannot hold relative paths, e.g. `mailto:` urls.
    #[error("endpoint url `{0}` cannot be a base")]
    CannotBeABase(String),
    /// HTTP client with an invalid header value.
    #[error("`{0}`")]
    InvalidHeader(#[from] InvalidHeaderValue),
    /// HTTP client with an invalid header name.
    #[error("`{0}`")]
    InvalidHeaderName(#[from] InvalidHeaderName),
}

impl HttpConfig {
    /// Construct a new `HttpConfig` for the API endpoint `url`.
    ///
    /// `auth_token` is sent as `Authorization: Basic <auth_token>`, so it must already
    /// be the base64 encoding of `<access id>:<access key>`.
    ///
    /// Resource paths are resolved relative to `url`. A trailing `/` is added to its
    /// path when missing, so the last segment (e.g. `v1`) is kept.
    ///
    /// # Errors
    ///
    /// This function will return an error if the provided URL or token is not valid.
    pub fn new(url: &str, auth_token: &str) -> Result<Self, HttpConfigError> {
        Ok(Self {
            url: endpoint_url(url)?,
            headers: sumologic_headers(auth_token)?,
            timeout: None,
        })
    }

    /// Optionally include custom headers into the HTTP requests.
    ///
    /// Custom headers can be added using an input iterator that provides key-value pairs.
    ///
    /// If the key already exists in the current header map, the new value will overwrite the old one.
    ///
    /// # Errors
    ///
    /// This function will return an error if the provided key or value is not valid.
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Result<Self, HttpConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (ref key, ref val) in headers {
            let _ = self
                .headers
                .insert(HeaderName::from_str(key.as_ref())?, val.as_ref().parse()?);
        }
        Ok(self)
    }

    /// Define a timeout for every request. There is none by default.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }

    /// Endpoint the resource paths are resolved against.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

fn endpoint_url(url: &str) -> Result<Url, HttpConfigError> {
    let mut url = Url::from_str(url)?;
    if url.cannot_be_a_base() {
        return Err(HttpConfigError::CannotBeABase(url.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Returns a HeaderMap pre-populated with the headers sent on every Sumo Logic request
fn sumologic_headers(auth_token: &str) -> Result<HeaderMap, HttpConfigError> {
    let mut authorization = HeaderValue::from_str(&format!("Basic {auth_token}"))?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    Ok(headers)
}
