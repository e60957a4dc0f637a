//! # Asynchronous HTTP Client Module
//!
//! Sends the requests built by the client with reqwest.

use async_trait::async_trait;
use http::{Request, Response};
use thiserror::Error;

use crate::http::HttpConfig;

/// An enumeration of potential errors related to the HTTP client.
#[derive(Error, Debug)]
pub enum AsyncHttpClientError {
    /// Represents Reqwest crate error.
    #[error("`{0}`")]
    ReqwestError(#[from] reqwest::Error),
    /// Represents an http crate build error.
    #[error("`{0}`")]
    HTTPBodyError(#[from] http::Error),
}

/// An asynchronous trait that defines the internal methods for HTTP clients.
///
/// Implementations return every response the server sends, whatever its status.
#[async_trait]
pub trait AsyncHttpClient {
    /// Sends the request and waits for the whole response.
    async fn send(&self, request: Request<Vec<u8>>)
        -> Result<Response<Vec<u8>>, AsyncHttpClientError>;
}

/// An implementation of the `AsyncHttpClient` trait using the reqwest library.
pub struct HttpClientReqwest {
    client: reqwest::Client,
}

impl HttpClientReqwest {
    /// Construct a new `HttpClientReqwest` from the given `HttpConfig`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumologic_client::http::{r#async::HttpClientReqwest, HttpConfig};
    ///
    /// let config =
    ///     HttpConfig::new("https://api.sumologic.com/api/v1/", "c3VtbzpzZWNyZXQ=").unwrap();
    /// let client = HttpClientReqwest::new(&config).unwrap();
    /// ```
    pub fn new(config: &HttpConfig) -> Result<Self, AsyncHttpClientError> {
        Ok(Self {
            client: reqwest::Client::try_from(config)?,
        })
    }
}

#[async_trait]
impl AsyncHttpClient for HttpClientReqwest {
    async fn send(
        &self,
        request: Request<Vec<u8>>,
    ) -> Result<Response<Vec<u8>>, AsyncHttpClientError> {
        let request = reqwest::Request::try_from(request)?;
        let response = self.client.execute(request).await?;

        let mut response_builder = http::Response::builder()
            .status(response.status())
            .version(response.version());
        if let Some(headers) = response_builder.headers_mut() {
            headers.extend(response.headers().clone());
        }
        let body = response.bytes().await?;

        Ok(response_builder.body(body.to_vec())?)
    }
}

/// Implement TryFrom trait to create a reqwest::Client from HttpConfig
impl TryFrom<&HttpConfig> for reqwest::Client {
    type Error = AsyncHttpClientError;
    fn try_from(value: &HttpConfig) -> Result<Self, Self::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = value.timeout {
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }
        Ok(builder.build()?)
    }
}
