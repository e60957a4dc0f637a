//! # Synchronous HTTP Client Module
use std::io;
use std::io::Read;

use http::{Request, Response};

use crate::http::HttpConfig;

/// An enumeration of potential errors related to the HTTP client.
#[derive(thiserror::Error, Debug)]
pub enum HttpClientError {
    /// Represents ureq crate error: connection refused, DNS, TLS, timeouts...
    #[error("`{0}`")]
    UreqError(String),
    /// Represents an io reader error.
    #[error("`{0}`")]
    IOError(#[from] io::Error),
    /// Represents an http crate build error.
    #[error("`{0}`")]
    HTTPBodyError(#[from] http::Error),
}

/// A synchronous trait that defines the internal methods for HTTP clients.
///
/// Implementations return every response the server sends, whatever its status.
pub trait HttpClient {
    /// Sends the request and waits for the whole response.
    fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, HttpClientError>;
}

/// An implementation of the `HttpClient` trait using the ureq library.
pub struct HttpClientUreq {
    client: ureq::Agent,
}

impl HttpClientUreq {
    /// Construct a new `HttpClientUreq` from the given `HttpConfig`.
    pub fn new(config: &HttpConfig) -> Self {
        Self {
            client: ureq::Agent::from(config),
        }
    }
}

/// Implement From trait to create a ureq::Agent from HttpConfig
impl From<&HttpConfig> for ureq::Agent {
    fn from(value: &HttpConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = value.timeout {
            builder = builder.timeout_connect(timeout).timeout(timeout);
        }
        builder.build()
    }
}

impl HttpClient for HttpClientUreq {
    fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, HttpClientError> {
        let (parts, body) = request.into_parts();
        let mut req = self
            .client
            .request(parts.method.as_str(), &parts.uri.to_string());

        for (name, value) in parts.headers.iter() {
            if let Ok(value) = value.to_str() {
                req = req.set(name.as_str(), value);
            } else {
                tracing::error!("invalid header value string for `{}`", name);
            }
        }

        let result = if body.is_empty() {
            req.call()
        } else {
            req.send_bytes(&body)
        };

        match result {
            Ok(response) | Err(ureq::Error::Status(_, response)) => build_response(response),
            Err(err) => Err(HttpClientError::UreqError(err.to_string())),
        }
    }
}

fn build_response(response: ureq::Response) -> Result<Response<Vec<u8>>, HttpClientError> {
    let http_version = match response.http_version() {
        "HTTP/0.9" => http::Version::HTTP_09,
        "HTTP/1.0" => http::Version::HTTP_10,
        "HTTP/2.0" => http::Version::HTTP_2,
        "HTTP/3.0" => http::Version::HTTP_3,
        _ => http::Version::HTTP_11,
    };

    let mut response_builder = http::Response::builder()
        .status(response.status())
        .version(http_version);
    for name in response.headers_names() {
        for value in response.all(&name) {
            response_builder = response_builder.header(name.as_str(), value);
        }
    }

    let mut buf: Vec<u8> = vec![];
    response.into_reader().read_to_end(&mut buf)?;

    Ok(response_builder.body(buf)?)
}
