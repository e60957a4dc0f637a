//! This module defines the errors returned by the Sumo Logic clients.

use thiserror::Error;

use crate::http::config::HttpConfigError;
use crate::resource::ResourceKind;

/// Represents the errors that can occur while managing resources.
///
/// Callers match on variants, e.g. a "delete if exists" tolerates
/// [`ClientError::CollectorNotFound`] and [`ClientError::SourceNotFound`].
#[derive(Error, Debug)]
pub enum ClientError {
    /// The client could not be configured.
    #[error("`{0}`")]
    Config(#[from] HttpConfigError),
    /// The API rejected the credentials (HTTP 401).
    #[error("authentication error with Sumo Logic")]
    Authentication,
    /// The collector does not exist (HTTP 404).
    #[error("collector `{0}` not found")]
    CollectorNotFound(u64),
    /// The source does not exist (HTTP 404).
    #[error("source `{0}` not found")]
    SourceNotFound(u64),
    /// Sumo Logic could not access AWS with the credentials of the source.
    /// IAM changes are eventually consistent, so retrying may succeed.
    #[error("authentication error with AWS: `{0}`")]
    AwsAuthentication(String),
    /// The API refused the resource (HTTP 400), most often because its name is taken.
    #[error("bad request: `{message}`. Please check if a {kind} with name `{name}` already exists")]
    BadRequest {
        /// Kind of the refused resource.
        kind: ResourceKind,
        /// Name of the refused resource.
        name: String,
        /// Message returned by the API.
        message: String,
    },
    /// Any status not expected by the operation.
    #[error("unexpected response from Sumo Logic. Status code: `{0}` Canonical reason: `{1}`")]
    UnexpectedStatus(u16, String),
    /// The response body is not the expected envelope.
    #[error("decoding response: `{0}`")]
    Decode(#[source] serde_json::Error),
    /// The resource could not be serialized.
    #[error("encoding request: `{0}`")]
    Encode(#[source] serde_json::Error),
    /// The request could not be assembled.
    #[error("`{0}`")]
    InvalidRequest(#[from] http::Error),
    /// Updates address the resource by id, which is only known once created.
    #[error("the {0} has no id, it must be created before being updated")]
    MissingId(ResourceKind),
    /// Represents a failure of the blocking transport.
    #[cfg(feature = "sync-http")]
    #[error("`{0}`")]
    Transport(#[from] crate::http::sync::HttpClientError),
    /// Represents a failure of the asynchronous transport.
    #[cfg(feature = "async-http")]
    #[error("`{0}`")]
    AsyncTransport(#[from] crate::http::r#async::AsyncHttpClientError),
}

impl ClientError {
    /// Whether the API reported the collector or source as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::CollectorNotFound(_) | ClientError::SourceNotFound(_)
        )
    }

    /// Whether the same call may succeed later without changes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::AwsAuthentication(_))
    }
}

/// A type alias for results of the Sumo Logic clients.
pub type ClientResult<T> = Result<T, ClientError>;
