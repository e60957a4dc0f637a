//! Sumo Logic collector management client library.
//!
//! Manages hosted collectors and their HTTP, AWS CloudTrail and AWS S3 log sources
//! through the Sumo Logic REST API. Both a blocking ([`http::sync::SumoLogicClient`])
//! and an asynchronous (`http::r#async::AsyncSumoLogicClient`) client are provided,
//! behind the `sync-http` and `async-http` features.

#![warn(missing_docs)]

pub(crate) mod common;

pub mod error;
pub use error::{ClientError, ClientResult};

pub mod http;
pub use http::{HttpConfig, HttpConfigError};

pub mod resource;
