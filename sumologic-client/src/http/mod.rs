//! HTTP transports and clients of the Sumo Logic API.

pub mod config;

#[cfg(feature = "async-http")]
pub mod r#async;
#[cfg(feature = "sync-http")]
pub mod sync;

// export public structs
pub use config::{HttpConfig, HttpConfigError};
