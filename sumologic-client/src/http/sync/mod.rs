//! # Synchronous HTTP Client implementation for Sumo Logic.
pub mod client;
pub mod http_client;

// export public structs
pub use {
    client::SumoLogicClient, http_client::HttpClient, http_client::HttpClientError,
    http_client::HttpClientUreq,
};
