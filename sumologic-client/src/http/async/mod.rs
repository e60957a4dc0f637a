//! # Asynchronous HTTP Client implementation for Sumo Logic.
pub mod client;
pub mod http_client;

// export public structs
pub use {
    client::AsyncSumoLogicClient, http_client::AsyncHttpClient,
    http_client::AsyncHttpClientError, http_client::HttpClientReqwest,
};
