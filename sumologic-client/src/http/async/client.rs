//! # Asynchronous Sumo Logic client.

use http::Request;
use tracing::debug;

use crate::common::request::RequestFactory;
use crate::common::response::{read_created, read_deleted, read_get, read_updated};
use crate::error::ClientResult;
use crate::http::HttpConfig;
use crate::resource::{AwsCloudTrailSource, AwsLogSource, Collector, HttpSource, Resource};

use super::http_client::{AsyncHttpClient, HttpClientReqwest};

/// Asynchronous client for the Sumo Logic collector management API.
///
/// Same operations and error reporting as [`crate::http::sync::SumoLogicClient`], each
/// one awaiting a single request.
///
/// # Examples
///
/// ```no_run
/// use sumologic_client::http::r#async::AsyncSumoLogicClient;
/// use sumologic_client::resource::AwsCloudTrailSource;
///
/// # async fn provision() -> sumologic_client::ClientResult<()> {
/// let client =
///     AsyncSumoLogicClient::new("c3VtbzpzZWNyZXQ=", "https://api.sumologic.com/api/v1/")?;
///
/// let source = AwsCloudTrailSource::new(
///     "cloudtrail",
///     "my-trail-bucket",
///     "AWSLogs/*",
///     "arn:aws:iam::123456789012:role/sumo",
/// );
/// match client.create_aws_cloudtrail_source(1234567890, &source).await {
///     Err(err) if err.is_retryable() => { /* the IAM role is not usable yet */ }
///     result => {
///         result?;
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct AsyncSumoLogicClient<C = HttpClientReqwest>
where
    C: AsyncHttpClient,
{
    requests: RequestFactory,
    http_client: C,
}

impl AsyncSumoLogicClient<HttpClientReqwest> {
    /// Builds a client for the API endpoint `base_url` authenticating with `auth_token`,
    /// the base64 encoded `<access id>:<access key>`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the provided URL or token is not valid, or
    /// if the reqwest client cannot be initialized.
    pub fn new(auth_token: &str, base_url: &str) -> ClientResult<Self> {
        Self::from_config(HttpConfig::new(base_url, auth_token)?)
    }

    /// Builds a client backed by reqwest from a complete configuration.
    pub fn from_config(config: HttpConfig) -> ClientResult<Self> {
        let http_client = HttpClientReqwest::new(&config)?;
        Ok(Self::with_http_client(&config, http_client))
    }
}

impl<C> AsyncSumoLogicClient<C>
where
    C: AsyncHttpClient,
{
    /// Builds a client sending its requests through `http_client`.
    pub fn with_http_client(config: &HttpConfig, http_client: C) -> Self {
        Self {
            requests: RequestFactory::from(config),
            http_client,
        }
    }

    /// Reads a resource and the ETag to use when updating it.
    pub async fn get<R: Resource>(
        &self,
        scope: R::Scope,
        id: u64,
    ) -> ClientResult<(R, Option<String>)> {
        let response = self.send(self.requests.get::<R>(scope, id)?).await?;
        read_get(response, id)
    }

    /// Creates a resource and returns it as stored by the server, id included.
    pub async fn create<R: Resource>(&self, scope: R::Scope, resource: &R) -> ClientResult<R> {
        let response = self.send(self.requests.create(scope, resource)?).await?;
        read_created::<R>(response, resource.name())
    }

    /// Replaces a resource, provided it did not change since `etag` was read.
    pub async fn update<R: Resource>(
        &self,
        scope: R::Scope,
        resource: &R,
        etag: &str,
    ) -> ClientResult<R> {
        let response = self
            .send(self.requests.update(scope, resource, etag)?)
            .await?;
        read_updated::<R>(response, resource.name())
    }

    /// Deletes a resource. A missing resource is reported as not found.
    pub async fn delete<R: Resource>(&self, scope: R::Scope, id: u64) -> ClientResult<()> {
        let response = self.send(self.requests.delete::<R>(scope, id)?).await?;
        read_deleted::<R>(response, id)
    }

    async fn send(&self, request: Request<Vec<u8>>) -> ClientResult<http::Response<Vec<u8>>> {
        debug!(method = %request.method(), url = %request.uri(), "sending request to Sumo Logic");
        let response = self.http_client.send(request).await?;
        debug!(status = response.status().as_u16(), "received response from Sumo Logic");
        Ok(response)
    }

    /// Gets the collector with the specified id.
    pub async fn get_hosted_collector(
        &self,
        id: u64,
    ) -> ClientResult<(Collector, Option<String>)> {
        self.get((), id).await
    }

    /// Creates a new hosted collector.
    pub async fn create_hosted_collector(
        &self,
        collector: &Collector,
    ) -> ClientResult<Collector> {
        self.create((), collector).await
    }

    /// Updates an existing hosted collector.
    pub async fn update_hosted_collector(
        &self,
        collector: &Collector,
        etag: &str,
    ) -> ClientResult<Collector> {
        self.update((), collector, etag).await
    }

    /// Deletes the collector with the specified id.
    pub async fn delete_hosted_collector(&self, id: u64) -> ClientResult<()> {
        self.delete::<Collector>((), id).await
    }

    /// Gets the HTTP source with the specified id.
    pub async fn get_http_source(
        &self,
        collector_id: u64,
        id: u64,
    ) -> ClientResult<(HttpSource, Option<String>)> {
        self.get(collector_id, id).await
    }

    /// Creates a new HTTP source.
    pub async fn create_http_source(
        &self,
        collector_id: u64,
        source: &HttpSource,
    ) -> ClientResult<HttpSource> {
        self.create(collector_id, source).await
    }

    /// Updates an existing HTTP source.
    pub async fn update_http_source(
        &self,
        collector_id: u64,
        source: &HttpSource,
        etag: &str,
    ) -> ClientResult<HttpSource> {
        self.update(collector_id, source, etag).await
    }

    /// Deletes the HTTP source with the specified id.
    pub async fn delete_http_source(&self, collector_id: u64, id: u64) -> ClientResult<()> {
        self.delete::<HttpSource>(collector_id, id).await
    }

    /// Gets the AWS CloudTrail source with the specified id.
    pub async fn get_aws_cloudtrail_source(
        &self,
        collector_id: u64,
        id: u64,
    ) -> ClientResult<(AwsCloudTrailSource, Option<String>)> {
        self.get(collector_id, id).await
    }

    /// Creates a new AWS CloudTrail source.
    pub async fn create_aws_cloudtrail_source(
        &self,
        collector_id: u64,
        source: &AwsCloudTrailSource,
    ) -> ClientResult<AwsCloudTrailSource> {
        self.create(collector_id, source).await
    }

    /// Updates an existing AWS CloudTrail source.
    pub async fn update_aws_cloudtrail_source(
        &self,
        collector_id: u64,
        source: &AwsCloudTrailSource,
        etag: &str,
    ) -> ClientResult<AwsCloudTrailSource> {
        self.update(collector_id, source, etag).await
    }

    /// Deletes the AWS CloudTrail source with the specified id.
    pub async fn delete_aws_cloudtrail_source(
        &self,
        collector_id: u64,
        id: u64,
    ) -> ClientResult<()> {
        self.delete::<AwsCloudTrailSource>(collector_id, id).await
    }

    /// Gets the AWS S3 log source with the specified id.
    pub async fn get_aws_log_source(
        &self,
        collector_id: u64,
        id: u64,
    ) -> ClientResult<(AwsLogSource, Option<String>)> {
        self.get(collector_id, id).await
    }

    /// Creates a new AWS S3 log source.
    pub async fn create_aws_log_source(
        &self,
        collector_id: u64,
        source: &AwsLogSource,
    ) -> ClientResult<AwsLogSource> {
        self.create(collector_id, source).await
    }

    /// Updates an existing AWS S3 log source.
    pub async fn update_aws_log_source(
        &self,
        collector_id: u64,
        source: &AwsLogSource,
        etag: &str,
    ) -> ClientResult<AwsLogSource> {
        self.update(collector_id, source, etag).await
    }

    /// Deletes the AWS S3 log source with the specified id.
    pub async fn delete_aws_log_source(&self, collector_id: u64, id: u64) -> ClientResult<()> {
        self.delete::<AwsLogSource>(collector_id, id).await
    }
}
