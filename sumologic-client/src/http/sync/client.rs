//! # Synchronous Sumo Logic client.

use http::Request;
use tracing::debug;

use crate::common::request::RequestFactory;
use crate::common::response::{read_created, read_deleted, read_get, read_updated};
use crate::error::ClientResult;
use crate::http::HttpConfig;
use crate::resource::{AwsCloudTrailSource, AwsLogSource, Collector, HttpSource, Resource};

use super::http_client::{HttpClient, HttpClientUreq};

/// Blocking client for the Sumo Logic collector management API.
///
/// Every operation issues exactly one request and never retries. The client holds no
/// mutable state, so a single instance can be shared between threads.
///
/// # Examples
///
/// ```no_run
/// use sumologic_client::http::sync::SumoLogicClient;
/// use sumologic_client::resource::{Collector, HttpSource};
///
/// let client =
///     SumoLogicClient::new("c3VtbzpzZWNyZXQ=", "https://api.sumologic.com/api/v1/").unwrap();
///
/// let collector = client.create_hosted_collector(&Collector::hosted("web")).unwrap();
/// let collector_id = collector.id.unwrap();
/// let source = client
///     .create_http_source(collector_id, &HttpSource::named("nginx"))
///     .unwrap();
///
/// let (mut source, etag) = client
///     .get_http_source(collector_id, source.base.id.unwrap())
///     .unwrap();
/// source.base.category = Some("prod/nginx".to_string());
/// client
///     .update_http_source(collector_id, &source, etag.as_deref().unwrap_or_default())
///     .unwrap();
/// ```
pub struct SumoLogicClient<C = HttpClientUreq>
where
    C: HttpClient,
{
    requests: RequestFactory,
    http_client: C,
}

impl SumoLogicClient<HttpClientUreq> {
    /// Builds a client for the API endpoint `base_url` authenticating with `auth_token`,
    /// the base64 encoded `<access id>:<access key>`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the provided URL or token is not valid.
    pub fn new(auth_token: &str, base_url: &str) -> ClientResult<Self> {
        Ok(Self::from_config(HttpConfig::new(base_url, auth_token)?))
    }

    /// Builds a client backed by ureq from a complete configuration.
    pub fn from_config(config: HttpConfig) -> Self {
        let http_client = HttpClientUreq::new(&config);
        Self::with_http_client(&config, http_client)
    }
}

impl<C> SumoLogicClient<C>
where
    C: HttpClient,
{
    /// Builds a client sending its requests through `http_client`.
    pub fn with_http_client(config: &HttpConfig, http_client: C) -> Self {
        Self {
            requests: RequestFactory::from(config),
            http_client,
        }
    }

    /// Reads a resource and the ETag to use when updating it.
    pub fn get<R: Resource>(
        &self,
        scope: R::Scope,
        id: u64,
    ) -> ClientResult<(R, Option<String>)> {
        let response = self.send(self.requests.get::<R>(scope, id)?)?;
        read_get(response, id)
    }

    /// Creates a resource and returns it as stored by the server, id included.
    pub fn create<R: Resource>(&self, scope: R::Scope, resource: &R) -> ClientResult<R> {
        let response = self.send(self.requests.create(scope, resource)?)?;
        read_created::<R>(response, resource.name())
    }

    /// Replaces a resource, provided it did not change since `etag` was read.
    pub fn update<R: Resource>(
        &self,
        scope: R::Scope,
        resource: &R,
        etag: &str,
    ) -> ClientResult<R> {
        let response = self.send(self.requests.update(scope, resource, etag)?)?;
        read_updated::<R>(response, resource.name())
    }

    /// Deletes a resource. A missing resource is reported as not found.
    pub fn delete<R: Resource>(&self, scope: R::Scope, id: u64) -> ClientResult<()> {
        let response = self.send(self.requests.delete::<R>(scope, id)?)?;
        read_deleted::<R>(response, id)
    }

    fn send(&self, request: Request<Vec<u8>>) -> ClientResult<http::Response<Vec<u8>>> {
        debug!(method = %request.method(), url = %request.uri(), "sending request to Sumo Logic");
        let response = self.http_client.send(request)?;
        debug!(status = response.status().as_u16(), "received response from Sumo Logic");
        Ok(response)
    }

    /// Gets the collector with the specified id.
    pub fn get_hosted_collector(&self, id: u64) -> ClientResult<(Collector, Option<String>)> {
        self.get((), id)
    }

    /// Creates a new hosted collector.
    pub fn create_hosted_collector(&self, collector: &Collector) -> ClientResult<Collector> {
        self.create((), collector)
    }

    /// Updates an existing hosted collector.
    pub fn update_hosted_collector(
        &self,
        collector: &Collector,
        etag: &str,
    ) -> ClientResult<Collector> {
        self.update((), collector, etag)
    }

    /// Deletes the collector with the specified id.
    pub fn delete_hosted_collector(&self, id: u64) -> ClientResult<()> {
        self.delete::<Collector>((), id)
    }

    /// Gets the HTTP source with the specified id.
    pub fn get_http_source(
        &self,
        collector_id: u64,
        id: u64,
    ) -> ClientResult<(HttpSource, Option<String>)> {
        self.get(collector_id, id)
    }

    /// Creates a new HTTP source.
    pub fn create_http_source(
        &self,
        collector_id: u64,
        source: &HttpSource,
    ) -> ClientResult<HttpSource> {
        self.create(collector_id, source)
    }

    /// Updates an existing HTTP source.
    pub fn update_http_source(
        &self,
        collector_id: u64,
        source: &HttpSource,
        etag: &str,
    ) -> ClientResult<HttpSource> {
        self.update(collector_id, source, etag)
    }

    /// Deletes the HTTP source with the specified id.
    pub fn delete_http_source(&self, collector_id: u64, id: u64) -> ClientResult<()> {
        self.delete::<HttpSource>(collector_id, id)
    }

    /// Gets the AWS CloudTrail source with the specified id.
    pub fn get_aws_cloudtrail_source(
        &self,
        collector_id: u64,
        id: u64,
    ) -> ClientResult<(AwsCloudTrailSource, Option<String>)> {
        self.get(collector_id, id)
    }

    /// Creates a new AWS CloudTrail source.
    pub fn create_aws_cloudtrail_source(
        &self,
        collector_id: u64,
        source: &AwsCloudTrailSource,
    ) -> ClientResult<AwsCloudTrailSource> {
        self.create(collector_id, source)
    }

    /// Updates an existing AWS CloudTrail source.
    pub fn update_aws_cloudtrail_source(
        &self,
        collector_id: u64,
        source: &AwsCloudTrailSource,
        etag: &str,
    ) -> ClientResult<AwsCloudTrailSource> {
        self.update(collector_id, source, etag)
    }

    /// Deletes the AWS CloudTrail source with the specified id.
    pub fn delete_aws_cloudtrail_source(&self, collector_id: u64, id: u64) -> ClientResult<()> {
        self.delete::<AwsCloudTrailSource>(collector_id, id)
    }

    /// Gets the AWS S3 log source with the specified id.
    pub fn get_aws_log_source(
        &self,
        collector_id: u64,
        id: u64,
    ) -> ClientResult<(AwsLogSource, Option<String>)> {
        self.get(collector_id, id)
    }

    /// Creates a new AWS S3 log source.
    pub fn create_aws_log_source(
        &self,
        collector_id: u64,
        source: &AwsLogSource,
    ) -> ClientResult<AwsLogSource> {
        self.create(collector_id, source)
    }

    /// Updates an existing AWS S3 log source.
    pub fn update_aws_log_source(
        &self,
        collector_id: u64,
        source: &AwsLogSource,
        etag: &str,
    ) -> ClientResult<AwsLogSource> {
        self.update(collector_id, source, etag)
    }

    /// Deletes the AWS S3 log source with the specified id.
    pub fn delete_aws_log_source(&self, collector_id: u64, id: u64) -> ClientResult<()> {
        self.delete::<AwsLogSource>(collector_id, id)
    }
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;
    use httpmock::prelude::*;
    use serde_json::json;
    use tracing_test::traced_test;

    use super::*;
    use crate::common::response::test::{response_from_json, ResponseParts};
    use crate::error::ClientError;
    use crate::http::sync::http_client::test::MockHttpClientMockall;
    use crate::http::sync::HttpClientError;
    use crate::resource::ResourceKind;

    const ID: u64 = 1234567890;

    fn client(server: &MockServer) -> SumoLogicClient {
        SumoLogicClient::new("accessToken", &server.base_url()).unwrap()
    }

    fn created_collector() -> Collector {
        Collector {
            id: Some(ID),
            ..Collector::hosted("test")
        }
    }

    #[test]
    fn invalid_endpoint() {
        let err = SumoLogicClient::new("accessToken", "::not a url").err().unwrap();
        assert_matches!(err, ClientError::Config(_));
    }

    #[test]
    fn authentication_failure() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path(format!("/collectors/{ID}"));
            then.status(401);
        });

        let err = client(&server).get_hosted_collector(ID).unwrap_err();

        mock.assert();
        assert_matches!(err, ClientError::Authentication);
    }

    #[test]
    fn get_hosted_collector_ok() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path(format!("/collectors/{ID}"))
                .header("Authorization", "Basic accessToken");
            then.status(200)
                .header("ETag", "\"f4k3t4g\"")
                .json_body(json!({"collector": {"id": ID, "name": "test", "alive": true}}));
        });

        let (collector, etag) = client(&server).get_hosted_collector(ID).unwrap();

        mock.assert();
        assert_eq!(collector.id, Some(ID));
        assert!(collector.alive);
        assert_eq!(etag.as_deref(), Some("\"f4k3t4g\""));
    }

    #[test]
    fn get_hosted_collector_doesnt_exist() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(format!("/collectors/{ID}"));
            then.status(404);
        });

        let err = client(&server).get_hosted_collector(ID).unwrap_err();
        assert_matches!(err, ClientError::CollectorNotFound(ID));
        assert!(err.is_not_found());
    }

    #[test]
    fn get_unexpected_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(format!("/collectors/{ID}"));
            then.status(503);
        });

        let err = client(&server).get_hosted_collector(ID).unwrap_err();
        assert_matches!(err, ClientError::UnexpectedStatus(503, _));
    }

    #[test]
    fn create_hosted_collector_ok() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/collectors")
                .header("Content-Type", "application/json")
                .json_body_partial(r#"{"collector":{"name":"test"}}"#);
            then.status(201)
                .json_body(json!({
                    "collector": {"id": ID, "name": "test", "collectorType": "Hosted"}
                }));
        });

        let collector = client(&server)
            .create_hosted_collector(&Collector::hosted("test"))
            .unwrap();

        mock.assert();
        assert_eq!(collector.id, Some(ID));
    }

    #[test]
    fn create_hosted_collector_already_exists() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/collectors");
            then.status(400);
        });

        let err = client(&server)
            .create_hosted_collector(&Collector::hosted("test"))
            .unwrap_err();

        assert_matches!(
            &err,
            ClientError::BadRequest { kind: ResourceKind::Collector, name, .. } if name == "test"
        );
        assert!(err.to_string().contains("collector with name `test` already exists"));
    }

    #[test]
    fn update_hosted_collector_ok() {
        let mut updated = created_collector();
        updated.name = "Updated".to_string();

        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path(format!("/collectors/{ID}"))
                .header("If-Match", "etag")
                .header("Content-Type", "application/json")
                .json_body_partial(r#"{"collector":{"name":"Updated"}}"#);
            then.status(200)
                .json_body(json!({"collector": {"id": ID, "name": "Updated"}}));
        });

        let collector = client(&server)
            .update_hosted_collector(&updated, "etag")
            .unwrap();

        mock.assert();
        assert_eq!(collector.id, Some(ID));
        assert_eq!(collector.name, "Updated");
    }

    #[test]
    fn update_hosted_collector_already_exists() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path(format!("/collectors/{ID}"));
            then.status(400).json_body(json!({
                "status": 400,
                "id": "8KLXV-C0ZLB-0ZPCM",
                "code": "collectors.validation.name.duplicate",
                "message": "Cannot authenticate with AWS."
            }));
        });

        let err = client(&server)
            .update_hosted_collector(&created_collector(), "etag")
            .unwrap_err();

        // collectors are not AWS backed, whatever the message says
        assert_matches!(err, ClientError::BadRequest { .. });
    }

    #[test]
    fn update_stale_etag() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path(format!("/collectors/{ID}")).header("If-Match", "stale");
            then.status(412);
        });

        let err = client(&server)
            .update_hosted_collector(&created_collector(), "stale")
            .unwrap_err();

        assert_matches!(err, ClientError::UnexpectedStatus(412, _));
    }

    #[test]
    fn delete_hosted_collector() {
        struct TestCase {
            name: &'static str,
            status: u16,
            check: fn(ClientResult<()>),
        }
        impl TestCase {
            fn run(self) {
                let server = MockServer::start();
                let mock = server.mock(|when, then| {
                    when.method(DELETE).path(format!("/collectors/{ID}"));
                    then.status(self.status);
                });

                let result = client(&server).delete_hosted_collector(ID);

                mock.assert();
                println!("{}", self.name);
                (self.check)(result);
            }
        }
        let test_cases = vec![
            TestCase {
                name: "deleted",
                status: 200,
                check: |result| assert_matches!(result, Ok(())),
            },
            TestCase {
                name: "doesn't exist",
                status: 404,
                check: |result| assert_matches!(result, Err(ClientError::CollectorNotFound(ID))),
            },
            TestCase {
                name: "unauthorized",
                status: 401,
                check: |result| assert_matches!(result, Err(ClientError::Authentication)),
            },
            TestCase {
                name: "server error",
                status: 500,
                check: |result| assert_matches!(result, Err(ClientError::UnexpectedStatus(500, _))),
            },
        ];

        for test_case in test_cases {
            test_case.run();
        }
    }

    #[test]
    fn get_http_source_ok() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path(format!("/collectors/{ID}/sources/{ID}"));
            then.status(200)
                .body(r#"{"source":{"id":1234567890,"name":"test","CollectorId":1234567890}}"#);
        });

        let (source, etag) = client(&server).get_http_source(ID, ID).unwrap();

        mock.assert();
        assert_eq!(source.base.name, "test");
        assert_eq!(source.base.id, Some(ID));
        assert_eq!(source.base.collector_id, Some(ID));
        assert_eq!(etag, None);
    }

    #[test]
    fn create_http_source_uses_server_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(format!("/collectors/{ID}/sources"))
                .json_body_partial(r#"{"source":{"name":"test","messagePerRequest":true}}"#);
            then.status(201).json_body(json!({
                "source": {
                    "id": ID,
                    "name": "test",
                    "messagePerRequest": true,
                    "url": "https://collectors.sumologic.com/receiver/v1/http/f4k3"
                }
            }));
        });

        let mut source = HttpSource::named("test");
        source.base.id = Some(1);
        source.message_per_request = true;

        let created = client(&server).create_http_source(ID, &source).unwrap();

        mock.assert();
        assert_eq!(created.base.id, Some(ID));
        assert_eq!(
            created.url.as_deref(),
            Some("https://collectors.sumologic.com/receiver/v1/http/f4k3")
        );
    }

    #[test]
    fn create_http_source_bad_request_with_aws_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(format!("/collectors/{ID}/sources"));
            then.status(400).json_body(json!({"message": "Cannot authenticate with AWS."}));
        });

        let err = client(&server)
            .create_http_source(ID, &HttpSource::named("test"))
            .unwrap_err();

        assert_matches!(err, ClientError::BadRequest { kind: ResourceKind::Source, .. });
    }

    #[test]
    fn delete_http_source_doesnt_exist() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path(format!("/collectors/{ID}/sources/{ID}"));
            then.status(404);
        });

        let err = client(&server).delete_http_source(ID, ID).unwrap_err();
        assert_matches!(err, ClientError::SourceNotFound(ID));
    }

    #[test]
    fn cloudtrail_source_lifecycle() {
        let server = MockServer::start();
        let body = json!({
            "source": {
                "id": ID,
                "name": "trail",
                "CollectorId": ID,
                "contentType": "AwsCloudTrailBucket",
                "thirdPartyRef": {"resources": [{
                    "serviceType": "AwsCloudTrailBucket",
                    "path": {
                        "type": "S3BucketPathExpression",
                        "bucketName": "trail",
                        "pathExpression": "*"
                    },
                    "authentication": {
                        "type": "AWSRoleBasedAuthentication",
                        "roleARN": "arn:aws:iam::1:role/r"
                    }
                }]}
            }
        });
        let get = server.mock(|when, then| {
            when.method(GET).path(format!("/collectors/{ID}/sources/{ID}"));
            then.status(200).header("ETag", "v1").json_body(body.clone());
        });
        let update = server.mock(|when, then| {
            when.method(PUT)
                .path(format!("/collectors/{ID}/sources/{ID}"))
                .header("If-Match", "v1")
                .json_body_partial(r#"{"source":{"paused":true}}"#);
            then.status(200).json_body(body.clone());
        });

        let client = client(&server);
        let (mut source, etag) = client.get_aws_cloudtrail_source(ID, ID).unwrap();
        assert_eq!(source.third_party_ref.resources[0].path.bucket_name, "trail");

        source.base.paused = true;
        client
            .update_aws_cloudtrail_source(ID, &source, etag.as_deref().unwrap())
            .unwrap();

        get.assert();
        update.assert();
    }

    #[test]
    fn create_cloudtrail_source_aws_authentication_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(format!("/collectors/{ID}/sources"));
            then.status(400).json_body(json!({
                "status": 400,
                "id": "RD2CP-O3NN0-K2BEH",
                "code": "aws.auth.failed",
                "message": "Cannot authenticate with AWS."
            }));
        });

        let source = AwsCloudTrailSource::new("trail", "trail", "*", "arn:aws:iam::1:role/r");
        let err = client(&server)
            .create_aws_cloudtrail_source(ID, &source)
            .unwrap_err();

        assert_matches!(err, ClientError::AwsAuthentication(_));
        assert!(err.is_retryable());
    }

    #[test]
    fn create_aws_log_source_unreadable_bucket() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(format!("/collectors/{ID}/sources"));
            then.status(400).json_body(json!({
                "status": 400,
                "id": "QW3EF-2DDF9-LP0MX",
                "code": "s3.bucket.unreadable",
                "message": "The S3 bucket 'bucketName=elb-logs' is not readable."
            }));
        });

        let source = AwsLogSource::new("elb", "elb-logs", "*", "arn:aws:iam::1:role/r");
        let err = client(&server).create_aws_log_source(ID, &source).unwrap_err();

        assert_matches!(
            err,
            ClientError::AwsAuthentication(message) if message.contains("elb-logs")
        );
    }

    #[test]
    fn update_aws_log_source_already_exists() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path(format!("/collectors/{ID}/sources/{ID}"));
            then.status(400);
        });

        let mut source = AwsLogSource::new("elb", "elb-logs", "*", "arn:aws:iam::1:role/r");
        source.base.id = Some(ID);
        let err = client(&server)
            .update_aws_log_source(ID, &source, "etag")
            .unwrap_err();

        assert_matches!(err, ClientError::BadRequest { name, .. } if name == "elb");
    }

    #[test]
    fn delete_aws_log_source_ok() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(DELETE).path(format!("/collectors/{ID}/sources/{ID}"));
            then.status(200);
        });

        client(&server).delete_aws_log_source(ID, ID).unwrap();
        mock.assert();
    }

    #[test]
    fn transport_errors_are_propagated() {
        let config = HttpConfig::new("http://localhost", "accessToken").unwrap();
        let mut http_client = MockHttpClientMockall::new();
        http_client.should_not_send(HttpClientError::UreqError("connection refused".to_string()));

        let client = SumoLogicClient::with_http_client(&config, http_client);
        let err = client.delete_aws_cloudtrail_source(ID, ID).unwrap_err();

        assert_matches!(err, ClientError::Transport(HttpClientError::UreqError(_)));
    }

    #[test]
    fn update_without_id_sends_nothing() {
        let config = HttpConfig::new("http://localhost", "accessToken").unwrap();
        let mut http_client = MockHttpClientMockall::new();
        http_client.expect_send().never();

        let client = SumoLogicClient::with_http_client(&config, http_client);
        let err = client
            .update_http_source(ID, &HttpSource::named("test"), "etag")
            .unwrap_err();

        assert_matches!(err, ClientError::MissingId(ResourceKind::Source));
    }

    #[test]
    fn mocked_transport_receives_the_built_request() {
        let config = HttpConfig::new("https://api.sumologic.com/api/v1", "accessToken").unwrap();
        let mut http_client = MockHttpClientMockall::new();
        http_client
            .expect_send()
            .withf(|request| {
                request.method() == http::Method::GET
                    && request.uri() == "https://api.sumologic.com/api/v1/collectors/7"
            })
            .once()
            .return_once(|_| {
                Ok(response_from_json(
                    json!({"collector": {"id": 7, "name": "test"}}),
                    ResponseParts::default(),
                ))
            });

        let client = SumoLogicClient::with_http_client(&config, http_client);
        let (collector, _) = client.get_hosted_collector(7).unwrap();
        assert_eq!(collector.name, "test");
    }

    #[test]
    fn mocked_transport_response() {
        let config = HttpConfig::new("http://localhost", "accessToken").unwrap();
        let mut http_client = MockHttpClientMockall::new();
        http_client.should_send(response_from_json(
            json!({"source": {"id": ID, "name": "elb"}}),
            ResponseParts {
                status: http::StatusCode::CREATED,
                ..Default::default()
            },
        ));

        let client = SumoLogicClient::with_http_client(&config, http_client);
        let source = client
            .create_aws_log_source(ID, &AwsLogSource::new("elb", "b", "*", "arn"))
            .unwrap();
        assert_eq!(source.base.id, Some(ID));
    }

    #[test]
    #[traced_test]
    fn requests_are_logged_without_credentials() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path(format!("/collectors/{ID}"));
            then.status(200);
        });

        client(&server).delete_hosted_collector(ID).unwrap();

        assert!(logs_contain("sending request to Sumo Logic"));
        assert!(logs_contain("received response from Sumo Logic"));
        assert!(!logs_contain("accessToken"));
    }

    #[test]
    fn client_is_shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SumoLogicClient>();
    }
}
