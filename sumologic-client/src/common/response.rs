//! Turns HTTP responses of the CRUD operations into resources or errors.

use std::sync::LazyLock;

use http::header::ETAG;
use http::{Response, StatusCode};
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::resource::{Envelope, Resource};

/// Messages the API uses when it cannot assume the IAM role of an AWS source.
const AWS_AUTHENTICATION_MESSAGES: [&str; 2] = [
    "Cannot authenticate with AWS.",
    "Invalid IAM role: 'errorCode=AccessDenied'.",
];

static UNREADABLE_S3_BUCKET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"The S3 bucket 'bucketName=.*' is not readable.").expect("valid regex")
});

/// Body of the API's 400 responses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiError {
    status: u16,
    id: String,
    code: String,
    message: String,
}

pub(crate) fn read_get<R: Resource>(
    response: Response<Vec<u8>>,
    id: u64,
) -> ClientResult<(R, Option<String>)> {
    match response.status() {
        StatusCode::OK => {
            let etag = response
                .headers()
                .get(ETAG)
                .and_then(|etag| etag.to_str().ok())
                .map(str::to_string);
            Ok((decode(response.body())?, etag))
        }
        StatusCode::NOT_FOUND => Err(R::not_found(id)),
        status => Err(status_error(status)),
    }
}

pub(crate) fn read_created<R: Resource>(
    response: Response<Vec<u8>>,
    name: &str,
) -> ClientResult<R> {
    match response.status() {
        StatusCode::CREATED => decode(response.body()),
        StatusCode::BAD_REQUEST => Err(bad_request::<R>(response.body(), name)),
        status => Err(status_error(status)),
    }
}

pub(crate) fn read_updated<R: Resource>(
    response: Response<Vec<u8>>,
    name: &str,
) -> ClientResult<R> {
    match response.status() {
        StatusCode::OK => decode(response.body()),
        StatusCode::BAD_REQUEST => Err(bad_request::<R>(response.body(), name)),
        status => Err(status_error(status)),
    }
}

pub(crate) fn read_deleted<R: Resource>(
    response: Response<Vec<u8>>,
    id: u64,
) -> ClientResult<()> {
    match response.status() {
        StatusCode::OK => Ok(()),
        StatusCode::NOT_FOUND => Err(R::not_found(id)),
        status => Err(status_error(status)),
    }
}

fn decode<R: Resource>(body: &[u8]) -> ClientResult<R> {
    serde_json::from_slice::<Envelope<R>>(body)
        .map(Envelope::into_inner)
        .map_err(ClientError::Decode)
}

fn status_error(status: StatusCode) -> ClientError {
    if status == StatusCode::UNAUTHORIZED {
        return ClientError::Authentication;
    }
    ClientError::UnexpectedStatus(
        status.as_u16(),
        status.canonical_reason().unwrap_or_default().to_string(),
    )
}

fn bad_request<R: Resource>(body: &[u8], name: &str) -> ClientError {
    let message = match serde_json::from_slice::<ApiError>(body) {
        Ok(api_error) => {
            debug!(
                status = api_error.status,
                id = %api_error.id,
                code = %api_error.code,
                "bad request reported by Sumo Logic"
            );
            api_error.message
        }
        Err(err) => {
            debug!("bad request without error details: {err}");
            String::new()
        }
    };

    if R::AWS_BACKED && is_aws_authentication_error(&message) {
        warn!("AWS refused the credentials of {} `{name}`: {message}", R::KIND);
        return ClientError::AwsAuthentication(message);
    }

    ClientError::BadRequest {
        kind: R::KIND,
        name: name.to_string(),
        message,
    }
}

fn is_aws_authentication_error(message: &str) -> bool {
    AWS_AUTHENTICATION_MESSAGES.contains(&message) || UNREADABLE_S3_BUCKET.is_match(message)
}
