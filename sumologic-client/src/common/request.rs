//! Builds the HTTP requests of the CRUD operations.

use http::header::{CONTENT_TYPE, IF_MATCH};
use http::{HeaderMap, HeaderValue, Method, Request};
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::http::config::HttpConfigError;
use crate::http::HttpConfig;
use crate::resource::envelope::EnvelopeRef;
use crate::resource::Resource;

/// Resolves resource paths against the endpoint and attaches the common headers.
#[derive(Debug, Clone)]
pub(crate) struct RequestFactory {
    endpoint: Url,
    headers: HeaderMap,
}

impl From<&HttpConfig> for RequestFactory {
    fn from(config: &HttpConfig) -> Self {
        Self {
            endpoint: config.url.clone(),
            headers: config.headers.clone(),
        }
    }
}

impl RequestFactory {
    pub(crate) fn get<R: Resource>(
        &self,
        scope: R::Scope,
        id: u64,
    ) -> ClientResult<Request<Vec<u8>>> {
        self.build(Method::GET, &R::item_path(scope, id), None)
    }

    pub(crate) fn create<R: Resource>(
        &self,
        scope: R::Scope,
        resource: &R,
    ) -> ClientResult<Request<Vec<u8>>> {
        let body = encode(resource)?;
        self.build(Method::POST, &R::collection_path(scope), Some(body))
    }

    pub(crate) fn update<R: Resource>(
        &self,
        scope: R::Scope,
        resource: &R,
        etag: &str,
    ) -> ClientResult<Request<Vec<u8>>> {
        let id = resource.id().ok_or(ClientError::MissingId(R::KIND))?;
        let body = encode(resource)?;
        let mut request = self.build(Method::PUT, &R::item_path(scope, id), Some(body))?;
        let etag = HeaderValue::from_str(etag).map_err(http::Error::from)?;
        request.headers_mut().insert(IF_MATCH, etag);
        Ok(request)
    }

    pub(crate) fn delete<R: Resource>(
        &self,
        scope: R::Scope,
        id: u64,
    ) -> ClientResult<Request<Vec<u8>>> {
        self.build(Method::DELETE, &R::item_path(scope, id), None)
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<Request<Vec<u8>>> {
        let url = self.endpoint.join(path).map_err(HttpConfigError::from)?;

        let mut builder = Request::builder().method(method).uri(url.as_str());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers.clone());
            if body.is_some() {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
        }
        Ok(builder.body(body.unwrap_or_default())?)
    }
}

fn encode<R: Resource>(resource: &R) -> ClientResult<Vec<u8>> {
    serde_json::to_vec(&EnvelopeRef(resource)).map_err(ClientError::Encode)
}
