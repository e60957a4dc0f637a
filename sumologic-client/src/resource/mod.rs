//! Resources managed through the Sumo Logic collector management API.
//!
//! Every resource kind implements [`Resource`], which tells the clients where
//! the resource lives, how it is wrapped on the wire and which error to
//! report when it does not exist.

use std::fmt::{self, Debug, Display, Formatter};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;

pub mod aws_cloudtrail_source;
pub mod aws_log_source;
pub mod collector;
pub mod envelope;
pub mod http_source;
pub mod source;

pub use aws_cloudtrail_source::AwsCloudTrailSource;
pub use aws_log_source::AwsLogSource;
pub use collector::{Collector, CollectorLink};
pub use envelope::Envelope;
pub use http_source::HttpSource;
pub use source::{
    AwsAuthentication, AwsBucketPath, AwsBucketResource, Filter, SourceBase, ThirdPartyRef,
};

/// The two families of resources exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A hosted collector.
    Collector,
    /// A source attached to a collector.
    Source,
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Collector => write!(f, "collector"),
            ResourceKind::Source => write!(f, "source"),
        }
    }
}

/// Capabilities a type needs to go through the generic CRUD operations.
pub trait Resource: Serialize + DeserializeOwned {
    /// Identifies the container the resource lives in. Collectors are top level
    /// (`()`), sources live under the id of their collector.
    type Scope: Copy + Debug;

    /// The family this resource belongs to.
    const KIND: ResourceKind;

    /// Top level key wrapping the resource in request and response bodies.
    const ENVELOPE_KEY: &'static str;

    /// Whether a bad request for this resource may be caused by AWS refusing
    /// the credentials configured on it.
    const AWS_BACKED: bool = false;

    /// Path of the collection, relative to the API endpoint.
    fn collection_path(scope: Self::Scope) -> String;

    /// Path of a single resource, relative to the API endpoint.
    fn item_path(scope: Self::Scope, id: u64) -> String {
        format!("{}/{id}", Self::collection_path(scope))
    }

    /// Server assigned identifier, if the resource has been created.
    fn id(&self) -> Option<u64>;

    /// Name of the resource, unique within its scope.
    fn name(&self) -> &str;

    /// Error reported when the API does not know the resource.
    fn not_found(id: u64) -> ClientError {
        match Self::KIND {
            ResourceKind::Collector => ClientError::CollectorNotFound(id),
            ResourceKind::Source => ClientError::SourceNotFound(id),
        }
    }
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
