//! AWS S3 log sources, polling arbitrary log files from a bucket.

use serde::{Deserialize, Serialize};

use super::{is_false, AwsBucketResource, Resource, ResourceKind, SourceBase, ThirdPartyRef};

/// A source collecting log files (S3 access logs, ELB logs, ...) from S3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsLogSource {
    /// Fields shared with the other source kinds.
    #[serde(flatten)]
    pub base: SourceBase,
    /// Join lines into multiline messages.
    #[serde(default, skip_serializing_if = "is_false")]
    pub multiline_processing_enabled: bool,
    /// Infer message boundaries instead of using `manual_prefix_regexp`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub use_autoline_matching: bool,
    /// Regular expression matching the first line of a message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_prefix_regexp: Option<String>,
    /// Endpoint URL, assigned by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Bucket and credentials.
    #[serde(default)]
    pub third_party_ref: ThirdPartyRef,
}

impl AwsLogSource {
    /// A polling S3 source reading `bucket_name` through `role_arn`.
    pub fn new(
        name: impl Into<String>,
        bucket_name: impl Into<String>,
        path_expression: impl Into<String>,
        role_arn: impl Into<String>,
    ) -> Self {
        Self {
            base: SourceBase {
                source_type: Some("Polling".to_string()),
                content_type: Some("AwsS3Bucket".to_string()),
                ..SourceBase::named(name)
            },
            third_party_ref: ThirdPartyRef {
                resources: vec![AwsBucketResource::role_based(
                    "AwsS3Bucket",
                    bucket_name,
                    path_expression,
                    role_arn,
                )],
            },
            ..Default::default()
        }
    }
}

impl Resource for AwsLogSource {
    type Scope = u64;

    const KIND: ResourceKind = ResourceKind::Source;
    const ENVELOPE_KEY: &'static str = "source";
    const AWS_BACKED: bool = true;

    fn collection_path(collector_id: u64) -> String {
        format!("collectors/{collector_id}/sources")
    }

    fn id(&self) -> Option<u64> {
        self.base.id
    }

    fn name(&self) -> &str {
        &self.base.name
    }
}
