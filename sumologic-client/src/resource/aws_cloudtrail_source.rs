//! AWS CloudTrail sources, polling CloudTrail logs delivered to S3.

use serde::{Deserialize, Serialize};

use super::{AwsBucketResource, Resource, ResourceKind, SourceBase, ThirdPartyRef};

/// A source collecting AWS CloudTrail logs from an S3 bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsCloudTrailSource {
    /// Fields shared with the other source kinds.
    #[serde(flatten)]
    pub base: SourceBase,
    /// Bucket and credentials.
    #[serde(default)]
    pub third_party_ref: ThirdPartyRef,
}

impl AwsCloudTrailSource {
    /// A polling CloudTrail source reading `bucket_name` through `role_arn`.
    pub fn new(
        name: impl Into<String>,
        bucket_name: impl Into<String>,
        path_expression: impl Into<String>,
        role_arn: impl Into<String>,
    ) -> Self {
        Self {
            base: SourceBase {
                source_type: Some("Polling".to_string()),
                content_type: Some("AwsCloudTrailBucket".to_string()),
                ..SourceBase::named(name)
            },
            third_party_ref: ThirdPartyRef {
                resources: vec![AwsBucketResource::role_based(
                    "AwsCloudTrailBucket",
                    bucket_name,
                    path_expression,
                    role_arn,
                )],
            },
        }
    }
}

impl Resource for AwsCloudTrailSource {
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
