//! Pieces shared by every source kind.

use serde::{Deserialize, Serialize};

/// Fields common to all sources, flattened into each source's wire object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBase {
    /// Server assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Name of the source, unique within its collector.
    pub name: String,
    /// Collector owning the source.
    #[serde(
        rename = "CollectorId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub collector_id: Option<u64>,
    /// Free form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Source category assigned to the ingested data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Time zone used when the data carries none.
    #[serde(
        rename = "timezone",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub time_zone: Option<String>,
    /// e.g. `HTTP`, `Polling`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    /// e.g. `AwsCloudTrailBucket`, `AwsS3Bucket`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Polling interval in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_interval: Option<u64>,
    /// Whether collection is paused.
    #[serde(default)]
    pub paused: bool,
    /// How far back to collect on creation, e.g. `-1h`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_relative_time: Option<String>,
}

impl SourceBase {
    /// A base with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Processing rule applied to the data before it is indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// `Include`, `Exclude`, `Hash` or `Mask`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<String>,
    /// Name of the rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expression the rule matches on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regexp: Option<String>,
}

/// AWS configuration of a source reading from S3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPartyRef {
    /// Buckets the source reads from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<AwsBucketResource>,
}

/// A single bucket together with the credentials used to read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsBucketResource {
    /// e.g. `AwsCloudTrailBucket`.
    pub service_type: String,
    /// Location of the data.
    pub path: AwsBucketPath,
    /// Credentials used to read the data.
    pub authentication: AwsAuthentication,
}

/// Location of the data in S3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsBucketPath {
    /// e.g. `S3BucketPathExpression`.
    #[serde(rename = "type")]
    pub path_type: String,
    /// Name of the bucket.
    pub bucket_name: String,
    /// Key pattern, wildcards allowed.
    pub path_expression: String,
}

/// Role based credentials for S3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsAuthentication {
    /// e.g. `AWSRoleBasedAuthentication`.
    #[serde(rename = "type")]
    pub auth_type: String,
    /// Role assumed to read the bucket.
    #[serde(rename = "roleARN")]
    pub role_arn: String,
}

impl AwsBucketResource {
    /// A bucket read through the given IAM role.
    pub fn role_based(
        service_type: impl Into<String>,
        bucket_name: impl Into<String>,
        path_expression: impl Into<String>,
        role_arn: impl Into<String>,
    ) -> Self {
        Self {
            service_type: service_type.into(),
            path: AwsBucketPath {
                path_type: "S3BucketPathExpression".to_string(),
                bucket_name: bucket_name.into(),
                path_expression: path_expression.into(),
            },
            authentication: AwsAuthentication {
                auth_type: "AWSRoleBasedAuthentication".to_string(),
                role_arn: role_arn.into(),
            },
        }
    }
}
