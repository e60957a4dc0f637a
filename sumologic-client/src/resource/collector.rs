//! Hosted collectors.

use serde::{Deserialize, Serialize};

use super::{is_false, Resource, ResourceKind};

/// A collector, either hosted or installed.
///
/// Hosted collectors receive data pushed over HTTP or pulled by specialized
/// sources (e.g. reading from AWS S3). Only hosted collectors can be created
/// through this API; installed collectors are read back as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collector {
    /// Server assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Unique name of the collector.
    pub name: String,
    /// Free form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Source category assigned to data coming through this collector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Time zone used when the data carries none, e.g. `Etc/UTC`.
    #[serde(
        rename = "timezone",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub time_zone: Option<String>,
    /// References to related resources such as the collector's sources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<CollectorLink>,
    /// `Hosted` or `Installable`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector_type: Option<String>,
    /// Version of the collector software, for installed collectors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector_version: Option<String>,
    /// Epoch milliseconds of the last heartbeat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_alive: Option<i64>,
    /// Whether the collector reported recently.
    #[serde(default, skip_serializing_if = "is_false")]
    pub alive: bool,
}

/// A link from a collector to a related resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorLink {
    /// Relation name, e.g. `sources`.
    pub rel: String,
    /// Path of the related resource.
    pub href: String,
}

impl Collector {
    /// Builds a hosted collector with only a name, ready to be created.
    pub fn hosted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collector_type: Some("Hosted".to_string()),
            ..Default::default()
        }
    }
}

impl Resource for Collector {
    type Scope = ();

    const KIND: ResourceKind = ResourceKind::Collector;
    const ENVELOPE_KEY: &'static str = "collector";

    fn collection_path(_scope: ()) -> String {
        "collectors".to_string()
    }

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
