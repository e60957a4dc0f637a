//! HTTP sources, receiving logs pushed to a generated URL.

use serde::{Deserialize, Serialize};

use super::{Filter, Resource, ResourceKind, SourceBase};

/// A source receiving data over HTTP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpSource {
    /// Fields shared with the other source kinds.
    #[serde(flatten)]
    pub base: SourceBase,
    /// Treat every request body as a single message.
    #[serde(default)]
    pub message_per_request: bool,
    /// Join lines into multiline messages.
    #[serde(default)]
    pub multiline_processing_enabled: bool,
    /// Infer message boundaries instead of using `manual_prefix_regexp`.
    #[serde(default)]
    pub use_autoline_matching: bool,
    /// Regular expression matching the first line of a message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_prefix_regexp: Option<String>,
    /// Receiver URL, assigned by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Processing rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
}

impl HttpSource {
    /// An HTTP source with only a name, ready to be created.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            base: SourceBase {
                source_type: Some("HTTP".to_string()),
                ..SourceBase::named(name)
            },
            ..Default::default()
        }
    }
}

impl Resource for HttpSource {
    type Scope = u64;

    const KIND: ResourceKind = ResourceKind::Source;
    const ENVELOPE_KEY: &'static str = "source";

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
