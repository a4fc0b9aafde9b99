use crate::links::OutgoingLinks;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Raw document identifier as stored in the dataset. Numeric ids are
/// accepted and kept in their decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(id) => Ok(DocumentId(id)),
            Value::Number(n) => Ok(DocumentId(n.to_string())),
            other => Err(de::Error::custom(format!(
                "document_id must be a string or number, got {}",
                other
            ))),
        }
    }
}

/// One row of the crawl dataset. A page may appear in several rows (one per
/// crawled chunk); the graph builder decides how rows are merged.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRecord {
    pub document_id: DocumentId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub outgoing_links: OutgoingLinks,
    #[serde(default)]
    pub source: Option<String>,
}

impl DocumentRecord {
    pub fn new(document_id: impl Into<String>, outgoing_links: OutgoingLinks) -> Self {
        Self {
            document_id: DocumentId::new(document_id),
            title: None,
            outgoing_links,
            source: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
