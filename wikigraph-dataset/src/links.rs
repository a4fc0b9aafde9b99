use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashSet;

/// The `outgoing_links` field of a record, decoded once at ingestion.
///
/// Crawlers emit this field as a bare string, a list of strings, or a list
/// that itself contains lists. Anything else (null, numbers, objects) is kept
/// as [`LinkEntry::Malformed`] so downstream code can skip it without
/// inspecting JSON types again.
#[derive(Debug, Clone, PartialEq)]
pub enum OutgoingLinks {
    Single(String),
    Many(Vec<LinkEntry>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkEntry {
    Valid(String),
    /// A list inside the list. Only one level is kept; deeper lists decode as malformed.
    Nested(Vec<LinkEntry>),
    Malformed,
}

impl Default for OutgoingLinks {
    fn default() -> Self {
        OutgoingLinks::Many(Vec::new())
    }
}

impl From<Value> for OutgoingLinks {
    fn from(value: Value) -> Self {
        match value {
            Value::String(link) => OutgoingLinks::Single(link),
            Value::Array(items) => {
                OutgoingLinks::Many(items.into_iter().map(LinkEntry::from_item).collect())
            }
            _ => OutgoingLinks::Many(vec![LinkEntry::Malformed]),
        }
    }
}

impl<'de> Deserialize<'de> for OutgoingLinks {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(OutgoingLinks::from)
    }
}

impl LinkEntry {
    fn from_item(value: Value) -> Self {
        match value {
            Value::String(link) => LinkEntry::Valid(link),
            Value::Array(inner) => LinkEntry::Nested(
                inner
                    .into_iter()
                    .map(|v| match v {
                        Value::String(link) => LinkEntry::Valid(link),
                        _ => LinkEntry::Malformed,
                    })
                    .collect(),
            ),
            _ => LinkEntry::Malformed,
        }
    }
}

impl OutgoingLinks {
    /// Every usable link with one level of nesting flattened, duplicates kept.
    /// A bare string counts as a single-item list.
    pub fn candidates(&self) -> Vec<&str> {
        match self {
            OutgoingLinks::Single(link) => vec![link.as_str()],
            OutgoingLinks::Many(entries) => {
                let mut links = Vec::with_capacity(entries.len());
                for entry in entries {
                    match entry {
                        LinkEntry::Valid(link) => links.push(link.as_str()),
                        LinkEntry::Nested(inner) => {
                            links.extend(inner.iter().filter_map(LinkEntry::as_valid))
                        }
                        LinkEntry::Malformed => {}
                    }
                }
                links
            }
        }
    }

    /// Deduplicated [`candidates`](Self::candidates), first occurrence wins.
    pub fn flatten(&self) -> Vec<&str> {
        flatten_links([self])
    }

    /// String items of a list value, in order and with duplicates.
    ///
    /// Bare strings and nested lists yield nothing here.
    pub fn direct_links(&self) -> Vec<&str> {
        match self {
            OutgoingLinks::Single(_) => Vec::new(),
            OutgoingLinks::Many(entries) => entries.iter().filter_map(LinkEntry::as_valid).collect(),
        }
    }

    pub fn malformed_count(&self) -> usize {
        match self {
            OutgoingLinks::Single(_) => 0,
            OutgoingLinks::Many(entries) => entries
                .iter()
                .map(|entry| match entry {
                    LinkEntry::Malformed => 1,
                    LinkEntry::Nested(inner) => inner
                        .iter()
                        .filter(|e| matches!(e, LinkEntry::Malformed))
                        .count(),
                    LinkEntry::Valid(_) => 0,
                })
                .sum(),
        }
    }
}

impl LinkEntry {
    pub fn as_valid(&self) -> Option<&str> {
        match self {
            LinkEntry::Valid(link) => Some(link.as_str()),
            _ => None,
        }
    }
}

/// Union of several link values, flattened one level and deduplicated.
pub fn flatten_links<'a, I>(values: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a OutgoingLinks>,
{
    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for value in values {
        for link in value.candidates() {
            if seen.insert(link) {
                links.push(link);
            }
        }
    }
    links
}
