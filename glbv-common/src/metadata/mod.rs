//! Per-video metadata record
//!
//! `metadata.yaml` is a flat, string-keyed mapping. The keys the pipeline
//! relies on (`week`, `author`, `status`) get typed fields; every other key is
//! carried verbatim in [`VideoMetadata::extra`] so unknown fields survive a
//! read-modify-write cycle.

pub mod seed;
pub mod store;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::fmt;

pub use seed::{seed_pending_status, SeedReason, SeedStrategy};
pub use store::{load, load_or_empty, merge_into, save, LoadedMetadata};

const WEEK_KEY: &str = "week";
const AUTHOR_KEY: &str = "author";
const STATUS_KEY: &str = "status";

/// Lifecycle status of an asset, stored as written
///
/// The raw text is preserved so a round trip never rewrites the user's
/// spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status(String);

impl Status {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn pending() -> Self {
        Self("pending".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `delete` in any case
    pub fn is_delete(&self) -> bool {
        self.0.eq_ignore_ascii_case("delete")
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape error raised when a YAML document is not a string-keyed mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError(String);

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ShapeError {}

/// Parsed `metadata.yaml`
///
/// Well-known keys holding a non-string value (e.g. `week: 3`) stay in
/// `extra` untouched rather than being coerced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Mapping", into = "Mapping")]
pub struct VideoMetadata {
    pub week: Option<String>,
    pub author: Option<String>,
    pub status: Option<Status>,
    pub extra: BTreeMap<String, Value>,
}

impl VideoMetadata {
    /// True if any `status` key exists, whatever its value
    pub fn has_status(&self) -> bool {
        self.status.is_some() || self.extra.contains_key(STATUS_KEY)
    }

    /// True if the `status` value equals `delete`, ignoring case
    pub fn is_marked_for_deletion(&self) -> bool {
        self.status.as_ref().is_some_and(Status::is_delete)
    }

    pub fn is_empty(&self) -> bool {
        self.week.is_none()
            && self.author.is_none()
            && self.status.is_none()
            && self.extra.is_empty()
    }

    /// Number of keys in the mapping
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }

    /// Shallow merge: every key of `patch` overwrites the same key here
    pub fn merge(&mut self, patch: VideoMetadata) {
        let mut entries = std::mem::take(self).into_entries();
        entries.extend(patch.into_entries());
        *self = Self::from_entries(entries);
    }

    /// Build from a flat string-keyed mapping
    pub fn from_entries(entries: BTreeMap<String, Value>) -> Self {
        let mut meta = Self::default();
        for (key, value) in entries {
            match value {
                Value::String(s) if key == WEEK_KEY => meta.week = Some(s),
                Value::String(s) if key == AUTHOR_KEY => meta.author = Some(s),
                Value::String(s) if key == STATUS_KEY => meta.status = Some(Status::new(s)),
                value => {
                    meta.extra.insert(key, value);
                }
            }
        }
        meta
    }

    /// Flatten back into a single sorted mapping
    pub fn into_entries(self) -> BTreeMap<String, Value> {
        let mut entries = self.extra;
        if let Some(week) = self.week {
            entries.insert(WEEK_KEY.to_string(), Value::String(week));
        }
        if let Some(author) = self.author {
            entries.insert(AUTHOR_KEY.to_string(), Value::String(author));
        }
        if let Some(status) = self.status {
            entries.insert(STATUS_KEY.to_string(), Value::String(status.0));
        }
        entries
    }

    fn entries(&self) -> BTreeMap<String, Value> {
        self.clone().into_entries()
    }

    /// Convert a JSON object (API request body) into a metadata record
    pub fn from_json_map(
        map: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, ShapeError> {
        let value = serde_yaml::to_value(serde_json::Value::Object(map))
            .map_err(|e| ShapeError(e.to_string()))?;
        Self::try_from(value)
    }
}

impl TryFrom<Mapping> for VideoMetadata {
    type Error = ShapeError;

    fn try_from(mapping: Mapping) -> Result<Self, Self::Error> {
        let mut entries = BTreeMap::new();
        for (key, value) in mapping {
            match key {
                Value::String(key) => {
                    entries.insert(key, value);
                }
                other => {
                    return Err(ShapeError(format!(
                        "mapping key must be a string, found {}",
                        describe(&other)
                    )))
                }
            }
        }
        Ok(Self::from_entries(entries))
    }
}

impl TryFrom<Value> for VideoMetadata {
    type Error = ShapeError;

    /// An empty document (`null`) is an empty mapping
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Mapping(mapping) => Self::try_from(mapping),
            Value::Tagged(tagged) => Self::try_from(tagged.value),
            other => Err(ShapeError(format!("expected a mapping, found {}", describe(&other)))),
        }
    }
}

impl From<VideoMetadata> for Mapping {
    fn from(meta: VideoMetadata) -> Self {
        meta.into_entries()
            .into_iter()
            .map(|(k, v)| (Value::String(k), v))
            .collect()
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<VideoMetadata, ShapeError> {
        VideoMetadata::try_from(serde_yaml::from_str::<Value>(yaml).unwrap())
    }

    fn meta(pairs: &[(&str, &str)]) -> VideoMetadata {
        VideoMetadata::from_entries(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect(),
        )
    }

    #[test]
    fn test_known_keys_are_typed() {
        let m = parse("week: week1\nauthor: alice\nstatus: pending\nnotes: hi\n").unwrap();
        assert_eq!(m.week.as_deref(), Some("week1"));
        assert_eq!(m.author.as_deref(), Some("alice"));
        assert_eq!(m.status, Some(Status::pending()));
        assert_eq!(m.extra.get("notes"), Some(&Value::String("hi".into())));
        assert_eq!(m.len(), 4);
    }

    #[test]
    fn test_non_string_known_key_stays_in_extra() {
        let m = parse("week: 3\nstatus: null\n").unwrap();
        assert!(m.week.is_none());
        assert!(m.status.is_none());
        assert!(m.has_status());
        assert!(m.contains_key("week"));
    }

    #[test]
    fn test_null_document_is_empty_mapping() {
        assert!(parse("~").unwrap().is_empty());
    }

    #[test]
    fn test_sequence_is_rejected() {
        assert!(parse("- a\n- b\n").is_err());
        assert!(parse("just a string").is_err());
    }

    #[test]
    fn test_non_string_key_is_rejected() {
        assert!(parse("1: one\n").is_err());
    }

    #[test]
    fn test_status_delete_is_case_insensitive() {
        assert!(Status::new("DELETE").is_delete());
        assert!(Status::new("Delete").is_delete());
        assert!(!Status::new("pending").is_delete());
        assert!(!Status::new("deleted").is_delete());
        assert_eq!(Status::new("DELETE").to_string(), "DELETE");
    }

    #[test]
    fn test_merge_patch_wins_on_conflict() {
        let mut base = meta(&[("week", "week1"), ("author", "alice"), ("status", "pending")]);
        base.merge(meta(&[("status", "delete"), ("notes", "bad take")]));

        assert_eq!(base.week.as_deref(), Some("week1"));
        assert_eq!(base.author.as_deref(), Some("alice"));
        assert!(base.is_marked_for_deletion());
        assert_eq!(base.extra.get("notes"), Some(&Value::String("bad take".into())));
    }

    #[test]
    fn test_merge_sequential_equals_combined_patch() {
        let base = meta(&[("week", "week1"), ("a", "0")]);
        let p1 = meta(&[("a", "1"), ("b", "1"), ("author", "alice")]);
        let p2 = meta(&[("b", "2"), ("c", "2"), ("author", "bob")]);

        let mut sequential = base.clone();
        sequential.merge(p1.clone());
        sequential.merge(p2.clone());

        let mut combined_patch = p1;
        combined_patch.merge(p2);
        let mut combined = base;
        combined.merge(combined_patch);

        assert_eq!(sequential, combined);
        assert_eq!(sequential.author.as_deref(), Some("bob"));
        assert_eq!(sequential.extra.get("b"), Some(&Value::String("2".into())));
    }

    #[test]
    fn test_merge_disjoint_keys_union() {
        let mut base = meta(&[("x", "1")]);
        base.merge(meta(&[("y", "2")]));
        assert!(base.contains_key("x"));
        assert!(base.contains_key("y"));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_merge_string_over_non_string_known_key() {
        let mut base = parse("week: 3\n").unwrap();
        base.merge(meta(&[("week", "week7")]));
        assert_eq!(base.week.as_deref(), Some("week7"));
        assert!(!base.extra.contains_key("week"));
    }

    #[test]
    fn test_from_json_map() {
        let json = serde_json::json!({"week": "week1", "author": "alice", "score": 4, "ok": true});
        let serde_json::Value::Object(map) = json else {
            unreachable!()
        };
        let m = VideoMetadata::from_json_map(map).unwrap();
        assert_eq!(m.week.as_deref(), Some("week1"));
        assert_eq!(m.extra.get("score"), Some(&Value::Number(4u64.into())));
        assert_eq!(m.extra.get("ok"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_serializes_to_json_object() {
        let m = meta(&[("week", "week1"), ("status", "pending")]);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json, serde_json::json!({"status": "pending", "week": "week1"}));
    }
}
