// SPDX-License-Identifier: MPL-2.0
//! Loading and saving the gallery metadata document.
//!
//! The document is a JSON array. Object entries become [`MetadataRecord`]s;
//! anything else is carried through untouched.

use super::record::MetadataRecord;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One element of the document array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CollectionEntry {
    Record(MetadataRecord),
    /// A non-object element, preserved as is.
    Opaque(Value),
}

impl From<Value> for CollectionEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => CollectionEntry::Record(MetadataRecord::new(map)),
            other => CollectionEntry::Opaque(other),
        }
    }
}

/// The ordered sequence of gallery entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetadataCollection {
    entries: Vec<CollectionEntry>,
}

impl MetadataCollection {
    /// Parses a document from its JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Array(items) => Ok(Self {
                entries: items.into_iter().map(CollectionEntry::from).collect(),
            }),
            other => Err(Error::InvalidDocument(format!(
                "expected a JSON array, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Serializes with 2-space indentation and unescaped non-ASCII text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CollectionEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [CollectionEntry] {
        &mut self.entries
    }

    /// Iterates over object entries only.
    pub fn records(&self) -> impl Iterator<Item = &MetadataRecord> {
        self.entries.iter().filter_map(|entry| match entry {
            CollectionEntry::Record(record) => Some(record),
            CollectionEntry::Opaque(_) => None,
        })
    }
}

/// Loads the collection from `path`.
///
/// # Errors
///
/// [`Error::DocumentNotFound`] if `path` does not exist; other variants for
/// unreadable or malformed documents.
pub fn load(path: &Path) -> Result<MetadataCollection> {
    if !path.exists() {
        return Err(Error::DocumentNotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    MetadataCollection::from_json(&text)
}

/// Rewrites the document at `path`.
pub fn save(collection: &MetadataCollection, path: &Path) -> Result<()> {
    let text = collection.to_json()?;
    fs::write(path, text)?;
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
