// SPDX-License-Identifier: MPL-2.0
//! A single gallery image record.

use crate::domain::metadata::GpsCoordinates;
use serde::Serialize;
use serde_json::{Map, Value};

pub const SRC_KEY: &str = "src";
pub const LATITUDE_KEY: &str = "latitude";
pub const LONGITUDE_KEY: &str = "longitude";

/// One image entry of the metadata document.
///
/// Fields are kept as an ordered JSON object so that everything other than
/// the coordinates is written back exactly as it was read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetadataRecord {
    fields: Map<String, Value>,
}

impl MetadataRecord {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The `src` path, or an empty string if absent or not a string.
    pub fn src(&self) -> &str {
        self.fields
            .get(SRC_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.fields.get(LATITUDE_KEY).and_then(Value::as_f64)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.fields.get(LONGITUDE_KEY).and_then(Value::as_f64)
    }

    /// Returns whether either coordinate is absent or `null`.
    pub fn needs_coordinates(&self) -> bool {
        is_unset(self.fields.get(LATITUDE_KEY)) || is_unset(self.fields.get(LONGITUDE_KEY))
    }

    /// Writes both coordinates.
    ///
    /// Existing keys keep their position; absent keys are appended.
    pub fn set_coordinates(&mut self, coordinates: GpsCoordinates) {
        self.fields
            .insert(LATITUDE_KEY.to_string(), Value::from(coordinates.latitude()));
        self.fields
            .insert(LONGITUDE_KEY.to_string(), Value::from(coordinates.longitude()));
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

fn is_unset(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}
