//! Schema-less records from the `final_table` collection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A document of arbitrary shape. Serializes as the bare JSON object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinalTableRecord(Map<String, Value>);

impl FinalTableRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for FinalTableRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
