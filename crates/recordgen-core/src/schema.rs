use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::types::{AttributeDefinition, RelationshipDefinition};

/// Top-level data-model schema: a set of named models.
///
/// Model order follows the source document and drives output order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub models: IndexMap<String, ModelDefinition>,
}

impl Schema {
    /// Decode a schema from a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Read and decode a schema from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// A named entity type with typed attributes and relationships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<IndexMap<String, AttributeDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<IndexMap<String, RelationshipDefinition>>,
    /// Secondary key definitions. Carried through, never emitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<IndexMap<String, Value>>,
}

impl ModelDefinition {
    /// Attributes, when at least one is declared.
    pub fn declared_attributes(&self) -> Option<&IndexMap<String, AttributeDefinition>> {
        self.attributes.as_ref().filter(|attributes| !attributes.is_empty())
    }

    /// Relationships, when at least one is declared.
    pub fn declared_relationships(&self) -> Option<&IndexMap<String, RelationshipDefinition>> {
        self.relationships
            .as_ref()
            .filter(|relationships| !relationships.is_empty())
    }
}
