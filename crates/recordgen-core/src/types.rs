use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::TYPE_FIELD;

/// Scalar field declared on a model.
///
/// Besides the primitive `type`, any other field is kept so that an
/// alternate field (for example `ts`) can carry an explicit type name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl AttributeDefinition {
    /// Attribute with only a primitive type set.
    pub fn of_type(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            extra: IndexMap::new(),
        }
    }

    /// String value of the named field. `type` addresses the primitive field.
    pub fn field(&self, name: &str) -> Option<&str> {
        if name == TYPE_FIELD {
            return self.kind.as_deref();
        }
        self.extra.get(name).and_then(Value::as_str)
    }

    /// Primitive kind derived from the `type` field.
    pub fn primitive(&self) -> PrimitiveKind {
        PrimitiveKind::from_type(self.kind.as_deref())
    }
}

/// Closed classification of the primitive `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Numeric,
    Other,
}

impl PrimitiveKind {
    pub fn from_type(kind: Option<&str>) -> Self {
        match kind {
            Some("string") => PrimitiveKind::String,
            Some("float" | "integer" | "number" | "numeric") => PrimitiveKind::Numeric,
            _ => PrimitiveKind::Other,
        }
    }

    /// TypeScript type used when no explicit type applies.
    pub fn ts_type(self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Numeric => "number",
            PrimitiveKind::Other => "any",
        }
    }
}

/// Reference from one model to related records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipDefinition {
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<RelationshipModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl RelationshipDefinition {
    pub fn new(kind: RelationshipKind, model: Option<RelationshipModel>) -> Self {
        Self {
            kind,
            model,
            inverse: None,
            extra: IndexMap::new(),
        }
    }

    pub fn has_one(model: impl Into<String>) -> Self {
        Self::new(
            RelationshipKind::HasOne,
            Some(RelationshipModel::One(model.into())),
        )
    }

    pub fn has_many(model: impl Into<String>) -> Self {
        Self::new(
            RelationshipKind::HasMany,
            Some(RelationshipModel::One(model.into())),
        )
    }

    /// Names of every model this relationship may point at.
    pub fn model_names(&self) -> Vec<&str> {
        match &self.model {
            None => Vec::new(),
            Some(RelationshipModel::One(name)) => vec![name.as_str()],
            Some(RelationshipModel::Many(names)) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Cardinality of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipKind {
    HasOne,
    HasMany,
}

impl RelationshipKind {
    /// Name of the generic relationship type in the generated declarations.
    pub fn ts_type(self) -> &'static str {
        match self {
            RelationshipKind::HasOne => "RecordHasOneRelationship",
            RelationshipKind::HasMany => "RecordHasManyRelationship",
        }
    }
}

/// Target model(s) of a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipModel {
    One(String),
    Many(Vec<String>),
}

/// A named type and the module it is imported from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportDeclaration {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(rename = "modulePath")]
    pub module_path: String,
}

impl ImportDeclaration {
    pub fn new(type_name: impl Into<String>, module_path: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            module_path: module_path.into(),
        }
    }
}
