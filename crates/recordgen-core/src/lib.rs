//! Core contracts for recordgen.
//!
//! This crate defines the data-model schema consumed by the type generator
//! (models, attributes and relationships), the import declaration shared by
//! the generation pipeline, and structural schema validation.

pub mod error;
pub mod schema;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use schema::{ModelDefinition, Schema};
pub use types::{
    AttributeDefinition, ImportDeclaration, PrimitiveKind, RelationshipDefinition,
    RelationshipKind, RelationshipModel,
};
pub use validation::validate_schema;

/// Field name holding the primitive data type of an attribute.
pub const TYPE_FIELD: &str = "type";
