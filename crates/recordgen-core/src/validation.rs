use crate::error::{Error, Result};
use crate::schema::Schema;

/// Validate internal consistency of a schema.
///
/// This checks:
/// - model, attribute and relationship names are non-empty
/// - relationship targets name models present in the schema
pub fn validate_schema(schema: &Schema) -> Result<()> {
    for (model_name, model) in &schema.models {
        if model_name.trim().is_empty() {
            return Err(Error::InvalidSchema("empty model name".to_string()));
        }

        if let Some(attributes) = &model.attributes {
            for attribute_name in attributes.keys() {
                if attribute_name.trim().is_empty() {
                    return Err(Error::InvalidSchema(format!(
                        "empty attribute name on model: {model_name}"
                    )));
                }
            }
        }

        let Some(relationships) = &model.relationships else {
            continue;
        };

        for (relationship_name, relationship) in relationships {
            if relationship_name.trim().is_empty() {
                return Err(Error::InvalidSchema(format!(
                    "empty relationship name on model: {model_name}"
                )));
            }

            for target in relationship.model_names() {
                if !schema.models.contains_key(target) {
                    return Err(Error::InvalidSchema(format!(
                        "relationship target not found: {model_name}.{relationship_name} -> {target}"
                    )));
                }
            }
        }
    }

    Ok(())
}
