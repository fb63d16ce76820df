use indexmap::IndexMap;
use recordgen_core::{
    AttributeDefinition, ModelDefinition, RelationshipDefinition, RelationshipModel,
};
use tracing::warn;

use crate::errors::Result;
use crate::model::{GenerateOptions, GenerationContext, GenerationIssue};
use crate::names::{starts_with_capital, to_interface_stem};
use crate::resolver::TypeResolver;
use crate::templates::{TemplateName, TemplateStore};

const UNDEFINED: &str = "undefined";

/// Emits the record, identity, attributes and relationships interfaces of each model.
pub struct RecordEmitter<'a> {
    options: &'a GenerateOptions,
    resolver: &'a dyn TypeResolver,
    templates: &'a TemplateStore,
}

impl<'a> RecordEmitter<'a> {
    pub fn new(
        options: &'a GenerateOptions,
        resolver: &'a dyn TypeResolver,
        templates: &'a TemplateStore,
    ) -> Self {
        Self {
            options,
            resolver,
            templates,
        }
    }

    /// Emit every model in schema order.
    pub fn emit_models(
        &self,
        models: &IndexMap<String, ModelDefinition>,
        ctx: &mut GenerationContext,
    ) -> Result<String> {
        let blocks = models
            .iter()
            .map(|(name, definition)| self.emit_model(name, definition, ctx))
            .collect::<Result<Vec<_>>>()?;
        Ok(blocks.join("\n\n"))
    }

    pub fn emit_model(
        &self,
        name: &str,
        definition: &ModelDefinition,
        ctx: &mut GenerationContext,
    ) -> Result<String> {
        let stem = to_interface_stem(name, self.options.prefix())?;
        let mut attributes_type = UNDEFINED.to_string();
        let mut relationships_type = UNDEFINED.to_string();
        let mut trailing = Vec::new();

        if let Some(attributes) = definition.declared_attributes() {
            trailing.push(self.emit_attributes(name, &stem, attributes, ctx)?);
            attributes_type = format!("{stem}Attributes");
        }

        if let Some(relationships) = definition.declared_relationships() {
            trailing.push(self.emit_relationships(name, &stem, relationships, ctx)?);
            relationships_type = format!("{stem}Relationships");
        }

        let record = self.templates.render(
            TemplateName::Record,
            &[name, &stem, &stem, &attributes_type, &relationships_type],
        )?;
        let identity = self
            .templates
            .render(TemplateName::Identity, &[&stem, name])?;

        ctx.report.record_model(name);

        let mut blocks = vec![record, identity];
        blocks.extend(trailing);
        Ok(blocks.join("\n\n"))
    }

    fn emit_attributes(
        &self,
        model: &str,
        stem: &str,
        attributes: &IndexMap<String, AttributeDefinition>,
        ctx: &mut GenerationContext,
    ) -> Result<String> {
        let lines = attributes
            .iter()
            .map(|(name, definition)| -> Result<String> {
                let ts_type = self.attribute_type(model, name, definition, ctx)?;
                Ok(format!("{name}: {ts_type}"))
            })
            .collect::<Result<Vec<String>>>()?;

        self.templates
            .render(TemplateName::Attributes, &[stem, &lines.join("\n")])
    }

    /// Explicit type when it names a resolvable type, else the primitive mapping.
    fn attribute_type(
        &self,
        model: &str,
        name: &str,
        definition: &AttributeDefinition,
        ctx: &mut GenerationContext,
    ) -> Result<String> {
        let explicit = definition
            .field(&self.options.ts_property)
            .filter(|candidate| !candidate.is_empty());

        if let Some(candidate) = explicit
            && starts_with_capital(candidate)?
        {
            match self.resolver.resolve_type(candidate) {
                Some(declaration) => {
                    ctx.imports.push(declaration);
                    return Ok(candidate.to_string());
                }
                None => {
                    warn!(model, attribute = name, type_name = candidate, "could not import type");
                    ctx.report.record_warning(GenerationIssue::warning(
                        "unresolved_type",
                        format!("could not import type {candidate}"),
                        model,
                        name,
                    ));
                }
            }
        }

        Ok(definition.primitive().ts_type().to_string())
    }

    fn emit_relationships(
        &self,
        model: &str,
        stem: &str,
        relationships: &IndexMap<String, RelationshipDefinition>,
        ctx: &mut GenerationContext,
    ) -> Result<String> {
        let lines = relationships
            .iter()
            .map(|(name, definition)| -> Result<String> {
                let ts_type = self.relationship_type(model, name, definition, ctx)?;
                Ok(format!("{name}: {ts_type}"))
            })
            .collect::<Result<Vec<String>>>()?;

        self.templates
            .render(TemplateName::Relationships, &[stem, &lines.join("\n")])
    }

    fn relationship_type(
        &self,
        model: &str,
        name: &str,
        definition: &RelationshipDefinition,
        ctx: &mut GenerationContext,
    ) -> Result<String> {
        let base = definition.kind.ts_type();
        let targets: &[String] = match &definition.model {
            None => return Ok(base.to_string()),
            Some(RelationshipModel::One(target)) => std::slice::from_ref(target),
            Some(RelationshipModel::Many(targets)) => targets,
        };

        if targets.is_empty() {
            warn!(model, relationship = name, "relationship lists no models");
            ctx.report.record_warning(GenerationIssue::warning(
                "empty_relationship_models",
                "relationship lists no models; emitting untyped relationship",
                model,
                name,
            ));
            return Ok(base.to_string());
        }

        let identities = targets
            .iter()
            .map(|target| -> Result<String> {
                let stem = to_interface_stem(target, self.options.prefix())?;
                Ok(format!("{stem}RecordIdentity"))
            })
            .collect::<Result<Vec<String>>>()?;

        Ok(format!("{base}<{}>", identities.join(" | ")))
    }
}
