//! Named output fragments with positional `%s` placeholders.
//!
//! Template bodies are embedded at compile time and checked once per process:
//! the number of `%s` markers in a body must match its declared placeholders.

use std::sync::OnceLock;

use crate::errors::{GenerateError, Result};

const MARKER: &str = "%s";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    Header,
    Generics,
    Import,
    Identity,
    Record,
    Attributes,
    Relationships,
}

impl TemplateName {
    pub const ALL: [TemplateName; 7] = [
        TemplateName::Header,
        TemplateName::Generics,
        TemplateName::Import,
        TemplateName::Identity,
        TemplateName::Record,
        TemplateName::Attributes,
        TemplateName::Relationships,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateName::Header => "header",
            TemplateName::Generics => "generics",
            TemplateName::Import => "import",
            TemplateName::Identity => "identity",
            TemplateName::Record => "record",
            TemplateName::Attributes => "attributes",
            TemplateName::Relationships => "relationships",
        }
    }

    fn definition(self) -> (&'static [&'static str], &'static str) {
        match self {
            TemplateName::Header => (&[], include_str!("../templates/header.template")),
            TemplateName::Generics => (&[], include_str!("../templates/generics.template")),
            TemplateName::Import => (
                &["type_list", "module_path"],
                include_str!("../templates/import.template"),
            ),
            TemplateName::Identity => (
                &["interface_stem", "model_name"],
                include_str!("../templates/identity.template"),
            ),
            TemplateName::Record => (
                &[
                    "model_name",
                    "interface_stem",
                    "identity_stem",
                    "attributes_type",
                    "relationships_type",
                ],
                include_str!("../templates/record.template"),
            ),
            TemplateName::Attributes => (
                &["interface_stem", "attribute_lines"],
                include_str!("../templates/attributes.template"),
            ),
            TemplateName::Relationships => (
                &["interface_stem", "relationship_lines"],
                include_str!("../templates/relationships.template"),
            ),
        }
    }
}

/// A named text fragment and its ordered placeholder list.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: TemplateName,
    pub placeholders: &'static [&'static str],
    pub body: &'static str,
}

impl Template {
    /// Substitute `params` into the body in order.
    pub fn render(&self, params: &[&str]) -> Result<String> {
        if params.len() != self.placeholders.len() {
            return Err(GenerateError::Template(format!(
                "template '{}' expects {} parameters ({}), got {}",
                self.name.as_str(),
                self.placeholders.len(),
                self.placeholders.join(", "),
                params.len()
            )));
        }

        let mut rendered = String::with_capacity(self.body.len());
        let mut pieces = self.body.split(MARKER);
        if let Some(first) = pieces.next() {
            rendered.push_str(first);
        }
        for (piece, param) in pieces.zip(params) {
            rendered.push_str(param);
            rendered.push_str(piece);
        }

        Ok(rendered)
    }

    fn validate(&self) -> Result<()> {
        let markers = self.body.matches(MARKER).count();
        if markers != self.placeholders.len() {
            return Err(GenerateError::Template(format!(
                "template '{}' has {} markers but declares {} placeholders",
                self.name.as_str(),
                markers,
                self.placeholders.len()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    /// Build and validate every template.
    pub fn new() -> Result<Self> {
        let templates = TemplateName::ALL
            .iter()
            .map(|name| -> Result<Template> {
                let (placeholders, body) = name.definition();
                let template = Template {
                    name: *name,
                    placeholders,
                    body: body.trim_end(),
                };
                template.validate()?;
                Ok(template)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { templates })
    }

    pub fn get(&self, name: TemplateName) -> Result<&Template> {
        self.templates
            .iter()
            .find(|template| template.name == name)
            .ok_or_else(|| GenerateError::Template(format!("unknown template '{}'", name.as_str())))
    }

    pub fn render(&self, name: TemplateName, params: &[&str]) -> Result<String> {
        self.get(name)?.render(params)
    }
}

/// Process-wide template store, validated on first use.
pub fn template_store() -> Result<&'static TemplateStore> {
    static STORE: OnceLock<std::result::Result<TemplateStore, String>> = OnceLock::new();
    STORE
        .get_or_init(|| TemplateStore::new().map_err(|err| err.to_string()))
        .as_ref()
        .map_err(|message| GenerateError::Template(message.clone()))
}
