use std::time::Instant;

use recordgen_core::Schema;
use tracing::info;

use crate::emitter::RecordEmitter;
use crate::errors::Result;
use crate::imports::{render_import, resolve_imports};
use crate::model::{GenerateOptions, GeneratedTypes, GenerationContext};
use crate::printer::print_source;
use crate::resolver::{DeclarationIndex, TypeResolver};
use crate::templates::{TemplateName, template_store};

/// Entry point for generating record type declarations from a schema.
///
/// Generation state lives in a per-call context; nothing carries over between calls.
pub struct TypeGenerator<'a> {
    options: GenerateOptions,
    resolver: &'a dyn TypeResolver,
}

impl<'a> TypeGenerator<'a> {
    pub fn new(options: GenerateOptions, resolver: &'a dyn TypeResolver) -> Self {
        Self { options, resolver }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn generate(&self, schema: &Schema) -> Result<GeneratedTypes> {
        let start = Instant::now();
        let templates = template_store()?;
        let mut ctx = GenerationContext::default();

        info!(
            models = schema.models.len(),
            prefix = self.options.prefix().unwrap_or_default(),
            base_path = %self.options.base_path.display(),
            "type generation started"
        );

        // Record types first: emitting attributes discovers the imports the header needs.
        let body = RecordEmitter::new(&self.options, self.resolver, templates)
            .emit_models(&schema.models, &mut ctx)?;

        let imports = resolve_imports(
            &ctx.imports,
            &self.options.extra_imports,
            &self.options.base_path,
        )?;
        let statements = imports
            .iter()
            .map(|declaration| render_import(declaration, templates))
            .collect::<Result<Vec<_>>>()?;

        let header = [
            templates.render(TemplateName::Header, &[])?,
            statements.join("\n"),
            templates.render(TemplateName::Generics, &[])?,
        ]
        .join("\n\n");

        let source = print_source(&format!("{header}\n\n{body}"))?;

        let mut report = ctx.report;
        report.imports = statements;

        info!(
            models = report.models.len(),
            imports = report.imports.len(),
            warnings = report.warnings.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "type generation finished"
        );

        Ok(GeneratedTypes { source, report })
    }
}

/// Generate declarations using the default resolver over the configured type roots.
pub fn generate_types(schema: &Schema, options: &GenerateOptions) -> Result<String> {
    let resolver = DeclarationIndex::scan(&options.resolver_roots())?;
    let generated = TypeGenerator::new(options.clone(), &resolver).generate(schema)?;
    Ok(generated.source)
}
