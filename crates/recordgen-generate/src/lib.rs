//! Record type declaration generator for recordgen.
//!
//! This crate turns a data-model schema into TypeScript interface
//! declarations: one identity and record interface per model, attribute and
//! relationship interfaces where declared, and the imports needed for
//! explicitly typed attributes.

pub mod emitter;
pub mod engine;
pub mod errors;
pub mod imports;
pub mod model;
pub mod names;
pub mod paths;
pub mod printer;
pub mod resolver;
pub mod templates;

pub use engine::{TypeGenerator, generate_types};
pub use errors::{GenerateError, Result};
pub use imports::{generate_imports, merge_imports, resolve_imports};
pub use model::{GenerateOptions, GeneratedTypes, GenerationIssue, GenerationReport};
pub use names::{to_pascal_case, to_prefixed_name};
pub use paths::{ResolvedModule, module_specifier, resolve_module};
pub use resolver::{DeclarationIndex, TypeResolver};
pub use templates::{TemplateName, TemplateStore, template_store};
