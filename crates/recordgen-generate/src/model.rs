use std::collections::BTreeMap;
use std::path::PathBuf;

use recordgen_core::{ImportDeclaration, TYPE_FIELD};
use serde::{Deserialize, Serialize};

/// Options for type generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Root for resolving import module paths; imports are written relative to it.
    pub base_path: PathBuf,
    /// Declarations imported in addition to the ones discovered from attributes.
    pub extra_imports: Vec<ImportDeclaration>,
    /// Attribute field holding an explicit type name.
    pub ts_property: String,
    /// Namespace token prepended to every model-derived interface name.
    pub prefix: Option<String>,
    /// Directories scanned for exported type declarations. Empty means `base_path`.
    pub type_roots: Vec<PathBuf>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            base_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            extra_imports: Vec::new(),
            ts_property: TYPE_FIELD.to_string(),
            prefix: None,
            type_roots: Vec::new(),
        }
    }
}

impl GenerateOptions {
    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_ts_property(mut self, ts_property: impl Into<String>) -> Self {
        self.ts_property = ts_property.into();
        self
    }

    pub fn with_extra_import(mut self, declaration: ImportDeclaration) -> Self {
        self.extra_imports.push(declaration);
        self
    }

    /// Non-empty prefix, if configured.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref().filter(|prefix| !prefix.is_empty())
    }

    /// Directories the default resolver scans.
    pub fn resolver_roots(&self) -> Vec<PathBuf> {
        if self.type_roots.is_empty() {
            vec![self.base_path.clone()]
        } else {
            self.type_roots.clone()
        }
    }
}

/// Structured, non-fatal generation issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationIssue {
    pub level: String,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl GenerationIssue {
    pub fn warning(
        code: impl Into<String>,
        message: impl Into<String>,
        model: &str,
        field: &str,
    ) -> Self {
        Self {
            level: "warning".to_string(),
            code: code.into(),
            message: message.into(),
            model: Some(model.to_string()),
            field: Some(field.to_string()),
        }
    }
}

/// Summary of a generation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub models: Vec<String>,
    pub imports: Vec<String>,
    pub warnings_by_code: BTreeMap<String, u64>,
    pub warnings: Vec<GenerationIssue>,
}

impl GenerationReport {
    pub fn record_model(&mut self, name: &str) {
        self.models.push(name.to_string());
    }

    pub fn record_warning(&mut self, issue: GenerationIssue) {
        *self.warnings_by_code.entry(issue.code.clone()).or_insert(0) += 1;
        self.warnings.push(issue);
    }
}

/// State owned by a single generation call and threaded through the emitters.
#[derive(Debug, Default)]
pub struct GenerationContext {
    /// Import declarations discovered while emitting attributes, in encounter order.
    pub imports: Vec<ImportDeclaration>,
    pub report: GenerationReport,
}

/// Output of a generation call.
#[derive(Debug, Clone)]
pub struct GeneratedTypes {
    pub source: String,
    pub report: GenerationReport,
}
