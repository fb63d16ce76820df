use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use recordgen_core::ImportDeclaration;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::errors::Result;

/// Maps a bare type name to the module that exports it.
///
/// `None` is not an error: callers fall back to an untyped representation.
pub trait TypeResolver {
    fn resolve_type(&self, type_name: &str) -> Option<ImportDeclaration>;
}

/// Index of exported TypeScript declarations found under a set of roots.
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    declarations: BTreeMap<String, PathBuf>,
}

impl DeclarationIndex {
    /// Scan every root for exported declarations. Earlier roots win on duplicates.
    pub fn scan<P: AsRef<Path>>(roots: &[P]) -> Result<Self> {
        let mut index = Self::default();

        for root in roots {
            let root = std::path::absolute(root.as_ref())?;
            if !root.exists() {
                debug!(root = %root.display(), "type root does not exist, skipping");
                continue;
            }

            let walker = WalkDir::new(&root)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));

            for entry in walker {
                let entry = entry.map_err(std::io::Error::from)?;
                if !entry.file_type().is_file() || !is_declaration_source(entry.path()) {
                    continue;
                }

                let source = std::fs::read_to_string(entry.path())?;
                for name in exported_names(&source) {
                    index.insert(name, entry.path().to_path_buf());
                }
            }
        }

        debug!(declarations = index.len(), "type declarations indexed");
        Ok(index)
    }

    /// Build an index from known `(type name, module path)` pairs.
    pub fn from_entries<I, S, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
        P: Into<PathBuf>,
    {
        let mut index = Self::default();
        for (name, path) in entries {
            index.insert(name.into(), path.into());
        }
        index
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    fn insert(&mut self, name: String, path: PathBuf) {
        self.declarations.entry(name).or_insert(path);
    }
}

impl TypeResolver for DeclarationIndex {
    fn resolve_type(&self, type_name: &str) -> Option<ImportDeclaration> {
        self.declarations.get(type_name).map(|path| {
            ImportDeclaration::new(type_name, path.to_string_lossy().into_owned())
        })
    }
}

fn exported_names(source: &str) -> Vec<String> {
    static EXPORT: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(pattern) = EXPORT
        .get_or_init(|| {
            Regex::new(
                r"(?m)^\s*export\s+(?:declare\s+)?(?:abstract\s+)?(?:interface|type|class|enum|const\s+enum)\s+([A-Za-z_$][A-Za-z0-9_$]*)",
            )
            .ok()
        })
        .as_ref()
    else {
        return Vec::new();
    };

    pattern
        .captures_iter(source)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}

fn is_declaration_source(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| matches!(extension, "ts" | "tsx"))
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "node_modules" || name == "target"
}
