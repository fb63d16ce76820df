use std::path::{Path, PathBuf};

use recordgen_core::ImportDeclaration;
use tracing::debug;

use crate::errors::Result;
use crate::paths::resolve_module;
use crate::templates::{TemplateName, TemplateStore};

/// Resolve every declaration and merge those whose modules resolve to the same file.
///
/// Discovered declarations come before extra ones. Each merged statement uses
/// the first specifier seen for its file. Any module path that does not exist
/// fails the whole call.
pub fn resolve_imports(
    pending: &[ImportDeclaration],
    extra: &[ImportDeclaration],
    base_path: &Path,
) -> Result<Vec<ImportDeclaration>> {
    let resolved = pending
        .iter()
        .chain(extra)
        .map(|declaration| -> Result<(PathBuf, ImportDeclaration)> {
            let module = resolve_module(&declaration.module_path, base_path)?;
            Ok((
                module.file,
                ImportDeclaration::new(declaration.type_name.clone(), module.specifier),
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(merge_by_key(resolved))
}

/// Merge declarations by module path, keeping first-seen order of modules and types.
pub fn merge_imports(declarations: Vec<ImportDeclaration>) -> Vec<ImportDeclaration> {
    merge_by_key(
        declarations
            .into_iter()
            .map(|declaration| (declaration.module_path.clone(), declaration))
            .collect(),
    )
}

fn merge_by_key<K: PartialEq>(
    declarations: Vec<(K, ImportDeclaration)>,
) -> Vec<ImportDeclaration> {
    let mut merged: Vec<(K, String, Vec<String>)> = Vec::new();

    for (key, declaration) in declarations {
        match merged.iter_mut().find(|(existing, _, _)| *existing == key) {
            Some((_, module_path, types)) => {
                if !types.contains(&declaration.type_name) {
                    debug!(
                        module = %module_path,
                        type_name = %declaration.type_name,
                        "merging import"
                    );
                    types.push(declaration.type_name);
                }
            }
            None => merged.push((key, declaration.module_path, vec![declaration.type_name])),
        }
    }

    merged
        .into_iter()
        .map(|(_, module_path, types)| ImportDeclaration::new(types.join(", "), module_path))
        .collect()
}

/// Render the import block. Empty when there is nothing to import.
pub fn generate_imports(
    pending: &[ImportDeclaration],
    extra: &[ImportDeclaration],
    base_path: &Path,
    templates: &TemplateStore,
) -> Result<String> {
    let statements = resolve_imports(pending, extra, base_path)?
        .iter()
        .map(|declaration| render_import(declaration, templates))
        .collect::<Result<Vec<_>>>()?;

    Ok(statements.join("\n"))
}

pub(crate) fn render_import(
    declaration: &ImportDeclaration,
    templates: &TemplateStore,
) -> Result<String> {
    templates.render(
        TemplateName::Import,
        &[&declaration.type_name, &declaration.module_path],
    )
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::errors::GenerateError;
    use crate::templates::template_store;

    #[test]
    fn merges_by_module_in_encounter_order() {
        let merged = merge_imports(vec![
            ImportDeclaration::new("A", "./types"),
            ImportDeclaration::new("X", "./other"),
            ImportDeclaration::new("B", "./types"),
            ImportDeclaration::new("A", "./types"),
        ]);

        assert_eq!(
            merged,
            vec![
                ImportDeclaration::new("A, B", "./types"),
                ImportDeclaration::new("X", "./other"),
            ]
        );
    }

    #[test]
    fn empty_input_renders_nothing() {
        let store = template_store().expect("store");
        let rendered = generate_imports(&[], &[], Path::new("."), store).expect("render");
        assert_eq!(rendered, "");
    }

    #[test]
    fn different_spellings_of_one_module_merge() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("types.ts"), "export interface A {}\n").expect("write");

        let absolute = dir.path().join("types.ts");
        let pending = vec![
            ImportDeclaration::new("A", absolute.to_string_lossy()),
            ImportDeclaration::new("B", "./types"),
        ];
        let extra = vec![ImportDeclaration::new("C", "./types.ts")];

        let store = template_store().expect("store");
        let rendered = generate_imports(&pending, &extra, dir.path(), store).expect("render");
        assert_eq!(rendered, r#"import { A, B, C } from "./types""#);
    }

    #[test]
    fn directory_and_index_file_share_a_statement() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src = dir.path().join("src");
        fs::create_dir_all(&src).expect("create src");
        fs::write(src.join("index.ts"), "export interface A {}\nexport interface B {}\n")
            .expect("write index");

        let pending = vec![ImportDeclaration::new("A", "./src")];
        let extra = vec![ImportDeclaration::new("B", "./src/index.ts")];

        let merged = resolve_imports(&pending, &extra, dir.path()).expect("resolve");
        assert_eq!(merged, vec![ImportDeclaration::new("A, B", "./src")]);
    }

    #[test]
    fn missing_module_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let extra = vec![ImportDeclaration::new("Ghost", "./ghost")];

        let err = resolve_imports(&[], &extra, dir.path()).expect_err("missing module");
        assert!(matches!(err, GenerateError::Resolution { .. }));
    }
}
