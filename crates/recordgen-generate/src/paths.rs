//! Module-path resolution and normalization for generated import statements.

use std::path::{Component, Path, PathBuf};

use serde_json::Value;

use crate::errors::{GenerateError, Result};

/// File extensions probed, in order, when resolving a module specifier.
pub const MODULE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".d.ts", ".js", ".jsx", ".json"];

type Step<'a, T> = Box<dyn Fn(T) -> Result<T> + 'a>;

/// Ordered single-argument transformations, stopping at the first failure.
pub struct Pipeline<'a, T> {
    steps: Vec<Step<'a, T>>,
}

impl<'a, T> Default for Pipeline<'a, T> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<'a, T> Pipeline<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then<F>(mut self, step: F) -> Self
    where
        F: Fn(T) -> Result<T> + 'a,
    {
        self.steps.push(Box::new(step));
        self
    }

    pub fn run(&self, input: T) -> Result<T> {
        self.steps.iter().try_fold(input, |value, step| step(value))
    }
}

/// A module path checked against the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    /// Absolute path of the file the module path resolves to.
    pub file: PathBuf,
    /// Import specifier relative to the base path, or the bare package name.
    pub specifier: String,
}

/// Resolve a declaration's module path and derive its import specifier.
///
/// The module must resolve to an existing file; otherwise the whole call fails.
pub fn resolve_module(module_path: &str, base_path: &Path) -> Result<ResolvedModule> {
    let file = Pipeline::new()
        .then(|path: PathBuf| resolve_path(&display(path), base_path))
        .then(|resolved| validate_path(&resolved))
        .run(PathBuf::from(module_path))?;

    if is_bare_specifier(module_path) {
        return Ok(ResolvedModule {
            file,
            specifier: module_path.to_string(),
        });
    }

    let specifier = Pipeline::new()
        .then(|path: String| to_relative_path(base_path, &base_path.join(path)))
        .then(|relative| Ok(strip_extension(&relative)))
        .then(|relative| Ok(to_forward_slash(&relative)))
        .then(|relative| Ok(add_dot_slash(&relative)))
        .run(module_path.to_string())?;

    Ok(ResolvedModule { file, specifier })
}

/// Turn a declaration's module path into an import specifier relative to `base_path`.
pub fn module_specifier(module_path: &str, base_path: &Path) -> Result<String> {
    resolve_module(module_path, base_path).map(|module| module.specifier)
}

/// Resolve a module specifier to an absolute file path, using `base_path` as the search root.
pub fn resolve_path(module_path: &str, base_path: &Path) -> Result<PathBuf> {
    let base = absolutize(base_path)?;
    let candidates: Vec<PathBuf> = if is_bare_specifier(module_path) {
        base.ancestors()
            .map(|dir| dir.join("node_modules").join(module_path))
            .collect()
    } else {
        vec![normalize(&base.join(module_path))]
    };

    candidates
        .iter()
        .find_map(|candidate| probe_module(candidate))
        .ok_or_else(|| GenerateError::Resolution {
            module: module_path.to_string(),
            base,
        })
}

/// Fail with [`GenerateError::NotFound`] when `path` does not exist on disk.
pub fn validate_path(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(GenerateError::NotFound(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

/// Lexical relative path from `from` to `to`, using the platform separator.
pub fn to_relative_path(from: &Path, to: &Path) -> Result<String> {
    let from = absolutize(from)?;
    let to = absolutize(to)?;

    let from_parts: Vec<Component<'_>> = from.components().collect();
    let to_parts: Vec<Component<'_>> = to.components().collect();
    let shared = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(left, right)| left == right)
        .count();

    let mut relative = PathBuf::new();
    for _ in shared..from_parts.len() {
        relative.push("..");
    }
    for part in &to_parts[shared..] {
        relative.push(part.as_os_str());
    }

    Ok(display(relative))
}

/// Drop the file extension, treating `.d.ts` as a single extension.
///
/// Only a trailing file name loses its extension; `.` and `..` are kept.
/// An empty result is the current directory, `.`.
pub fn strip_extension(path: &str) -> String {
    let names_a_file = matches!(
        Path::new(path).components().next_back(),
        Some(Component::Normal(_))
    );

    let stripped = match path.strip_suffix(".d.ts") {
        _ if !names_a_file => path,
        Some(stem) => stem,
        None => {
            let name_start = path.rfind(['/', '\\']).map_or(0, |idx| idx + 1);
            match path[name_start..].rfind('.') {
                Some(dot) if dot > 0 => &path[..name_start + dot],
                _ => path,
            }
        }
    };

    if stripped.is_empty() {
        ".".to_string()
    } else {
        stripped.to_string()
    }
}

pub fn to_forward_slash(path: &str) -> String {
    path.replace('\\', "/")
}

/// Prefix with `./` unless the path is exactly `.`.
pub fn add_dot_slash(path: &str) -> String {
    if path == "." {
        path.to_string()
    } else {
        format!("./{path}")
    }
}

fn is_bare_specifier(module_path: &str) -> bool {
    !(Path::new(module_path).is_absolute()
        || module_path == "."
        || module_path == ".."
        || module_path.starts_with("./")
        || module_path.starts_with("../")
        || module_path.starts_with(".\\")
        || module_path.starts_with("..\\"))
}

fn probe_module(candidate: &Path) -> Option<PathBuf> {
    if candidate.is_file() {
        return Some(candidate.to_path_buf());
    }

    for extension in MODULE_EXTENSIONS {
        let mut with_extension = candidate.as_os_str().to_owned();
        with_extension.push(extension);
        let with_extension = PathBuf::from(with_extension);
        if with_extension.is_file() {
            return Some(with_extension);
        }
    }

    if !candidate.is_dir() {
        return None;
    }

    if let Some(entry) = package_entry(candidate) {
        let entry = normalize(&candidate.join(entry));
        if entry.is_file() {
            return Some(entry);
        }
    }

    MODULE_EXTENSIONS
        .iter()
        .map(|extension| candidate.join(format!("index{extension}")))
        .find(|index| index.is_file())
}

fn package_entry(dir: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(dir.join("package.json")).ok()?;
    let manifest: Value = serde_json::from_str(&contents).ok()?;
    ["types", "typings", "main"]
        .iter()
        .find_map(|key| manifest.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    Ok(normalize(&std::path::absolute(path)?))
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn display(path: impl AsRef<Path>) -> String {
    path.as_ref().to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn pipeline_short_circuits_on_first_failure() {
        let pipeline = Pipeline::new()
            .then(|value: String| Ok(format!("{value}a")))
            .then(|value| Err(GenerateError::NotFound(PathBuf::from(value))))
            .then(|value| Ok(format!("{value}c")));

        match pipeline.run("x".to_string()) {
            Err(GenerateError::NotFound(path)) => assert_eq!(path, PathBuf::from("xa")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn strip_extension_cases() {
        assert_eq!(strip_extension("src/types.ts"), "src/types");
        assert_eq!(strip_extension("src/types.d.ts"), "src/types");
        assert_eq!(strip_extension("src"), "src");
        assert_eq!(strip_extension("lib.v2/index"), "lib.v2/index");
        assert_eq!(strip_extension(".hidden"), ".hidden");
        assert_eq!(strip_extension(""), ".");
        assert_eq!(strip_extension(".."), "..");
        assert_eq!(strip_extension("../.."), "../..");
        assert_eq!(strip_extension("../types.ts"), "../types");
    }

    #[test]
    fn imports_above_the_base_path_walk_up() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("index.ts"), "export interface Root {}
").expect("write index");
        fs::write(dir.path().join("shared.ts"), "export interface Shared {}
")
            .expect("write shared");
        let app = dir.path().join("app");
        let deep = app.join("deep");
        fs::create_dir_all(&deep).expect("create deep");

        let root = dir.path().to_str().expect("utf-8 path");
        assert_eq!(module_specifier(root, &app).unwrap(), "./..");
        assert_eq!(module_specifier(root, &deep).unwrap(), "./../..");
        assert_eq!(module_specifier("../shared.ts", &app).unwrap(), "./../shared");
        assert_eq!(module_specifier("../../shared", &deep).unwrap(), "./../../shared");
    }

    #[test]
    fn resolved_module_keeps_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src = dir.path().join("src");
        fs::create_dir_all(&src).expect("create src");
        fs::write(src.join("index.ts"), "export {}\n").expect("write index");

        let by_dir = resolve_module("./src", dir.path()).expect("resolve dir");
        let by_file = resolve_module("./src/index.ts", dir.path()).expect("resolve file");
        assert_eq!(by_dir.file, by_file.file);
        assert_eq!(by_dir.specifier, "./src");
        assert_eq!(by_file.specifier, "./src/index");
    }

    #[test]
    fn dot_slash_is_not_added_to_current_dir() {
        assert_eq!(add_dot_slash("."), ".");
        assert_eq!(add_dot_slash("types"), "./types");
        assert_eq!(to_forward_slash(r"src\models\user"), "src/models/user");
    }

    #[test]
    fn relative_path_walks_up_and_down() {
        let base = Path::new("/project/src/app");
        assert_eq!(
            to_relative_path(base, Path::new("/project/src/types.ts")).unwrap(),
            format!("..{}types.ts", std::path::MAIN_SEPARATOR)
        );
        assert_eq!(to_relative_path(base, base).unwrap(), "");
    }

    #[test]
    fn resolves_with_extension_and_index() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src = dir.path().join("src");
        fs::create_dir_all(&src).expect("create src");
        fs::write(src.join("types.ts"), "export interface A {}\n").expect("write types");
        fs::write(src.join("index.ts"), "export * from './types'\n").expect("write index");

        let resolved = resolve_path("./src/types", dir.path()).expect("resolve types");
        assert!(resolved.ends_with("src/types.ts"));

        let resolved = resolve_path("./src", dir.path()).expect("resolve dir");
        assert!(resolved.ends_with("src/index.ts"));

        let err = resolve_path("./src/missing", dir.path()).expect_err("missing module");
        assert!(matches!(err, GenerateError::Resolution { .. }));
    }

    #[test]
    fn resolves_bare_specifiers_from_node_modules() {
        let dir = tempfile::tempdir().expect("tempdir");
        let package = dir.path().join("node_modules").join("shapes");
        fs::create_dir_all(&package).expect("create package");
        fs::write(package.join("package.json"), r#"{"types": "dist/shapes.d.ts"}"#)
            .expect("write manifest");
        fs::create_dir_all(package.join("dist")).expect("create dist");
        fs::write(package.join("dist/shapes.d.ts"), "export interface Circle {}\n")
            .expect("write declarations");

        let nested = dir.path().join("app");
        fs::create_dir_all(&nested).expect("create app");

        let resolved = resolve_path("shapes", &nested).expect("resolve package");
        assert!(resolved.ends_with("dist/shapes.d.ts"));
        assert_eq!(module_specifier("shapes", &nested).unwrap(), "shapes");
    }

    #[test]
    fn module_specifier_is_relative_to_base() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src = dir.path().join("src");
        fs::create_dir_all(&src).expect("create src");
        fs::write(src.join("types.ts"), "export type Id = string\n").expect("write types");
        fs::write(src.join("index.ts"), "export {}\n").expect("write index");

        let types = src.join("types.ts");
        let types = types.to_str().expect("utf-8 path");
        assert_eq!(module_specifier(types, dir.path()).unwrap(), "./src/types");
        assert_eq!(module_specifier(types, &src).unwrap(), "./types");

        let src_path = src.to_str().expect("utf-8 path");
        assert_eq!(module_specifier(src_path, dir.path()).unwrap(), "./src");
        assert_eq!(module_specifier(src_path, &src).unwrap(), ".");
    }
}
