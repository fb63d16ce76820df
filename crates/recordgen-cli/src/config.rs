use std::path::{Path, PathBuf};

use recordgen_core::ImportDeclaration;
use recordgen_generate::GenerateOptions;
use serde::Deserialize;
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "recordgen.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("toml decode error in {}: {source}", path.display())]
    TomlDecode {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings read from `recordgen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub base_path: Option<PathBuf>,
    pub prefix: Option<String>,
    pub ts_property: Option<String>,
    pub type_roots: Vec<PathBuf>,
    pub extra_imports: Vec<ImportDeclaration>,
    pub output: Option<PathBuf>,
}

impl CliConfig {
    /// Resolve relative paths against the directory holding the config file.
    fn rebase(mut self, dir: &Path) -> Self {
        self.base_path = self.base_path.map(|path| dir.join(path));
        self.type_roots = self.type_roots.into_iter().map(|path| dir.join(path)).collect();
        self.output = self.output.map(|path| dir.join(path));
        self
    }
}

/// Values given on the command line. They win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_path: Option<PathBuf>,
    pub prefix: Option<String>,
    pub ts_property: Option<String>,
    pub type_roots: Vec<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Load the explicit config file, or `recordgen.toml` in `cwd` when present.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<CliConfig>, ConfigError> {
    let path = match explicit {
        Some(path) => cwd.join(path),
        None => {
            let candidate = cwd.join(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                return Ok(None);
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config: CliConfig = toml::from_str(&content).map_err(|source| ConfigError::TomlDecode {
        path: path.clone(),
        source,
    })?;

    let dir = path.parent().unwrap_or(cwd);
    Ok(Some(config.rebase(dir)))
}

/// Merge defaults, config file and command-line overrides into generation options.
///
/// Returns the options and the output path, if any.
pub fn build_options(
    config: Option<CliConfig>,
    overrides: Overrides,
) -> (GenerateOptions, Option<PathBuf>) {
    let config = config.unwrap_or_default();
    let mut options = GenerateOptions::default();

    if let Some(base_path) = overrides.base_path.or(config.base_path) {
        options.base_path = base_path;
    }
    if let Some(ts_property) = overrides.ts_property.or(config.ts_property) {
        options.ts_property = ts_property;
    }
    options.prefix = overrides
        .prefix
        .or(config.prefix)
        .filter(|prefix| !prefix.is_empty());
    options.type_roots = if overrides.type_roots.is_empty() {
        config.type_roots
    } else {
        overrides.type_roots
    };
    options.extra_imports = config.extra_imports;

    (options, overrides.output.or(config.output))
}
