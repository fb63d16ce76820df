mod config;
mod logging;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use config::{ConfigError, Overrides, build_options, load_config};
use logging::{LoggingError, init_logging};
use output::write_bytes_atomic;
use recordgen_core::{Error as CoreError, Schema, validate_schema};
use recordgen_generate::{DeclarationIndex, GenerateError, TypeGenerator};
use thiserror::Error;

const USAGE: &str = "Usage: recordgen FILE [OUTPUT]";

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("schema error: {0}")]
    Core(#[from] CoreError),
    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "recordgen",
    version,
    about = "Generate TypeScript record declarations from a model schema"
)]
struct Cli {
    /// JSON schema document with a `models` mapping.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
    /// Write the declarations here instead of printing them.
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Prefix for every generated interface name.
    #[arg(
        long = "with-prefix",
        value_name = "PREFIX",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    with_prefix: Option<String>,
    /// Directory import paths are made relative to.
    #[arg(long, value_name = "DIR")]
    base_path: Option<PathBuf>,
    /// Attribute field holding an explicit type name.
    #[arg(long, value_name = "NAME")]
    ts_property: Option<String>,
    /// Directory scanned for exported type declarations (repeatable).
    #[arg(long = "type-root", value_name = "DIR")]
    type_roots: Vec<PathBuf>,
    /// Config file (defaults to ./recordgen.toml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Also write JSON logs to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Skip schema validation before generating.
    #[arg(long, default_value_t = false)]
    no_validate: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(input) = cli.input.clone() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    if let Err(err) = init_logging(cli.log_file.as_deref()) {
        eprintln!("error: {}", CliError::from(err));
        return ExitCode::FAILURE;
    }

    match run(cli, &input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "run_failed", error = %err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, input: &Path) -> Result<(), CliError> {
    let timer = Instant::now();
    let cwd = std::env::current_dir()?;
    let config = load_config(cli.config.as_deref(), &cwd)?;

    let prefix = match cli.with_prefix {
        Some(prefix) if prefix.is_empty() => {
            tracing::warn!(
                "types will be generated without prefix because --with-prefix has no value; \
                 use --with-prefix=PREFIX"
            );
            None
        }
        other => other,
    };

    let overrides = Overrides {
        base_path: cli.base_path,
        prefix,
        ts_property: cli.ts_property,
        type_roots: cli.type_roots,
        output: cli.output,
    };
    let (options, output) = build_options(config, overrides);

    let schema = Schema::from_json_file(input)?;
    if !cli.no_validate {
        validate_schema(&schema)?;
    }
    tracing::info!(
        event = "schema_loaded",
        path = %input.display(),
        models = schema.models.len()
    );

    let resolver = DeclarationIndex::scan(&options.resolver_roots())?;
    tracing::debug!(event = "declarations_indexed", declarations = resolver.len());

    let generated = TypeGenerator::new(options, &resolver).generate(&schema)?;
    for warning in &generated.report.warnings {
        tracing::debug!(
            code = %warning.code,
            model = warning.model.as_deref().unwrap_or_default(),
            field = warning.field.as_deref().unwrap_or_default(),
            "{}",
            warning.message
        );
    }

    match output {
        Some(path) => {
            let path = cwd.join(path);
            write_bytes_atomic(&path, generated.source.as_bytes()).map_err(|source| {
                CliError::Write {
                    path: path.clone(),
                    source,
                }
            })?;
            tracing::info!(
                event = "types_written",
                path = %path.display(),
                warnings = generated.report.warnings.len(),
                duration_ms = timer.elapsed().as_millis() as u64,
                "types were successfully generated"
            );
        }
        None => print!("{}", generated.source),
    }

    Ok(())
}
