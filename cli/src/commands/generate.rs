//! Generate command implementation

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::Colorize;

use tablesmith_codegen::{Error, GenerateOptions, create_models, load_raw_schema};

use crate::config::TablesmithConfig;

/// Flag-level overrides for the generate run
#[derive(Debug, Default)]
pub struct GenerateArgs {
    /// Inline parsed-schema JSON
    pub schema_json: Option<String>,
    /// Path to a parsed-schema JSON file
    pub schema_path: Option<PathBuf>,
    pub dialect: Option<String>,
    pub out: Option<PathBuf>,
    pub singular: bool,
    pub no_defaults: bool,
    pub relationships: bool,
    pub per_table_schema: bool,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    /// Treat an empty parse result as success
    pub exit_silent: bool,
}

/// Run the generate command
pub fn run(config: &TablesmithConfig, args: &GenerateArgs) -> anyhow::Result<()> {
    let dialect = args
        .dialect
        .as_deref()
        .or(config.dialect.as_deref())
        .unwrap_or("orm")
        .to_string();

    let mut options: GenerateOptions = config.generate_options();
    if args.singular {
        options.singular = true;
    }
    if args.no_defaults {
        options.defaults_off = true;
    }
    if args.relationships {
        options.relationships = true;
    }
    if args.per_table_schema {
        options.schema_global = false;
    }
    if let Some(prefix) = &args.prefix {
        options.table_prefix = prefix.clone();
    }
    if let Some(suffix) = &args.suffix {
        options.table_suffix = suffix.clone();
    }

    let schema_path = args.schema_path.as_deref().or(config.schema.as_deref());
    let raw = load_raw_schema(args.schema_json.as_deref(), schema_path)
        .context("could not load the parsed-schema document")?;

    let output = match create_models(&raw, &dialect, &options) {
        Ok(output) => output,
        Err(Error::NoEntities) if args.exit_silent => {
            println!("{}", "Nothing to generate.".yellow());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let out = args.out.as_deref().or(config.out.as_deref());
    write_output(&output.code, out)?;

    // Piped output stays clean; the summary only accompanies file writes
    if let Some(path) = out {
        println!(
            "  {} {} table(s), {} enum type(s) as {}",
            "Generated".green(),
            output.schema.tables.len(),
            output.schema.enums.len(),
            dialect.bright_cyan()
        );
        println!("  {} {}", "Wrote".green(), path.display());
    }

    Ok(())
}

fn write_output(code: &str, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("could not create {}", parent.display()))?;
            }
            fs::write(path, code).with_context(|| format!("could not write {}", path.display()))
        }
        None => {
            print!("{code}");
            Ok(())
        }
    }
}
