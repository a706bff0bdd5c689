//! tablesmith CLI - Main entry point
//!
//! Turns a parsed-schema JSON document into model source text for the
//! chosen dialect.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use tablesmith_cli::commands;
use tablesmith_cli::commands::generate::GenerateArgs;
use tablesmith_cli::config::{DEFAULT_CONFIG_FILE, TablesmithConfig, sample_config};

/// tablesmith - model source generation from parsed relational schemas
#[derive(Parser, Debug)]
#[command(name = "tablesmith")]
#[command(author, version, about = "Generate model source from a parsed relational schema", long_about = None)]
struct Cli {
    /// Path to config file (default: tablesmith.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
enum Command {
    /// Generate model source from a parsed-schema document
    Generate {
        /// Path to the parsed-schema JSON file
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Inline parsed-schema JSON (overrides --schema)
        #[arg(long, value_name = "JSON")]
        schema_json: Option<String>,

        /// Target dialect (orm, record, validator, sql, openapi)
        #[arg(short, long)]
        dialect: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Singular class names (users -> User)
        #[arg(long)]
        singular: bool,

        /// Suppress default values
        #[arg(long)]
        no_defaults: bool,

        /// Infer relationship declarations from foreign keys
        #[arg(long)]
        relationships: bool,

        /// Declare the schema qualifier per table instead of globally
        #[arg(long)]
        per_table_schema: bool,

        /// Prefix for generated class names
        #[arg(long)]
        prefix: Option<String>,

        /// Suffix for generated class names
        #[arg(long)]
        suffix: Option<String>,

        /// Exit successfully when the parser produced no entities
        #[arg(long)]
        exit_silent: bool,
    },

    /// List the available dialects
    Dialects,

    /// Initialize a new tablesmith.toml configuration file
    Init {
        /// Default dialect to configure
        #[arg(short, long, default_value = "orm")]
        dialect: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Generate {
            schema,
            schema_json,
            dialect,
            out,
            singular,
            no_defaults,
            relationships,
            per_table_schema,
            prefix,
            suffix,
            exit_silent,
        } => {
            let config = load_config(cli.config.as_deref())?;
            commands::generate::run(
                &config,
                &GenerateArgs {
                    schema_json,
                    schema_path: schema,
                    dialect,
                    out,
                    singular,
                    no_defaults,
                    relationships,
                    per_table_schema,
                    prefix,
                    suffix,
                    exit_silent,
                },
            )
        }
        Command::Dialects => {
            commands::dialects::run();
            Ok(())
        }
        Command::Init { dialect } => run_init(&dialect),
    }
}

/// Load configuration with fallback to the default path
fn load_config(custom_path: Option<&std::path::Path>) -> anyhow::Result<TablesmithConfig> {
    match custom_path {
        Some(path) => Ok(TablesmithConfig::load_from(path)?),
        None => Ok(TablesmithConfig::load()?),
    }
}

/// Initialize a new tablesmith.toml file
fn run_init(dialect: &str) -> anyhow::Result<()> {
    if tablesmith_types::Dialect::parse(dialect).is_none() {
        anyhow::bail!("unknown dialect `{dialect}`, see `tablesmith dialects`");
    }

    let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{DEFAULT_CONFIG_FILE} already exists. Delete it first to reinitialize.");
    }

    std::fs::write(&config_path, sample_config(dialect))?;

    println!("{}", format!("Created {DEFAULT_CONFIG_FILE}").bright_green());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point {} at your parsed-schema JSON document",
        "schema".bright_cyan()
    );
    println!(
        "  2. Run {} to generate your models",
        "tablesmith generate".bright_cyan()
    );

    Ok(())
}
