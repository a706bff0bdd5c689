//! # tablesmith-codegen
//!
//! Deterministic model source generation from parsed relational schemas.
//!
//! The pipeline takes the loosely-typed table and enum descriptors an
//! external DDL parser produces, normalizes them once into a read-only
//! entity model, and folds the tables through a dialect generator into one
//! text document:
//!
//! ```text
//! raw descriptors -> normalize -> Schema
//!   -> [enums body] -> per-table generate_model -> create_header -> render
//! ```
//!
//! ## Quick start
//!
//! ```
//! use tablesmith_codegen::{GenerateOptions, create_models, load_raw_schema};
//!
//! let raw = load_raw_schema(Some(r#"{
//!     "tables": [{
//!         "table_name": "users",
//!         "columns": [
//!             {"name": "id", "type": "serial", "nullable": false},
//!             {"name": "name", "type": "varchar", "size": 160}
//!         ],
//!         "primary_key": ["id"]
//!     }]
//! }"#), None)?;
//!
//! let output = create_models(&raw, "orm", &GenerateOptions::default())?;
//! assert!(output.code.contains("pub struct Users"));
//! # Ok::<(), tablesmith_codegen::Error>(())
//! ```
//!
//! Generation is a pure function of `(schema, dialect, options)`: identical
//! inputs produce byte-identical output. The only mutable state is the
//! [`GenState`] accumulator a run owns; see its docs for the isolation
//! contract.

pub mod assemble;
pub mod error;
pub mod generators;
pub mod input;
pub mod naming;
pub mod normalize;
pub mod options;
pub mod profile;
pub mod registry;
pub mod relations;
pub mod render;
pub mod resolver;
pub mod state;

pub use error::Error;
pub use input::{RawSchema, load_raw_schema};
pub use normalize::normalize_schema;
pub use options::GenerateOptions;
pub use registry::{DialectGenerator, Registry};
pub use state::GenState;

use tablesmith_types::model::Schema;

use crate::relations::collect_relationships;

/// Result of one generation run
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
    /// The generated source text
    pub code: String,
    /// The normalized entity model, for programmatic inspection
    pub schema: Schema,
}

/// Normalize raw parser output and generate source text in one call.
///
/// Returns [`Error::NoEntities`] when the parser produced neither tables
/// nor enum types — an empty document is never generated.
pub fn create_models(
    raw: &RawSchema,
    dialect: &str,
    opts: &GenerateOptions,
) -> Result<GeneratedOutput, Error> {
    create_models_with(&Registry::new(), raw, dialect, opts)
}

/// Like [`create_models`], with a caller-supplied registry of generators
pub fn create_models_with(
    registry: &Registry,
    raw: &RawSchema,
    dialect: &str,
    opts: &GenerateOptions,
) -> Result<GeneratedOutput, Error> {
    let schema = normalize_schema(raw)?;
    if schema.is_empty() {
        return Err(Error::NoEntities);
    }
    let code = generate_with(registry, &schema, dialect, opts)?;
    Ok(GeneratedOutput { code, schema })
}

/// Generate source text for an already-normalized schema
pub fn generate(schema: &Schema, dialect: &str, opts: &GenerateOptions) -> Result<String, Error> {
    generate_with(&Registry::new(), schema, dialect, opts)
}

/// Core pipeline: one deterministic fold over the tables.
///
/// A fresh generator instance and a fresh [`GenState`] serve this run only.
/// Tables are processed in input order; the header is built after the last
/// table, when every import marker has been recorded.
pub fn generate_with(
    registry: &Registry,
    schema: &Schema,
    dialect: &str,
    opts: &GenerateOptions,
) -> Result<String, Error> {
    let generator = registry.create(dialect)?;
    let mut state = GenState::new();
    state.register_enums(&schema.enums);

    log::debug!(
        "generating `{dialect}` models for {} table(s), {} enum type(s)",
        schema.tables.len(),
        schema.enums.len()
    );

    let mut body = String::new();

    // Enums emit before any table body, since columns may reference them
    if !schema.enums.is_empty() {
        if let Some(enum_body) = generator.generate_enums(&schema.enums, &mut state) {
            body.push_str(&enum_body);
        }
    }

    let relationships = if opts.relationships {
        collect_relationships(&schema.tables)
    } else {
        Vec::new()
    };

    for table in &schema.tables {
        let table_relations = relations::for_table(&relationships, &table.name);
        body.push_str(&generator.generate_model(table, &mut state, &table_relations, opts));
    }

    let header = generator.create_header(&schema.tables, &state, opts);
    Ok(render::render(generator.render_template(), &header, &body))
}
