//! # tablesmith
//!
//! Deterministic model source generation from parsed relational schemas.
//!
//! A parsed-schema document (the JSON an external DDL parser produces) goes
//! in; ready-to-use source text for one of several target dialects comes
//! out: declarative ORM model structs, plain value records, validation
//! models, flat `CREATE TABLE` statements, or an OpenAPI 3 document.
//!
//! ## Quick start
//!
//! ```
//! use tablesmith::{GenerateOptions, create_models, load_raw_schema};
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
//! # Ok::<(), tablesmith::Error>(())
//! ```
//!
//! ## Dialects
//!
//! | name        | output                                   |
//! |-------------|------------------------------------------|
//! | `orm`       | declarative ORM model structs            |
//! | `record`    | plain value-object records               |
//! | `validator` | serde + schemars validation models       |
//! | `sql`       | flat CREATE TABLE statements             |
//! | `openapi`   | OpenAPI 3 schema document                |
//!
//! Custom generators register through [`Registry`]; see
//! `tablesmith_codegen::registry` for the contract.

pub use tablesmith_codegen::{
    DialectGenerator, Error, GenState, GeneratedOutput, GenerateOptions, RawSchema, Registry,
    create_models, create_models_with, generate, generate_with, load_raw_schema, normalize_schema,
};
pub use tablesmith_types::{Dialect, TypeFamily, model};
