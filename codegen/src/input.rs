//! Loosely-typed descriptors from the external DDL parser
//!
//! The SQL parser is an external collaborator; it hands over tables and
//! enum types as permissive JSON. These types accept that shape verbatim —
//! string-or-number sizes, single-or-compound references, missing fields —
//! and defer all cleanup to the normalization pass.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// Top-level parser output: tables plus enumerated type definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSchema {
    #[serde(default)]
    pub tables: Vec<RawTable>,
    #[serde(default)]
    pub types: Vec<RawEnumType>,
}

/// One parsed table, field names matching the parser's JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTable {
    #[serde(alias = "table_name")]
    pub name: String,
    #[serde(default, alias = "schema")]
    pub table_schema: Option<String>,
    #[serde(default)]
    pub columns: Vec<RawColumn>,
    #[serde(default)]
    pub primary_key: Vec<String>,
    #[serde(default, alias = "index")]
    pub indexes: Vec<RawIndex>,
    #[serde(default)]
    pub alter: Option<RawAlter>,
    #[serde(default)]
    pub checks: Vec<RawCheck>,
    #[serde(default)]
    pub constraints: Option<RawConstraints>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// One parsed column
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub type_token: String,
    #[serde(default)]
    pub size: Option<RawSize>,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default)]
    pub unique: bool,
    /// Default may arrive as a string, number or boolean
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub references: Option<RawReference>,
    #[serde(default)]
    pub generated: Option<RawGenerated>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

fn default_true() -> bool {
    true
}

/// Size as the parser emits it: a number, a numeric string, or a pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSize {
    Int(u32),
    Str(String),
    Pair(u32, u32),
}

/// An inline column reference
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawReference {
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub on_delete: Option<String>,
    #[serde(default)]
    pub on_update: Option<String>,
}

/// A table-level REFERENCES constraint; `name` holds the local column
/// name(s), `columns` the referenced columns. Compound constraints are
/// split into one reference per column during normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConstraintReference {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub on_delete: Option<String>,
    #[serde(default)]
    pub on_update: Option<String>,
}

/// Table-level constraint block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConstraints {
    #[serde(default)]
    pub references: Vec<RawConstraintReference>,
    #[serde(default)]
    pub uniques: Vec<RawUnique>,
}

/// A unique constraint over one or more columns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawUnique {
    #[serde(default)]
    pub constraint_name: Option<String>,
    #[serde(default)]
    pub columns: Vec<String>,
}

/// One parsed index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawIndex {
    #[serde(alias = "name")]
    pub index_name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
}

/// Generated-column expression
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawGenerated {
    #[serde(rename = "as")]
    pub expression: String,
}

/// Post-hoc ALTER block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAlter {
    #[serde(default)]
    pub columns: Vec<RawAlterColumn>,
}

/// One column entry of an ALTER block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAlterColumn {
    pub name: String,
    #[serde(default)]
    pub constraint_name: Option<String>,
    #[serde(default)]
    pub references: Option<RawReference>,
}

/// Check constraint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCheck {
    #[serde(default, alias = "name")]
    pub constraint_name: Option<String>,
    #[serde(default)]
    pub statement: Value,
}

/// One parsed enumerated type definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEnumType {
    #[serde(alias = "type_name")]
    pub name: String,
    #[serde(default)]
    pub base_type: String,
    #[serde(default)]
    pub properties: RawEnumProperties,
}

/// Enum value list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEnumProperties {
    #[serde(default)]
    pub values: Vec<Value>,
}

/// Load a raw schema from a literal JSON document or a file path.
///
/// Exactly one source must be supplied; `document` wins when both are.
pub fn load_raw_schema(document: Option<&str>, path: Option<&Path>) -> Result<RawSchema, Error> {
    match (document, path) {
        (Some(doc), _) => Ok(serde_json::from_str(doc)?),
        (None, Some(p)) => {
            let text = fs::read_to_string(p)?;
            Ok(serde_json::from_str(&text)?)
        }
        (None, None) => Err(Error::MissingInput),
    }
}
