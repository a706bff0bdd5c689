//! Normalized schema entities
//!
//! These are the read-only entities the generation pipeline works on. They
//! are produced exactly once by the normalization pass in
//! `tablesmith-codegen` from the loosely-typed descriptors the external DDL
//! parser returns, and never mutated afterwards.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Column size: a plain length or a precision/scale pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Size {
    /// e.g. `varchar(255)`
    Scalar(u32),
    /// e.g. `numeric(10, 2)`
    Precision(u32, u32),
}

/// Foreign-key descriptor attached to a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Referenced table name
    pub table: String,
    /// Referenced column name. Filled during normalization: defaults to the
    /// referencing column's own name when the parser left it unspecified.
    pub column: String,
    /// ON DELETE action, verbatim from the parser (e.g. `cascade`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
    /// ON UPDATE action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,
    /// Schema of the referenced table, when qualified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

/// A single normalized column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Source type token, lower-cased, quotes stripped. May still carry an
    /// array suffix (`integer[]`) or a schema qualifier (`public.mood`);
    /// the type resolver strips those at lookup time.
    pub type_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    pub nullable: bool,
    pub unique: bool,
    /// Raw default text, possibly a function-call literal like `now()`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
    /// Expression of a generated (computed) column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_as: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,
}

/// Index descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

/// Check-constraint descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub statement: String,
}

/// A column entry from a post-hoc `ALTER TABLE` block.
///
/// Unnamed foreign keys from these entries are merged into the matching
/// column's [`Reference`] during normalization; the descriptor itself is
/// kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterColumn {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

/// A single normalized table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    /// Optional namespace qualifier (`schema.table`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub columns: Vec<Column>,
    /// Primary-key column names; always a subset of the column names
    pub primary_key: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<Index>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<Check>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alter_columns: Vec<AlterColumn>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,
}

impl Table {
    /// Whether the named column is part of the primary key
    #[must_use]
    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_key.iter().any(|pk| pk == column)
    }
}

/// Element kind of an enumerated type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumKind {
    /// String-like members
    Text,
    /// All members are numeric literals
    Numeric,
}

/// One member of an enumerated type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    /// Identifier-safe member name derived during normalization
    pub name: String,
    /// Original value, quotes stripped
    pub value: String,
}

/// A normalized enumerated type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
    /// Base type name as it appears in column type tokens
    pub name: String,
    /// PascalCase class name used in generated source
    pub class_name: String,
    pub kind: EnumKind,
    /// Members sorted lexicographically by value
    pub members: Vec<EnumMember>,
}

/// The complete normalized schema handed to the generation pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub tables: Vec<Table>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<EnumType>,
}

impl Schema {
    /// Check if the schema holds no entities at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.enums.is_empty()
    }
}
