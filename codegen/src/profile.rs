//! Per-dialect configuration data
//!
//! The dialects differ mostly in literal format strings and type maps, so
//! they are expressed as data consumed by one shared type resolver and
//! column assembler instead of near-duplicate per-dialect modules.

use tablesmith_types::{Dialect, TypeFamily};

use crate::state::Marker;

/// Type-resolution data for one dialect
#[derive(Debug, Clone, Copy)]
pub struct TypeProfile {
    /// Declaration text by type family
    pub families: &'static [(TypeFamily, &'static str)],
    /// Tokens that keep their own spelling instead of the family text
    pub overrides: &'static [(&'static str, &'static str)],
    /// Rust field type by family; empty for non-Rust dialects
    pub field_types: &'static [(TypeFamily, &'static str)],
    /// Families that record an import marker when resolved
    pub extensions: &'static [(TypeFamily, Marker)],
    /// Declaration texts that never take call parentheses
    pub no_parens: &'static [&'static str],
    /// Append `()` to sizeless declaration types
    pub call_parens: bool,
    /// Array wrapper for the declaration text, with an `{inner}` slot
    pub array_template: &'static str,
    /// Declaration text for a column typed by a known enum; `{name}` is the
    /// enum class name, `{base}` its source type name
    pub enum_template: &'static str,
}

/// Column-clause templates for one dialect. `None` disables the step.
#[derive(Debug, Clone, Copy)]
pub struct ClauseProfile {
    pub autoincrement: Option<&'static str>,
    /// `{table}`/`{column}` slots
    pub reference: Option<&'static str>,
    /// `{action}` slot
    pub on_delete: Option<&'static str>,
    pub on_update: Option<&'static str>,
    pub not_null: Option<&'static str>,
    /// `{value}` slot
    pub default: Option<&'static str>,
    /// Template used instead of `default` when the value is the dialect's
    /// current-time expression
    pub default_fn: Option<&'static str>,
    pub primary_key: Option<&'static str>,
    pub unique: Option<&'static str>,
    /// Joins the assembled clauses
    pub separator: &'static str,
    /// Cascade actions render lowercase (`cascade`) or uppercase (`CASCADE`)
    pub action_lowercase: bool,
    /// The dialect's idiomatic current-time expression
    pub now_expr: &'static str,
    /// Quote style for string literals in defaults
    pub quote: QuoteStyle,
}

/// How string default literals are quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// Rust string literal: `"New title"`
    Rust,
    /// SQL string literal: `'New title'`
    Sql,
}

/// Complete per-dialect configuration
#[derive(Debug, Clone, Copy)]
pub struct DialectProfile {
    pub dialect: Dialect,
    pub types: TypeProfile,
    pub clauses: ClauseProfile,
}

/// Rust field types shared by the orm, record and validator dialects
const RUST_FIELD_TYPES: &[(TypeFamily, &str)] = &[
    (TypeFamily::String, "String"),
    (TypeFamily::Text, "String"),
    (TypeFamily::Binary, "Vec<u8>"),
    (TypeFamily::Json, "Value"),
    (TypeFamily::Integer, "i32"),
    (TypeFamily::BigInteger, "i64"),
    (TypeFamily::Float, "f64"),
    (TypeFamily::Numeric, "Decimal"),
    (TypeFamily::Boolean, "bool"),
    (TypeFamily::DateTime, "NaiveDateTime"),
    (TypeFamily::Date, "NaiveDate"),
    (TypeFamily::Time, "NaiveTime"),
    (TypeFamily::Uuid, "Uuid"),
];

/// Families that pull an import into generated Rust source
const RUST_EXTENSIONS: &[(TypeFamily, Marker)] = &[
    (TypeFamily::Json, Marker::Json),
    (TypeFamily::Numeric, Marker::Decimal),
    (TypeFamily::DateTime, Marker::DateTime),
    (TypeFamily::Date, Marker::Date),
    (TypeFamily::Time, Marker::Time),
    (TypeFamily::Uuid, Marker::Uuid),
];

/// Canonical lowercase declaration types used by the attribute grammar and
/// the SQL dialect alike
const DECL_FAMILIES: &[(TypeFamily, &str)] = &[
    (TypeFamily::String, "varchar"),
    (TypeFamily::Text, "text"),
    (TypeFamily::Binary, "bytea"),
    (TypeFamily::Json, "json"),
    (TypeFamily::Integer, "integer"),
    (TypeFamily::BigInteger, "bigint"),
    (TypeFamily::Float, "real"),
    (TypeFamily::Numeric, "numeric"),
    (TypeFamily::Boolean, "boolean"),
    (TypeFamily::DateTime, "timestamp"),
    (TypeFamily::Date, "date"),
    (TypeFamily::Time, "time"),
    (TypeFamily::Uuid, "uuid"),
];

/// Tokens that keep their own spelling in declaration text
const DECL_OVERRIDES: &[(&str, &str)] = &[
    ("serial", "serial"),
    ("smallserial", "smallserial"),
    ("bigserial", "bigserial"),
    ("smallint", "smallint"),
    ("jsonb", "jsonb"),
];

/// Declarative ORM model structs
pub const ORM: DialectProfile = DialectProfile {
    dialect: Dialect::Orm,
    types: TypeProfile {
        families: DECL_FAMILIES,
        overrides: DECL_OVERRIDES,
        field_types: RUST_FIELD_TYPES,
        extensions: RUST_EXTENSIONS,
        no_parens: &["uuid"],
        call_parens: true,
        array_template: "array({inner})",
        enum_template: "enum({name})",
    },
    clauses: ClauseProfile {
        autoincrement: Some("autoincrement"),
        reference: Some("references = {table}::{column}"),
        on_delete: Some("on_delete = {action}"),
        on_update: Some("on_update = {action}"),
        not_null: Some("not_null"),
        default: Some("default = {value}"),
        default_fn: Some("default_fn = now"),
        primary_key: Some("primary"),
        unique: Some("unique"),
        separator: ", ",
        action_lowercase: true,
        now_expr: "now",
        quote: QuoteStyle::Rust,
    },
};

/// Flat CREATE TABLE statements
pub const SQL: DialectProfile = DialectProfile {
    dialect: Dialect::Sql,
    types: TypeProfile {
        families: DECL_FAMILIES,
        overrides: DECL_OVERRIDES,
        field_types: &[],
        extensions: &[],
        no_parens: &[],
        call_parens: false,
        array_template: "{inner}[]",
        enum_template: "{base}",
    },
    clauses: ClauseProfile {
        autoincrement: None,
        reference: Some("REFERENCES \"{table}\" (\"{column}\")"),
        on_delete: Some("ON DELETE {action}"),
        on_update: Some("ON UPDATE {action}"),
        not_null: Some("NOT NULL"),
        default: Some("DEFAULT {value}"),
        default_fn: None,
        primary_key: Some("PRIMARY KEY"),
        unique: Some("UNIQUE"),
        separator: " ",
        action_lowercase: false,
        now_expr: "now()",
        quote: QuoteStyle::Sql,
    },
};

/// Plain value-object records: only field types and default rendering apply
pub const RECORD: DialectProfile = DialectProfile {
    dialect: Dialect::Record,
    types: TypeProfile {
        families: DECL_FAMILIES,
        overrides: DECL_OVERRIDES,
        field_types: RUST_FIELD_TYPES,
        extensions: RUST_EXTENSIONS,
        no_parens: &[],
        call_parens: false,
        array_template: "{inner}[]",
        enum_template: "{name}",
    },
    clauses: ClauseProfile {
        autoincrement: None,
        reference: None,
        on_delete: None,
        on_update: None,
        not_null: None,
        default: None,
        default_fn: None,
        primary_key: None,
        unique: None,
        separator: ", ",
        action_lowercase: true,
        now_expr: "Utc::now().naive_utc()",
        quote: QuoteStyle::Rust,
    },
};

/// serde + schemars validation models: like record, with serde attributes
/// assembled by the generator itself
pub const VALIDATOR: DialectProfile = DialectProfile {
    dialect: Dialect::Validator,
    types: RECORD.types,
    clauses: RECORD.clauses,
};

impl DialectProfile {
    /// Profile for a built-in dialect; `None` for openapi, which renders a
    /// JSON document rather than column declarations.
    #[must_use]
    pub fn for_dialect(dialect: Dialect) -> Option<&'static DialectProfile> {
        match dialect {
            Dialect::Orm => Some(&ORM),
            Dialect::Record => Some(&RECORD),
            Dialect::Validator => Some(&VALIDATOR),
            Dialect::Sql => Some(&SQL),
            Dialect::OpenApi => None,
        }
    }
}
