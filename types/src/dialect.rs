//! Unified output dialect enum
//!
//! This module provides a single source of truth for target dialect
//! identification, shared by the generator registry, the CLI, and the
//! per-dialect profiles.

use serde::{Deserialize, Serialize};

/// Target output dialect for generated model source
///
/// Each dialect emits a different source representation of the same
/// normalized schema: declarative ORM model structs, plain value records,
/// validation models, flat `CREATE TABLE` statements, or an OpenAPI 3
/// document.
///
/// # Examples
///
/// ```
/// use tablesmith_types::Dialect;
///
/// let dialect = Dialect::Orm;
/// assert!(dialect.emits_rust());
///
/// let sql = Dialect::Sql;
/// assert!(!sql.emits_rust());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Declarative ORM model structs with attribute-macro column metadata
    #[default]
    Orm,

    /// Plain value-object record structs
    Record,

    /// serde + schemars validation models
    Validator,

    /// Flat `CREATE TABLE` statements
    Sql,

    /// OpenAPI 3 components/schemas document
    OpenApi,
}

impl Dialect {
    /// All built-in dialects, in registry order
    pub const ALL: [Dialect; 5] = [
        Dialect::Orm,
        Dialect::Record,
        Dialect::Validator,
        Dialect::Sql,
        Dialect::OpenApi,
    ];

    /// Returns `true` if this dialect emits Rust source (as opposed to SQL or JSON)
    #[inline]
    #[must_use]
    pub const fn emits_rust(&self) -> bool {
        matches!(self, Dialect::Orm | Dialect::Record | Dialect::Validator)
    }

    /// Parse a dialect from a string (case-insensitive)
    ///
    /// Supports the legacy generator names alongside the canonical ones:
    /// - orm: `"orm"`, `"sqlalchemy"`, `"gino"`
    /// - record: `"record"`, `"dataclass"`
    /// - validator: `"validator"`, `"pydantic"`
    /// - sql: `"sql"`, `"sqlalchemy_core"`, `"ddl"`
    /// - openapi: `"openapi"`, `"openapi3"`
    ///
    /// # Examples
    ///
    /// ```
    /// use tablesmith_types::Dialect;
    ///
    /// assert_eq!(Dialect::parse("orm"), Some(Dialect::Orm));
    /// assert_eq!(Dialect::parse("pydantic"), Some(Dialect::Validator));
    /// assert_eq!(Dialect::parse("unknown"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("orm")
            || s.eq_ignore_ascii_case("sqlalchemy")
            || s.eq_ignore_ascii_case("gino")
        {
            Some(Dialect::Orm)
        } else if s.eq_ignore_ascii_case("record") || s.eq_ignore_ascii_case("dataclass") {
            Some(Dialect::Record)
        } else if s.eq_ignore_ascii_case("validator") || s.eq_ignore_ascii_case("pydantic") {
            Some(Dialect::Validator)
        } else if s.eq_ignore_ascii_case("sql")
            || s.eq_ignore_ascii_case("sqlalchemy_core")
            || s.eq_ignore_ascii_case("ddl")
        {
            Some(Dialect::Sql)
        } else if s.eq_ignore_ascii_case("openapi") || s.eq_ignore_ascii_case("openapi3") {
            Some(Dialect::OpenApi)
        } else {
            None
        }
    }

    /// Get the dialect name as a lowercase string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Dialect::Orm => "orm",
            Dialect::Record => "record",
            Dialect::Validator => "validator",
            Dialect::Sql => "sql",
            Dialect::OpenApi => "openapi",
        }
    }

    /// One-line description used by CLI listings
    #[must_use]
    pub const fn summary(&self) -> &'static str {
        match self {
            Dialect::Orm => "declarative ORM model structs",
            Dialect::Record => "plain value-object records",
            Dialect::Validator => "serde + schemars validation models",
            Dialect::Sql => "flat CREATE TABLE statements",
            Dialect::OpenApi => "OpenAPI 3 schema document",
        }
    }
}

impl core::fmt::Display for Dialect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Dialect {
    type Err = DialectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::parse(s).ok_or(DialectParseError)
    }
}

/// Error returned when parsing an unknown dialect string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectParseError;

impl core::fmt::Display for DialectParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("unknown dialect")
    }
}

impl std::error::Error for DialectParseError {}
