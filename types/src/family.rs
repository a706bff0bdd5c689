//! Source type classification
//!
//! Maps raw SQL type tokens onto a small set of type families so that
//! synonyms (`int`, `int4`, `integer`) resolve identically across every
//! dialect. Per-dialect output text is looked up by family, with a short
//! per-dialect override table for tokens that keep their own spelling.

/// Family of a source column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeFamily {
    /// Bounded character types (`varchar`, `char`, ...)
    String,
    /// Unbounded character types (`text`)
    Text,
    /// Binary blobs (`bytea`, `blob`, ...)
    Binary,
    /// JSON documents (`json`, `jsonb`)
    Json,
    /// 32-bit-ish integers, including `serial`
    Integer,
    /// 64-bit integers, including `bigserial`
    BigInteger,
    /// Binary floating point
    Float,
    /// Fixed-point numerics (`decimal`, `numeric`, `money`, ...)
    Numeric,
    Boolean,
    /// Timestamps with or without zone
    DateTime,
    Date,
    Time,
    Uuid,
    /// Anything the classifier does not recognize
    Unknown,
}

const STRING_TYPES: &[&str] = &[
    "str",
    "varchar",
    "character",
    "character varying",
    "varying",
    "char",
    "string",
];

const TEXT_TYPES: &[&str] = &["text", "tinytext", "mediumtext", "longtext", "clob"];

const BINARY_TYPES: &[&str] = &[
    "binary",
    "varbinary",
    "tinyblob",
    "blob",
    "mediumblob",
    "longblob",
    "bytea",
];

const JSON_TYPES: &[&str] = &["json", "jsonb"];

const INTEGER_TYPES: &[&str] = &[
    "integer",
    "int",
    "int2",
    "int4",
    "serial",
    "smallserial",
    "smallint",
    "tinyint",
    "mediumint",
];

const BIG_INTEGER_TYPES: &[&str] = &["bigint", "bigserial", "int8"];

const FLOAT_TYPES: &[&str] = &["float", "real", "float4", "float8"];

const NUMERIC_TYPES: &[&str] = &["decimal", "numeric", "double", "double precision", "money"];

const BOOLEAN_TYPES: &[&str] = &["boolean", "bool"];

const DATETIME_TYPES: &[&str] = &[
    "timestamp",
    "timestamptz",
    "timestamp with time zone",
    "timestamp without time zone",
    "datetime",
];

const DATE_TYPES: &[&str] = &["date"];

const TIME_TYPES: &[&str] = &["time", "timetz"];

const UUID_TYPES: &[&str] = &["uuid"];

impl TypeFamily {
    /// Classify a cleaned, lower-cased type token.
    ///
    /// The token is expected to already be stripped of schema qualifiers,
    /// size parameters and array suffixes.
    #[must_use]
    pub fn classify(token: &str) -> TypeFamily {
        let groups: &[(&[&str], TypeFamily)] = &[
            (STRING_TYPES, TypeFamily::String),
            (TEXT_TYPES, TypeFamily::Text),
            (BINARY_TYPES, TypeFamily::Binary),
            (JSON_TYPES, TypeFamily::Json),
            (INTEGER_TYPES, TypeFamily::Integer),
            (BIG_INTEGER_TYPES, TypeFamily::BigInteger),
            (FLOAT_TYPES, TypeFamily::Float),
            (NUMERIC_TYPES, TypeFamily::Numeric),
            (BOOLEAN_TYPES, TypeFamily::Boolean),
            (DATETIME_TYPES, TypeFamily::DateTime),
            (DATE_TYPES, TypeFamily::Date),
            (TIME_TYPES, TypeFamily::Time),
            (UUID_TYPES, TypeFamily::Uuid),
        ];

        for (tokens, family) in groups {
            if tokens.contains(&token) {
                return *family;
            }
        }
        TypeFamily::Unknown
    }

    /// Whether the token names an auto-incrementing integer pseudo-type
    #[must_use]
    pub fn is_auto_increment(token: &str) -> bool {
        matches!(token, "serial" | "smallserial" | "bigserial")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_synonyms() {
        assert_eq!(TypeFamily::classify("int"), TypeFamily::Integer);
        assert_eq!(TypeFamily::classify("int4"), TypeFamily::Integer);
        assert_eq!(TypeFamily::classify("integer"), TypeFamily::Integer);
        assert_eq!(TypeFamily::classify("serial"), TypeFamily::Integer);

        assert_eq!(TypeFamily::classify("varchar"), TypeFamily::String);
        assert_eq!(
            TypeFamily::classify("character varying"),
            TypeFamily::String
        );

        assert_eq!(TypeFamily::classify("bigserial"), TypeFamily::BigInteger);
        assert_eq!(TypeFamily::classify("timestamptz"), TypeFamily::DateTime);
        assert_eq!(TypeFamily::classify("uuid"), TypeFamily::Uuid);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(TypeFamily::classify("geometry"), TypeFamily::Unknown);
        assert_eq!(TypeFamily::classify(""), TypeFamily::Unknown);
    }

    #[test]
    fn test_auto_increment() {
        assert!(TypeFamily::is_auto_increment("serial"));
        assert!(TypeFamily::is_auto_increment("bigserial"));
        assert!(!TypeFamily::is_auto_increment("integer"));
    }
}
