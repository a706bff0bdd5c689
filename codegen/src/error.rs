//! Error types for the generation pipeline

use thiserror::Error;

/// Pipeline errors
///
/// Unknown column types are deliberately not represented here: type
/// resolution substitutes a deterministic placeholder instead of failing,
/// so one bad column cannot abort an otherwise valid document.
#[derive(Debug, Error)]
pub enum Error {
    /// Neither a literal schema document nor a path to one was supplied
    #[error(
        "you need to provide one of: a literal parsed-schema document, or a path to a file that contains one"
    )]
    MissingInput,

    /// The parser produced no tables and no enum types
    #[error("no tables or enum types were found in the parsed schema")]
    NoEntities,

    /// The raw descriptors are internally inconsistent
    #[error("invalid schema: {0}")]
    Normalize(String),

    /// The schema document is not valid JSON
    #[error("failed to parse schema document: {0}")]
    Parse(#[from] serde_json::Error),

    /// No generator is registered under the requested name
    #[error("unsupported dialect `{0}`, see `Registry::names` for the available generators")]
    UnknownDialect(String),

    /// Generator registration was rejected
    #[error("generator registration failed: {0}")]
    Registry(String),

    /// I/O error while reading a schema document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
