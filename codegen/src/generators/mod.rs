//! Built-in dialect generators

use tablesmith_types::{Dialect, TypeFamily};

use crate::assemble::is_now_call;
use crate::registry::DialectGenerator;
use crate::resolver::ResolvedType;

mod openapi;
mod orm;
mod record;
mod sql;
mod validator;

pub use openapi::OpenApiGenerator;
pub use orm::OrmGenerator;
pub use record::RecordGenerator;
pub use sql::SqlGenerator;
pub use validator::ValidatorGenerator;

/// Fresh instance of a built-in generator
#[must_use]
pub fn builtin(dialect: Dialect) -> Box<dyn DialectGenerator> {
    match dialect {
        Dialect::Orm => Box::new(OrmGenerator),
        Dialect::Record => Box::new(RecordGenerator),
        Dialect::Validator => Box::new(ValidatorGenerator),
        Dialect::Sql => Box::new(SqlGenerator),
        Dialect::OpenApi => Box::new(OpenApiGenerator),
    }
}

/// A default expression for generated Rust source
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RustDefault {
    /// The current-time expression
    Now,
    /// A literal Rust expression
    Expr(String),
}

/// Render a raw default as a Rust expression for the record and validator
/// dialects. Families without a safe literal representation yield `None`
/// and the column is treated as having no default.
pub(crate) fn rust_default_expr(raw: &str, resolved: &ResolvedType) -> Option<RustDefault> {
    let trimmed = raw.trim();
    if resolved.is_temporal() {
        return is_now_call(trimmed).then_some(RustDefault::Now);
    }
    if resolved.array || resolved.custom {
        return None;
    }
    match resolved.family {
        TypeFamily::String | TypeFamily::Text | TypeFamily::Unknown => {
            let inner = trimmed
                .strip_prefix('\'')
                .and_then(|s| s.strip_suffix('\''))
                .unwrap_or(trimmed);
            Some(RustDefault::Expr(format!("{inner:?}.to_string()")))
        }
        TypeFamily::Integer | TypeFamily::BigInteger => trimmed
            .parse::<i64>()
            .ok()
            .map(|v| RustDefault::Expr(v.to_string())),
        TypeFamily::Float => trimmed
            .parse::<f64>()
            .ok()
            .map(|v| RustDefault::Expr(format!("{v:?}"))),
        TypeFamily::Boolean => match trimmed.to_lowercase().as_str() {
            "true" | "1" => Some(RustDefault::Expr("true".into())),
            "false" | "0" => Some(RustDefault::Expr("false".into())),
            _ => None,
        },
        _ => None,
    }
}
