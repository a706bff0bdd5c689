//! Shared type definitions for tablesmith
//!
//! This crate provides the common types used across the tablesmith crates:
//!
//! - [`Dialect`] - Target output dialect enum (orm, record, validator, sql, openapi)
//! - [`TypeFamily`] - Source type classification used by type resolution
//! - Normalized schema entities in the [`model`] module

mod dialect;
mod family;
pub mod model;

pub use dialect::{Dialect, DialectParseError};
pub use family::TypeFamily;
pub use model::{
    AlterColumn, Check, Column, EnumKind, EnumMember, EnumType, Index, Reference, Schema, Size,
    Table,
};

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::Dialect;
    pub use crate::TypeFamily;
    pub use crate::model::{Column, EnumType, Schema, Table};
}
