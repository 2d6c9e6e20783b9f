//! Core contracts for sqlsyntax.
//!
//! This crate defines the dialect-neutral table, column, index and foreign
//! key definitions consumed by the syntax providers, together with the shared
//! error type and structural validation.

pub mod constraints;
pub mod error;
pub mod json_schema;
pub mod table;
pub mod types;
pub mod validation;

pub use constraints::{
    FkAction, ForeignKeyDefinition, IndexColumn, IndexDefinition, IndexType, SortDirection,
};
pub use error::{Error, Result};
pub use json_schema::definition_json_schema;
pub use table::{ColumnDefinition, DefaultValue, SystemMethod, TableDefinition};
pub use types::{DEFAULT_DECIMAL_PRECISION, DbType, MAX_DECIMAL_PRECISION, TypeKind};
pub use validation::{validate_foreign_key, validate_index, validate_table};
