//! Dialect-specific DDL rendering for sqlsyntax.
//!
//! A [`SyntaxProvider`] turns the definitions from `sqlsyntax-core` into DDL
//! text for one backend. [`DdlFormatter`] is the table-level façade, and
//! [`SyntaxContext`] holds the provider selected for the current thread.

pub mod context;
pub mod errors;
pub mod formatter;
pub mod options;
pub mod provider;
pub mod sqlce;
pub mod sqlserver;
pub mod type_map;

pub use context::{ProviderGuard, SyntaxContext};
pub use errors::OptionsError;
pub use formatter::DdlFormatter;
pub use options::{DEFAULT_STRING_LENGTH, QuoteIdentifiers, SyntaxOptions};
pub use provider::{Dialect, SyntaxProvider, bracket_quote, is_plain_identifier};
pub use sqlce::SqlCeSyntax;
pub use sqlserver::SqlServerSyntax;
pub use type_map::{TypeMap, TypeMapping};

pub use sqlsyntax_core::{Error, Result};
