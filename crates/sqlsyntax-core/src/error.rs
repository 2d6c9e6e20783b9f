use thiserror::Error;

/// Core error type shared across sqlsyntax crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The definition is structurally invalid (missing names, no columns, ...).
    #[error("invalid definition: {0}")]
    Validation(String),
    /// The semantic type has no native mapping in the dialect's type table.
    #[error("unsupported type '{db_type}' for dialect {dialect}")]
    UnsupportedType { dialect: String, db_type: String },
    /// The dialect cannot express the requested feature.
    #[error("unsupported by {dialect}: {feature}")]
    Unsupported { dialect: String, feature: String },
    /// An index expression was rendered before a table and column were chosen.
    #[error("incomplete index: {0}")]
    IncompleteIndex(String),
    /// A formatting call ran while no syntax provider was active.
    #[error("no active syntax provider")]
    NoActiveProvider,
}

/// Convenience alias for results returned by sqlsyntax crates.
pub type Result<T> = std::result::Result<T, Error>;
