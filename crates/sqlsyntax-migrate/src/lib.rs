//! Migration expressions built on the sqlsyntax providers.
//!
//! A [`CreateIndexExpression`] is filled in through [`CreateIndexBuilder`] and
//! rendered with the active provider or an explicit one.

pub mod builder;
pub mod expression;

pub use builder::{
    CreateIndexBuilder, IndexColumnSelected, IndexDirectionSet, IndexOptions, IndexTableSelected,
};
pub use expression::CreateIndexExpression;
