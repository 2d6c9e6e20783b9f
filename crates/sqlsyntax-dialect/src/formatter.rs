use std::sync::Arc;

use sqlsyntax_core::{Error, ForeignKeyDefinition, IndexDefinition, Result, TableDefinition};
use tracing::debug;

use crate::context::SyntaxContext;
use crate::provider::SyntaxProvider;

/// Table-level DDL façade over a syntax provider.
///
/// An [`active`](DdlFormatter::active) formatter resolves the provider from
/// [`SyntaxContext`] on every call, so swapping the active provider between
/// calls switches dialects. A formatter built with
/// [`with_provider`](DdlFormatter::with_provider) ignores the context.
#[derive(Debug, Clone, Default)]
pub struct DdlFormatter {
    provider: Option<Arc<dyn SyntaxProvider>>,
}

impl DdlFormatter {
    pub fn active() -> Self {
        Self { provider: None }
    }

    pub fn with_provider(provider: Arc<dyn SyntaxProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn provider(&self) -> Result<Arc<dyn SyntaxProvider>> {
        match &self.provider {
            Some(provider) => Ok(Arc::clone(provider)),
            None => SyntaxContext::current(),
        }
    }

    pub fn format_table(&self, table: &TableDefinition) -> Result<String> {
        self.provider()?.format_create_table(table)
    }

    /// Empty string when the table has no primary key columns.
    pub fn format_primary_key(&self, table: &TableDefinition) -> Result<String> {
        self.provider()?.format_primary_key(table)
    }

    pub fn format_index(&self, index: &IndexDefinition) -> Result<String> {
        self.provider()?.format_index(index)
    }

    pub fn format_indexes(&self, indexes: &[IndexDefinition]) -> Result<Vec<String>> {
        self.provider()?.format_indexes(indexes)
    }

    pub fn format_foreign_keys(&self, foreign_keys: &[ForeignKeyDefinition]) -> Result<Vec<String>> {
        self.provider()?.format_foreign_keys(foreign_keys)
    }

    /// Every statement needed to create `table`: the table, its primary key
    /// (when present), its foreign keys, then its indexes.
    ///
    /// Fails when the primary key and indexes together would create more than
    /// one clustered index.
    pub fn format_script(&self, table: &TableDefinition) -> Result<Vec<String>> {
        let provider = self.provider()?;
        check_single_clustered(provider.as_ref(), table)?;

        let mut statements = vec![provider.format_create_table(table)?];
        let primary_key = provider.format_primary_key(table)?;
        if !primary_key.is_empty() {
            statements.push(primary_key);
        }
        statements.extend(provider.format_foreign_keys(&table.foreign_keys)?);
        statements.extend(provider.format_indexes(&table.indexes)?);

        debug!(
            dialect = %provider.dialect(),
            table = %table.name,
            statements = statements.len(),
            "formatted table script"
        );
        Ok(statements)
    }
}

const CLUSTERED: &str = "CLUSTERED";

fn check_single_clustered(provider: &dyn SyntaxProvider, table: &TableDefinition) -> Result<()> {
    let mut clustered = Vec::new();
    if !table.primary_key_columns().is_empty()
        && provider.primary_key_directive(table) == Some(CLUSTERED)
    {
        clustered.push(table.effective_primary_key_name());
    }
    clustered.extend(
        table
            .indexes
            .iter()
            .filter(|index| provider.index_directive(index) == Some(CLUSTERED))
            .map(IndexDefinition::effective_name),
    );

    if clustered.len() > 1 {
        return Err(Error::Validation(format!(
            "table {} has more than one clustered index: {}",
            table.name,
            clustered.join(", ")
        )));
    }
    Ok(())
}
