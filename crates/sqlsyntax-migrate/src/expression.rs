use sqlsyntax_core::{Error, IndexDefinition, Result};
use sqlsyntax_dialect::{SyntaxContext, SyntaxProvider};
use tracing::{debug, warn};

/// A pending `CREATE INDEX` migration step.
///
/// The expression is filled in by a [`CreateIndexBuilder`](crate::CreateIndexBuilder)
/// and rendered once complete. Rendering never mutates the expression, so the
/// same expression can be rendered for several dialects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateIndexExpression {
    pub index: IndexDefinition,
}

impl CreateIndexExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            index: IndexDefinition {
                name: name.into(),
                ..IndexDefinition::default()
            },
        }
    }

    /// True once a table and at least one column have been chosen.
    pub fn is_complete(&self) -> bool {
        self.missing().is_none()
    }

    /// Render through the provider active on the current thread.
    pub fn render(&self) -> Result<String> {
        self.check_complete()?;
        let provider = SyntaxContext::current()?;
        self.render_with(provider.as_ref())
    }

    /// Render through `provider`, ignoring the active one.
    pub fn render_with(&self, provider: &dyn SyntaxProvider) -> Result<String> {
        self.check_complete()?;
        let sql = provider.format_index(&self.index)?;
        debug!(
            dialect = %provider.dialect(),
            index = %self.index.effective_name(),
            "rendered create index expression"
        );
        Ok(sql)
    }

    fn missing(&self) -> Option<&'static str> {
        if self.index.table_name.trim().is_empty() {
            Some("no table selected")
        } else if self.index.columns.is_empty() {
            Some("no column selected")
        } else {
            None
        }
    }

    fn check_complete(&self) -> Result<()> {
        match self.missing() {
            None => Ok(()),
            Some(reason) => {
                let name = if self.index.name.is_empty() {
                    "<unnamed>"
                } else {
                    self.index.name.as_str()
                };
                warn!(index = %name, reason, "incomplete create index expression");
                Err(Error::IncompleteIndex(format!("{name}: {reason}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlsyntax_core::IndexColumn;
    use sqlsyntax_dialect::SqlServerSyntax;

    #[test]
    fn missing_table_is_reported_first() {
        let expression = CreateIndexExpression::named("IX_A");
        assert!(!expression.is_complete());
        assert_eq!(
            expression.render_with(&SqlServerSyntax::default()),
            Err(Error::IncompleteIndex("IX_A: no table selected".to_string()))
        );
    }

    #[test]
    fn missing_column_is_reported() {
        let mut expression = CreateIndexExpression::new();
        expression.index.table_name = "TheTable".to_string();
        assert_eq!(
            expression.render_with(&SqlServerSyntax::default()),
            Err(Error::IncompleteIndex(
                "<unnamed>: no column selected".to_string()
            ))
        );
    }

    #[test]
    fn unnamed_index_renders_with_default_name() {
        let mut expression = CreateIndexExpression::new();
        expression.index.table_name = "TheTable".to_string();
        expression.index.columns.push(IndexColumn::new("A"));

        assert!(expression.is_complete());
        assert_eq!(
            expression.render_with(&SqlServerSyntax::default()),
            Ok("CREATE NONCLUSTERED INDEX [IX_TheTable_A] ON [TheTable] ([A])".to_string())
        );
    }
}
