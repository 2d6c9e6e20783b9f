//! Fluent builder for [`CreateIndexExpression`].
//!
//! Each stage is its own type, so only the calls that make sense at that
//! point are available:
//!
//! ```text
//! CreateIndexBuilder   -- on_table     --> IndexTableSelected
//! IndexTableSelected   -- on_column    --> IndexColumnSelected
//! IndexColumnSelected  -- ascending    --> IndexDirectionSet
//!                      -- descending   --> IndexDirectionSet
//! IndexDirectionSet    -- on_column    --> IndexColumnSelected
//!                      -- with_options --> IndexOptions
//! ```
//!
//! Every call writes straight into the borrowed expression; the stage values
//! themselves carry no state and may be dropped at any point.

use sqlsyntax_core::{IndexColumn, IndexType, SortDirection};

use crate::expression::CreateIndexExpression;

/// Entry stage: name the index and choose its table.
#[derive(Debug)]
pub struct CreateIndexBuilder<'a> {
    expression: &'a mut CreateIndexExpression,
}

impl<'a> CreateIndexBuilder<'a> {
    pub fn new(expression: &'a mut CreateIndexExpression) -> Self {
        Self { expression }
    }

    pub fn named(self, name: impl Into<String>) -> Self {
        self.expression.index.name = name.into();
        self
    }

    pub fn on_table(self, table: impl Into<String>) -> IndexTableSelected<'a> {
        self.expression.index.table_name = table.into();
        IndexTableSelected {
            expression: self.expression,
        }
    }
}

#[derive(Debug)]
pub struct IndexTableSelected<'a> {
    expression: &'a mut CreateIndexExpression,
}

impl<'a> IndexTableSelected<'a> {
    pub fn in_schema(self, schema: impl Into<String>) -> Self {
        self.expression.index.schema_name = Some(schema.into());
        self
    }

    pub fn on_column(self, column: impl Into<String>) -> IndexColumnSelected<'a> {
        push_column(self.expression, column.into())
    }
}

/// A column was just added; pick its sort order.
#[derive(Debug)]
pub struct IndexColumnSelected<'a> {
    expression: &'a mut CreateIndexExpression,
}

impl<'a> IndexColumnSelected<'a> {
    pub fn ascending(self) -> IndexDirectionSet<'a> {
        self.direction(SortDirection::Ascending)
    }

    pub fn descending(self) -> IndexDirectionSet<'a> {
        self.direction(SortDirection::Descending)
    }

    fn direction(self, direction: SortDirection) -> IndexDirectionSet<'a> {
        if let Some(column) = self.expression.index.columns.last_mut() {
            column.direction = direction;
        }
        IndexDirectionSet {
            expression: self.expression,
        }
    }
}

#[derive(Debug)]
pub struct IndexDirectionSet<'a> {
    expression: &'a mut CreateIndexExpression,
}

impl<'a> IndexDirectionSet<'a> {
    /// Add another key column.
    pub fn on_column(self, column: impl Into<String>) -> IndexColumnSelected<'a> {
        push_column(self.expression, column.into())
    }

    pub fn with_options(self) -> IndexOptions<'a> {
        IndexOptions {
            expression: self.expression,
        }
    }
}

/// Uniqueness and clustering. Calls may be combined in any order.
#[derive(Debug)]
pub struct IndexOptions<'a> {
    expression: &'a mut CreateIndexExpression,
}

impl IndexOptions<'_> {
    pub fn unique(self) -> Self {
        self.expression.index.is_unique = true;
        self
    }

    pub fn clustered(self) -> Self {
        self.expression.index.index_type = Some(IndexType::Clustered);
        self.expression.index.is_clustered = Some(true);
        self
    }

    pub fn non_clustered(self) -> Self {
        self.expression.index.index_type = Some(IndexType::NonClustered);
        self.expression.index.is_clustered = Some(false);
        self
    }
}

fn push_column(expression: &mut CreateIndexExpression, name: String) -> IndexColumnSelected<'_> {
    expression.index.columns.push(IndexColumn::new(name));
    IndexColumnSelected { expression }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlsyntax_core::IndexDefinition;

    #[test]
    fn builder_fills_the_expression() {
        let mut expression = CreateIndexExpression::new();
        CreateIndexBuilder::new(&mut expression)
            .named("IX_cmsDocument_published")
            .on_table("cmsDocument")
            .in_schema("dbo")
            .on_column("nodeId")
            .ascending()
            .on_column("published")
            .descending()
            .with_options()
            .unique()
            .non_clustered();

        assert_eq!(
            expression.index,
            IndexDefinition {
                name: "IX_cmsDocument_published".to_string(),
                table_name: "cmsDocument".to_string(),
                schema_name: Some("dbo".to_string()),
                columns: vec![
                    IndexColumn::new("nodeId"),
                    IndexColumn {
                        name: "published".to_string(),
                        direction: SortDirection::Descending,
                    },
                ],
                is_unique: true,
                is_clustered: Some(false),
                index_type: Some(IndexType::NonClustered),
            }
        );
    }

    #[test]
    fn last_clustering_call_wins() {
        let mut expression = CreateIndexExpression::named("IX_A");
        CreateIndexBuilder::new(&mut expression)
            .on_table("TheTable")
            .on_column("A")
            .ascending()
            .with_options()
            .non_clustered()
            .clustered();

        assert_eq!(expression.index.index_type, Some(IndexType::Clustered));
        assert_eq!(expression.index.is_clustered, Some(true));
    }
}
