use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sort order of an index key column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Explicit physical layout requested for an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IndexType {
    Clustered,
    NonClustered,
}

/// Key column of an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IndexColumn {
    pub name: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl IndexColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: SortDirection::Ascending,
        }
    }
}

/// Index definition.
///
/// Clustering can be requested two ways, through `index_type` or the
/// `is_clustered` flag. Leaving both unset selects the dialect default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IndexDefinition {
    /// Index name; defaults to `IX_<table>_<first column>` when empty.
    #[serde(default)]
    pub name: String,
    pub table_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    pub columns: Vec<IndexColumn>,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_clustered: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_type: Option<IndexType>,
}

impl IndexDefinition {
    pub fn new(name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            ..Self::default()
        }
    }

    /// Append an ascending key column.
    pub fn with_column(self, name: impl Into<String>) -> Self {
        self.with_sorted_column(name, SortDirection::Ascending)
    }

    pub fn with_sorted_column(mut self, name: impl Into<String>, direction: SortDirection) -> Self {
        self.columns.push(IndexColumn {
            direction,
            ..IndexColumn::new(name)
        });
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// Name used in DDL, falling back to `IX_<table>_<first column>`.
    pub fn effective_name(&self) -> String {
        if !self.name.trim().is_empty() {
            return self.name.clone();
        }
        match self.columns.first() {
            Some(column) => format!("IX_{}_{}", self.table_name, column.name),
            None => format!("IX_{}", self.table_name),
        }
    }
}

/// Referential action for `ON DELETE` / `ON UPDATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FkAction {
    NoAction,
    Cascade,
    SetNull,
    SetDefault,
}

impl FkAction {
    pub fn as_sql(self) -> &'static str {
        match self {
            FkAction::NoAction => "NO ACTION",
            FkAction::Cascade => "CASCADE",
            FkAction::SetNull => "SET NULL",
            FkAction::SetDefault => "SET DEFAULT",
        }
    }
}

/// Foreign key definition preserving column ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ForeignKeyDefinition {
    /// Constraint name; defaults to `FK_<table>_<referenced table>_<referenced column>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    pub table_name: String,
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_schema: Option<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
    /// `None` omits the clause and leaves the server default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<FkAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<FkAction>,
}

impl ForeignKeyDefinition {
    /// Single-column foreign key from `table.column` to `referenced_table.referenced_column`.
    pub fn new(
        table_name: impl Into<String>,
        column: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        Self {
            name: None,
            schema_name: None,
            table_name: table_name.into(),
            columns: vec![column.into()],
            referenced_schema: None,
            referenced_table: referenced_table.into(),
            referenced_columns: vec![referenced_column.into()],
            on_delete: None,
            on_update: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn on_delete(mut self, action: FkAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    pub fn on_update(mut self, action: FkAction) -> Self {
        self.on_update = Some(action);
        self
    }

    pub fn effective_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => {
                let column = self
                    .referenced_columns
                    .first()
                    .map(String::as_str)
                    .unwrap_or_default();
                format!(
                    "FK_{}_{}_{}",
                    self.table_name, self.referenced_table, column
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_name_defaults_to_table_and_first_column() {
        let index = IndexDefinition::new("", "umbracoNode")
            .with_column("parentID")
            .with_column("sortOrder");
        assert_eq!(index.effective_name(), "IX_umbracoNode_parentID");

        let named = IndexDefinition::new("IX_A", "TheTable").with_column("A");
        assert_eq!(named.effective_name(), "IX_A");
    }

    #[test]
    fn foreign_key_name_defaults_to_tables_and_referenced_column() {
        let fk = ForeignKeyDefinition::new("umbracoNode", "parentID", "umbracoNode", "id");
        assert_eq!(fk.effective_name(), "FK_umbracoNode_umbracoNode_id");

        let named = fk.named("FK_parent");
        assert_eq!(named.effective_name(), "FK_parent");
    }
}
