use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constraints::{ForeignKeyDefinition, IndexDefinition};
use crate::types::DbType;

/// Dialect-neutral description of a table and the objects it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableDefinition {
    pub name: String,
    /// Owning schema; dialects without schemas ignore it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    pub columns: Vec<ColumnDefinition>,
    #[serde(default)]
    pub indexes: Vec<IndexDefinition>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDefinition>,
    /// Primary key constraint name; defaults to `PK_<table>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key_name: Option<String>,
    /// Overrides the dialect's default primary key clustering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key_clustered: Option<bool>,
}

/// Column metadata for a table definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnDefinition {
    pub ordinal_position: u16,
    pub name: String,
    pub db_type: DbType,
    pub is_nullable: bool,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_identity: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
}

/// Column default, rendered per dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    /// Raw SQL expression emitted verbatim, e.g. `0`.
    Expression(String),
    /// String literal; quoted and escaped by the dialect.
    Text(String),
    Method(SystemMethod),
}

/// Server-side functions usable as column defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SystemMethod {
    CurrentDateTime,
    CurrentUtcDateTime,
    NewGuid,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_name: None,
            columns: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
            primary_key_name: None,
            primary_key_clustered: None,
        }
    }

    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema_name = Some(schema.into());
        self
    }

    /// Append a column, assigning the next ordinal position.
    pub fn with_column(mut self, mut column: ColumnDefinition) -> Self {
        column.ordinal_position = self.next_ordinal();
        self.columns.push(column);
        self
    }

    pub fn with_index(mut self, index: IndexDefinition) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn with_foreign_key(mut self, foreign_key: ForeignKeyDefinition) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Primary key constraint name, falling back to `PK_<table>`.
    pub fn effective_primary_key_name(&self) -> String {
        match &self.primary_key_name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("PK_{}", self.name),
        }
    }

    /// Columns flagged as primary key, in ordinal order.
    pub fn primary_key_columns(&self) -> Vec<&ColumnDefinition> {
        let mut columns: Vec<&ColumnDefinition> = self
            .columns
            .iter()
            .filter(|column| column.is_primary_key)
            .collect();
        columns.sort_by_key(|column| column.ordinal_position);
        columns
    }

    fn next_ordinal(&self) -> u16 {
        self.columns
            .iter()
            .map(|column| column.ordinal_position)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }
}

impl ColumnDefinition {
    /// Nullable column at ordinal position 0; `TableDefinition::with_column`
    /// assigns the real position.
    pub fn new(name: impl Into<String>, db_type: DbType) -> Self {
        Self {
            ordinal_position: 0,
            name: name.into(),
            db_type,
            is_nullable: true,
            is_primary_key: false,
            is_identity: false,
            default_value: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.is_nullable = false;
        self
    }

    /// Marks the column as part of the primary key; implies `NOT NULL`.
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.is_nullable = false;
        self
    }

    /// Marks the column as `IDENTITY(1,1)`; implies `NOT NULL`.
    pub fn identity(mut self) -> Self {
        self.is_identity = true;
        self.is_nullable = false;
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default_value = Some(default);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_column_assigns_ordinals() {
        let table = TableDefinition::new("umbracoNode")
            .with_column(ColumnDefinition::new("id", DbType::Integer).primary_key())
            .with_column(ColumnDefinition::new("text", DbType::string(255)));

        let ordinals: Vec<u16> = table.columns.iter().map(|c| c.ordinal_position).collect();
        assert_eq!(ordinals, vec![1, 2]);
        assert!(!table.columns[0].is_nullable);
        assert!(table.columns[1].is_nullable);
    }

    #[test]
    fn identity_implies_not_null() {
        let column = ColumnDefinition::new("id", DbType::Integer).identity();
        assert!(column.is_identity);
        assert!(!column.is_nullable);
    }

    #[test]
    fn primary_key_columns_follow_ordinal_order() {
        let mut table = TableDefinition::new("cmsMember2MemberGroup");
        table.columns = vec![
            ColumnDefinition {
                ordinal_position: 2,
                ..ColumnDefinition::new("MemberGroup", DbType::Integer).primary_key()
            },
            ColumnDefinition {
                ordinal_position: 1,
                ..ColumnDefinition::new("Member", DbType::Integer).primary_key()
            },
            ColumnDefinition {
                ordinal_position: 3,
                ..ColumnDefinition::new("Note", DbType::Text)
            },
        ];

        let names: Vec<&str> = table
            .primary_key_columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Member", "MemberGroup"]);
    }
}
