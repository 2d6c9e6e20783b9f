use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlsyntax_core::{
    ColumnDefinition, DefaultValue, Error, ForeignKeyDefinition, IndexDefinition, Result,
    SortDirection, SystemMethod, TableDefinition, validate_foreign_key, validate_index,
    validate_table,
};
use tracing::debug;

use crate::options::{QuoteIdentifiers, SyntaxOptions};
use crate::sqlce::SqlCeSyntax;
use crate::sqlserver::SqlServerSyntax;
use crate::type_map::TypeMap;

/// Database backends with a syntax provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    SqlServer,
    SqlCe,
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::SqlServer => "SqlServer",
            Dialect::SqlCe => "SqlCe",
        }
    }

    /// Shared provider configured with default options.
    pub fn provider(self) -> Arc<dyn SyntaxProvider> {
        match self {
            Dialect::SqlServer => SqlServerSyntax::provider(),
            Dialect::SqlCe => SqlCeSyntax::provider(),
        }
    }

    /// Provider configured with `options`.
    pub fn provider_with(self, options: SyntaxOptions) -> Arc<dyn SyntaxProvider> {
        match self {
            Dialect::SqlServer => Arc::new(SqlServerSyntax::new(options)),
            Dialect::SqlCe => Arc::new(SqlCeSyntax::new(options)),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlserver" | "sql_server" | "mssql" => Ok(Dialect::SqlServer),
            "sqlce" | "sql_ce" | "sqlserverce" => Ok(Dialect::SqlCe),
            other => Err(Error::Validation(format!("unknown dialect: {other}"))),
        }
    }
}

/// Renders dialect-neutral definitions into DDL text for one backend.
///
/// Implementations supply the dialect's static configuration (type map,
/// reserved words, clustering and default-value rules); statement assembly
/// is shared through the provided methods. Every formatting method validates
/// its input first and never produces partial output.
pub trait SyntaxProvider: fmt::Debug + Send + Sync {
    fn dialect(&self) -> Dialect;

    fn options(&self) -> &SyntaxOptions;

    fn type_map(&self) -> &TypeMap;

    fn reserved_words(&self) -> &'static [&'static str];

    /// Whether table names may be qualified with a schema.
    fn supports_schemas(&self) -> bool;

    /// Clustering keyword for `CREATE INDEX`, or `None` to emit none.
    fn index_directive(&self, index: &IndexDefinition) -> Option<&'static str>;

    /// Clustering keyword following `PRIMARY KEY`, or `None` to emit none.
    fn primary_key_directive(&self, table: &TableDefinition) -> Option<&'static str>;

    /// Whether column defaults are emitted as named `DF_` constraints.
    fn named_default_constraints(&self) -> bool;

    fn system_method(&self, method: SystemMethod) -> Result<&'static str>;

    fn identity_clause(&self) -> &'static str {
        "IDENTITY(1,1)"
    }

    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words()
            .iter()
            .any(|word| word.eq_ignore_ascii_case(name))
    }

    fn quote_name(&self, name: &str) -> String {
        match self.options().quote_identifiers {
            QuoteIdentifiers::Always => bracket_quote(name),
            QuoteIdentifiers::WhenNeeded => {
                if self.is_reserved(name) || !is_plain_identifier(name) {
                    bracket_quote(name)
                } else {
                    name.to_string()
                }
            }
        }
    }

    /// Quoted table name, schema-qualified when the dialect has schemas and
    /// either the definition or the options name one.
    fn quote_table_name(&self, schema: Option<&str>, table: &str) -> String {
        let quoted = self.quote_name(table);
        if !self.supports_schemas() {
            return quoted;
        }
        match schema.or(self.options().default_schema.as_deref()) {
            Some(schema) if !schema.trim().is_empty() => {
                format!("{}.{}", self.quote_name(schema), quoted)
            }
            _ => quoted,
        }
    }

    fn format_type(&self, column: &ColumnDefinition) -> Result<String> {
        self.type_map()
            .resolve(&column.db_type, self.options().default_string_length)
    }

    fn format_default(
        &self,
        table: &TableDefinition,
        column: &ColumnDefinition,
    ) -> Result<Option<String>> {
        let Some(default) = &column.default_value else {
            return Ok(None);
        };

        let value = match default {
            DefaultValue::Expression(expression) => expression.clone(),
            DefaultValue::Text(text) => {
                let prefix = if column.db_type.is_unicode() { "N" } else { "" };
                format!("{prefix}'{}'", text.replace('\'', "''"))
            }
            DefaultValue::Method(method) => self.system_method(*method)?.to_string(),
        };
        let clause = format!("DEFAULT ({value})");

        if self.named_default_constraints() {
            let constraint = format!("DF_{}_{}", table.name, column.name);
            Ok(Some(format!(
                "CONSTRAINT {} {clause}",
                self.quote_name(&constraint)
            )))
        } else {
            Ok(Some(clause))
        }
    }

    fn format_column(&self, table: &TableDefinition, column: &ColumnDefinition) -> Result<String> {
        let mut parts = vec![self.quote_name(&column.name), self.format_type(column)?];
        parts.push(if column.is_nullable { "NULL" } else { "NOT NULL" }.to_string());
        if let Some(default) = self.format_default(table, column)? {
            parts.push(default);
        }
        if column.is_identity {
            parts.push(self.identity_clause().to_string());
        }
        Ok(parts.join(" "))
    }

    fn format_create_table(&self, table: &TableDefinition) -> Result<String> {
        validate_table(table)?;

        let mut columns: Vec<&ColumnDefinition> = table.columns.iter().collect();
        columns.sort_by_key(|column| column.ordinal_position);
        let definitions = columns
            .into_iter()
            .map(|column| self.format_column(table, column))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            dialect = %self.dialect(),
            table = %table.name,
            columns = definitions.len(),
            "formatted create table"
        );

        Ok(format!(
            "CREATE TABLE {} ({})",
            self.quote_table_name(table.schema_name.as_deref(), &table.name),
            definitions.join(",\n")
        ))
    }

    /// Primary key constraint, or an empty string when no column is flagged.
    fn format_primary_key(&self, table: &TableDefinition) -> Result<String> {
        validate_table(table)?;

        let columns = table.primary_key_columns();
        if columns.is_empty() {
            debug!(
                dialect = %self.dialect(),
                table = %table.name,
                "no primary key columns"
            );
            return Ok(String::new());
        }

        let name = table.effective_primary_key_name();
        let keyword = match self.primary_key_directive(table) {
            Some(directive) => format!("PRIMARY KEY {directive}"),
            None => "PRIMARY KEY".to_string(),
        };
        let column_list = columns
            .iter()
            .map(|column| self.quote_name(&column.name))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!(
            "ALTER TABLE {} ADD CONSTRAINT {} {keyword} ({column_list})",
            self.quote_table_name(table.schema_name.as_deref(), &table.name),
            self.quote_name(&name)
        ))
    }

    /// `CREATE [UNIQUE] [CLUSTERED|NONCLUSTERED] INDEX`. The target table is
    /// never schema-qualified.
    fn format_index(&self, index: &IndexDefinition) -> Result<String> {
        validate_index(index)?;

        let mut statement = String::from("CREATE ");
        if index.is_unique {
            statement.push_str("UNIQUE ");
        }
        if let Some(directive) = self.index_directive(index) {
            statement.push_str(directive);
            statement.push(' ');
        }

        let column_list = index
            .columns
            .iter()
            .map(|column| match column.direction {
                SortDirection::Ascending => self.quote_name(&column.name),
                SortDirection::Descending => format!("{} DESC", self.quote_name(&column.name)),
            })
            .collect::<Vec<_>>()
            .join(", ");

        let name = index.effective_name();
        statement.push_str(&format!(
            "INDEX {} ON {} ({column_list})",
            self.quote_name(&name),
            self.quote_name(&index.table_name)
        ));

        debug!(dialect = %self.dialect(), index = %name, "formatted index");
        Ok(statement)
    }

    fn format_indexes(&self, indexes: &[IndexDefinition]) -> Result<Vec<String>> {
        indexes
            .iter()
            .map(|index| self.format_index(index))
            .collect()
    }

    fn format_foreign_key(&self, foreign_key: &ForeignKeyDefinition) -> Result<String> {
        validate_foreign_key(foreign_key)?;

        let quote_list = |columns: &[String]| {
            columns
                .iter()
                .map(|column| self.quote_name(column))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let name = foreign_key.effective_name();
        let mut statement = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            self.quote_table_name(foreign_key.schema_name.as_deref(), &foreign_key.table_name),
            self.quote_name(&name),
            quote_list(&foreign_key.columns),
            self.quote_table_name(
                foreign_key.referenced_schema.as_deref(),
                &foreign_key.referenced_table
            ),
            quote_list(&foreign_key.referenced_columns)
        );
        if let Some(action) = foreign_key.on_delete {
            statement.push_str(" ON DELETE ");
            statement.push_str(action.as_sql());
        }
        if let Some(action) = foreign_key.on_update {
            statement.push_str(" ON UPDATE ");
            statement.push_str(action.as_sql());
        }

        debug!(dialect = %self.dialect(), foreign_key = %name, "formatted foreign key");
        Ok(statement)
    }

    fn format_foreign_keys(&self, foreign_keys: &[ForeignKeyDefinition]) -> Result<Vec<String>> {
        foreign_keys
            .iter()
            .map(|foreign_key| self.format_foreign_key(foreign_key))
            .collect()
    }
}

/// Wrap in brackets, doubling any closing bracket.
pub fn bracket_quote(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

/// Letters, digits and `_ @ # $`, starting with a letter or `_`. A leading
/// `@` or `#` names a variable or temporary table and is never plain.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '#' | '$'))
}
