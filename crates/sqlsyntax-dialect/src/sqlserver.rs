use std::sync::Arc;

use once_cell::sync::Lazy;
use sqlsyntax_core::{IndexDefinition, IndexType, Result, SystemMethod, TableDefinition, TypeKind};
use tracing::debug;

use crate::options::SyntaxOptions;
use crate::provider::{Dialect, SyntaxProvider};
use crate::type_map::{TypeMap, TypeMapping};

/// T-SQL reserved keywords, shared by the SQL Server family.
pub(crate) const RESERVED_WORDS: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "AUTHORIZATION", "BACKUP", "BEGIN",
    "BETWEEN", "BREAK", "BROWSE", "BULK", "BY", "CASCADE", "CASE", "CHECK", "CHECKPOINT", "CLOSE",
    "CLUSTERED", "COALESCE", "COLLATE", "COLUMN", "COMMIT", "COMPUTE", "CONSTRAINT", "CONTAINS",
    "CONTINUE", "CONVERT", "CREATE", "CROSS", "CURRENT", "CURRENT_DATE", "CURRENT_TIME",
    "CURRENT_TIMESTAMP", "CURRENT_USER", "CURSOR", "DATABASE", "DEALLOCATE", "DECLARE",
    "DEFAULT", "DELETE", "DENY", "DESC", "DISTINCT", "DISTRIBUTED", "DOUBLE", "DROP", "ELSE",
    "END", "ESCAPE", "EXCEPT", "EXEC", "EXECUTE", "EXISTS", "EXIT", "FETCH", "FILE",
    "FILLFACTOR", "FOR", "FOREIGN", "FROM", "FULL", "FUNCTION", "GOTO", "GRANT", "GROUP",
    "HAVING", "IDENTITY", "IF", "IN", "INDEX", "INNER", "INSERT", "INTERSECT", "INTO", "IS",
    "JOIN", "KEY", "KILL", "LEFT", "LIKE", "MERGE", "NATIONAL", "NOCHECK", "NONCLUSTERED", "NOT",
    "NULL", "NULLIF", "OF", "OFF", "ON", "OPEN", "OPTION", "OR", "ORDER", "OUTER", "OVER",
    "PERCENT", "PIVOT", "PLAN", "PRIMARY", "PRINT", "PROC", "PROCEDURE", "PUBLIC", "RAISERROR",
    "READ", "REFERENCES", "RESTORE", "RESTRICT", "RETURN", "REVOKE", "RIGHT", "ROLLBACK",
    "ROWCOUNT", "RULE", "SAVE", "SCHEMA", "SELECT", "SESSION_USER", "SET", "SHUTDOWN", "SOME",
    "STATISTICS", "SYSTEM_USER", "TABLE", "THEN", "TO", "TOP", "TRAN", "TRANSACTION", "TRIGGER",
    "TRUNCATE", "UNION", "UNIQUE", "UNPIVOT", "UPDATE", "USE", "USER", "VALUES", "VARYING",
    "VIEW", "WAITFOR", "WHEN", "WHERE", "WHILE", "WITH",
];

static SHARED: Lazy<Arc<SqlServerSyntax>> =
    Lazy::new(|| Arc::new(SqlServerSyntax::new(SyntaxOptions::default())));

fn sql_server_types() -> TypeMap {
    TypeMap::new(Dialect::SqlServer.name())
        .with(TypeKind::Boolean, TypeMapping::new("BIT"))
        .with(TypeKind::TinyInt, TypeMapping::new("TINYINT"))
        .with(TypeKind::SmallInt, TypeMapping::new("SMALLINT"))
        .with(TypeKind::Integer, TypeMapping::new("INT"))
        .with(TypeKind::BigInt, TypeMapping::new("BIGINT"))
        .with(TypeKind::Decimal, TypeMapping::new("DECIMAL({precision},{scale})"))
        .with(TypeKind::Double, TypeMapping::new("FLOAT"))
        .with(TypeKind::Single, TypeMapping::new("REAL"))
        .with(TypeKind::Date, TypeMapping::new("DATE"))
        .with(TypeKind::Time, TypeMapping::new("TIME"))
        .with(TypeKind::DateTime, TypeMapping::new("DATETIME"))
        .with(TypeKind::Guid, TypeMapping::new("UNIQUEIDENTIFIER"))
        .with(
            TypeKind::Binary,
            TypeMapping::sized("VARBINARY({length})", "VARBINARY(MAX)"),
        )
        .with(TypeKind::String, TypeMapping::new("NVARCHAR({length})"))
        .with(TypeKind::AnsiString, TypeMapping::new("VARCHAR({length})"))
        .with(TypeKind::Text, TypeMapping::new("NTEXT"))
}

/// SQL Server syntax provider.
///
/// Primary keys are clustered unless the table opts out; indexes default to
/// `NONCLUSTERED`; column defaults become named `DF_<table>_<column>`
/// constraints.
#[derive(Debug, Clone)]
pub struct SqlServerSyntax {
    options: SyntaxOptions,
    types: TypeMap,
}

impl SqlServerSyntax {
    pub fn new(options: SyntaxOptions) -> Self {
        let mut types = sql_server_types();
        types.apply_overrides(&options.type_overrides);
        Self { options, types }
    }

    /// Shared instance with default options.
    pub fn provider() -> Arc<dyn SyntaxProvider> {
        SHARED.clone()
    }
}

impl Default for SqlServerSyntax {
    fn default() -> Self {
        Self::new(SyntaxOptions::default())
    }
}

impl SyntaxProvider for SqlServerSyntax {
    fn dialect(&self) -> Dialect {
        Dialect::SqlServer
    }

    fn options(&self) -> &SyntaxOptions {
        &self.options
    }

    fn type_map(&self) -> &TypeMap {
        &self.types
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED_WORDS
    }

    fn supports_schemas(&self) -> bool {
        true
    }

    fn index_directive(&self, index: &IndexDefinition) -> Option<&'static str> {
        if index.index_type == Some(IndexType::NonClustered) {
            return Some("NONCLUSTERED");
        }

        // Quirk kept for compatibility: `is_clustered = false` renders
        // CLUSTERED unless the index type asks for NONCLUSTERED.
        if index.is_clustered == Some(false) {
            debug!(
                index = %index.effective_name(),
                "is_clustered=false without a non-clustered index type renders CLUSTERED"
            );
            return Some("CLUSTERED");
        }

        if index.index_type == Some(IndexType::Clustered) || index.is_clustered == Some(true) {
            return Some("CLUSTERED");
        }

        Some("NONCLUSTERED")
    }

    fn primary_key_directive(&self, table: &TableDefinition) -> Option<&'static str> {
        match table.primary_key_clustered {
            Some(false) => Some("NONCLUSTERED"),
            _ => Some("CLUSTERED"),
        }
    }

    fn named_default_constraints(&self) -> bool {
        true
    }

    fn system_method(&self, method: SystemMethod) -> Result<&'static str> {
        Ok(match method {
            SystemMethod::CurrentDateTime => "getdate()",
            SystemMethod::CurrentUtcDateTime => "getutcdate()",
            SystemMethod::NewGuid => "newid()",
        })
    }
}
