use std::sync::Arc;

use once_cell::sync::Lazy;
use sqlsyntax_core::{
    Error, IndexDefinition, IndexType, Result, SystemMethod, TableDefinition, TypeKind,
};
use tracing::debug;

use crate::options::SyntaxOptions;
use crate::provider::{Dialect, SyntaxProvider};
use crate::sqlserver::RESERVED_WORDS;
use crate::type_map::{TypeMap, TypeMapping};

static SHARED: Lazy<Arc<SqlCeSyntax>> =
    Lazy::new(|| Arc::new(SqlCeSyntax::new(SyntaxOptions::default())));

// No DATE/TIME and no non-unicode strings on Compact Edition.
fn sql_ce_types() -> TypeMap {
    TypeMap::new(Dialect::SqlCe.name())
        .with(TypeKind::Boolean, TypeMapping::new("BIT"))
        .with(TypeKind::TinyInt, TypeMapping::new("TINYINT"))
        .with(TypeKind::SmallInt, TypeMapping::new("SMALLINT"))
        .with(TypeKind::Integer, TypeMapping::new("INT"))
        .with(TypeKind::BigInt, TypeMapping::new("BIGINT"))
        .with(TypeKind::Decimal, TypeMapping::new("NUMERIC({precision},{scale})"))
        .with(TypeKind::Double, TypeMapping::new("FLOAT"))
        .with(TypeKind::Single, TypeMapping::new("REAL"))
        .with(TypeKind::DateTime, TypeMapping::new("DATETIME"))
        .with(TypeKind::Guid, TypeMapping::new("UNIQUEIDENTIFIER"))
        .with(
            TypeKind::Binary,
            TypeMapping::sized("VARBINARY({length})", "IMAGE"),
        )
        .with(TypeKind::String, TypeMapping::new("NVARCHAR({length})"))
        .with(TypeKind::Text, TypeMapping::new("NTEXT"))
}

/// SQL Server Compact Edition syntax provider.
///
/// Compact Edition has no schemas and no clustered indexes, and column
/// defaults are plain `DEFAULT` clauses without a constraint name.
#[derive(Debug, Clone)]
pub struct SqlCeSyntax {
    options: SyntaxOptions,
    types: TypeMap,
}

impl SqlCeSyntax {
    pub fn new(options: SyntaxOptions) -> Self {
        let mut types = sql_ce_types();
        types.apply_overrides(&options.type_overrides);
        Self { options, types }
    }

    /// Shared instance with default options.
    pub fn provider() -> Arc<dyn SyntaxProvider> {
        SHARED.clone()
    }
}

impl Default for SqlCeSyntax {
    fn default() -> Self {
        Self::new(SyntaxOptions::default())
    }
}

impl SyntaxProvider for SqlCeSyntax {
    fn dialect(&self) -> Dialect {
        Dialect::SqlCe
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
        false
    }

    fn index_directive(&self, index: &IndexDefinition) -> Option<&'static str> {
        if index.index_type == Some(IndexType::NonClustered) {
            return Some("NONCLUSTERED");
        }
        if index.index_type.is_some() || index.is_clustered.is_some() {
            debug!(
                index = %index.effective_name(),
                "clustered indexes are not supported; using the default index"
            );
        }
        None
    }

    fn primary_key_directive(&self, table: &TableDefinition) -> Option<&'static str> {
        if table.primary_key_clustered.is_some() {
            debug!(
                table = %table.name,
                "primary key clustering is not configurable; ignoring override"
            );
        }
        None
    }

    fn named_default_constraints(&self) -> bool {
        false
    }

    fn system_method(&self, method: SystemMethod) -> Result<&'static str> {
        match method {
            SystemMethod::CurrentDateTime => Ok("GETDATE()"),
            SystemMethod::NewGuid => Ok("NEWID()"),
            SystemMethod::CurrentUtcDateTime => Err(Error::Unsupported {
                dialect: self.name().to_string(),
                feature: "UTC date/time default".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlsyntax_core::DbType;

    #[test]
    fn lacks_date_time_and_ansi_types() {
        let syntax = SqlCeSyntax::default();
        for kind in [TypeKind::Date, TypeKind::Time, TypeKind::AnsiString] {
            assert!(!syntax.type_map().supports(kind), "{kind} should be unmapped");
        }
        assert_eq!(
            syntax.type_map().resolve(&DbType::decimal(19, 4), 255),
            Ok("NUMERIC(19,4)".to_string())
        );
    }

    #[test]
    fn utc_default_is_unsupported() {
        let syntax = SqlCeSyntax::default();
        assert!(matches!(
            syntax.system_method(SystemMethod::CurrentUtcDateTime),
            Err(Error::Unsupported { .. })
        ));
    }

    #[test]
    fn never_qualifies_table_names() {
        let options = SyntaxOptions {
            default_schema: Some("dbo".to_string()),
            ..SyntaxOptions::default()
        };
        let syntax = SqlCeSyntax::new(options);
        assert_eq!(syntax.quote_table_name(Some("cms"), "umbracoNode"), "[umbracoNode]");
    }
}
