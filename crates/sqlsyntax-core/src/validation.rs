use std::collections::BTreeSet;

use crate::constraints::{ForeignKeyDefinition, IndexDefinition};
use crate::error::{Error, Result};
use crate::table::TableDefinition;

/// Validate the structure of a table definition before rendering.
///
/// This checks:
/// - the table has a name and at least one column
/// - column names are present and unique
/// - primary key and identity columns are not nullable
/// - identity columns have an integer type
/// - column types are within their size bounds
/// - owned indexes and foreign keys are valid and name existing columns
pub fn validate_table(table: &TableDefinition) -> Result<()> {
    if table.name.trim().is_empty() {
        return Err(Error::Validation("table name is empty".to_string()));
    }

    if table.columns.is_empty() {
        return Err(Error::Validation(format!(
            "table {} has no columns",
            table.name
        )));
    }

    let mut columns = BTreeSet::new();
    for column in &table.columns {
        if column.name.trim().is_empty() {
            return Err(Error::Validation(format!(
                "table {} has a column without a name (position {})",
                table.name, column.ordinal_position
            )));
        }
        if !columns.insert(column.name.as_str()) {
            return Err(Error::Validation(format!(
                "duplicate column name: {}.{}",
                table.name, column.name
            )));
        }
        if column.is_primary_key && column.is_nullable {
            return Err(Error::Validation(format!(
                "primary key column is nullable: {}.{}",
                table.name, column.name
            )));
        }
        if column.is_identity && column.is_nullable {
            return Err(Error::Validation(format!(
                "identity column is nullable: {}.{}",
                table.name, column.name
            )));
        }
        if column.is_identity && !column.db_type.is_integral() {
            return Err(Error::Validation(format!(
                "identity column must be an integer type: {}.{} is {}",
                table.name, column.name, column.db_type
            )));
        }
        column.db_type.check_bounds()?;
    }

    for index in &table.indexes {
        validate_index(index)?;
        if let Some(missing) = index
            .columns
            .iter()
            .find(|column| table.column(&column.name).is_none())
        {
            return Err(Error::Validation(format!(
                "index {} references unknown column {}.{}",
                index.effective_name(),
                table.name,
                missing.name
            )));
        }
    }

    for foreign_key in &table.foreign_keys {
        validate_foreign_key(foreign_key)?;
        if let Some(missing) = foreign_key
            .columns
            .iter()
            .find(|column| table.column(column).is_none())
        {
            return Err(Error::Validation(format!(
                "foreign key {} references unknown column {}.{}",
                foreign_key.effective_name(),
                table.name,
                missing
            )));
        }
    }

    Ok(())
}

/// Validate an index definition.
pub fn validate_index(index: &IndexDefinition) -> Result<()> {
    if index.table_name.trim().is_empty() {
        return Err(Error::Validation(format!(
            "index {} has no table name",
            index.name
        )));
    }

    if index.columns.is_empty() {
        return Err(Error::Validation(format!(
            "index {} on {} has no columns",
            index.effective_name(),
            index.table_name
        )));
    }

    let mut seen = BTreeSet::new();
    for column in &index.columns {
        if column.name.trim().is_empty() {
            return Err(Error::Validation(format!(
                "index {} has a column without a name",
                index.effective_name()
            )));
        }
        if !seen.insert(column.name.as_str()) {
            return Err(Error::Validation(format!(
                "index {} lists column {} twice",
                index.effective_name(),
                column.name
            )));
        }
    }

    Ok(())
}

/// Validate a foreign key definition.
pub fn validate_foreign_key(foreign_key: &ForeignKeyDefinition) -> Result<()> {
    if foreign_key.table_name.trim().is_empty() {
        return Err(Error::Validation("foreign key has no table name".to_string()));
    }

    if foreign_key.referenced_table.trim().is_empty() {
        return Err(Error::Validation(format!(
            "foreign key on {} has no referenced table",
            foreign_key.table_name
        )));
    }

    if foreign_key.columns.is_empty() {
        return Err(Error::Validation(format!(
            "foreign key on {} has no columns",
            foreign_key.table_name
        )));
    }

    if foreign_key.columns.len() != foreign_key.referenced_columns.len() {
        return Err(Error::Validation(format!(
            "foreign key {} maps {} column(s) to {} referenced column(s)",
            foreign_key.effective_name(),
            foreign_key.columns.len(),
            foreign_key.referenced_columns.len()
        )));
    }

    Ok(())
}
