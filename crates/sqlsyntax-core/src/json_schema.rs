use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::table::TableDefinition;

/// Emit the JSON Schema for serialized table definitions.
pub fn definition_json_schema() -> RootSchema {
    schema_for!(TableDefinition)
}
