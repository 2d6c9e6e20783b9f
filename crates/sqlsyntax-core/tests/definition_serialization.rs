use jsonschema::JSONSchema;
use serde_json::json;
use sqlsyntax_core::{
    ColumnDefinition, DbType, DefaultValue, FkAction, IndexType, SortDirection, SystemMethod,
    TableDefinition, definition_json_schema, validate_table,
};

#[test]
fn serializes_table_deterministically() {
    let table = TableDefinition::new("umbracoLock").with_column(
        ColumnDefinition::new("id", DbType::Integer)
            .primary_key()
            .with_default(DefaultValue::Expression("0".to_string())),
    );

    let json = serde_json::to_string_pretty(&table).expect("serialize table");
    let expected = r#"{
  "name": "umbracoLock",
  "columns": [
    {
      "ordinal_position": 1,
      "name": "id",
      "db_type": "integer",
      "is_nullable": false,
      "is_primary_key": true,
      "is_identity": false,
      "default_value": {
        "kind": "expression",
        "value": "0"
      }
    }
  ],
  "indexes": [],
  "foreign_keys": []
}"#;
    assert_eq!(json, expected);
}

#[test]
fn deserializes_definition_from_reflection_output() {
    let json = r#"{
      "name": "umbracoNode",
      "schema_name": "dbo",
      "columns": [
        { "ordinal_position": 1, "name": "id", "db_type": "integer", "is_nullable": false,
          "is_primary_key": true, "is_identity": true },
        { "ordinal_position": 2, "name": "trashed", "db_type": "boolean", "is_nullable": false,
          "default_value": { "kind": "expression", "value": "0" } },
        { "ordinal_position": 3, "name": "parentID", "db_type": "integer", "is_nullable": false },
        { "ordinal_position": 4, "name": "uniqueID", "db_type": "guid", "is_nullable": true,
          "default_value": { "kind": "method", "value": "new_guid" } },
        { "ordinal_position": 5, "name": "text", "db_type": "String(255)", "is_nullable": true }
      ],
      "indexes": [
        { "name": "IX_umbracoNodeParentId", "table_name": "umbracoNode",
          "columns": [ { "name": "parentID" } ], "index_type": "non_clustered" },
        { "table_name": "umbracoNode",
          "columns": [ { "name": "text", "direction": "descending" } ], "is_unique": true }
      ],
      "foreign_keys": [
        { "table_name": "umbracoNode", "columns": ["parentID"],
          "referenced_table": "umbracoNode", "referenced_columns": ["id"],
          "on_delete": "no_action" }
      ],
      "primary_key_name": "PK_structure"
    }"#;

    let table: TableDefinition = serde_json::from_str(json).expect("parse table definition");
    assert_eq!(validate_table(&table), Ok(()));

    assert_eq!(table.schema_name.as_deref(), Some("dbo"));
    assert_eq!(table.columns.len(), 5);
    assert!(table.columns[0].is_identity);
    assert_eq!(table.columns[4].db_type, DbType::string(255));
    assert_eq!(
        table.columns[3].default_value,
        Some(DefaultValue::Method(SystemMethod::NewGuid))
    );

    assert_eq!(table.indexes[0].index_type, Some(IndexType::NonClustered));
    assert_eq!(table.indexes[0].columns[0].direction, SortDirection::Ascending);
    assert_eq!(table.indexes[1].effective_name(), "IX_umbracoNode_text");
    assert_eq!(table.indexes[1].columns[0].direction, SortDirection::Descending);
    assert!(table.indexes[1].is_clustered.is_none());

    assert_eq!(table.foreign_keys[0].on_delete, Some(FkAction::NoAction));
    assert_eq!(table.foreign_keys[0].on_update, None);
}

#[test]
fn rejects_unknown_semantic_type() {
    let json = r#"{ "ordinal_position": 1, "name": "id", "db_type": "varchar2", "is_nullable": false }"#;
    let result = serde_json::from_str::<ColumnDefinition>(json);
    assert!(result.is_err(), "unknown type must not deserialize");
}

#[test]
fn json_schema_describes_table_definition() {
    let schema = definition_json_schema();
    let value = serde_json::to_value(&schema).expect("serialize json schema");

    assert_eq!(value["title"], "TableDefinition");
    let required = value["required"].as_array().expect("required list");
    assert!(required.iter().any(|field| field == "name"));
    assert!(required.iter().any(|field| field == "columns"));
    assert_eq!(value["definitions"]["DbType"]["type"], "string");
}

#[test]
fn serialized_definitions_satisfy_json_schema() {
    let schema = serde_json::to_value(definition_json_schema()).expect("serialize json schema");
    let compiled = JSONSchema::compile(&schema).expect("compile json schema");

    let table = TableDefinition::new("cmsMacro")
        .in_schema("dbo")
        .with_column(ColumnDefinition::new("id", DbType::Integer).primary_key().identity())
        .with_column(ColumnDefinition::new("macroAlias", DbType::string(255)).not_null())
        .with_column(ColumnDefinition::new("macroRefreshRate", DbType::Integer).not_null());
    let instance = serde_json::to_value(&table).expect("serialize table");
    assert!(compiled.is_valid(&instance));

    let missing_columns = json!({ "name": "cmsMacro" });
    assert!(!compiled.is_valid(&missing_columns));

    let wrong_type = json!({ "name": "cmsMacro", "columns": [{
        "ordinal_position": 1, "name": "id", "db_type": 4, "is_nullable": false
    }] });
    assert!(!compiled.is_valid(&wrong_type));
}
