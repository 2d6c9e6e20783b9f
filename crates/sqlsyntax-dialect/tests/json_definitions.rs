use serde_json::json;
use sqlsyntax_core::TableDefinition;
use sqlsyntax_dialect::{DdlFormatter, Dialect};

#[test]
fn formats_a_table_loaded_from_json() {
    let table: TableDefinition = serde_json::from_value(json!({
        "name": "cmsTags",
        "schema_name": "dbo",
        "columns": [
            { "ordinal_position": 2, "name": "tag", "db_type": "string(200)", "is_nullable": true },
            {
                "ordinal_position": 1,
                "name": "id",
                "db_type": "integer",
                "is_nullable": false,
                "is_primary_key": true,
                "is_identity": true
            },
            {
                "ordinal_position": 3,
                "name": "group",
                "db_type": "string(100)",
                "is_nullable": false,
                "default_value": { "kind": "text", "value": "default" }
            }
        ],
        "indexes": [
            { "name": "IX_cmsTags", "table_name": "cmsTags", "columns": [{ "name": "tag" }, { "name": "group" }], "is_unique": true }
        ]
    }))
    .expect("deserialize table");

    let dialect: Dialect = serde_json::from_value(json!("sql_ce")).expect("deserialize dialect");
    let script = DdlFormatter::with_provider(dialect.provider())
        .format_script(&table)
        .expect("format script");

    assert_eq!(
        script,
        vec![
            "CREATE TABLE [cmsTags] ([id] INT NOT NULL IDENTITY(1,1),\n[tag] NVARCHAR(200) NULL,\n[group] NVARCHAR(100) NOT NULL DEFAULT (N'default'))".to_string(),
            "ALTER TABLE [cmsTags] ADD CONSTRAINT [PK_cmsTags] PRIMARY KEY ([id])".to_string(),
            "CREATE UNIQUE INDEX [IX_cmsTags] ON [cmsTags] ([tag], [group])".to_string(),
        ]
    );
}
