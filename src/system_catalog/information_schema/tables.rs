use crate::context::QueryContext;
use crate::error::CatalogResult;
use crate::system_catalog::iterate::{iterate_current_database, Callbacks};
use crate::system_catalog::registry::{ColType, ColumnDef, Partition, SystemTable};
use crate::system_catalog::rows::{RowSequence, Value};

#[derive(Default)]
pub struct Tables;

impl Tables {
    pub fn new() -> Self { Self }
}

const COLS: &[ColumnDef] = &[
    ColumnDef { name: "table_catalog", coltype: ColType::Text },
    ColumnDef { name: "table_schema", coltype: ColType::Text },
    ColumnDef { name: "table_name", coltype: ColType::Text },
    ColumnDef { name: "table_type", coltype: ColType::Text },
    ColumnDef { name: "self_referencing_column_name", coltype: ColType::Text },
    ColumnDef { name: "reference_generation", coltype: ColType::Text },
    ColumnDef { name: "user_defined_type_catalog", coltype: ColType::Text },
    ColumnDef { name: "user_defined_type_schema", coltype: ColType::Text },
    ColumnDef { name: "user_defined_type_name", coltype: ColType::Text },
    ColumnDef { name: "is_insertable_into", coltype: ColType::Text },
    ColumnDef { name: "is_typed", coltype: ColType::Text },
    ColumnDef { name: "commit_action", coltype: ColType::Text },
];

impl SystemTable for Tables {
    fn name(&self) -> &'static str { "tables" }
    fn schema(&self) -> &'static [ColumnDef] { COLS }

    fn rows(&self, ctx: &QueryContext, _partition: &Partition) -> CatalogResult<RowSequence> {
        let mut found: Vec<(String, String)> = Vec::new();
        let db = {
            let mut cbs = Callbacks::new().on_table(|_, schema, table| {
                found.push((schema.name().to_string(), table.name().to_string()));
                Ok(true)
            });
            iterate_current_database(ctx, &mut cbs)?
        };
        let catalog = db.name().to_string();
        Ok(RowSequence::new(found.into_iter().map(move |(schema, table)| {
            vec![
                Value::text(catalog.as_str()),
                Value::Text(schema),
                Value::Text(table),
                Value::text("BASE TABLE"),
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
                Value::text("YES"),
                Value::text("NO"),
                Value::Null,
            ]
        })))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::{DatabaseDef, MemoryCatalog, SchemaDef, TableDef};
    use crate::config::CatalogConfig;
    use crate::system_catalog::information_schema::schemata::Schemata;

    fn ctx() -> QueryContext {
        let cat = MemoryCatalog::with_databases(vec![DatabaseDef::multi(
            "erp",
            vec![
                SchemaDef::new("public", vec![TableDef::new("orders", &["id"]), TableDef::new("lines", &["id"])]),
                SchemaDef::new("hr", vec![TableDef::new("staff", &["id"])]),
            ],
        )]);
        QueryContext::new(Arc::new(cat), "erp")
    }

    #[test]
    fn tables_carry_catalog_and_type() {
        let rows: Vec<_> = Tables::new().rows(&ctx(), &Partition::default()).unwrap().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r[0] == Value::text("erp") && r[3] == Value::text("BASE TABLE")));
        let qualified: Vec<String> = rows.iter().map(|r| format!("{}.{}", r[1], r[2])).collect();
        assert_eq!(qualified, vec!["public.orders", "public.lines", "hr.staff"]);
    }

    #[test]
    fn schemata_lists_every_schema() {
        let df = Schemata::new(&CatalogConfig::default()).build(&ctx()).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("catalog_name").unwrap().str().unwrap().get(0), Some("erp"));
        assert_eq!(df.column("schema_name").unwrap().str().unwrap().get(1), Some("hr"));
        assert_eq!(df.column("schema_owner").unwrap().str().unwrap().get(0), Some("postgres"));
    }
}
