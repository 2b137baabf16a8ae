//! `pg_catalog.pg_tables`: one row per table of the current database.

use std::collections::HashSet;

use crate::config::CatalogConfig;
use crate::context::QueryContext;
use crate::error::CatalogResult;
use crate::system_catalog::iterate::{iterate_current_database, Callbacks};
use crate::system_catalog::registry::{ColType, ColumnDef, Partition, SystemTable};
use crate::system_catalog::rows::{RowSequence, Value};

pub struct PgTables {
    owner_name: String,
}

impl PgTables {
    pub fn new(config: &CatalogConfig) -> Self {
        Self { owner_name: config.owner_name.clone() }
    }
}

const COLS: &[ColumnDef] = &[
    ColumnDef { name: "schemaname", coltype: ColType::Text },
    ColumnDef { name: "tablename", coltype: ColType::Text },
    ColumnDef { name: "tableowner", coltype: ColType::Text },
    ColumnDef { name: "tablespace", coltype: ColType::Text },
    ColumnDef { name: "hasindexes", coltype: ColType::Boolean },
    ColumnDef { name: "hasrules", coltype: ColType::Boolean },
    ColumnDef { name: "hastriggers", coltype: ColType::Boolean },
    ColumnDef { name: "rowsecurity", coltype: ColType::Boolean },
];

impl SystemTable for PgTables {
    fn name(&self) -> &'static str { "pg_tables" }
    fn schema(&self) -> &'static [ColumnDef] { COLS }

    fn rows(&self, ctx: &QueryContext, _partition: &Partition) -> CatalogResult<RowSequence> {
        let mut tables: Vec<(u32, String, String)> = Vec::new();
        let mut indexed: HashSet<u32> = HashSet::new();
        {
            let mut cbs = Callbacks::new()
                .on_table(|_, schema, table| {
                    tables.push((table.oid, schema.name().to_string(), table.name().to_string()));
                    Ok(true)
                })
                .on_index(|_, _, table, _| {
                    indexed.insert(table.oid);
                    Ok(true)
                });
            iterate_current_database(ctx, &mut cbs)?;
        }
        let owner = self.owner_name.clone();
        Ok(RowSequence::new(tables.into_iter().map(move |(oid, schema, table)| {
            vec![
                Value::Text(schema),
                Value::Text(table),
                Value::Text(owner.clone()),
                Value::Null,
                Value::Bool(indexed.contains(&oid)),
                Value::Bool(false),
                Value::Bool(false),
                Value::Bool(false),
            ]
        })))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::{DatabaseDef, IndexDef, MemoryCatalog, SchemaDef, TableDef};

    #[test]
    fn one_row_per_table() {
        let cat = MemoryCatalog::with_databases(vec![DatabaseDef::multi(
            "db",
            vec![
                SchemaDef::new("public", vec![TableDef::new("a", &["x"]).with_index(IndexDef::new("a_x", false, &["x"]))]),
                SchemaDef::new("other", vec![TableDef::new("b", &["y"])]),
            ],
        )]);
        let ctx = QueryContext::new(Arc::new(cat), "db");
        let rows: Vec<_> = PgTables::new(&CatalogConfig::default()).rows(&ctx, &Partition::default()).unwrap().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Value::text("public"));
        assert_eq!(rows[0][2], Value::text("postgres"));
        assert_eq!(rows[0][4], Value::Bool(true));
        assert_eq!(rows[1][1], Value::text("b"));
        assert_eq!(rows[1][4], Value::Bool(false));
    }
}
