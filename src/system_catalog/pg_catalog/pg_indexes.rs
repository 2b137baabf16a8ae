//! `pg_catalog.pg_indexes`: one row per index with a synthesised `CREATE INDEX` definition.

use crate::config::CatalogConfig;
use crate::context::QueryContext;
use crate::error::CatalogResult;
use crate::system_catalog::iterate::{iterate_current_database, Callbacks};
use crate::system_catalog::registry::{ColType, ColumnDef, Partition, SystemTable};
use crate::system_catalog::rows::{RowSequence, Value};

use super::{index_relname, key_column};

pub struct PgIndexes {
    primary_key_name: String,
}

impl PgIndexes {
    pub fn new(config: &CatalogConfig) -> Self {
        Self { primary_key_name: config.primary_key_name.clone() }
    }
}

const COLS: &[ColumnDef] = &[
    ColumnDef { name: "schemaname", coltype: ColType::Text },
    ColumnDef { name: "tablename", coltype: ColType::Text },
    ColumnDef { name: "indexname", coltype: ColType::Text },
    ColumnDef { name: "tablespace", coltype: ColType::Text },
    ColumnDef { name: "indexdef", coltype: ColType::Text },
];

/// `CREATE [UNIQUE] INDEX name ON schema.table USING btree (a, b)`
pub fn index_definition(schema: &str, table: &str, index_name: &str, unique: bool, expressions: &[String]) -> String {
    let keys: Vec<String> = expressions.iter().map(|e| key_column(table, e)).collect();
    format!(
        "CREATE {}INDEX {} ON {}.{} USING btree ({})",
        if unique { "UNIQUE " } else { "" },
        index_name,
        schema,
        table,
        keys.join(", ")
    )
}

impl SystemTable for PgIndexes {
    fn name(&self) -> &'static str { "pg_indexes" }
    fn schema(&self) -> &'static [ColumnDef] { COLS }

    fn rows(&self, ctx: &QueryContext, _partition: &Partition) -> CatalogResult<RowSequence> {
        let mut rows = Vec::new();
        {
            let pk = self.primary_key_name.as_str();
            let mut cbs = Callbacks::new().on_index(|_, schema, table, index| {
                let name = index_relname(table.name(), index.name(), pk);
                let def = index_definition(schema.name(), table.name(), &name, index.item.is_unique(), &index.item.expressions());
                rows.push(vec![
                    Value::text(schema.name()),
                    Value::text(table.name()),
                    Value::Text(name),
                    Value::Null,
                    Value::Text(def),
                ]);
                Ok(true)
            });
            iterate_current_database(ctx, &mut cbs)?;
        }
        Ok(RowSequence::from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::{DatabaseDef, IndexDef, MemoryCatalog, SchemaDef, TableDef};

    #[test]
    fn definitions_are_synthesised() {
        let cat = MemoryCatalog::with_databases(vec![DatabaseDef::multi(
            "db",
            vec![SchemaDef::new(
                "public",
                vec![TableDef::new("users", &["id", "email", "name"])
                    .with_index(IndexDef::new("PRIMARY", true, &["id"]))
                    .with_index(IndexDef::new("by_name", false, &["users.name", "email"]))],
            )],
        )]);
        let ctx = QueryContext::new(Arc::new(cat), "db");
        let rows: Vec<_> = PgIndexes::new(&CatalogConfig::default()).rows(&ctx, &Partition::default()).unwrap().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][2], Value::text("users_pkey"));
        assert_eq!(rows[0][4], Value::text("CREATE UNIQUE INDEX users_pkey ON public.users USING btree (id)"));
        assert_eq!(rows[1][4], Value::text("CREATE INDEX by_name ON public.users USING btree (name, email)"));
    }
}
