//! `pg_catalog.pg_namespace`: one row per schema of the current database.

use crate::config::CatalogConfig;
use crate::context::QueryContext;
use crate::error::CatalogResult;
use crate::system_catalog::iterate::{iterate_current_database, Callbacks};
use crate::system_catalog::registry::{ColType, ColumnDef, Partition, SystemTable};
use crate::system_catalog::rows::{RowSequence, Value};

pub struct PgNamespace {
    owner_oid: u32,
}

impl PgNamespace {
    pub fn new(config: &CatalogConfig) -> Self {
        Self { owner_oid: config.default_owner_oid }
    }
}

const COLS: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "nspname", coltype: ColType::Text },
    ColumnDef { name: "nspowner", coltype: ColType::Oid },
    ColumnDef { name: "nspacl", coltype: ColType::TextArray },
];

impl SystemTable for PgNamespace {
    fn name(&self) -> &'static str { "pg_namespace" }
    fn schema(&self) -> &'static [ColumnDef] { COLS }

    fn rows(&self, ctx: &QueryContext, _partition: &Partition) -> CatalogResult<RowSequence> {
        let mut namespaces: Vec<(u32, String)> = Vec::new();
        {
            let mut cbs = Callbacks::new().on_schema(|_, schema| {
                namespaces.push((schema.oid, schema.name().to_string()));
                Ok(true)
            });
            iterate_current_database(ctx, &mut cbs)?;
        }
        let owner = self.owner_oid;
        Ok(RowSequence::new(namespaces.into_iter().map(move |(oid, name)| {
            vec![Value::Oid(oid), Value::Text(name), Value::Oid(owner), Value::Null]
        })))
    }
}
