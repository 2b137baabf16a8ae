//! `pg_catalog.pg_index`: one row per index of every table in the current database.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Index, Table};
use crate::config::CatalogConfig;
use crate::context::QueryContext;
use crate::error::CatalogResult;
use crate::system_catalog::iterate::{iterate_current_database, Callbacks};
use crate::system_catalog::registry::{ColType, ColumnDef, Partition, SystemTable};
use crate::system_catalog::rows::{Row, RowSequence, Value};

use super::{column_positions, is_primary_key};

pub struct PgIndex {
    primary_key_name: String,
}

impl PgIndex {
    pub fn new(config: &CatalogConfig) -> Self {
        Self { primary_key_name: config.primary_key_name.clone() }
    }
}

const COLS: &[ColumnDef] = &[
    ColumnDef { name: "indexrelid", coltype: ColType::Oid },
    ColumnDef { name: "indrelid", coltype: ColType::Oid },
    ColumnDef { name: "indnatts", coltype: ColType::SmallInt },
    ColumnDef { name: "indnkeyatts", coltype: ColType::SmallInt },
    ColumnDef { name: "indisunique", coltype: ColType::Boolean },
    ColumnDef { name: "indnullsnotdistinct", coltype: ColType::Boolean },
    ColumnDef { name: "indisprimary", coltype: ColType::Boolean },
    ColumnDef { name: "indisexclusion", coltype: ColType::Boolean },
    ColumnDef { name: "indimmediate", coltype: ColType::Boolean },
    ColumnDef { name: "indisclustered", coltype: ColType::Boolean },
    ColumnDef { name: "indisvalid", coltype: ColType::Boolean },
    ColumnDef { name: "indcheckxmin", coltype: ColType::Boolean },
    ColumnDef { name: "indisready", coltype: ColType::Boolean },
    ColumnDef { name: "indislive", coltype: ColType::Boolean },
    ColumnDef { name: "indisreplident", coltype: ColType::Boolean },
    ColumnDef { name: "indkey", coltype: ColType::Int2Vector },
    ColumnDef { name: "indexprs", coltype: ColType::Text },
    ColumnDef { name: "indpred", coltype: ColType::Text },
];

/// Collected during traversal; rows are projected only when pulled.
struct IndexEntry {
    index: Arc<dyn Index>,
    table: Arc<dyn Table>,
    table_oid: u32,
    index_oid: u32,
}

fn project(e: &IndexEntry, primary_key_name: &str) -> Row {
    let expressions = e.index.expressions();
    let natts = i16::try_from(expressions.len()).unwrap_or(i16::MAX);
    let indkey = column_positions(e.table.name(), &e.table.column_names(), &expressions);
    vec![
        Value::Oid(e.index_oid),
        Value::Oid(e.table_oid),
        Value::Int16(natts),
        Value::Int16(natts),
        Value::Bool(e.index.is_unique()),
        Value::Bool(false),
        Value::Bool(is_primary_key(e.index.id(), primary_key_name)),
        Value::Bool(false),
        Value::Bool(true),
        Value::Bool(false),
        Value::Bool(true),
        Value::Bool(false),
        Value::Bool(true),
        Value::Bool(true),
        Value::Bool(false),
        Value::Int2Vector(indkey),
        Value::Null,
        Value::Null,
    ]
}

impl SystemTable for PgIndex {
    fn name(&self) -> &'static str { "pg_index" }
    fn schema(&self) -> &'static [ColumnDef] { COLS }

    fn rows(&self, ctx: &QueryContext, _partition: &Partition) -> CatalogResult<RowSequence> {
        let mut entries: Vec<IndexEntry> = Vec::new();
        {
            let mut cbs = Callbacks::new().on_index(|_, _, table, index| {
                entries.push(IndexEntry {
                    index: Arc::clone(&index.item),
                    table: Arc::clone(&table.item),
                    table_oid: table.oid,
                    index_oid: index.oid,
                });
                Ok(true)
            });
            iterate_current_database(ctx, &mut cbs)?;
        }
        debug!(target: "pgmirror::pg_catalog", "pg_index: {} indexes in '{}'", entries.len(), ctx.current_database());
        let pk = self.primary_key_name.clone();
        Ok(RowSequence::new(entries.into_iter().map(move |e| project(&e, &pk))))
    }
}
