//! `pg_catalog.pg_attribute`: one row per column of every table in the current database.
//! The external catalog exposes column names only, so type columns report
//! "unknown" (`atttypid = 0`, `attlen = -1`, `atttypmod = -1`).

use crate::context::QueryContext;
use crate::error::CatalogResult;
use crate::system_catalog::iterate::{iterate_current_database, Callbacks};
use crate::system_catalog::registry::{ColType, ColumnDef, Partition, SystemTable};
use crate::system_catalog::rows::{Row, RowSequence, Value};

#[derive(Default)]
pub struct PgAttribute;

impl PgAttribute {
    pub fn new() -> Self { Self }
}

const COLS: &[ColumnDef] = &[
    ColumnDef { name: "attrelid", coltype: ColType::Oid },
    ColumnDef { name: "attname", coltype: ColType::Text },
    ColumnDef { name: "atttypid", coltype: ColType::Oid },
    ColumnDef { name: "attlen", coltype: ColType::SmallInt },
    ColumnDef { name: "attnum", coltype: ColType::SmallInt },
    ColumnDef { name: "atttypmod", coltype: ColType::Integer },
    ColumnDef { name: "attndims", coltype: ColType::SmallInt },
    ColumnDef { name: "attnotnull", coltype: ColType::Boolean },
    ColumnDef { name: "atthasdef", coltype: ColType::Boolean },
    ColumnDef { name: "attidentity", coltype: ColType::Char },
    ColumnDef { name: "attgenerated", coltype: ColType::Char },
    ColumnDef { name: "attisdropped", coltype: ColType::Boolean },
    ColumnDef { name: "attislocal", coltype: ColType::Boolean },
    ColumnDef { name: "attinhcount", coltype: ColType::SmallInt },
    ColumnDef { name: "attcollation", coltype: ColType::Oid },
    ColumnDef { name: "attacl", coltype: ColType::TextArray },
];

fn project(table_oid: u32, name: String, attnum: i16) -> Row {
    vec![
        Value::Oid(table_oid),
        Value::Text(name),
        Value::Oid(0),
        Value::Int16(-1),
        Value::Int16(attnum),
        Value::Int32(-1),
        Value::Int16(0),
        Value::Bool(false),
        Value::Bool(false),
        Value::text(""),
        Value::text(""),
        Value::Bool(false),
        Value::Bool(true),
        Value::Int16(0),
        Value::Oid(0),
        Value::Null,
    ]
}

impl SystemTable for PgAttribute {
    fn name(&self) -> &'static str { "pg_attribute" }
    fn schema(&self) -> &'static [ColumnDef] { COLS }

    fn rows(&self, ctx: &QueryContext, _partition: &Partition) -> CatalogResult<RowSequence> {
        let mut attrs: Vec<(u32, String, i16)> = Vec::new();
        {
            let mut cbs = Callbacks::new().on_table(|_, _, table| {
                for (i, col) in table.item.column_names().into_iter().enumerate() {
                    let Ok(attnum) = i16::try_from(i + 1) else { break };
                    attrs.push((table.oid, col, attnum));
                }
                Ok(true)
            });
            iterate_current_database(ctx, &mut cbs)?;
        }
        Ok(RowSequence::new(attrs.into_iter().map(|(oid, name, attnum)| project(oid, name, attnum))))
    }
}
