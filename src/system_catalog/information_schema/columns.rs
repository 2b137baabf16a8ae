use crate::context::QueryContext;
use crate::error::CatalogResult;
use crate::system_catalog::iterate::{iterate_current_database, Callbacks};
use crate::system_catalog::registry::{ColType, ColumnDef, Partition, SystemTable};
use crate::system_catalog::rows::{RowSequence, Value};

#[derive(Default)]
pub struct Columns;

impl Columns {
    pub fn new() -> Self { Self }
}

const COLS: &[ColumnDef] = &[
    ColumnDef { name: "table_catalog", coltype: ColType::Text },
    ColumnDef { name: "table_schema", coltype: ColType::Text },
    ColumnDef { name: "table_name", coltype: ColType::Text },
    ColumnDef { name: "column_name", coltype: ColType::Text },
    ColumnDef { name: "ordinal_position", coltype: ColType::Integer },
    ColumnDef { name: "column_default", coltype: ColType::Text },
    ColumnDef { name: "is_nullable", coltype: ColType::Text },
    // column types are not exposed by the external catalog
    ColumnDef { name: "data_type", coltype: ColType::Text },
];

impl SystemTable for Columns {
    fn name(&self) -> &'static str { "columns" }
    fn schema(&self) -> &'static [ColumnDef] { COLS }

    fn rows(&self, ctx: &QueryContext, _partition: &Partition) -> CatalogResult<RowSequence> {
        let mut found: Vec<(String, String, String, i32)> = Vec::new();
        let db = {
            let mut cbs = Callbacks::new().on_table(|_, schema, table| {
                for (i, col) in table.item.column_names().into_iter().enumerate() {
                    let position = i32::try_from(i + 1).unwrap_or(i32::MAX);
                    found.push((schema.name().to_string(), table.name().to_string(), col, position));
                }
                Ok(true)
            });
            iterate_current_database(ctx, &mut cbs)?
        };
        let catalog = db.name().to_string();
        Ok(RowSequence::new(found.into_iter().map(move |(schema, table, column, position)| {
            vec![
                Value::text(catalog.as_str()),
                Value::Text(schema),
                Value::Text(table),
                Value::Text(column),
                Value::Int32(position),
                Value::Null,
                Value::text("YES"),
                Value::Null,
            ]
        })))
    }
}
