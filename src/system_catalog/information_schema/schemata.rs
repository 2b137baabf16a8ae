use crate::config::CatalogConfig;
use crate::context::QueryContext;
use crate::error::CatalogResult;
use crate::system_catalog::iterate::{iterate_current_database, Callbacks};
use crate::system_catalog::registry::{ColType, ColumnDef, Partition, SystemTable};
use crate::system_catalog::rows::{RowSequence, Value};

pub struct Schemata {
    owner_name: String,
}

impl Schemata {
    pub fn new(config: &CatalogConfig) -> Self {
        Self { owner_name: config.owner_name.clone() }
    }
}

const COLS: &[ColumnDef] = &[
    ColumnDef { name: "catalog_name", coltype: ColType::Text },
    ColumnDef { name: "schema_name", coltype: ColType::Text },
    ColumnDef { name: "schema_owner", coltype: ColType::Text },
    ColumnDef { name: "default_character_set_catalog", coltype: ColType::Text },
    ColumnDef { name: "default_character_set_schema", coltype: ColType::Text },
    ColumnDef { name: "default_character_set_name", coltype: ColType::Text },
    ColumnDef { name: "sql_path", coltype: ColType::Text },
];

impl SystemTable for Schemata {
    fn name(&self) -> &'static str { "schemata" }
    fn schema(&self) -> &'static [ColumnDef] { COLS }

    fn rows(&self, ctx: &QueryContext, _partition: &Partition) -> CatalogResult<RowSequence> {
        let mut names: Vec<String> = Vec::new();
        let db = {
            let mut cbs = Callbacks::new().on_schema(|_, schema| {
                names.push(schema.name().to_string());
                Ok(true)
            });
            iterate_current_database(ctx, &mut cbs)?
        };
        let catalog = db.name().to_string();
        let owner = self.owner_name.clone();
        Ok(RowSequence::new(names.into_iter().map(move |name| {
            vec![
                Value::text(catalog.as_str()),
                Value::Text(name),
                Value::text(owner.as_str()),
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
            ]
        })))
    }
}
