//! information_schema handlers. `schemata`, `tables` and `columns` are live.

pub mod columns;
pub mod schemata;
pub mod tables;

use std::sync::Arc;

use crate::config::CatalogConfig;
use crate::system_catalog::registry::{ColType, ColumnDef, NoOpSystemTable, Registry, INFORMATION_SCHEMA};

const COLS_VIEWS: &[ColumnDef] = &[
    ColumnDef { name: "table_catalog", coltype: ColType::Text },
    ColumnDef { name: "table_schema", coltype: ColType::Text },
    ColumnDef { name: "table_name", coltype: ColType::Text },
    ColumnDef { name: "view_definition", coltype: ColType::Text },
    ColumnDef { name: "check_option", coltype: ColType::Text },
    ColumnDef { name: "is_updatable", coltype: ColType::Text },
];

const COLS_TABLE_CONSTRAINTS: &[ColumnDef] = &[
    ColumnDef { name: "constraint_catalog", coltype: ColType::Text },
    ColumnDef { name: "constraint_schema", coltype: ColType::Text },
    ColumnDef { name: "constraint_name", coltype: ColType::Text },
    ColumnDef { name: "table_catalog", coltype: ColType::Text },
    ColumnDef { name: "table_schema", coltype: ColType::Text },
    ColumnDef { name: "table_name", coltype: ColType::Text },
    ColumnDef { name: "constraint_type", coltype: ColType::Text },
];

const COLS_KEY_COLUMN_USAGE: &[ColumnDef] = &[
    ColumnDef { name: "constraint_catalog", coltype: ColType::Text },
    ColumnDef { name: "constraint_schema", coltype: ColType::Text },
    ColumnDef { name: "constraint_name", coltype: ColType::Text },
    ColumnDef { name: "table_schema", coltype: ColType::Text },
    ColumnDef { name: "table_name", coltype: ColType::Text },
    ColumnDef { name: "column_name", coltype: ColType::Text },
    ColumnDef { name: "ordinal_position", coltype: ColType::Integer },
];

const COLS_ROUTINES: &[ColumnDef] = &[
    ColumnDef { name: "specific_name", coltype: ColType::Text },
    ColumnDef { name: "routine_schema", coltype: ColType::Text },
    ColumnDef { name: "routine_name", coltype: ColType::Text },
    ColumnDef { name: "routine_type", coltype: ColType::Text },
    ColumnDef { name: "data_type", coltype: ColType::Text },
];

// Not backed by catalog data; present so client introspection queries resolve
const COLS_SQL_FEATURES: &[ColumnDef] = &[
    ColumnDef { name: "feature_id", coltype: ColType::Text },
    ColumnDef { name: "feature_name", coltype: ColType::Text },
    ColumnDef { name: "sub_feature_id", coltype: ColType::Text },
    ColumnDef { name: "sub_feature_name", coltype: ColType::Text },
    ColumnDef { name: "is_supported", coltype: ColType::Text },
    ColumnDef { name: "is_verified_by", coltype: ColType::Text },
    ColumnDef { name: "comments", coltype: ColType::Text },
];

const COLS_SQL_IMPLEMENTATION_INFO: &[ColumnDef] = &[
    ColumnDef { name: "implementation_info_id", coltype: ColType::Text },
    ColumnDef { name: "implementation_info_name", coltype: ColType::Text },
    ColumnDef { name: "integer_value", coltype: ColType::Integer },
    ColumnDef { name: "character_value", coltype: ColType::Text },
    ColumnDef { name: "comments", coltype: ColType::Text },
];

const COLS_SQL_PARTS: &[ColumnDef] = &[
    ColumnDef { name: "feature_id", coltype: ColType::Text },
    ColumnDef { name: "feature_name", coltype: ColType::Text },
    ColumnDef { name: "is_supported", coltype: ColType::Text },
    ColumnDef { name: "is_verified_by", coltype: ColType::Text },
    ColumnDef { name: "comments", coltype: ColType::Text },
];

const COLS_SQL_SIZING: &[ColumnDef] = &[
    ColumnDef { name: "sizing_id", coltype: ColType::Integer },
    ColumnDef { name: "sizing_name", coltype: ColType::Text },
    ColumnDef { name: "supported_value", coltype: ColType::Integer },
    ColumnDef { name: "comments", coltype: ColType::Text },
];

pub fn register_defaults(reg: &mut Registry, config: &CatalogConfig) {
    reg.register(INFORMATION_SCHEMA, "schemata", Arc::new(schemata::Schemata::new(config)));
    reg.register(INFORMATION_SCHEMA, "tables", Arc::new(tables::Tables::new()));
    reg.register(INFORMATION_SCHEMA, "columns", Arc::new(columns::Columns::new()));

    let regs: &[(&'static str, &'static [ColumnDef])] = &[
        ("views", COLS_VIEWS),
        ("table_constraints", COLS_TABLE_CONSTRAINTS),
        ("key_column_usage", COLS_KEY_COLUMN_USAGE),
        ("routines", COLS_ROUTINES),
        ("sql_features", COLS_SQL_FEATURES),
        ("sql_implementation_info", COLS_SQL_IMPLEMENTATION_INFO),
        ("sql_parts", COLS_SQL_PARTS),
        ("sql_sizing", COLS_SQL_SIZING),
    ];
    for &(name, cols) in regs {
        reg.register(INFORMATION_SCHEMA, name, Arc::new(NoOpSystemTable::new(name, cols)));
    }
}
