//! pg_catalog handlers: live projections of the external catalog plus
//! column-complete stubs for the rest of the PostgreSQL catalog.

pub mod pg_attribute;
pub mod pg_class;
pub mod pg_index;
pub mod pg_indexes;
pub mod pg_namespace;
pub mod pg_tables;

use std::sync::Arc;

use crate::config::CatalogConfig;
use crate::system_catalog::iterate::split_qualified_name;
use crate::system_catalog::registry::{ColType, ColumnDef, NoOpSystemTable, Registry, PG_CATALOG};

/// Whether an index identifier marks the table's primary key.
pub fn is_primary_key(index_id: &str, primary_key_name: &str) -> bool {
    index_id.eq_ignore_ascii_case(primary_key_name)
}

/// Relation name of an index as PostgreSQL clients expect it: the primary key
/// index is `<table>_pkey`, everything else keeps its identifier.
pub fn index_relname(table: &str, index_id: &str, primary_key_name: &str) -> String {
    if is_primary_key(index_id, primary_key_name) {
        format!("{}_pkey", table)
    } else {
        index_id.to_string()
    }
}

/// Strip an optional `table.` qualifier (quotes allowed) from an index expression.
/// Anything that is not a plain or qualified column comes back trimmed but unchanged.
pub fn key_column(table: &str, expression: &str) -> String {
    let e = expression.trim();
    match split_qualified_name(e).as_deref() {
        Some([qual, col]) if qual.eq_ignore_ascii_case(table) => col.clone(),
        Some([col]) if e.starts_with('"') => col.clone(),
        _ => e.to_string(),
    }
}

/// 1-based table column positions of the index expressions; 0 for anything
/// that is not a plain column of the table.
pub fn column_positions(table: &str, columns: &[String], expressions: &[String]) -> Vec<i16> {
    expressions
        .iter()
        .map(|e| {
            let col = key_column(table, e);
            columns
                .iter()
                .position(|c| c.eq_ignore_ascii_case(&col))
                .and_then(|p| i16::try_from(p + 1).ok())
                .unwrap_or(0)
        })
        .collect()
}

const COLS_PG_AM: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "amname", coltype: ColType::Text },
    ColumnDef { name: "amhandler", coltype: ColType::Oid },
    ColumnDef { name: "amtype", coltype: ColType::Char },
];
const COLS_PG_AMOP: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "amopfamily", coltype: ColType::Oid },
    ColumnDef { name: "amoplefttype", coltype: ColType::Oid },
    ColumnDef { name: "amoprighttype", coltype: ColType::Oid },
    ColumnDef { name: "amopstrategy", coltype: ColType::SmallInt },
    ColumnDef { name: "amoppurpose", coltype: ColType::Char },
    ColumnDef { name: "amopopr", coltype: ColType::Oid },
    ColumnDef { name: "amopmethod", coltype: ColType::Oid },
    ColumnDef { name: "amopsortfamily", coltype: ColType::Oid },
];
const COLS_PG_AMPROC: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "amprocfamily", coltype: ColType::Oid },
    ColumnDef { name: "amproclefttype", coltype: ColType::Oid },
    ColumnDef { name: "amprocrighttype", coltype: ColType::Oid },
    ColumnDef { name: "amprocnum", coltype: ColType::SmallInt },
    ColumnDef { name: "amproc", coltype: ColType::Oid },
];
const COLS_PG_OPERATOR: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "oprname", coltype: ColType::Text },
    ColumnDef { name: "oprnamespace", coltype: ColType::Oid },
    ColumnDef { name: "oprleft", coltype: ColType::Oid },
    ColumnDef { name: "oprright", coltype: ColType::Oid },
    ColumnDef { name: "oprresult", coltype: ColType::Oid },
    ColumnDef { name: "oprcom", coltype: ColType::Oid },
    ColumnDef { name: "oprnegate", coltype: ColType::Oid },
];
const COLS_PG_OPCLASS: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "opcmethod", coltype: ColType::Oid },
    ColumnDef { name: "opcname", coltype: ColType::Text },
    ColumnDef { name: "opcnamespace", coltype: ColType::Oid },
    ColumnDef { name: "opcfamily", coltype: ColType::Oid },
    ColumnDef { name: "opcintype", coltype: ColType::Oid },
    ColumnDef { name: "opcdefault", coltype: ColType::Boolean },
    ColumnDef { name: "opckeytype", coltype: ColType::Oid },
];
const COLS_PG_OPFAMILY: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "opfmethod", coltype: ColType::Oid },
    ColumnDef { name: "opfname", coltype: ColType::Text },
    ColumnDef { name: "opfnamespace", coltype: ColType::Oid },
];
const COLS_PG_COLLATION: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "collname", coltype: ColType::Text },
    ColumnDef { name: "collnamespace", coltype: ColType::Oid },
    ColumnDef { name: "collprovider", coltype: ColType::Char },
];
const COLS_PG_CONVERSION: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "conname", coltype: ColType::Text },
    ColumnDef { name: "connamespace", coltype: ColType::Oid },
];
const COLS_PG_LANGUAGE: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "lanname", coltype: ColType::Text },
    ColumnDef { name: "lanowner", coltype: ColType::Oid },
    ColumnDef { name: "lanispl", coltype: ColType::Boolean },
];
const COLS_PG_INHERITS: &[ColumnDef] = &[
    ColumnDef { name: "inhrelid", coltype: ColType::Oid },
    ColumnDef { name: "inhparent", coltype: ColType::Oid },
    ColumnDef { name: "inhseqno", coltype: ColType::Integer },
];
const COLS_PG_REWRITE: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "rulename", coltype: ColType::Text },
    ColumnDef { name: "ev_class", coltype: ColType::Oid },
    ColumnDef { name: "ev_type", coltype: ColType::Char },
];
const COLS_PG_TRIGGER: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "tgrelid", coltype: ColType::Oid },
    ColumnDef { name: "tgname", coltype: ColType::Text },
    ColumnDef { name: "tgenabled", coltype: ColType::Char },
    ColumnDef { name: "tgisinternal", coltype: ColType::Boolean },
];
const COLS_PG_TABLESPACE: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "spcname", coltype: ColType::Text },
    ColumnDef { name: "spcowner", coltype: ColType::Oid },
];
const COLS_PG_CAST: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "castsource", coltype: ColType::Oid },
    ColumnDef { name: "casttarget", coltype: ColType::Oid },
    ColumnDef { name: "castfunc", coltype: ColType::Oid },
    ColumnDef { name: "castcontext", coltype: ColType::Char },
    ColumnDef { name: "castmethod", coltype: ColType::Char },
];
const COLS_PG_ENUM: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "enumtypid", coltype: ColType::Oid },
    ColumnDef { name: "enumsortorder", coltype: ColType::Real },
    ColumnDef { name: "enumlabel", coltype: ColType::Text },
];
const COLS_PG_RANGE: &[ColumnDef] = &[
    ColumnDef { name: "rngtypid", coltype: ColType::Oid },
    ColumnDef { name: "rngsubtype", coltype: ColType::Oid },
    ColumnDef { name: "rngmultitypid", coltype: ColType::Oid },
];
const COLS_PG_EXTENSION: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "extname", coltype: ColType::Text },
    ColumnDef { name: "extowner", coltype: ColType::Oid },
    ColumnDef { name: "extnamespace", coltype: ColType::Oid },
    ColumnDef { name: "extversion", coltype: ColType::Text },
];
const COLS_PG_FOREIGN_DATA_WRAPPER: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "fdwname", coltype: ColType::Text },
    ColumnDef { name: "fdwowner", coltype: ColType::Oid },
];
const COLS_PG_FOREIGN_SERVER: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "srvname", coltype: ColType::Text },
    ColumnDef { name: "srvowner", coltype: ColType::Oid },
    ColumnDef { name: "srvfdw", coltype: ColType::Oid },
];
const COLS_PG_FOREIGN_TABLE: &[ColumnDef] = &[
    ColumnDef { name: "ftrelid", coltype: ColType::Oid },
    ColumnDef { name: "ftserver", coltype: ColType::Oid },
    ColumnDef { name: "ftoptions", coltype: ColType::TextArray },
];
const COLS_PG_TS_CONFIG: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "cfgname", coltype: ColType::Text },
    ColumnDef { name: "cfgnamespace", coltype: ColType::Oid },
];
const COLS_PG_TS_DICT: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "dictname", coltype: ColType::Text },
    ColumnDef { name: "dictnamespace", coltype: ColType::Oid },
];
const COLS_PG_TS_PARSER: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "prsname", coltype: ColType::Text },
    ColumnDef { name: "prsnamespace", coltype: ColType::Oid },
];
const COLS_PG_TS_TEMPLATE: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "tmplname", coltype: ColType::Text },
    ColumnDef { name: "tmplnamespace", coltype: ColType::Oid },
];
const COLS_PG_DESCRIPTION: &[ColumnDef] = &[
    ColumnDef { name: "objoid", coltype: ColType::Oid },
    ColumnDef { name: "classoid", coltype: ColType::Oid },
    ColumnDef { name: "objsubid", coltype: ColType::Integer },
    ColumnDef { name: "description", coltype: ColType::Text },
];
const COLS_PG_SHDESCRIPTION: &[ColumnDef] = &[
    ColumnDef { name: "objoid", coltype: ColType::Oid },
    ColumnDef { name: "classoid", coltype: ColType::Oid },
    ColumnDef { name: "description", coltype: ColType::Text },
];
const COLS_PG_DEPEND: &[ColumnDef] = &[
    ColumnDef { name: "classid", coltype: ColType::Oid },
    ColumnDef { name: "objid", coltype: ColType::Oid },
    ColumnDef { name: "objsubid", coltype: ColType::Integer },
    ColumnDef { name: "refclassid", coltype: ColType::Oid },
    ColumnDef { name: "refobjid", coltype: ColType::Oid },
    ColumnDef { name: "refobjsubid", coltype: ColType::Integer },
    ColumnDef { name: "deptype", coltype: ColType::Char },
];
const COLS_PG_ATTRDEF: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "adrelid", coltype: ColType::Oid },
    ColumnDef { name: "adnum", coltype: ColType::SmallInt },
    ColumnDef { name: "adbin", coltype: ColType::Text },
];
const COLS_PG_CONSTRAINT: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "conname", coltype: ColType::Text },
    ColumnDef { name: "connamespace", coltype: ColType::Oid },
    ColumnDef { name: "contype", coltype: ColType::Char },
    ColumnDef { name: "condeferrable", coltype: ColType::Boolean },
    ColumnDef { name: "condeferred", coltype: ColType::Boolean },
    ColumnDef { name: "convalidated", coltype: ColType::Boolean },
    ColumnDef { name: "conrelid", coltype: ColType::Oid },
    ColumnDef { name: "conindid", coltype: ColType::Oid },
    ColumnDef { name: "confrelid", coltype: ColType::Oid },
    ColumnDef { name: "conkey", coltype: ColType::Int2Vector },
    ColumnDef { name: "confkey", coltype: ColType::Int2Vector },
];
const COLS_PG_TYPE: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "typname", coltype: ColType::Text },
    ColumnDef { name: "typnamespace", coltype: ColType::Oid },
    ColumnDef { name: "typowner", coltype: ColType::Oid },
    ColumnDef { name: "typlen", coltype: ColType::SmallInt },
    ColumnDef { name: "typbyval", coltype: ColType::Boolean },
    ColumnDef { name: "typtype", coltype: ColType::Char },
    ColumnDef { name: "typcategory", coltype: ColType::Char },
    ColumnDef { name: "typrelid", coltype: ColType::Oid },
    ColumnDef { name: "typelem", coltype: ColType::Oid },
    ColumnDef { name: "typarray", coltype: ColType::Oid },
    ColumnDef { name: "typbasetype", coltype: ColType::Oid },
    ColumnDef { name: "typtypmod", coltype: ColType::Integer },
];
const COLS_PG_PROC: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "proname", coltype: ColType::Text },
    ColumnDef { name: "pronamespace", coltype: ColType::Oid },
    ColumnDef { name: "proowner", coltype: ColType::Oid },
    ColumnDef { name: "prolang", coltype: ColType::Oid },
    ColumnDef { name: "prokind", coltype: ColType::Char },
    ColumnDef { name: "proretset", coltype: ColType::Boolean },
    ColumnDef { name: "pronargs", coltype: ColType::SmallInt },
    ColumnDef { name: "prorettype", coltype: ColType::Oid },
    ColumnDef { name: "prosrc", coltype: ColType::Text },
];
const COLS_PG_AGGREGATE: &[ColumnDef] = &[
    ColumnDef { name: "aggfnoid", coltype: ColType::Oid },
    ColumnDef { name: "aggkind", coltype: ColType::Char },
    ColumnDef { name: "aggnumdirectargs", coltype: ColType::SmallInt },
    ColumnDef { name: "aggtransfn", coltype: ColType::Oid },
    ColumnDef { name: "aggfinalfn", coltype: ColType::Oid },
    ColumnDef { name: "aggtranstype", coltype: ColType::Oid },
];
const COLS_PG_DATABASE: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "datname", coltype: ColType::Text },
    ColumnDef { name: "datdba", coltype: ColType::Oid },
    ColumnDef { name: "encoding", coltype: ColType::Integer },
    ColumnDef { name: "datistemplate", coltype: ColType::Boolean },
    ColumnDef { name: "datallowconn", coltype: ColType::Boolean },
    ColumnDef { name: "datconnlimit", coltype: ColType::Integer },
    ColumnDef { name: "dattablespace", coltype: ColType::Oid },
    ColumnDef { name: "datcollate", coltype: ColType::Text },
    ColumnDef { name: "datctype", coltype: ColType::Text },
];
const COLS_PG_ROLES: &[ColumnDef] = &[
    ColumnDef { name: "rolname", coltype: ColType::Text },
    ColumnDef { name: "rolsuper", coltype: ColType::Boolean },
    ColumnDef { name: "rolinherit", coltype: ColType::Boolean },
    ColumnDef { name: "rolcreaterole", coltype: ColType::Boolean },
    ColumnDef { name: "rolcreatedb", coltype: ColType::Boolean },
    ColumnDef { name: "rolcanlogin", coltype: ColType::Boolean },
    ColumnDef { name: "rolreplication", coltype: ColType::Boolean },
    ColumnDef { name: "rolconnlimit", coltype: ColType::Integer },
    ColumnDef { name: "rolbypassrls", coltype: ColType::Boolean },
    ColumnDef { name: "oid", coltype: ColType::Oid },
];
const COLS_PG_AUTHID: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "rolname", coltype: ColType::Text },
    ColumnDef { name: "rolsuper", coltype: ColType::Boolean },
    ColumnDef { name: "rolinherit", coltype: ColType::Boolean },
    ColumnDef { name: "rolcanlogin", coltype: ColType::Boolean },
    ColumnDef { name: "rolconnlimit", coltype: ColType::Integer },
];
const COLS_PG_AUTH_MEMBERS: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "roleid", coltype: ColType::Oid },
    ColumnDef { name: "member", coltype: ColType::Oid },
    ColumnDef { name: "grantor", coltype: ColType::Oid },
    ColumnDef { name: "admin_option", coltype: ColType::Boolean },
];
const COLS_PG_VIEWS: &[ColumnDef] = &[
    ColumnDef { name: "schemaname", coltype: ColType::Text },
    ColumnDef { name: "viewname", coltype: ColType::Text },
    ColumnDef { name: "viewowner", coltype: ColType::Text },
    ColumnDef { name: "definition", coltype: ColType::Text },
];
const COLS_PG_SEQUENCE: &[ColumnDef] = &[
    ColumnDef { name: "seqrelid", coltype: ColType::Oid },
    ColumnDef { name: "seqtypid", coltype: ColType::Oid },
    ColumnDef { name: "seqstart", coltype: ColType::BigInt },
    ColumnDef { name: "seqincrement", coltype: ColType::BigInt },
    ColumnDef { name: "seqmax", coltype: ColType::BigInt },
    ColumnDef { name: "seqmin", coltype: ColType::BigInt },
    ColumnDef { name: "seqcache", coltype: ColType::BigInt },
    ColumnDef { name: "seqcycle", coltype: ColType::Boolean },
];
const COLS_PG_SETTINGS: &[ColumnDef] = &[
    ColumnDef { name: "name", coltype: ColType::Text },
    ColumnDef { name: "setting", coltype: ColType::Text },
    ColumnDef { name: "unit", coltype: ColType::Text },
    ColumnDef { name: "category", coltype: ColType::Text },
    ColumnDef { name: "short_desc", coltype: ColType::Text },
    ColumnDef { name: "context", coltype: ColType::Text },
    ColumnDef { name: "vartype", coltype: ColType::Text },
];
const COLS_PG_STATISTIC_EXT: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "stxrelid", coltype: ColType::Oid },
    ColumnDef { name: "stxname", coltype: ColType::Text },
    ColumnDef { name: "stxnamespace", coltype: ColType::Oid },
    ColumnDef { name: "stxkeys", coltype: ColType::Int2Vector },
];
const COLS_PG_POLICY: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "polname", coltype: ColType::Text },
    ColumnDef { name: "polrelid", coltype: ColType::Oid },
    ColumnDef { name: "polcmd", coltype: ColType::Char },
    ColumnDef { name: "polpermissive", coltype: ColType::Boolean },
];
const COLS_PG_MATVIEWS: &[ColumnDef] = &[
    ColumnDef { name: "schemaname", coltype: ColType::Text },
    ColumnDef { name: "matviewname", coltype: ColType::Text },
    ColumnDef { name: "matviewowner", coltype: ColType::Text },
    ColumnDef { name: "hasindexes", coltype: ColType::Boolean },
    ColumnDef { name: "ispopulated", coltype: ColType::Boolean },
    ColumnDef { name: "definition", coltype: ColType::Text },
];

pub fn register_defaults(reg: &mut Registry, config: &CatalogConfig) {
    // Live handlers first, so a stub can never shadow them
    reg.register(PG_CATALOG, "pg_index", Arc::new(pg_index::PgIndex::new(config)));
    reg.register(PG_CATALOG, "pg_namespace", Arc::new(pg_namespace::PgNamespace::new(config)));
    reg.register(PG_CATALOG, "pg_class", Arc::new(pg_class::PgClass::new(config)));
    reg.register(PG_CATALOG, "pg_tables", Arc::new(pg_tables::PgTables::new(config)));
    reg.register(PG_CATALOG, "pg_indexes", Arc::new(pg_indexes::PgIndexes::new(config)));
    reg.register(PG_CATALOG, "pg_attribute", Arc::new(pg_attribute::PgAttribute::new()));

    let regs: &[(&'static str, &'static [ColumnDef])] = &[
        ("pg_am", COLS_PG_AM),
        ("pg_amop", COLS_PG_AMOP),
        ("pg_amproc", COLS_PG_AMPROC),
        ("pg_operator", COLS_PG_OPERATOR),
        ("pg_opclass", COLS_PG_OPCLASS),
        ("pg_opfamily", COLS_PG_OPFAMILY),
        ("pg_collation", COLS_PG_COLLATION),
        ("pg_conversion", COLS_PG_CONVERSION),
        ("pg_language", COLS_PG_LANGUAGE),
        ("pg_inherits", COLS_PG_INHERITS),
        ("pg_rewrite", COLS_PG_REWRITE),
        ("pg_trigger", COLS_PG_TRIGGER),
        ("pg_tablespace", COLS_PG_TABLESPACE),
        ("pg_cast", COLS_PG_CAST),
        ("pg_enum", COLS_PG_ENUM),
        ("pg_range", COLS_PG_RANGE),
        ("pg_extension", COLS_PG_EXTENSION),
        ("pg_foreign_data_wrapper", COLS_PG_FOREIGN_DATA_WRAPPER),
        ("pg_foreign_server", COLS_PG_FOREIGN_SERVER),
        ("pg_foreign_table", COLS_PG_FOREIGN_TABLE),
        ("pg_ts_config", COLS_PG_TS_CONFIG),
        ("pg_ts_dict", COLS_PG_TS_DICT),
        ("pg_ts_parser", COLS_PG_TS_PARSER),
        ("pg_ts_template", COLS_PG_TS_TEMPLATE),
        ("pg_description", COLS_PG_DESCRIPTION),
        ("pg_shdescription", COLS_PG_SHDESCRIPTION),
        ("pg_depend", COLS_PG_DEPEND),
        ("pg_attrdef", COLS_PG_ATTRDEF),
        ("pg_constraint", COLS_PG_CONSTRAINT),
        ("pg_type", COLS_PG_TYPE),
        ("pg_proc", COLS_PG_PROC),
        ("pg_aggregate", COLS_PG_AGGREGATE),
        ("pg_database", COLS_PG_DATABASE),
        ("pg_roles", COLS_PG_ROLES),
        ("pg_authid", COLS_PG_AUTHID),
        ("pg_auth_members", COLS_PG_AUTH_MEMBERS),
        ("pg_views", COLS_PG_VIEWS),
        ("pg_matviews", COLS_PG_MATVIEWS),
        ("pg_sequence", COLS_PG_SEQUENCE),
        ("pg_settings", COLS_PG_SETTINGS),
        ("pg_statistic_ext", COLS_PG_STATISTIC_EXT),
        ("pg_policy", COLS_PG_POLICY),
    ];
    for &(name, cols) in regs {
        reg.register(PG_CATALOG, name, Arc::new(NoOpSystemTable::new(name, cols)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_key_naming() {
        assert!(is_primary_key("primary", "PRIMARY"));
        assert_eq!(index_relname("users", "PRIMARY", "PRIMARY"), "users_pkey");
        assert_eq!(index_relname("users", "users_email", "PRIMARY"), "users_email");
    }

    #[test]
    fn positions_are_one_based() {
        let cols: Vec<String> = ["id", "email", "name"].iter().map(|s| s.to_string()).collect();
        let exprs: Vec<String> = ["users.name", "ID", "lower(email)", "other.id"].iter().map(|s| s.to_string()).collect();
        assert_eq!(column_positions("users", &cols, &exprs), vec![3, 1, 0, 0]);
        assert!(column_positions("users", &cols, &[]).is_empty());
    }

    #[test]
    fn quoted_qualifiers_are_stripped() {
        assert_eq!(key_column("my.t", "\"my.t\".id"), "id");
        assert_eq!(key_column("users", "\"email\""), "email");
        assert_eq!(key_column("users", "lower(users.email)"), "lower(users.email)");
        assert_eq!(key_column("users", " a + b "), "a + b");
        let cols: Vec<String> = vec!["id".into(), "odd.col".into()];
        let exprs: Vec<String> = vec!["\"my.t\".\"odd.col\"".into(), "\"my.t\".id".into()];
        assert_eq!(column_positions("my.t", &cols, &exprs), vec![2, 1]);
    }
}
