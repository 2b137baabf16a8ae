//! `pg_catalog.pg_class`: tables (`relkind = 'r'`) and their indexes (`relkind = 'i'`).

use std::cell::RefCell;
use std::collections::HashSet;

use tracing::debug;

use crate::config::CatalogConfig;
use crate::context::QueryContext;
use crate::error::CatalogResult;
use crate::system_catalog::iterate::{iterate_current_database, Callbacks};
use crate::system_catalog::oid::{BTREE_AM_OID, HEAP_AM_OID};
use crate::system_catalog::registry::{ColType, ColumnDef, Partition, SystemTable};
use crate::system_catalog::rows::{Row, RowSequence, Value};

use super::index_relname;

pub struct PgClass {
    primary_key_name: String,
    owner_oid: u32,
}

impl PgClass {
    pub fn new(config: &CatalogConfig) -> Self {
        Self { primary_key_name: config.primary_key_name.clone(), owner_oid: config.default_owner_oid }
    }
}

const COLS: &[ColumnDef] = &[
    ColumnDef { name: "oid", coltype: ColType::Oid },
    ColumnDef { name: "relname", coltype: ColType::Text },
    ColumnDef { name: "relnamespace", coltype: ColType::Oid },
    ColumnDef { name: "reltype", coltype: ColType::Oid },
    ColumnDef { name: "reloftype", coltype: ColType::Oid },
    ColumnDef { name: "relowner", coltype: ColType::Oid },
    ColumnDef { name: "relam", coltype: ColType::Oid },
    ColumnDef { name: "relfilenode", coltype: ColType::Oid },
    ColumnDef { name: "reltablespace", coltype: ColType::Oid },
    ColumnDef { name: "relpages", coltype: ColType::Integer },
    ColumnDef { name: "reltuples", coltype: ColType::Real },
    ColumnDef { name: "relallvisible", coltype: ColType::Integer },
    ColumnDef { name: "reltoastrelid", coltype: ColType::Oid },
    ColumnDef { name: "relhasindex", coltype: ColType::Boolean },
    ColumnDef { name: "relisshared", coltype: ColType::Boolean },
    ColumnDef { name: "relpersistence", coltype: ColType::Char },
    ColumnDef { name: "relkind", coltype: ColType::Char },
    ColumnDef { name: "relnatts", coltype: ColType::SmallInt },
    ColumnDef { name: "relchecks", coltype: ColType::SmallInt },
    ColumnDef { name: "relhasrules", coltype: ColType::Boolean },
    ColumnDef { name: "relhastriggers", coltype: ColType::Boolean },
    ColumnDef { name: "relhassubclass", coltype: ColType::Boolean },
    ColumnDef { name: "relrowsecurity", coltype: ColType::Boolean },
    ColumnDef { name: "relforcerowsecurity", coltype: ColType::Boolean },
    ColumnDef { name: "relispopulated", coltype: ColType::Boolean },
    ColumnDef { name: "relreplident", coltype: ColType::Char },
    ColumnDef { name: "relispartition", coltype: ColType::Boolean },
    ColumnDef { name: "relrewrite", coltype: ColType::Oid },
    ColumnDef { name: "relfrozenxid", coltype: ColType::Oid },
    ColumnDef { name: "relminmxid", coltype: ColType::Oid },
    ColumnDef { name: "relacl", coltype: ColType::TextArray },
    ColumnDef { name: "reloptions", coltype: ColType::TextArray },
    ColumnDef { name: "relpartbound", coltype: ColType::Text },
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum RelKind {
    Table,
    Index,
}

impl RelKind {
    fn code(self) -> &'static str {
        match self { RelKind::Table => "r", RelKind::Index => "i" }
    }

    fn access_method(self) -> u32 {
        match self { RelKind::Table => HEAP_AM_OID, RelKind::Index => BTREE_AM_OID }
    }
}

struct ClassEntry {
    oid: u32,
    name: String,
    namespace_oid: u32,
    kind: RelKind,
    natts: i16,
}

fn project(c: &ClassEntry, has_index: bool, owner: u32) -> Row {
    vec![
        Value::Oid(c.oid),
        Value::Text(c.name.clone()),
        Value::Oid(c.namespace_oid),
        Value::Oid(0),
        Value::Oid(0),
        Value::Oid(owner),
        Value::Oid(c.kind.access_method()),
        Value::Oid(0),
        Value::Oid(0),
        Value::Int32(0),
        Value::Float32(0.0),
        Value::Int32(0),
        Value::Oid(0),
        Value::Bool(has_index),
        Value::Bool(false),
        Value::text("p"),
        Value::text(c.kind.code()),
        Value::Int16(c.natts),
        Value::Int16(0),
        Value::Bool(false),
        Value::Bool(false),
        Value::Bool(false),
        Value::Bool(false),
        Value::Bool(false),
        Value::Bool(true),
        Value::text("d"),
        Value::Bool(false),
        Value::Oid(0),
        Value::Oid(0),
        Value::Oid(0),
        Value::Null,
        Value::Null,
        Value::Null,
    ]
}

fn count(n: usize) -> i16 { i16::try_from(n).unwrap_or(i16::MAX) }

impl SystemTable for PgClass {
    fn name(&self) -> &'static str { "pg_class" }
    fn schema(&self) -> &'static [ColumnDef] { COLS }

    fn rows(&self, ctx: &QueryContext, _partition: &Partition) -> CatalogResult<RowSequence> {
        let classes: RefCell<Vec<ClassEntry>> = RefCell::new(Vec::new());
        let mut indexed: HashSet<u32> = HashSet::new();
        {
            let pk = self.primary_key_name.as_str();
            let mut cbs = Callbacks::new()
                .on_table(|_, schema, table| {
                    classes.borrow_mut().push(ClassEntry {
                        oid: table.oid,
                        name: table.name().to_string(),
                        namespace_oid: schema.oid,
                        kind: RelKind::Table,
                        natts: count(table.item.column_names().len()),
                    });
                    Ok(true)
                })
                .on_index(|_, schema, table, index| {
                    indexed.insert(table.oid);
                    classes.borrow_mut().push(ClassEntry {
                        oid: index.oid,
                        name: index_relname(table.name(), index.name(), pk),
                        namespace_oid: schema.oid,
                        kind: RelKind::Index,
                        natts: count(index.item.expressions().len()),
                    });
                    Ok(true)
                });
            iterate_current_database(ctx, &mut cbs)?;
        }
        let classes = classes.into_inner();
        debug!(target: "pgmirror::pg_catalog", "pg_class: {} relations ({} indexed tables)", classes.len(), indexed.len());
        let owner = self.owner_oid;
        Ok(RowSequence::new(classes.into_iter().map(move |c| {
            let has_index = c.kind == RelKind::Table && indexed.contains(&c.oid);
            project(&c, has_index, owner)
        })))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::{DatabaseDef, IndexDef, MemoryCatalog, SchemaDef, TableDef};
    use crate::system_catalog::oid;

    fn ctx() -> QueryContext {
        let cat = MemoryCatalog::with_databases(vec![DatabaseDef::multi(
            "shop",
            vec![SchemaDef::new(
                "public",
                vec![
                    TableDef::new("users", &["id", "email"]).with_index(IndexDef::new("primary", true, &["id"])),
                    TableDef::new("audit", &["at"]),
                ],
            )],
        )]);
        QueryContext::new(Arc::new(cat), "shop")
    }

    #[test]
    fn tables_then_their_indexes() {
        let rows: Vec<Row> = PgClass::new(&CatalogConfig::default()).rows(&ctx(), &Partition::default()).unwrap().collect();
        let names: Vec<String> = rows.iter().map(|r| r[1].to_string()).collect();
        assert_eq!(names, vec!["users", "users_pkey", "audit"]);

        let users = &rows[0];
        assert_eq!(users[0], Value::Oid(oid::table_oid("shop", "public", "users")));
        assert_eq!(users[2], Value::Oid(oid::schema_oid("shop", "public")));
        assert_eq!(users[6], Value::Oid(HEAP_AM_OID));
        assert_eq!(users[13], Value::Bool(true));
        assert_eq!(users[16], Value::text("r"));
        assert_eq!(users[17], Value::Int16(2));

        let pkey = &rows[1];
        assert_eq!(pkey[0], Value::Oid(oid::index_oid("shop", "public", "users", "primary")));
        assert_eq!(pkey[6], Value::Oid(BTREE_AM_OID));
        assert_eq!(pkey[13], Value::Bool(false));
        assert_eq!(pkey[16], Value::text("i"));

        assert_eq!(rows[2][13], Value::Bool(false));
    }

    #[test]
    fn frame_matches_schema() {
        let df = PgClass::new(&CatalogConfig::default()).build(&ctx()).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), COLS.len());
        assert_eq!(df.column("relowner").unwrap().u32().unwrap().get(0), Some(10));
    }
}
