use std::sync::Arc;

use pgmirror::catalog::{CatalogProvider, Database, MemoryCatalog, Table};
use pgmirror::system_catalog::oid::{derive_oid, index_oid, schema_oid, table_oid};
use pgmirror::system_catalog::registry::Partition;
use pgmirror::system_catalog::rows::Value;
use pgmirror::{tprintln, CatalogConfig, CatalogError, CatalogResult, QueryContext, Registry, TableStatus};

const FIXTURE: &str = r#"{
  "databases": [
    {
      "name": "shop",
      "schemas": [
        { "name": "public", "tables": [
          { "name": "customers", "columns": ["id", "email", "name"],
            "indexes": [
              { "name": "PRIMARY", "unique": true, "columns": ["id"] },
              { "name": "customers_email", "unique": true, "columns": ["customers.email"] }
            ] },
          { "name": "orders", "columns": ["id", "customer_id", "total"],
            "indexes": [
              { "name": "PRIMARY", "unique": true, "columns": ["id"] },
              { "name": "orders_customer", "columns": ["customer_id", "id"] }
            ] }
        ] },
        { "name": "audit", "tables": [ { "name": "events", "columns": ["at", "what"] } ] }
      ]
    },
    { "name": "kv", "tables": [ { "name": "pairs", "columns": ["k", "v"], "indexes": [ { "name": "PRIMARY", "unique": true, "columns": ["k"] } ] } ] }
  ]
}"#;

fn load_fixture() -> (tempfile::TempDir, MemoryCatalog) {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("catalog.json");
    std::fs::write(&path, FIXTURE).unwrap();
    let cat = MemoryCatalog::from_json_file(&path).unwrap();
    (tmp, cat)
}

fn context(db: &str) -> (tempfile::TempDir, QueryContext) {
    let (tmp, cat) = load_fixture();
    (tmp, QueryContext::new(Arc::new(cat), db))
}

#[test]
fn pg_index_projects_every_index() {
    let (_tmp, ctx) = context("shop");
    let reg = Registry::with_defaults(&CatalogConfig::default());
    let pg_index = reg.lookup_from_str("pg_catalog.pg_index").unwrap();
    assert_eq!(pg_index.status(), TableStatus::Live);

    let rows: Vec<Vec<Value>> = pg_index.rows(&ctx, &Partition::default()).unwrap().collect();
    assert_eq!(rows.len(), 4);

    let expected = [
        ("customers", "PRIMARY", true, vec![1]),
        ("customers", "customers_email", false, vec![2]),
        ("orders", "PRIMARY", true, vec![1]),
        ("orders", "orders_customer", false, vec![2, 1]),
    ];
    for (row, (table, index, primary, keys)) in rows.iter().zip(expected.iter()) {
        assert_eq!(row[0], Value::Oid(index_oid("shop", "public", table, index)));
        assert_eq!(row[1], Value::Oid(table_oid("shop", "public", table)));
        assert_eq!(row[6], Value::Bool(*primary));
        assert_eq!(row[15], Value::Int2Vector(keys.clone()));
    }
    assert_eq!(rows[3][4], Value::Bool(false));
}

#[test]
fn oids_agree_across_tables() {
    let (_tmp, ctx) = context("shop");
    let reg = Registry::with_defaults(&CatalogConfig::default());

    let class = reg.lookup_from_str("pg_class").unwrap().build(&ctx).unwrap();
    let ns = reg.lookup_from_str("pg_namespace").unwrap().build(&ctx).unwrap();
    let idx = reg.lookup_from_str("pg_index").unwrap().build(&ctx).unwrap();
    tprintln!("{}", class);

    let class_oids: Vec<u32> = class.column("oid").unwrap().u32().unwrap().into_no_null_iter().collect();
    for o in idx.column("indexrelid").unwrap().u32().unwrap().into_no_null_iter() {
        assert!(class_oids.contains(&o));
    }
    for o in idx.column("indrelid").unwrap().u32().unwrap().into_no_null_iter() {
        assert!(class_oids.contains(&o));
    }
    let ns_oids: Vec<u32> = ns.column("oid").unwrap().u32().unwrap().into_no_null_iter().collect();
    assert_eq!(ns_oids, vec![schema_oid("shop", "public"), schema_oid("shop", "audit")]);
    for o in class.column("relnamespace").unwrap().u32().unwrap().into_no_null_iter() {
        assert!(ns_oids.contains(&o));
    }
    assert!(class_oids.iter().all(|o| o & 0x8000_0000 != 0));
}

#[test]
fn column_catalogs_are_live() {
    let (_tmp, ctx) = context("shop");
    let reg = Registry::with_defaults(&CatalogConfig::default());

    let attr = reg.lookup_from_str("pg_catalog.pg_attribute").unwrap();
    assert_eq!(attr.status(), TableStatus::Live);
    let rows: Vec<_> = attr.rows(&ctx, &Partition::default()).unwrap().collect();
    // customers(3) + orders(3) + events(2)
    assert_eq!(rows.len(), 8);
    let customers = Value::Oid(table_oid("shop", "public", "customers"));
    let attnames: Vec<String> = rows.iter().filter(|r| r[0] == customers).map(|r| r[1].to_string()).collect();
    assert_eq!(attnames, vec!["id", "email", "name"]);
    assert_eq!(rows[2][4], Value::Int16(3));
    assert_eq!(rows[6][0], Value::Oid(table_oid("shop", "audit", "events")));

    let cols = reg.lookup_from_str("information_schema.columns").unwrap();
    assert_eq!(cols.status(), TableStatus::Live);
    let df = cols.build(&ctx).unwrap();
    assert_eq!(df.height(), 8);
    let tables = df.column("table_name").unwrap().str().unwrap();
    let names = df.column("column_name").unwrap().str().unwrap();
    let positions = df.column("ordinal_position").unwrap().i32().unwrap();
    assert_eq!((tables.get(4), names.get(4), positions.get(4)), (Some("orders"), Some("customer_id"), Some(2)));
    assert_eq!(df.column("table_catalog").unwrap().str().unwrap().get(0), Some("shop"));
}

#[test]
fn single_schema_database_uses_implicit_schema() {
    let (_tmp, ctx) = context("kv");
    let reg = Registry::with_defaults(&CatalogConfig::default());
    let rows: Vec<_> = reg.lookup_from_str("pg_index").unwrap().rows(&ctx, &Partition::default()).unwrap().collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], Value::Oid(derive_oid(&["kv", "kv", "pairs", "PRIMARY"])));
    let ns: Vec<_> = reg.lookup_from_str("pg_namespace").unwrap().rows(&ctx, &Partition::default()).unwrap().collect();
    assert_eq!(ns[0][1], Value::text("kv"));
}

#[test]
fn stubs_answer_with_no_rows() {
    let (_tmp, ctx) = context("shop");
    let reg = Registry::with_defaults(&CatalogConfig::default());
    for name in ["pg_am", "pg_attrdef", "pg_constraint", "pg_type", "information_schema.views"] {
        let t = reg.lookup_from_str(name).unwrap();
        assert_eq!(t.status(), TableStatus::Stub, "{name}");
        let df = t.build(&ctx).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), t.schema().len());
    }
}

#[test]
fn missing_database_surfaces_as_not_found() {
    let (_tmp, ctx) = context("nope");
    let reg = Registry::with_defaults(&CatalogConfig::default());
    let err = reg.lookup_from_str("pg_class").unwrap().build(&ctx).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.pgwire_fields().0, "3D000");
}

#[test]
fn cancelled_query_produces_no_rows() {
    let (_tmp, ctx) = context("shop");
    ctx.cancel_handle().cancel();
    let reg = Registry::with_defaults(&CatalogConfig::default());
    let err = reg.lookup_from_str("pg_index").unwrap().build(&ctx).unwrap_err();
    assert_eq!(err, CatalogError::Cancelled);
}

struct BrokenCatalog;

struct BrokenDb;

impl CatalogProvider for BrokenCatalog {
    fn database(&self, _name: &str) -> CatalogResult<Arc<dyn Database>> {
        Ok(Arc::new(BrokenDb))
    }
}

impl Database for BrokenDb {
    fn name(&self) -> &str { "broken" }
    fn table_names(&self) -> CatalogResult<Vec<String>> {
        Err(CatalogError::collaborator("storage_offline", "table listing failed"))
    }
    fn table(&self, _name: &str) -> CatalogResult<Option<Arc<dyn Table>>> { Ok(None) }
}

#[test]
fn collaborator_errors_propagate_unchanged() {
    let ctx = QueryContext::new(Arc::new(BrokenCatalog), "broken");
    let reg = Registry::with_defaults(&CatalogConfig::default());
    for name in ["pg_index", "pg_class", "pg_tables", "pg_attribute", "information_schema.tables", "information_schema.columns"] {
        let err = reg.lookup_from_str(name).unwrap().rows(&ctx, &Partition::default()).err().unwrap();
        assert_eq!(err.code_str(), "storage_offline", "{name}");
    }
    // schema-level handlers never list tables
    let ns = reg.lookup_from_str("pg_namespace").unwrap().build(&ctx).unwrap();
    assert_eq!(ns.height(), 1);
}

#[test]
fn configured_primary_key_name_marks_primary() {
    let (_tmp, ctx) = context("shop");
    let cfg = CatalogConfig::from_json_str(r#"{ "primary_key_name": "customers_email" }"#).unwrap();
    let reg = Registry::with_defaults(&cfg);
    let rows: Vec<_> = reg.lookup_from_str("pg_index").unwrap().rows(&ctx, &Partition::default()).unwrap().collect();
    let primaries: Vec<bool> = rows.iter().map(|r| r[6].as_bool().unwrap()).collect();
    assert_eq!(primaries, vec![false, true, false, false]);
}
