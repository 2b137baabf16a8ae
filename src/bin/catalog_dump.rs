//!
//! pgmirror catalog_dump
//! ---------------------
//! Loads a JSON catalog fixture and prints one virtual catalog table, lists the
//! registered tables, or resolves a surrogate OID back to its object.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use pgmirror::catalog::MemoryCatalog;
use pgmirror::system_catalog::iterate::{resolve_oid, CatalogObject};
use pgmirror::{CatalogConfig, QueryContext, Registry};

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    let mut i = 0;
    while i < args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
        i += 1;
    }
    None
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn describe(obj: &CatalogObject) -> String {
    match obj {
        CatalogObject::Schema { schema, .. } => format!("schema {}", schema),
        CatalogObject::Table { schema, table, .. } => format!("table {}.{}", schema, table),
        CatalogObject::Index { schema, table, index, .. } => format!("index {} on {}.{}", index, schema, table),
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args: Vec<String> = env::args().skip(1).collect();
    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        println!("usage: catalog_dump --fixture <path> [--database <name>] [--table <name>] [--oid <n>] [--list]");
        return Ok(());
    }

    let config = CatalogConfig::from_env()?;
    let registry = Registry::with_defaults(&config);

    if has_flag(&args, "--list") {
        for (schema, name, table) in registry.all() {
            println!("{}.{}\t{:?}", schema, name, table.status());
        }
        return Ok(());
    }

    let fixture = arg_value(&args, "--fixture")
        .or_else(|| env::var("PGMIRROR_FIXTURE").ok())
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("no catalog fixture: pass --fixture <path> or set PGMIRROR_FIXTURE"))?;
    let catalog = MemoryCatalog::from_json_file(&fixture)?;
    let database = match arg_value(&args, "--database") {
        Some(d) => d,
        None => catalog
            .database_names()
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("fixture {} defines no databases", fixture.display()))?,
    };
    info!(target: "pgmirror", "catalog_dump: fixture='{}' database='{}'", fixture.display(), database);

    let ctx = QueryContext::new(Arc::new(catalog), database).with_search_path(config.search_path.clone());

    if let Some(raw) = arg_value(&args, "--oid") {
        let target: u32 = raw.parse().map_err(|e| anyhow!("invalid --oid '{}': {}", raw, e))?;
        match resolve_oid(&ctx, target)? {
            Some(obj) => println!("{}\t{}", obj.oid(), describe(&obj)),
            None => println!("{}\tnot found", target),
        }
        return Ok(());
    }

    let name = arg_value(&args, "--table").unwrap_or_else(|| "pg_catalog.pg_index".to_string());
    let table = registry.lookup_from_str(&name).ok_or_else(|| anyhow!("unknown catalog table '{}'", name))?;
    let df = table.build(&ctx)?;
    println!("{}", df);
    Ok(())
}
