//! Catalog traversal shared by every live catalog handler.
//!
//! The current database is walked depth-first (schema, then each of its tables,
//! then each table's indexes) and each object is handed to the matching
//! callback together with its surrogate OID. Only the levels needed by the
//! callbacks that are present get listed. A callback returning `false` ends the
//! whole traversal, not just the level it was called from. Collaborator errors
//! and callback errors abort immediately and are returned unchanged.

use std::cell::RefCell;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::catalog::{Database, ImplicitSchema, Index, Schema, Table};
use crate::context::QueryContext;
use crate::error::{CatalogError, CatalogResult};
use crate::system_catalog::oid;

pub struct ItemSchema {
    /// Position in the database's native schema order.
    pub index: usize,
    pub oid: u32,
    pub item: Arc<dyn Schema>,
}

impl ItemSchema {
    pub fn name(&self) -> &str { self.item.name() }

    pub fn is_system_schema(&self) -> bool {
        let n = self.item.name();
        n == "pg_catalog" || n == "information_schema"
    }
}

pub struct ItemTable {
    /// Position in the schema's native table order.
    pub index: usize,
    pub oid: u32,
    pub item: Arc<dyn Table>,
}

impl ItemTable {
    pub fn name(&self) -> &str { self.item.name() }
}

pub struct ItemIndex {
    /// Position among the owning table's indexes.
    pub index: usize,
    pub oid: u32,
    pub item: Arc<dyn Index>,
}

impl ItemIndex {
    pub fn name(&self) -> &str { self.item.id() }
}

pub type SchemaCallback<'a> = Box<dyn FnMut(&QueryContext, &ItemSchema) -> CatalogResult<bool> + 'a>;
pub type TableCallback<'a> = Box<dyn FnMut(&QueryContext, &ItemSchema, &ItemTable) -> CatalogResult<bool> + 'a>;
pub type IndexCallback<'a> = Box<dyn FnMut(&QueryContext, &ItemSchema, &ItemTable, &ItemIndex) -> CatalogResult<bool> + 'a>;

/// Per-kind callbacks; leave unset the ones that are not needed.
#[derive(Default)]
pub struct Callbacks<'a> {
    pub schema: Option<SchemaCallback<'a>>,
    pub table: Option<TableCallback<'a>>,
    pub index: Option<IndexCallback<'a>>,
    /// When non-empty, only these schemas are visited, in this order. Ignored
    /// for single-schema databases, whose implicit schema is always visited.
    pub search_schemas: Vec<String>,
}

impl<'a> Callbacks<'a> {
    pub fn new() -> Self { Self::default() }

    pub fn on_schema<F>(mut self, f: F) -> Self
    where
        F: FnMut(&QueryContext, &ItemSchema) -> CatalogResult<bool> + 'a,
    {
        self.schema = Some(Box::new(f));
        self
    }

    pub fn on_table<F>(mut self, f: F) -> Self
    where
        F: FnMut(&QueryContext, &ItemSchema, &ItemTable) -> CatalogResult<bool> + 'a,
    {
        self.table = Some(Box::new(f));
        self
    }

    pub fn on_index<F>(mut self, f: F) -> Self
    where
        F: FnMut(&QueryContext, &ItemSchema, &ItemTable, &ItemIndex) -> CatalogResult<bool> + 'a,
    {
        self.index = Some(Box::new(f));
        self
    }

    pub fn with_search_schemas(mut self, schemas: Vec<String>) -> Self {
        self.search_schemas = schemas;
        self
    }

    fn iterates_over_schemas(&self) -> bool {
        self.schema.is_some() || self.iterates_over_tables()
    }

    fn iterates_over_tables(&self) -> bool {
        self.table.is_some() || self.index.is_some()
    }
}

#[derive(PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

#[derive(Default)]
struct Visits {
    schemas: usize,
    tables: usize,
    indexes: usize,
}

/// Traverse the context's current database. Returns the resolved database.
pub fn iterate_current_database(ctx: &QueryContext, callbacks: &mut Callbacks<'_>) -> CatalogResult<Arc<dyn Database>> {
    iterate_database(ctx, ctx.current_database(), callbacks)
}

pub fn iterate_database(ctx: &QueryContext, database: &str, callbacks: &mut Callbacks<'_>) -> CatalogResult<Arc<dyn Database>> {
    ctx.check_cancelled()?;
    let db = ctx.catalog().database(database)?;
    if !callbacks.iterates_over_schemas() {
        return Ok(db);
    }
    debug!(target: "pgmirror::iterate", "traversal start: database='{}' schema_cb={} table_cb={} index_cb={}",
        db.name(), callbacks.schema.is_some(), callbacks.table.is_some(), callbacks.index.is_some());

    let schemas = ordered_schemas(&db, &callbacks.search_schemas)?;
    let mut visits = Visits::default();
    let flow = iterate_schemas(ctx, db.name(), callbacks, schemas, &mut visits)?;
    debug!(target: "pgmirror::iterate", "traversal done: database='{}' schemas={} tables={} indexes={} stopped_early={}",
        db.name(), visits.schemas, visits.tables, visits.indexes, flow == Flow::Stop);
    Ok(db)
}

fn ordered_schemas(db: &Arc<dyn Database>, search: &[String]) -> CatalogResult<Vec<(usize, Arc<dyn Schema>)>> {
    let all: Vec<Arc<dyn Schema>> = match db.as_schema_database() {
        Some(sdb) => sdb.all_schemas()?,
        None => return Ok(vec![(0, Arc::new(ImplicitSchema(Arc::clone(db))) as Arc<dyn Schema>)]),
    };
    if search.is_empty() {
        return Ok(all.into_iter().enumerate().collect());
    }
    let mut out = Vec::with_capacity(search.len());
    for wanted in search.iter() {
        if let Some((i, s)) = all.iter().enumerate().find(|(_, s)| s.name() == wanted.as_str()) {
            if !out.iter().any(|(j, _): &(usize, Arc<dyn Schema>)| *j == i) {
                out.push((i, Arc::clone(s)));
            }
        }
    }
    Ok(out)
}

fn iterate_schemas(
    ctx: &QueryContext,
    db_name: &str,
    callbacks: &mut Callbacks<'_>,
    schemas: Vec<(usize, Arc<dyn Schema>)>,
    visits: &mut Visits,
) -> CatalogResult<Flow> {
    for (index, schema) in schemas.into_iter() {
        ctx.check_cancelled()?;
        let item = ItemSchema { index, oid: oid::schema_oid(db_name, schema.name()), item: schema };
        visits.schemas += 1;
        if let Some(cb) = callbacks.schema.as_mut() {
            trace!(target: "pgmirror::iterate", "schema '{}' oid={}", item.name(), item.oid);
            if !cb(ctx, &item)? {
                debug!(target: "pgmirror::iterate", "traversal stopped by schema callback at '{}'", item.name());
                return Ok(Flow::Stop);
            }
        }
        if callbacks.iterates_over_tables() && iterate_tables(ctx, db_name, callbacks, &item, visits)? == Flow::Stop {
            return Ok(Flow::Stop);
        }
    }
    Ok(Flow::Continue)
}

fn iterate_tables(
    ctx: &QueryContext,
    db_name: &str,
    callbacks: &mut Callbacks<'_>,
    schema: &ItemSchema,
    visits: &mut Visits,
) -> CatalogResult<Flow> {
    let names = schema.item.table_names()?;
    for (index, name) in names.iter().enumerate() {
        ctx.check_cancelled()?;
        let table = schema.item.table(name)?.ok_or_else(|| CatalogError::table_not_found(name))?;
        let item = ItemTable { index, oid: oid::table_oid(db_name, schema.name(), table.name()), item: table };
        visits.tables += 1;
        if let Some(cb) = callbacks.table.as_mut() {
            trace!(target: "pgmirror::iterate", "table '{}.{}' oid={}", schema.name(), item.name(), item.oid);
            if !cb(ctx, schema, &item)? {
                debug!(target: "pgmirror::iterate", "traversal stopped by table callback at '{}.{}'", schema.name(), item.name());
                return Ok(Flow::Stop);
            }
        }
        if callbacks.index.is_some() && iterate_indexes(ctx, db_name, callbacks, schema, &item, visits)? == Flow::Stop {
            return Ok(Flow::Stop);
        }
    }
    Ok(Flow::Continue)
}

fn iterate_indexes(
    ctx: &QueryContext,
    db_name: &str,
    callbacks: &mut Callbacks<'_>,
    schema: &ItemSchema,
    table: &ItemTable,
    visits: &mut Visits,
) -> CatalogResult<Flow> {
    let indexes = table.item.indexes()?;
    let Some(cb) = callbacks.index.as_mut() else { return Ok(Flow::Continue) };
    for (index, idx) in indexes.into_iter().enumerate() {
        ctx.check_cancelled()?;
        let item = ItemIndex { index, oid: oid::index_oid(db_name, schema.name(), table.name(), idx.id()), item: idx };
        visits.indexes += 1;
        trace!(target: "pgmirror::iterate", "index '{}.{}.{}' oid={}", schema.name(), table.name(), item.name(), item.oid);
        if !cb(ctx, schema, table, &item)? {
            debug!(target: "pgmirror::iterate", "traversal stopped by index callback at '{}'", item.name());
            return Ok(Flow::Stop);
        }
    }
    Ok(Flow::Continue)
}

/// The live object a surrogate OID names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogObject {
    Schema { oid: u32, schema: String },
    Table { oid: u32, schema: String, table: String },
    Index { oid: u32, schema: String, table: String, index: String },
}

impl CatalogObject {
    pub fn oid(&self) -> u32 {
        match self {
            CatalogObject::Schema { oid, .. } | CatalogObject::Table { oid, .. } | CatalogObject::Index { oid, .. } => *oid,
        }
    }
}

/// Find the object in the current database whose derived OID is `target`.
/// OIDs below the surrogate range never match.
pub fn resolve_oid(ctx: &QueryContext, target: u32) -> CatalogResult<Option<CatalogObject>> {
    if !oid::is_surrogate(target) {
        return Ok(None);
    }
    let found: RefCell<Option<CatalogObject>> = RefCell::new(None);
    let mut callbacks = Callbacks::new()
        .on_schema(|_, s| {
            if s.oid != target { return Ok(true); }
            *found.borrow_mut() = Some(CatalogObject::Schema { oid: s.oid, schema: s.name().to_string() });
            Ok(false)
        })
        .on_table(|_, s, t| {
            if t.oid != target { return Ok(true); }
            *found.borrow_mut() = Some(CatalogObject::Table { oid: t.oid, schema: s.name().to_string(), table: t.name().to_string() });
            Ok(false)
        })
        .on_index(|_, s, t, i| {
            if i.oid != target { return Ok(true); }
            *found.borrow_mut() = Some(CatalogObject::Index {
                oid: i.oid,
                schema: s.name().to_string(),
                table: t.name().to_string(),
                index: i.name().to_string(),
            });
            Ok(false)
        });
    iterate_current_database(ctx, &mut callbacks)?;
    drop(callbacks);
    Ok(found.into_inner())
}

/// Split a possibly qualified identifier on `.`, honouring double quotes: dots
/// inside `"..."` belong to the identifier and `""` is an escaped quote.
/// Unquoted parts are trimmed. Returns `None` for an unterminated quote.
pub fn split_qualified_name(name: &str) -> Option<Vec<String>> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => quoted = !quoted,
            '.' if !quoted => {
                parts.push(std::mem::take(&mut current));
            }
            c if !quoted && c.is_whitespace() => {}
            c => current.push(c),
        }
    }
    if quoted {
        return None;
    }
    parts.push(current);
    Some(parts)
}

/// Resolve `schema.table` or a bare table name (through the context's search
/// path) to the table's OID, regclass style. Parts may be double-quoted.
pub fn resolve_relation(ctx: &QueryContext, name: &str) -> CatalogResult<Option<u32>> {
    let Some(parts) = split_qualified_name(name) else { return Ok(None) };
    let (search, table_name) = match parts.as_slice() {
        [t] => (ctx.search_path().to_vec(), t.clone()),
        [s, t] => (vec![s.clone()], t.clone()),
        _ => return Ok(None),
    };
    if table_name.is_empty() {
        return Ok(None);
    }
    let mut found: Option<u32> = None;
    {
        let mut callbacks = Callbacks::new()
            .with_search_schemas(search)
            .on_table(|_, _, t| {
                if t.name() != table_name { return Ok(true); }
                found = Some(t.oid);
                Ok(false)
            });
        iterate_current_database(ctx, &mut callbacks)?;
    }
    Ok(found)
}

#[cfg(test)]
#[path = "iterate_tests.rs"]
mod iterate_tests;
