use std::collections::HashMap;
use std::sync::Arc;

use polars::prelude::{Column, DataFrame, DataType, NamedFrom, PlSmallStr, Series};
use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::context::QueryContext;
use crate::error::CatalogResult;
use crate::system_catalog::rows::{Row, RowSequence, Value};

pub const PG_CATALOG: &str = "pg_catalog";
pub const INFORMATION_SCHEMA: &str = "information_schema";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColType {
    Oid,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Boolean,
    Char,
    Text,
    Int2Vector,
    TextArray,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub coltype: ColType,
}

/// Whether a table is backed by live catalog data. Stub tables answer every
/// query with zero rows, which SQL clients cannot tell apart from an empty table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableStatus {
    Live,
    Stub,
}

/// Opaque scan partition token. Catalog tables are small and scanned as one partition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition(pub Vec<u8>);

pub trait SystemTable: Send + Sync {
    fn name(&self) -> &'static str;
    /// Column schema; the same slice on every call.
    fn schema(&self) -> &'static [ColumnDef];
    fn status(&self) -> TableStatus { TableStatus::Live }
    fn partitions(&self, _ctx: &QueryContext) -> CatalogResult<Vec<Partition>> {
        Ok(vec![Partition::default()])
    }
    fn rows(&self, ctx: &QueryContext, partition: &Partition) -> CatalogResult<RowSequence>;

    /// Drain every partition into a frame typed from `schema()`.
    fn build(&self, ctx: &QueryContext) -> CatalogResult<DataFrame> {
        let mut rows: Vec<Row> = Vec::new();
        for p in self.partitions(ctx)? {
            let mut seq = self.rows(ctx, &p)?;
            rows.extend(seq.by_ref());
            seq.close();
        }
        rows_to_dataframe(self.schema(), &rows)
    }
}

pub struct NoOpSystemTable {
    name: &'static str,
    columns: &'static [ColumnDef],
}

impl NoOpSystemTable {
    pub const fn new(name: &'static str, columns: &'static [ColumnDef]) -> Self {
        Self { name, columns }
    }
}

impl SystemTable for NoOpSystemTable {
    fn name(&self) -> &'static str { self.name }
    fn schema(&self) -> &'static [ColumnDef] { self.columns }
    fn status(&self) -> TableStatus { TableStatus::Stub }
    fn rows(&self, _ctx: &QueryContext, _partition: &Partition) -> CatalogResult<RowSequence> {
        Ok(RowSequence::empty())
    }
}

pub fn build_empty(cols: &[ColumnDef]) -> CatalogResult<DataFrame> {
    rows_to_dataframe(cols, &[])
}

/// Map `ColType` to the Polars `DataType` used for materialised frames.
/// Vector and array types are rendered in their PostgreSQL text form.
fn coltype_to_dtype(ct: ColType) -> DataType {
    match ct {
        ColType::Oid => DataType::UInt32,
        ColType::SmallInt | ColType::Integer => DataType::Int32,
        ColType::BigInt => DataType::Int64,
        ColType::Real => DataType::Float32,
        ColType::Boolean => DataType::Boolean,
        ColType::Char | ColType::Text | ColType::Int2Vector | ColType::TextArray => DataType::String,
    }
}

fn cell_u32(v: &Value) -> Option<u32> {
    match v { Value::Oid(x) => Some(*x), Value::Int32(x) => u32::try_from(*x).ok(), _ => None }
}

fn cell_i32(v: &Value) -> Option<i32> {
    match v { Value::Int16(x) => Some(*x as i32), Value::Int32(x) => Some(*x), _ => None }
}

fn cell_i64(v: &Value) -> Option<i64> {
    match v { Value::Int16(x) => Some(*x as i64), Value::Int32(x) => Some(*x as i64), Value::Int64(x) => Some(*x), Value::Oid(x) => Some(*x as i64), _ => None }
}

fn cell_f32(v: &Value) -> Option<f32> {
    match v { Value::Float32(x) => Some(*x), _ => None }
}

fn cell_string(v: &Value) -> Option<String> {
    if v.is_null() { None } else { Some(v.to_string()) }
}

pub fn rows_to_dataframe(cols: &[ColumnDef], rows: &[Row]) -> CatalogResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(cols.len());
    for (i, c) in cols.iter().enumerate() {
        let cell = |r: &Row| r.get(i).cloned().unwrap_or(Value::Null);
        let name: PlSmallStr = c.name.into();
        let s = match coltype_to_dtype(c.coltype) {
            DataType::UInt32 => Series::new(name, rows.iter().map(|r| cell_u32(&cell(r))).collect::<Vec<Option<u32>>>()),
            DataType::Int32 => Series::new(name, rows.iter().map(|r| cell_i32(&cell(r))).collect::<Vec<Option<i32>>>()),
            DataType::Int64 => Series::new(name, rows.iter().map(|r| cell_i64(&cell(r))).collect::<Vec<Option<i64>>>()),
            DataType::Float32 => Series::new(name, rows.iter().map(|r| cell_f32(&cell(r))).collect::<Vec<Option<f32>>>()),
            DataType::Boolean => Series::new(name, rows.iter().map(|r| cell(r).as_bool()).collect::<Vec<Option<bool>>>()),
            _ => Series::new(name, rows.iter().map(|r| cell_string(&cell(r))).collect::<Vec<Option<String>>>()),
        };
        columns.push(s.into());
    }
    Ok(DataFrame::new(columns)?)
}

/// Build a schema map (column name -> DataType) from a system table's column defs.
pub fn schema_map_for(table: &dyn SystemTable) -> HashMap<String, DataType> {
    let mut m: HashMap<String, DataType> = HashMap::new();
    for c in table.schema() {
        m.insert(c.name.to_string(), coltype_to_dtype(c.coltype));
    }
    m
}

struct Entry {
    schema: String,
    name: String,
    table: Arc<dyn SystemTable>,
}

/// Handler registry keyed by (catalog schema, table name), case-insensitive.
/// Populated once at startup, read-only afterwards.
#[derive(Default)]
pub struct Registry {
    entries: Vec<Entry>,
    by_key: HashMap<(String, String), usize>,
}

impl Registry {
    pub fn new() -> Self { Self::default() }

    /// The startup registry: live handlers first, then stubs for the rest of the catalog.
    pub fn with_defaults(config: &CatalogConfig) -> Self {
        let mut reg = Self::new();
        super::pg_catalog::register_defaults(&mut reg, config);
        if config.include_information_schema {
            super::information_schema::register_defaults(&mut reg, config);
        }
        debug!(target: "pgmirror::registry", "registry ready: tables={} live={}",
            reg.len(), reg.all().filter(|(_, _, t)| t.status() == TableStatus::Live).count());
        reg
    }

    /// Register a handler. The first registration of a key wins.
    pub fn register(&mut self, catalog_schema: &str, table_name: &str, table: Arc<dyn SystemTable>) -> bool {
        let key = (catalog_schema.to_lowercase(), table_name.to_lowercase());
        if self.by_key.contains_key(&key) {
            warn!(target: "pgmirror::registry", "duplicate system table ignored: {}.{}", catalog_schema, table_name);
            return false;
        }
        self.by_key.insert(key, self.entries.len());
        self.entries.push(Entry { schema: catalog_schema.to_string(), name: table_name.to_string(), table });
        true
    }

    pub fn find(&self, schema: &str, name: &str) -> Option<Arc<dyn SystemTable>> {
        self.by_key
            .get(&(schema.to_lowercase(), name.to_lowercase()))
            .map(|i| Arc::clone(&self.entries[*i].table))
    }

    /// (catalog schema, table name, handler) in registration order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &str, &Arc<dyn SystemTable>)> + '_ {
        self.entries.iter().map(|e| (e.schema.as_str(), e.name.as_str(), &e.table))
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Resolve an identifier such as `pg_catalog.pg_index`, `"pg_index"`,
    /// `db/pg_catalog/pg_index` or `pg_index x;` to a registered table.
    /// Bare names are tried in pg_catalog, then information_schema.
    pub fn lookup_from_str(&self, input: &str) -> Option<Arc<dyn SystemTable>> {
        let mut base = input.trim().to_string();
        if let Some(idx) = base.find(|c: char| c.is_whitespace()) { base.truncate(idx); }
        if base.ends_with(';') { base.pop(); }
        let ident = base.replace('\\', "/").replace('"', "").replace('\'', "").to_lowercase();
        let dotted = ident.replace('/', ".");
        let parts: Vec<&str> = dotted.split('.').filter(|p| !p.is_empty()).collect();
        let last1 = parts.last().copied()?;
        if parts.len() >= 2 {
            if let Some(t) = self.find(parts[parts.len() - 2], last1) { return Some(t); }
        }
        self.find(PG_CATALOG, last1).or_else(|| self.find(INFORMATION_SCHEMA, last1))
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod registry_tests;
