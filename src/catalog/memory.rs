//! In-memory catalog backed by serde-loadable definitions. Used by the dump
//! binary, the integration tests and the benches; any real storage engine
//! implements the traits in the parent module directly.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CatalogProvider, Database, Index, Schema, SchemaDatabase, Table};
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDef {
    pub name: String,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl IndexDef {
    pub fn new(name: &str, unique: bool, columns: &[&str]) -> Self {
        Self { name: name.to_string(), unique, columns: columns.iter().map(|c| c.to_string()).collect() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub indexes: Vec<IndexDef>,
}

impl TableDef {
    pub fn new(name: &str, columns: &[&str]) -> Self {
        Self { name: name.to_string(), columns: columns.iter().map(|c| c.to_string()).collect(), indexes: Vec::new() }
    }

    pub fn with_index(mut self, index: IndexDef) -> Self {
        self.indexes.push(index);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDef {
    pub name: String,
    #[serde(default)]
    pub tables: Vec<TableDef>,
}

impl SchemaDef {
    pub fn new(name: &str, tables: Vec<TableDef>) -> Self {
        Self { name: name.to_string(), tables }
    }
}

/// A database definition. `schemas: None` describes a single-schema database
/// whose tables sit directly under `tables`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<SchemaDef>>,
    #[serde(default)]
    pub tables: Vec<TableDef>,
}

impl DatabaseDef {
    pub fn multi(name: &str, schemas: Vec<SchemaDef>) -> Self {
        Self { name: name.to_string(), schemas: Some(schemas), tables: Vec::new() }
    }

    pub fn single(name: &str, tables: Vec<TableDef>) -> Self {
        Self { name: name.to_string(), schemas: None, tables }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    databases: Vec<DatabaseDef>,
}

struct MemIndex(IndexDef);

impl Index for MemIndex {
    fn id(&self) -> &str { &self.0.name }
    fn is_unique(&self) -> bool { self.0.unique }
    fn expressions(&self) -> Vec<String> { self.0.columns.clone() }
}

struct MemTable {
    name: String,
    columns: Vec<String>,
    indexes: Vec<Arc<dyn Index>>,
}

impl MemTable {
    fn from_def(def: &TableDef) -> Arc<MemTable> {
        let indexes = def.indexes.iter().map(|i| Arc::new(MemIndex(i.clone())) as Arc<dyn Index>).collect();
        Arc::new(MemTable { name: def.name.clone(), columns: def.columns.clone(), indexes })
    }
}

impl Table for MemTable {
    fn name(&self) -> &str { &self.name }
    fn column_names(&self) -> Vec<String> { self.columns.clone() }
    fn indexes(&self) -> CatalogResult<Vec<Arc<dyn Index>>> { Ok(self.indexes.clone()) }
}

fn table_names_of(tables: &[Arc<MemTable>]) -> Vec<String> {
    tables.iter().map(|t| t.name.clone()).collect()
}

fn find_table(tables: &[Arc<MemTable>], name: &str) -> Option<Arc<dyn Table>> {
    tables.iter().find(|t| t.name == name).map(|t| Arc::clone(t) as Arc<dyn Table>)
}

struct MemSchema {
    name: String,
    tables: Vec<Arc<MemTable>>,
}

impl Schema for MemSchema {
    fn name(&self) -> &str { &self.name }
    fn table_names(&self) -> CatalogResult<Vec<String>> { Ok(table_names_of(&self.tables)) }
    fn table(&self, name: &str) -> CatalogResult<Option<Arc<dyn Table>>> { Ok(find_table(&self.tables, name)) }
}

struct MemDatabase {
    name: String,
    schemas: Option<Vec<Arc<MemSchema>>>,
    tables: Vec<Arc<MemTable>>,
}

impl MemDatabase {
    fn from_def(def: &DatabaseDef) -> Arc<MemDatabase> {
        let schemas = def.schemas.as_ref().map(|list| {
            list.iter()
                .map(|s| Arc::new(MemSchema { name: s.name.clone(), tables: s.tables.iter().map(MemTable::from_def).collect() }))
                .collect()
        });
        Arc::new(MemDatabase { name: def.name.clone(), schemas, tables: def.tables.iter().map(MemTable::from_def).collect() })
    }
}

impl Database for MemDatabase {
    fn name(&self) -> &str { &self.name }
    fn as_schema_database(&self) -> Option<&dyn SchemaDatabase> {
        if self.schemas.is_some() { Some(self) } else { None }
    }
    fn table_names(&self) -> CatalogResult<Vec<String>> { Ok(table_names_of(&self.tables)) }
    fn table(&self, name: &str) -> CatalogResult<Option<Arc<dyn Table>>> { Ok(find_table(&self.tables, name)) }
}

impl SchemaDatabase for MemDatabase {
    fn all_schemas(&self) -> CatalogResult<Vec<Arc<dyn Schema>>> {
        Ok(self
            .schemas
            .as_ref()
            .map(|list| list.iter().map(|s| Arc::clone(s) as Arc<dyn Schema>).collect())
            .unwrap_or_default())
    }
}

/// Thread-safe in-memory [`CatalogProvider`]. Databases keep insertion order;
/// adding a database with an existing name replaces it.
#[derive(Default)]
pub struct MemoryCatalog {
    databases: RwLock<Vec<Arc<MemDatabase>>>,
}

impl MemoryCatalog {
    pub fn new() -> Self { Self::default() }

    pub fn with_databases(defs: Vec<DatabaseDef>) -> Self {
        let cat = Self::new();
        for d in defs.iter() { cat.add_database(d); }
        cat
    }

    pub fn add_database(&self, def: &DatabaseDef) {
        let db = MemDatabase::from_def(def);
        let mut dbs = self.databases.write();
        if let Some(slot) = dbs.iter_mut().find(|d| d.name == def.name) {
            *slot = db;
        } else {
            dbs.push(db);
        }
    }

    pub fn remove_database(&self, name: &str) -> bool {
        let mut dbs = self.databases.write();
        let before = dbs.len();
        dbs.retain(|d| d.name != name);
        before != dbs.len()
    }

    pub fn database_names(&self) -> Vec<String> {
        self.databases.read().iter().map(|d| d.name.clone()).collect()
    }

    /// Parse a fixture of the form `{ "databases": [ ... ] }`.
    pub fn from_json_str(text: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_json::from_str(text)?;
        debug!(target: "pgmirror::catalog", "loaded catalog fixture: databases={}", file.databases.len());
        Ok(Self::with_databases(file.databases))
    }

    pub fn from_json_file(path: &Path) -> CatalogResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

impl CatalogProvider for MemoryCatalog {
    fn database(&self, name: &str) -> CatalogResult<Arc<dyn Database>> {
        self.databases
            .read()
            .iter()
            .find(|d| d.name == name)
            .map(|d| Arc::clone(d) as Arc<dyn Database>)
            .ok_or_else(|| CatalogError::database_not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_parses_multi_and_single_schema() {
        let cat = MemoryCatalog::from_json_str(r#"{
            "databases": [
                { "name": "app", "schemas": [
                    { "name": "public", "tables": [
                        { "name": "users", "columns": ["id", "email"],
                          "indexes": [ { "name": "PRIMARY", "unique": true, "columns": ["id"] } ] }
                    ] }
                ] },
                { "name": "legacy", "tables": [ { "name": "t" } ] }
            ]
        }"#).unwrap();
        assert_eq!(cat.database_names(), vec!["app".to_string(), "legacy".to_string()]);

        let app = cat.database("app").unwrap();
        let schemas = app.as_schema_database().unwrap().all_schemas().unwrap();
        assert_eq!(schemas.len(), 1);
        let users = schemas[0].table("users").unwrap().unwrap();
        let idx = users.indexes().unwrap();
        assert_eq!(idx[0].id(), "PRIMARY");
        assert!(idx[0].is_unique());

        let legacy = cat.database("legacy").unwrap();
        assert!(legacy.as_schema_database().is_none());
        assert_eq!(legacy.table_names().unwrap(), vec!["t".to_string()]);
    }

    #[test]
    fn missing_database_is_not_found() {
        let cat = MemoryCatalog::new();
        let err = cat.database("ghost").err().unwrap();
        assert!(err.is_not_found());
    }

    #[test]
    fn add_database_replaces_by_name() {
        let cat = MemoryCatalog::new();
        cat.add_database(&DatabaseDef::single("db", vec![TableDef::new("a", &[])]));
        cat.add_database(&DatabaseDef::single("db", vec![TableDef::new("b", &[])]));
        assert_eq!(cat.database_names().len(), 1);
        assert_eq!(cat.database("db").unwrap().table_names().unwrap(), vec!["b".to_string()]);
        assert!(cat.remove_database("db"));
        assert!(!cat.remove_database("db"));
    }
}
