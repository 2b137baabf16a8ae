//! Interfaces onto the external catalog whose live objects are projected into
//! the virtual system tables. The storage engine owns these objects; this crate
//! only reads them while a traversal is running.

use std::sync::Arc;

use crate::error::CatalogResult;

pub mod memory;

pub use memory::{DatabaseDef, IndexDef, MemoryCatalog, SchemaDef, TableDef};

/// Resolves databases by name.
pub trait CatalogProvider: Send + Sync {
    fn database(&self, name: &str) -> CatalogResult<Arc<dyn Database>>;
}

/// A database. Databases that do not expose [`SchemaDatabase`] are single-schema:
/// their tables are listed directly through `table_names` / `table`.
pub trait Database: Send + Sync {
    fn name(&self) -> &str;
    fn as_schema_database(&self) -> Option<&dyn SchemaDatabase> { None }
    fn table_names(&self) -> CatalogResult<Vec<String>>;
    fn table(&self, name: &str) -> CatalogResult<Option<Arc<dyn Table>>>;
}

/// Multi-schema capability of a database.
pub trait SchemaDatabase: Send + Sync {
    fn all_schemas(&self) -> CatalogResult<Vec<Arc<dyn Schema>>>;
}

pub trait Schema: Send + Sync {
    fn name(&self) -> &str;
    fn table_names(&self) -> CatalogResult<Vec<String>>;
    fn table(&self, name: &str) -> CatalogResult<Option<Arc<dyn Table>>>;
}

pub trait Table: Send + Sync {
    fn name(&self) -> &str;
    fn column_names(&self) -> Vec<String>;
    /// Indexes defined on the table; tables that cannot be indexed report none.
    fn indexes(&self) -> CatalogResult<Vec<Arc<dyn Index>>> { Ok(Vec::new()) }
}

pub trait Index: Send + Sync {
    fn id(&self) -> &str;
    fn is_unique(&self) -> bool;
    /// Covered expressions in key order. Plain columns may be written `col` or `table.col`.
    fn expressions(&self) -> Vec<String>;
}

/// Presents a single-schema database as its one implicit schema, named after the database.
pub struct ImplicitSchema(pub Arc<dyn Database>);

impl Schema for ImplicitSchema {
    fn name(&self) -> &str { self.0.name() }
    fn table_names(&self) -> CatalogResult<Vec<String>> { self.0.table_names() }
    fn table(&self, name: &str) -> CatalogResult<Option<Arc<dyn Table>>> { self.0.table(name) }
}
