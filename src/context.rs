//! Per-query execution context handed to catalog handlers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::catalog::CatalogProvider;
use crate::error::{CatalogError, CatalogResult};

/// Shared flag used to cancel an in-flight query from another thread.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) { self.0.store(true, Ordering::SeqCst); }
    pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::SeqCst) }
}

#[derive(Clone)]
pub struct QueryContext {
    catalog: Arc<dyn CatalogProvider>,
    current_database: String,
    search_path: Vec<String>,
    cancel: CancelHandle,
}

impl QueryContext {
    pub fn new(catalog: Arc<dyn CatalogProvider>, current_database: impl Into<String>) -> Self {
        Self {
            catalog,
            current_database: current_database.into(),
            search_path: vec!["public".to_string()],
            cancel: CancelHandle::default(),
        }
    }

    pub fn with_search_path(mut self, search_path: Vec<String>) -> Self {
        self.search_path = search_path;
        self
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogProvider> { &self.catalog }
    pub fn current_database(&self) -> &str { &self.current_database }
    pub fn search_path(&self) -> &[String] { &self.search_path }
    pub fn cancel_handle(&self) -> CancelHandle { self.cancel.clone() }

    pub fn check_cancelled(&self) -> CatalogResult<()> {
        if self.cancel.is_cancelled() {
            debug!(target: "pgmirror::context", "query cancelled: database='{}'", self.current_database);
            return Err(CatalogError::Cancelled);
        }
        Ok(())
    }
}

impl std::fmt::Debug for QueryContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryContext")
            .field("current_database", &self.current_database)
            .field("search_path", &self.search_path)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}
