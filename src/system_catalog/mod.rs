// Virtual pg_catalog / information_schema tables projected from the external catalog.

pub mod oid;
pub mod rows;
pub mod iterate;
pub mod registry;
pub mod pg_catalog;
pub mod information_schema;
