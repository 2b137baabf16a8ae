//! Surrogate OIDs for live catalog objects.
//!
//! An OID is a pure function of the object's qualified name: the components
//! are joined with `.`, hashed with 64-bit xxh3, truncated to the low 32 bits
//! and the high bit is forced on. The lower half of the OID space therefore
//! stays free for fixed, well-known system identifiers.
//!
//! No collision handling is done. With the high bit fixed there are 2^31
//! possible values, so for `n` distinct names the expected number of colliding
//! pairs is about `n^2 / 2^32` (roughly 0.02 for 10,000 names).
//!
//! Because the name is the only input, renaming an object changes its OID.

use xxhash_rust::xxh3::xxh3_64;

pub const OID_HIGH_BIT: u32 = 0x8000_0000;
pub const NAME_DELIMITER: &str = ".";

/// Well-known namespace OIDs from PostgreSQL; below the surrogate range.
pub const PG_CATALOG_NAMESPACE_OID: u32 = 11;
pub const INFORMATION_SCHEMA_NAMESPACE_OID: u32 = 13211;
pub const BTREE_AM_OID: u32 = 403;
pub const HEAP_AM_OID: u32 = 2;

pub fn derive_oid<S: AsRef<str>>(components: &[S]) -> u32 {
    let key = components.iter().map(|c| c.as_ref()).collect::<Vec<&str>>().join(NAME_DELIMITER);
    let h = xxh3_64(key.as_bytes());
    (h as u32) | OID_HIGH_BIT
}

pub fn schema_oid(database: &str, schema: &str) -> u32 {
    derive_oid(&[database, schema])
}

pub fn table_oid(database: &str, schema: &str, table: &str) -> u32 {
    derive_oid(&[database, schema, table])
}

pub fn index_oid(database: &str, schema: &str, table: &str, index: &str) -> u32 {
    derive_oid(&[database, schema, table, index])
}

pub fn is_surrogate(oid: u32) -> bool { oid & OID_HIGH_BIT != 0 }

#[cfg(test)]
#[path = "oid_tests.rs"]
mod oid_tests;
