pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod system_catalog;

pub use config::CatalogConfig;
pub use context::{CancelHandle, QueryContext};
pub use error::{CatalogError, CatalogResult};
pub use system_catalog::registry::{Registry, SystemTable, TableStatus};

// Test-only printing helper: expands to eprintln! during tests and debug builds.
// Usage in tests: tprintln!("debug: {}", value);
#[cfg(any(test, debug_assertions))]
#[macro_export]
macro_rules! tprintln {
    ($($arg:tt)*) => ( eprintln!($($arg)*) );
}

// In release builds, a no-op tprintln! so calls compile without effect.
#[cfg(not(any(test, debug_assertions)))]
#[macro_export]
macro_rules! tprintln {
    ($($arg:tt)*) => ({
        if false { let _ = format!($($arg)*); }
    });
}
