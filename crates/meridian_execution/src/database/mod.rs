pub mod system;

use system::SystemCatalog;

/// Per-session handle to the catalogs available for binding queries.
#[derive(Debug)]
pub struct DatabaseContext {
    system_catalog: SystemCatalog,
}

impl DatabaseContext {
    pub fn new(system_catalog: SystemCatalog) -> Self {
        DatabaseContext { system_catalog }
    }

    pub fn system_catalog(&self) -> &SystemCatalog {
        &self.system_catalog
    }
}
