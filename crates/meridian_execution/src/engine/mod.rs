pub mod result;
pub mod session;

use meridian_error::Result;
use parking_lot::Mutex;
use session::Session;
use tracing::debug;

use crate::database::system::SystemCatalog;
use crate::database::DatabaseContext;
use crate::extension::{Extension, ExtensionRegistry};

/// The engine owns the system catalog and the extensions installed into it.
#[derive(Debug)]
pub struct Engine {
    registry: Mutex<ExtensionRegistry>,
    system_catalog: SystemCatalog,
}

impl Engine {
    /// Create an engine with only the builtin functions available.
    pub fn new() -> Result<Self> {
        Self::new_with_registry(ExtensionRegistry::default())
    }

    /// Create an engine, installing every extension in the registry.
    pub fn new_with_registry(registry: ExtensionRegistry) -> Result<Self> {
        let system_catalog = SystemCatalog::new()?;

        for extension in registry.iter_extensions() {
            install_extension(&system_catalog, extension)?;
        }

        Ok(Engine {
            registry: Mutex::new(registry),
            system_catalog,
        })
    }

    /// Register an extension, installing its types and functions into the
    /// system catalog.
    ///
    /// Existing sessions see the newly installed functions.
    pub fn register_extension(&self, extension: Box<dyn Extension>) -> Result<()> {
        let name = extension.name();
        debug!(%name, "registering extension");

        let mut registry = self.registry.lock();
        registry.insert_extension(extension)?;
        install_extension(&self.system_catalog, registry.get_extension(name)?)
    }

    pub fn new_session(&self) -> Result<Session> {
        let context = DatabaseContext::new(self.system_catalog.clone());
        Ok(Session::new(context))
    }
}

fn install_extension(catalog: &SystemCatalog, extension: &dyn Extension) -> Result<()> {
    for meta in extension.extension_types() {
        catalog.create_extension_type(meta)?;
    }

    for function in extension.scalar_functions() {
        catalog.create_scalar_function(function.name(), function.clone())?;
        for alias in function.aliases() {
            catalog.create_scalar_function(alias, function.clone())?;
        }
    }

    Ok(())
}
