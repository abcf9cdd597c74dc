use meridian_array::datatype::ExtensionTypeMeta;
use meridian_error::{MeridianError, Result};
use std::collections::HashMap;
use std::fmt::Debug;

use crate::functions::scalar::ScalarFunction;

/// A plugin providing additional types and functions to the engine.
///
/// Everything an extension returns gets installed into the system catalog
/// when the extension is registered with an engine.
pub trait Extension: Sync + Send + Debug {
    /// Name uniquely identifying this extension.
    fn name(&self) -> &'static str;

    /// Types contributed by this extension.
    fn extension_types(&self) -> Vec<ExtensionTypeMeta> {
        Vec::new()
    }

    /// Scalar functions contributed by this extension.
    fn scalar_functions(&self) -> Vec<Box<dyn ScalarFunction>> {
        Vec::new()
    }
}

#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    extensions: HashMap<&'static str, Box<dyn Extension>>,
}

impl ExtensionRegistry {
    pub fn with_extension(mut self, extension: Box<dyn Extension>) -> Result<Self> {
        self.insert_extension(extension)?;
        Ok(self)
    }

    pub fn insert_extension(&mut self, extension: Box<dyn Extension>) -> Result<()> {
        let name = extension.name();
        if self.extensions.contains_key(name) {
            return Err(MeridianError::new(format!(
                "Duplicate extension with name '{name}'"
            )));
        }
        self.extensions.insert(name, extension);
        Ok(())
    }

    pub fn get_extension(&self, name: &str) -> Result<&dyn Extension> {
        self.extensions
            .get(name)
            .map(|e| e.as_ref())
            .ok_or_else(|| MeridianError::new(format!("Missing extension: {name}")))
    }

    pub fn iter_extensions(&self) -> impl Iterator<Item = &dyn Extension> {
        self.extensions.values().map(|e| e.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct DummyExtension;

    impl Extension for DummyExtension {
        fn name(&self) -> &'static str {
            "dummy"
        }
    }

    #[test]
    fn register_and_get() {
        let registry = ExtensionRegistry::default()
            .with_extension(Box::new(DummyExtension))
            .unwrap();

        let ext = registry.get_extension("dummy").unwrap();
        assert_eq!("dummy", ext.name());

        registry.get_extension("missing").unwrap_err();
    }

    #[test]
    fn duplicate_name_rejected() {
        ExtensionRegistry::default()
            .with_extension(Box::new(DummyExtension))
            .unwrap()
            .with_extension(Box::new(DummyExtension))
            .unwrap_err();
    }
}
