use hashbrown::HashMap;
use meridian_array::datatype::ExtensionTypeMeta;
use meridian_error::{MeridianError, Result};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::functions::scalar::{ScalarFunction, BUILTIN_SCALAR_FUNCTIONS};

/// Catalog holding the functions and types available to every session.
///
/// Cheaply cloneable with clones sharing underlying state, so anything
/// installed after a session was created is still visible to that session.
#[derive(Debug, Clone)]
pub struct SystemCatalog {
    inner: Arc<RwLock<CatalogInner>>,
}

#[derive(Debug)]
struct CatalogInner {
    /// Scalar functions keyed by lowercased name. Aliases get their own
    /// entries pointing at the same function.
    scalar_functions: HashMap<String, Box<dyn ScalarFunction>>,

    /// Extension types keyed by name.
    extension_types: HashMap<String, ExtensionTypeMeta>,
}

impl SystemCatalog {
    /// Creates a new catalog containing all builtin functions.
    pub fn new() -> Result<Self> {
        let mut inner = CatalogInner {
            scalar_functions: HashMap::new(),
            extension_types: HashMap::new(),
        };

        for func in BUILTIN_SCALAR_FUNCTIONS.iter() {
            inner.insert_scalar_function(func.name(), func.clone())?;
            for alias in func.aliases() {
                inner.insert_scalar_function(alias, func.clone())?;
            }
        }

        Ok(SystemCatalog {
            inner: Arc::new(RwLock::new(inner)),
        })
    }

    pub fn create_scalar_function(
        &self,
        name: &str,
        function: Box<dyn ScalarFunction>,
    ) -> Result<()> {
        self.inner.write().insert_scalar_function(name, function)
    }

    /// Look up a scalar function by name, case insensitively.
    pub fn get_scalar_function(&self, name: &str) -> Option<Box<dyn ScalarFunction>> {
        self.inner
            .read()
            .scalar_functions
            .get(&name.to_lowercase())
            .cloned()
    }

    /// Find the registered function name closest to the given name.
    ///
    /// Used to provide hints when a lookup fails.
    pub fn find_similar_function(&self, name: &str) -> Option<String> {
        const SIMILARITY_THRESHOLD: f64 = 0.7;

        let name = name.to_lowercase();
        let inner = self.inner.read();

        let mut best: Option<(f64, &str)> = None;
        for candidate in inner.scalar_functions.keys() {
            let score = strsim::jaro(&name, candidate);
            if score < SIMILARITY_THRESHOLD {
                continue;
            }
            match best {
                Some((best_score, _)) if best_score >= score => (),
                _ => best = Some((score, candidate)),
            }
        }

        best.map(|(_, name)| name.to_string())
    }

    pub fn create_extension_type(&self, meta: ExtensionTypeMeta) -> Result<()> {
        let mut inner = self.inner.write();
        let name = meta.name();
        if inner.extension_types.contains_key(name) {
            return Err(MeridianError::new(format!(
                "Extension type '{name}' already exists"
            )));
        }
        inner.extension_types.insert(name.to_string(), meta);
        Ok(())
    }

    pub fn get_extension_type(&self, name: &str) -> Option<ExtensionTypeMeta> {
        self.inner.read().extension_types.get(name).cloned()
    }
}

impl CatalogInner {
    fn insert_scalar_function(
        &mut self,
        name: &str,
        function: Box<dyn ScalarFunction>,
    ) -> Result<()> {
        let name = name.to_lowercase();
        if self.scalar_functions.contains_key(&name) {
            return Err(MeridianError::new(format!(
                "Function '{name}' already exists"
            )));
        }
        self.scalar_functions.insert(name, function);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_create_system_catalog() {
        SystemCatalog::new().unwrap();
    }

    #[test]
    fn lookup_case_insensitive() {
        let catalog = SystemCatalog::new().unwrap();

        let func = catalog.get_scalar_function("REPEAT").unwrap();
        assert_eq!("repeat", func.name());

        assert!(catalog.get_scalar_function("no_such_function").is_none());
    }

    #[test]
    fn lookup_by_alias() {
        let catalog = SystemCatalog::new().unwrap();

        let func = catalog.get_scalar_function("mod").unwrap();
        assert_eq!("%", func.name());
    }

    #[test]
    fn duplicate_function_rejected() {
        use crate::functions::scalar::string::Repeat;

        let catalog = SystemCatalog::new().unwrap();
        catalog
            .create_scalar_function("repeat", Box::new(Repeat))
            .unwrap_err();
    }

    #[test]
    fn similar_function_hint() {
        let catalog = SystemCatalog::new().unwrap();

        let similar = catalog.find_similar_function("repaet").unwrap();
        assert_eq!("repeat", similar);

        assert_eq!(None, catalog.find_similar_function("zzzzzz"));
    }

    #[test]
    fn extension_types_round_trip() {
        use meridian_array::datatype::ExtensionType;

        #[derive(Debug)]
        struct TestType;

        impl ExtensionType for TestType {
            fn name(&self) -> &'static str {
                "test_type"
            }

            fn format_value(&self, value: &[u8]) -> Result<String> {
                Ok(format!("{} bytes", value.len()))
            }
        }

        let catalog = SystemCatalog::new().unwrap();
        assert!(catalog.get_extension_type("test_type").is_none());

        catalog
            .create_extension_type(ExtensionTypeMeta::new(Arc::new(TestType)))
            .unwrap();

        let meta = catalog.get_extension_type("test_type").unwrap();
        assert_eq!("test_type", meta.name());

        catalog
            .create_extension_type(ExtensionTypeMeta::new(Arc::new(TestType)))
            .unwrap_err();
    }
}
