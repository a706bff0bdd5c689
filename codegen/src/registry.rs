//! Dialect generator contract and registry
//!
//! The registry maps a dialect name to a generator factory. A fresh
//! generator instance serves exactly one run; the shared mutable state it
//! works with lives in [`GenState`], which the pipeline threads through
//! explicitly.

use std::collections::BTreeMap;

use tablesmith_types::Dialect;
use tablesmith_types::model::{EnumType, Table};

use crate::error::Error;
use crate::generators;
use crate::naming::is_valid_identifier;
use crate::options::GenerateOptions;
use crate::relations::Relationship;
use crate::state::GenState;

/// The two-operation contract every dialect generator implements.
///
/// The trait object makes the required operation set a compile-time
/// property; name validation still happens synchronously at registration.
pub trait DialectGenerator {
    /// Body text for one table. May record markers on `state`.
    fn generate_model(
        &self,
        table: &Table,
        state: &mut GenState,
        relations: &[&Relationship],
        opts: &GenerateOptions,
    ) -> String;

    /// Header/import block for the batch, reading the accumulated state
    fn create_header(&self, tables: &[Table], state: &GenState, opts: &GenerateOptions) -> String;

    /// Optional once-per-run enum body, emitted before any table body since
    /// columns may reference the enums
    fn generate_enums(&self, enums: &[EnumType], state: &mut GenState) -> Option<String> {
        let _ = (enums, state);
        None
    }

    /// Optional two-slot render template with `{header}` and `{models}` slots
    fn render_template(&self) -> Option<&'static str> {
        None
    }
}

type GeneratorFactory = Box<dyn Fn() -> Box<dyn DialectGenerator> + Send + Sync>;

/// Name → generator-factory table, built-in or externally supplied
pub struct Registry {
    custom: BTreeMap<String, GeneratorFactory>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Registry with the built-in generators only
    #[must_use]
    pub fn new() -> Self {
        Self {
            custom: BTreeMap::new(),
        }
    }

    /// Register a custom generator factory.
    ///
    /// Fails synchronously on an invalid identifier, a collision with a
    /// built-in name (including its aliases), or a duplicate registration.
    pub fn register<F>(&mut self, name: &str, factory: F) -> Result<(), Error>
    where
        F: Fn() -> Box<dyn DialectGenerator> + Send + Sync + 'static,
    {
        if !is_valid_identifier(name) {
            return Err(Error::Registry(format!(
                "`{name}` is not a valid generator name"
            )));
        }
        if Dialect::parse(name).is_some() {
            return Err(Error::Registry(format!(
                "`{name}` would override a built-in generator"
            )));
        }
        if self.custom.contains_key(name) {
            return Err(Error::Registry(format!(
                "a generator named `{name}` is already registered"
            )));
        }
        self.custom.insert(name.to_string(), Box::new(factory));
        Ok(())
    }

    /// Create a fresh generator instance for one run
    pub fn create(&self, name: &str) -> Result<Box<dyn DialectGenerator>, Error> {
        if let Some(dialect) = Dialect::parse(name) {
            return Ok(generators::builtin(dialect));
        }
        match self.custom.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(Error::UnknownDialect(name.to_string())),
        }
    }

    /// All registered names: canonical built-ins first, then custom ones
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        Dialect::ALL
            .iter()
            .map(|d| d.as_str().to_string())
            .chain(self.custom.keys().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullGenerator;

    impl DialectGenerator for NullGenerator {
        fn generate_model(
            &self,
            _table: &Table,
            _state: &mut GenState,
            _relations: &[&Relationship],
            _opts: &GenerateOptions,
        ) -> String {
            String::new()
        }

        fn create_header(
            &self,
            _tables: &[Table],
            _state: &GenState,
            _opts: &GenerateOptions,
        ) -> String {
            String::new()
        }
    }

    #[test]
    fn test_builtins_resolve() {
        let registry = Registry::new();
        for name in ["orm", "record", "validator", "sql", "openapi"] {
            assert!(registry.create(name).is_ok(), "builtin {name}");
        }
        // Legacy aliases resolve to the same generators
        assert!(registry.create("sqlalchemy").is_ok());
        assert!(registry.create("pydantic").is_ok());
    }

    #[test]
    fn test_unknown_dialect() {
        let registry = Registry::new();
        assert!(matches!(
            registry.create("peewee"),
            Err(Error::UnknownDialect(_))
        ));
    }

    #[test]
    fn test_register_custom() {
        let mut registry = Registry::new();
        registry
            .register("my_orm", || Box::new(NullGenerator))
            .unwrap();
        assert!(registry.create("my_orm").is_ok());
        assert!(registry.names().contains(&"my_orm".to_string()));
    }

    #[test]
    fn test_register_rejects_bad_names() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.register("my orm", || Box::new(NullGenerator)),
            Err(Error::Registry(_))
        ));
        assert!(matches!(
            registry.register("orm", || Box::new(NullGenerator)),
            Err(Error::Registry(_))
        ));
        // Aliases of built-ins are protected too
        assert!(matches!(
            registry.register("sqlalchemy", || Box::new(NullGenerator)),
            Err(Error::Registry(_))
        ));

        registry
            .register("my_orm", || Box::new(NullGenerator))
            .unwrap();
        assert!(matches!(
            registry.register("my_orm", || Box::new(NullGenerator)),
            Err(Error::Registry(_))
        ));
    }
}
