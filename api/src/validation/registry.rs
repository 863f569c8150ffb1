use std::collections::HashMap;

use super::definitions;
use super::schema::{Schema, SchemaError, SchemaName};

/// Immutable lookup table of every request schema
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<SchemaName, Schema>,
}

impl SchemaRegistry {
    /// Registry holding the built-in schema set
    pub fn new() -> Self {
        Self::from_schemas(definitions::all())
    }

    pub fn from_schemas(schemas: impl IntoIterator<Item = Schema>) -> Self {
        Self {
            schemas: schemas.into_iter().map(|s| (s.name, s)).collect(),
        }
    }

    pub fn get(&self, name: SchemaName) -> Result<&Schema, SchemaError> {
        self.schemas
            .get(&name)
            .ok_or(SchemaError::NotRegistered(name))
    }

    /// Startup wiring check: every known name must have a schema
    pub fn verify(&self) -> Result<(), SchemaError> {
        for name in SchemaName::ALL {
            self.get(name)?;
        }
        Ok(())
    }

    /// Schemas in declaration order of [`SchemaName::ALL`]
    pub fn iter(&self) -> impl Iterator<Item = &Schema> + '_ {
        SchemaName::ALL
            .into_iter()
            .filter_map(move |name| self.schemas.get(&name))
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::schema::Location;

    #[test]
    fn test_builtin_registry_is_complete() {
        let registry = SchemaRegistry::new();
        assert!(registry.verify().is_ok());
        assert_eq!(registry.iter().count(), SchemaName::ALL.len());
    }

    #[test]
    fn test_missing_schema_fails_verification() {
        let registry =
            SchemaRegistry::from_schemas(vec![Schema::new(SchemaName::Login, Location::Body)]);
        assert!(registry.get(SchemaName::Login).is_ok());
        assert_eq!(
            registry.verify(),
            Err(SchemaError::NotRegistered(SchemaName::Register))
        );
    }
}
