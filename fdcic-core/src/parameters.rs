//! Crop-independent constants and emission factors.
//!
//! The default table ships inside the crate (`data/parameters.toml`) and is
//! parsed once per process by [`ParameterTable::shared`]. Engines hold it
//! behind an [`Arc`], so any number of engines on any number of threads read
//! the same immutable table.

use crate::errors::FdcicResult;
use crate::variable::{Value, Variable, VariableStore, VariableTable};
use std::path::Path;
use std::sync::{Arc, OnceLock};

const DEFAULT_TABLE: &str = include_str!("../data/parameters.toml");

static SHARED: OnceLock<Arc<ParameterTable>> = OnceLock::new();

/// Read-only table of parameters.
///
/// Values never change after loading. Engines reject overrides of parameter
/// names with [`crate::errors::FdcicError::ReadOnlyParameter`].
#[derive(Debug)]
pub struct ParameterTable {
    version: Option<String>,
    store: VariableStore,
}

impl ParameterTable {
    pub fn new(version: Option<String>, variables: Vec<Variable>) -> FdcicResult<Self> {
        Ok(Self {
            version,
            store: VariableStore::new(variables)?,
        })
    }

    pub fn from_toml_str(content: &str) -> FdcicResult<Self> {
        let table = VariableTable::from_toml_str(content)?;
        Self::new(table.version, table.variables)
    }

    /// Load an alternative table from disk.
    pub fn from_path(path: impl AsRef<Path>) -> FdcicResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// The embedded default table, parsed on first use.
    pub fn shared() -> FdcicResult<Arc<ParameterTable>> {
        if let Some(table) = SHARED.get() {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(Self::from_toml_str(DEFAULT_TABLE)?);
        log::debug!(
            "Loaded {} parameters (version {:?})",
            table.len(),
            table.version()
        );
        // A thread that lost the race adopts the winner's table
        match SHARED.set(Arc::clone(&table)) {
            Ok(()) => Ok(table),
            Err(_) => Ok(SHARED.get().map(Arc::clone).unwrap_or(table)),
        }
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn get(&self, name: &str) -> FdcicResult<&Value> {
        self.store.get(name)
    }

    pub fn get_number(&self, name: &str) -> FdcicResult<f64> {
        self.store.get_number(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains(name)
    }

    pub fn definition(&self, name: &str) -> Option<&Variable> {
        self.store.definition(name)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.store.definitions()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FdcicError;
    use is_close::is_close;

    #[test]
    fn default_table_parses() {
        let table = ParameterTable::shared().unwrap();
        assert_eq!(table.version(), Some("FDCIC-2022"));
        assert!(table.len() > 200, "Only {} parameters loaded", table.len());
        assert_eq!(table.get_number("Diesel_LHV").unwrap(), 128450.0);
        assert_eq!(table.get_number("Btu_per_mmBtu").unwrap(), 1.0e6);
        assert!(is_close!(table.get_number("g_per_ton").unwrap(), 907184.74));
    }

    #[test]
    fn shared_table_is_cached() {
        let a = ParameterTable::shared().unwrap();
        let b = ParameterTable::shared().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn corrected_entries() {
        let table = ParameterTable::shared().unwrap();
        assert_eq!(table.get_number("Urea_N").unwrap(), 0.467);
        // Sorghum herbicide rows exist under their own names
        assert_eq!(
            table.get_number("Herbicide_GSFarming_CO2").unwrap(),
            17.8510998760147
        );
        assert_eq!(
            table.get_number("Herbicide_GSFarming_GHG").unwrap(),
            18.875995540809
        );
        assert!(table.contains("Insecticide_GSFarming_GHG"));
    }

    #[test]
    fn every_parameter_is_numeric() {
        let table = ParameterTable::shared().unwrap();
        for var in table.variables() {
            assert!(
                var.default_value.as_number().is_some(),
                "{} is not numeric",
                var.name
            );
        }
    }

    #[test]
    fn missing_file() {
        let res = ParameterTable::from_path("/definitely/not/here.toml");
        assert!(matches!(res, Err(FdcicError::Io(_))));
    }
}
