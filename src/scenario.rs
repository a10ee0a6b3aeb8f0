//! Scenario files.
//!
//! A scenario names a crop, optional overrides of its farming inputs and an
//! optional item list:
//!
//! ```toml
//! crop = "Corn"
//! ghg_items = ["Diesel_GHG", "SOC_GHG"]
//!
//! [overrides]
//! CornYield_TS = 180.0
//! CC_Choice = "Cover crop"
//! ```
//!
//! Parameters cannot be overridden.

use fdcic_core::crop::Crop;
use fdcic_core::engine::IntensityEngine;
use fdcic_core::errors::FdcicResult;
use fdcic_core::parameters::ParameterTable;
use fdcic_core::results::GhgTable;
use fdcic_core::variable::Value;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub crop: Crop,
    /// Replaces the crop's default item list when present.
    #[serde(default)]
    pub ghg_items: Option<Vec<String>>,
    #[serde(default)]
    pub overrides: BTreeMap<String, Value>,
}

impl Scenario {
    pub fn new(crop: Crop) -> Self {
        Self {
            crop,
            ghg_items: None,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_override(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(name.into(), value.into());
        self
    }

    pub fn from_toml_str(content: &str) -> FdcicResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> FdcicResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Engine for the crop's default inputs with the overrides applied.
    pub fn build_engine(&self, parameters: Arc<ParameterTable>) -> FdcicResult<IntensityEngine> {
        let inputs = fdcic_crops::inputs_for(self.crop)?;
        let mut engine = IntensityEngine::new(parameters, inputs)?;
        for (name, value) in &self.overrides {
            debug!("{}: overriding {} with {}", self.crop, name, value);
            engine.set(name, value.clone())?;
        }
        if let Some(items) = &self.ghg_items {
            engine.set_ghg_items(items.iter().cloned());
        }
        Ok(engine)
    }

    /// Build the table using the shared parameter table.
    pub fn run(&self) -> FdcicResult<GhgTable> {
        self.build_engine(ParameterTable::shared()?)?.ghg_table()
    }
}
