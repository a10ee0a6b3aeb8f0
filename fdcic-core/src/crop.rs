//! Crop identity and per-crop farming inputs.
//!
//! A [`Crop`] resolves once into a [`CropProfile`]: the functional unit, the
//! variable holding the yield, the tag used in activity input names and the
//! regional branches (electricity mix, Brazilian production pathways) that the
//! engine needs. Formulas branch on the profile, never on crop names.
//!
//! [`CropInputs`] is the crop-specific variable store. Activity inputs are
//! named `<Input>_<ActivityTag>_val`, e.g. `Diesel_SorghumFarming_val`.

use crate::errors::{FdcicError, FdcicResult};
use crate::variable::{Value, Variable, VariableStore, VariableTable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical alias for the crop's yield variable.
pub const YIELD_ALIAS: &str = "Yield_TS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crop {
    Corn,
    Rice,
    Sorghum,
    Sugarcane,
    BrazilianSugarcane,
}

impl Crop {
    pub const ALL: [Crop; 5] = [
        Crop::Corn,
        Crop::Rice,
        Crop::Sorghum,
        Crop::Sugarcane,
        Crop::BrazilianSugarcane,
    ];

    pub fn profile(self) -> CropProfile {
        let (functional_unit, yield_variable, activity_tag, pesticide_tag) = match self {
            Crop::Corn => ("bu", "CornYield_TS", "CornFarming", "Corn"),
            // No rice pesticide factors exist, corn factors stand in
            Crop::Rice => ("cwt", "RiceYield_TS", "RiceFarming", "Corn"),
            Crop::Sorghum => ("bu", "SorghumYield_TS", "SorghumFarming", "GS"),
            Crop::Sugarcane | Crop::BrazilianSugarcane => {
                ("tonne", "SugarcaneYield_TS", "SugarcaneFarming", "Sugarcane")
            }
        };
        let region = match self {
            Crop::BrazilianSugarcane => Region::Brazil,
            _ => Region::US,
        };
        let electricity_mix = match self {
            Crop::Sorghum => ElectricityMix::SorghumBelt,
            Crop::BrazilianSugarcane => ElectricityMix::Brazil,
            _ => ElectricityMix::UsAverage,
        };

        CropProfile {
            crop: self,
            region,
            electricity_mix,
            functional_unit,
            yield_variable,
            activity_tag,
            pesticide_tag,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Crop::Corn => "Corn",
            Crop::Rice => "Rice",
            Crop::Sorghum => "Sorghum",
            Crop::Sugarcane => "Sugarcane",
            Crop::BrazilianSugarcane => "BrazilianSugarcane",
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    US,
    Brazil,
}

/// Grid mix used for on-farm electricity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElectricityMix {
    UsAverage,
    SorghumBelt,
    Brazil,
}

/// Crop-dependent branches, resolved once per engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropProfile {
    pub crop: Crop,
    pub region: Region,
    pub electricity_mix: ElectricityMix,
    /// Functional unit of the harvested crop
    pub functional_unit: &'static str,
    /// Variable holding the yield, in functional units per acre
    pub yield_variable: &'static str,
    pub activity_tag: &'static str,
    /// Tag of the herbicide and insecticide emission factors
    pub pesticide_tag: &'static str,
}

impl CropProfile {
    /// Name of a per-acre activity input, e.g. `Diesel_CornFarming_val`.
    pub fn activity(&self, input: &str) -> String {
        format!("{}_{}_val", input, self.activity_tag)
    }

    /// Activity input with a qualifier, e.g. `MAP_CornFarming_asNfert_val`.
    pub fn qualified_activity(&self, input: &str, qualifier: &str) -> String {
        format!("{}_{}_{}_val", input, self.activity_tag, qualifier)
    }

    pub fn is_brazil(&self) -> bool {
        self.region == Region::Brazil
    }
}

/// Farming inputs of one crop.
#[derive(Debug, Clone)]
pub struct CropInputs {
    crop: Crop,
    store: VariableStore,
}

impl CropInputs {
    /// Create inputs for a crop from its variable definitions.
    ///
    /// # Errors
    ///
    /// [`FdcicError::UnknownVariable`] if the crop's yield variable is missing
    /// and [`FdcicError::DuplicateVariable`] for repeated names.
    pub fn new(crop: Crop, variables: Vec<Variable>) -> FdcicResult<Self> {
        let store = VariableStore::new(variables)?;
        let yield_variable = crop.profile().yield_variable;
        if !store.contains(yield_variable) {
            return Err(FdcicError::UnknownVariable(yield_variable.to_string()));
        }
        Ok(Self { crop, store })
    }

    pub fn from_toml_str(crop: Crop, content: &str) -> FdcicResult<Self> {
        Self::new(crop, VariableTable::from_toml_str(content)?.variables)
    }

    pub fn crop(&self) -> Crop {
        self.crop
    }

    pub fn profile(&self) -> CropProfile {
        self.crop.profile()
    }

    pub fn functional_unit(&self) -> &'static str {
        self.profile().functional_unit
    }

    /// Map an alias onto the variable it stands for.
    pub fn resolve<'a>(&self, name: &'a str) -> &'a str {
        match (name, self.crop) {
            (YIELD_ALIAS, crop) => crop.profile().yield_variable,
            ("Nfertilizer_source_corn", Crop::Corn) => "Nfertilizer_source",
            _ => name,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains(self.resolve(name))
    }

    pub fn get(&self, name: &str) -> FdcicResult<&Value> {
        self.store.get(self.resolve(name))
    }

    pub fn get_number(&self, name: &str) -> FdcicResult<f64> {
        self.store.get_number(self.resolve(name))
    }

    pub fn get_text(&self, name: &str) -> FdcicResult<&str> {
        self.store.get_text(self.resolve(name))
    }

    /// Override an input, aliases included.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> FdcicResult<()> {
        let name = self.resolve(name);
        self.store.set(name, value)
    }

    /// Yield in functional units per acre.
    pub fn yield_ts(&self) -> FdcicResult<f64> {
        self.get_number(YIELD_ALIAS)
    }

    pub fn set_yield_ts(&mut self, value: f64) -> FdcicResult<()> {
        self.set(YIELD_ALIAS, value)
    }

    pub fn reset(&mut self) {
        self.store.reset()
    }

    pub fn reset_variables(&mut self, variables: &[Variable]) -> FdcicResult<()> {
        self.store.reset_variables(variables)
    }

    pub fn store(&self) -> &VariableStore {
        &self.store
    }
}
