//! Default farming inputs for FDCIC
//!
//! Each crop module embeds a TOML table of per-acre activity data and farm
//! management choices, and builds the [`CropInputs`] an
//! [`IntensityEngine`](fdcic_core::engine::IntensityEngine) evaluates.
//!
//! # Module Organisation
//!
//! - `corn`: US corn, including cover crop, manure and ethanol yield inputs
//! - `rice`: US rice paddy water management choices
//! - `sorghum`: US grain sorghum
//! - `sugarcane`: sugarcane, shared by the US and Brazilian pathways
//!
//! # Placeholders
//!
//! Inputs without reference data (rice activity levels, cover crop and manure
//! use outside corn) are present with zero values so that every default item
//! of a crop can be evaluated.

use fdcic_core::crop::{Crop, CropInputs};
use fdcic_core::errors::FdcicResult;

pub mod corn;
pub mod rice;
pub mod sorghum;
pub mod sugarcane;

/// Default inputs of a crop.
pub fn inputs_for(crop: Crop) -> FdcicResult<CropInputs> {
    log::debug!("Loading default inputs for {}", crop);
    match crop {
        Crop::Corn => corn::corn_inputs(),
        Crop::Rice => rice::rice_inputs(),
        Crop::Sorghum => sorghum::sorghum_inputs(),
        Crop::Sugarcane => sugarcane::sugarcane_inputs(),
        Crop::BrazilianSugarcane => sugarcane::brazilian_sugarcane_inputs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdcic_core::engine::IntensityEngine;
    use fdcic_core::parameters::ParameterTable;

    #[test]
    fn every_crop_builds_a_default_table() {
        let parameters = ParameterTable::shared().unwrap();
        for crop in Crop::ALL {
            let inputs = inputs_for(crop).unwrap();
            assert_eq!(inputs.crop(), crop);

            let engine = IntensityEngine::new(parameters.clone(), inputs).unwrap();
            engine.validate().unwrap();
            let table = engine
                .ghg_table()
                .unwrap_or_else(|e| panic!("default table for {} failed: {}", crop, e));
            assert_eq!(table.crop, crop);
            for row in &table.rows {
                assert!(row.value.is_finite(), "{} for {} is {}", row.name, crop, row.value);
            }
        }
    }

    #[test]
    fn default_tables_do_not_shadow_parameters() {
        let parameters = ParameterTable::shared().unwrap();
        for crop in Crop::ALL {
            let inputs = inputs_for(crop).unwrap();
            for name in inputs.store().names() {
                assert!(
                    !parameters.contains(name),
                    "{} input {} is also a parameter",
                    crop,
                    name
                );
            }
        }
    }
}
