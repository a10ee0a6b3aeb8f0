//! US rice.
//!
//! The water regime and straw incorporation choices drive the paddy methane
//! item. Activity levels default to zero.

use fdcic_core::crop::{Crop, CropInputs};
use fdcic_core::errors::FdcicResult;

const DEFAULTS: &str = include_str!("../data/rice.toml");

pub fn rice_inputs() -> FdcicResult<CropInputs> {
    CropInputs::from_toml_str(Crop::Rice, DEFAULTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdcic_core::engine::IntensityEngine;
    use fdcic_core::parameters::ParameterTable;

    fn engine() -> IntensityEngine {
        IntensityEngine::new(ParameterTable::shared().unwrap(), rice_inputs().unwrap()).unwrap()
    }

    #[test]
    fn default_table_is_methane() {
        let rice = engine();
        let table = rice.ghg_table().unwrap();
        assert_eq!(table.unit, "g CO2e/cwt");

        let methane = table.get("Rice_CH4_GHG").unwrap();
        assert!(methane > 0.0);
        assert_eq!(rice.ci().unwrap(), methane);
    }

    #[test]
    fn drainage_lowers_methane() {
        let mut rice = engine();
        let flooded = rice.evaluate("Rice_CH4_GHG").unwrap();
        rice.set("Rice_water_regime_during_cultivation", "Multiple drainage period")
            .unwrap();
        assert!(rice.evaluate("Rice_CH4_GHG").unwrap() < flooded);
    }
}
