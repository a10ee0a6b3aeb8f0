//! US grain sorghum.
//!
//! Farm electricity uses the sorghum-belt grid mix and pesticides the `GS`
//! factors.

use fdcic_core::crop::{Crop, CropInputs};
use fdcic_core::errors::FdcicResult;

const DEFAULTS: &str = include_str!("../data/sorghum.toml");

pub fn sorghum_inputs() -> FdcicResult<CropInputs> {
    CropInputs::from_toml_str(Crop::Sorghum, DEFAULTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdcic_core::engine::IntensityEngine;
    use fdcic_core::errors::FdcicError;
    use fdcic_core::parameters::ParameterTable;
    use is_close::is_close;

    #[test]
    fn defaults() {
        let inputs = sorghum_inputs().unwrap();
        assert!(is_close!(inputs.yield_ts().unwrap(), 81.7847222222222));
        assert_eq!(inputs.get_number("LPG_SorghumFarming_val").unwrap(), 0.0);
        assert_eq!(inputs.get_text("Tillage_Choice").unwrap(), "No till");
    }

    #[test]
    fn field_n2o_is_not_available() {
        let engine =
            IntensityEngine::new(ParameterTable::shared().unwrap(), sorghum_inputs().unwrap())
                .unwrap();
        let table = engine.ghg_table().unwrap();
        assert!(table.get("N2O_Fert_and_Res_GHG").is_none());
        assert_eq!(table.get("LPG_GHG"), Some(0.0));
        assert!(matches!(
            engine.evaluate("N2O_Fert_and_Res_GHG"),
            Err(FdcicError::UnsupportedCropBranch { crop, .. }) if crop == "Sorghum"
        ));
    }
}
