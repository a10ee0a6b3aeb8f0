//! US corn.
//!
//! Activity data are national averages per planted acre. The default farm
//! uses no cover crop and no manure; `SOC_emission` is the soil carbon change
//! for Champaign, IL.

use fdcic_core::crop::{Crop, CropInputs};
use fdcic_core::errors::FdcicResult;

const DEFAULTS: &str = include_str!("../data/corn.toml");

pub fn corn_inputs() -> FdcicResult<CropInputs> {
    CropInputs::from_toml_str(Crop::Corn, DEFAULTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdcic_core::engine::IntensityEngine;
    use fdcic_core::parameters::ParameterTable;
    use fdcic_core::results::ResultsReporter;
    use is_close::is_close;

    fn engine() -> IntensityEngine {
        IntensityEngine::new(ParameterTable::shared().unwrap(), corn_inputs().unwrap()).unwrap()
    }

    fn assert_within(name: &str, value: f64, low: f64, high: f64) {
        assert!(
            value.is_finite() && value >= low && value <= high,
            "{} = {} outside [{}, {}]",
            name,
            value,
            low,
            high
        );
    }

    #[test]
    fn defaults() {
        let inputs = corn_inputs().unwrap();
        assert!(is_close!(inputs.yield_ts().unwrap(), 178.4));
        assert_eq!(inputs.get_text("CC_Choice").unwrap(), "No cover crop");
        assert_eq!(inputs.get_text("Nfertilizer_source_corn").unwrap(), "Conventional");
        assert_eq!(inputs.functional_unit(), "bu");
    }

    #[test]
    fn default_items_are_in_range() {
        let table = engine().ghg_table().unwrap();
        assert_eq!(table.unit, "g CO2e/bu");
        assert_eq!(table.rows.len(), 22);

        assert_within("Diesel_GHG", table.get("Diesel_GHG").unwrap(), 400.0, 600.0);
        assert_within("Ammonia_GHG", table.get("Ammonia_GHG").unwrap(), 300.0, 600.0);
        assert_within(
            "N2O_Fert_and_Res_GHG",
            table.get("N2O_Fert_and_Res_GHG").unwrap(),
            2000.0,
            5000.0,
        );
        for row in table.items() {
            if row.name != "SOC_GHG" {
                assert!(row.value >= 0.0, "{} = {}", row.name, row.value);
            }
        }
    }

    #[test]
    fn headline_intensities() {
        let corn = engine();
        let reporter = ResultsReporter::new(&corn).unwrap();
        assert_within("CI", reporter.ci(), 1.0e3, 1.0e5);
        assert!((reporter.ci_w_soc() - reporter.ci() - 3.96).abs() < 0.01);

        // Ethanol_yield is part of the corn defaults
        let per_mj = reporter.ci_per_mj_ethanol(false).unwrap();
        assert_within("CI per MJ", per_mj, 5.0, 60.0);
    }

    #[test]
    fn management_choices_change_the_table() {
        let mut corn = engine();
        let baseline = corn.ci().unwrap();

        corn.set("CC_Choice", "Cover crop").unwrap();
        corn.set("Manure_Choice", "Manure").unwrap();
        let managed = corn.ghg_table().unwrap();
        assert!(managed.get("Diesel_GHG").unwrap() > 0.0);
        assert!(corn.ci().unwrap() > baseline);

        corn.reset();
        assert_eq!(corn.ci().unwrap(), baseline);
    }
}
