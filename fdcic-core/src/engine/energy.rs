//! Upstream emission factors, fuel characterization factors and farm energy use.
//!
//! Upstream factors are GWP-weighted sums of the CO2, CH4 and N2O intensities
//! in the parameter table, in g CO2e per mmBtu of fuel or per ton of chemical.
//! Fuel characterization factors (`CF_*`) add on-farm combustion and are
//! expressed per Btu.

use super::{Evaluation, Quantity};
use crate::categorical::{CoverCrop, Manure};
use crate::crop::ElectricityMix;
use crate::errors::FdcicResult;

pub(crate) static QUANTITIES: &[Quantity] = &[
    // Upstream, g CO2e/mmBtu
    Quantity::new("Diesel_Upstream_GHG", "g CO2e/mmBtu", |ev| {
        ev.co2e("Diesel_upstream_CO2", "Diesel_upstream_CH4", "Diesel_upstream_N2O")
    }),
    Quantity::new("Gasoline_Upstream_GHG", "g CO2e/mmBtu", |ev| {
        ev.co2e("GB_upstream_CO2", "GB_upstream_CH4", "GB_upstream_N2O")
    }),
    Quantity::new("NG_Upstream_GHG", "g CO2e/mmBtu", |ev| {
        ev.co2e(
            "NG_upstream_CO2_for_StationaryFuel",
            "NG_upstream_CH4_for_StationaryFuel",
            "NG_upstream_N2O_for_StationaryFuel",
        )
    }),
    Quantity::new("NG_Feedstock_Upstream_GHG", "g CO2e/mmBtu", |ev| {
        ev.co2e(
            "NG_upstream_CO2_for_Ammonia",
            "NG_upstream_CH4_for_Ammonia",
            "NG_upstream_N2O_for_Ammonia",
        )
    }),
    Quantity::new("LPG_Upstream_GHG", "g CO2e/mmBtu", |ev| {
        ev.co2e("LPG_upstream_CO2", "LPG_upstream_CH4", "LPG_upstream_N2O")
    }),
    Quantity::new("RO_Upstream_GHG", "g CO2e/mmBtu", |ev| {
        ev.co2e("RO_upstream_CO2", "RO_upstream_CH4", "RO_upstream_N2O")
    }),
    Quantity::new("Coal_Upstream_GHG", "g CO2e/mmBtu", |ev| {
        ev.co2e("Coal_upstream_CO2", "Coal_upstream_CH4", "Coal_upstream_N2O")
    }),
    Quantity::new("Electricity_Upstream_GHG", "g CO2e/mmBtu", |ev| {
        ev.co2e(
            "Electricity_upstream_CO2",
            "Electricity_upstream_CH4",
            "Electricity_upstream_N2O",
        )
    }),
    Quantity::new("Brazilian_Electricity_Upstream_GHG", "g CO2e/mmBtu", |ev| {
        ev.co2e(
            "Electricity_Brazilian_upstream_CO2",
            "Electricity_Brazilian_upstream_CH4",
            "Electricity_Brazilian_upstream_N2O",
        )
    }),
    Quantity::new(
        "Farm_Electricity_Upstream_GHG",
        "g CO2e/mmBtu",
        farm_electricity_upstream,
    ),
    // Upstream, g CO2e/ton
    Quantity::new("H2_Upstream_GHG", "g CO2e/ton", |ev| {
        ev.co2e("H2_upstream_CO2", "H2_upstream_CH4", "H2_upstream_N2O")
    }),
    Quantity::new("N2_Upstream_GHG", "g CO2e/ton", |ev| {
        ev.co2e(
            "Cryogenic_Nitrogen_for_Ammonia_CO2",
            "Cryogenic_Nitrogen_for_Ammonia_CH4",
            "Cryogenic_Nitrogen_for_Ammonia_N2O",
        )
    }),
    Quantity::new("SA_Upstream_GHG", "g CO2e/ton", |ev| {
        ev.co2e("SA_Upstream_CO2", "SA_Upstream_CH4", "SA_Upstream_N2O")
    }),
    Quantity::new("SA_Brazilian_Upstream_GHG", "g CO2e/ton", |ev| {
        ev.co2e(
            "SA_Brazilian_Upstream_CO2",
            "SA_Brazilian_Upstream_CH4",
            "SA_Brazilian_Upstream_N2O",
        )
    }),
    Quantity::new("PA_Upstream_GHG", "g CO2e/ton", |ev| {
        ev.co2e("PA_Upstream_CO2", "PA_Upstream_CH4", "PA_Upstream_N2O")
    }),
    Quantity::new("PhosRock_Upstream_GHG", "g CO2e/ton", |ev| {
        ev.co2e(
            "PhosRock_Brazilian_Upstream_CO2",
            "PhosRock_Brazilian_Upstream_CH4",
            "PhosRock_Brazilian_Upstream_N2O",
        )
    }),
    Quantity::new("NA_Brazilian_Upstream_GHG", "g CO2e/ton", |ev| {
        ev.co2e(
            "NA_Brazilian_Upstream_CO2",
            "NA_Brazilian_Upstream_CH4",
            "NA_Brazilian_Upstream_N2O",
        )
    }),
    // Fuel characterization factors, g CO2e/Btu
    Quantity::new("CF_Diesel", "g CO2e/Btu", |ev| {
        let combustion = if ev.profile().is_brazil() {
            "SugarcaneFarming_DieselCons_GHG"
        } else {
            "CornFarming_DieselCons_GHG"
        };
        fuel_cf(ev, combustion, "Diesel_Upstream_GHG")
    }),
    Quantity::new("CF_Gasoline", "g CO2e/Btu", |ev| {
        let combustion = if ev.profile().is_brazil() {
            "SugarcaneFarming_GasolineCons_GHG"
        } else {
            "CornFarming_GBCons_GHG"
        };
        fuel_cf(ev, combustion, "Gasoline_Upstream_GHG")
    }),
    Quantity::new("CF_NG", "g CO2e/Btu", |ev| {
        fuel_cf(ev, "CornFarming_NGCons_GHG", "NG_Upstream_GHG")
    }),
    Quantity::new("CF_LPG", "g CO2e/Btu", |ev| {
        fuel_cf(ev, "CornFarming_LPGCons_GHG", "LPG_Upstream_GHG")
    }),
    Quantity::new("CF_Electricity", "g CO2e/Btu", |ev| {
        Ok(ev.derived("Farm_Electricity_Upstream_GHG")? / ev.var("Btu_per_mmBtu")?)
    }),
    // Farm energy use, Btu/fu
    Quantity::new("Diesel_Farming", "Btu/fu", |ev| {
        farming_energy(ev, "Diesel", "Diesel_LHV")
    }),
    Quantity::new("Gasoline_Farming", "Btu/fu", |ev| {
        farming_energy(ev, "Gasoline", "Gasoline_LHV")
    }),
    Quantity::new("NG_Farming", "Btu/fu", |ev| {
        farming_energy(ev, "NG", "NG_LHV")
    }),
    Quantity::new("LPG_Farming", "Btu/fu", |ev| {
        farming_energy(ev, "LPG", "LPG_LHV")
    }),
    Quantity::new("Electricity_Farming", "Btu/fu", |ev| {
        farming_energy(ev, "Electricity", "Electricity_LHV")
    }),
    Quantity::new("Diesel_RyeCCFarming", "Btu/fu", |ev| {
        match ev.choice::<CoverCrop>()? {
            CoverCrop::CoverCrop => ev.per_yield(ev.var("Diesel_RyeCCFarming_val")?),
            CoverCrop::NoCoverCrop => Ok(0.0),
        }
    }),
    Quantity::new("Diesel_ManureApplication", "Btu/fu", |ev| {
        match ev.choice::<Manure>()? {
            Manure::Manure => ev.per_yield(ev.var("Diesel_ManureApplication_val")?),
            Manure::NoManure => Ok(0.0),
        }
    }),
    Quantity::new("Diesel_ManureTransportation", "Btu/fu", |ev| {
        match ev.choice::<Manure>()? {
            Manure::Manure => ev.per_yield(
                ev.var("Manure_AppTot")?
                    * ev.var("Diesel_ManureTransportation_distance")?
                    * ev.var("Diesel_ManureTransportation_fuel")?,
            ),
            Manure::NoManure => Ok(0.0),
        }
    }),
    // Items, g CO2e/fu
    Quantity::new("Diesel_GHG", "g CO2e/fu", |ev| {
        let diesel = ev.derived("Diesel_Farming")?
            + ev.derived("Diesel_RyeCCFarming")?
            + ev.derived("Diesel_ManureApplication")?
            + ev.derived("Diesel_ManureTransportation")?;
        Ok(diesel * ev.derived("CF_Diesel")?)
    }),
    Quantity::new("Gasoline_GHG", "g CO2e/fu", |ev| {
        Ok(ev.derived("Gasoline_Farming")? * ev.derived("CF_Gasoline")?)
    }),
    Quantity::new("NG_GHG", "g CO2e/fu", |ev| {
        Ok(ev.derived("NG_Farming")? * ev.derived("CF_NG")?)
    }),
    Quantity::new("LPG_GHG", "g CO2e/fu", |ev| {
        Ok(ev.derived("LPG_Farming")? * ev.derived("CF_LPG")?)
    }),
    Quantity::new("Electricity_GHG", "g CO2e/fu", |ev| {
        Ok(ev.derived("Electricity_Farming")? * ev.derived("CF_Electricity")?)
    }),
];

fn farm_electricity_upstream(ev: &Evaluation<'_>) -> FdcicResult<f64> {
    match ev.profile().electricity_mix {
        ElectricityMix::UsAverage => ev.derived("Electricity_Upstream_GHG"),
        ElectricityMix::SorghumBelt => ev.co2e(
            "Electricity_upstream_CO2_GSfarming",
            "Electricity_upstream_CH4_GSfarming",
            "Electricity_upstream_N2O_GSfarming",
        ),
        ElectricityMix::Brazil => ev.derived("Brazilian_Electricity_Upstream_GHG"),
    }
}

/// On-farm combustion plus upstream, per Btu.
fn fuel_cf(ev: &Evaluation<'_>, combustion: &str, upstream: &str) -> FdcicResult<f64> {
    Ok(ev.var(combustion)? + ev.derived(upstream)? / ev.var("Btu_per_mmBtu")?)
}

/// Per-acre fuel or electricity use converted to Btu per functional unit.
fn farming_energy(ev: &Evaluation<'_>, input: &str, heating_value: &str) -> FdcicResult<f64> {
    let per_acre = ev.var(&ev.profile().activity(input))?;
    ev.per_yield(per_acre * ev.var(heating_value)?)
}

#[cfg(test)]
mod tests {
    use crate::crop::{Crop, CropInputs};
    use crate::engine::IntensityEngine;
    use crate::parameters::ParameterTable;
    use crate::variable::Variable;
    use is_close::is_close;

    fn engine(crop: Crop, extra: Vec<Variable>) -> IntensityEngine {
        let mut variables = vec![
            Variable::new(crop.profile().yield_variable, 100.0, ""),
            Variable::new(crop.profile().activity("Diesel"), 10.0, "gal/acre"),
            Variable::new(crop.profile().activity("Electricity"), 50.0, "kWh/acre"),
            Variable::new("CC_Choice", "No cover crop", ""),
            Variable::new("Manure_Choice", "No manure", ""),
            Variable::new("Diesel_RyeCCFarming_val", 62060.0, "Btu/acre"),
            Variable::new("Diesel_ManureApplication_val", 221365.589648777, "Btu/acre"),
            Variable::new("Manure_AppTot", 7.854, "ton/acre"),
            Variable::new("Diesel_ManureTransportation_distance", 0.367, "mile"),
            Variable::new("Diesel_ManureTransportation_fuel", 10416.49299, "Btu/ton/mile"),
        ];
        variables.extend(extra);
        let inputs = CropInputs::new(crop, variables).unwrap();
        IntensityEngine::new(ParameterTable::shared().unwrap(), inputs).unwrap()
    }

    #[test]
    fn diesel_farming_is_per_functional_unit() {
        let engine = engine(Crop::Corn, vec![]);
        let farming = engine.evaluate("Diesel_Farming").unwrap();
        assert!(is_close!(farming, 10.0 * 128450.0 / 100.0));
    }

    #[test]
    fn diesel_cf_adds_upstream_per_btu() {
        let engine = engine(Crop::Corn, vec![]);
        let params = engine.parameters().clone();
        let upstream = params.get_number("Diesel_upstream_CO2").unwrap()
            + params.get_number("Diesel_upstream_CH4").unwrap() * 29.8
            + params.get_number("Diesel_upstream_N2O").unwrap() * 273.0;
        let expected =
            params.get_number("CornFarming_DieselCons_GHG").unwrap() + upstream / 1.0e6;
        assert!(is_close!(engine.evaluate("CF_Diesel").unwrap(), expected));
    }

    #[test]
    fn diesel_scales_linearly_with_activity() {
        let mut engine = engine(Crop::Corn, vec![]);
        let base = engine.evaluate("Diesel_GHG").unwrap();
        engine.set("Diesel_CornFarming_val", 30.0).unwrap();
        let tripled = engine.evaluate("Diesel_GHG").unwrap();
        assert!(is_close!(tripled, 3.0 * base), "{} != 3 * {}", tripled, base);
    }

    #[test]
    fn cover_crop_and_manure_diesel_are_conditional() {
        let mut engine = engine(Crop::Corn, vec![]);
        assert_eq!(engine.evaluate("Diesel_RyeCCFarming").unwrap(), 0.0);
        assert_eq!(engine.evaluate("Diesel_ManureApplication").unwrap(), 0.0);
        assert_eq!(engine.evaluate("Diesel_ManureTransportation").unwrap(), 0.0);
        let without = engine.evaluate("Diesel_GHG").unwrap();

        engine.set("CC_Choice", "Cover crop").unwrap();
        engine.set("Manure_Choice", "Manure").unwrap();
        assert!(is_close!(
            engine.evaluate("Diesel_RyeCCFarming").unwrap(),
            620.6
        ));
        assert!(is_close!(
            engine.evaluate("Diesel_ManureTransportation").unwrap(),
            7.854 * 0.367 * 10416.49299 / 100.0
        ));
        assert!(engine.evaluate("Diesel_GHG").unwrap() > without);
    }

    #[test]
    fn farm_electricity_follows_crop_mix() {
        let corn = engine(Crop::Corn, vec![]);
        let sorghum = engine(Crop::Sorghum, vec![]);
        let brazil = engine(Crop::BrazilianSugarcane, vec![]);

        let us = corn.evaluate("Electricity_Upstream_GHG").unwrap();
        assert_eq!(corn.evaluate("Farm_Electricity_Upstream_GHG").unwrap(), us);
        assert_ne!(sorghum.evaluate("Farm_Electricity_Upstream_GHG").unwrap(), us);
        assert_eq!(
            brazil.evaluate("Farm_Electricity_Upstream_GHG").unwrap(),
            brazil.evaluate("Brazilian_Electricity_Upstream_GHG").unwrap()
        );
    }

    #[test]
    fn brazil_uses_sugarcane_combustion_factor() {
        let us = engine(Crop::Sugarcane, vec![]);
        let brazil = engine(Crop::BrazilianSugarcane, vec![]);
        let difference = brazil.evaluate("CF_Diesel").unwrap() - us.evaluate("CF_Diesel").unwrap();
        let params = us.parameters().clone();
        let expected = params.get_number("SugarcaneFarming_DieselCons_GHG").unwrap()
            - params.get_number("CornFarming_DieselCons_GHG").unwrap();
        assert!((difference - expected).abs() < 1e-12);
    }

    #[test]
    fn invalid_cover_crop_choice() {
        let mut engine = engine(Crop::Corn, vec![]);
        engine.set("CC_Choice", "Rye").unwrap();
        assert!(engine.evaluate("Diesel_GHG").is_err());
    }
}
