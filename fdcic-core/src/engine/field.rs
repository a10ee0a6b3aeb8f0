//! Emissions released in the field.
//!
//! Fertilizer and residue N2O is only defined for corn; rice paddy methane
//! only for rice. Other crops fail with
//! [`crate::errors::FdcicError::UnsupportedCropBranch`] rather than reporting zero.

use super::{Evaluation, Quantity};
use crate::categorical::{
    ClimateZone, CoverCrop, Manure, NitrogenManagement, StrawIncorporation,
    WaterRegimeCultivation, WaterRegimePreSeason,
};
use crate::crop::Crop;
use crate::errors::FdcicResult;

/// Fertilizer products contributing synthetic nitrogen.
const SYNTHETIC_N: [&str; 7] = [
    "Ammonia_Farming",
    "Urea_Farming",
    "AN_Farming",
    "AS_Farming",
    "UAN_Farming",
    "MAP_N_Farming",
    "DAP_N_Farming",
];

const LIVESTOCK: [&str; 4] = ["Swine", "Dairy", "Cattle", "Chicken"];

pub(crate) static QUANTITIES: &[Quantity] = &[
    // Nitrogen reaching the field, g N/fu
    Quantity::new("Synthetic_N_Farming", "g N/fu", |ev| {
        SYNTHETIC_N.iter().map(|name| ev.derived(name)).sum()
    }),
    Quantity::new("RyeCCfarming_Ninbiomass_residue", "g N/fu", |ev| {
        match ev.choice::<CoverCrop>()? {
            CoverCrop::CoverCrop => ev.per_yield(
                ev.var("RyeCCfarming_Ninbiomass_residue_val")?
                    * ev.var("RyeCCfarming_Ncontent")?
                    * ev.var("g_per_ton")?,
            ),
            CoverCrop::NoCoverCrop => Ok(0.0),
        }
    }),
    Quantity::new("Manure_N", "g N/fu", |ev| match ev.choice::<Manure>()? {
        Manure::Manure => {
            let mut n_per_ton = 0.0;
            for animal in LIVESTOCK {
                n_per_ton += ev.var(&format!("Manure_AppRatio_{}", animal))?
                    * ev.var(&format!("{}_manure_N", animal))?;
            }
            ev.per_yield(ev.var("Manure_AppTot")? * n_per_ton)
        }
        Manure::NoManure => Ok(0.0),
    }),
    // Corn N2O
    Quantity::new("Fertilizer_Direct_N2O_N", "g N2O-N/fu", fertilizer_direct_n2o),
    Quantity::new("Fertilizer_Indirect_N2O_N", "g N2O-N/fu", |ev| {
        corn_only(ev, "Fertilizer_Indirect_N2O_N")?;
        let zone = ev.choice::<ClimateZone>()?;
        Ok(zone.indirect_n2o_factor() * ev.derived("Synthetic_N_Farming")?)
    }),
    Quantity::new("N2O_N_Fert_and_Res", "g N2O-N/fu", |ev| {
        corn_only(ev, "N2O_N_Fert_and_Res")?;
        Ok(ev.derived("Fertilizer_Direct_N2O_N")?
            + ev.derived("Fertilizer_Indirect_N2O_N")?
            + ev.var("Cornfarming_Ninbiomass_residue")? * ev.var("Cornfarming_biomass_N2O_factor")?
            + ev.derived("RyeCCfarming_Ninbiomass_residue")?
                * ev.var("RyeCCfarming_biomass_N2O_factor")?
            + ev.derived("Manure_N")? * ev.var("Manure_N2O_factor")?)
    }),
    Quantity::new("N2O_Fert_and_Res_GHG", "g CO2e/fu", |ev| {
        corn_only(ev, "N2O_Fert_and_Res_GHG")?;
        Ok(ev.derived("N2O_N_Fert_and_Res")?
            * ev.var("N2O_N_to_N2O")?
            * ev.var("N2O_GWP")?)
    }),
    // CO2 from urea hydrolysis and liming
    Quantity::new("Urea_CO2_GHG", "g CO2e/fu", |ev| {
        Ok(ev.derived("Urea_Farming")? * ev.var("Urea_N_to_CO2")? * ev.var("CO2_GWP")?)
    }),
    Quantity::new("Lime_CO2_GHG", "g CO2e/fu", |ev| {
        Ok(ev.derived("CaCO3_Farming")?
            * ev.var("CO2_content_in_CaCO3")?
            * ev.var("Percent_Lime_Acidified")?
            * ev.var("CO2_GWP")?)
    }),
    // Rice paddy methane
    Quantity::new("SFw", "", |ev| {
        Ok(ev.choice::<WaterRegimeCultivation>()?.scaling_factor())
    }),
    Quantity::new("SFp", "", |ev| {
        Ok(ev.choice::<WaterRegimePreSeason>()?.scaling_factor())
    }),
    Quantity::new("Rice_amendment_factor", "", |ev| {
        Ok(ev.choice::<StrawIncorporation>()?.amendment_factor())
    }),
    Quantity::new("SFo", "", |ev| {
        let straw = ev.var("Rice_straw_application_rate")? * ev.derived("Rice_amendment_factor")?;
        Ok((1.0 + straw).powf(0.59))
    }),
    Quantity::new("Annual_CH4_emission_from_rice_field", "kg CH4/ha", |ev| {
        rice_only(ev, "Annual_CH4_emission_from_rice_field")?;
        Ok(ev.var("EFc")?
            * ev.derived("SFw")?
            * ev.derived("SFp")?
            * ev.derived("SFo")?
            * ev.var("Rice_cultivation_period")?)
    }),
    Quantity::new("Rice_CH4_GHG", "g CO2e/fu", |ev| {
        rice_only(ev, "Rice_CH4_GHG")?;
        let per_acre = ev.derived("Annual_CH4_emission_from_rice_field")? * ev.var("g_per_kg")?
            / ev.var("acre_per_hectare")?;
        Ok(ev.per_yield(per_acre)? * ev.var("Biogenic_CH4_GWP")?)
    }),
    // Soil organic carbon, positive is emission
    Quantity::new("SOC_GHG", "g CO2e/fu", |ev| {
        let per_acre = ev.var("SOC_emission")? * ev.var("g_per_kg")? * ev.var("CO2_C_to_CO2")?
            / ev.var("acre_per_hectare")?;
        Ok(ev.per_yield(per_acre)? * ev.var("CO2_GWP")?)
    }),
];

fn fertilizer_direct_n2o(ev: &Evaluation<'_>) -> FdcicResult<f64> {
    corn_only(ev, "Fertilizer_Direct_N2O_N")?;
    match ev.choice::<NitrogenManagement>()? {
        NitrogenManagement::BusinessAsUsual => {
            let zone = ev.choice::<ClimateZone>()?;
            Ok(zone.direct_n2o_factor() * ev.derived("Synthetic_N_Farming")?)
        }
        // Empirical response to the nitrogen balance, kg N2O-N/ha
        NitrogenManagement::FourR => {
            let per_hectare = (0.339 + 0.0047 * ev.var("N_balance_assumed")?).exp();
            ev.per_yield(per_hectare * ev.var("g_per_kg")? / ev.var("acre_per_hectare")?)
        }
    }
}

fn corn_only(ev: &Evaluation<'_>, quantity: &str) -> FdcicResult<()> {
    match ev.crop() {
        Crop::Corn => Ok(()),
        _ => Err(ev.unsupported(quantity)),
    }
}

fn rice_only(ev: &Evaluation<'_>, quantity: &str) -> FdcicResult<()> {
    match ev.crop() {
        Crop::Rice => Ok(()),
        _ => Err(ev.unsupported(quantity)),
    }
}
