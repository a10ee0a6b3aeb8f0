//! Default itemized rows per crop.

use crate::crop::Crop;

const ENERGY: [&str; 5] = [
    "Diesel_GHG",
    "Gasoline_GHG",
    "NG_GHG",
    "LPG_GHG",
    "Electricity_GHG",
];

const NITROGEN: [&str; 5] = ["Ammonia_GHG", "Urea_GHG", "AN_GHG", "AS_GHG", "UAN_GHG"];

const PHOSPHATE: [&str; 2] = ["MAP_GHG", "DAP_GHG"];

const OTHER_INPUTS: [&str; 4] = ["K2O_GHG", "CaCO3_GHG", "Herbicide_GHG", "Insecticide_GHG"];

const FIELD_CO2: [&str; 2] = ["Urea_CO2_GHG", "Lime_CO2_GHG"];

/// Ordered items reported for a crop, ending with `SOC_GHG`.
///
/// Field N2O is only listed for corn, the one crop with a formula for it.
pub fn default_ghg_items(crop: Crop) -> Vec<String> {
    let mut items: Vec<&str> = ENERGY.to_vec();
    match crop {
        Crop::Sugarcane | Crop::BrazilianSugarcane => {
            items.extend(["Ammonia_GHG", "Urea_GHG", "AN_GHG", "P2O5_GHG"]);
        }
        _ => {
            items.extend(NITROGEN);
            items.extend(PHOSPHATE);
        }
    }
    items.extend(OTHER_INPUTS);
    if crop == Crop::Corn {
        items.push("N2O_Fert_and_Res_GHG");
    }
    items.extend(FIELD_CO2);
    if crop == Crop::Rice {
        items.push("Rice_CH4_GHG");
    }
    items.push(super::SOC_ITEM);
    items.into_iter().map(String::from).collect()
}
