//! Sugarcane.
//!
//! Both pathways read the same farming data. The Brazilian pathway swaps in
//! Brazilian electricity, combustion factors and phosphate and lime production.

use fdcic_core::crop::{Crop, CropInputs};
use fdcic_core::errors::FdcicResult;

const DEFAULTS: &str = include_str!("../data/sugarcane.toml");

pub fn sugarcane_inputs() -> FdcicResult<CropInputs> {
    CropInputs::from_toml_str(Crop::Sugarcane, DEFAULTS)
}

pub fn brazilian_sugarcane_inputs() -> FdcicResult<CropInputs> {
    CropInputs::from_toml_str(Crop::BrazilianSugarcane, DEFAULTS)
}
