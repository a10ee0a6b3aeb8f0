//! Core of the feedstock carbon intensity calculator.
//!
//! Farming inputs of a crop ([`crop::CropInputs`]) are combined with a shared
//! table of constants and emission factors ([`parameters::ParameterTable`]) by an
//! [`engine::IntensityEngine`], which reports the greenhouse gas emissions of
//! each farming input per functional unit of harvested crop.

pub mod categorical;
pub mod crop;
pub mod engine;
pub mod errors;
pub mod parameters;
pub mod results;
pub mod variable;
