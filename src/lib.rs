//! Feedstock carbon intensity calculator
//!
//! Estimates the greenhouse gas emissions of growing a feedstock crop, per
//! functional unit of harvest (bushel, hundredweight or tonne), from per-acre
//! farming inputs and a table of life-cycle emission factors.
//!
//! # Usage
//!
//! ```no_run
//! use fdcic::{Crop, IntensityEngine, ParameterTable};
//!
//! let inputs = fdcic::inputs_for(Crop::Corn)?;
//! let mut engine = IntensityEngine::new(ParameterTable::shared()?, inputs)?;
//! engine.set("SOC_emission", -0.2)?;
//! println!("{}", engine.ghg_table()?);
//! # Ok::<(), fdcic::FdcicError>(())
//! ```
//!
//! Whole runs can also be described as TOML, see [`scenario::Scenario`].

pub mod scenario;

pub use fdcic_core::categorical;
pub use fdcic_core::crop::{Crop, CropInputs};
pub use fdcic_core::engine::IntensityEngine;
pub use fdcic_core::errors::{FdcicError, FdcicResult};
pub use fdcic_core::parameters::ParameterTable;
pub use fdcic_core::results::{GhgRow, GhgTable, ResultsReporter, CI_WITHOUT_SOC, CI_WITH_SOC};
pub use fdcic_core::variable::{Value, Variable};
pub use fdcic_crops::inputs_for;
pub use scenario::Scenario;
