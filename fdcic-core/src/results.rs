//! Itemized results and headline carbon intensities.

use crate::crop::Crop;
use crate::engine::IntensityEngine;
use crate::errors::FdcicResult;
use serde::Serialize;
use std::fmt;

pub const CI_WITHOUT_SOC: &str = "CI without SOC";
pub const CI_WITH_SOC: &str = "CI with SOC";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GhgRow {
    pub name: String,
    pub value: f64,
}

/// Itemized emissions of one crop.
///
/// `rows` holds one row per configured item followed by the two aggregate
/// rows, [`CI_WITHOUT_SOC`] then [`CI_WITH_SOC`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GhgTable {
    pub crop: Crop,
    pub functional_unit: String,
    /// e.g. `g CO2e/bu`
    pub unit: String,
    pub rows: Vec<GhgRow>,
}

impl GhgTable {
    /// Rows of the configured items, without the aggregates.
    pub fn items(&self) -> &[GhgRow] {
        &self.rows[..self.rows.len().saturating_sub(2)]
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.rows.iter().find(|r| r.name == name).map(|r| r.value)
    }
}

impl fmt::Display for GhgTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|r| r.name.len())
            .max()
            .unwrap_or(0)
            .max(4);
        writeln!(f, "{} [{}]", self.crop, self.unit)?;
        for (i, row) in self.rows.iter().enumerate() {
            if i + 2 == self.rows.len() {
                writeln!(f, "{}", "-".repeat(width + 16))?;
            }
            writeln!(f, "{:<width$}{:>16.4}", row.name, row.value, width = width)?;
        }
        Ok(())
    }
}

/// Headline numbers of a table built by an engine.
pub struct ResultsReporter<'a> {
    engine: &'a IntensityEngine,
    table: GhgTable,
}

impl<'a> ResultsReporter<'a> {
    pub fn new(engine: &'a IntensityEngine) -> FdcicResult<Self> {
        Ok(Self {
            engine,
            table: engine.ghg_table()?,
        })
    }

    pub fn table(&self) -> &GhgTable {
        &self.table
    }

    pub fn into_table(self) -> GhgTable {
        self.table
    }

    /// Second to last row.
    pub fn ci(&self) -> f64 {
        let rows = &self.table.rows;
        rows[rows.len() - 2].value
    }

    /// Last row.
    pub fn ci_w_soc(&self) -> f64 {
        let rows = &self.table.rows;
        rows[rows.len() - 1].value
    }

    /// Carbon intensity per MJ of ethanol produced from the crop.
    ///
    /// Requires an `Ethanol_yield` input in gal per functional unit.
    pub fn ci_per_mj_ethanol(&self, with_soc: bool) -> FdcicResult<f64> {
        let ci = if with_soc { self.ci_w_soc() } else { self.ci() };
        let btu_per_fu =
            self.engine.evaluate("Ethanol_yield")? * self.engine.evaluate("Ethanol_LHV")?;
        Ok(ci / (btu_per_fu / self.engine.evaluate("Btu_per_MJ")?))
    }
}
