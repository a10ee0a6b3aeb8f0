//! Carbon-intensity engine.
//!
//! An [`IntensityEngine`] combines the shared [`ParameterTable`] with the
//! [`CropInputs`] of one calculation into a single variable view, and evaluates
//! derived quantities over it. Derived quantities are pure functions registered
//! by name in a static [`Quantity`] catalogue:
//!
//! - [`energy`]: upstream factors, fuel characterization factors and farm fuel use
//! - [`fertilizer`]: chemical characterization factors and fertilizer/pesticide items
//! - [`field`]: field N2O, CO2 from urea and lime, rice methane and soil carbon
//! - [`items`]: default item lists per crop
//!
//! Quantities are computed on demand by an [`Evaluation`], which caches results
//! and records the dependency graph for the duration of one table build. The
//! engine itself holds no interior mutability, so it is `Send + Sync`.

pub mod energy;
pub mod fertilizer;
pub mod field;
pub mod items;

use crate::categorical::{
    Categorical, ClimateZone, CoverCrop, Manure, NitrogenManagement, NitrogenSource,
    StrawIncorporation, Tillage, WaterRegimeCultivation, WaterRegimePreSeason,
};
use crate::crop::{Crop, CropInputs, CropProfile};
use crate::errors::{FdcicError, FdcicResult};
use crate::parameters::ParameterTable;
use crate::results::{GhgRow, GhgTable, ResultsReporter, CI_WITHOUT_SOC, CI_WITH_SOC};
use crate::variable::Value;
use log::{debug, info, warn};
use petgraph::dot::{Config, Dot};
use petgraph::graph::NodeIndex;
use petgraph::Graph;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Name of the soil organic carbon item, excluded from the CI without SOC.
pub const SOC_ITEM: &str = "SOC_GHG";

pub(crate) type Compute = fn(&Evaluation<'_>) -> FdcicResult<f64>;

/// A named derived quantity.
pub struct Quantity {
    pub name: &'static str,
    /// Descriptive unit; `fu` stands for the crop's functional unit
    pub unit: &'static str,
    compute: Compute,
}

impl Quantity {
    pub(crate) const fn new(name: &'static str, unit: &'static str, compute: Compute) -> Self {
        Self {
            name,
            unit,
            compute,
        }
    }
}

impl std::fmt::Debug for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quantity")
            .field("name", &self.name)
            .field("unit", &self.unit)
            .finish()
    }
}

fn catalogue() -> &'static HashMap<&'static str, &'static Quantity> {
    static CATALOGUE: OnceLock<HashMap<&'static str, &'static Quantity>> = OnceLock::new();
    CATALOGUE.get_or_init(|| quantities().map(|q| (q.name, q)).collect())
}

/// Every registered derived quantity.
pub fn quantities() -> impl Iterator<Item = &'static Quantity> {
    energy::QUANTITIES
        .iter()
        .chain(fertilizer::QUANTITIES)
        .chain(field::QUANTITIES)
}

/// Look up a derived quantity by name.
pub fn quantity(name: &str) -> Option<&'static Quantity> {
    catalogue().get(name).copied()
}

/// Computes the itemized carbon intensity of one crop.
#[derive(Debug, Clone)]
pub struct IntensityEngine {
    parameters: Arc<ParameterTable>,
    inputs: CropInputs,
    profile: CropProfile,
    ghg_items: Vec<String>,
}

impl IntensityEngine {
    /// Create an engine with the crop's default item list.
    ///
    /// # Errors
    ///
    /// [`FdcicError::DuplicateVariable`] if an input shares its name with a parameter.
    pub fn new(parameters: Arc<ParameterTable>, inputs: CropInputs) -> FdcicResult<Self> {
        if let Some(name) = inputs.store().names().find(|n| parameters.contains(n)) {
            return Err(FdcicError::DuplicateVariable {
                name: name.to_string(),
                origin: "defined by both the parameter table and the crop inputs".to_string(),
            });
        }
        let profile = inputs.profile();
        debug!(
            "Creating engine for {} with {} inputs and {} parameters",
            profile.crop,
            inputs.store().len(),
            parameters.len()
        );

        Ok(Self {
            parameters,
            ghg_items: items::default_ghg_items(profile.crop),
            inputs,
            profile,
        })
    }

    /// Replace the ordered list of items reported by [`IntensityEngine::ghg_table`].
    pub fn with_ghg_items<S: Into<String>>(mut self, items: impl IntoIterator<Item = S>) -> Self {
        self.set_ghg_items(items);
        self
    }

    pub fn set_ghg_items<S: Into<String>>(&mut self, items: impl IntoIterator<Item = S>) {
        self.ghg_items = items.into_iter().map(Into::into).collect();
        if !self.ghg_items.iter().any(|i| i == SOC_ITEM) {
            warn!("Item list has no {}, CI with SOC equals CI without SOC", SOC_ITEM);
        }
    }

    pub fn ghg_items(&self) -> &[String] {
        &self.ghg_items
    }

    pub fn crop(&self) -> Crop {
        self.profile.crop
    }

    pub fn profile(&self) -> &CropProfile {
        &self.profile
    }

    pub fn parameters(&self) -> &Arc<ParameterTable> {
        &self.parameters
    }

    pub fn inputs(&self) -> &CropInputs {
        &self.inputs
    }

    /// Override a crop input. Parameters are read-only.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> FdcicResult<()> {
        if self.parameters.contains(name) {
            return Err(FdcicError::ReadOnlyParameter(name.to_string()));
        }
        self.inputs.set(name, value)
    }

    /// Restore every crop input to its default.
    pub fn reset(&mut self) {
        self.inputs.reset()
    }

    /// Raw value of an input or parameter.
    pub fn variable(&self, name: &str) -> FdcicResult<&Value> {
        if self.inputs.contains(name) {
            self.inputs.get(name)
        } else {
            self.parameters.get(name)
        }
    }

    /// Evaluate a derived quantity, or read a numeric variable.
    pub fn evaluate(&self, name: &str) -> FdcicResult<f64> {
        Evaluation::new(self).get(name)
    }

    /// Parse every categorical input present in the crop inputs.
    pub fn validate(&self) -> FdcicResult<()> {
        self.check::<NitrogenSource>()?;
        self.check::<CoverCrop>()?;
        self.check::<Manure>()?;
        self.check::<ClimateZone>()?;
        self.check::<WaterRegimeCultivation>()?;
        self.check::<WaterRegimePreSeason>()?;
        self.check::<StrawIncorporation>()?;
        self.check::<NitrogenManagement>()?;
        self.check::<Tillage>()?;
        Ok(())
    }

    fn check<C: Categorical>(&self) -> FdcicResult<()> {
        if self.inputs.contains(C::FIELD) {
            C::parse(self.inputs.get_text(C::FIELD)?)?;
        }
        Ok(())
    }

    /// Evaluate every configured item and aggregate them.
    ///
    /// Fails as a whole if any item fails.
    pub fn ghg_table(&self) -> FdcicResult<GhgTable> {
        let evaluation = Evaluation::new(self);
        evaluation.yield_ts()?;

        let mut rows = Vec::with_capacity(self.ghg_items.len() + 2);
        for item in &self.ghg_items {
            rows.push(GhgRow {
                name: item.clone(),
                value: evaluation.get(item)?,
            });
        }
        let ci_without_soc: f64 = rows
            .iter()
            .filter(|r| r.name != SOC_ITEM)
            .map(|r| r.value)
            .sum();
        let soc: f64 = rows
            .iter()
            .filter(|r| r.name == SOC_ITEM)
            .map(|r| r.value)
            .sum();
        let ci_with_soc = ci_without_soc + soc;
        rows.push(GhgRow {
            name: CI_WITHOUT_SOC.to_string(),
            value: ci_without_soc,
        });
        rows.push(GhgRow {
            name: CI_WITH_SOC.to_string(),
            value: ci_with_soc,
        });

        let table = GhgTable {
            crop: self.profile.crop,
            functional_unit: self.profile.functional_unit.to_string(),
            unit: format!("g CO2e/{}", self.profile.functional_unit),
            rows,
        };
        info!(
            "{} CI: {:.2} {} without SOC, {:.2} with SOC",
            table.crop, ci_without_soc, table.unit, ci_with_soc
        );
        Ok(table)
    }

    /// Carbon intensity without soil organic carbon, in g CO2e per functional unit.
    pub fn ci(&self) -> FdcicResult<f64> {
        Ok(ResultsReporter::new(self)?.ci())
    }

    /// Carbon intensity including soil organic carbon.
    pub fn ci_w_soc(&self) -> FdcicResult<f64> {
        Ok(ResultsReporter::new(self)?.ci_w_soc())
    }

    /// Graphviz rendering of the quantities needed to evaluate `names`.
    ///
    /// Useful for debugging.
    pub fn dependency_dot(&self, names: &[&str]) -> FdcicResult<String> {
        let evaluation = Evaluation::new(self);
        for name in names {
            evaluation.get(name)?;
        }
        let graph = evaluation.into_graph();
        Ok(format!(
            "{:?}",
            Dot::with_attr_getters(
                &graph,
                &[Config::NodeNoLabel, Config::EdgeNoLabel],
                &|_, _| String::new(),
                &|_, (_, name)| format!("label = {:?}", name),
            )
        ))
    }
}

/// Dependency graph between derived quantities. Edges point from a
/// quantity to the quantities that consume it.
pub type DependencyGraph = Graph<&'static str, ()>;

/// Evaluation context for one table build.
///
/// Results are cached by name. Requesting a quantity that is already being
/// evaluated further up the stack is a [`FdcicError::CyclicDependency`].
pub struct Evaluation<'a> {
    engine: &'a IntensityEngine,
    cache: RefCell<HashMap<&'static str, f64>>,
    stack: RefCell<Vec<&'static str>>,
    graph: RefCell<DependencyGraph>,
    nodes: RefCell<HashMap<&'static str, NodeIndex>>,
}

impl<'a> Evaluation<'a> {
    pub fn new(engine: &'a IntensityEngine) -> Self {
        Self {
            engine,
            cache: RefCell::new(HashMap::new()),
            stack: RefCell::new(Vec::new()),
            graph: RefCell::new(Graph::new()),
            nodes: RefCell::new(HashMap::new()),
        }
    }

    pub fn profile(&self) -> &'a CropProfile {
        &self.engine.profile
    }

    pub fn crop(&self) -> Crop {
        self.engine.profile.crop
    }

    /// A derived quantity if one is registered under `name`, otherwise a numeric variable.
    pub fn get(&self, name: &str) -> FdcicResult<f64> {
        match quantity(name) {
            Some(q) => self.evaluate(q),
            None => self.var(name),
        }
    }

    /// Numeric input or parameter.
    pub fn var(&self, name: &str) -> FdcicResult<f64> {
        let inputs = &self.engine.inputs;
        if inputs.contains(name) {
            inputs.get_number(name)
        } else {
            self.engine.parameters.get_number(name)
        }
    }

    /// Text input.
    pub fn text(&self, name: &str) -> FdcicResult<&'a str> {
        self.engine.inputs.get_text(name)
    }

    /// Parse a categorical input.
    pub fn choice<C: Categorical>(&self) -> FdcicResult<C> {
        C::parse(self.text(C::FIELD)?)
    }

    /// Registered derived quantity.
    pub fn derived(&self, name: &str) -> FdcicResult<f64> {
        let q = quantity(name).ok_or_else(|| FdcicError::UnknownVariable(name.to_string()))?;
        self.evaluate(q)
    }

    /// Yield in functional units per acre, rejected unless positive.
    pub fn yield_ts(&self) -> FdcicResult<f64> {
        let value = self.engine.inputs.yield_ts()?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(FdcicError::NonPositiveYield {
                crop: self.crop().to_string(),
                value,
            })
        }
    }

    /// Convert a per-acre amount into an amount per functional unit.
    pub fn per_yield(&self, per_acre: f64) -> FdcicResult<f64> {
        Ok(per_acre / self.yield_ts()?)
    }

    /// GWP-weighted sum of a CO2, CH4 and N2O triple of variables.
    pub fn co2e(&self, co2: &str, ch4: &str, n2o: &str) -> FdcicResult<f64> {
        Ok(self.var(co2)? * self.var("CO2_GWP")?
            + self.var(ch4)? * self.var("CH4_GWP")?
            + self.var(n2o)? * self.var("N2O_GWP")?)
    }

    /// Error for a quantity that has no formula for the engine's crop.
    pub fn unsupported(&self, quantity: &str) -> FdcicError {
        FdcicError::UnsupportedCropBranch {
            quantity: quantity.to_string(),
            crop: self.crop().to_string(),
        }
    }

    pub fn into_graph(self) -> DependencyGraph {
        self.graph.into_inner()
    }

    fn evaluate(&self, q: &'static Quantity) -> FdcicResult<f64> {
        let node = self.node(q.name);
        if let Some(&consumer) = self.stack.borrow().last() {
            let consumer = self.node(consumer);
            let mut graph = self.graph.borrow_mut();
            if graph.find_edge(node, consumer).is_none() {
                graph.add_edge(node, consumer, ());
            }
        }

        if let Some(&value) = self.cache.borrow().get(q.name) {
            return Ok(value);
        }
        if self.stack.borrow().contains(&q.name) {
            let mut chain = self.stack.borrow().clone();
            chain.push(q.name);
            return Err(FdcicError::CyclicDependency {
                quantity: q.name.to_string(),
                chain: chain.join(" -> "),
            });
        }

        self.stack.borrow_mut().push(q.name);
        let result = (q.compute)(self);
        self.stack.borrow_mut().pop();

        let value = result?;
        debug!("{} = {} {}", q.name, value, q.unit);
        self.cache.borrow_mut().insert(q.name, value);
        Ok(value)
    }

    fn node(&self, name: &'static str) -> NodeIndex {
        *self
            .nodes
            .borrow_mut()
            .entry(name)
            .or_insert_with(|| self.graph.borrow_mut().add_node(name))
    }
}
