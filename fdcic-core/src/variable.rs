//! Named variables and the stores that hold their current values.
//!
//! # Overview
//!
//! Every number the calculator reads (heating values, emission factors,
//! farming activity levels) is a [`Variable`]: a unique name, a default
//! [`Value`], a descriptive unit and free-form notes. Definitions never change
//! once loaded. A [`VariableStore`] owns an ordered set of definitions together
//! with the *current* value of each one, which callers may override by name and
//! later reset back to the default.
//!
//! Values are either numbers or text. Text values carry categorical choices
//! such as `CC_Choice = "No cover crop"` and are validated by
//! [`crate::categorical`] when a formula needs them.
//!
//! # Table format
//!
//! Stores load from TOML documents made of `[[variable]]` entries:
//!
//! ```toml
//! version = "2022"
//!
//! [[variable]]
//! name = "Diesel_LHV"
//! value = 128450.0
//! unit = "Btu/gal"
//! ```

use crate::errors::{FdcicError, FdcicResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Value held by a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Name of the kind of value, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "text",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Number(_) => None,
            Value::Text(v) => Some(v),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// Definition of a named variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Unique identifier, e.g. `Diesel_CornFarming_val`
    pub name: String,
    /// Value restored on reset
    #[serde(rename = "value")]
    pub default_value: Value,
    /// Descriptive unit, never used for conversion
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub notes: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: impl Into<Value>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_value: value.into(),
            unit: unit.into(),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.name, self.default_value, self.unit)
    }
}

/// On-disk layout of a variable table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableTable {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, rename = "variable")]
    pub variables: Vec<Variable>,
}

impl VariableTable {
    pub fn from_toml_str(content: &str) -> FdcicResult<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Ordered variable definitions and their current values.
///
/// Lookups are by name. Definition order is preserved for [`VariableStore::snapshot`]
/// and iteration so that reports list variables the way the table declares them.
#[derive(Debug, Clone)]
pub struct VariableStore {
    definitions: Vec<Variable>,
    values: Vec<Value>,
    index: HashMap<String, usize>,
}

impl VariableStore {
    /// Create a store with every variable set to its default.
    ///
    /// # Errors
    ///
    /// Returns [`FdcicError::DuplicateVariable`] if two definitions share a name.
    pub fn new(definitions: Vec<Variable>) -> FdcicResult<Self> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (i, var) in definitions.iter().enumerate() {
            if index.insert(var.name.clone(), i).is_some() {
                return Err(FdcicError::DuplicateVariable {
                    name: var.name.clone(),
                    origin: "variable table".to_string(),
                });
            }
        }
        let values = definitions.iter().map(|v| v.default_value.clone()).collect();

        Ok(Self {
            definitions,
            values,
            index,
        })
    }

    /// Parse a TOML variable table, see the module docs for the layout.
    pub fn from_toml_str(content: &str) -> FdcicResult<Self> {
        Self::new(VariableTable::from_toml_str(content)?.variables)
    }

    /// Restore the given variables to the default value they carry.
    ///
    /// An empty slice restores every registered variable to its own default.
    /// The registered definitions are left untouched.
    pub fn reset_variables(&mut self, variables: &[Variable]) -> FdcicResult<()> {
        if variables.is_empty() {
            self.reset();
            return Ok(());
        }
        // Check every name first so a failed reset leaves the store unchanged
        let positions = variables
            .iter()
            .map(|var| self.position(&var.name))
            .collect::<FdcicResult<Vec<_>>>()?;
        for (i, var) in positions.into_iter().zip(variables) {
            self.values[i] = var.default_value.clone();
        }
        Ok(())
    }

    /// Restore every variable to its default.
    pub fn reset(&mut self) {
        for (value, var) in self.values.iter_mut().zip(&self.definitions) {
            *value = var.default_value.clone();
        }
    }

    pub fn get(&self, name: &str) -> FdcicResult<&Value> {
        Ok(&self.values[self.position(name)?])
    }

    pub fn get_number(&self, name: &str) -> FdcicResult<f64> {
        let value = self.get(name)?;
        value.as_number().ok_or_else(|| FdcicError::TypeMismatch {
            name: name.to_string(),
            expected: "number".to_string(),
            found: value.kind().to_string(),
        })
    }

    pub fn get_text(&self, name: &str) -> FdcicResult<&str> {
        let value = self.get(name)?;
        value.as_text().ok_or_else(|| FdcicError::TypeMismatch {
            name: name.to_string(),
            expected: "text".to_string(),
            found: value.kind().to_string(),
        })
    }

    /// Override the current value of a registered variable.
    ///
    /// The new value must be of the same kind as the default.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> FdcicResult<()> {
        let i = self.position(name)?;
        let value = value.into();
        let expected = self.definitions[i].default_value.kind();
        if value.kind() != expected {
            return Err(FdcicError::TypeMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                found: value.kind().to_string(),
            });
        }
        self.values[i] = value;
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn definition(&self, name: &str) -> Option<&Variable> {
        self.index.get(name).map(|&i| &self.definitions[i])
    }

    pub fn definitions(&self) -> impl Iterator<Item = &Variable> {
        self.definitions.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|v| v.name.as_str())
    }

    /// Current values in definition order.
    pub fn snapshot(&self) -> Vec<(String, Value)> {
        self.definitions
            .iter()
            .zip(&self.values)
            .map(|(var, value)| (var.name.clone(), value.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    fn position(&self, name: &str) -> FdcicResult<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| FdcicError::UnknownVariable(name.to_string()))
    }
}
