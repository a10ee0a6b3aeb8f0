use thiserror::Error;

/// Error type for invalid lookups, inputs and table definitions.
#[derive(Error, Debug)]
pub enum FdcicError {
    #[error("Unknown variable `{0}`")]
    UnknownVariable(String),
    #[error("Invalid input for `{field}`: {value:?}. Valid values are {valid:?}")]
    InvalidCategoricalValue {
        field: String,
        value: String,
        valid: Vec<String>,
    },
    #[error("`{quantity}` has no formula for crop {crop}")]
    UnsupportedCropBranch { quantity: String, crop: String },
    #[error("Variable `{name}` is defined more than once ({origin})")]
    DuplicateVariable { name: String, origin: String },
    #[error("Variable `{name}` holds a {found} value, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: String,
        found: String,
    },
    #[error("`{0}` is a parameter and cannot be overridden")]
    ReadOnlyParameter(String),
    #[error("{crop} yield must be positive, got {value}")]
    NonPositiveYield { crop: String, value: f64 },
    #[error("Cyclic dependency while evaluating `{quantity}`: {chain}")]
    CyclicDependency { quantity: String, chain: String },
    #[error("Invalid data table: {0}")]
    DataTable(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience type for `Result<T, FdcicError>`.
pub type FdcicResult<T> = Result<T, FdcicError>;
