use thiserror::Error;

/// Errors raised while configuring or running the generator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Expression length must be at least {min}, got {length}")]
    LengthTooShort { length: usize, min: usize },
    #[error("Operator set cannot be empty")]
    EmptyOperatorSet,
    #[error("Invalid operator symbol: '{0}'")]
    InvalidOperator(char),
    #[error("Invalid function name: '{0}'")]
    InvalidFunctionName(String),
    #[error("Function calls are enabled but the function set is empty")]
    EmptyFunctionSet,
    #[error("Variadic function '{0}' is not in the function set")]
    UnknownVariadicFunction(String),
    #[error("Invalid {name} range: min={min}, max={max}")]
    InvalidRange {
        name: &'static str,
        min: i64,
        max: i64,
    },
    #[error("{name} range must not contain negative values, got min={min}")]
    NegativeRange { name: &'static str, min: i64 },
    #[error("Category weights must not all be zero")]
    ZeroWeights,
    #[error("Category weights sum to {total}, more than {max}", max = u32::MAX)]
    WeightsOverflow { total: u64 },
    #[error("No slot category at index {0}")]
    UnknownCategory(usize),
}
