use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::generator::constants::{
    DEFAULT_FUNCTIONS, DEFAULT_OPERATORS, DEFAULT_VARIADIC_FUNCTIONS, EXTRA_ARGUMENT_RANGE,
    FIRST_ARGUMENT_RANGE, FUNCTION_WEIGHT, MAX_EXTRA_ARGUMENTS, OPERAND_RANGE, OPERAND_WEIGHT,
    PAREN_OPERAND_RANGE, PAREN_WEIGHT,
};
use crate::generator::errors::GeneratorError;
use crate::validation::is_operator_symbol;

/// Inclusive integer range used for drawing literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl From<(i64, i64)> for IntRange {
    fn from((min, max): (i64, i64)) -> Self {
        Self::new(min, max)
    }
}

/// Relative weights of the three operand-slot categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub function: u32,
    pub paren: u32,
    pub operand: u32,
}

impl CategoryWeights {
    /// Weights in the order of [`crate::generator::Category::ALL`]
    pub fn as_array(&self) -> [u32; 3] {
        [self.function, self.paren, self.operand]
    }

    pub fn total(&self) -> u64 {
        self.as_array().iter().map(|&w| u64::from(w)).sum()
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            function: FUNCTION_WEIGHT,
            paren: PAREN_WEIGHT,
            operand: OPERAND_WEIGHT,
        }
    }
}

/// Everything the generator needs to know to build one expression
///
/// Omitted fields in a configuration file fall back to the `Default` impl,
/// which reproduces the classic `+ - * /` and `abs sqrt max min` setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub operators: Vec<char>,
    pub functions: Vec<String>,
    pub variadic_functions: Vec<String>,
    pub operand_range: IntRange,
    pub paren_operand_range: IntRange,
    /// Range of the first argument of every call.
    pub first_argument_range: IntRange,
    /// Range of the additional arguments of variadic calls. Intentionally
    /// distinct from `first_argument_range`.
    pub extra_argument_range: IntRange,
    pub max_extra_arguments: usize,
    pub weights: CategoryWeights,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            operators: DEFAULT_OPERATORS.to_vec(),
            functions: DEFAULT_FUNCTIONS.iter().map(|f| f.to_string()).collect(),
            variadic_functions: DEFAULT_VARIADIC_FUNCTIONS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            operand_range: OPERAND_RANGE.into(),
            paren_operand_range: PAREN_OPERAND_RANGE.into(),
            first_argument_range: FIRST_ARGUMENT_RANGE.into(),
            extra_argument_range: EXTRA_ARGUMENT_RANGE.into(),
            max_extra_arguments: MAX_EXTRA_ARGUMENTS,
            weights: CategoryWeights::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn is_variadic(&self, name: &str) -> bool {
        self.variadic_functions.iter().any(|f| f == name)
    }

    pub fn is_function(&self, name: &str) -> bool {
        self.functions.iter().any(|f| f == name)
    }

    /// Smallest argument count a call to `name` may carry
    pub fn min_arguments(&self, name: &str) -> usize {
        if self.is_variadic(name) && self.max_extra_arguments > 0 {
            2
        } else {
            1
        }
    }

    /// Largest argument count a call to `name` may carry
    pub fn max_arguments(&self, name: &str) -> usize {
        if self.is_variadic(name) {
            1 + self.max_extra_arguments
        } else {
            1
        }
    }

    /// # Errors
    ///
    /// Returns an error if the configuration could produce text that is not
    /// a well-formed expression, or if no slot category can ever be chosen.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        debug!("Validating generator configuration: {:?}", self);

        if self.operators.is_empty() {
            return Err(GeneratorError::EmptyOperatorSet);
        }
        if let Some(&op) = self
            .operators
            .iter()
            .find(|&&op| !is_operator_symbol(op))
        {
            return Err(GeneratorError::InvalidOperator(op));
        }

        for name in &self.functions {
            let mut chars = name.chars();
            let valid = chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !valid {
                return Err(GeneratorError::InvalidFunctionName(name.clone()));
            }
        }
        if let Some(name) = self.variadic_functions.iter().find(|f| !self.is_function(f)) {
            return Err(GeneratorError::UnknownVariadicFunction(name.clone()));
        }

        let ranges = [
            ("operand", self.operand_range),
            ("parenthesised operand", self.paren_operand_range),
            ("first argument", self.first_argument_range),
            ("extra argument", self.extra_argument_range),
        ];
        for (name, range) in ranges {
            // i64::MIN has no positive literal, so "-9223372036854775808" cannot be lexed
            if range.min > range.max || range.min == i64::MIN {
                return Err(GeneratorError::InvalidRange {
                    name,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        // Top-level literals are unsigned: a leading '-' would read as an operator.
        for &(name, range) in ranges.iter().take(2) {
            if range.min < 0 {
                return Err(GeneratorError::NegativeRange {
                    name,
                    min: range.min,
                });
            }
        }

        let total = self.weights.total();
        if total == 0 {
            return Err(GeneratorError::ZeroWeights);
        }
        if total > u64::from(u32::MAX) {
            return Err(GeneratorError::WeightsOverflow { total });
        }
        if self.weights.function > 0 && self.functions.is_empty() {
            return Err(GeneratorError::EmptyFunctionSet);
        }

        if self.max_extra_arguments == 0 && !self.variadic_functions.is_empty() {
            warn!("max_extra_arguments is 0, variadic functions will only get one argument");
        }

        Ok(())
    }
}
