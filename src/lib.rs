//! Calcfuzz - differential fuzzing for arithmetic expression evaluators
//!
//! This library generates random but well-formed arithmetic expressions and
//! feeds them to a reference and a candidate evaluator, reporting any
//! disagreement between the two.

pub mod config;
pub mod generator;
pub mod harness;
pub mod validation;

// Re-export the main public API
pub use config::{ConfigError, RunConfig};
pub use generator::{ExpressionGenerator, GeneratorConfig, GeneratorError, generate_batch};
pub use harness::{Evaluator, Harness, HarnessError, Outcome, Verdict};
pub use validation::{InvariantViolation, validate_expression};

/// Generate a single expression from a seed
///
/// This is a convenience wrapper around [`ExpressionGenerator`] using the
/// same per-round RNG the harness uses for round 0.
///
/// # Arguments
///
/// * `length` - Nominal number of operand/operator slots
/// * `seed` - Seed for the random source
/// * `config` - Operators, functions, ranges and weights to draw from
///
/// # Errors
///
/// This function will return an error if:
/// * The configuration is invalid
/// * `length` is too short to hold a single operand
///
/// # Examples
///
/// ```
/// use calcfuzz::{GeneratorConfig, generate_expression};
///
/// let config = GeneratorConfig::default();
/// match generate_expression(20, 42, &config) {
///     Ok(expr) => println!("{}", expr),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub fn generate_expression(
    length: usize,
    seed: u64,
    config: &GeneratorConfig,
) -> Result<String, GeneratorError> {
    let mut rng = generator::round_rng(seed, 0);
    let mut generator = ExpressionGenerator::new(&mut rng, config)?;
    Ok(generator.generate(length)?.to_string())
}
