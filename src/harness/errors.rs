use thiserror::Error;

use crate::generator::GeneratorError;
use crate::validation::InvariantViolation;

/// An evaluator could not produce an outcome at all
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluatorFailure {
    #[error("Evaluator unreachable: {0}")]
    Unreachable(String),
    #[error("Evaluator failed to start: {0}")]
    SpawnFailed(String),
    #[error("Evaluator timed out after {ms} ms")]
    Timeout { ms: u64 },
    #[error("Malformed evaluator response: {0}")]
    MalformedResponse(String),
    #[error("I/O error while preparing evaluator input: {0}")]
    Io(String),
}

/// Errors that stop a harness run
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),
    #[error("Round {round} produced an invalid expression ({violation}): {expression}")]
    InvariantViolation {
        round: usize,
        expression: String,
        violation: InvariantViolation,
    },
}
