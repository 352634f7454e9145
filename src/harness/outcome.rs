use std::fmt;

use serde::{Deserialize, Serialize};

use crate::harness::constants::{ABSOLUTE_TOLERANCE, RELATIVE_TOLERANCE};
use crate::harness::errors::EvaluatorFailure;

/// What an evaluator answered for one expression
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Value(f64),
    /// The evaluator accepted the expression and reported an error
    Error(String),
}

impl Outcome {
    /// Read evaluator text as a number, or as an error message if it is not
    /// one
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed.parse::<f64>() {
            Ok(value) => Outcome::Value(value),
            Err(_) => Outcome::Error(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Value(v) => write!(f, "{}", v),
            Outcome::Error(e) => write!(f, "error: {}", e),
        }
    }
}

/// How far apart two numeric results may be and still agree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    pub absolute: f64,
    pub relative: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            absolute: ABSOLUTE_TOLERANCE,
            relative: RELATIVE_TOLERANCE,
        }
    }
}

impl Tolerance {
    pub fn values_match(&self, a: f64, b: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return a.is_nan() && b.is_nan();
        }
        if a.is_infinite() || b.is_infinite() {
            return a == b;
        }
        let diff = (a - b).abs();
        diff <= self.absolute || diff <= self.relative * a.abs().max(b.abs())
    }
}

/// Classification of one round
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Same value within tolerance
    Agree,
    /// Both evaluators rejected the expression
    BothErrored,
    Divergence,
    /// At least one evaluator produced no outcome
    Unreachable,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Verdict::Agree => "agree",
            Verdict::BothErrored => "both errored",
            Verdict::Divergence => "DIVERGENCE",
            Verdict::Unreachable => "evaluator unreachable",
        };
        write!(f, "{}", text)
    }
}

/// Compare the two evaluators' results for the same expression
pub fn classify(
    reference: &Result<Outcome, EvaluatorFailure>,
    candidate: &Result<Outcome, EvaluatorFailure>,
    tolerance: &Tolerance,
) -> Verdict {
    match (reference, candidate) {
        (Err(_), _) | (_, Err(_)) => Verdict::Unreachable,
        (Ok(Outcome::Value(a)), Ok(Outcome::Value(b))) => {
            if tolerance.values_match(*a, *b) {
                Verdict::Agree
            } else {
                Verdict::Divergence
            }
        }
        (Ok(Outcome::Error(_)), Ok(Outcome::Error(_))) => Verdict::BothErrored,
        _ => Verdict::Divergence,
    }
}
