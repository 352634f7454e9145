//! Differential harness: feeds generated expressions to two evaluators and
//! compares what comes back

pub mod constants;
mod candidate;
mod errors;
mod evaluator;
mod outcome;
mod reference;
mod runner;
mod source;

pub use candidate::CandidateEvaluator;
pub use errors::{EvaluatorFailure, HarnessError};
pub use evaluator::Evaluator;
pub use outcome::{Outcome, Tolerance, Verdict, classify};
pub use reference::ReferenceEvaluator;
pub use runner::{Harness, RoundReport, RunSummary};
pub use source::{ExpressionSource, SeededSource};
