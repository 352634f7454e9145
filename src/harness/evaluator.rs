use async_trait::async_trait;

use crate::harness::errors::EvaluatorFailure;
use crate::harness::outcome::Outcome;

/// Anything that can evaluate an expression string
///
/// Implementations must treat the expression as opaque text: no
/// preprocessing before handing it to the system under test.
#[async_trait]
pub trait Evaluator: Send + Sync {
    fn name(&self) -> &str;

    async fn evaluate(&self, expr: &str) -> Result<Outcome, EvaluatorFailure>;
}
