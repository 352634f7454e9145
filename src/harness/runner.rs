use std::fmt;
use std::time::Duration;

use log::{info, warn};

use crate::config::RunConfig;
use crate::harness::errors::{EvaluatorFailure, HarnessError};
use crate::harness::evaluator::Evaluator;
use crate::harness::outcome::{Outcome, Verdict, classify};
use crate::harness::source::{ExpressionSource, SeededSource};
use crate::validation::validate_expression;

/// Everything observed during one round
#[derive(Debug, Clone)]
pub struct RoundReport {
    pub round: usize,
    pub expression: String,
    pub reference: Result<Outcome, EvaluatorFailure>,
    pub candidate: Result<Outcome, EvaluatorFailure>,
    pub verdict: Verdict,
}

fn fmt_result(result: &Result<Outcome, EvaluatorFailure>) -> String {
    match result {
        Ok(outcome) => outcome.to_string(),
        Err(failure) => failure.to_string(),
    }
}

impl fmt::Display for RoundReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Round {}: {}", self.round, self.verdict)?;
        writeln!(f, "{}", self.expression)?;
        writeln!(f, "  reference: {}", fmt_result(&self.reference))?;
        write!(f, "  candidate: {}", fmt_result(&self.candidate))
    }
}

/// Totals over a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub seed: u64,
    pub rounds: usize,
    pub agreements: usize,
    pub both_errored: usize,
    pub divergences: usize,
    pub unreachable: usize,
}

impl RunSummary {
    fn record(&mut self, verdict: &Verdict) {
        self.rounds += 1;
        match verdict {
            Verdict::Agree => self.agreements += 1,
            Verdict::BothErrored => self.both_errored += 1,
            Verdict::Divergence => self.divergences += 1,
            Verdict::Unreachable => self.unreachable += 1,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} rounds (seed {}): {} agree, {} both errored, {} diverged, {} unreachable",
            self.rounds,
            self.seed,
            self.agreements,
            self.both_errored,
            self.divergences,
            self.unreachable
        )
    }
}

/// Drives rounds of generate, evaluate twice, compare
pub struct Harness {
    config: RunConfig,
    source: Box<dyn ExpressionSource>,
    reference: Box<dyn Evaluator>,
    candidate: Box<dyn Evaluator>,
}

impl Harness {
    /// Harness over seeded random expressions built from `config.generator`
    pub fn new(
        config: RunConfig,
        reference: Box<dyn Evaluator>,
        candidate: Box<dyn Evaluator>,
    ) -> Self {
        let source = SeededSource::new(config.generator.clone(), config.length);
        Self {
            config,
            source: Box::new(source),
            reference,
            candidate,
        }
    }

    /// Replace where round expressions come from. Every expression is still
    /// checked against `config.generator` before it is evaluated.
    pub fn with_source(mut self, source: Box<dyn ExpressionSource>) -> Self {
        self.source = source;
        self
    }

    /// Run every configured round, printing each report as it completes
    ///
    /// # Errors
    ///
    /// Stops at the first generator error or invalid expression. Evaluator
    /// failures and divergences are reported and the run continues.
    pub async fn run(&self, seed: u64) -> Result<RunSummary, HarnessError> {
        let mut summary = RunSummary {
            seed,
            ..RunSummary::default()
        };

        for round in 0..self.config.rounds {
            let report = self.run_round(seed, round).await?;
            match &report.verdict {
                Verdict::Divergence => warn!("Round {} diverged", round),
                Verdict::Unreachable => warn!("Round {}: an evaluator was unreachable", round),
                verdict => info!("Round {}: {}", round, verdict),
            }
            println!("{}\n", report);
            summary.record(&report.verdict);
        }

        Ok(summary)
    }

    /// Generate, validate and evaluate a single round
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails or the expression breaks a
    /// grammar invariant.
    pub async fn run_round(&self, seed: u64, round: usize) -> Result<RoundReport, HarnessError> {
        let expression = self.generate(seed, round)?;

        let (reference, candidate) = tokio::join!(
            self.evaluate_with_timeout(self.reference.as_ref(), &expression),
            self.evaluate_with_timeout(self.candidate.as_ref(), &expression),
        );
        let verdict = classify(&reference, &candidate, &self.config.tolerance);

        Ok(RoundReport {
            round,
            expression,
            reference,
            candidate,
            verdict,
        })
    }

    fn generate(&self, seed: u64, round: usize) -> Result<String, HarnessError> {
        let expression = self.source.expression(seed, round)?;

        let shape = validate_expression(&expression, &self.config.generator).map_err(
            |violation| HarnessError::InvariantViolation {
                round,
                expression: expression.clone(),
                violation,
            },
        )?;
        info!(
            "Round {}: {} operands, {} calls, {} paren pairs, depth {}",
            round, shape.operands, shape.calls, shape.open_parens, shape.max_depth
        );

        Ok(expression)
    }

    async fn evaluate_with_timeout(
        &self,
        evaluator: &dyn Evaluator,
        expression: &str,
    ) -> Result<Outcome, EvaluatorFailure> {
        let ms = self.config.timeout_ms;
        match tokio::time::timeout(Duration::from_millis(ms), evaluator.evaluate(expression)).await
        {
            Ok(result) => {
                if let Err(failure) = &result {
                    warn!("{} failed: {}", evaluator.name(), failure);
                }
                result
            }
            Err(_) => {
                warn!("{} timed out after {} ms", evaluator.name(), ms);
                Err(EvaluatorFailure::Timeout { ms })
            }
        }
    }
}
