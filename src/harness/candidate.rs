use std::io::Write;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::process::Command;

use crate::harness::constants::{CANDIDATE_FILE_PREFIX, LAUNCH_FAILURE_EXIT_CODES};
use crate::harness::errors::EvaluatorFailure;
use crate::harness::evaluator::Evaluator;
use crate::harness::outcome::Outcome;

/// Candidate evaluator run as a subprocess over a temporary input file
///
/// The expression is written to a fresh file whose path is appended to the
/// configured command line. The last non-empty line of stdout is the result.
pub struct CandidateEvaluator {
    program: String,
    args: Vec<String>,
}

impl CandidateEvaluator {
    /// # Errors
    ///
    /// Returns an error if `command` is empty.
    pub fn new(command: &[String]) -> Result<Self, EvaluatorFailure> {
        let (program, args) = command.split_first().ok_or_else(|| {
            EvaluatorFailure::SpawnFailed("Candidate command is empty".to_string())
        })?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn last_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).rfind(|line| !line.is_empty())
}

/// A launcher exit code says the candidate never ran
pub(crate) fn launch_failure(code: Option<i32>, stderr: &str) -> Option<EvaluatorFailure> {
    let code = code.filter(|c| LAUNCH_FAILURE_EXIT_CODES.contains(c))?;
    let message = last_line(stderr).unwrap_or("command could not be executed");
    Some(EvaluatorFailure::SpawnFailed(format!(
        "exit status {}: {}",
        code, message
    )))
}

/// Turn captured process output into an outcome.
///
/// Any other non-zero exit is the candidate's own error report.
pub(crate) fn interpret_output(success: bool, stdout: &str, stderr: &str) -> Outcome {
    if !success {
        let message = last_line(stderr)
            .or_else(|| last_line(stdout))
            .unwrap_or("non-zero exit status");
        return Outcome::Error(message.to_string());
    }

    match last_line(stdout) {
        Some(line) => Outcome::from_text(line),
        None => Outcome::Error("no output".to_string()),
    }
}

#[async_trait]
impl Evaluator for CandidateEvaluator {
    fn name(&self) -> &str {
        "candidate"
    }

    async fn evaluate(&self, expr: &str) -> Result<Outcome, EvaluatorFailure> {
        let mut input = tempfile::Builder::new()
            .prefix(CANDIDATE_FILE_PREFIX)
            .suffix(".txt")
            .tempfile()
            .map_err(|e| EvaluatorFailure::Io(e.to_string()))?;
        writeln!(input, "{}", expr).map_err(|e| EvaluatorFailure::Io(e.to_string()))?;
        input
            .flush()
            .map_err(|e| EvaluatorFailure::Io(e.to_string()))?;

        debug!("Running {} {}", self.command_line(), input.path().display());

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(input.path())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| EvaluatorFailure::SpawnFailed(format!("{}: {}", self.program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            warn!("Candidate exited with {}", output.status);
            if let Some(failure) = launch_failure(output.status.code(), &stderr) {
                return Err(failure);
            }
        }

        Ok(interpret_output(output.status.success(), &stdout, &stderr))
    }
}
