use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::harness::errors::EvaluatorFailure;
use crate::harness::evaluator::Evaluator;
use crate::harness::outcome::Outcome;

#[derive(Serialize)]
struct EvalRequest<'a> {
    expr: &'a str,
}

#[derive(Deserialize)]
struct EvalResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Reference evaluator behind a math.js style HTTP API
pub struct ReferenceEvaluator {
    client: reqwest::Client,
    url: String,
}

impl ReferenceEvaluator {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, EvaluatorFailure> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                EvaluatorFailure::Unreachable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Turn a response body into an outcome.
///
/// math.js answers `{"result": "...", "error": null}` on success and
/// `{"result": null, "error": "..."}` with a 400 status when the
/// expression is rejected. Anything else from a failed status means the
/// service itself is unhealthy.
pub(crate) fn interpret_response(
    success: bool,
    status: u16,
    body: &str,
) -> Result<Outcome, EvaluatorFailure> {
    let parsed: EvalResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) if success => {
            return Err(EvaluatorFailure::MalformedResponse(format!(
                "{}: {}",
                e, body
            )));
        }
        Err(_) => {
            return Err(EvaluatorFailure::Unreachable(format!(
                "HTTP {}: {}",
                status,
                body.trim()
            )));
        }
    };

    if let Some(error) = parsed.error {
        return Ok(Outcome::Error(error));
    }

    match parsed.result {
        Some(serde_json::Value::String(text)) => Ok(Outcome::from_text(&text)),
        Some(serde_json::Value::Number(n)) => n
            .as_f64()
            .map(Outcome::Value)
            .ok_or_else(|| EvaluatorFailure::MalformedResponse(n.to_string())),
        Some(other) => Ok(Outcome::Error(format!("non-numeric result: {}", other))),
        None => Err(EvaluatorFailure::MalformedResponse(body.to_string())),
    }
}

#[async_trait]
impl Evaluator for ReferenceEvaluator {
    fn name(&self) -> &str {
        "reference"
    }

    async fn evaluate(&self, expr: &str) -> Result<Outcome, EvaluatorFailure> {
        debug!("POST {} ({} bytes)", self.url, expr.len());

        let response = self
            .client
            .post(&self.url)
            .json(&EvalRequest { expr })
            .send()
            .await
            .map_err(|e| EvaluatorFailure::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| EvaluatorFailure::Unreachable(e.to_string()))?;
        debug!("Reference answered HTTP {}", status);

        interpret_response(status.is_success(), status.as_u16(), &body)
    }
}
