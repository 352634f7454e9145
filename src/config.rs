//! Run configuration loaded from YAML, with defaults for every field

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generator::constants::DEFAULT_LENGTH;
use crate::generator::{GeneratorConfig, GeneratorError};
use crate::harness::Tolerance;
use crate::harness::constants::{
    DEFAULT_CANDIDATE_COMMAND, DEFAULT_REFERENCE_URL, DEFAULT_ROUNDS, DEFAULT_TIMEOUT_MS,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid generator configuration: {0}")]
    Generator(#[from] GeneratorError),
    #[error("Number of rounds must be at least 1")]
    ZeroRounds,
    #[error("Candidate command cannot be empty")]
    EmptyCandidateCommand,
    #[error("Evaluator timeout must be at least 1 ms")]
    ZeroTimeout,
    #[error("Tolerances must be finite and non-negative")]
    InvalidTolerance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub url: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REFERENCE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    /// Program and arguments; the input file path is appended
    pub command: Vec<String>,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_CANDIDATE_COMMAND
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub rounds: usize,
    pub length: usize,
    /// Base seed; round `n` draws from `seed + n`. Random when absent.
    pub seed: Option<u64>,
    pub generator: GeneratorConfig,
    pub reference: ReferenceConfig,
    pub candidate: CandidateConfig,
    /// Per-call timeout for each evaluator
    pub timeout_ms: u64,
    pub tolerance: Tolerance,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            length: DEFAULT_LENGTH,
            seed: None,
            generator: GeneratorConfig::default(),
            reference: ReferenceConfig::default(),
            candidate: CandidateConfig::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            tolerance: Tolerance::default(),
        }
    }
}

impl RunConfig {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML for this structure.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// # Errors
    ///
    /// Returns the first problem that would make a run meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;

        let min_length = crate::generator::constants::MIN_LENGTH;
        if self.length < min_length {
            return Err(GeneratorError::LengthTooShort {
                length: self.length,
                min: min_length,
            }
            .into());
        }
        if self.rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        if self.candidate.command.is_empty() {
            return Err(ConfigError::EmptyCandidateCommand);
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let Tolerance { absolute, relative } = self.tolerance;
        if !(absolute.is_finite() && relative.is_finite() && absolute >= 0.0 && relative >= 0.0) {
            return Err(ConfigError::InvalidTolerance);
        }

        Ok(())
    }
}
