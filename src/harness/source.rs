use crate::generator::{ExpressionGenerator, GeneratorConfig, GeneratorError, round_rng};

/// Supplies the expression text for each round
pub trait ExpressionSource: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if no expression can be produced for `round`.
    fn expression(&self, seed: u64, round: usize) -> Result<String, GeneratorError>;
}

/// Random expressions, one independently seeded RNG per round
pub struct SeededSource {
    config: GeneratorConfig,
    length: usize,
}

impl SeededSource {
    pub fn new(config: GeneratorConfig, length: usize) -> Self {
        Self { config, length }
    }
}

impl ExpressionSource for SeededSource {
    fn expression(&self, seed: u64, round: usize) -> Result<String, GeneratorError> {
        let mut rng = round_rng(seed, round);
        let mut generator = ExpressionGenerator::new(&mut rng, &self.config)?;
        Ok(generator.generate(self.length)?.to_string())
    }
}
