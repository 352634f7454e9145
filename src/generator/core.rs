use std::fmt;

use log::{debug, info};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::config::{GeneratorConfig, IntRange};
use super::constants::{CLOSE_PAREN_PROBABILITY, MIN_LENGTH};
use super::errors::GeneratorError;
use super::rules::{Category, SlotDraw, balance, step};
use super::state::GenerationState;
use super::token::Token;

/// A finished expression, kept as tokens until it is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedExpression {
    tokens: Vec<Token>,
}

impl GeneratedExpression {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl fmt::Display for GeneratedExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// Index of the last operand slot for a nominal length.
///
/// Slots run from 1 while below `length`. Odd slots hold operands, so an
/// odd length would end on an operator slot; that slot is dropped.
fn last_operand_slot(length: usize) -> usize {
    if length % 2 == 0 { length - 1 } else { length - 2 }
}

/// Builds random expressions from a borrowed RNG and configuration
pub struct ExpressionGenerator<'a, R: Rng> {
    rng: &'a mut R,
    config: &'a GeneratorConfig,
    categories: WeightedIndex<u32>,
}

impl<'a, R: Rng> ExpressionGenerator<'a, R> {
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(rng: &'a mut R, config: &'a GeneratorConfig) -> Result<Self, GeneratorError> {
        config.validate()?;
        let categories = WeightedIndex::new(config.weights.as_array())
            .map_err(|_| GeneratorError::ZeroWeights)?;
        Ok(Self {
            rng,
            config,
            categories,
        })
    }

    /// Generate one balanced expression over `length` nominal slots
    ///
    /// # Errors
    ///
    /// Returns an error if `length` leaves no room for a single operand.
    pub fn generate(&mut self, length: usize) -> Result<GeneratedExpression, GeneratorError> {
        if length < MIN_LENGTH {
            return Err(GeneratorError::LengthTooShort {
                length,
                min: MIN_LENGTH,
            });
        }

        let mut state = GenerationState::new();
        for slot in 1..=last_operand_slot(length) {
            let draw = self.draw_slot(slot)?;
            (state, _) = step(state, draw);
        }

        let (state, closing) = balance(state);
        debug!(
            "Generated {} tokens over {} slots, {} parens closed at the end",
            state.tokens().len(),
            state.position(),
            closing.len()
        );

        Ok(GeneratedExpression {
            tokens: state.into_tokens(),
        })
    }

    /// Resolve every random choice for one slot
    ///
    /// # Errors
    ///
    /// Returns an error if the slot needs a choice from an empty set.
    pub fn draw_slot(&mut self, slot: usize) -> Result<SlotDraw, GeneratorError> {
        if slot % 2 == 0 {
            return Ok(SlotDraw::Operator(self.draw_operator()?));
        }

        let index = self.categories.sample(&mut *self.rng);
        let category = Category::ALL
            .get(index)
            .copied()
            .ok_or(GeneratorError::UnknownCategory(index))?;
        let draw = match category {
            Category::Function => self.draw_call()?,
            Category::Paren => SlotDraw::Paren {
                close: self.rng.gen_bool(CLOSE_PAREN_PROBABILITY),
                operand: self.draw_in(self.config.paren_operand_range),
            },
            Category::Operand => SlotDraw::Operand(self.draw_in(self.config.operand_range)),
        };
        Ok(draw)
    }

    fn draw_operator(&mut self) -> Result<char, GeneratorError> {
        self.config
            .operators
            .choose(&mut *self.rng)
            .copied()
            .ok_or(GeneratorError::EmptyOperatorSet)
    }

    fn draw_call(&mut self) -> Result<SlotDraw, GeneratorError> {
        let name = self
            .config
            .functions
            .choose(&mut *self.rng)
            .cloned()
            .ok_or(GeneratorError::EmptyFunctionSet)?;
        let first = self.draw_in(self.config.first_argument_range);

        let mut extra = Vec::new();
        if self.config.is_variadic(&name) && self.config.max_extra_arguments > 0 {
            let count = self.rng.gen_range(1..=self.config.max_extra_arguments);
            let range = self.config.extra_argument_range;
            extra = (0..count).map(|_| self.draw_in(range)).collect();
        }

        Ok(SlotDraw::Call { name, first, extra })
    }

    fn draw_in(&mut self, range: IntRange) -> i64 {
        self.rng.gen_range(range.min..=range.max)
    }
}

/// RNG for one round, independent of every other round
pub fn round_rng(base_seed: u64, round: usize) -> StdRng {
    StdRng::seed_from_u64(base_seed.wrapping_add(round as u64))
}

/// Generate `rounds` expressions in parallel, one seeded RNG per round
///
/// The output is identical to generating each round sequentially with
/// [`round_rng`].
///
/// # Errors
///
/// Returns the first configuration or length error encountered.
pub fn generate_batch(
    config: &GeneratorConfig,
    length: usize,
    base_seed: u64,
    rounds: usize,
) -> Result<Vec<String>, GeneratorError> {
    info!(
        "Generating {} expressions of length {} from seed {}",
        rounds, length, base_seed
    );

    (0..rounds)
        .into_par_iter()
        .map(|round| -> Result<String, GeneratorError> {
            let mut rng = round_rng(base_seed, round);
            let mut generator = ExpressionGenerator::new(&mut rng, config)?;
            Ok(generator.generate(length)?.to_string())
        })
        .collect()
}
