//! Random expression generation split into submodules

pub mod config;
pub mod constants;
mod core;
mod errors;
mod rules;
mod state;
mod token;

pub use config::{CategoryWeights, GeneratorConfig, IntRange};
pub use self::core::{ExpressionGenerator, GeneratedExpression, generate_batch, round_rng};
pub use errors::GeneratorError;
pub use rules::{Category, SlotDraw, balance, step};
pub use state::GenerationState;
pub use token::{Token, TokenKind};

#[cfg(test)]
mod tests;
