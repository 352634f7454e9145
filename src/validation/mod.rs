//! Structural checks over generated expression text

mod checks;
mod errors;
mod lexer;

pub use checks::{ExpressionShape, validate_expression};
pub use errors::InvariantViolation;
pub use lexer::{Lexeme, is_operator_symbol, lex};

#[cfg(test)]
mod tests;
