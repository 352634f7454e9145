//! Token emission rules
//!
//! Each rule is a pure function of the current [`GenerationState`] and an
//! already-resolved [`SlotDraw`]. All randomness lives in the generator,
//! which makes every branch reachable from a test by constructing the draw
//! directly.

use super::state::GenerationState;
use super::token::{Token, TokenKind};

/// Kind of token an operand slot resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Function,
    Paren,
    Operand,
}

impl Category {
    /// Order matches [`crate::generator::CategoryWeights::as_array`]
    pub const ALL: [Category; 3] = [Category::Function, Category::Paren, Category::Operand];
}

/// Random choices made for one slot before any token is emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotDraw {
    Operator(char),
    Call {
        name: String,
        first: i64,
        extra: Vec<i64>,
    },
    /// `operand` is used after an open paren, or before a close paren when
    /// the previous token is not already an operand.
    Paren {
        close: bool,
        operand: i64,
    },
    Operand(i64),
}

fn emit(state: &GenerationState, draw: SlotDraw) -> Vec<Token> {
    match draw {
        SlotDraw::Operator(op) => vec![Token::Operator(op)],
        SlotDraw::Call { name, first, extra } => {
            let mut args = Vec::with_capacity(1 + extra.len());
            args.push(first);
            args.extend(extra);
            vec![Token::Call { name, args }]
        }
        SlotDraw::Paren {
            close: true,
            operand,
        } if state.can_close() => {
            if state.last_kind() == Some(TokenKind::Operand) {
                vec![Token::CloseParen]
            } else {
                vec![Token::Operand(operand), Token::CloseParen]
            }
        }
        // A close with nothing to close degrades to an open
        SlotDraw::Paren { operand, .. } => vec![Token::OpenParen, Token::Operand(operand)],
        SlotDraw::Operand(n) => vec![Token::Operand(n)],
    }
}

/// Apply one slot's draw, returning the new state and the tokens it emitted
pub fn step(mut state: GenerationState, draw: SlotDraw) -> (GenerationState, Vec<Token>) {
    let emitted = emit(&state, draw);
    for token in &emitted {
        state.push(token.clone());
    }
    state.advance();
    (state, emitted)
}

/// Close every paren still open at the end of the slot loop
pub fn balance(mut state: GenerationState) -> (GenerationState, Vec<Token>) {
    let missing = state.open_count - state.close_count;
    let closing = vec![Token::CloseParen; missing];
    for token in &closing {
        state.push(token.clone());
    }
    (state, closing)
}
