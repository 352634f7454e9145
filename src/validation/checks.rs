use log::{debug, warn};

use crate::generator::GeneratorConfig;
use crate::validation::errors::InvariantViolation;
use crate::validation::lexer::{Lexeme, lex};

/// What the scanner saw last, from the point of view of operand/operator
/// alternation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    Start,
    Operand,
    Operator,
    OpenParen,
}

/// Summary of a validated expression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpressionShape {
    pub operands: usize,
    pub operators: usize,
    pub calls: usize,
    pub open_parens: usize,
    pub close_parens: usize,
    pub max_depth: usize,
}

/// Check that `expr` is a well-formed expression over `config`'s operators
/// and functions.
///
/// # Errors
///
/// Returns the first invariant violation found, scanning left to right.
pub fn validate_expression(
    expr: &str,
    config: &GeneratorConfig,
) -> Result<ExpressionShape, InvariantViolation> {
    let lexemes = lex(expr)?;
    if lexemes.is_empty() {
        warn!("Empty expression");
        return Err(InvariantViolation::Empty);
    }

    let mut shape = ExpressionShape::default();
    let mut depth = 0usize;
    let mut last = Last::Start;
    let mut i = 0;

    while let Some((offset, lexeme)) = lexemes.get(i) {
        let offset = *offset;
        let expects_operand = last != Last::Operand;

        match lexeme {
            Lexeme::Number(_) => {
                if !expects_operand {
                    return Err(InvariantViolation::MissingOperator { offset });
                }
                shape.operands += 1;
                last = Last::Operand;
            }
            Lexeme::Operator(op) => {
                match last {
                    Last::Start => return Err(InvariantViolation::LeadingOperator { op: *op }),
                    Last::OpenParen => {
                        return Err(InvariantViolation::OperatorAfterOpenParen { op: *op, offset });
                    }
                    Last::Operator => {
                        return Err(InvariantViolation::AdjacentOperators { op: *op, offset });
                    }
                    Last::Operand => {}
                }
                if !config.operators.contains(op) {
                    return Err(InvariantViolation::UnknownOperator { op: *op, offset });
                }
                shape.operators += 1;
                last = Last::Operator;
            }
            Lexeme::OpenParen => {
                if !expects_operand {
                    return Err(InvariantViolation::MissingOperator { offset });
                }
                depth += 1;
                shape.open_parens += 1;
                shape.max_depth = shape.max_depth.max(depth);
                last = Last::OpenParen;
            }
            Lexeme::CloseParen => {
                match last {
                    Last::OpenParen => return Err(InvariantViolation::EmptyGroup { offset }),
                    Last::Operator => {
                        return Err(InvariantViolation::OperatorBeforeCloseParen { offset });
                    }
                    Last::Start | Last::Operand => {}
                }
                if depth == 0 {
                    return Err(InvariantViolation::UnmatchedCloseParen { offset });
                }
                depth -= 1;
                shape.close_parens += 1;
                last = Last::Operand;
            }
            Lexeme::Comma => return Err(InvariantViolation::StrayComma { offset }),
            Lexeme::Ident(name) => {
                if !expects_operand {
                    return Err(InvariantViolation::MissingOperator { offset });
                }
                i = check_call(&lexemes, i, name, config)?;
                shape.calls += 1;
                last = Last::Operand;
                continue;
            }
        }

        i += 1;
    }

    if last == Last::Operator {
        return Err(InvariantViolation::TrailingOperator);
    }
    if depth != 0 {
        return Err(InvariantViolation::Unbalanced {
            open: shape.open_parens,
            close: shape.close_parens,
        });
    }

    debug!("Expression validated: {:?}", shape);
    Ok(shape)
}

/// Validate the call starting at `start`, returning the index just past its
/// closing paren.
fn check_call(
    lexemes: &[(usize, Lexeme)],
    start: usize,
    name: &str,
    config: &GeneratorConfig,
) -> Result<usize, InvariantViolation> {
    let offset = lexemes.get(start).map_or(0, |(o, _)| *o);
    if !config.is_function(name) {
        return Err(InvariantViolation::UnknownFunction {
            name: name.to_string(),
            offset,
        });
    }
    if !matches!(lexemes.get(start + 1), Some((_, Lexeme::OpenParen))) {
        return Err(InvariantViolation::CallMissingOpenParen {
            name: name.to_string(),
            offset,
        });
    }

    let malformed = || InvariantViolation::MalformedArgument {
        name: name.to_string(),
        offset,
    };
    let unclosed = || InvariantViolation::UnclosedCall {
        name: name.to_string(),
        offset,
    };

    let mut i = start + 2;
    let mut count = 0usize;
    loop {
        match lexemes.get(i) {
            Some((_, Lexeme::CloseParen)) if count == 0 => {
                return Err(InvariantViolation::EmptyArgumentList {
                    name: name.to_string(),
                    offset,
                });
            }
            Some((_, Lexeme::Number(_))) => i += 1,
            Some((_, Lexeme::Operator('-'))) => match lexemes.get(i + 1) {
                Some((_, Lexeme::Number(_))) => i += 2,
                Some(_) => return Err(malformed()),
                None => return Err(unclosed()),
            },
            Some(_) => return Err(malformed()),
            None => return Err(unclosed()),
        }
        count += 1;

        match lexemes.get(i) {
            Some((_, Lexeme::Comma)) => i += 1,
            Some((_, Lexeme::CloseParen)) => break,
            Some(_) => return Err(malformed()),
            None => return Err(unclosed()),
        }
    }

    let min = config.min_arguments(name);
    let max = config.max_arguments(name);
    if !(min..=max).contains(&count) {
        return Err(InvariantViolation::ArityMismatch {
            name: name.to_string(),
            count,
            min,
            max,
        });
    }

    Ok(i + 1)
}
