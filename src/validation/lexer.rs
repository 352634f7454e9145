use log::debug;

use crate::validation::errors::InvariantViolation;

/// One lexical unit of expression text, tagged with its byte offset
#[derive(Debug, Clone, PartialEq)]
pub enum Lexeme {
    Number(i64),
    Operator(char),
    OpenParen,
    CloseParen,
    Comma,
    Ident(String),
}

/// True if `ch` lexes on its own as a [`Lexeme::Operator`].
///
/// Excludes identifier characters, `.` (read as a decimal point by
/// evaluators), the paren and comma punctuation, whitespace and control
/// characters.
pub fn is_operator_symbol(ch: char) -> bool {
    !(ch.is_alphanumeric()
        || ch.is_whitespace()
        || ch.is_control()
        || matches!(ch, '_' | '.' | '(' | ')' | ','))
}

/// Split expression text into lexemes.
///
/// Every `-` is lexed as an operator; signed call arguments are recognised
/// by the checker, which knows when it is inside an argument list.
///
/// # Errors
///
/// Returns an error on characters that are neither part of a literal,
/// identifier or punctuation nor an operator symbol, and on literals that do
/// not fit in an `i64`.
pub fn lex(expr: &str) -> Result<Vec<(usize, Lexeme)>, InvariantViolation> {
    let mut lexemes = Vec::new();
    let mut chars = expr.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        let lexeme = match ch {
            c if c.is_whitespace() => continue,
            '(' => Lexeme::OpenParen,
            ')' => Lexeme::CloseParen,
            ',' => Lexeme::Comma,
            c if c.is_ascii_digit() => {
                let mut end = offset + c.len_utf8();
                while let Some(&(i, d)) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
                let digits = expr.get(offset..end).unwrap_or_default();
                let value = digits
                    .parse::<i64>()
                    .map_err(|_| InvariantViolation::NumberOutOfRange { offset })?;
                Lexeme::Number(value)
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = String::from(c);
                while let Some(&(_, d)) = chars.peek() {
                    if !(d.is_ascii_alphanumeric() || d == '_') {
                        break;
                    }
                    name.push(d);
                    chars.next();
                }
                Lexeme::Ident(name)
            }
            c if is_operator_symbol(c) => Lexeme::Operator(c),
            c => return Err(InvariantViolation::UnexpectedCharacter { ch: c, offset }),
        };
        lexemes.push((offset, lexeme));
    }

    debug!("Lexed {} lexemes from {} bytes", lexemes.len(), expr.len());
    Ok(lexemes)
}
