use thiserror::Error;

/// A generated expression broke one of the grammar invariants
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("Expression is empty")]
    Empty,
    #[error("Unexpected character '{ch}' at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },
    #[error("Integer literal out of range at offset {offset}")]
    NumberOutOfRange { offset: usize },
    #[error("Expression starts with operator '{op}'")]
    LeadingOperator { op: char },
    #[error("Expression ends with an operator")]
    TrailingOperator,
    #[error("Operator '{op}' at offset {offset} directly follows an open paren")]
    OperatorAfterOpenParen { op: char, offset: usize },
    #[error("Operator '{op}' at offset {offset} directly follows another operator")]
    AdjacentOperators { op: char, offset: usize },
    #[error("Close paren at offset {offset} directly follows an operator")]
    OperatorBeforeCloseParen { offset: usize },
    #[error("Empty parentheses at offset {offset}")]
    EmptyGroup { offset: usize },
    #[error("Missing operator before offset {offset}")]
    MissingOperator { offset: usize },
    #[error("Unknown operator '{op}' at offset {offset}")]
    UnknownOperator { op: char, offset: usize },
    #[error("Close paren at offset {offset} has no matching open paren")]
    UnmatchedCloseParen { offset: usize },
    #[error("Unbalanced parentheses: {open} open, {close} close")]
    Unbalanced { open: usize, close: usize },
    #[error("Stray comma at offset {offset}")]
    StrayComma { offset: usize },
    #[error("Unknown function '{name}' at offset {offset}")]
    UnknownFunction { name: String, offset: usize },
    #[error("Function '{name}' at offset {offset} is not followed by '('")]
    CallMissingOpenParen { name: String, offset: usize },
    #[error("Function '{name}' at offset {offset} has an empty argument list")]
    EmptyArgumentList { name: String, offset: usize },
    #[error("Malformed argument in call to '{name}' at offset {offset}")]
    MalformedArgument { name: String, offset: usize },
    #[error("Call to '{name}' at offset {offset} is never closed")]
    UnclosedCall { name: String, offset: usize },
    #[error("Call to '{name}' has {count} arguments, expected {min} to {max}")]
    ArityMismatch {
        name: String,
        count: usize,
        min: usize,
        max: usize,
    },
}
