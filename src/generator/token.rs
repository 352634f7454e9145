use std::fmt;

/// Category of an emitted token, used for "what came last" queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Operand,
    Operator,
    OpenParen,
    CloseParen,
    Call,
}

/// One emitted unit of a generated expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Operand(i64),
    Operator(char),
    OpenParen,
    CloseParen,
    Call { name: String, args: Vec<i64> },
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Operand(_) => TokenKind::Operand,
            Token::Operator(_) => TokenKind::Operator,
            Token::OpenParen => TokenKind::OpenParen,
            Token::CloseParen => TokenKind::CloseParen,
            Token::Call { .. } => TokenKind::Call,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Operand(n) => write!(f, "{}", n),
            Token::Operator(op) => write!(f, "{}", op),
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
