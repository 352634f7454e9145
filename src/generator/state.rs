use super::token::{Token, TokenKind};

/// Mutable counters and buffer of a single round's generation loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationState {
    pub(crate) position: usize,
    pub(crate) open_count: usize,
    pub(crate) close_count: usize,
    pub(crate) buffer: Vec<Token>,
}

impl GenerationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn open_count(&self) -> usize {
        self.open_count
    }

    pub fn close_count(&self) -> usize {
        self.close_count
    }

    pub fn tokens(&self) -> &[Token] {
        &self.buffer
    }

    pub fn last_kind(&self) -> Option<TokenKind> {
        self.buffer.last().map(Token::kind)
    }

    /// True while there is an open paren left to close
    pub fn can_close(&self) -> bool {
        self.open_count > self.close_count
    }

    pub(crate) fn push(&mut self, token: Token) {
        match token.kind() {
            TokenKind::OpenParen => self.open_count += 1,
            TokenKind::CloseParen => self.close_count += 1,
            _ => {}
        }
        debug_assert!(self.close_count <= self.open_count);
        self.buffer.push(token);
    }

    pub(crate) fn advance(&mut self) {
        self.position += 1;
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.buffer
    }
}
