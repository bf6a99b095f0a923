use crate::lexer::{Lexer, Token};
use crate::ConfXmlError;
use crate::ast::{Document, Value};

mod document;
mod value;

/// Arrays and dicts nested deeper than this are rejected by default.
pub const DEFAULT_MAX_DEPTH: usize = 128;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peek: Option<Token>,
    peek_pos: (usize, usize),
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, ConfXmlError> {
        let mut lexer = Lexer::new(input);
        let peek = Some(lexer.next_token()?);
        let peek_pos = (lexer.token_line(), lexer.token_column());
        Ok(Self {
            lexer,
            peek,
            peek_pos,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub(crate) fn bump(&mut self) -> Result<Token, ConfXmlError> {
        let curr = self.peek.take().ok_or(ConfXmlError::UnexpectedEof {
            message: "Unexpected end of input".into(),
            line: self.lexer.line(),
            column: self.lexer.column(),
            hint: None,
            code: Some(201),
        })?;
        if curr != Token::Eof {
            self.peek = Some(self.lexer.next_token()?);
            self.peek_pos = (self.lexer.token_line(), self.lexer.token_column());
        }
        Ok(curr)
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.peek.as_ref()
    }

    /// The token after the peeked one; lexing errors there are left for `bump`.
    pub(crate) fn peek_second(&self) -> Option<Token> {
        self.lexer.clone().next_token().ok()
    }

    pub(crate) fn line(&self) -> usize {
        self.peek_pos.0
    }

    pub(crate) fn column(&self) -> usize {
        self.peek_pos.1
    }

    /// Error for the peeked token not being what the grammar wants here.
    pub(crate) fn unexpected(&self, expected: &str, hint: Option<&str>, code: u32) -> ConfXmlError {
        match self.peek() {
            Some(Token::Eof) | None => ConfXmlError::UnexpectedEof {
                message: format!("Expected {}", expected),
                line: self.line(),
                column: self.column(),
                hint: hint.map(Into::into),
                code: Some(code),
            },
            Some(tok) => ConfXmlError::InvalidToken {
                token: tok.to_string(),
                line: self.line(),
                column: self.column(),
                hint: Some(match hint {
                    Some(h) => format!("Expected {}. {}", expected, h),
                    None => format!("Expected {}", expected),
                }),
                code: Some(code),
            },
        }
    }

    pub(crate) fn expect(&mut self, expected: Token, hint: Option<&str>, code: u32) -> Result<(), ConfXmlError> {
        if self.peek() != Some(&expected) {
            return Err(self.unexpected(&expected.to_string(), hint, code));
        }
        self.bump()?;
        Ok(())
    }

    /// Consume a NAME, returning it with its position. The word `var` is a
    /// NAME everywhere except at the start of a constant declaration.
    pub(crate) fn expect_ident(&mut self, what: &str, code: u32) -> Result<(String, usize, usize), ConfXmlError> {
        let (line, column) = self.peek_pos;
        match self.peek() {
            Some(Token::Ident(_)) | Some(Token::Var) => match self.bump()? {
                Token::Ident(name) => Ok((name, line, column)),
                _ => Ok(("var".to_string(), line, column)),
            },
            _ => Err(self.unexpected(what, None, code)),
        }
    }

    pub(crate) fn enter(&mut self) -> Result<(), ConfXmlError> {
        if self.depth >= self.max_depth {
            return Err(ConfXmlError::NestingTooDeep {
                limit: self.max_depth,
                line: self.line(),
                column: self.column(),
                hint: Some("Flatten the value or raise the nesting limit".into()),
                code: Some(209),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn parse_document(&mut self) -> Result<Document, ConfXmlError> {
        document::parse_document(self)
    }
}

#[cfg(test)]
mod tests;
