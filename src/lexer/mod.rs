// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::str::Chars;

use crate::ConfXmlError;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // --- literals ---
    Ident(String),
    Number(i64),

    // --- keywords ---
    Var,

    // --- structure ---
    Pipe,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Colon,

    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "name '{}'", name),
            Token::Number(n) => write!(f, "number {}", n),
            Token::Var => f.write_str("keyword 'var'"),
            Token::Pipe => f.write_str("'|'"),
            Token::LBracket => f.write_str("'['"),
            Token::RBracket => f.write_str("']'"),
            Token::LBrace => f.write_str("'{'"),
            Token::RBrace => f.write_str("'}'"),
            Token::Comma => f.write_str("','"),
            Token::Semicolon => f.write_str("';'"),
            Token::Colon => f.write_str("':'"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

#[derive(Clone)]
pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    column: usize,
    token_line: usize,
    token_column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            line: 1,
            column: 0,
            token_line: 1,
            token_column: 1,
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Line of the first character of the last token returned.
    pub fn token_line(&self) -> usize {
        self.token_line
    }

    /// Column of the first character of the last token returned.
    pub fn token_column(&self) -> usize {
        self.token_column
    }

    /// Whitespace, newlines included, is skipped between tokens.
    pub fn next_token(&mut self) -> Result<Token, ConfXmlError> {
        tokenizer::next_token(self)
    }
}
