//! Lexical analysis: source text to tokens.
//!
//! The lexer makes a single left-to-right pass over the input with an
//! explicit byte cursor. Each position is classified as a parenthesis,
//! whitespace, a digit run or a letter run; anything else stops the scan
//! with a [`LexError`].

use std::fmt;

use thiserror::Error;
use tracing::{debug, trace};

/// Which parenthesis a [`TokenKind::Paren`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Paren {
    Open,
    Close,
}

impl Paren {
    pub fn as_char(self) -> char {
        match self {
            Paren::Open => '(',
            Paren::Close => ')',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    Paren(Paren),
    /// A maximal run of ASCII digits, kept as written.
    Number(String),
    /// A maximal run of ASCII letters.
    Name(String),
}

/// A classified lexical unit, with the byte offset it started at.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn is_paren(&self, paren: Paren) -> bool {
        self.kind == TokenKind::Paren(paren)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Paren(p) => write!(f, "'{}'", p.as_char()),
            TokenKind::Number(text) => write!(f, "number '{text}'"),
            TokenKind::Name(text) => write!(f, "name '{text}'"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Unexpected character {character:?} at offset {offset}")]
    UnexpectedCharacter { character: char, offset: usize },
}

pub struct Lexer<'a> {
    source: &'a str,
    cursor: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: 0,
            tokens: Vec::new(),
        }
    }

    /// Scan the whole input. Stops at the first unrecognized character.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(c) = self.peek() {
            match c {
                '(' => self.single(Paren::Open),
                ')' => self.single(Paren::Close),
                c if c.is_whitespace() => self.cursor += c.len_utf8(),
                c if c.is_ascii_digit() => {
                    let (start, text) = self.run(|c| c.is_ascii_digit());
                    self.push(TokenKind::Number(text), start);
                }
                c if c.is_ascii_alphabetic() => {
                    let (start, text) = self.run(|c| c.is_ascii_alphabetic());
                    self.push(TokenKind::Name(text), start);
                }
                character => {
                    return Err(LexError::UnexpectedCharacter {
                        character,
                        offset: self.cursor,
                    });
                }
            }
        }
        debug!(tokens = self.tokens.len(), "tokenized source");
        Ok(self.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.cursor..].chars().next()
    }

    fn single(&mut self, paren: Paren) {
        let start = self.cursor;
        self.cursor += 1;
        self.push(TokenKind::Paren(paren), start);
    }

    /// Consume the maximal run of characters matching `class`, returning the
    /// start offset and the captured text.
    fn run(&mut self, class: impl Fn(char) -> bool) -> (usize, String) {
        let start = self.cursor;
        let len = self.source[start..]
            .find(|c: char| !class(c))
            .unwrap_or(self.source.len() - start);
        self.cursor = start + len;
        (start, self.source[start..self.cursor].to_string())
    }

    fn push(&mut self, kind: TokenKind, offset: usize) {
        trace!(offset, "token {kind}");
        self.tokens.push(Token::new(kind, offset));
    }
}

/// Split `source` into tokens.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}
