//! Recursive-descent parser from tokens to the source tree.
//!
//! A [`Parser`] owns the only cursor into the token slice. `walk` decodes one
//! expression and leaves the cursor just past it, so a call only returns once
//! its whole balanced form has been consumed.

use thiserror::Error;
use tracing::debug;

use super::ast::{Node, Program};
use crate::lexer::{Paren, Token, TokenKind};

/// Deepest call nesting accepted. Every later stage recurses once per level,
/// so this also bounds their stack use.
pub const MAX_NESTING: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Expected a callee name at offset {offset}, found {}", found_or_end(.found))]
    MissingCallee {
        offset: usize,
        found: Option<TokenKind>,
    },
    #[error("Expected ')' to close call to '{name}' opened at offset {offset}, found end of input")]
    Unterminated { name: String, offset: usize },
    #[error("Expected a number or '(' at offset {offset}, found {found}")]
    UnexpectedToken { found: TokenKind, offset: usize },
    #[error("Call at offset {offset} is nested deeper than {limit} levels")]
    TooDeep { offset: usize, limit: usize },
}

fn found_or_end(found: &Option<TokenKind>) -> String {
    match found {
        Some(kind) => kind.to_string(),
        None => "end of input".to_string(),
    }
}

pub struct Parser<'t> {
    tokens: &'t [Token],
    cursor: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            cursor: 0,
            depth: 0,
        }
    }

    /// Parse every token into a program.
    pub fn parse(tokens: &'t [Token]) -> Result<Program, ParseError> {
        let mut parser = Self::new(tokens);
        let mut body = Vec::new();
        while let Some(token) = parser.next() {
            body.push(parser.walk(token)?);
        }
        debug!(statements = body.len(), "parsed program");
        Ok(Program { body })
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.cursor)
    }

    fn next(&mut self) -> Option<&'t Token> {
        let token = self.peek()?;
        self.cursor += 1;
        Some(token)
    }

    /// Decode the expression starting at `token`, which the cursor has just
    /// passed.
    fn walk(&mut self, token: &'t Token) -> Result<Node, ParseError> {
        match &token.kind {
            TokenKind::Number(value) => Ok(Node::number(value.as_str())),
            TokenKind::Paren(Paren::Open) => {
                if self.depth >= MAX_NESTING {
                    return Err(ParseError::TooDeep {
                        offset: token.offset,
                        limit: MAX_NESTING,
                    });
                }
                self.depth += 1;
                let node = self.call(token.offset);
                self.depth -= 1;
                node
            }
            found => Err(ParseError::UnexpectedToken {
                found: found.clone(),
                offset: token.offset,
            }),
        }
    }

    /// The rest of a call, after its opening parenthesis.
    fn call(&mut self, open: usize) -> Result<Node, ParseError> {
        let name = match self.next() {
            Some(Token {
                kind: TokenKind::Name(name),
                ..
            }) => name.clone(),
            other => {
                return Err(ParseError::MissingCallee {
                    offset: other.map_or(open, |t| t.offset),
                    found: other.map(|t| t.kind.clone()),
                });
            }
        };

        let mut params = Vec::new();
        loop {
            let Some(token) = self.next() else {
                return Err(ParseError::Unterminated { name, offset: open });
            };
            if token.is_paren(Paren::Close) {
                return Ok(Node::call(name, params));
            }
            params.push(self.walk(token)?);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_str(source: &str) -> Result<Program, ParseError> {
        let tokens = tokenize(source).unwrap();
        Parser::parse(&tokens)
    }

    #[test]
    fn test_nested_call() {
        let program = parse_str("(add 2 (subtract 4 2))").unwrap();
        assert_eq!(
            program.body,
            vec![Node::call(
                "add",
                vec![
                    Node::number("2"),
                    Node::call("subtract", vec![Node::number("4"), Node::number("2")]),
                ]
            )]
        );
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(parse_str("").unwrap(), Program::default());
        assert_eq!(parse_str("  \n ").unwrap(), Program::default());
    }

    #[test]
    fn test_call_without_params() {
        let program = parse_str("(now)").unwrap();
        assert_eq!(program.body, vec![Node::call("now", vec![])]);
    }

    #[test]
    fn test_top_level_number() {
        let program = parse_str("42 (f 1)").unwrap();
        assert_eq!(
            program.body,
            vec![
                Node::number("42"),
                Node::call("f", vec![Node::number("1")])
            ]
        );
    }

    #[test]
    fn test_multiple_statements() {
        let program = parse_str("(foo 1) (bar 2)").unwrap();
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn test_parens_are_all_consumed() {
        let source = "(a (b (c 1) 2) (d))";
        let tokens = tokenize(source).unwrap();
        let opens = tokens.iter().filter(|t| t.is_paren(Paren::Open)).count();
        let closes = tokens.iter().filter(|t| t.is_paren(Paren::Close)).count();
        assert_eq!(opens, closes);

        let program = Parser::parse(&tokens).unwrap();
        let calls = program
            .nodes()
            .into_iter()
            .filter(|n| matches!(n, Node::CallExpression { .. }))
            .count();
        assert_eq!(calls, opens);
    }

    #[test]
    fn test_unterminated_call() {
        let err = parse_str("(add 2").unwrap_err();
        assert_eq!(
            err,
            ParseError::Unterminated {
                name: "add".to_string(),
                offset: 0
            }
        );
    }

    #[test]
    fn test_unterminated_inner_call() {
        let err = parse_str("(add 2 (sub 1)").unwrap_err();
        assert_eq!(
            err,
            ParseError::Unterminated {
                name: "add".to_string(),
                offset: 0
            }
        );

        let err = parse_str("(add (sub 1").unwrap_err();
        assert_eq!(
            err,
            ParseError::Unterminated {
                name: "sub".to_string(),
                offset: 5
            }
        );
    }

    #[test]
    fn test_missing_callee() {
        let err = parse_str("(2 3)").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingCallee {
                offset: 1,
                found: Some(TokenKind::Number("2".to_string())),
            }
        );
        assert!(err.to_string().contains("found number '2'"));

        let err = parse_str("(").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingCallee {
                offset: 0,
                found: None
            }
        );
        assert!(err.to_string().contains("end of input"));
    }

    fn nested(depth: usize) -> String {
        format!("{}1{}", "(a ".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn test_nesting_limit() {
        let program = parse_str(&nested(MAX_NESTING)).unwrap();
        assert_eq!(program.nodes().len(), MAX_NESTING + 1);

        let err = parse_str(&nested(MAX_NESTING + 1)).unwrap_err();
        assert_eq!(
            err,
            ParseError::TooDeep {
                offset: 3 * MAX_NESTING,
                limit: MAX_NESTING
            }
        );
    }

    #[test]
    fn test_nesting_limit_is_per_branch() {
        // Siblings do not add up; only the depth of one path counts.
        let wide = vec![nested(MAX_NESTING - 1); 4].join(" ");
        let source = format!("(top {wide})");
        assert!(parse_str(&source).is_ok());
    }

    #[test]
    fn test_stray_close_paren() {
        let err = parse_str(")").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                found: TokenKind::Paren(Paren::Close),
                offset: 0
            }
        );
    }

    #[test]
    fn test_bare_name_is_not_an_expression() {
        let err = parse_str("(add x)").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                found: TokenKind::Name("x".to_string()),
                offset: 5
            }
        );
    }

    #[test]
    fn test_string_literal_never_produced() {
        let program = parse_str("(a 1 (b 22 (c)) 333) 4 (d)").unwrap();
        assert!(
            program
                .nodes()
                .iter()
                .all(|n| !matches!(n, Node::StringLiteral { .. }))
        );
    }
}
