pub mod ast;
mod common;
pub mod output;
mod structural;
pub use common::{Parse, ParsePair, Rule};
pub use output::{OutputParseError, read};
pub use structural::{MAX_NESTING, ParseError, Parser};

use crate::lexer::Token;

/// Parse tokens into the source tree.
pub fn parse(tokens: &[Token]) -> Result<ast::Program, ParseError> {
    Parser::parse(tokens)
}
