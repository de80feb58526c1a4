#![doc = include_str!("../API.md")]

pub mod lexer;
pub mod parser;
pub mod target;
pub mod textify;
pub mod transform;

#[cfg(feature = "cli")]
pub mod cli;

use thiserror::Error;
use tracing::debug;

// Re-export commonly used types for easier access
pub use lexer::{LexError, Token, TokenKind, tokenize};
pub use parser::{OutputParseError, ParseError, parse};
pub use textify::{OutputOptions, generate, generate_with_options};
pub use transform::{TransformError, transform};

/// A failure in any stage of [`compile`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),
    #[error("Syntax error: {0}")]
    Syntax(#[from] ParseError),
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),
}

#[derive(Debug, Clone, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Reparse(#[from] OutputParseError),
    #[error("Generated code does not read back as the tree it was generated from")]
    Mismatch {
        expected: Box<target::Program>,
        actual: Box<target::Program>,
    },
}

/// Compile source text into C-style call text.
///
/// Runs the lexer, parser, transformer and code generator in order, stopping
/// at the first error.
///
/// # Example
/// ```rust
/// use paren_compiler::compile;
///
/// let code = compile("(add 2 (subtract 4 2))").unwrap();
/// assert_eq!(code, "add(2, subtract(4, 2));");
/// ```
///
/// # Errors
///
/// Returns a [`CompileError`] naming the stage that failed.
///
/// ```rust
/// use paren_compiler::{CompileError, compile};
///
/// match compile("(add 2") {
///     Err(CompileError::Syntax(e)) => println!("Syntax error: {e}"),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
pub fn compile(source: &str) -> Result<String, CompileError> {
    compile_with_options(source, &OutputOptions::default())
}

/// Compile with custom output options.
///
/// # Example
/// ```rust
/// use paren_compiler::{OutputOptions, compile_with_options};
///
/// let options = OutputOptions::compact();
/// let code = compile_with_options("(max 1 2)", &options).unwrap();
/// assert_eq!(code, "max(1,2);");
/// ```
pub fn compile_with_options(source: &str, options: &OutputOptions) -> Result<String, CompileError> {
    let program = lower(source)?;
    Ok(generate_with_options(&program, options))
}

/// Compile, then read the generated code back and check that it describes
/// the same target tree. Returns the generated code.
pub fn validate(source: &str, options: &OutputOptions) -> Result<String, ValidateError> {
    let expected = lower(source)?;
    let code = generate_with_options(&expected, options);
    let actual = parser::read(&code)?;
    if actual != expected {
        return Err(ValidateError::Mismatch {
            expected: Box::new(expected),
            actual: Box::new(actual),
        });
    }
    Ok(code)
}

/// Source text to target tree: every stage except code generation.
pub fn lower(source: &str) -> Result<target::Program, CompileError> {
    debug!(bytes = source.len(), "compiling");
    let tokens = tokenize(source)?;
    let ast = parse(&tokens)?;
    Ok(transform(ast)?)
}
