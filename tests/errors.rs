//! Each stage fails fast with its own error, and `compile` never returns
//! partial output.

use paren_compiler::parser::MAX_NESTING;
use paren_compiler::parser::ast::{Node, Program};
use paren_compiler::{
    CompileError, LexError, ParseError, TokenKind, TransformError, compile, transform,
};

#[test]
fn test_unterminated_call() {
    let err = compile("(add 2").unwrap_err();
    assert_eq!(
        err,
        CompileError::Syntax(ParseError::Unterminated {
            name: "add".to_string(),
            offset: 0
        })
    );
}

#[test]
fn test_unrecognized_character() {
    let err = compile("(add 2 #)").unwrap_err();
    assert_eq!(
        err,
        CompileError::Lex(LexError::UnexpectedCharacter {
            character: '#',
            offset: 7
        })
    );
}

#[test]
fn test_unrecognized_characters_are_never_skipped() {
    for source in ["-1", "(add 1.5 2)", "(f \"s\")", "(f_g 1)", "[f 1]", "(f 1);"] {
        assert!(
            matches!(compile(source), Err(CompileError::Lex(_))),
            "expected a lexical error for {source:?}"
        );
    }
}

#[test]
fn test_missing_callee() {
    let err = compile("(1 2)").unwrap_err();
    assert_eq!(
        err,
        CompileError::Syntax(ParseError::MissingCallee {
            offset: 1,
            found: Some(TokenKind::Number("1".to_string())),
        })
    );

    assert!(matches!(
        compile("()"),
        Err(CompileError::Syntax(ParseError::MissingCallee { .. }))
    ));
}

#[test]
fn test_unexpected_tokens() {
    assert!(matches!(
        compile("(f 1))"),
        Err(CompileError::Syntax(ParseError::UnexpectedToken { offset: 5, .. }))
    ));
    assert!(matches!(
        compile("add"),
        Err(CompileError::Syntax(ParseError::UnexpectedToken { offset: 0, .. }))
    ));
}

#[test]
fn test_error_messages() {
    let err = compile("(add 2").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Syntax error: Expected ')' to close call to 'add' opened at offset 0, found end of input"
    );

    let err = compile("(3)").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Syntax error: Expected a callee name at offset 1, found number '3'"
    );
}

#[test]
fn test_string_literal_is_unsupported() {
    let program = Program {
        body: vec![Node::StringLiteral {
            value: "hello".to_string(),
        }],
    };
    assert_eq!(
        transform(program).unwrap_err(),
        TransformError::UnsupportedNode {
            kind: "StringLiteral"
        }
    );
}

fn nested(depth: usize) -> String {
    format!("{}1{}", "(a ".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_deep_nesting_is_an_error_not_a_crash() {
    for depth in [MAX_NESTING + 1, 1000, 5000] {
        assert!(
            matches!(
                compile(&nested(depth)),
                Err(CompileError::Syntax(ParseError::TooDeep { limit: MAX_NESTING, .. }))
            ),
            "expected a nesting error at depth {depth}"
        );
    }
}

#[test]
fn test_nesting_at_the_limit_compiles() {
    let code = compile(&nested(MAX_NESTING)).unwrap();
    let expected = format!("{}1{};", "a(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
    assert_eq!(code, expected);
}
