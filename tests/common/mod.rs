//! Common test utilities for compile testing

use paren_compiler::parser::read;
use paren_compiler::{compile, lower};

/// Compile `source` and check the output against `expected`, then read the
/// output back and check it describes the same target tree.
pub fn compile_roundtrip(source: &str, expected: &str) {
    let actual = match compile(source) {
        Ok(code) => code,
        Err(e) => {
            println!("Error compiling:\n{source}");
            panic!("{}", e);
        }
    };

    assert_eq!(
        actual, expected,
        "Expected:\n---\n{}\n---\nActual:\n---\n{}\n---",
        expected, actual
    );

    let tree = lower(source).expect("source compiled once already");
    let reread = match read(&actual) {
        Ok(tree) => tree,
        Err(e) => {
            println!("Error reading generated code:\n{actual}");
            panic!("{}", e);
        }
    };
    assert_eq!(reread, tree, "Generated code did not read back as the same tree");
}
