//! Rewrite the source tree into the target tree.
//!
//! Every top-level source node becomes one [`ExpressionStatement`]. Calls
//! keep their shape but rename their fields (`name` becomes an
//! [`Identifier`] callee, `params` become `arguments`); number literals are
//! carried over as-is.

use thiserror::Error;
use tracing::debug;

use crate::parser::ast;
use crate::target::{
    CallExpression, Expression, ExpressionStatement, Identifier, NumberLiteral, Program,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("Unsupported node kind: {kind}")]
    UnsupportedNode { kind: &'static str },
}

pub fn transform(program: ast::Program) -> Result<Program, TransformError> {
    let body = program
        .body
        .into_iter()
        .map(|node| expression(node).map(ExpressionStatement::from))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(statements = body.len(), "transformed program");
    Ok(Program { body })
}

fn expression(node: ast::Node) -> Result<Expression, TransformError> {
    match node {
        ast::Node::CallExpression { name, params } => {
            let arguments = params
                .into_iter()
                .map(expression)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expression::Call(CallExpression {
                callee: Identifier { name },
                arguments,
            }))
        }
        ast::Node::NumberLiteral { value } => Ok(Expression::NumberLiteral(NumberLiteral { value })),
        node @ ast::Node::StringLiteral { .. } => Err(TransformError::UnsupportedNode {
            kind: node.kind(),
        }),
    }
}
