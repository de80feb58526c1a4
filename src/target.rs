//! The target-language tree: expression statements over C-style calls.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub body: Vec<ExpressionStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpressionStatement {
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    Call(CallExpression),
    Identifier(Identifier),
    NumberLiteral(NumberLiteral),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallExpression {
    pub callee: Identifier,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identifier {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberLiteral {
    pub value: String,
}

impl Expression {
    pub fn call(callee: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Expression::Call(CallExpression {
            callee: Identifier::new(callee),
            arguments,
        })
    }

    pub fn number(value: impl Into<String>) -> Self {
        Expression::NumberLiteral(NumberLiteral {
            value: value.into(),
        })
    }
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<Expression> for ExpressionStatement {
    fn from(expression: Expression) -> Self {
        Self { expression }
    }
}
