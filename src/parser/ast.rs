//! The source-language tree, shaped after the parenthesis nesting of the
//! input.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// Digits exactly as written; never converted to a numeric type.
    NumberLiteral { value: String },
    /// Reserved. The lexer has no string tokens, so the parser never builds
    /// this variant.
    StringLiteral { value: String },
    CallExpression { name: String, params: Vec<Node> },
}

impl Node {
    pub fn number(value: impl Into<String>) -> Self {
        Node::NumberLiteral {
            value: value.into(),
        }
    }

    pub fn call(name: impl Into<String>, params: Vec<Node>) -> Self {
        Node::CallExpression {
            name: name.into(),
            params,
        }
    }

    /// The node kind, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::NumberLiteral { .. } => "NumberLiteral",
            Node::StringLiteral { .. } => "StringLiteral",
            Node::CallExpression { .. } => "CallExpression",
        }
    }

    /// Visit this node and every node below it, parents first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        if let Node::CallExpression { params, .. } = self {
            for param in params {
                param.walk(f);
            }
        }
    }
}

impl Program {
    /// All nodes in the program, in source order.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        for node in &self.body {
            node.walk(&mut |n| out.push(n));
        }
        out
    }
}
