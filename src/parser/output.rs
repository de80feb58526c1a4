//! Read generated code back into a target tree.
//!
//! This is the inverse of [`crate::textify`], used to check that the text we
//! emit describes the same tree we generated it from.

use thiserror::Error;

use super::common::{Error, Parse, ParsePair, Rule, RuleIter, unwrap_single_pair};
use crate::target::{
    CallExpression, Expression, ExpressionStatement, Identifier, NumberLiteral, Program,
};

#[derive(Debug, Clone, Error)]
#[error("Error parsing generated code: {0}")]
pub struct OutputParseError(#[from] Error);

/// Parse generated code. The whole input must match.
pub fn read(text: &str) -> Result<Program, OutputParseError> {
    Ok(Program::parse(text)?)
}

impl ParsePair for Identifier {
    fn rule() -> Rule {
        Rule::identifier
    }

    fn parse_pair(pair: pest::iterators::Pair<Rule>) -> Self {
        assert_eq!(pair.as_rule(), Self::rule());
        Identifier::new(pair.as_str())
    }
}

impl ParsePair for NumberLiteral {
    fn rule() -> Rule {
        Rule::number
    }

    fn parse_pair(pair: pest::iterators::Pair<Rule>) -> Self {
        assert_eq!(pair.as_rule(), Self::rule());
        NumberLiteral {
            value: pair.as_str().to_string(),
        }
    }
}

impl ParsePair for CallExpression {
    fn rule() -> Rule {
        Rule::call
    }

    fn parse_pair(pair: pest::iterators::Pair<Rule>) -> Self {
        assert_eq!(pair.as_rule(), Self::rule());
        let mut iter = RuleIter::from(pair.into_inner());
        let callee = iter.parse_next::<Identifier>();
        let mut arguments = Vec::new();
        while let Some(argument) = iter.parse_if_next::<Expression>() {
            arguments.push(argument);
        }
        iter.done();
        CallExpression { callee, arguments }
    }
}

impl ParsePair for Expression {
    fn rule() -> Rule {
        Rule::expression
    }

    fn parse_pair(pair: pest::iterators::Pair<Rule>) -> Self {
        assert_eq!(pair.as_rule(), Self::rule());
        let inner = unwrap_single_pair(pair);
        match inner.as_rule() {
            Rule::call => Expression::Call(CallExpression::parse_pair(inner)),
            Rule::number => Expression::NumberLiteral(NumberLiteral::parse_pair(inner)),
            Rule::identifier => Expression::Identifier(Identifier::parse_pair(inner)),
            _ => unreachable!("Unexpected rule in expression: {:?}", inner.as_rule()),
        }
    }
}

impl ParsePair for ExpressionStatement {
    fn rule() -> Rule {
        Rule::statement
    }

    fn parse_pair(pair: pest::iterators::Pair<Rule>) -> Self {
        assert_eq!(pair.as_rule(), Self::rule());
        let expression = Expression::parse_pair(unwrap_single_pair(pair));
        ExpressionStatement { expression }
    }
}

impl ParsePair for Program {
    fn rule() -> Rule {
        Rule::program
    }

    fn parse_pair(pair: pest::iterators::Pair<Rule>) -> Self {
        assert_eq!(pair.as_rule(), Self::rule());
        let mut iter = RuleIter::from(pair.into_inner());
        let mut body = Vec::new();
        while let Some(statement) = iter.parse_if_next::<ExpressionStatement>() {
            body.push(statement);
        }
        iter.pop_if(Rule::EOI);
        iter.done();
        Program { body }
    }
}
