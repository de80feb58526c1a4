use std::fmt;

use super::foundation::textify_separated;
use super::{OutputOptions, Textify};
use crate::target::{CallExpression, Expression, Identifier, NumberLiteral};

// …(…) for a call
// …, … between arguments

impl Textify for Identifier {
    fn name() -> &'static str {
        "Identifier"
    }

    fn textify<W: fmt::Write>(&self, _options: &OutputOptions, w: &mut W) -> fmt::Result {
        w.write_str(&self.name)
    }
}

impl Textify for NumberLiteral {
    fn name() -> &'static str {
        "NumberLiteral"
    }

    // Written from the source text, so leading zeros survive.
    fn textify<W: fmt::Write>(&self, _options: &OutputOptions, w: &mut W) -> fmt::Result {
        w.write_str(&self.value)
    }
}

impl Textify for CallExpression {
    fn name() -> &'static str {
        "CallExpression"
    }

    fn textify<W: fmt::Write>(&self, options: &OutputOptions, w: &mut W) -> fmt::Result {
        self.callee.textify(options, w)?;
        w.write_char('(')?;
        textify_separated(&self.arguments, &options.argument_separator, options, w)?;
        w.write_char(')')
    }
}

impl Textify for Expression {
    fn name() -> &'static str {
        "Expression"
    }

    fn textify<W: fmt::Write>(&self, options: &OutputOptions, w: &mut W) -> fmt::Result {
        match self {
            Expression::Call(call) => call.textify(options, w),
            Expression::Identifier(identifier) => identifier.textify(options, w),
            Expression::NumberLiteral(number) => number.textify(options, w),
        }
    }
}
