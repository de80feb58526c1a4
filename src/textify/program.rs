use std::fmt;

use tracing::debug;

use super::foundation::textify_separated;
use super::{NodeWriter, OutputOptions, Textify};
use crate::target::{ExpressionStatement, Program};

impl Textify for ExpressionStatement {
    fn name() -> &'static str {
        "ExpressionStatement"
    }

    fn textify<W: fmt::Write>(&self, options: &OutputOptions, w: &mut W) -> fmt::Result {
        self.expression.textify(options, w)?;
        w.write_char(';')
    }
}

impl Textify for Program {
    fn name() -> &'static str {
        "Program"
    }

    fn textify<W: fmt::Write>(&self, options: &OutputOptions, w: &mut W) -> fmt::Result {
        textify_separated(&self.body, &options.statement_separator, options, w)?;
        if options.trailing_newline && !self.body.is_empty() {
            w.write_char('\n')?;
        }
        Ok(())
    }
}

/// Generate text for any target node with the default options.
pub fn generate<T: Textify>(node: &T) -> String {
    generate_with_options(node, &OutputOptions::default())
}

pub fn generate_with_options<T: Textify>(node: &T, options: &OutputOptions) -> String {
    let output = NodeWriter::new(options, node).to_string();
    debug!(node = T::name(), bytes = output.len(), "generated code");
    output
}
