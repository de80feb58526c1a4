use std::fmt;

/// OutputOptions holds the options for textifying a target tree.
///
/// The defaults produce the canonical output: one statement per line and a
/// single space after each argument comma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    /// Placed between statements; never after the last one.
    pub statement_separator: String,
    /// Placed between call arguments.
    pub argument_separator: String,
    /// End the output with a newline, if there is at least one statement.
    pub trailing_newline: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            statement_separator: "\n".to_string(),
            argument_separator: ", ".to_string(),
            trailing_newline: false,
        }
    }
}

impl OutputOptions {
    /// No space after argument commas.
    pub fn compact() -> Self {
        Self {
            argument_separator: ",".to_string(),
            ..Self::default()
        }
    }
}

/// A target node that can be written as text.
///
/// Each node kind writes itself and delegates to its children, so generation
/// follows the shape of the tree.
pub trait Textify {
    fn textify<W: fmt::Write>(&self, options: &OutputOptions, w: &mut W) -> fmt::Result;

    fn name() -> &'static str;
}

/// Write `items` separated by `sep`.
pub fn textify_separated<'a, T: Textify + 'a, W: fmt::Write>(
    items: impl IntoIterator<Item = &'a T>,
    sep: &str,
    options: &OutputOptions,
    w: &mut W,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            w.write_str(sep)?;
        }
        item.textify(options, w)?;
    }
    Ok(())
}

/// Displays any [`Textify`] node with a fixed set of options.
pub struct NodeWriter<'a, T> {
    options: &'a OutputOptions,
    node: &'a T,
}

impl<'a, T: Textify> NodeWriter<'a, T> {
    pub fn new(options: &'a OutputOptions, node: &'a T) -> Self {
        Self { options, node }
    }
}

impl<T: Textify> fmt::Display for NodeWriter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.textify(self.options, f)
    }
}
