//! Output a target tree as C-style call text.

pub mod expressions;
pub mod foundation;
pub mod program;

pub use foundation::{NodeWriter, OutputOptions, Textify};
pub use program::{generate, generate_with_options};
