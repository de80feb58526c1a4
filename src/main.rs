use anyhow::Result;
use clap::Parser;
use paren_compiler::cli::{Cli, init_logging};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose());
    cli.run()
}
