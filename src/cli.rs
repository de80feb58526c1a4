use std::fmt::Debug;
use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{OutputOptions, compile_with_options, lower, parse, tokenize, validate};

#[derive(Parser)]
#[command(name = "paren-compiler")]
#[command(about = "Compile parenthesized call expressions into C-style call syntax")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let (input, output) = match &self.command {
            Commands::Compile { input, output, .. } => (input, output),
            Commands::Validate { input, output, .. } => (input, output),
        };
        let reader =
            get_reader(input).with_context(|| format!("Failed to open input file: {input}"))?;
        let writer =
            get_writer(output).with_context(|| format!("Failed to create output file: {output}"))?;
        self.run_with_io(reader, writer)
    }

    /// Run CLI with provided readers and writers for testing
    pub fn run_with_io<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<()> {
        match &self.command {
            Commands::Compile {
                emit,
                format,
                compact,
                trailing_newline,
                ..
            } => {
                let options = self.create_output_options(*compact, *trailing_newline);
                self.run_compile_with_io(reader, writer, emit, format, &options)
            }

            Commands::Validate { .. } => self.run_validate_with_io(reader, writer),
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Commands::Compile { verbose, .. } | Commands::Validate { verbose, .. } => *verbose,
        }
    }

    fn create_output_options(&self, compact: bool, trailing_newline: bool) -> OutputOptions {
        let mut options = if compact {
            OutputOptions::compact()
        } else {
            OutputOptions::default()
        };
        options.trailing_newline = trailing_newline;
        options
    }

    fn run_compile_with_io<R: Read, W: Write>(
        &self,
        reader: R,
        writer: W,
        emit: &Stage,
        format: &Format,
        options: &OutputOptions,
    ) -> Result<()> {
        let source = read_text_input(reader)?;

        emit.write(writer, &source, format, options)
            .with_context(|| format!("Failed to emit {}", format!("{emit:?}").to_lowercase()))?;

        info!("Successfully compiled to {emit:?}");
        Ok(())
    }

    fn run_validate_with_io<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<()> {
        let source = read_text_input(reader)?;

        let code = validate(&source, &OutputOptions::default())
            .with_context(|| "Failed to validate round-trip of generated code")?;

        write_text_output(writer, &code)?;

        info!("Successfully validated program");
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a program, or dump one of its intermediate stages
    ///
    /// Stages:
    ///   tokens - Lexer output
    ///   ast    - Source tree, after parsing
    ///   target - Target tree, after transformation
    ///   code   - Generated code
    Compile {
        /// Input file (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: String,
        /// Output file (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: String,
        /// Stage to emit: code, tokens, ast, target
        #[arg(short, long, default_value = "code")]
        emit: Stage,
        /// Output format for tokens and trees: text, json, yaml
        #[arg(short = 'f', long, default_value = "text")]
        format: Format,
        /// No space after argument commas (code output only)
        #[arg(long)]
        compact: bool,
        /// End generated code with a newline (code output only)
        #[arg(long)]
        trailing_newline: bool,
        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
    /// Compile, then check that the generated code reads back as the same tree
    Validate {
        /// Input file (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: String,
        /// Output file (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: String,
        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Tokens,
    Ast,
    Target,
    Code,
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tokens" => Ok(Stage::Tokens),
            "ast" => Ok(Stage::Ast),
            "target" => Ok(Stage::Target),
            "code" => Ok(Stage::Code),
            _ => Err(format!(
                "Invalid stage: '{s}'. Supported stages: code, tokens, ast, target"
            )),
        }
    }
}

impl Stage {
    pub fn write<W: Write>(
        &self,
        writer: W,
        source: &str,
        format: &Format,
        options: &OutputOptions,
    ) -> Result<()> {
        match self {
            Stage::Tokens => {
                let tokens = tokenize(source)?;
                if let Format::Text = format {
                    let lines: Vec<String> = tokens
                        .iter()
                        .map(|t| format!("{}\t{}", t.offset, t))
                        .collect();
                    write_text_output(writer, &lines.join("\n"))
                } else {
                    format.write_value(writer, &tokens)
                }
            }
            Stage::Ast => {
                let tokens = tokenize(source)?;
                format.write_value(writer, &parse(&tokens)?)
            }
            Stage::Target => format.write_value(writer, &lower(source)?),
            Stage::Code => {
                if *format != Format::Text {
                    bail!("Generated code can only be written as text, not {format:?}");
                }
                let code = compile_with_options(source, options)?;
                write_text_output(writer, &code)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            "yaml" => Ok(Format::Yaml),
            _ => Err(format!(
                "Invalid format: '{s}'. Supported formats: text, json, yaml"
            )),
        }
    }
}

impl Format {
    /// Write a token list or tree. Text is the pretty `Debug` form.
    pub fn write_value<W: Write, T: Serialize + Debug>(&self, writer: W, value: &T) -> Result<()> {
        let text = match self {
            Format::Text => format!("{value:#?}"),
            Format::Json => serde_json::to_string_pretty(value)?,
            Format::Yaml => serde_yaml::to_string(value)?,
        };
        write_text_output(writer, &text)
    }
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over
/// `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed, e.g. by a test harness.
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
    {
        debug!("Log subscriber not installed: {e}");
    }
}

/// Read text input from reader
fn read_text_input<R: Read>(mut reader: R) -> Result<String> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Write text output to writer
fn write_text_output<W: Write>(mut writer: W, content: &str) -> Result<()> {
    writer.write_all(content.as_bytes())?;
    Ok(())
}

/// Helper function to get reader from file path (or stdin if "-")
fn get_reader(path: &str) -> Result<Box<dyn Read>> {
    if path == "-" {
        Ok(Box::new(io::stdin()))
    } else {
        Ok(Box::new(fs::File::open(path)?))
    }
}

/// Helper function to get writer from file path (or stdout if "-")
fn get_writer(path: &str) -> Result<Box<dyn Write>> {
    if path == "-" {
        Ok(Box::new(io::stdout()))
    } else {
        Ok(Box::new(fs::File::create(path)?))
    }
}
