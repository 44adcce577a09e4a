//! # textview - UTF-16 Text Inspector
//!
//! Encodes text as UTF-16 and inspects it through zero-copy views.
//!
//! ## Quick Start
//!
//! ```bash
//! # Split a file into lines
//! cargo run -- --file notes.txt lines
//!
//! # Decode code points of inline text
//! cargo run -- --text "a😀b" runes
//!
//! # Find matches ignoring case
//! cargo run -- --file notes.txt -i find todo
//! ```

mod config;
mod inspect;

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{ComparisonKind, InspectConfig};
use inspect::Inspector;
use textview_core::Utf16Buffer;

/// textview - inspect text as UTF-16 code units, lines and code points
#[derive(Parser, Debug)]
#[command(name = "textview")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to read (standard input when neither --file nor --text is given)
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Inspect this text instead of a file
    #[arg(short, long)]
    text: Option<String>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Comparison mode for find and compare
    #[arg(short, long, value_enum)]
    mode: Option<ComparisonKind>,

    /// Ignore case in find and compare
    #[arg(short, long)]
    ignore_case: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List lines with their offsets and lengths
    Lines,

    /// List code points with their offsets and widths
    Runes,

    /// Count code units, lines, code points and replacements
    Units {
        /// Print the counts as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the offset of every match of NEEDLE
    Find {
        #[arg(value_name = "NEEDLE")]
        needle: String,
    },

    /// Print the text without leading and trailing white space
    Trim,

    /// Compare the text against OTHER
    Compare {
        #[arg(value_name = "OTHER")]
        other: String,
    },
}

impl Args {
    /// The comparison mode: command line first, then config.
    fn comparison_kind(&self, config: &InspectConfig) -> ComparisonKind {
        let kind = self.mode.unwrap_or(config.compare.mode);
        if self.ignore_case {
            kind.ignoring_case()
        } else {
            kind
        }
    }

    /// Reads the input text.
    fn read_input(&self) -> anyhow::Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        match &self.file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            None => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read standard input")?;
                Ok(text)
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting textview v{}", env!("CARGO_PKG_VERSION"));

    let config = InspectConfig::load(args.config.as_deref()).context("Failed to load config")?;
    let text = args.read_input()?;
    let buffer = Utf16Buffer::from(text.as_str());
    tracing::info!(units = buffer.len(), "input encoded");

    let view = buffer.view();
    let mode = args.comparison_kind(&config).comparison();
    let inspector = Inspector::new(&config);
    let mut out = io::stdout().lock();

    match &args.command {
        Command::Lines => inspector.lines(view, &mut out)?,
        Command::Runes => inspector.runes(view, &mut out)?,
        Command::Units { json } => inspector.units(view, *json, &mut out)?,
        Command::Find { needle } => inspector.find(view, needle, mode, &mut out)?,
        Command::Trim => inspector.trim(view, &mut out)?,
        Command::Compare { other } => inspector.compare(view, other, mode, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
