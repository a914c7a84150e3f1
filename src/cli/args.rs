//! Command-line arguments and subcommands for the `lazyparse` binary.

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "lazyparse",
    version,
    about = "Scan text with an ordered set of rules and print the match tree."
)]
pub struct LazyParseArgs {
    /// Log verbosity on stderr (off, error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a file and print the result.
    Parse {
        /// The text file to parse.
        #[arg(required = true)]
        file: PathBuf,
        /// Rule-set file (.yaml, .yml or .json). Defaults to the standard set.
        #[arg(long)]
        rules: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// One node per line, indented by nesting depth.
        #[arg(long)]
        spacing: bool,
        /// Fail once charboxes nest deeper than this, overriding the rule
        /// set's `max_depth`. This caps nesting only: unclosed openers are
        /// rescanned and can still take exponential time.
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// List the rule kinds a rule-set file may use.
    Rules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The matched text, reassembled.
    Text,
    /// Every node prefixed by its pattern name.
    Debug,
    /// The match tree as JSON.
    Json,
}
