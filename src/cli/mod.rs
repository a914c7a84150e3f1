//! The LazyParse command-line interface.
//!
//! Argument parsing lives in [`args`], rendering in [`output`]; this module
//! wires them to the library and turns failures into miette reports.

use std::fs;
use std::path::Path;
use std::process;

use clap::Parser as _;
use log::{info, LevelFilter};

use crate::cli::args::{Command, LazyParseArgs, OutputFormat};
use crate::config::RuleSetConfig;
use crate::errors::{print_error, ParseError, ParseResult};
use crate::parser::Parser;
use crate::rules;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = LazyParseArgs::parse();
    init_logging(args.log_level);

    let result = match args.command {
        Command::Parse {
            file,
            rules,
            format,
            spacing,
            max_depth,
        } => handle_parse(&file, rules.as_deref(), format, spacing, max_depth),
        Command::Rules => handle_rules(),
    };

    if let Err(e) = result {
        print_error(e);
        process::exit(1);
    }
}

fn init_logging(level: LevelFilter) {
    let config = simplelog::ConfigBuilder::new()
        .set_time_format_custom(&[])
        .build();
    if let Err(e) = simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Never,
    ) {
        eprintln!("logging disabled: {e}");
    }
}

fn handle_parse(
    file: &Path,
    rule_set: Option<&Path>,
    format: OutputFormat,
    spacing: bool,
    max_depth: Option<usize>,
) -> ParseResult<()> {
    let source = fs::read_to_string(file).map_err(|source| ParseError::Io {
        path: file.to_path_buf(),
        source,
    })?;

    let parser = match rule_set {
        Some(path) => {
            info!("loading rule set {}", path.display());
            RuleSetConfig::load(path)?.into_parser()?
        }
        None => Parser::new(rules::standard_set()),
    };
    let parser = match max_depth {
        Some(limit) => {
            info!("nesting depth capped at {limit}");
            parser.with_max_depth(limit)
        }
        None => parser,
    };

    let nodes = parser.parse(&source)?;
    let mut out = output::stdout();
    let written = match format {
        OutputFormat::Text => output::write_text(&mut out, &nodes, spacing),
        OutputFormat::Debug => output::write_debug(&mut out, &nodes, spacing),
        OutputFormat::Json => output::write_json(&mut out, &nodes),
    };
    written.map_err(|source| ParseError::Output { source })
}

fn handle_rules() -> ParseResult<()> {
    output::write_rule_kinds(&mut output::stdout()).map_err(|source| ParseError::Output { source })
}
