pub use crate::engine::{parse, parse_chars, parse_source, Limits, Scope, Terminator};
pub use crate::errors::{ParseError, ParseResult};
pub use crate::parser::Parser;
pub use crate::pattern::{build_pattern_set, Pattern};
pub use crate::render::{to_string, to_string_debug};
pub use crate::rules::{Recognizer, Rule};
pub use crate::tree::{Content, Fetched, MatchResult, PatternResult};

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod parser;
pub mod pattern;
pub mod render;
pub mod rules;
pub mod text;
pub mod tree;
