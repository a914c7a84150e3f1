//! The `Parser` wrapper: an ordered rule list plus the limits a parse runs
//! under. Each call to [`Parser::parse`] builds a fresh pattern set, so
//! editing the rules never disturbs a parse that already returned.

use log::debug;

use crate::engine::{self, Limits, Terminator};
use crate::errors::ParseResult;
use crate::pattern::{build_pattern_set, Pattern};
use crate::rules::Rule;
use crate::text::SourceText;
use crate::tree::{MatchResult, PatternResult};

#[derive(Debug, Clone, Default)]
pub struct Parser {
    rules: Vec<Rule>,
    limits: Limits,
}

impl Parser {
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
            limits: Limits::default(),
        }
    }

    /// Fails a parse with `DepthExceeded` once charboxes nest deeper than
    /// `max_depth`.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.limits = Limits::with_max_depth(max_depth);
        self
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Appends `rules` after the existing ones.
    pub fn add_rules(&mut self, rules: impl IntoIterator<Item = Rule>) {
        self.rules.extend(rules);
    }

    /// Drops every rule whose name is listed. Unknown names are ignored.
    pub fn remove_rules(&mut self, names: &[&str]) {
        let before = self.rules.len();
        self.rules.retain(|rule| !names.iter().any(|name| *name == rule.name()));
        debug!("removed {} rule(s) matching {:?}", before - self.rules.len(), names);
    }

    pub fn pattern_set(&self) -> Vec<Pattern> {
        build_pattern_set(&self.rules)
    }

    /// Parses the whole text and returns the top-level nodes.
    pub fn parse(&self, text: &str) -> ParseResult<Vec<MatchResult>> {
        self.parse_full(text).map(|parsed| parsed.result)
    }

    /// Like [`Parser::parse`], keeping the pass metadata.
    pub fn parse_full(&self, text: &str) -> ParseResult<PatternResult> {
        let source = SourceText::new(text);
        let patterns = self.pattern_set();
        engine::parse_source(&source, &patterns, 0, Terminator::Never, self.limits)
    }
}
