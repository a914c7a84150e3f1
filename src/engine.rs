//! # Scanning Engine
//!
//! One left-to-right pass over the text. At each index the end predicate is
//! checked first, then the pattern set in order; the first pattern that
//! accepts the index is fetched, and scanning resumes just past the index it
//! reports. Characters no pattern accepts are dropped.
//!
//! Nesting rules re-enter the engine through [`Scope::descend`], which is the
//! only place the nesting depth grows. Everything a pass needs travels through
//! its arguments, so independent passes never share state.

use std::fmt;

use log::{trace, warn};

use crate::errors::{ParseError, ParseResult};
use crate::pattern::Pattern;
use crate::rules::Recognizer;
use crate::text::SourceText;
use crate::tree::{MatchResult, PatternResult};

// ============================================================================
// END PREDICATE
// ============================================================================

/// Decides where a (nested) pass stops.
#[derive(Clone, Copy, Default)]
pub enum Terminator<'a> {
    /// Run to the end of the input.
    #[default]
    Never,
    /// Stop where the rule's `is_pattern_end` holds.
    Rule(&'a dyn Recognizer),
    Predicate(&'a (dyn Fn(usize, char, &[char]) -> bool + Sync)),
}

impl Terminator<'_> {
    pub fn reached(&self, index: usize, c: char, text: &[char]) -> bool {
        match self {
            Terminator::Never => false,
            Terminator::Rule(rule) => rule.is_pattern_end(index, c, text),
            Terminator::Predicate(predicate) => predicate(index, c, text),
        }
    }
}

impl fmt::Debug for Terminator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminator::Never => f.write_str("Never"),
            Terminator::Rule(rule) => write!(f, "Rule({})", rule.name()),
            Terminator::Predicate(_) => f.write_str("Predicate"),
        }
    }
}

// ============================================================================
// LIMITS AND SCOPE
// ============================================================================

/// Guards applied to a whole parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    /// Deepest charbox nesting allowed; `None` leaves only the stack as a bound.
    pub max_depth: Option<usize>,
}

impl Limits {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }
}

/// Everything a fetch may look at.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    /// Position the match starts at.
    pub index: usize,
    pub text: &'a [char],
    /// Pattern set of the pass that found the match.
    pub patterns: &'a [Pattern],
    /// End predicate of the matching pattern, for rules that nest.
    pub end: Terminator<'a>,
    source: Option<&'a SourceText>,
    depth: usize,
    limits: Limits,
}

impl<'a> Scope<'a> {
    /// A scope outside any pass: no patterns, no end, depth zero. Handy for
    /// exercising a single rule.
    pub fn detached(text: &'a [char], index: usize) -> Self {
        Self {
            index,
            text,
            patterns: &[],
            end: Terminator::Never,
            source: None,
            depth: 0,
            limits: Limits::default(),
        }
    }

    /// Character at `index`, `None` past the end of the text.
    pub fn current(&self) -> Option<char> {
        self.text.get(self.index).copied()
    }

    /// The decoded input of the running parse. Detached scopes have none.
    pub fn source(&self) -> Option<&'a SourceText> {
        self.source
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Runs a nested pass one level deeper, starting at `start`.
    pub fn descend(
        &self,
        start: usize,
        patterns: &[Pattern],
        end: Terminator<'_>,
    ) -> ParseResult<PatternResult> {
        let depth = self.depth + 1;
        if let Some(limit) = self.limits.max_depth {
            if depth > limit {
                warn!("nesting limit {} reached at index {}", limit, self.index);
                return Err(ParseError::DepthExceeded {
                    limit,
                    index: self.index,
                });
            }
        }
        match self.source {
            Some(source) => scan(source, patterns, start, end, depth, self.limits),
            None => {
                let source = SourceText::from_chars(self.text);
                scan(&source, patterns, start, end, depth, self.limits)
            }
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses `text` from `start_index` until `end` holds or the input runs out.
pub fn parse(
    text: &str,
    patterns: &[Pattern],
    start_index: usize,
    end: Terminator<'_>,
) -> ParseResult<PatternResult> {
    parse_source(&SourceText::new(text), patterns, start_index, end, Limits::default())
}

/// [`parse`] over a char slice, with explicit limits.
pub fn parse_chars(
    text: &[char],
    patterns: &[Pattern],
    start_index: usize,
    end: Terminator<'_>,
    limits: Limits,
) -> ParseResult<PatternResult> {
    parse_source(&SourceText::from_chars(text), patterns, start_index, end, limits)
}

/// [`parse`] over an input decoded with [`SourceText`].
pub fn parse_source(
    source: &SourceText,
    patterns: &[Pattern],
    start_index: usize,
    end: Terminator<'_>,
    limits: Limits,
) -> ParseResult<PatternResult> {
    scan(source, patterns, start_index, end, 0, limits)
}

// ============================================================================
// SCANNING LOOP
// ============================================================================

fn scan(
    source: &SourceText,
    patterns: &[Pattern],
    start: usize,
    end: Terminator<'_>,
    depth: usize,
    limits: Limits,
) -> ParseResult<PatternResult> {
    let text = source.chars();
    let mut result = Vec::new();
    let mut i = start;

    while i < text.len() {
        let c = text[i];
        if end.reached(i, c, text) {
            return Ok(PatternResult {
                is_pattern_end: true,
                result,
                last_index: i,
            });
        }

        let candidate = Scope {
            index: i,
            text,
            patterns,
            end: Terminator::Never,
            source: Some(source),
            depth,
            limits,
        };
        if let Some(pattern) = patterns.iter().find(|p| p.accepts(&candidate)) {
            let position = source.position(i);
            let scope = Scope {
                end: Terminator::Rule(pattern.rule().recognizer()),
                ..candidate
            };
            let fetched = pattern.fetch_content(&scope)?;
            if fetched.last_index < i {
                return Err(ParseError::CursorRegression {
                    rule: pattern.name().to_string(),
                    index: i,
                    last_index: fetched.last_index,
                });
            }
            trace!(
                "{} matched {}..={} at {}:{}",
                pattern.name(),
                i,
                fetched.last_index,
                position.line,
                position.line_char
            );
            i = fetched.last_index;
            result.push(MatchResult::from_fetched(pattern.name(), fetched, position));
        }
        i += 1;
    }

    Ok(PatternResult {
        is_pattern_end: false,
        result,
        last_index: text.len().saturating_sub(1),
    })
}
