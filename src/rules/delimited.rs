//! Delimited constructs: nested charboxes and quoted strings.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::engine::{Scope, Terminator};
use crate::errors::ParseResult;
use crate::pattern::{build_pattern_set, Pattern};
use crate::rules::{PositionPredicate, Recognizer, Rule};
use crate::text::starts_with_at;
use crate::tree::{Content, Fetched};

// ============================================================================
// CHARBOX
// ============================================================================

/// `begin`, a body parsed with the same engine, then `end`.
///
/// The body is scanned with the caller's pattern set unless one is supplied
/// with [`Charbox::with_rules`]; the closing delimiter is recognized literally
/// unless a predicate is supplied with [`Charbox::ends_when`].
#[derive(Clone)]
pub struct Charbox {
    name: String,
    begin: String,
    end: String,
    patterns: Option<Vec<Pattern>>,
    end_predicate: Option<PositionPredicate>,
}

impl Charbox {
    pub fn new(name: &str, begin: &str, end: &str) -> Self {
        Self {
            name: name.to_string(),
            begin: begin.to_string(),
            end: end.to_string(),
            patterns: None,
            end_predicate: None,
        }
    }

    /// Scans the body with `rules` instead of the enclosing pattern set.
    pub fn with_rules(mut self, rules: &[Rule]) -> Self {
        self.patterns = Some(build_pattern_set(rules));
        self
    }

    /// Replaces the literal `end` test. The reported `last_index` still steps
    /// over `end.len()` characters.
    pub fn ends_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(usize, char, &[char]) -> bool + Send + Sync + 'static,
    {
        self.end_predicate = Some(Arc::new(predicate));
        self
    }

    pub fn into_rule(self) -> Rule {
        Rule::new(self)
    }
}

impl From<Charbox> for Rule {
    fn from(charbox: Charbox) -> Self {
        charbox.into_rule()
    }
}

impl fmt::Debug for Charbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Charbox")
            .field("name", &self.name)
            .field("begin", &self.begin)
            .field("end", &self.end)
            .field("own_patterns", &self.patterns.as_ref().map(Vec::len))
            .field("custom_end", &self.end_predicate.is_some())
            .finish()
    }
}

impl Recognizer for Charbox {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_value(&self) -> Content {
        Content::from(self.begin.as_str())
    }

    fn delimiters(&self) -> Option<(&str, &str)> {
        Some((&self.begin, &self.end))
    }

    fn is_pattern(&self, index: usize, _c: char, text: &[char]) -> bool {
        !self.begin.is_empty() && starts_with_at(text, index, &self.begin)
    }

    fn is_pattern_end(&self, index: usize, c: char, text: &[char]) -> bool {
        match &self.end_predicate {
            Some(predicate) => predicate(index, c, text),
            None => starts_with_at(text, index, &self.end),
        }
    }

    fn fetch(&self, scope: &Scope<'_>) -> ParseResult<Fetched> {
        let patterns = self.patterns.as_deref().unwrap_or(scope.patterns);
        let terminator = match scope.end {
            Terminator::Never => Terminator::Rule(self),
            other => other,
        };
        let body_start = scope.index + self.begin.chars().count();
        let body = scope.descend(body_start, patterns, terminator)?;

        if body.is_pattern_end {
            let last_index = (body.last_index + self.end.chars().count()).saturating_sub(1);
            return Ok(Fetched::nested(
                &self.name,
                &self.begin,
                &self.end,
                body.result,
                last_index.max(scope.index),
            ));
        }

        debug!(
            "'{}' opened at {} is never closed by '{}'",
            self.name, scope.index, self.end
        );
        Ok(Fetched::unterminated(
            &self.name,
            &self.begin,
            &self.end,
            scope.index,
        ))
    }
}

// ============================================================================
// QUOTED STRING
// ============================================================================

/// A string between two copies of `delimiter`. `\\` and `\<delimiter>` are
/// escapes; the content keeps them as written.
#[derive(Debug, Clone)]
pub struct QuotedString {
    name: String,
    delimiter: String,
}

impl QuotedString {
    pub fn new(name: &str, delimiter: &str) -> Self {
        Self {
            name: name.to_string(),
            delimiter: delimiter.to_string(),
        }
    }

    /// Index of the closing delimiter, if there is one.
    fn closing_index(&self, text: &[char], body_start: usize) -> Option<usize> {
        let width = self.delimiter.chars().count();
        let mut i = body_start;
        while i < text.len() {
            if text[i] == '\\' {
                if starts_with_at(text, i + 1, "\\") {
                    i += 2;
                    continue;
                }
                if starts_with_at(text, i + 1, &self.delimiter) {
                    i += 1 + width;
                    continue;
                }
            } else if starts_with_at(text, i, &self.delimiter) {
                return Some(i);
            }
            i += 1;
        }
        None
    }
}

impl Recognizer for QuotedString {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_value(&self) -> Content {
        Content::from("")
    }

    fn is_pattern(&self, index: usize, _c: char, text: &[char]) -> bool {
        !self.delimiter.is_empty() && starts_with_at(text, index, &self.delimiter)
    }

    fn fetch(&self, scope: &Scope<'_>) -> ParseResult<Fetched> {
        let width = self.delimiter.chars().count();
        let body_start = scope.index + width;

        Ok(match self.closing_index(scope.text, body_start) {
            Some(close) => {
                let body: String = scope.text[body_start..close].iter().collect();
                Fetched::leaf("string", body, close + width - 1)
            }
            None => {
                debug!("string opened at {} is never closed", scope.index);
                let last_index = scope.text.len().saturating_sub(1).max(scope.index);
                Fetched::leaf("string", "", last_index).with_error()
            }
        })
    }
}
