//! Single-character and literal rules.

use std::fmt;
use std::sync::Arc;

use crate::engine::Scope;
use crate::errors::ParseResult;
use crate::rules::Recognizer;
use crate::text::starts_with_at;
use crate::tree::{Content, Fetched};

/// One character accepted by a predicate.
pub struct SimpleChar {
    name: String,
    predicate: Arc<dyn Fn(char) -> bool + Send + Sync>,
}

impl SimpleChar {
    pub fn new<F>(name: &str, predicate: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            predicate: Arc::new(predicate),
        }
    }
}

impl fmt::Debug for SimpleChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleChar").field("name", &self.name).finish()
    }
}

impl Recognizer for SimpleChar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_pattern(&self, _index: usize, c: char, _text: &[char]) -> bool {
        (self.predicate)(c)
    }

    fn fetch(&self, scope: &Scope<'_>) -> ParseResult<Fetched> {
        Ok(match scope.current() {
            Some(c) => Fetched::leaf(&self.name, c, scope.index),
            None => Fetched::leaf(&self.name, Content::Null, scope.index),
        })
    }
}

/// A fixed list of literals, tried in the order given.
#[derive(Debug, Clone)]
pub struct SimpleKeys {
    name: String,
    literals: Vec<String>,
}

impl SimpleKeys {
    pub fn new<S: AsRef<str>>(name: &str, literals: &[S]) -> Self {
        Self {
            name: name.to_string(),
            literals: literals
                .iter()
                .map(|l| l.as_ref().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
        }
    }

    fn literal_at(&self, index: usize, text: &[char]) -> Option<&str> {
        self.literals
            .iter()
            .find(|literal| starts_with_at(text, index, literal))
            .map(String::as_str)
    }
}

impl Recognizer for SimpleKeys {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_pattern(&self, index: usize, _c: char, text: &[char]) -> bool {
        self.literal_at(index, text).is_some()
    }

    fn fetch(&self, scope: &Scope<'_>) -> ParseResult<Fetched> {
        Ok(match self.literal_at(scope.index, scope.text) {
            Some(literal) => Fetched::leaf(
                &self.name,
                literal,
                scope.index + literal.chars().count() - 1,
            ),
            None => Fetched::leaf(&self.name, Content::Null, scope.index),
        })
    }
}

/// Any single character.
#[derive(Debug, Clone)]
pub struct AnyChar {
    name: String,
}

impl AnyChar {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Recognizer for AnyChar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_pattern(&self, _index: usize, _c: char, _text: &[char]) -> bool {
        true
    }

    fn fetch(&self, scope: &Scope<'_>) -> ParseResult<Fetched> {
        Ok(match scope.current() {
            Some(c) => Fetched::leaf(&self.name, c, scope.index),
            None => Fetched::leaf(&self.name, Content::Null, scope.index),
        })
    }
}
