//! Rules assembled from caller-supplied closures.

use std::fmt;
use std::sync::Arc;

use crate::engine::Scope;
use crate::errors::ParseResult;
use crate::rules::{fallback_fetch, PositionPredicate, Recognizer, Rule};
use crate::tree::{Content, Fetched};

type FetchFn = Arc<dyn for<'s> Fn(&Scope<'s>) -> ParseResult<Fetched> + Send + Sync>;

/// A rule whose predicates and extractor are closures.
///
/// ```ignore
/// let arrow = CustomRule::new("arrow", |i, _, t| text::starts_with_at(t, i, "->"))
///     .fetch_with(|scope| Ok(Fetched::leaf("arrow", "->", scope.index + 1)))
///     .into_rule();
/// ```
///
/// Without [`CustomRule::fetch_with`] a match consumes one character and
/// reports the default value.
#[derive(Clone)]
pub struct CustomRule {
    name: String,
    default_value: Content,
    delimiters: Option<(String, String)>,
    is_pattern: PositionPredicate,
    is_pattern_end: Option<PositionPredicate>,
    fetch: Option<FetchFn>,
}

impl CustomRule {
    pub fn new<F>(name: &str, is_pattern: F) -> Self
    where
        F: Fn(usize, char, &[char]) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            default_value: Content::Null,
            delimiters: None,
            is_pattern: Arc::new(is_pattern),
            is_pattern_end: None,
            fetch: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<Content>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn with_delimiters(mut self, begin: &str, end: &str) -> Self {
        self.delimiters = Some((begin.to_string(), end.to_string()));
        self
    }

    pub fn ends_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(usize, char, &[char]) -> bool + Send + Sync + 'static,
    {
        self.is_pattern_end = Some(Arc::new(predicate));
        self
    }

    pub fn fetch_with<F>(mut self, fetch: F) -> Self
    where
        F: for<'s> Fn(&Scope<'s>) -> ParseResult<Fetched> + Send + Sync + 'static,
    {
        self.fetch = Some(Arc::new(fetch));
        self
    }

    pub fn into_rule(self) -> Rule {
        Rule::new(self)
    }
}

impl From<CustomRule> for Rule {
    fn from(rule: CustomRule) -> Self {
        rule.into_rule()
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("name", &self.name)
            .field("default_value", &self.default_value)
            .field("delimiters", &self.delimiters)
            .field("has_fetch", &self.fetch.is_some())
            .finish()
    }
}

impl Recognizer for CustomRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_value(&self) -> Content {
        self.default_value.clone()
    }

    fn delimiters(&self) -> Option<(&str, &str)> {
        self.delimiters
            .as_ref()
            .map(|(begin, end)| (begin.as_str(), end.as_str()))
    }

    fn is_pattern(&self, index: usize, c: char, text: &[char]) -> bool {
        (self.is_pattern)(index, c, text)
    }

    fn is_pattern_end(&self, index: usize, c: char, text: &[char]) -> bool {
        self.is_pattern_end
            .as_ref()
            .is_some_and(|predicate| predicate(index, c, text))
    }

    fn fetch(&self, scope: &Scope<'_>) -> ParseResult<Fetched> {
        match &self.fetch {
            Some(fetch) => fetch(scope),
            None => Ok(fallback_fetch(&self.name, self.default_value.clone(), scope.index)),
        }
    }
}
