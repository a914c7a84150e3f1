//! # Rule Library
//!
//! A rule decides whether a construct starts at a position (`is_pattern`) and
//! extracts it (`fetch`). Nesting rules additionally recognize their closing
//! delimiter (`is_pattern_end`). Every built-in rule kind is a struct that
//! implements [`Recognizer`]; [`Rule`] is the shared, immutable handle the
//! engine and the [`Parser`](crate::parser::Parser) pass around.
//!
//! ## Factories
//!
//! | Factory          | Matches                                             |
//! |------------------|-----------------------------------------------------|
//! | [`simple_char`]  | one character accepted by a predicate               |
//! | [`simple_keys`]  | the first listed literal found at the position      |
//! | [`simple_charbox`] | `begin ... end`, parsed recursively               |
//! | [`word`]         | a run of letters                                    |
//! | [`number`]       | digits, one separator, optional exponent            |
//! | [`variable`]     | a run of letters and `_`                            |
//! | [`keyword`]      | a listed keyword not followed by an identifier char |
//! | [`any`]          | any single character                                |
//! | [`parse_string`] | a delimited string with backslash escapes           |
//! | [`regex`]        | an expression anchored at the position              |
//!
//! Order matters: the engine takes the first rule that accepts a position.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::engine::Scope;
use crate::errors::ParseResult;
use crate::text::{self, CharClass};
use crate::tree::{Content, Fetched};

mod chars;
mod custom;
mod delimited;
mod expression;
mod lexical;

pub use chars::{AnyChar, SimpleChar, SimpleKeys};
pub use custom::CustomRule;
pub use delimited::{Charbox, QuotedString};
pub use expression::RegexRule;
pub use lexical::{Keyword, Number, Variable, Word};

/// Predicate over a position: `(index, char at index, whole text)`.
pub type PositionPredicate = Arc<dyn Fn(usize, char, &[char]) -> bool + Send + Sync>;

// ============================================================================
// RECOGNIZER CAPABILITY
// ============================================================================

/// The capability every rule kind provides to the engine.
///
/// Implementations must be pure functions of their arguments. `fetch` is only
/// ever called at a position where `is_pattern` returned true, and it must
/// report a `last_index` at or after `scope.index`.
pub trait Recognizer: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Content used by the fallback fetch.
    fn default_value(&self) -> Content {
        Content::Null
    }

    /// Opening and closing delimiters of nesting rules.
    fn delimiters(&self) -> Option<(&str, &str)> {
        None
    }

    fn is_pattern(&self, index: usize, c: char, text: &[char]) -> bool;

    /// Whether a match starts at `scope.index`. The engine asks through this
    /// method so rules can use the decoded source; by default it defers to
    /// `is_pattern`.
    fn accepts(&self, scope: &Scope<'_>) -> bool {
        scope
            .current()
            .is_some_and(|c| self.is_pattern(scope.index, c, scope.text))
    }

    /// Recognizes the closing delimiter. Only nesting rules override this.
    fn is_pattern_end(&self, _index: usize, _c: char, _text: &[char]) -> bool {
        false
    }

    /// Extracts the match starting at `scope.index`. Rules without an
    /// extractor consume one character and report their default value.
    fn fetch(&self, scope: &Scope<'_>) -> ParseResult<Fetched> {
        Ok(fallback_fetch(self.name(), self.default_value(), scope.index))
    }
}

pub(crate) fn fallback_fetch(name: &str, default_value: Content, index: usize) -> Fetched {
    Fetched::leaf(name, default_value, index)
}

/// A shareable handle to a recognizer.
#[derive(Clone)]
pub struct Rule(Arc<dyn Recognizer>);

impl Rule {
    pub fn new<R: Recognizer + 'static>(recognizer: R) -> Self {
        Rule(Arc::new(recognizer))
    }

    pub fn recognizer(&self) -> &dyn Recognizer {
        self.0.as_ref()
    }
}

impl Deref for Rule {
    type Target = dyn Recognizer;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0.as_ref(), f)
    }
}

// ============================================================================
// FACTORIES
// ============================================================================

/// One character satisfying `predicate`.
pub fn simple_char<F>(name: &str, predicate: F) -> Rule
where
    F: Fn(char) -> bool + Send + Sync + 'static,
{
    Rule::new(SimpleChar::new(name, predicate))
}

/// One character from a classification table.
pub fn char_class(name: &str, class: CharClass) -> Rule {
    simple_char(name, move |c| class.contains(c))
}

/// The first of `literals` that occurs at the position. Empty literals are
/// ignored.
pub fn simple_keys<S: AsRef<str>>(name: &str, literals: &[S]) -> Rule {
    Rule::new(SimpleKeys::new(name, literals))
}

/// `begin`, a recursively parsed body, then `end`. Use [`Charbox`] directly to
/// override the inner pattern set or the end predicate.
pub fn simple_charbox(name: &str, begin: &str, end: &str) -> Rule {
    Rule::new(Charbox::new(name, begin, end))
}

pub fn word() -> Rule {
    Rule::new(Word)
}

/// Decimal numbers. The separator is `,` when `coma_over_dot` is set, `.`
/// otherwise; `allow_exponent` enables an `e`/`E` suffix.
pub fn number(coma_over_dot: bool, allow_exponent: bool) -> Rule {
    Rule::new(Number::new(coma_over_dot, allow_exponent))
}

pub fn variable() -> Rule {
    Rule::new(Variable)
}

pub fn keyword<S: AsRef<str>>(keywords: &[S]) -> Rule {
    Rule::new(Keyword::new(keywords))
}

/// Catch-all; belongs at the end of a rule list.
pub fn any(name: &str) -> Rule {
    Rule::new(AnyChar::new(name))
}

pub fn parse_string(name: &str, delimiter: &str) -> Rule {
    Rule::new(QuotedString::new(name, delimiter))
}

/// Matches `expression` anchored at the position. Fails when the expression
/// does not compile.
pub fn regex(name: &str, expression: &str) -> ParseResult<Rule> {
    RegexRule::new(name, expression).map(Rule::new)
}

/// A general purpose rule set: strings, numbers, words, the three bracket
/// pairs, whitespace, and a catch-all.
pub fn standard_set() -> Vec<Rule> {
    vec![
        parse_string("string", "\""),
        number(false, true),
        word(),
        simple_charbox("parenthesis", "(", ")"),
        simple_charbox("bracket", "[", "]"),
        simple_charbox("brace", "{", "}"),
        simple_char("space", |c| text::WHITESPACES.contains(&c) || text::CONTROLS.contains(&c)),
        any("char"),
    ]
}
