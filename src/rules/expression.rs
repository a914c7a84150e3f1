//! Regular-expression rule.

use regex_automata::meta::Regex;
use regex_automata::{Anchored, Input};

use crate::engine::Scope;
use crate::errors::{ParseError, ParseResult};
use crate::rules::Recognizer;
use crate::text::SourceText;
use crate::tree::{Content, Fetched};

/// Matches an expression anchored at the current position. Empty matches are
/// rejected, so a rule like `a*` only fires where at least one `a` is present.
///
/// The search runs over the whole decoded input starting at the position's
/// byte offset, so `^` and `\b` see the text before the position.
#[derive(Debug, Clone)]
pub struct RegexRule {
    name: String,
    expression: Regex,
}

impl RegexRule {
    pub fn new(name: &str, expression: &str) -> ParseResult<Self> {
        let expression = Regex::new(expression).map_err(|source| ParseError::InvalidRegex {
            name: name.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            expression,
        })
    }

    /// The matched text and the char index of its last character.
    fn match_in(&self, source: &SourceText, index: usize) -> Option<(String, usize)> {
        let start = source.byte_offset(index)?;
        let input = Input::new(source.as_str())
            .range(start..)
            .anchored(Anchored::Yes);
        let found = self.expression.find(input).filter(|m| !m.is_empty())?;
        let end = source.char_index(found.end())?;
        Some((source.as_str()[found.range()].to_string(), end - 1))
    }

    fn match_at(&self, scope: &Scope<'_>) -> Option<(String, usize)> {
        match scope.source() {
            Some(source) => self.match_in(source, scope.index),
            None => self.match_in(&SourceText::from_chars(scope.text), scope.index),
        }
    }
}

impl Recognizer for RegexRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_value(&self) -> Content {
        Content::from("")
    }

    /// Decodes `text` on every call; the engine goes through `accepts`.
    fn is_pattern(&self, index: usize, _c: char, text: &[char]) -> bool {
        self.match_in(&SourceText::from_chars(text), index).is_some()
    }

    fn accepts(&self, scope: &Scope<'_>) -> bool {
        self.match_at(scope).is_some()
    }

    fn fetch(&self, scope: &Scope<'_>) -> ParseResult<Fetched> {
        Ok(match self.match_at(scope) {
            Some((span, last_index)) => Fetched::leaf(&self.name, span, last_index),
            None => Fetched::leaf(&self.name, Content::Null, scope.index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{parse, Terminator};
    use crate::pattern::build_pattern_set;
    use crate::rules::{any, Rule};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn only_matches_at_the_position() {
        let rule = RegexRule::new("hex", "0x[0-9a-f]+").unwrap();
        let text = chars("a 0x1f!");
        assert!(!rule.is_pattern(0, 'a', &text));
        assert!(rule.is_pattern(2, '0', &text));
        assert!(!rule.is_pattern(3, 'x', &text));

        let fetched = rule.fetch(&Scope::detached(&text, 2)).unwrap();
        assert_eq!(fetched.content, Content::from("0x1f"));
        assert_eq!(fetched.last_index, 5);
    }

    #[test]
    fn alternation_stays_anchored() {
        let rule = RegexRule::new("ab", "x|y").unwrap();
        let text = chars("zy");
        assert!(!rule.is_pattern(0, 'z', &text));
        assert!(rule.is_pattern(1, 'y', &text));
    }

    #[test]
    fn empty_match_is_not_a_match() {
        let rule = RegexRule::new("stars", r"\**").unwrap();
        let text = chars("a*");
        assert!(!rule.is_pattern(0, 'a', &text));
        assert!(rule.is_pattern(1, '*', &text));
    }

    #[test]
    fn counts_chars_not_bytes() {
        let rule = RegexRule::new("accented", "é+").unwrap();
        let text = chars("ééx");
        let fetched = rule.fetch(&Scope::detached(&text, 0)).unwrap();
        assert_eq!(fetched.last_index, 1);
    }

    #[test]
    fn assertions_see_the_surrounding_text() {
        let start = RegexRule::new("start", "^a").unwrap();
        let text = chars("aa");
        assert!(start.is_pattern(0, 'a', &text));
        assert!(!start.is_pattern(1, 'a', &text));

        let boundary = RegexRule::new("word", r"\bb").unwrap();
        let text = chars("ab b");
        assert!(!boundary.is_pattern(1, 'b', &text));
        assert!(boundary.is_pattern(3, 'b', &text));
    }

    #[test]
    fn engine_matches_after_multibyte_text() {
        let rule = Rule::new(RegexRule::new("hex", "0x[0-9a-f]+").unwrap());
        let patterns = build_pattern_set(&[rule, any("c")]);
        let parsed = parse("é€0xff;", &patterns, 0, Terminator::Never).unwrap();
        let names: Vec<_> = parsed.result.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["c", "c", "hex", "c"]);
        assert_eq!(parsed.result[2].content, Content::from("0xff"));
        assert_eq!(parsed.result[2].line_char, 3);
    }
}
