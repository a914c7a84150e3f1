//! Words, numbers, identifiers and keywords.

use crate::engine::Scope;
use crate::errors::ParseResult;
use crate::rules::Recognizer;
use crate::text::{extract_from_until, is_digit, is_letter, starts_with_at};
use crate::tree::{Content, Fetched};

fn is_identifier_char(c: char) -> bool {
    is_letter(c) || c == '_'
}

// ============================================================================
// WORD / VARIABLE
// ============================================================================

/// A maximal run of letters, accented ones included.
#[derive(Debug, Clone, Copy)]
pub struct Word;

impl Recognizer for Word {
    fn name(&self) -> &str {
        "word"
    }

    fn default_value(&self) -> Content {
        Content::from("")
    }

    fn is_pattern(&self, _index: usize, c: char, _text: &[char]) -> bool {
        is_letter(c)
    }

    fn fetch(&self, scope: &Scope<'_>) -> ParseResult<Fetched> {
        let run = extract_from_until(scope.text, scope.index, |c, _, _| is_letter(c));
        Ok(Fetched::leaf("word", run.value, run.last_index))
    }
}

/// A maximal run of letters and underscores.
#[derive(Debug, Clone, Copy)]
pub struct Variable;

impl Recognizer for Variable {
    fn name(&self) -> &str {
        "variable"
    }

    fn default_value(&self) -> Content {
        Content::from("")
    }

    fn is_pattern(&self, _index: usize, c: char, _text: &[char]) -> bool {
        is_identifier_char(c)
    }

    fn fetch(&self, scope: &Scope<'_>) -> ParseResult<Fetched> {
        let run = extract_from_until(scope.text, scope.index, |c, _, _| is_identifier_char(c));
        Ok(Fetched::leaf("variable", run.value, run.last_index))
    }
}

// ============================================================================
// NUMBER
// ============================================================================

/// Digits with at most one decimal separator and an optional exponent.
#[derive(Debug, Clone, Copy)]
pub struct Number {
    separator: char,
    allow_exponent: bool,
}

impl Number {
    pub fn new(coma_over_dot: bool, allow_exponent: bool) -> Self {
        Self {
            separator: if coma_over_dot { ',' } else { '.' },
            allow_exponent,
        }
    }

    /// Index just past an exponent starting at `index` (on the `e`), provided a
    /// digit follows the optional sign. `None` leaves the `e` unconsumed.
    fn exponent_end(text: &[char], index: usize) -> Option<usize> {
        let mut cursor = index + 1;
        if matches!(text.get(cursor), Some('+') | Some('-')) {
            cursor += 1;
        }
        let first_digit = cursor;
        while text.get(cursor).copied().is_some_and(is_digit) {
            cursor += 1;
        }
        (cursor > first_digit).then_some(cursor)
    }
}

impl Recognizer for Number {
    fn name(&self) -> &str {
        "number"
    }

    fn default_value(&self) -> Content {
        Content::Number(0.0)
    }

    fn is_pattern(&self, index: usize, c: char, text: &[char]) -> bool {
        is_digit(c) || (c == self.separator && text.get(index + 1).copied().is_some_and(is_digit))
    }

    fn fetch(&self, scope: &Scope<'_>) -> ParseResult<Fetched> {
        let text = scope.text;
        let mut literal = String::new();
        let mut already_decimal = false;
        let mut last_index = scope.index;
        let mut i = scope.index;

        while let Some(&c) = text.get(i) {
            if is_digit(c) {
                literal.push(c);
            } else if c == self.separator && !already_decimal {
                already_decimal = true;
                if literal.is_empty() {
                    literal.push('0');
                }
                literal.push('.');
            } else if self.allow_exponent && (c == 'e' || c == 'E') {
                if let Some(end) = Self::exponent_end(text, i) {
                    if literal.ends_with('.') {
                        literal.push('0');
                    }
                    literal.push('e');
                    // sign and digits
                    literal.extend(&text[i + 1..end]);
                    last_index = end - 1;
                }
                break;
            } else {
                break;
            }
            last_index = i;
            i += 1;
        }

        if literal.ends_with('.') {
            literal.push('0');
        }
        let value = literal.parse::<f64>().unwrap_or_default();
        Ok(Fetched::leaf("number", value, last_index))
    }
}

// ============================================================================
// KEYWORD
// ============================================================================

/// Listed keywords, accepted only when no identifier character follows.
#[derive(Debug, Clone)]
pub struct Keyword {
    keywords: Vec<String>,
}

impl Keyword {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|k| k.as_ref().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    fn keyword_at(&self, index: usize, text: &[char]) -> Option<&str> {
        self.keywords
            .iter()
            .find(|keyword| {
                starts_with_at(text, index, keyword)
                    && !text
                        .get(index + keyword.chars().count())
                        .copied()
                        .is_some_and(is_identifier_char)
            })
            .map(String::as_str)
    }
}

impl Recognizer for Keyword {
    fn name(&self) -> &str {
        "keyword"
    }

    fn default_value(&self) -> Content {
        Content::from("")
    }

    fn is_pattern(&self, index: usize, _c: char, text: &[char]) -> bool {
        self.keyword_at(index, text).is_some()
    }

    fn fetch(&self, scope: &Scope<'_>) -> ParseResult<Fetched> {
        Ok(match self.keyword_at(scope.index, scope.text) {
            Some(keyword) => Fetched::leaf(
                "keyword",
                keyword,
                scope.index + keyword.chars().count() - 1,
            ),
            None => Fetched::leaf("keyword", "", scope.index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn fetch_at(rule: &dyn Recognizer, text: &str, index: usize) -> Fetched {
        let text = chars(text);
        rule.fetch(&Scope::detached(&text, index)).unwrap()
    }

    #[test]
    fn word_stops_at_non_letter() {
        let fetched = fetch_at(&Word, "café au", 0);
        assert_eq!(fetched.content, Content::from("café"));
        assert_eq!(fetched.last_index, 3);
    }

    #[test]
    fn variable_accepts_leading_underscore() {
        let rule = Variable;
        let text = chars("_tmp_x1");
        assert!(rule.is_pattern(0, '_', &text));
        let fetched = rule.fetch(&Scope::detached(&text, 0)).unwrap();
        assert_eq!(fetched.content, Content::from("_tmp_x"));
        assert_eq!(fetched.last_index, 5);
    }

    #[test]
    fn number_takes_a_single_separator() {
        let fetched = fetch_at(&Number::new(false, false), "3.14.15", 0);
        assert_eq!(fetched.content, Content::Number(3.14));
        assert_eq!(fetched.last_index, 3);
    }

    #[test]
    fn number_normalizes_leading_separator() {
        let rule = Number::new(false, false);
        let text = chars(".5");
        assert!(rule.is_pattern(0, '.', &text));
        assert!(!rule.is_pattern(0, '.', &chars(".x")));
        let fetched = rule.fetch(&Scope::detached(&text, 0)).unwrap();
        assert_eq!(fetched.content, Content::Number(0.5));
        assert_eq!(fetched.last_index, 1);
    }

    #[test]
    fn number_with_coma_separator() {
        let fetched = fetch_at(&Number::new(true, false), "12,5.3", 0);
        assert_eq!(fetched.content, Content::Number(12.5));
        assert_eq!(fetched.last_index, 3);
    }

    #[test]
    fn number_trailing_separator_is_consumed() {
        let fetched = fetch_at(&Number::new(false, false), "7.x", 0);
        assert_eq!(fetched.content, Content::Number(7.0));
        assert_eq!(fetched.last_index, 1);
    }

    #[test]
    fn exponent_requires_digits() {
        let rule = Number::new(false, true);
        let full = fetch_at(&rule, "1.5e-3;", 0);
        assert_eq!(full.content, Content::Number(1.5e-3));
        assert_eq!(full.last_index, 5);

        let upper = fetch_at(&rule, "2E10", 0);
        assert_eq!(upper.content, Content::Number(2e10));
        assert_eq!(upper.last_index, 3);

        let bare = fetch_at(&rule, "1e", 0);
        assert_eq!(bare.content, Content::Number(1.0));
        assert_eq!(bare.last_index, 0);

        let signed_only = fetch_at(&rule, "1e+x", 0);
        assert_eq!(signed_only.content, Content::Number(1.0));
        assert_eq!(signed_only.last_index, 0);
    }

    #[test]
    fn exponent_ignored_when_disabled() {
        let fetched = fetch_at(&Number::new(false, false), "4e2", 0);
        assert_eq!(fetched.content, Content::Number(4.0));
        assert_eq!(fetched.last_index, 0);
    }

    #[test]
    fn keyword_must_not_prefix_identifier() {
        let rule = Keyword::new(&["if", "in"]);
        assert!(!rule.is_pattern(0, 'i', &chars("ifx")));
        assert!(!rule.is_pattern(0, 'i', &chars("if_")));
        assert!(rule.is_pattern(0, 'i', &chars("if ")));
        assert!(rule.is_pattern(0, 'i', &chars("if")));
        assert!(rule.is_pattern(0, 'i', &chars("if(")));
    }

    #[test]
    fn keyword_first_viable_entry_wins() {
        let rule = Keyword::new(&["for", "forall"]);
        let fetched = fetch_at(&rule, "forall x", 0);
        assert_eq!(fetched.content, Content::from("forall"));
        assert_eq!(fetched.last_index, 5);

        let fetched = fetch_at(&rule, "for x", 0);
        assert_eq!(fetched.content, Content::from("for"));
        assert_eq!(fetched.last_index, 2);
    }
}
