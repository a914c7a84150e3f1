//! # Text Utilities
//!
//! Character classification tables and position helpers shared by the rule
//! library and the scanning engine.
//!
//! All indices are char indices into a `&[char]` view of the input. The engine
//! converts its input once and every rule works on that same slice, so a
//! position reported here always lines up with a position reported by a
//! [`MatchResult`](crate::tree::MatchResult).

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// CLASSIFICATION TABLES
// ============================================================================

const ASCII_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const ACCENTED_LETTERS: &str = "áàäâéèëêíìïîóòöôúùüûÇç";
const DIGIT_CHARS: &str = "0123456789";
const SYMBOL_CHARS: &str = "§@¥€¬&|#^*$%±=+-/\\<>~°_`´¨()[]{}";
const PUNCTUATION_CHARS: &str = ".,;:?!\"'«»“„";

/// ASCII letters plus the supported Latin accented letters.
pub static LETTERS: Lazy<HashSet<char>> =
    Lazy::new(|| ASCII_LETTERS.chars().chain(ACCENTED_LETTERS.chars()).collect());

pub static DIGITS: Lazy<HashSet<char>> = Lazy::new(|| DIGIT_CHARS.chars().collect());

/// Characters allowed inside an identifier: ASCII letters, digits, `_` and `$`.
pub static VARIABLES: Lazy<HashSet<char>> = Lazy::new(|| {
    ASCII_LETTERS
        .chars()
        .chain("_$".chars())
        .chain(DIGIT_CHARS.chars())
        .collect()
});

pub static SYMBOLS: Lazy<HashSet<char>> = Lazy::new(|| SYMBOL_CHARS.chars().collect());

pub static PUNCTUATIONS: Lazy<HashSet<char>> = Lazy::new(|| PUNCTUATION_CHARS.chars().collect());

pub static CONTROLS: Lazy<HashSet<char>> = Lazy::new(|| ['\n', '\t'].into_iter().collect());

pub static WHITESPACES: Lazy<HashSet<char>> = Lazy::new(|| [' '].into_iter().collect());

pub fn is_letter(c: char) -> bool {
    LETTERS.contains(&c)
}

pub fn is_digit(c: char) -> bool {
    DIGITS.contains(&c)
}

/// A named classification table, addressable from rule-set files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Letter,
    Digit,
    Variable,
    Symbol,
    Punctuation,
    Control,
    Whitespace,
}

impl CharClass {
    pub fn table(self) -> &'static HashSet<char> {
        match self {
            CharClass::Letter => &*LETTERS,
            CharClass::Digit => &*DIGITS,
            CharClass::Variable => &*VARIABLES,
            CharClass::Symbol => &*SYMBOLS,
            CharClass::Punctuation => &*PUNCTUATIONS,
            CharClass::Control => &*CONTROLS,
            CharClass::Whitespace => &*WHITESPACES,
        }
    }

    pub fn contains(self, c: char) -> bool {
        self.table().contains(&c)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CharClass::Letter => "letter",
            CharClass::Digit => "digit",
            CharClass::Variable => "variable",
            CharClass::Symbol => "symbol",
            CharClass::Punctuation => "punctuation",
            CharClass::Control => "control",
            CharClass::Whitespace => "whitespace",
        }
    }

    pub fn all() -> [CharClass; 7] {
        [
            CharClass::Letter,
            CharClass::Digit,
            CharClass::Variable,
            CharClass::Symbol,
            CharClass::Punctuation,
            CharClass::Control,
            CharClass::Whitespace,
        ]
    }
}

impl std::str::FromStr for CharClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharClass::all()
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

// ============================================================================
// SLICING HELPERS
// ============================================================================

/// Returns up to `count` characters starting at `index`. Out-of-range requests
/// are clipped rather than rejected.
pub fn extract(text: &[char], index: usize, count: usize) -> String {
    if index >= text.len() {
        return String::new();
    }
    let end = index.saturating_add(count).min(text.len());
    text[index..end].iter().collect()
}

/// True when `literal` occurs in `text` starting exactly at `index`.
pub fn starts_with_at(text: &[char], index: usize, literal: &str) -> bool {
    let mut position = index;
    for expected in literal.chars() {
        match text.get(position) {
            Some(&c) if c == expected => position += 1,
            _ => return false,
        }
    }
    true
}

/// A run of characters pulled out by [`extract_from_until`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRun {
    pub value: String,
    /// Index of the last character included. Equals the start index when the
    /// run is empty.
    pub last_index: usize,
}

/// Collects characters from `start` while `predicate(c, i, text)` holds.
pub fn extract_from_until<F>(text: &[char], start: usize, predicate: F) -> ExtractedRun
where
    F: Fn(char, usize, &[char]) -> bool,
{
    let mut value = String::new();
    let mut last_index = start;
    for (i, &c) in text.iter().enumerate().skip(start) {
        if !predicate(c, i, text) {
            break;
        }
        value.push(c);
        last_index = i;
    }
    ExtractedRun { value, last_index }
}

// ============================================================================
// LINE BOOKKEEPING
// ============================================================================

/// Line number and in-line character offset of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinePosition {
    pub line: usize,
    pub line_char: usize,
}

/// Number of lines in `text`; an empty text has one line.
pub fn count_lines(text: &[char]) -> usize {
    1 + text.iter().filter(|&&c| c == '\n').count()
}

/// Walks `text` up to and including `max_index` (the last index when `None`).
///
/// Every character bumps the offset; a `\n` starts a new line and resets the
/// offset to 0. The first character of a line therefore sits at offset 1.
pub fn count_lines_char(text: &[char], max_index: Option<usize>) -> LinePosition {
    let mut position = LinePosition {
        line: 1,
        line_char: 0,
    };
    if text.is_empty() {
        return position;
    }
    let last = max_index.unwrap_or(text.len() - 1).min(text.len() - 1);
    for &c in &text[..=last] {
        position.line_char += 1;
        if c == '\n' {
            position.line += 1;
            position.line_char = 0;
        }
    }
    position
}

// ============================================================================
// DECODED SOURCE
// ============================================================================

/// An input decoded once per parse.
///
/// Holds the char view every rule scans, the UTF-8 text for byte-oriented
/// searches, a char-to-byte offset table and the newline positions, so that
/// offsets and line positions are lookups rather than walks from the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    chars: Vec<char>,
    utf8: String,
    /// Byte offset of each char, plus one trailing entry for the end.
    byte_offsets: Vec<usize>,
    newlines: Vec<usize>,
}

impl SourceText {
    pub fn new(text: &str) -> Self {
        Self::from_chars(&text.chars().collect::<Vec<_>>())
    }

    pub fn from_chars(chars: &[char]) -> Self {
        let mut utf8 = String::with_capacity(chars.len());
        let mut byte_offsets = Vec::with_capacity(chars.len() + 1);
        let mut newlines = Vec::new();
        for (i, &c) in chars.iter().enumerate() {
            byte_offsets.push(utf8.len());
            utf8.push(c);
            if c == '\n' {
                newlines.push(i);
            }
        }
        byte_offsets.push(utf8.len());
        Self {
            chars: chars.to_vec(),
            utf8,
            byte_offsets,
            newlines,
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn as_str(&self) -> &str {
        &self.utf8
    }

    /// Byte offset of the char at `index`; `len()` maps to the end of the text.
    pub fn byte_offset(&self, index: usize) -> Option<usize> {
        self.byte_offsets.get(index).copied()
    }

    /// Char index starting at byte `offset`, if `offset` is a char boundary.
    pub fn char_index(&self, offset: usize) -> Option<usize> {
        self.byte_offsets.binary_search(&offset).ok()
    }

    /// Same result as [`count_lines_char`] over the char view.
    pub fn position(&self, index: usize) -> LinePosition {
        if self.chars.is_empty() {
            return LinePosition {
                line: 1,
                line_char: 0,
            };
        }
        let index = index.min(self.chars.len() - 1);
        let passed = self.newlines.partition_point(|&n| n <= index);
        let line_char = match passed {
            0 => index + 1,
            _ => index - self.newlines[passed - 1],
        };
        LinePosition {
            line: passed + 1,
            line_char,
        }
    }
}
