//! Parse tree types.
//!
//! A parse produces a flat, ordered list of [`MatchResult`]s. Nodes produced
//! by nesting rules hold a further list in their [`Content`], which makes the
//! output a tree. Every type here serializes to plain JSON values so a tree
//! can be handed to any consumer that does not link this crate.

use serde::{Deserialize, Serialize};

use crate::text::LinePosition;

/// The payload of a match: a scalar, or the children of a nested match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Content {
    #[default]
    Null,
    Text(String),
    Number(f64),
    Nodes(Vec<MatchResult>),
}

impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Content::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_nodes(&self) -> Option<&[MatchResult]> {
        match self {
            Content::Nodes(nodes) => Some(nodes),
            _ => None,
        }
    }

    pub fn is_nodes(&self) -> bool {
        matches!(self, Content::Nodes(_))
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::Text(value.to_string())
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Text(value)
    }
}

impl From<char> for Content {
    fn from(value: char) -> Self {
        Content::Text(value.to_string())
    }
}

impl From<f64> for Content {
    fn from(value: f64) -> Self {
        Content::Number(value)
    }
}

impl From<Vec<MatchResult>> for Content {
    fn from(value: Vec<MatchResult>) -> Self {
        Content::Nodes(value)
    }
}

/// Scalars print as they were matched; `Null` prints as nothing. Node lists
/// are rendered by [`crate::render`], not here.
impl std::fmt::Display for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Content::Null => Ok(()),
            Content::Text(s) => f.write_str(s),
            Content::Number(n) => write!(f, "{}", n),
            Content::Nodes(nodes) => f.write_str(&crate::render::to_string(nodes.as_slice(), false)),
        }
    }
}

/// What a rule's fetch hands back to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    /// Name reported for this particular match; becomes `current_name`.
    pub name: String,
    pub content: Content,
    pub begin: Option<String>,
    pub end: Option<String>,
    pub nested: bool,
    pub error: bool,
    /// Last consumed index, inclusive.
    pub last_index: usize,
}

impl Fetched {
    pub fn leaf(name: impl Into<String>, content: impl Into<Content>, last_index: usize) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            begin: None,
            end: None,
            nested: false,
            error: false,
            last_index,
        }
    }

    /// A charbox whose closing delimiter was found.
    pub fn nested(
        name: impl Into<String>,
        begin: &str,
        end: &str,
        children: Vec<MatchResult>,
        last_index: usize,
    ) -> Self {
        Self {
            name: name.into(),
            content: Content::Nodes(children),
            begin: Some(begin.to_string()),
            end: Some(end.to_string()),
            nested: true,
            error: false,
            last_index,
        }
    }

    /// A charbox that was opened but never closed. Only the opening delimiter
    /// is kept as content.
    pub fn unterminated(name: impl Into<String>, begin: &str, end: &str, last_index: usize) -> Self {
        Self {
            name: name.into(),
            content: Content::Text(begin.to_string()),
            begin: Some(begin.to_string()),
            end: Some(end.to_string()),
            nested: true,
            error: true,
            last_index,
        }
    }

    pub fn with_error(mut self) -> Self {
        self.error = true;
        self
    }
}

/// One node of the parse tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Name of the pattern that matched.
    pub name: String,
    /// Name reported by the fetch for this match.
    pub current_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    pub nested: bool,
    pub content: Content,
    pub error: bool,
    pub line: usize,
    pub line_char: usize,
}

impl MatchResult {
    pub fn from_fetched(pattern_name: &str, fetched: Fetched, position: LinePosition) -> Self {
        Self {
            name: pattern_name.to_string(),
            current_name: fetched.name,
            begin: fetched.begin,
            end: fetched.end,
            nested: fetched.nested,
            content: fetched.content,
            error: fetched.error,
            line: position.line,
            line_char: position.line_char,
        }
    }

    /// Children of a nested match; empty for leaves and failed charboxes.
    pub fn children(&self) -> &[MatchResult] {
        self.content.as_nodes().unwrap_or(&[])
    }

    pub fn position(&self) -> LinePosition {
        LinePosition {
            line: self.line,
            line_char: self.line_char,
        }
    }
}

/// Outcome of one scanning pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternResult {
    /// True when the pass stopped on its end predicate rather than on the end
    /// of the input.
    pub is_pattern_end: bool,
    pub result: Vec<MatchResult>,
    pub last_index: usize,
}
