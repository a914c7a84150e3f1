//! Declarative rule sets.
//!
//! A rule-set file lists rules in priority order, each tagged by `kind`:
//!
//! ```yaml
//! max_depth: 64
//! rules:
//!   - kind: string
//!   - kind: number
//!     coma_over_dot: false
//!   - kind: charbox
//!     name: parenthesis
//!     begin: "("
//!     end: ")"
//!   - kind: char
//!     name: space
//!     class: whitespace
//!   - kind: any
//! ```
//!
//! YAML (`.yaml`, `.yml`) and JSON (`.json`) files are accepted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ParseError, ParseResult};
use crate::parser::Parser;
use crate::rules::{self, Charbox, Rule};
use crate::text::CharClass;

/// Rule kinds understood in rule-set files, with a short description.
pub const RULE_KINDS: [(&str, &str); 10] = [
    ("word", "a run of letters"),
    ("number", "digits with one separator and an optional exponent"),
    ("variable", "a run of letters and underscores"),
    ("keyword", "a listed keyword not followed by an identifier character"),
    ("any", "any single character"),
    ("char", "one character from a class or an explicit list"),
    ("keys", "the first listed literal found at the position"),
    ("string", "a delimited string with backslash escapes"),
    ("regex", "a regular expression anchored at the position"),
    ("charbox", "begin, a recursively parsed body, then end"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RuleSpec {
    Word,
    Number {
        #[serde(default)]
        coma_over_dot: bool,
        #[serde(default = "enabled")]
        allow_exponent: bool,
    },
    Variable,
    Keyword {
        keywords: Vec<String>,
    },
    Any {
        #[serde(default = "any_name")]
        name: String,
    },
    Char {
        name: String,
        #[serde(default)]
        class: Option<String>,
        /// Extra characters accepted besides the class.
        #[serde(default)]
        chars: Option<String>,
    },
    Keys {
        name: String,
        literals: Vec<String>,
    },
    #[serde(rename = "string")]
    Quoted {
        #[serde(default = "string_name")]
        name: String,
        #[serde(default = "double_quote")]
        delimiter: String,
    },
    Regex {
        name: String,
        pattern: String,
    },
    Charbox {
        name: String,
        begin: String,
        end: String,
        /// Pattern set for the body; the enclosing one when absent.
        #[serde(default)]
        rules: Option<Vec<RuleSpec>>,
    },
}

fn enabled() -> bool {
    true
}

fn any_name() -> String {
    "char".to_string()
}

fn string_name() -> String {
    "string".to_string()
}

fn double_quote() -> String {
    "\"".to_string()
}

fn invalid(name: &str, reason: &str) -> ParseError {
    ParseError::InvalidRule {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

impl RuleSpec {
    pub fn to_rule(&self) -> ParseResult<Rule> {
        match self {
            RuleSpec::Word => Ok(rules::word()),
            RuleSpec::Number {
                coma_over_dot,
                allow_exponent,
            } => Ok(rules::number(*coma_over_dot, *allow_exponent)),
            RuleSpec::Variable => Ok(rules::variable()),
            RuleSpec::Keyword { keywords } => {
                if keywords.iter().all(String::is_empty) {
                    return Err(invalid("keyword", "no keywords listed"));
                }
                Ok(rules::keyword(keywords.as_slice()))
            }
            RuleSpec::Any { name } => Ok(rules::any(name)),
            RuleSpec::Char { name, class, chars } => {
                let class = class
                    .as_deref()
                    .map(|class| {
                        class
                            .parse::<CharClass>()
                            .map_err(|class| ParseError::UnknownCharClass { class })
                    })
                    .transpose()?;
                let extra: Vec<char> = chars.as_deref().unwrap_or_default().chars().collect();
                if class.is_none() && extra.is_empty() {
                    return Err(invalid(name, "needs a `class` or `chars`"));
                }
                Ok(rules::simple_char(name, move |c| {
                    class.is_some_and(|class| class.contains(c)) || extra.contains(&c)
                }))
            }
            RuleSpec::Keys { name, literals } => {
                if literals.iter().all(String::is_empty) {
                    return Err(invalid(name, "no literals listed"));
                }
                Ok(rules::simple_keys(name, literals.as_slice()))
            }
            RuleSpec::Quoted { name, delimiter } => {
                if delimiter.is_empty() {
                    return Err(invalid(name, "empty delimiter"));
                }
                Ok(rules::parse_string(name, delimiter))
            }
            RuleSpec::Regex { name, pattern } => rules::regex(name, pattern),
            RuleSpec::Charbox {
                name,
                begin,
                end,
                rules: inner,
            } => {
                if begin.is_empty() || end.is_empty() {
                    return Err(invalid(name, "begin and end must not be empty"));
                }
                let mut charbox = Charbox::new(name, begin, end);
                if let Some(inner) = inner {
                    let inner = inner
                        .iter()
                        .map(RuleSpec::to_rule)
                        .collect::<ParseResult<Vec<_>>>()?;
                    charbox = charbox.with_rules(&inner);
                }
                Ok(charbox.into_rule())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleSetConfig {
    #[serde(default)]
    pub max_depth: Option<usize>,
    pub rules: Vec<RuleSpec>,
}

impl RuleSetConfig {
    /// Loads a rule set, picking the format from the file extension.
    pub fn load(path: &Path) -> ParseResult<Self> {
        let source = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => decode_yaml(path, &source),
            Some("json") => decode_json(path, &source),
            _ => Err(ParseError::config(path, "expected a .yaml, .yml or .json file")),
        }
    }

    pub fn from_yaml_str(source: &str) -> ParseResult<Self> {
        decode_yaml(Path::new("<yaml>"), source)
    }

    pub fn from_json_str(source: &str) -> ParseResult<Self> {
        decode_json(Path::new("<json>"), source)
    }

    /// Builds the rules in file order.
    pub fn to_rules(&self) -> ParseResult<Vec<Rule>> {
        self.rules.iter().map(RuleSpec::to_rule).collect()
    }

    pub fn into_parser(self) -> ParseResult<Parser> {
        let parser = Parser::new(self.to_rules()?);
        Ok(match self.max_depth {
            Some(limit) => parser.with_max_depth(limit),
            None => parser,
        })
    }
}

fn decode_yaml(path: &Path, source: &str) -> ParseResult<RuleSetConfig> {
    serde_yaml::from_str(source).map_err(|e| ParseError::config(PathBuf::from(path), e))
}

fn decode_json(path: &Path, source: &str) -> ParseResult<RuleSetConfig> {
    serde_json::from_str(source).map_err(|e| ParseError::config(PathBuf::from(path), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_rule_set_builds_in_order() {
        let config = RuleSetConfig::from_yaml_str(
            r#"
max_depth: 4
rules:
  - kind: string
  - kind: number
    coma_over_dot: true
  - kind: charbox
    name: paren
    begin: "("
    end: ")"
  - kind: any
"#,
        )
        .unwrap();
        assert_eq!(config.max_depth, Some(4));
        let names: Vec<_> = config
            .to_rules()
            .unwrap()
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["string", "number", "paren", "char"]);
    }

    #[test]
    fn json_is_accepted() {
        let json = r#"{"rules": [
            {"kind": "word"},
            {"kind": "keys", "name": "op", "literals": ["==", "="]}
        ]}"#;
        let config = RuleSetConfig::from_json_str(json).unwrap();
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn unknown_class_is_rejected() {
        let spec = RuleSpec::Char {
            name: "c".into(),
            class: Some("emoji".into()),
            chars: None,
        };
        let err = spec.to_rule().unwrap_err();
        assert!(matches!(err, ParseError::UnknownCharClass { ref class } if class == "emoji"));
    }

    #[test]
    fn char_rule_needs_something_to_match() {
        let spec = RuleSpec::Char {
            name: "c".into(),
            class: None,
            chars: None,
        };
        assert!(matches!(spec.to_rule(), Err(ParseError::InvalidRule { .. })));
    }

    #[test]
    fn char_rule_combines_class_and_chars() {
        let rule = RuleSpec::Char {
            name: "ident".into(),
            class: Some("digit".into()),
            chars: Some("_".into()),
        }
        .to_rule()
        .unwrap();
        let text: Vec<char> = "1_a".chars().collect();
        assert!(rule.is_pattern(0, '1', &text));
        assert!(rule.is_pattern(1, '_', &text));
        assert!(!rule.is_pattern(2, 'a', &text));
    }

    #[test]
    fn empty_charbox_delimiters_are_rejected() {
        let spec = RuleSpec::Charbox {
            name: "box".into(),
            begin: String::new(),
            end: ")".into(),
            rules: None,
        };
        assert!(matches!(spec.to_rule(), Err(ParseError::InvalidRule { ref name, .. }) if name == "box"));
    }

    #[test]
    fn unknown_kind_is_a_config_error() {
        let err = RuleSetConfig::from_yaml_str("rules:\n  - kind: sparkle\n").unwrap_err();
        assert!(matches!(err, ParseError::Config { .. }));
    }

    #[test]
    fn rule_kinds_cover_every_variant() {
        let kinds: Vec<_> = RULE_KINDS.iter().map(|(kind, _)| *kind).collect();
        for kind in kinds {
            let yaml = match kind {
                "keyword" => "kind: keyword\nkeywords: [if]".to_string(),
                "char" => "kind: char\nname: c\nclass: letter".to_string(),
                "keys" => "kind: keys\nname: k\nliterals: [a]".to_string(),
                "regex" => "kind: regex\nname: r\npattern: a+".to_string(),
                "charbox" => "kind: charbox\nname: b\nbegin: '<'\nend: '>'".to_string(),
                other => format!("kind: {}", other),
            };
            let spec: RuleSpec = serde_yaml::from_str(&yaml).unwrap();
            assert!(spec.to_rule().is_ok(), "{kind}");
        }
    }
}
