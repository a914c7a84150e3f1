//! Runtime pattern handles.
//!
//! A [`Pattern`] binds a rule to the identity it reports in the parse tree.
//! Pattern sets are rebuilt from the rule list for every parse, so changing a
//! parser's rules never reaches into a pass that already ran.

use crate::engine::Scope;
use crate::errors::ParseResult;
use crate::rules::Rule;
use crate::tree::Fetched;

#[derive(Debug, Clone)]
pub struct Pattern {
    name: String,
    rule: Rule,
}

impl Pattern {
    pub fn new(rule: &Rule) -> Self {
        Self {
            name: rule.name().to_string(),
            rule: rule.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn is_actual_pattern(&self, index: usize, c: char, text: &[char]) -> bool {
        self.rule.is_pattern(index, c, text)
    }

    pub fn accepts(&self, scope: &Scope<'_>) -> bool {
        self.rule.accepts(scope)
    }

    pub fn is_end_pattern(&self, index: usize, c: char, text: &[char]) -> bool {
        self.rule.is_pattern_end(index, c, text)
    }

    pub fn fetch_content(&self, scope: &Scope<'_>) -> ParseResult<Fetched> {
        self.rule.fetch(scope)
    }
}

/// Wraps each rule in a pattern, keeping the order.
pub fn build_pattern_set(rules: &[Rule]) -> Vec<Pattern> {
    rules.iter().map(Pattern::new).collect()
}
