//! Linear renderings of a parse tree.
//!
//! [`to_string`] concatenates leaf content and wraps nested nodes in their
//! delimiters. [`to_string_debug`] prefixes every node with its pattern name.
//! With `spacing`, each node goes on its own line, indented four spaces per
//! nesting level. An unterminated charbox renders as its opening delimiter
//! only.

use crate::tree::{MatchResult, PatternResult};

const INDENT: &str = "    ";

/// Anything that can be viewed as a list of top-level nodes.
pub trait AsNodes {
    fn as_nodes(&self) -> &[MatchResult];
}

impl AsNodes for PatternResult {
    fn as_nodes(&self) -> &[MatchResult] {
        &self.result
    }
}

impl AsNodes for [MatchResult] {
    fn as_nodes(&self) -> &[MatchResult] {
        self
    }
}

impl AsNodes for Vec<MatchResult> {
    fn as_nodes(&self) -> &[MatchResult] {
        self
    }
}

pub fn to_string<T: AsNodes + ?Sized>(content: &T, spacing: bool) -> String {
    let mut out = String::new();
    write_nodes(&mut out, content.as_nodes(), spacing, 0, false);
    out
}

pub fn to_string_debug<T: AsNodes + ?Sized>(content: &T, spacing: bool) -> String {
    let mut out = String::new();
    write_nodes(&mut out, content.as_nodes(), spacing, 0, true);
    out
}

fn write_nodes(out: &mut String, nodes: &[MatchResult], spacing: bool, depth: usize, labels: bool) {
    let space = if spacing { INDENT.repeat(depth) } else { String::new() };
    let line_return = if spacing { "\n" } else { "" };

    for node in nodes {
        if node.nested {
            if labels {
                out.push_str(&format!("[{}][Nested]: ", node.name));
            }
            out.push_str(&space);
            out.push_str(node.begin.as_deref().unwrap_or_default());
            out.push_str(line_return);
            if !node.error {
                write_nodes(out, node.children(), spacing, depth + 1, labels);
                out.push_str(line_return);
                out.push_str(&space);
                out.push_str(node.end.as_deref().unwrap_or_default());
                out.push_str(line_return);
            }
        } else {
            if labels {
                out.push_str(&format!("[{}]: ", node.name));
            }
            out.push_str(&space);
            out.push_str(&node.content.to_string());
            out.push_str(line_return);
        }
    }
}
