//! User-facing output for the CLI.
//!
//! Writers are generic over [`WriteColor`] so the same code serves the
//! terminal and in-memory buffers.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::config::RULE_KINDS;
use crate::render;
use crate::tree::MatchResult;

// ============================================================================
// WRITERS
// ============================================================================

pub fn write_text<W: Write>(out: &mut W, nodes: &[MatchResult], spacing: bool) -> io::Result<()> {
    let rendered = render::to_string(nodes, spacing);
    finish_line(out, &rendered)
}

/// Debug rendering, one top-level node at a time; nodes holding an error
/// anywhere in their subtree are printed in red.
pub fn write_debug<W: WriteColor>(
    out: &mut W,
    nodes: &[MatchResult],
    spacing: bool,
) -> io::Result<()> {
    for node in nodes {
        if has_error(node) {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        }
        write!(out, "{}", render::to_string_debug(std::slice::from_ref(node), spacing))?;
        out.reset()?;
    }
    if !spacing {
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, nodes: &[MatchResult]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, nodes)?;
    writeln!(out)
}

pub fn write_rule_kinds<W: WriteColor>(out: &mut W) -> io::Result<()> {
    for (kind, description) in RULE_KINDS {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(out, "{:<10}", kind)?;
        out.reset()?;
        writeln!(out, "{}", description)?;
    }
    Ok(())
}

/// Standard output with colors when attached to a terminal.
pub fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn has_error(node: &MatchResult) -> bool {
    node.error || node.children().iter().any(has_error)
}

fn finish_line<W: Write>(out: &mut W, rendered: &str) -> io::Result<()> {
    if rendered.ends_with('\n') {
        write!(out, "{}", rendered)
    } else {
        writeln!(out, "{}", rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::rules::{any, simple_charbox, word};
    use termcolor::Buffer;

    fn parse(text: &str) -> Vec<MatchResult> {
        Parser::new([word(), simple_charbox("paren", "(", ")"), any("char")])
            .parse(text)
            .unwrap()
    }

    #[test]
    fn text_ends_with_a_newline() {
        let mut out = Vec::new();
        write_text(&mut out, &parse("f(x)"), false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "f(x)\n");
    }

    #[test]
    fn debug_without_color_matches_render() {
        let nodes = parse("a(b");
        let mut out = Buffer::no_color();
        write_debug(&mut out, &nodes, false).unwrap();
        let expected = format!("{}\n", render::to_string_debug(nodes.as_slice(), false));
        assert_eq!(String::from_utf8(out.into_inner()).unwrap(), expected);
    }

    #[test]
    fn json_lists_nodes() {
        let mut out = Vec::new();
        write_json(&mut out, &parse("ab")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["name"], "word");
        assert_eq!(value[0]["content"], "ab");
    }

    #[test]
    fn rule_kinds_are_listed() {
        let mut out = Buffer::no_color();
        write_rule_kinds(&mut out).unwrap();
        let listing = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(listing.lines().count(), RULE_KINDS.len());
        assert!(listing.contains("charbox"));
    }
}
