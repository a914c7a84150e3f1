//! End-to-end behaviour of the scanning engine through the `Parser` wrapper.

use lazyparse::rules::{
    any, keyword, number, regex, simple_char, simple_charbox, simple_keys, word, Charbox,
};
use lazyparse::{parse, to_string, Content, MatchResult, Parser, Terminator};

fn contents(nodes: &[MatchResult]) -> Vec<Content> {
    nodes.iter().map(|m| m.content.clone()).collect()
}

// ============================================================================
// ROUND TRIPS
// ============================================================================

#[test]
fn flat_text_round_trips() {
    let parser = Parser::new([word(), simple_char("space", |c| c == ' ')]);
    let nodes = parser.parse("ab cd").unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(to_string(nodes.as_slice(), false), "ab cd");
}

#[test]
fn balanced_nesting_round_trips() {
    let parser = Parser::new([simple_charbox("paren", "(", ")"), any("char")]);
    let nodes = parser.parse("(a(b)c)").unwrap();

    assert_eq!(nodes.len(), 1);
    let outer = &nodes[0];
    assert!(outer.nested);
    assert!(!outer.error);
    assert_eq!(outer.begin.as_deref(), Some("("));
    assert_eq!(outer.end.as_deref(), Some(")"));

    let children = outer.children();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].content, Content::from('a'));
    assert!(children[1].nested);
    assert_eq!(contents(children[1].children()), vec![Content::from('b')]);
    assert_eq!(children[2].content, Content::from('c'));

    assert_eq!(to_string(nodes.as_slice(), false), "(a(b)c)");
}

#[test]
fn unterminated_charbox_is_flagged_and_scanning_continues() {
    let parser = Parser::new([simple_charbox("paren", "(", ")"), any("char")]);
    let nodes = parser.parse("(abc").unwrap();

    assert_eq!(nodes.len(), 4);
    assert!(nodes[0].nested);
    assert!(nodes[0].error);
    assert_eq!(nodes[0].content, Content::from("("));
    assert_eq!(
        contents(&nodes[1..]),
        vec![Content::from('a'), Content::from('b'), Content::from('c')]
    );
}

#[test]
fn inner_unterminated_charbox_closes_the_outer_one() {
    let parser = Parser::new([
        simple_charbox("paren", "(", ")"),
        simple_charbox("bracket", "[", "]"),
        any("char"),
    ]);
    let nodes = parser.parse("([a)").unwrap();
    assert_eq!(nodes.len(), 1);
    assert!(!nodes[0].error);
    let inner = nodes[0].children();
    assert!(inner[0].error);
    assert_eq!(inner[1].content, Content::from('a'));
}

#[test]
fn custom_terminator_closes_the_charbox() {
    let line = Charbox::new("line", "#", "\n").ends_when(|_, c, _| c == ';');
    let parser = Parser::new([line.into_rule(), any("char")]);
    let nodes = parser.parse("#ab;z").unwrap();

    assert_eq!(nodes.len(), 2);
    assert!(nodes[0].nested);
    assert!(!nodes[0].error);
    assert_eq!(
        contents(nodes[0].children()),
        vec![Content::from('a'), Content::from('b')]
    );
    assert_eq!(nodes[1].content, Content::from('z'));
    assert_eq!(nodes[1].line_char, 5);
}

// ============================================================================
// LEXICAL BOUNDARIES
// ============================================================================

#[test]
fn number_takes_a_single_separator() {
    let parser = Parser::new([number(false, false), any("char")]);
    let nodes = parser.parse("3.14.15").unwrap();
    assert_eq!(nodes[0].content, Content::Number(3.14));
    assert_eq!(nodes[1].line_char, 5);
    assert_eq!(nodes[1].content, Content::Number(0.15));
}

#[test]
fn keyword_needs_a_boundary() {
    let parser = Parser::new([keyword(&["if"]), word(), any("char")]);

    let nodes = parser.parse("ifx").unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].name, "word");

    let nodes = parser.parse("if ").unwrap();
    assert_eq!(nodes[0].name, "keyword");
    assert_eq!(nodes[0].content, Content::from("if"));
}

// ============================================================================
// ORDERING AND POSITIONS
// ============================================================================

#[test]
fn earlier_rule_wins() {
    let text = "a=b";
    let first = Parser::new([simple_keys("op", &["="]), any("char")]);
    let second = Parser::new([any("char"), simple_keys("op", &["="])]);

    assert_eq!(first.parse(text).unwrap()[1].name, "op");
    assert_eq!(second.parse(text).unwrap()[1].name, "char");
}

#[test]
fn lines_and_offsets_are_tracked() {
    let parser = Parser::new([word(), simple_char("newline", |c| c == '\n')]);
    let nodes = parser.parse("ab\ncd\n\nef").unwrap();
    let positions: Vec<_> = nodes.iter().map(|m| (m.line, m.line_char)).collect();
    assert_eq!(
        positions,
        vec![(1, 1), (2, 0), (2, 1), (3, 0), (4, 0), (4, 1)]
    );
}

#[test]
fn nested_nodes_report_absolute_positions() {
    let parser = Parser::new([simple_charbox("paren", "(", ")"), any("char")]);
    let nodes = parser.parse("x\n(y)").unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!((nodes[2].line, nodes[2].line_char), (2, 1));
    let y = &nodes[2].children()[0];
    assert_eq!((y.line, y.line_char), (2, 2));
}

// ============================================================================
// PARSER WRAPPER
// ============================================================================

#[test]
fn removed_rules_no_longer_match() {
    let mut parser = Parser::new([word(), any("char")]);
    parser.remove_rules(&["word"]);
    let nodes = parser.parse("ab").unwrap();
    assert!(nodes.iter().all(|m| m.name == "char"));

    parser.add_rules([word()]);
    let nodes = parser.parse("ab").unwrap();
    assert_eq!(nodes.len(), 2);
}

#[test]
fn engine_parse_reports_the_end_marker() {
    let patterns = Parser::new([any("char")]).pattern_set();
    let stop = |_: usize, c: char, _: &[char]| c == '|';
    let parsed = parse("ab|cd", &patterns, 0, Terminator::Predicate(&stop)).unwrap();
    assert!(parsed.is_pattern_end);
    assert_eq!(parsed.last_index, 2);

    let parsed = parse("ab|cd", &patterns, 3, Terminator::Never).unwrap();
    assert!(!parsed.is_pattern_end);
    assert_eq!(contents(&parsed.result), vec![Content::from('c'), Content::from('d')]);
}

#[test]
fn regex_rule_first_scales_to_large_inputs() {
    let parser = Parser::new([regex("hex", "0x[0-9a-f]+").unwrap(), any("char")]);
    let mut text = "x".repeat(100_000);
    text.push_str("0xff");

    let nodes = parser.parse(&text).unwrap();
    assert_eq!(nodes.len(), 100_001);
    assert_eq!(nodes[100_000].name, "hex");
    assert_eq!(nodes[100_000].content, Content::from("0xff"));
    assert_eq!(nodes[100_000].line_char, 100_001);
}
