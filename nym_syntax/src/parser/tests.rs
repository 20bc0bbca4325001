use std::path::PathBuf;

use nym_base::{source_file::SourceFile, word_table::WordTable};

use super::{Parser, ParserOptions};
use crate::{
    error::Error,
    node::{BlockKind, Node},
};

fn parse_with(source: &str, options: ParserOptions) -> Result<(Node, WordTable), Error> {
    let mut table = WordTable::new();
    let source_file = SourceFile::new(source.to_owned(), PathBuf::from("test"));
    let node = Parser::new(&source_file, options).parse_program(&mut table)?;
    Ok((node, table))
}

fn parse(source: &str) -> Result<(Node, WordTable), Error> {
    parse_with(source, ParserOptions::default())
}

fn root_children(node: &Node) -> &[Node] { &node.as_block().unwrap().children }

#[test]
fn empty_input_yields_an_empty_root_block() {
    let (root, _) = parse("").unwrap();

    let block = root.as_block().unwrap();
    assert_eq!(block.kind, BlockKind::Brace);
    assert!(block.children.is_empty());
}

#[test]
fn a_single_integer() {
    let (root, _) = parse("123").unwrap();
    assert_eq!(root_children(&root), &[Node::Integer(123)]);
}

#[test]
fn nested_blocks_preserve_order_and_location() {
    let (root, table) = parse("{ { 22 } aa }").unwrap();

    let outer = root_children(&root)[0].as_block().unwrap();
    assert_eq!(outer.kind, BlockKind::Brace);
    assert_eq!(outer.children.len(), 2);
    assert_eq!((outer.line, outer.col), (1, 1));
    assert_eq!(outer.file.as_deref(), Some("test"));

    let inner = outer.children[0].as_block().unwrap();
    assert_eq!(inner.children, vec![Node::Integer(22)]);
    assert_eq!((inner.line, inner.col), (1, 3));

    let word = outer.children[1].as_word().unwrap();
    assert_eq!(table.spelling_of(*word).unwrap(), "aa");
}

#[test]
fn all_six_block_kinds() {
    let (root, _) = parse("{ 1 } [ 2 ] ( 3 ) .[ 4 ] .( 5 ) .{ 6 }").unwrap();

    let kinds = root_children(&root)
        .iter()
        .map(|child| child.as_block().unwrap().kind)
        .collect::<Vec<_>>();

    assert_eq!(
        kinds,
        vec![
            BlockKind::Brace,
            BlockKind::Bracket,
            BlockKind::Paren,
            BlockKind::OpBracket,
            BlockKind::OpParen,
            BlockKind::OpBrace,
        ]
    );
}

#[test]
fn eof_inside_a_block_reports_the_open_kind() {
    let error = parse("{ 1 2").unwrap_err();

    let eof = error.as_unexpected_eof().unwrap();
    assert_eq!(eof.block_kind, BlockKind::Brace);
    assert_eq!(eof.opening_span.str(), "{");
}

#[test]
fn a_stray_closer_is_an_unknown_token() {
    let error = parse("}").unwrap_err();
    assert!(error.is_unknown_token());
}

#[test]
fn a_mismatched_closer_is_an_unknown_token() {
    let error = parse("[ 1 }").unwrap_err();
    assert!(error.is_unknown_token());
}

#[test]
fn runaway_nesting_reports_depth_exceeded() {
    let source = "[ ".repeat(10_000);
    let error = parse(&source).unwrap_err();

    let depth = error.as_depth_exceeded().unwrap();
    assert_eq!(depth.max_depth, ParserOptions::default().max_depth());
}

#[test]
fn the_default_depth_limit_trips_before_the_native_stack_runs_out() {
    let source = "[ ".repeat(512);
    let error = parse(&source).unwrap_err();
    assert!(error.is_depth_exceeded());
}

#[test]
fn a_custom_depth_limit() {
    let error = parse_with("[ [ [ 1 ] ] ]", ParserOptions::new(2, false)).unwrap_err();
    assert!(error.is_depth_exceeded());

    parse_with("[ [ [ 1 ] ] ]", ParserOptions::new(3, false)).unwrap();
}

#[test]
fn comments_never_reach_the_tree() {
    let (root, _) = parse("1 ; trailing note\n2").unwrap();
    assert_eq!(
        root_children(&root),
        &[Node::Integer(1), Node::Integer(2)]
    );
}

#[test]
fn location_markers_never_reach_the_tree() {
    let (root, table) = parse_with("aa\nbb", ParserOptions::new(256, true)).unwrap();

    let children = root_children(&root);
    assert_eq!(children.len(), 2);
    assert_eq!(
        table.spelling_of(*children[0].as_word().unwrap()).unwrap(),
        "aa"
    );
    assert_eq!(
        table.spelling_of(*children[1].as_word().unwrap()).unwrap(),
        "bb"
    );
}

#[test]
fn comma_and_void_nodes() {
    let (root, _) = parse(", _").unwrap();
    assert_eq!(root_children(&root), &[Node::Comma, Node::Void]);
}

#[test]
fn a_spacing_violation_aborts_the_parse() {
    let error = parse("123abc 456").unwrap_err();
    assert!(error.as_lexical().unwrap().is_spacing_violation());
}

#[test]
fn a_rendered_diagnostic_shows_the_line_and_caret() {
    let error = parse("123abc 456").unwrap_err();
    let rendered = error.to_string();

    assert!(rendered.contains("123abc 456"));
    assert!(rendered.contains('^'));
    assert!(rendered.contains("test:1:4"));
}

#[test]
fn an_error_in_a_nested_block_propagates() {
    let error = parse("{ [ \"open ] }").unwrap_err();
    assert!(error.as_lexical().unwrap().is_unterminated_string());
}
