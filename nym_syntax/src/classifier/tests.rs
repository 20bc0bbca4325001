use std::path::PathBuf;

use nym_base::{source_file::SourceFile, word_table::WordTable};
use nym_lexical::lexer::{Lexer, LexerOptions};

use super::classify;
use crate::{
    error::Error,
    node::{ContextPathKind, Node},
};

fn classify_first(source: &str, table: &mut WordTable) -> Result<Node, Error> {
    let source_file = SourceFile::new(source.to_owned(), PathBuf::from("test"));
    let mut lexer = Lexer::new(&source_file, LexerOptions::default());
    let token = lexer.next_token();
    classify(&token, table)
}

#[test]
fn set_word_spelling_excludes_the_colon() {
    let mut table = WordTable::new();
    let node = classify_first("wowo:", &mut table).unwrap();

    let idx = *node.as_set_word().unwrap();
    assert_eq!(table.spelling_of(idx).unwrap(), "wowo");
}

#[test]
fn sigil_words_strip_their_sigils() {
    let mut table = WordTable::new();

    let cases: [(&str, fn(&Node, &WordTable) -> String); 5] = [
        (":left", |node, table| {
            table.spelling_of(*node.as_left_set_word().unwrap()).unwrap().to_owned()
        }),
        ("mod::", |node, table| {
            table.spelling_of(*node.as_mod_word().unwrap()).unwrap().to_owned()
        }),
        ("::mod", |node, table| {
            table.spelling_of(*node.as_left_mod_word().unwrap()).unwrap().to_owned()
        }),
        ("?get", |node, table| {
            table.spelling_of(*node.as_get_word().unwrap()).unwrap().to_owned()
        }),
        ("'tag", |node, table| {
            table.spelling_of(*node.as_tag_word().unwrap()).unwrap().to_owned()
        }),
    ];

    let expected = ["left", "mod", "mod", "get", "tag"];
    for ((source, extract), expected) in cases.into_iter().zip(expected) {
        let node = classify_first(source, &mut table).unwrap();
        assert_eq!(extract(&node, &table), expected, "{source:?}");
    }
}

#[test]
fn punctuation_op_words_intern_under_the_underscore_namespace() {
    let mut table = WordTable::new();

    let node = classify_first("+", &mut table).unwrap();
    let (idx, force) = match node {
        Node::OpWord { idx, force } => (idx, force),
        other => panic!("expected an op-word, got {other:?}"),
    };
    assert_eq!(table.spelling_of(idx).unwrap(), "_+");
    assert!(!force);

    let node = classify_first(".add", &mut table).unwrap();
    let Node::OpWord { idx, .. } = node else {
        panic!("expected an op-word")
    };
    assert_eq!(table.spelling_of(idx).unwrap(), "add");
}

#[test]
fn trailing_star_sets_the_force_flag() {
    let mut table = WordTable::new();

    let node = classify_first(".add*", &mut table).unwrap();
    let Node::OpWord { idx, force } = node else {
        panic!("expected an op-word")
    };
    assert!(force);
    assert_eq!(table.spelling_of(idx).unwrap(), "add");

    let node = classify_first("|send*", &mut table).unwrap();
    let Node::PipeWord { idx, force } = node else {
        panic!("expected a pipe-word")
    };
    assert!(force);
    assert_eq!(table.spelling_of(idx).unwrap(), "send");
}

#[test]
fn bare_pipe_interns_namespaced() {
    let mut table = WordTable::new();

    let node = classify_first("|", &mut table).unwrap();
    let Node::PipeWord { idx, force } = node else {
        panic!("expected a pipe-word")
    };
    assert_eq!(table.spelling_of(idx).unwrap(), "_|");
    assert!(!force);
}

#[test]
fn gen_word_is_lowercased() {
    let mut table = WordTable::new();
    let node = classify_first("~Add", &mut table).unwrap();
    assert_eq!(
        table.spelling_of(*node.as_gen_word().unwrap()).unwrap(),
        "add"
    );
}

#[test]
fn kind_word_keeps_only_the_name() {
    let mut table = WordTable::new();
    let node = classify_first("~(person)~", &mut table).unwrap();
    assert_eq!(
        table.spelling_of(*node.as_kind_word().unwrap()).unwrap(),
        "person"
    );
}

#[test]
fn x_word_splits_name_and_args() {
    let mut table = WordTable::new();

    let node = classify_first("<div class=main>", &mut table).unwrap();
    let Node::XWord { idx, args } = node else {
        panic!("expected an x-word")
    };
    assert_eq!(table.spelling_of(idx).unwrap(), "div");
    assert_eq!(args.as_deref(), Some("class=main"));

    let node = classify_first("</div>", &mut table).unwrap();
    assert_eq!(
        table.spelling_of(*node.as_ex_word().unwrap()).unwrap(),
        "div"
    );
}

#[test]
fn flag_words() {
    let mut table = WordTable::new();

    let node = classify_first("-f", &mut table).unwrap();
    let Node::FlagWord { short, long } = node else {
        panic!("expected a flag word")
    };
    assert_eq!(table.spelling_of(short.unwrap()).unwrap(), "f");
    assert!(long.is_none());

    let node = classify_first("--force", &mut table).unwrap();
    let Node::FlagWord { short, long } = node else {
        panic!("expected a flag word")
    };
    assert!(short.is_none());
    assert_eq!(table.spelling_of(long.unwrap()).unwrap(), "force");
}

#[test]
fn uri_keeps_raw_text_and_interns_the_scheme() {
    let mut table = WordTable::new();

    let node = classify_first("https://example.com/x", &mut table).unwrap();
    let Node::Uri { scheme, raw } = node else {
        panic!("expected a URI")
    };
    assert_eq!(table.spelling_of(scheme).unwrap(), "https");
    assert_eq!(raw, "https://example.com/x");
}

#[test]
fn file_path_strips_the_percent_sign() {
    let mut table = WordTable::new();
    let node = classify_first("%dir/file.txt", &mut table).unwrap();
    assert_eq!(node, Node::FilePath("dir/file.txt".to_owned()));
}

#[test]
fn context_paths() {
    let mut table = WordTable::new();

    let node = classify_first("user/check/user", &mut table).unwrap();
    let Node::ContextPath { kind, segments } = node else {
        panic!("expected a context path")
    };
    assert_eq!(kind, ContextPathKind::Plain);
    let spellings = segments
        .iter()
        .map(|idx| table.spelling_of(*idx).unwrap())
        .collect::<Vec<_>>();
    assert_eq!(spellings, vec!["user", "check", "user"]);

    let node = classify_first("?user/name", &mut table).unwrap();
    let Node::ContextPath { kind, .. } = node else {
        panic!("expected a context path")
    };
    assert_eq!(kind, ContextPathKind::Get);
}

#[test]
fn context_path_with_too_many_segments_is_an_error() {
    let mut table = WordTable::new();
    let error = classify_first("a/b/c/d", &mut table).unwrap_err();
    assert!(error.is_invalid_context_path());
}

#[test]
fn numeric_overflow_is_a_reported_error() {
    let mut table = WordTable::new();
    let error = classify_first("12345678901234567890123", &mut table).unwrap_err();
    assert!(error.is_malformed_number());
}

#[test]
fn numbers_parse_losslessly() {
    let mut table = WordTable::new();

    assert_eq!(
        classify_first("123", &mut table).unwrap(),
        Node::Integer(123)
    );
    assert_eq!(
        classify_first("-123.324", &mut table).unwrap(),
        Node::Decimal(-123.324)
    );
}

#[test]
fn string_escapes_decode() {
    let mut table = WordTable::new();
    let node = classify_first("\"a\\nb\\\"c\\\\d\\te\"", &mut table).unwrap();
    assert_eq!(node, Node::Str("a\nb\"c\\d\te".to_owned()));
}
