use std::path::PathBuf;

use nym_base::source_file::SourceFile;

use super::{Lexer, LexerOptions};
use crate::token::{SpacingClass, Token, TokenKind};

fn lex_all_with(source: &str, options: LexerOptions) -> Vec<Token> {
    let source_file = SourceFile::new(source.to_owned(), PathBuf::from("test"));
    let mut lexer = Lexer::new(&source_file, options);

    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind() == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    tokens
}

fn lex_all(source: &str) -> Vec<Token> { lex_all_with(source, LexerOptions::default()) }

fn kinds(tokens: &[Token]) -> Vec<TokenKind> { tokens.iter().map(Token::kind).collect() }

#[test]
fn words_and_literals() {
    let tokens = lex_all("print 123 -12.5 \"hi\\n\" `there` loop");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Word,
            TokenKind::Number,
            TokenKind::Decimal,
            TokenKind::Str,
            TokenKind::Str,
            TokenKind::Word,
            TokenKind::Eof,
        ]
    );

    assert_eq!(tokens[0].str(), "print");
    assert_eq!(tokens[1].str(), "123");
    assert_eq!(tokens[2].str(), "-12.5");
    assert_eq!(tokens[3].str(), "\"hi\\n\"");
    assert_eq!(tokens[4].str(), "`there`");
}

#[test]
fn set_and_mod_words() {
    let tokens = lex_all("wowo: :wowo mojo:: ::mojo");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::SetWord,
            TokenKind::LeftSetWord,
            TokenKind::ModWord,
            TokenKind::LeftModWord,
            TokenKind::Eof,
        ]
    );

    assert_eq!(tokens[0].str(), "wowo:");
    assert_eq!(tokens[1].str(), ":wowo");
    assert_eq!(tokens[2].str(), "mojo::");
    assert_eq!(tokens[3].str(), "::mojo");
}

#[test]
fn sigil_words() {
    let tokens = lex_all("?get .op |pipe \\also 'tag ~Gen ~(person)~ <div a> </div>");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::GetWord,
            TokenKind::OpWord,
            TokenKind::PipeWord,
            TokenKind::PipeWord,
            TokenKind::TagWord,
            TokenKind::GenWord,
            TokenKind::KindWord,
            TokenKind::XWord,
            TokenKind::ExWord,
            TokenKind::Eof,
        ]
    );

    assert_eq!(tokens[6].str(), "~(person)~");
    assert_eq!(tokens[7].str(), "<div a>");
}

#[test]
fn angle_punctuation_is_an_op_word() {
    let tokens = lex_all("<= << <- <~ < >");

    for token in &tokens[..tokens.len() - 1] {
        assert_eq!(token.kind(), TokenKind::OpWord, "{:?}", token.str());
    }
}

#[test]
fn op_block_openers_require_whitespace() {
    let tokens = lex_all(".[ 1 ] .( 2 ) .{ 3 } .add");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::OpBracketOpen,
            TokenKind::Number,
            TokenKind::BracketClose,
            TokenKind::OpParenOpen,
            TokenKind::Number,
            TokenKind::ParenClose,
            TokenKind::OpBraceOpen,
            TokenKind::Number,
            TokenKind::BraceClose,
            TokenKind::OpWord,
            TokenKind::Eof,
        ]
    );

    assert_eq!(tokens[9].str(), ".add");
}

#[test]
fn double_slash_is_an_op_word_before_whitespace() {
    let tokens = lex_all("4 // 2");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Number,
            TokenKind::OpWord,
            TokenKind::Number,
            TokenKind::Eof,
        ]
    );
    assert_eq!(tokens[1].str(), "//");
}

#[test]
fn uris_emails_and_paths() {
    let tokens = lex_all("https://example.com me@example.com %dir/file.txt user/check/user");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Uri,
            TokenKind::Email,
            TokenKind::FilePath,
            TokenKind::ContextPath,
            TokenKind::Eof,
        ]
    );

    assert_eq!(tokens[0].str(), "https://example.com");
    assert_eq!(tokens[1].str(), "me@example.com");
    assert_eq!(tokens[2].str(), "%dir/file.txt");
    assert_eq!(tokens[3].str(), "user/check/user");
}

#[test]
fn sigil_context_paths() {
    let tokens = lex_all(".user/name |user/name ?user/name");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::OpContextPath,
            TokenKind::PipeContextPath,
            TokenKind::GetContextPath,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn dash_disambiguation() {
    let tokens = lex_all("-12 - -f --force -foo -->");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Number,
            TokenKind::OpWord,
            TokenKind::FlagWord,
            TokenKind::FlagWord,
            TokenKind::PipeWord,
            TokenKind::PipeWord,
            TokenKind::Eof,
        ]
    );

    assert_eq!(tokens[2].str(), "-f");
    assert_eq!(tokens[3].str(), "--force");
    assert_eq!(tokens[4].str(), "-foo");
    assert_eq!(tokens[5].str(), "-->");
}

#[test]
fn spacing_violation_classes() {
    let cases = [
        ("123+4", SpacingClass::Operator),
        ("123{", SpacingClass::Block),
        ("123abc", SpacingClass::Other),
        ("{x", SpacingClass::Block),
    ];

    for (source, class) in cases {
        let tokens = lex_all(source);
        let error = tokens
            .iter()
            .find(|token| token.kind() == TokenKind::Error)
            .unwrap_or_else(|| panic!("no error token for {source:?}"));

        assert_eq!(error.error_class(), Some(class), "{source:?}");
    }
}

#[test]
fn spacing_violation_marks_the_offending_column() {
    let tokens = lex_all("123abc");
    let error = &tokens[0];

    assert_eq!(error.kind(), TokenKind::Error);
    assert_eq!(error.line(), 1);
    assert_eq!(error.col(), 4);
}

#[test]
fn unterminated_string() {
    let tokens = lex_all("\"never closed");

    assert_eq!(tokens[0].kind(), TokenKind::UnterminatedString);
    assert_eq!(tokens[0].str(), "\"never closed");
}

#[test]
fn comments_run_to_end_of_line() {
    let tokens = lex_all("; a comment\n42");

    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Comment, TokenKind::Number, TokenKind::Eof]
    );
    assert_eq!(tokens[0].str(), "; a comment");
}

#[test]
fn void_and_comma() {
    let tokens = lex_all("_ , _x");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Void,
            TokenKind::Comma,
            TokenKind::Word,
            TokenKind::Eof,
        ]
    );
    assert_eq!(tokens[2].str(), "_x");
}

#[test]
fn location_markers_carry_the_completed_line() {
    let tokens = lex_all_with(
        "one\ntwo\n",
        LexerOptions {
            emit_location_markers: true,
        },
    );

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Word,
            TokenKind::LocationMarker,
            TokenKind::Word,
            TokenKind::LocationMarker,
            TokenKind::Eof,
        ]
    );

    assert_eq!(tokens[1].str(), "one");
    assert_eq!(tokens[3].str(), "two");
}

#[test]
fn empty_input_is_eof_only() {
    let tokens = lex_all("");
    assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);
}

#[test]
fn token_positions() {
    let tokens = lex_all("one\n  two");

    assert_eq!((tokens[0].line(), tokens[0].col()), (1, 1));
    assert_eq!((tokens[1].line(), tokens[1].col()), (2, 3));
}
