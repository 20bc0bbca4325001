//! Maps raw lexical tokens to semantic [`Node`]s, interning word spellings
//! into the caller's word table.

use std::collections::HashSet;

use lazy_static::lazy_static;
use nym_base::word_table::{Interner, WordIdx};
use nym_lexical::token::{Token, TokenKind};

use crate::{
    error::{Error, InvalidContextPath, MalformedDecimal, MalformedNumber},
    node::{ContextPathKind, Node},
};

lazy_static! {
    /// Multi-character punctuation spellings that op-words intern under the
    /// `_` namespace, so user words cannot collide with them.
    static ref OP_PUNCTUATION: HashSet<&'static str> =
        ["<<", "<-", "<~", ">=", "<=", "//", "..", "++", ".", "|"]
            .into_iter()
            .collect();

    /// The same for pipe-words.
    static ref PIPE_PUNCTUATION: HashSet<&'static str> =
        [">>", "->", "~>", "-->", "..", "|"].into_iter().collect();
}

/// Maps one value token to its [`Node`].
///
/// Structural tokens (block delimiters, comments, location markers, errors,
/// EOF) never reach this function; the parser routes them itself.
///
/// # Errors
/// - [`Error::MalformedNumber`] / [`Error::MalformedDecimal`] when a numeric
///   literal does not fit its 64-bit type.
/// - [`Error::InvalidContextPath`] when a context path does not have two or
///   three segments.
pub fn classify(token: &Token, interner: &mut dyn Interner) -> Result<Node, Error> {
    let text = token.str();

    Ok(match token.kind() {
        TokenKind::Word => Node::Word(interner.intern(text)),
        TokenKind::SetWord => Node::SetWord(interner.intern(&text[..text.len() - 1])),
        TokenKind::LeftSetWord => Node::LeftSetWord(interner.intern(&text[1..])),
        TokenKind::ModWord => Node::ModWord(interner.intern(&text[..text.len() - 2])),
        TokenKind::LeftModWord => Node::LeftModWord(interner.intern(&text[2..])),
        TokenKind::GetWord => Node::GetWord(interner.intern(&text[1..])),
        TokenKind::OpWord => op_word(text, interner),
        TokenKind::PipeWord => pipe_word(text, interner),
        TokenKind::TagWord => Node::TagWord(interner.intern(&text[1..])),
        TokenKind::KindWord => {
            let inner = text
                .trim_start_matches("~(")
                .trim_end_matches('~')
                .trim_end_matches(')');
            Node::KindWord(interner.intern(inner))
        }
        TokenKind::GenWord => Node::GenWord(interner.intern(&text[1..].to_lowercase())),
        TokenKind::XWord => x_word(text, interner),
        TokenKind::ExWord => Node::ExWord(interner.intern(&text[2..text.len() - 1])),
        TokenKind::FlagWord => flag_word(text, interner),

        TokenKind::Number => Node::Integer(text.parse().map_err(|_| MalformedNumber {
            span: token.span().clone(),
        })?),
        TokenKind::Decimal => Node::Decimal(text.parse().map_err(|_| MalformedDecimal {
            span: token.span().clone(),
        })?),
        TokenKind::Str => Node::Str(decode_escapes(&text[1..text.len() - 1])),

        TokenKind::Uri => {
            let scheme = text.split("://").next().unwrap_or_default();
            Node::Uri {
                scheme: interner.intern(scheme),
                raw: text.to_owned(),
            }
        }
        TokenKind::Email => Node::Email(text.to_owned()),
        TokenKind::FilePath => Node::FilePath(text[1..].to_owned()),

        TokenKind::ContextPath => context_path(token, text, ContextPathKind::Plain, interner)?,
        TokenKind::OpContextPath => {
            context_path(token, &text[1..], ContextPathKind::Op, interner)?
        }
        TokenKind::PipeContextPath => {
            context_path(token, &text[1..], ContextPathKind::Pipe, interner)?
        }
        TokenKind::GetContextPath => {
            context_path(token, &text[1..], ContextPathKind::Get, interner)?
        }

        TokenKind::Comma => Node::Comma,
        TokenKind::Void => Node::Void,

        kind => unreachable!("structural token {kind:?} routed to the classifier"),
    })
}

/// Strips a trailing `*` from an op/pipe-word spelling, reporting whether it
/// was present.
fn split_force(word: &str) -> (&str, bool) {
    word.strip_suffix('*').map_or((word, false), |stripped| (stripped, true))
}

fn op_word(text: &str, interner: &mut dyn Interner) -> Node {
    let word = if text.starts_with('.') && text.len() > 1 {
        &text[1..]
    } else {
        text
    };

    if word.chars().count() == 1 || OP_PUNCTUATION.contains(word) {
        Node::OpWord {
            idx: interner.intern(&format!("_{word}")),
            force: false,
        }
    } else {
        let (word, force) = split_force(word);
        Node::OpWord {
            idx: interner.intern(word),
            force,
        }
    }
}

fn pipe_word(text: &str, interner: &mut dyn Interner) -> Node {
    let word = if text == "|" { text } else { &text[1..] };

    if word.chars().count() == 1 || PIPE_PUNCTUATION.contains(word) {
        Node::PipeWord {
            idx: interner.intern(&format!("_{word}")),
            force: false,
        }
    } else {
        let (word, force) = split_force(word);
        Node::PipeWord {
            idx: interner.intern(word),
            force,
        }
    }
}

fn x_word(text: &str, interner: &mut dyn Interner) -> Node {
    let inner = &text[1..text.len() - 1];
    let (name, args) = inner
        .split_once(' ')
        .map_or((inner, None), |(name, args)| (name, Some(args.to_owned())));

    Node::XWord {
        idx: interner.intern(name),
        args,
    }
}

fn flag_word(text: &str, interner: &mut dyn Interner) -> Node {
    if let Some(long) = text.strip_prefix("--") {
        Node::FlagWord {
            short: None,
            long: Some(interner.intern(long)),
        }
    } else {
        Node::FlagWord {
            short: Some(interner.intern(&text[1..])),
            long: None,
        }
    }
}

fn context_path(
    token: &Token,
    body: &str,
    kind: ContextPathKind,
    interner: &mut dyn Interner,
) -> Result<Node, Error> {
    let segments = body
        .split('/')
        .map(|segment| {
            if segment.is_empty() {
                None
            } else {
                Some(interner.intern(segment))
            }
        })
        .collect::<Option<Vec<WordIdx>>>();

    match segments {
        Some(segments) if (2..=3).contains(&segments.len()) => {
            Ok(Node::ContextPath { kind, segments })
        }
        _ => Err(InvalidContextPath {
            span: token.span().clone(),
        }
        .into()),
    }
}

fn decode_escapes(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(character) = chars.next() {
        if character != '\\' {
            out.push(character);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests;
