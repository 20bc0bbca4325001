//! Contains the [`Node`] tree that the parser produces.

use std::fmt::Write;

use enum_as_inner::EnumAsInner;
use nym_base::word_table::{OutOfRangeError, WordIdx, WordTable};
use strum_macros::EnumIter;

/// Is an enumeration of the six block delimiter pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum BlockKind {
    /// `{ ... }`
    Brace,
    /// `[ ... ]`
    Bracket,
    /// `( ... )`
    Paren,
    /// `.[ ... ]`
    OpBracket,
    /// `.( ... )`
    OpParen,
    /// `.{ ... }`
    OpBrace,
}

impl BlockKind {
    /// Gets the opening delimiter text of the block kind.
    #[must_use]
    pub fn opening_str(self) -> &'static str {
        match self {
            Self::Brace => "{",
            Self::Bracket => "[",
            Self::Paren => "(",
            Self::OpBracket => ".[",
            Self::OpParen => ".(",
            Self::OpBrace => ".{",
        }
    }

    /// Gets the closing delimiter text of the block kind.
    #[must_use]
    pub fn closing_str(self) -> &'static str {
        match self {
            Self::Brace | Self::OpBrace => "}",
            Self::Bracket | Self::OpBracket => "]",
            Self::Paren | Self::OpParen => ")",
        }
    }
}

/// Selects the sigil variant of a context path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContextPathKind {
    /// `user/name`
    Plain,
    /// `.user/name`
    Op,
    /// `|user/name`
    Pipe,
    /// `?user/name`
    Get,
}

impl ContextPathKind {
    /// Gets the sigil prefix of the variant.
    #[must_use]
    pub fn sigil(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Op => ".",
            Self::Pipe => "|",
            Self::Get => "?",
        }
    }
}

/// Is a nested, ordered sequence of nodes with its own source location.
///
/// The location is the position of the opening delimiter, captured before the
/// parser consumes it, so consumers can report positions without re-scanning
/// the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// The delimiter pair of the block.
    pub kind: BlockKind,

    /// The child nodes in source order.
    pub children: Vec<Node>,

    /// The path of the source file the block came from, if any.
    pub file: Option<String>,

    /// The line of the opening delimiter (starts at 1).
    pub line: u32,

    /// The column of the opening delimiter (starts at 1).
    pub col: u32,
}

/// Is the tagged value node the parser produces; the rest of the language
/// consumes this tree directly as its runtime data representation.
///
/// Every word-carrying variant holds a [`WordIdx`] valid in the word table
/// the parse ran against.
#[derive(Debug, Clone, PartialEq, EnumAsInner)]
#[allow(missing_docs)]
pub enum Node {
    Integer(i64),
    Decimal(f64),
    Str(String),

    Word(WordIdx),
    SetWord(WordIdx),
    LeftSetWord(WordIdx),
    ModWord(WordIdx),
    LeftModWord(WordIdx),
    GetWord(WordIdx),
    OpWord { idx: WordIdx, force: bool },
    PipeWord { idx: WordIdx, force: bool },
    TagWord(WordIdx),
    KindWord(WordIdx),
    XWord { idx: WordIdx, args: Option<String> },
    ExWord(WordIdx),
    GenWord(WordIdx),
    FlagWord { short: Option<WordIdx>, long: Option<WordIdx> },

    Uri { scheme: WordIdx, raw: String },
    Email(String),
    FilePath(String),
    ContextPath { kind: ContextPathKind, segments: Vec<WordIdx> },

    Comma,
    Void,
    Block(Block),
}

impl Node {
    /// Renders the node back into source text, resolving word handles
    /// against the given table.
    ///
    /// The output is whitespace-normalized but re-parses to a structurally
    /// equal node.
    ///
    /// # Errors
    /// [`OutOfRangeError`] if any handle in the tree does not belong to the
    /// given table.
    pub fn to_source(&self, table: &WordTable) -> Result<String, OutOfRangeError> {
        let mut out = String::new();
        self.write_source(table, &mut out)?;
        Ok(out)
    }

    #[allow(clippy::too_many_lines)]
    fn write_source(&self, table: &WordTable, out: &mut String) -> Result<(), OutOfRangeError> {
        match self {
            Self::Integer(value) => {
                let _ = write!(out, "{value}");
            }
            Self::Decimal(value) => {
                let text = format!("{value}");
                out.push_str(&text);
                if !text.contains('.') && !text.contains('e') {
                    out.push_str(".0");
                }
            }
            Self::Str(value) => {
                out.push('"');
                for character in value.chars() {
                    match character {
                        '\\' => out.push_str("\\\\"),
                        '"' => out.push_str("\\\""),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\t' => out.push_str("\\t"),
                        other => out.push(other),
                    }
                }
                out.push('"');
            }

            Self::Word(idx) => out.push_str(table.spelling_of(*idx)?),
            Self::SetWord(idx) => {
                out.push_str(table.spelling_of(*idx)?);
                out.push(':');
            }
            Self::LeftSetWord(idx) => {
                out.push(':');
                out.push_str(table.spelling_of(*idx)?);
            }
            Self::ModWord(idx) => {
                out.push_str(table.spelling_of(*idx)?);
                out.push_str("::");
            }
            Self::LeftModWord(idx) => {
                out.push_str("::");
                out.push_str(table.spelling_of(*idx)?);
            }
            Self::GetWord(idx) => {
                out.push('?');
                out.push_str(table.spelling_of(*idx)?);
            }
            Self::OpWord { idx, force } => {
                let spelling = table.spelling_of(*idx)?;
                if let Some(punctuation) = spelling.strip_prefix('_') {
                    out.push_str(punctuation);
                } else {
                    out.push('.');
                    out.push_str(spelling);
                    if *force {
                        out.push('*');
                    }
                }
            }
            Self::PipeWord { idx, force } => {
                let spelling = table.spelling_of(*idx)?;
                if let Some(punctuation) = spelling.strip_prefix('_') {
                    if punctuation == "|" {
                        out.push('|');
                    } else {
                        out.push('|');
                        out.push_str(punctuation);
                    }
                } else {
                    out.push('|');
                    out.push_str(spelling);
                    if *force {
                        out.push('*');
                    }
                }
            }
            Self::TagWord(idx) => {
                out.push('\'');
                out.push_str(table.spelling_of(*idx)?);
            }
            Self::KindWord(idx) => {
                out.push_str("~(");
                out.push_str(table.spelling_of(*idx)?);
                out.push_str(")~");
            }
            Self::XWord { idx, args } => {
                out.push('<');
                out.push_str(table.spelling_of(*idx)?);
                if let Some(args) = args {
                    out.push(' ');
                    out.push_str(args);
                }
                out.push('>');
            }
            Self::ExWord(idx) => {
                out.push_str("</");
                out.push_str(table.spelling_of(*idx)?);
                out.push('>');
            }
            Self::GenWord(idx) => {
                out.push('~');
                out.push_str(table.spelling_of(*idx)?);
            }
            Self::FlagWord { short, long } => {
                if let Some(long) = long {
                    out.push_str("--");
                    out.push_str(table.spelling_of(*long)?);
                } else if let Some(short) = short {
                    out.push('-');
                    out.push_str(table.spelling_of(*short)?);
                }
            }

            Self::Uri { raw, .. } => out.push_str(raw),
            Self::Email(address) => out.push_str(address),
            Self::FilePath(path) => {
                out.push('%');
                out.push_str(path);
            }
            Self::ContextPath { kind, segments } => {
                out.push_str(kind.sigil());
                for (position, segment) in segments.iter().enumerate() {
                    if position > 0 {
                        out.push('/');
                    }
                    out.push_str(table.spelling_of(*segment)?);
                }
            }

            Self::Comma => out.push(','),
            Self::Void => out.push('_'),
            Self::Block(block) => {
                out.push_str(block.kind.opening_str());
                for child in &block.children {
                    out.push(' ');
                    child.write_source(table, out)?;
                }
                out.push(' ');
                out.push_str(block.kind.closing_str());
            }
        }

        Ok(())
    }
}
