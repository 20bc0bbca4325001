//! Contains all kinds of errors that can occur while classifying tokens and parsing the node
//! tree, plus the loader-level signature errors.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use nym_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};

use crate::node::BlockKind;

/// An integer literal does not fit a 64-bit signed integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedNumber {
    /// The span of the literal.
    pub span: Span,
}

impl Display for MalformedNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found a malformed number literal"),
            SourceCodeDisplay::new(
                &self.span,
                Some("this number does not fit a 64-bit signed integer")
            )
        )
    }
}

/// A decimal literal does not parse as a 64-bit float.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedDecimal {
    /// The span of the literal.
    pub span: Span,
}

impl Display for MalformedDecimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found a malformed decimal literal"),
            SourceCodeDisplay::new(
                &self.span,
                Some("this decimal does not parse as a 64-bit float")
            )
        )
    }
}

/// The input ended while a block was still open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedEof {
    /// The kind of the unclosed block.
    pub block_kind: BlockKind,

    /// The span of the block's opening delimiter.
    pub opening_span: Span,
}

impl Display for UnexpectedEof {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "unexpected end of input while parsing a block"),
            SourceCodeDisplay::new(
                &self.opening_span,
                Some(format!(
                    "this block is never closed; expected `{}`",
                    self.block_kind.closing_str()
                ))
            )
        )
    }
}

/// A context path does not have two or three word segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidContextPath {
    /// The span of the whole path.
    pub span: Span,
}

impl Display for InvalidContextPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an invalid context path"),
            SourceCodeDisplay::new(
                &self.span,
                Some("a context path chains two or three words, like `user/name`")
            )
        )
    }
}

/// A run of characters does not form any token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToken {
    /// The span of the offending text.
    pub span: Span,
}

impl Display for UnknownToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an unknown token"),
            SourceCodeDisplay::new(&self.span, Some("this text does not form any known token"))
        )
    }
}

/// Blocks nest deeper than the configured limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthExceeded {
    /// The span of the opening delimiter that crossed the limit.
    pub span: Span,

    /// The configured nesting limit.
    pub max_depth: usize,
}

impl Display for DepthExceeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!("blocks nest deeper than the limit of {}", self.max_depth)
            ),
            SourceCodeDisplay::new(&self.span, Some("this block crosses the nesting limit"))
        )
    }
}

/// Signature verification was requested but the input carries no signature
/// marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignatureMissing;

impl Display for SignatureMissing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Message::new(Severity::Error, "signature not found"))
    }
}

/// The input carries a signature that does not verify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignatureInvalid;

impl Display for SignatureInvalid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Message::new(Severity::Error, "invalid signature"))
    }
}

/// Is an enumeration of every error a load can surface.
///
/// The first error aborts the whole parse; a failing load always returns
/// exactly one of these. The [`Display`] implementation is the diagnostics
/// renderer: it prints the failing line, a caret at the failing column, and
/// one hint sentence, all from the data the error itself carries.
#[derive(Debug, Clone, PartialEq, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    Lexical(nym_lexical::error::Error),
    MalformedNumber(MalformedNumber),
    MalformedDecimal(MalformedDecimal),
    UnexpectedEof(UnexpectedEof),
    InvalidContextPath(InvalidContextPath),
    UnknownToken(UnknownToken),
    DepthExceeded(DepthExceeded),
    SignatureMissing(SignatureMissing),
    SignatureInvalid(SignatureInvalid),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexical(err) => err.fmt(f),
            Self::MalformedNumber(err) => err.fmt(f),
            Self::MalformedDecimal(err) => err.fmt(f),
            Self::UnexpectedEof(err) => err.fmt(f),
            Self::InvalidContextPath(err) => err.fmt(f),
            Self::UnknownToken(err) => err.fmt(f),
            Self::DepthExceeded(err) => err.fmt(f),
            Self::SignatureMissing(err) => err.fmt(f),
            Self::SignatureInvalid(err) => err.fmt(f),
        }
    }
}
