//! Contains all kinds of lexical errors that can occur while tokenizing the source code.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use nym_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};
use getset::Getters;

use crate::token::SpacingClass;

/// Two tokens touch without the whitespace the syntax requires between them.
///
/// The span covers the offending character, so the rendered caret lands on
/// the exact violation column.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SpacingViolation {
    /// The span of the character that follows the undelimited token.
    pub span: Span,

    /// The classification of the offending neighbor.
    pub class: SpacingClass,
}

impl Display for SpacingViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hint = match self.class {
            SpacingClass::Block => "You need spacing between values and block tokens",
            SpacingClass::Operator => {
                "You need spacing between a value and a op-word (operator)"
            }
            SpacingClass::Other => "You need spacing between all tokens",
        };

        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "tokens must be separated by whitespace"),
            SourceCodeDisplay::new(&self.span, Some(hint))
        )
    }
}

/// The source code contains a string literal without its closing quote.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct UnterminatedString {
    /// The span from the opening quote to the end of the input.
    pub span: Span,
}

impl Display for UnterminatedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an unterminated string literal"),
            SourceCodeDisplay::new(
                &self.span,
                Some("this string is never closed; add the matching closing quote")
            )
        )
    }
}

/// Is an enumeration containing all kinds of lexical errors that can occur while tokenizing the
/// source code.
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    SpacingViolation(SpacingViolation),
    UnterminatedString(UnterminatedString),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SpacingViolation(err) => write!(f, "{err}"),
            Self::UnterminatedString(err) => write!(f, "{err}"),
        }
    }
}
