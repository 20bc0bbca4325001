//! Is a module containing the [`Token`] type and all of its related types.

use getset::{CopyGetters, Getters};
use nym_base::source_file::{SourceElement, Span};

/// Is an enumeration of every kind of token the lexer can produce.
///
/// The kinds mirror the surface syntax directly: one variant per word sigil
/// family, one per literal family, one per block delimiter, plus the
/// synthetic kinds ([`Self::LocationMarker`], [`Self::Eof`]) and the error
/// kinds ([`Self::Unknown`], [`Self::Error`], [`Self::UnterminatedString`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum TokenKind {
    /// A bare word, `print`.
    Word,
    /// A word with a trailing colon, `name:`.
    SetWord,
    /// A word with a leading colon, `:name`.
    LeftSetWord,
    /// A word with a trailing double colon, `name::`.
    ModWord,
    /// A word with a leading double colon, `::name`.
    LeftModWord,
    /// A word with a leading question mark, `?name`.
    GetWord,
    /// A word with a leading dot or a punctuation operator, `.add`, `+`.
    OpWord,
    /// A word with a leading pipe or backslash, `|print`, `\print`.
    PipeWord,
    /// A word with a leading single quote, `'name`.
    TagWord,
    /// A kind annotation, `~(person)~`.
    KindWord,
    /// A generic word with a leading tilde, `~Add`.
    GenWord,
    /// An opening tag with optional argument text, `<div class="x">`.
    XWord,
    /// A closing tag, `</div>`.
    ExWord,
    /// A short or long flag, `-f`, `--force`.
    FlagWord,

    /// An integer literal, optionally negative.
    Number,
    /// A decimal literal, optionally negative.
    Decimal,
    /// A string literal delimited by `"` or `` ` ``, span includes the quotes.
    Str,
    /// A URI, `https://example.com`.
    Uri,
    /// An email address, `user@example.com`.
    Email,
    /// A file path with a leading percent sign, `%dir/file.txt`.
    FilePath,

    /// A slash-separated chain of words, `user/profile/name`.
    ContextPath,
    /// A context path with a leading dot, `.user/name`.
    OpContextPath,
    /// A context path with a leading pipe, `|user/name`.
    PipeContextPath,
    /// A context path with a leading question mark, `?user/name`.
    GetContextPath,

    /// `{` followed by whitespace.
    BraceOpen,
    /// `}`.
    BraceClose,
    /// `[`.
    BracketOpen,
    /// `]`.
    BracketClose,
    /// `(`.
    ParenOpen,
    /// `)`.
    ParenClose,
    /// `.[` followed by whitespace.
    OpBracketOpen,
    /// `.(` followed by whitespace.
    OpParenOpen,
    /// `.{` followed by whitespace.
    OpBraceOpen,

    /// A comma separator.
    Comma,
    /// An underscore followed by whitespace.
    Void,
    /// A `;` comment running to the end of the line.
    Comment,

    /// A synthetic token carrying a just-completed source line, emitted only
    /// when the lexer is configured with location markers.
    LocationMarker,
    /// The end of the input.
    Eof,

    /// A run of characters that does not form any token.
    Unknown,
    /// A token that violates the inter-token spacing contract. Carries a
    /// [`SpacingClass`] describing the offending neighbor.
    Error,
    /// A string literal whose closing quote is missing.
    UnterminatedString,
}

/// Classifies which neighbor a spacing violation ran into.
///
/// The classification only affects the hint sentence of the rendered
/// diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpacingClass {
    /// The offending character is a block delimiter.
    Block,
    /// The offending character is an operator character.
    Operator,
    /// Any other offending character.
    Other,
}

impl SpacingClass {
    /// Classifies the character that immediately follows an undelimited
    /// token.
    #[must_use]
    pub fn of(character: char) -> Self {
        match character {
            '+' | '-' | '/' | '*' | '%' => Self::Operator,
            '{' | '}' | '[' | ']' | '(' | ')' => Self::Block,
            _ => Self::Other,
        }
    }
}

/// Is a single lexical token.
///
/// Tokens are ephemeral: the parser consumes each one immediately and never
/// retains it in the output tree. The token's text is a view into the source
/// file through its span.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Token {
    /// Gets the kind of the token.
    #[get_copy = "pub"]
    kind: TokenKind,

    /// Gets the span of the source text that makes up the token.
    #[get = "pub"]
    span: Span,

    /// Gets the line the token starts on (starts at 1).
    #[get_copy = "pub"]
    line: u32,

    /// Gets the column the token starts on (starts at 1).
    #[get_copy = "pub"]
    col: u32,

    /// Gets the spacing classification when the kind is [`TokenKind::Error`].
    #[get_copy = "pub"]
    error_class: Option<SpacingClass>,
}

impl Token {
    /// Creates a token over the given span, deriving its line and column
    /// from the span's start position.
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, error_class: Option<SpacingClass>) -> Self {
        let location = span.start_location();
        Self {
            kind,
            span,
            line: location.line,
            col: location.column,
            error_class,
        }
    }

    /// Gets the source text of the token.
    #[must_use]
    pub fn str(&self) -> &str { self.span.str() }
}

impl SourceElement for Token {
    fn span(&self) -> Span { self.span.clone() }
}
