//! Contains the pull [`Lexer`] that turns source text into [`Token`]s.

use std::{collections::VecDeque, sync::Arc};

use nym_base::source_file::{self, ByteIndex, SourceFile, Span};

use crate::token::{SpacingClass, Token, TokenKind};

/// Configures a [`Lexer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexerOptions {
    /// When `true`, every newline consumed between tokens additionally emits
    /// a [`TokenKind::LocationMarker`] token whose span is the just-completed
    /// source line. The parser filters these out; they only feed diagnostics.
    pub emit_location_markers: bool,
}

/// Is a pull lexer over a [`SourceFile`].
///
/// Each call to [`Self::next_token`] returns exactly one token and leaves the
/// cursor on the first character that is not part of it. The lexer never
/// fails: malformed input comes back as [`TokenKind::Error`],
/// [`TokenKind::UnterminatedString`], or [`TokenKind::Unknown`] tokens, and
/// the input always ends with [`TokenKind::Eof`].
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    iter: source_file::Iterator<'a>,
    current: Option<(ByteIndex, char)>,
    line_start: ByteIndex,
    markers: VecDeque<Token>,
    options: LexerOptions,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of the given source file.
    #[must_use]
    pub fn new(source_file: &'a Arc<SourceFile>, options: LexerOptions) -> Self {
        let mut iter = source_file.iter();
        let current = iter.next();

        Self {
            iter,
            current,
            line_start: 0,
            markers: VecDeque::new(),
            options,
        }
    }

    fn source_file(&self) -> &'a Arc<SourceFile> { self.iter.source_file() }

    /// Advances the cursor by one character, tracking line starts for the
    /// location markers.
    fn bump(&mut self) {
        if let Some((index, '\n')) = self.current {
            self.line_start = index + 1;
        }
        self.current = self.iter.next();
    }

    fn peek(&mut self) -> Option<char> { self.iter.peek().map(|(_, c)| c) }

    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.iter.clone();
        ahead.next();
        ahead.peek().map(|(_, c)| c)
    }

    fn position(&self) -> ByteIndex {
        self.current
            .map_or_else(|| self.source_file().content().len(), |(index, _)| index)
    }

    fn make(&self, kind: TokenKind, start: ByteIndex) -> Token {
        let span = Span::new(self.source_file().clone(), start, self.position()).unwrap();
        Token::new(kind, span, None)
    }

    /// Creates a spacing-error token over the single offending character so
    /// the diagnostic caret lands on the exact violation column.
    fn spacing_error_with(&self, index: ByteIndex, character: char, class: SpacingClass) -> Token {
        let span =
            Span::new(self.source_file().clone(), index, index + character.len_utf8()).unwrap();
        Token::new(TokenKind::Error, span, Some(class))
    }

    fn spacing_error(&self, index: ByteIndex, character: char) -> Token {
        self.spacing_error_with(index, character, SpacingClass::of(character))
    }

    /// Finishes a token that must be followed by whitespace or the end of the
    /// input.
    fn delimited(&mut self, kind: TokenKind, start: ByteIndex) -> Token {
        match self.current {
            Some((index, character)) if !character.is_whitespace() => {
                self.spacing_error(index, character)
            }
            _ => self.make(kind, start),
        }
    }

    fn walk(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some((_, character)) = self.current {
            if !predicate(character) {
                break;
            }
            self.bump();
        }
    }

    fn is_delimiter(character: Option<char>) -> bool {
        character.map_or(true, char::is_whitespace)
    }

    fn is_letter(character: char) -> bool {
        character.is_ascii_alphabetic() || matches!(character, '_' | '^' | '`')
    }

    fn is_word_char(character: char) -> bool {
        Self::is_letter(character)
            || character.is_ascii_digit()
            || matches!(character, '-' | '+' | '.' | '!' | '*' | '>' | '\\' | '?' | '=')
    }

    fn skip_whitespace(&mut self) {
        while let Some((index, character)) = self.current {
            if !character.is_whitespace() {
                break;
            }

            if character == '\n' && self.options.emit_location_markers {
                let span =
                    Span::new(self.source_file().clone(), self.line_start, index).unwrap();
                self.markers
                    .push_back(Token::new(TokenKind::LocationMarker, span, None));
            }

            self.bump();
        }
    }

    /// Returns the next token from the input.
    ///
    /// Dispatches on the first non-whitespace character. Multi-character
    /// forms (`.[`, `.(`, `.{`, `//`) are probed with cloned-iterator
    /// lookahead and rewound without consumption when the probe fails.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        if let Some(marker) = self.markers.pop_front() {
            return marker;
        }

        let Some((start, character)) = self.current else {
            let end = self.source_file().content().len();
            let span = Span::new(self.source_file().clone(), end, end).unwrap();
            return Token::new(TokenKind::Eof, span, None);
        };

        match character {
            '{' => self.block_delimiter(TokenKind::BraceOpen, SpacingClass::Block, start),
            '}' => self.block_delimiter(TokenKind::BraceClose, SpacingClass::Block, start),
            '[' => self.block_delimiter(TokenKind::BracketOpen, SpacingClass::Block, start),
            ']' => self.block_delimiter(TokenKind::BracketClose, SpacingClass::Block, start),
            '(' => self.block_delimiter(TokenKind::ParenOpen, SpacingClass::Block, start),
            ')' => self.block_delimiter(TokenKind::ParenClose, SpacingClass::Block, start),
            ',' => self.block_delimiter(TokenKind::Comma, SpacingClass::Other, start),
            '_' if Self::is_delimiter(self.peek()) => {
                self.bump();
                self.make(TokenKind::Void, start)
            }
            '"' | '`' => self.read_string(start, character),
            ':' => self.read_left_word(start),
            '?' => self.read_get_word(start),
            '.' | '+' | '*' | '/' | '>' | '=' => self.read_op_family(start, character),
            '|' | '\\' => self.read_pipe_word(start),
            '\'' => self.read_tag_word(start),
            '~' => self.read_tilde_word(start),
            '<' => self.read_angle_word(start),
            '%' => self.read_file_path(start),
            ';' => self.read_comment(start),
            '-' => self.read_dash(start),
            c if c.is_ascii_digit() => self.read_number(start),
            c if Self::is_letter(c) => self.read_word_family(start),
            _ => {
                self.bump();
                self.make(TokenKind::Unknown, start)
            }
        }
    }

    /// Lexes a single block delimiter or comma, which must be followed by
    /// whitespace or the end of the input.
    fn block_delimiter(
        &mut self,
        kind: TokenKind,
        class: SpacingClass,
        start: ByteIndex,
    ) -> Token {
        self.bump();

        match self.current {
            Some((index, character)) if !character.is_whitespace() => {
                let token = self.spacing_error_with(index, character, class);
                self.bump();
                token
            }
            _ => self.make(kind, start),
        }
    }

    fn read_string(&mut self, start: ByteIndex, delimiter: char) -> Token {
        self.bump();

        loop {
            match self.current {
                None => {
                    let span = Span::to_end(self.source_file().clone(), start).unwrap();
                    return Token::new(TokenKind::UnterminatedString, span, None);
                }
                Some((_, '\\')) => {
                    self.bump();
                    if self.current.is_some() {
                        self.bump();
                    }
                }
                Some((_, c)) if c == delimiter => {
                    self.bump();
                    break;
                }
                Some(_) => self.bump(),
            }
        }

        self.delimited(TokenKind::Str, start)
    }

    fn read_left_word(&mut self, start: ByteIndex) -> Token {
        self.bump();

        let kind = if matches!(self.current, Some((_, ':'))) {
            self.bump();
            TokenKind::LeftModWord
        } else {
            TokenKind::LeftSetWord
        };

        self.walk(Self::is_word_char);
        self.delimited(kind, start)
    }

    fn read_get_word(&mut self, start: ByteIndex) -> Token {
        self.bump();

        let mut context_path = false;
        while let Some((_, c)) = self.current {
            if c == '/' {
                context_path = true;
            } else if !Self::is_word_char(c) {
                break;
            }
            self.bump();
        }

        let kind = if context_path {
            TokenKind::GetContextPath
        } else {
            TokenKind::GetWord
        };
        self.delimited(kind, start)
    }

    /// Lexes the op-word family, probing the `.[`, `.(`, `.{`, and `//`
    /// forms first. A failed probe rewinds and the text lexes as a plain
    /// op-word.
    fn read_op_family(&mut self, start: ByteIndex, character: char) -> Token {
        if character == '.' {
            let opener = match self.peek() {
                Some('[') => Some(TokenKind::OpBracketOpen),
                Some('(') => Some(TokenKind::OpParenOpen),
                Some('{') => Some(TokenKind::OpBraceOpen),
                _ => None,
            };

            if let Some(kind) = opener {
                let saved_iter = self.iter.clone();
                let saved_current = self.current;

                self.bump();
                self.bump();

                if Self::is_delimiter(self.current.map(|(_, c)| c)) {
                    return self.make(kind, start);
                }

                self.iter = saved_iter;
                self.current = saved_current;
            }
        }

        if character == '/' && self.peek() == Some('/') {
            let saved_iter = self.iter.clone();
            let saved_current = self.current;

            self.bump();
            self.bump();

            if Self::is_delimiter(self.current.map(|(_, c)| c)) {
                return self.make(TokenKind::OpWord, start);
            }

            self.iter = saved_iter;
            self.current = saved_current;
        }

        self.read_op_word(start)
    }

    fn read_op_word(&mut self, start: ByteIndex) -> Token {
        self.bump();

        let mut context_path = false;
        while let Some((_, c)) = self.current {
            if c == '/' {
                context_path = true;
            } else if !Self::is_word_char(c) && c != '<' && c != '~' {
                break;
            }
            self.bump();
        }

        let kind = if context_path {
            TokenKind::OpContextPath
        } else {
            TokenKind::OpWord
        };
        self.delimited(kind, start)
    }

    fn read_pipe_word(&mut self, start: ByteIndex) -> Token {
        self.bump();

        let mut context_path = false;
        while let Some((_, c)) = self.current {
            if c == '/' {
                context_path = true;
            } else if !Self::is_word_char(c) && c != '<' {
                break;
            }
            self.bump();
        }

        let kind = if context_path {
            TokenKind::PipeContextPath
        } else {
            TokenKind::PipeWord
        };
        self.delimited(kind, start)
    }

    fn read_tag_word(&mut self, start: ByteIndex) -> Token {
        self.bump();
        self.walk(Self::is_word_char);
        self.delimited(TokenKind::TagWord, start)
    }

    fn read_tilde_word(&mut self, start: ByteIndex) -> Token {
        if self.peek() == Some('(') {
            return self.read_kind_word(start);
        }

        self.bump();
        self.walk(Self::is_word_char);
        self.delimited(TokenKind::GenWord, start)
    }

    fn read_kind_word(&mut self, start: ByteIndex) -> Token {
        self.bump();
        self.bump();
        self.walk(|c| c != ')');

        if self.current.is_none() {
            return self.make(TokenKind::Unknown, start);
        }

        self.bump();
        if matches!(self.current, Some((_, '~'))) {
            self.bump();
        }

        self.delimited(TokenKind::KindWord, start)
    }

    fn read_angle_word(&mut self, start: ByteIndex) -> Token {
        match self.peek() {
            None | Some('-' | '~' | '=' | '<' | '>') => return self.read_op_word(start),
            Some(c) if c.is_whitespace() => return self.read_op_word(start),
            _ => {}
        }

        self.bump();

        let kind = if matches!(self.current, Some((_, '/'))) {
            self.bump();
            TokenKind::ExWord
        } else {
            TokenKind::XWord
        };

        self.walk(|c| c != '>');
        if self.current.is_none() {
            return self.make(TokenKind::Unknown, start);
        }

        self.bump();
        self.delimited(kind, start)
    }

    fn read_file_path(&mut self, start: ByteIndex) -> Token {
        if Self::is_delimiter(self.peek()) {
            self.bump();
            return self.make(TokenKind::OpWord, start);
        }

        self.bump();
        self.walk(|c| !c.is_whitespace() && !matches!(c, '{' | '}' | '[' | ']'));
        self.delimited(TokenKind::FilePath, start)
    }

    fn read_comment(&mut self, start: ByteIndex) -> Token {
        self.bump();
        self.walk(|c| c != '\n');
        self.make(TokenKind::Comment, start)
    }

    /// Disambiguates a leading dash between a negative number, the `-`
    /// op-word, a flag word, and a dash pipe-word.
    fn read_dash(&mut self, start: ByteIndex) -> Token {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => self.read_number(start),
            None => {
                self.bump();
                self.make(TokenKind::OpWord, start)
            }
            Some(c) if c.is_whitespace() => {
                self.bump();
                self.make(TokenKind::OpWord, start)
            }
            Some('-')
                if self
                    .peek_second()
                    .map_or(false, |c| c.is_ascii_alphabetic()) =>
            {
                self.read_flag_word(start)
            }
            Some(c) if c.is_ascii_alphabetic() && Self::is_delimiter(self.peek_second()) => {
                self.read_flag_word(start)
            }
            _ => self.read_pipe_word(start),
        }
    }

    fn read_flag_word(&mut self, start: ByteIndex) -> Token {
        self.bump();
        if matches!(self.current, Some((_, '-'))) {
            self.bump();
        }

        self.walk(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        self.delimited(TokenKind::FlagWord, start)
    }

    fn read_number(&mut self, start: ByteIndex) -> Token {
        if matches!(self.current, Some((_, '-'))) {
            self.bump();
        }

        self.walk(|c| c.is_ascii_digit());

        if matches!(self.current, Some((_, '.')))
            && self.peek().map_or(false, |c| c.is_ascii_digit())
        {
            self.bump();
            self.walk(|c| c.is_ascii_digit());
            return self.delimited(TokenKind::Decimal, start);
        }

        self.delimited(TokenKind::Number, start)
    }

    /// Lexes a token starting with a letter: a word, possibly continued into
    /// a set/mod word, a URI, an email, or a context path by its terminator.
    fn read_word_family(&mut self, start: ByteIndex) -> Token {
        self.walk(Self::is_word_char);

        match self.current {
            None => self.make(TokenKind::Word, start),
            Some((_, ':')) => {
                if self.peek() == Some(':') && Self::is_delimiter(self.peek_second()) {
                    self.bump();
                    self.bump();
                    return self.make(TokenKind::ModWord, start);
                }

                if Self::is_delimiter(self.peek()) {
                    self.bump();
                    return self.make(TokenKind::SetWord, start);
                }

                if self.peek() == Some('/') && self.peek_second() == Some('/') {
                    return self.read_uri(start);
                }

                // the colon starts the next token
                self.make(TokenKind::Word, start)
            }
            Some((_, '@')) => {
                self.walk(|c| !c.is_whitespace() && !matches!(c, '{' | '}' | '[' | ']'));
                self.make(TokenKind::Email, start)
            }
            Some((_, '/')) => {
                self.bump();
                self.walk(|c| Self::is_word_char(c) || c == '/');
                self.delimited(TokenKind::ContextPath, start)
            }
            Some((_, c)) if c.is_whitespace() => self.make(TokenKind::Word, start),
            Some(_) => {
                self.walk(|c| !c.is_whitespace());
                self.make(TokenKind::Unknown, start)
            }
        }
    }

    fn read_uri(&mut self, start: ByteIndex) -> Token {
        self.bump();
        self.bump();
        self.bump();
        self.walk(|c| !c.is_whitespace() && !matches!(c, '{' | '}' | '[' | ']'));
        self.make(TokenKind::Uri, start)
    }
}

#[cfg(test)]
mod tests;
