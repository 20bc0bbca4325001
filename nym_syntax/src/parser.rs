//! Contains the recursive-descent [`Parser`] that assembles tokens into a
//! [`Node`] tree.

use std::{mem, sync::Arc};

use getset::CopyGetters;
use nym_base::{
    source_file::SourceFile,
    word_table::Interner,
};
use nym_lexical::{
    error::{SpacingViolation, UnterminatedString},
    lexer::{Lexer, LexerOptions},
    token::{SpacingClass, Token, TokenKind},
};

use crate::{
    classifier,
    error::{DepthExceeded, Error, UnexpectedEof, UnknownToken},
    node::{Block, BlockKind, Node},
};

/// Configures a [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
pub struct ParserOptions {
    /// Gets the block nesting limit; crossing it aborts the parse with
    /// [`DepthExceeded`] instead of risking a native stack overflow.
    #[get_copy = "pub"]
    max_depth: usize,

    /// Gets whether the lexer runs with location markers enabled.
    #[get_copy = "pub"]
    emit_location_markers: bool,
}

impl ParserOptions {
    /// Creates the options with the given nesting limit.
    #[must_use]
    pub fn new(max_depth: usize, emit_location_markers: bool) -> Self {
        Self {
            max_depth,
            emit_location_markers,
        }
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            // one parse_block frame per open block, several KB each; the
            // limit must trip well inside a 2 MiB test-thread stack
            max_depth: 256,
            emit_location_markers: false,
        }
    }
}

/// Is a recursive-descent parser holding the current token and one token of
/// lookahead.
///
/// One stack frame corresponds to one open block; the explicit depth counter
/// turns runaway nesting into a reported error before the native stack runs
/// out.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
    options: ParserOptions,
}

impl<'a> Parser<'a> {
    /// Creates a parser over the given source file.
    #[must_use]
    pub fn new(source_file: &'a Arc<SourceFile>, options: ParserOptions) -> Self {
        let mut lexer = Lexer::new(
            source_file,
            LexerOptions {
                emit_location_markers: options.emit_location_markers,
            },
        );
        let current = lexer.next_token();

        Self {
            lexer,
            current,
            depth: 0,
            options,
        }
    }

    fn advance(&mut self) -> Token {
        mem::replace(&mut self.current, self.lexer.next_token())
    }

    /// Parses the whole input as the children of one implicit outer
    /// [`BlockKind::Brace`] block.
    ///
    /// Empty input yields an empty root block, not an error.
    ///
    /// # Errors
    /// The first lexical, classification, or structural [`Error`]
    /// encountered; the parse never continues past it.
    pub fn parse_program(&mut self, interner: &mut dyn Interner) -> Result<Node, Error> {
        let file = self.file_name();
        let children = self.parse_items(interner, None)?;

        Ok(Node::Block(Block {
            kind: BlockKind::Brace,
            children,
            file,
            line: 1,
            col: 1,
        }))
    }

    fn file_name(&self) -> Option<String> {
        Some(
            self.current
                .span()
                .source_file()
                .full_path()
                .display()
                .to_string(),
        )
    }

    /// Parses items until the closer of `terminator`, or until EOF at the
    /// top level. Leaves the closing token as the current token.
    fn parse_items(
        &mut self,
        interner: &mut dyn Interner,
        terminator: Option<BlockKind>,
    ) -> Result<Vec<Node>, Error> {
        let mut children = Vec::new();

        loop {
            let kind = self.current.kind();

            if let Some(block_kind) = terminator {
                if kind == closing_token(block_kind) {
                    return Ok(children);
                }
            }

            match kind {
                // on EOF inside a block the caller reports the opening span
                TokenKind::Eof => return Ok(children),

                TokenKind::Comment | TokenKind::LocationMarker => {
                    self.advance();
                }

                TokenKind::Error => {
                    return Err(Error::Lexical(
                        SpacingViolation {
                            span: self.current.span().clone(),
                            class: self.current.error_class().unwrap_or(SpacingClass::Other),
                        }
                        .into(),
                    ));
                }
                TokenKind::UnterminatedString => {
                    return Err(Error::Lexical(
                        UnterminatedString {
                            span: self.current.span().clone(),
                        }
                        .into(),
                    ));
                }
                TokenKind::Unknown
                | TokenKind::BraceClose
                | TokenKind::BracketClose
                | TokenKind::ParenClose => {
                    // a mismatched or stray closer is an unknown token here
                    return Err(UnknownToken {
                        span: self.current.span().clone(),
                    }
                    .into());
                }

                TokenKind::BraceOpen => children.push(self.parse_block(BlockKind::Brace, interner)?),
                TokenKind::BracketOpen => {
                    children.push(self.parse_block(BlockKind::Bracket, interner)?);
                }
                TokenKind::ParenOpen => children.push(self.parse_block(BlockKind::Paren, interner)?),
                TokenKind::OpBracketOpen => {
                    children.push(self.parse_block(BlockKind::OpBracket, interner)?);
                }
                TokenKind::OpParenOpen => {
                    children.push(self.parse_block(BlockKind::OpParen, interner)?);
                }
                TokenKind::OpBraceOpen => {
                    children.push(self.parse_block(BlockKind::OpBrace, interner)?);
                }

                _ => {
                    let token = self.advance();
                    children.push(classifier::classify(&token, interner)?);
                }
            }
        }
    }

    /// Parses one nested block, capturing its location from the opening
    /// token before consuming it.
    fn parse_block(
        &mut self,
        block_kind: BlockKind,
        interner: &mut dyn Interner,
    ) -> Result<Node, Error> {
        if self.depth >= self.options.max_depth {
            return Err(DepthExceeded {
                span: self.current.span().clone(),
                max_depth: self.options.max_depth,
            }
            .into());
        }

        let file = self.file_name();
        let opening = self.advance();

        self.depth += 1;
        let children = self.parse_items(interner, Some(block_kind))?;
        self.depth -= 1;

        if self.current.kind() == TokenKind::Eof {
            return Err(UnexpectedEof {
                block_kind,
                opening_span: opening.span().clone(),
            }
            .into());
        }

        self.advance();

        Ok(Node::Block(Block {
            kind: block_kind,
            children,
            file,
            line: opening.line(),
            col: opening.col(),
        }))
    }
}

fn closing_token(kind: BlockKind) -> TokenKind {
    match kind {
        BlockKind::Brace | BlockKind::OpBrace => TokenKind::BraceClose,
        BlockKind::Bracket | BlockKind::OpBracket => TokenKind::BracketClose,
        BlockKind::Paren | BlockKind::OpParen => TokenKind::ParenClose,
    }
}

#[cfg(test)]
mod tests;
