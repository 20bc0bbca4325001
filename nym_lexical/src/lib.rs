//! This crate implements the lexical analysis phase of the language front end. This phase is
//! responsible for turning the source text into a stream of tokens.
//!
//! The lexer is pull-based: the parser in the syntax crate repeatedly calls
//! [`lexer::Lexer::next_token`] and consumes one [`token::Token`] at a time.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod error;
pub mod lexer;
pub mod token;
