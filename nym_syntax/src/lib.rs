//! This crate provides the node tree and parser for the language front end. This phase is
//! responsible for parsing the token stream into a tree of value nodes.
//!
//! The usual entry points are the functions in [`loader`], which also handle
//! shebang stripping and optional code-signature verification before lexing.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod classifier;
pub mod error;
pub mod loader;
pub mod node;
pub mod parser;
