//! Contains the public entry points that turn raw source text into a node
//! tree: shebang stripping, optional detached-signature verification, then
//! lexing and parsing against a caller-supplied word table.

use std::{path::PathBuf, sync::Arc};

use nym_base::{source_file::SourceFile, word_table::Interner};

use crate::{
    error::{Error, SignatureInvalid, SignatureMissing},
    node::Node,
    parser::{Parser, ParserOptions},
};

/// The literal marker that introduces a detached signature at the end of a
/// script.
pub const SIGNATURE_MARKER: &str = ";ryesig ";

/// Verifies a detached code signature.
///
/// The loader splits the input on [`SIGNATURE_MARKER`], hex-decodes the
/// suffix, and hands both parts here. The key material and the algorithm
/// belong to the implementer.
pub trait SignatureVerifier {
    /// Returns `true` when `signature` is a valid signature over `payload`.
    fn verify(&self, payload: &[u8], signature: &[u8]) -> bool;
}

/// Configures a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// When `true`, the input must end with a valid detached signature;
    /// verification failure aborts before any lexing.
    pub require_signature: bool,

    /// The parser configuration.
    pub parser: ParserOptions,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            require_signature: false,
            parser: ParserOptions::default(),
        }
    }
}

/// Loads a script from an in-memory string against the given word table.
///
/// The returned root node is always a block; empty input yields an empty
/// root block. The `file_path` is only used for locations in diagnostics.
///
/// # Errors
/// Any [`Error`] from signature checking, lexing, classification, or
/// parsing; the first error aborts the whole load.
pub fn load_string(
    input: &str,
    file_path: PathBuf,
    interner: &mut dyn Interner,
    options: &LoadOptions,
    verifier: Option<&dyn SignatureVerifier>,
) -> Result<Node, Error> {
    if options.require_signature {
        check_signature(input, verifier)?;
    }

    let input = remove_shebang_line(input);
    let source_file = SourceFile::new(input.to_owned(), file_path);

    load_source_file(&source_file, interner, options.parser)
}

/// Loads an already-constructed source file against the given word table.
///
/// # Errors
/// Any lexical, classification, or structural [`Error`].
pub fn load_source_file(
    source_file: &Arc<SourceFile>,
    interner: &mut dyn Interner,
    options: ParserOptions,
) -> Result<Node, Error> {
    Parser::new(source_file, options).parse_program(interner)
}

/// Strips a leading `#!` line so scripts can be executable directly.
fn remove_shebang_line(input: &str) -> &str {
    if !input.starts_with("#!") {
        return input;
    }

    input
        .find('\n')
        .map_or("", |newline| &input[newline + 1..])
}

fn check_signature(input: &str, verifier: Option<&dyn SignatureVerifier>) -> Result<(), Error> {
    let Some((payload, signature_text)) = input.split_once(SIGNATURE_MARKER) else {
        return Err(SignatureMissing.into());
    };

    let Some(signature) = decode_hex(signature_text.trim()) else {
        return Err(SignatureInvalid.into());
    };

    let Some(verifier) = verifier else {
        return Err(SignatureMissing.into());
    };

    if verifier.verify(payload.trim().as_bytes(), &signature) {
        Ok(())
    } else {
        Err(SignatureInvalid.into())
    }
}

fn decode_hex(text: &str) -> Option<Vec<u8>> {
    if text.is_empty() || text.len() % 2 != 0 {
        return None;
    }

    text.as_bytes()
        .chunks(2)
        .map(|pair| {
            let high = (pair[0] as char).to_digit(16)?;
            let low = (pair[1] as char).to_digit(16)?;
            u8::try_from(high * 16 + low).ok()
        })
        .collect()
}
