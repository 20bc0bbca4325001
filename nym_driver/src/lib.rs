//! Contains the command line interface of the `nym` front end: argument
//! parsing, file loading, and diagnostic printing.

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

use std::{path::PathBuf, process::ExitCode};

pub use clap::Parser;
use nym_base::{
    log::{formatting::Style, Message, Severity},
    word_table::WordTable,
};
use nym_syntax::{
    loader::{self, LoadOptions},
    parser::ParserOptions,
};

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(name = "nym", about = "Nym language front end.")]
pub struct Argument {
    /// The script file to load.
    pub file: PathBuf,

    /// Prints out the loaded node tree.
    #[clap(long = "dump-tree")]
    pub dump_tree: bool,

    /// The maximum block nesting depth accepted by the parser.
    #[clap(long = "max-depth", default_value_t = ParserOptions::default().max_depth())]
    pub max_depth: usize,
}

/// Loads the given script file and reports the result.
pub fn run(argument: Argument) -> ExitCode {
    let content = match std::fs::read_to_string(&argument.file) {
        Ok(content) => content,
        Err(error) => {
            let msg = Message::new(
                Severity::Error,
                format!("{}: {error}", argument.file.display()),
            );

            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let options = LoadOptions {
        require_signature: false,
        parser: ParserOptions::new(argument.max_depth, false),
    };

    let mut table = WordTable::new();
    let root = match loader::load_string(
        &content,
        argument.file.clone(),
        &mut table,
        &options,
        None,
    ) {
        Ok(root) => root,
        Err(error) => {
            eprintln!(
                "{}",
                Style::Bold.with(format!("In file {}", argument.file.display()))
            );
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    if argument.dump_tree {
        println!("{root:#?}");
        return ExitCode::SUCCESS;
    }

    let block = root.as_block().expect("the root is always a block");
    let msg = Message::new(
        Severity::Info,
        format!(
            "loaded {} top-level values, {} words interned",
            block.children.len(),
            table.len()
        ),
    );
    println!("{msg}");

    ExitCode::SUCCESS
}
