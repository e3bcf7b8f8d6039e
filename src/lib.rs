// Copyright (c) ZeroC, Inc.

pub mod analyzer;
pub mod ast;
pub mod codegen;
pub mod compilation_state;
pub mod diagnostic_emitter;
pub mod diagnostics;
pub mod grammar;
pub mod inheritance;
pub mod options;
pub mod parser;
pub mod scope;
pub mod source_file;
pub mod tac;
pub mod utils;

// Re-export the `clap` dependency.
pub extern crate clap;

use crate::compilation_state::CompilationState;
use crate::diagnostics::{Diagnostic, Error};
use crate::options::CompilerOptions;
use crate::source_file::SourceFile;
use std::io::Read;

/// Compiles the program named by `options`, reading standard input when no path was given.
pub fn compile_from_options(options: &CompilerOptions) -> CompilationState {
    match &options.source {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => compile_from_string(&text, path),
            Err(error) => state_with_io_error(path, error),
        },
        None => {
            let mut text = String::new();
            match std::io::stdin().read_to_string(&mut text) {
                Ok(_) => compile_from_string(&text, "<stdin>"),
                Err(error) => state_with_io_error("<stdin>", error),
            }
        }
    }
}

/// Compiles a Decaf program held in a string: parses it, and — while no diagnostics have been
/// reported — analyzes it and generates its TAC listing.
pub fn compile_from_string(input: &str, name: &str) -> CompilationState {
    let mut state = CompilationState::create(SourceFile::new(name, input));
    parser::parse(&mut state);
    state.apply(analyzer::analyze);
    state.apply(codegen::generate);
    state
}

fn state_with_io_error(path: &str, error: std::io::Error) -> CompilationState {
    let mut state = CompilationState::create(SourceFile::new(path, ""));
    Diagnostic::new(Error::IO {
        action: "read",
        path: path.to_owned(),
        error,
    })
    .push_into(&mut state.diagnostics);
    state
}
