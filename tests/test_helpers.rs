// Copyright (c) ZeroC, Inc.

//! This module contains helper functions that are useful for testing the compiler.

// Not every test crate uses every helper.
#![allow(dead_code)]

use decafc::compilation_state::CompilationState;
use decafc::compile_from_string;
use decafc::diagnostics::Diagnostic;

/// Compiles a Decaf program held in a string, running every phase the diagnostics allow.
pub fn compile(source: &str) -> CompilationState {
    compile_from_string(source, "test.decaf")
}

/// Compiles the program and returns the diagnostics it produced.
pub fn parse_for_diagnostics(source: &str) -> Vec<Diagnostic> {
    compile(source).into_diagnostics()
}

/// Asserts that the program produced no diagnostics at all.
pub fn assert_parses(source: &str) {
    let diagnostics = parse_for_diagnostics(source);
    if !diagnostics.is_empty() {
        eprintln!("The emitted diagnostics were:");
        for diagnostic in &diagnostics {
            eprintln!("\t[{}] {}", diagnostic.code(), diagnostic.message());
        }
        eprintln!();
        panic!("expected the program to compile without diagnostics");
    }
}

/// Asserts that the program compiles cleanly and returns its TAC listing.
pub fn assert_compiles(source: &str) -> String {
    let state = compile(source);
    if state.diagnostics.has_errors() {
        eprintln!("The emitted diagnostics were:");
        for diagnostic in state.diagnostics.iter() {
            eprintln!("\t[{}] {}", diagnostic.code(), diagnostic.message());
        }
        eprintln!();
        panic!("expected the program to compile without diagnostics");
    }
    state.tac.expect("compilation produced no TAC listing")
}

/// Compares diagnostics emitted by the compiler to an array of expected diagnostics.
/// It ensures that the expected number of diagnostics were emitted (ie: that both lists are the
/// same length), then checks each diagnostic against the expected array in order, comparing
/// error codes and messages.
pub fn check_diagnostics<const L: usize>(diagnostics: Vec<Diagnostic>, expected: [impl Into<Diagnostic>; L]) {
    // Check that the correct number of diagnostics were emitted.
    if expected.len() != diagnostics.len() {
        eprintln!(
            "Expected {} diagnostics, but got {}.",
            expected.len(),
            diagnostics.len()
        );
        eprintln!("The emitted diagnostics were:");
        for diagnostic in diagnostics {
            eprintln!("\t[{}] {}", diagnostic.code(), diagnostic.message());
        }
        eprintln!();
        panic!("test failure");
    }

    // Check that the emitted diagnostics match what was expected.
    for (expect, diagnostic) in expected.into_iter().zip(diagnostics) {
        let expect: Diagnostic = expect.into();
        let mut failed = false;

        if expect.code() != diagnostic.code() {
            eprintln!("diagnostic codes didn't match:");
            eprintln!("\texpected '{}', but got '{}'", expect.code(), diagnostic.code());
            failed = true;
        }

        if expect.message() != diagnostic.message() {
            eprintln!("diagnostic messages didn't match:");
            eprintln!("\texpected: \"{}\"", expect.message());
            eprintln!("\t but got: \"{}\"", diagnostic.message());
            failed = true;
        }

        if failed {
            eprintln!();
            panic!("test failure");
        }
    }
}
