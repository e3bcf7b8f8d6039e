// Copyright (c) ZeroC, Inc.

//! The syntactic front end of the compiler: a hand-written [Lexer](lexer::Lexer) and a
//! recursive-descent [Parser](parser::Parser) that turn source text into the arena
//! [AST](crate::ast::Ast) consumed by semantic analysis.
//!
//! Syntax errors are reported through the shared diagnostics container like every other
//! diagnostic; the parser stops at the first one, since there is nothing useful to analyze in a
//! program that did not parse.

pub mod lexer;
pub mod parser;
pub mod tokens;

use crate::compilation_state::CompilationState;
use crate::diagnostics::{Diagnostic, Error};
use crate::source_file::Span;

/// Lexes and parses the source held by `state` into its AST.
pub fn parse(state: &mut CompilationState) {
    let text = state.source.raw_text.clone();

    let mut tokens = Vec::new();
    for result in lexer::Lexer::new(&text) {
        match result {
            Ok(token) => tokens.push(token),
            Err((start, kind, end)) => {
                Diagnostic::new(Error::Syntax {
                    message: kind.to_string(),
                })
                .set_span(&Span::new(start, end))
                .push_into(&mut state.diagnostics);
                return;
            }
        }
    }

    let mut parser = parser::Parser::new(tokens, &mut state.ast, &mut state.diagnostics);
    if parser.parse_program().is_ok() {
        state.ast.patch_parents();
    }
}
