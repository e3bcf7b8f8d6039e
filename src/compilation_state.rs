// Copyright (c) ZeroC, Inc.

use crate::ast::Ast;
use crate::diagnostic_emitter::{emit_totals, DiagnosticEmitter};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::inheritance::InheritanceRegistry;
use crate::options::CompilerOptions;
use crate::scope::{Scopes, TypeTable};
use crate::source_file::SourceFile;
use console::Term;

/// Everything a compilation owns: the source, the AST, the symbol structures built around it,
/// the diagnostics reported so far, and (eventually) the TAC listing. There is exactly one per
/// compilation, created before parsing and torn down when the process exits.
#[derive(Debug)]
pub struct CompilationState {
    pub ast: Ast,
    pub scopes: Scopes,
    pub types: TypeTable,
    pub registry: InheritanceRegistry,
    pub diagnostics: Diagnostics,
    pub source: SourceFile,
    /// The rendered TAC listing, present once code generation has run.
    pub tac: Option<String>,
}

impl CompilationState {
    pub fn create(source: SourceFile) -> Self {
        CompilationState {
            ast: Ast::new(),
            scopes: Scopes::new(),
            types: TypeTable::new(),
            registry: InheritanceRegistry::new(),
            diagnostics: Diagnostics::new(),
            source,
            tac: None,
        }
    }

    /// Calls the provided function on this `CompilationState` if and only if no errors have been
    /// reported so far. If any errors are present, this is a no-op.
    pub fn apply(&mut self, function: fn(&mut Self)) {
        if !self.diagnostics.has_errors() {
            function(self);
        }
    }

    /// Finishes the compilation: prints the TAC listing on success, or the diagnostics and a
    /// totals line on failure, all to standard output. Returns the process exit code:
    /// zero if and only if no diagnostics were emitted.
    pub fn into_exit_code(self, options: &CompilerOptions) -> i32 {
        let total_errors = self.diagnostics.error_count();
        if total_errors == 0 {
            if let Some(tac) = &self.tac {
                print!("{tac}");
            }
            return 0;
        }

        let mut stdout = Term::stdout();
        let mut emitter = DiagnosticEmitter::new(&mut stdout, options, &self.source);
        emitter
            .emit_diagnostics(self.diagnostics.into_inner())
            .expect("failed to emit diagnostics");
        emit_totals(total_errors).expect("failed to emit totals");

        1
    }

    /// Consumes this `CompilationState` and returns the diagnostics it contains.
    /// This method exists to simplify the testing of diagnostic emission.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_inner()
    }
}
