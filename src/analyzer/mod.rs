// Copyright (c) ZeroC, Inc.

//! The semantic analyzer: five passes over the program's top-level declarations, each a full
//! sweep in source order.
//!
//! - P1 builds the global scope and the type-name table.
//! - P2 verifies the types referenced by global variables and function signatures.
//! - P3 builds class and interface member scopes, links subclass scopes under their superclass,
//!   enforces the override rules, and populates the inheritance registry.
//! - P4 re-checks that every class provides each method of every interface it declares.
//! - P5 walks function bodies, checking statements and resolving the type of every expression.
//!
//! The passes are order-sensitive: interfaces must be in the type table (P1) before class
//! implementations are checked (P3), and the registry must be populated (P3) before named-type
//! convertibility queries answer correctly (P5). Analysis never stops early; it reports every
//! diagnostic it can find and leaves the gate-keeping to [CompilationState::apply].

mod declarations;
mod functions;

use crate::ast::Ast;
use crate::compilation_state::CompilationState;
use crate::diagnostics::{Diagnostic, Diagnostics, Error, LookingFor};
use crate::grammar::Type;
use crate::inheritance::InheritanceRegistry;
use crate::scope::{Scopes, TypeTable};
use crate::source_file::Span;

/// Runs semantic analysis over the parsed program held by `state`.
pub fn analyze(state: &mut CompilationState) {
    let CompilationState {
        ast,
        scopes,
        types,
        registry,
        diagnostics,
        ..
    } = state;

    let mut analyzer = Analyzer {
        ast,
        scopes,
        types,
        registry,
        diagnostics,
    };
    analyzer.run();
}

pub(crate) struct Analyzer<'a> {
    pub(crate) ast: &'a mut Ast,
    pub(crate) scopes: &'a mut Scopes,
    pub(crate) types: &'a mut TypeTable,
    pub(crate) registry: &'a mut InheritanceRegistry,
    pub(crate) diagnostics: &'a mut Diagnostics,
}

impl Analyzer<'_> {
    fn run(&mut self) {
        let program = self.ast.program().to_vec();

        for &decl in &program {
            self.build_global_scope(decl);
        }
        for &decl in &program {
            self.check_types(decl);
        }
        for &decl in &program {
            self.check_inheritance(decl);
        }
        for &decl in &program {
            self.check_implements(decl);
        }
        for &decl in &program {
            self.check_functions(decl);
        }
    }

    pub(super) fn report(&mut self, error: Error, span: &Span) {
        Diagnostic::new(error).set_span(span).push_into(self.diagnostics);
    }

    /// Verifies that every named type mentioned by `ty` exists in the type table, reporting
    /// *identifier-not-declared* when one doesn't. Returns whether the check passed, so callers
    /// can substitute `error` for the offending type.
    pub(super) fn check_type_exists(&mut self, ty: &Type) -> bool {
        match ty {
            Type::Named(identifier) => {
                if self.types.contains(&identifier.name) {
                    true
                } else {
                    self.report(
                        Error::IdentifierNotDeclared {
                            identifier: identifier.name.clone(),
                            looking_for: LookingFor::Type,
                        },
                        &identifier.span,
                    );
                    false
                }
            }
            Type::Array(element) => self.check_type_exists(element),
            _ => true,
        }
    }

    pub(super) fn convertible(&self, from: &Type, to: &Type) -> bool {
        from.is_convertible_to(to, self.registry)
    }
}
