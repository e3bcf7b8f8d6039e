// Copyright (c) ZeroC, Inc.

//! Phases P1 through P4: scope construction, declaration-level type checking, inheritance
//! checking, and interface satisfaction.

use super::Analyzer;
use crate::ast::DeclId;
use crate::diagnostics::{Diagnostic, Error, LookingFor};
use crate::grammar::*;
use crate::scope::{ScopeId, ScopeKind};
use std::collections::HashSet;

impl Analyzer<'_> {
    /// P1: inserts a top-level declaration into the root scope, and classes and interfaces into
    /// the type-name table.
    pub(super) fn build_global_scope(&mut self, decl: DeclId) {
        let root = self.scopes.root();
        self.declare(root, decl);
        self.ast.decl_mut(decl).scope = Some(root);

        let named = self.ast.decl(decl);
        if named.is_class() || named.is_interface() {
            let name = named.id.name.clone();
            self.types.insert(name, decl);
        }
    }

    /// Inserts `decl`'s name into `scope`, reporting a *declaration-conflict* against the prior
    /// occupant if the name is already taken. The first declaration wins.
    pub(super) fn declare(&mut self, scope: ScopeId, decl: DeclId) {
        let name = self.ast.decl(decl).id.name.clone();
        if let Some(previous) = self.scopes.search_local(scope, &name) {
            let span = self.ast.decl(decl).id.span.clone();
            let previous_span = self.ast.decl(previous).id.span.clone();
            Diagnostic::new(Error::DeclarationConflict { identifier: name })
                .set_span(&span)
                .add_note("previously declared here", Some(&previous_span))
                .push_into(self.diagnostics);
        } else {
            self.scopes.insert(scope, name, decl);
        }
    }

    /// P2: verifies the types referenced by a top-level declaration. Global variables collapse
    /// their shadow type to `error` on failure; global functions get their formals scope here.
    /// Classes and interfaces do nothing until P3, when their member scopes exist.
    pub(super) fn check_types(&mut self, decl: DeclId) {
        match &self.ast.decl(decl).kind {
            DeclKind::Variable(variable) => {
                let declared = variable.declared_type.clone();
                if !self.check_type_exists(&declared) {
                    if let Some(variable) = self.ast.decl_mut(decl).as_variable_mut() {
                        variable.shadow_type = Type::Error;
                    }
                }
            }
            DeclKind::Function(_) => {
                let declared_in = match self.ast.decl(decl).scope {
                    Some(scope) => scope,
                    None => self.scopes.root(),
                };
                let body_scope = self.scopes.push(declared_in);
                if let Some(function) = self.ast.decl_mut(decl).as_function_mut() {
                    function.body_scope = Some(body_scope);
                }
                self.setup_formals(decl, body_scope);
            }
            DeclKind::Class(_) | DeclKind::Interface(_) => {}
        }
    }

    /// Inserts a function's formals into `scope` (duplicates are conflicts) and verifies each
    /// formal's type, collapsing its shadow type to `error` on failure.
    pub(super) fn setup_formals(&mut self, function: DeclId, scope: ScopeId) {
        let formals = match self.ast.decl(function).as_function() {
            Some(function) => function.formals.clone(),
            None => return,
        };

        for formal in formals {
            self.declare(scope, formal);
            self.ast.decl_mut(formal).scope = Some(scope);

            let declared = match self.ast.decl(formal).as_variable() {
                Some(variable) => variable.declared_type.clone(),
                None => continue,
            };
            if !self.check_type_exists(&declared) {
                if let Some(variable) = self.ast.decl_mut(formal).as_variable_mut() {
                    variable.shadow_type = Type::Error;
                }
            }
        }
    }

    /// P3: builds member scopes and enforces the inheritance rules.
    pub(super) fn check_inheritance(&mut self, decl: DeclId) {
        if self.ast.decl(decl).is_class() {
            self.check_class_inheritance(decl);
        } else if self.ast.decl(decl).is_interface() {
            self.ensure_interface_scope(decl);
        }
    }

    /// P3 for one class. Idempotent: the `checked` flag makes revisits (from subclasses that are
    /// processed before their superclass) no-ops.
    fn check_class_inheritance(&mut self, decl: DeclId) {
        let (name, extends, implements, members, declared_in) = {
            let class_decl = self.ast.decl(decl);
            let Some(class) = class_decl.as_class() else { return };
            if class.checked {
                return;
            }
            (
                class_decl.id.name.clone(),
                class.extends.clone(),
                class.implements.clone(),
                class.members.clone(),
                class_decl.scope,
            )
        };
        if let Some(class) = self.ast.decl_mut(decl).as_class_mut() {
            class.checked = true;
        }

        // Build the class scope and insert every member into it.
        let declared_in = declared_in.unwrap_or(self.scopes.root());
        let class_scope = self.scopes.push(declared_in);
        self.scopes.set_kind(class_scope, ScopeKind::Class);
        if let Some(class) = self.ast.decl_mut(decl).as_class_mut() {
            class.members_scope = Some(class_scope);
        }
        for &member in &members {
            self.declare(class_scope, member);
            self.ast.decl_mut(member).scope = Some(class_scope);
        }

        // Resolve the extends clause. Only the direct superclass's scope needs to be linked;
        // it chains to the rest of the ancestry itself.
        let mut superclass = None;
        if let Some(extends) = &extends {
            superclass = self.link_superclass(&name, extends, class_scope, &members);
        }

        // Check the method signatures of every declared interface against the class scope.
        for interface_id in &implements {
            self.check_declared_interface(interface_id, class_scope);
        }

        // Register the class in the inheritance registry.
        let interface_names = implements.iter().map(|interface| interface.name.clone()).collect();
        self.registry.add(name, superclass, interface_names);
    }

    /// Resolves a class's extends clause: verifies the superclass exists, breaks inheritance
    /// cycles, recursively processes the superclass, re-parents the class scope under it, and
    /// checks the class's members against the inherited ones. Returns the superclass name when
    /// the link was established.
    fn link_superclass(
        &mut self,
        class_name: &str,
        extends: &Identifier,
        class_scope: ScopeId,
        members: &[DeclId],
    ) -> Option<String> {
        if !self.types.contains(&extends.name) {
            self.report(
                Error::IdentifierNotDeclared {
                    identifier: extends.name.clone(),
                    looking_for: LookingFor::Class,
                },
                &extends.span,
            );
            // Register an empty placeholder class under the missing name so later mentions
            // resolve instead of repeating the diagnostic.
            self.add_placeholder_class(extends);
            return None;
        }

        let parent = self.types.get(&extends.name)?;
        if !self.ast.decl(parent).is_class() {
            return None;
        }

        // A class whose extends chain leads back to itself is reported and left unlinked,
        // which keeps both the scope tree and the registry acyclic.
        if self.extends_chain_contains(&extends.name, class_name) {
            self.report(
                Error::CyclicInheritance {
                    identifier: class_name.to_owned(),
                },
                &extends.span,
            );
            return None;
        }

        self.check_class_inheritance(parent);
        let parent_scope = self.ast.decl(parent).as_class().and_then(|class| class.members_scope)?;
        self.scopes.set_parent(class_scope, parent_scope);

        // A member whose name also appears in the direct superclass must be a method overriding
        // a method with an equivalent signature; everything else is a conflict.
        for &member in members {
            let member_name = self.ast.decl(member).id.name.clone();
            let Some(inherited) = self.scopes.search_local(parent_scope, &member_name) else {
                continue;
            };

            if self.ast.decl(member).is_function() && self.ast.decl(inherited).is_function() {
                if !self.signatures_match(member, inherited) {
                    let span = self.ast.decl(member).id.span.clone();
                    self.report(Error::OverrideMismatch { identifier: member_name }, &span);
                }
            } else {
                let span = self.ast.decl(member).id.span.clone();
                let inherited_span = self.ast.decl(inherited).id.span.clone();
                Diagnostic::new(Error::DeclarationConflict { identifier: member_name })
                    .set_span(&span)
                    .add_note("conflicts with the inherited declaration here", Some(&inherited_span))
                    .push_into(self.diagnostics);
            }
        }

        Some(extends.name.clone())
    }

    /// Returns true if following extends clauses from the class named `start` reaches `needle`.
    fn extends_chain_contains(&self, start: &str, needle: &str) -> bool {
        let mut visited = HashSet::new();
        let mut current = Some(start.to_owned());
        while let Some(name) = current {
            if name == needle {
                return true;
            }
            if !visited.insert(name.clone()) {
                // A cycle not involving `needle`; its classes report when their turn comes.
                return false;
            }
            current = self
                .types
                .get(&name)
                .and_then(|id| self.ast.decl(id).as_class())
                .and_then(|class| class.extends.as_ref())
                .map(|identifier| identifier.name.clone());
        }
        false
    }

    /// Registers an empty class under `identifier`'s name, standing in for a superclass that was
    /// never declared.
    fn add_placeholder_class(&mut self, identifier: &Identifier) {
        let scope = self.scopes.push(self.scopes.root());
        self.scopes.set_kind(scope, ScopeKind::Class);

        let mut class = ClassDecl::new(None, Vec::new(), Vec::new());
        class.checked = true;
        class.members_scope = Some(scope);

        let root = self.scopes.root();
        let decl = self.ast.add_decl(Decl {
            id: identifier.clone(),
            parent: None,
            scope: Some(root),
            kind: DeclKind::Class(class),
        });
        self.types.insert(identifier.name.clone(), decl);
    }

    /// P3 step 3 for one `implements` entry: the interface must exist, and any class member
    /// sharing a name with one of its methods must carry an equivalent signature. Missing
    /// methods are P4's concern.
    fn check_declared_interface(&mut self, interface_id: &Identifier, class_scope: ScopeId) {
        let Some(interface) = self.types.get(&interface_id.name) else {
            self.report(
                Error::IdentifierNotDeclared {
                    identifier: interface_id.name.clone(),
                    looking_for: LookingFor::Interface,
                },
                &interface_id.span,
            );
            return;
        };
        if !self.ast.decl(interface).is_interface() {
            return;
        }

        self.ensure_interface_scope(interface);
        let members = match self.ast.decl(interface).as_interface() {
            Some(interface) => interface.members.clone(),
            None => return,
        };

        for method in members {
            let method_name = self.ast.decl(method).id.name.clone();
            let Some(existing) = self.scopes.search_local(class_scope, &method_name) else {
                continue;
            };
            if self.ast.decl(existing).is_function() && !self.signatures_match(existing, method) {
                let span = self.ast.decl(existing).id.span.clone();
                self.report(Error::OverrideMismatch { identifier: method_name }, &span);
            }
        }
    }

    /// Builds an interface's member scope on first use (its own P3 turn, or a class's P3 that
    /// reaches it first).
    pub(super) fn ensure_interface_scope(&mut self, decl: DeclId) {
        let members = {
            let Some(interface) = self.ast.decl(decl).as_interface() else { return };
            if interface.members_scope.is_some() {
                return;
            }
            interface.members.clone()
        };

        let declared_in = match self.ast.decl(decl).scope {
            Some(scope) => scope,
            None => self.scopes.root(),
        };
        let scope = self.scopes.push(declared_in);
        if let DeclKind::Interface(interface) = &mut self.ast.decl_mut(decl).kind {
            interface.members_scope = Some(scope);
        }

        for member in members {
            self.declare(scope, member);
            self.ast.decl_mut(member).scope = Some(scope);
        }
    }

    /// Returns true if two function declarations have equivalent signatures: equivalent return
    /// types, equal arity, and pairwise equivalent formal types.
    pub(super) fn signatures_match(&self, a: DeclId, b: DeclId) -> bool {
        let (Some(fa), Some(fb)) = (self.ast.decl(a).as_function(), self.ast.decl(b).as_function()) else {
            return false;
        };

        if !fa.return_type.is_equivalent_to(&fb.return_type) || fa.formals.len() != fb.formals.len() {
            return false;
        }

        fa.formals.iter().zip(&fb.formals).all(|(&pa, &pb)| {
            match (self.ast.decl(pa).as_variable(), self.ast.decl(pb).as_variable()) {
                (Some(va), Some(vb)) => va.declared_type.is_equivalent_to(&vb.declared_type),
                _ => false,
            }
        })
    }

    /// P4: for each class, re-verifies that every method of every declared interface is
    /// implemented in the class's own scope with an equivalent signature.
    pub(super) fn check_implements(&mut self, decl: DeclId) {
        let (class_name, implements, class_scope) = {
            let class_decl = self.ast.decl(decl);
            let Some(class) = class_decl.as_class() else { return };
            let Some(scope) = class.members_scope else { return };
            (class_decl.id.name.clone(), class.implements.clone(), scope)
        };

        for interface_id in implements {
            let Some(interface) = self.types.get(&interface_id.name) else {
                continue;
            };
            let members = match self.ast.decl(interface).as_interface() {
                Some(interface) => interface.members.clone(),
                None => continue,
            };

            let mut implemented = true;
            for method in members {
                let method_name = self.ast.decl(method).id.name.clone();
                match self.scopes.search_local(class_scope, &method_name) {
                    Some(candidate) if self.ast.decl(candidate).is_function() => {
                        if !self.signatures_match(candidate, method) {
                            implemented = false;
                        }
                    }
                    _ => implemented = false,
                }
            }

            if !implemented {
                self.report(
                    Error::InterfaceNotImplemented {
                        class_identifier: class_name.clone(),
                        interface_identifier: interface_id.name.clone(),
                    },
                    &interface_id.span,
                );
            }
        }
    }
}
