// Copyright (c) ZeroC, Inc.

//! The scoped symbol table: an arena of name→declaration maps linked into a tree, plus the flat
//! type-name table that records classes and interfaces outside of scope nesting.

use crate::ast::DeclId;
use std::collections::HashMap;

/// Index of a [Scope] in the [Scopes] arena.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ScopeId(usize);

/// Distinguishes scopes opened inside a class body from everything else. The kind propagates to
/// child scopes, so "is this scope inside a class?" is a single tag check on the current scope.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScopeKind {
    Global,
    Class,
}

#[derive(Debug)]
pub struct Scope {
    symbols: HashMap<String, DeclId>,
    parent: Option<ScopeId>,
    kind: ScopeKind,
}

/// The arena of all scopes created during a compilation. The root scope (the global scope) is
/// created up front; every other scope is pushed under an existing one and is never destroyed,
/// since AST nodes keep pointing into the tree for the rest of the compilation.
#[derive(Debug)]
pub struct Scopes {
    scopes: Vec<Scope>,
}

impl Default for Scopes {
    fn default() -> Self {
        Scopes::new()
    }
}

impl Scopes {
    pub fn new() -> Self {
        let root = Scope {
            symbols: HashMap::new(),
            parent: None,
            kind: ScopeKind::Global,
        };
        Scopes { scopes: vec![root] }
    }

    /// The global scope.
    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Creates a new scope under `parent`, inheriting the parent's kind.
    pub fn push(&mut self, parent: ScopeId) -> ScopeId {
        let kind = self.scopes[parent.0].kind;
        self.scopes.push(Scope {
            symbols: HashMap::new(),
            parent: Some(parent),
            kind,
        });
        ScopeId(self.scopes.len() - 1)
    }

    /// Returns the parent of `scope`, if it has one.
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.0].parent
    }

    /// Re-parents `scope`. Used in P3 to chain a subclass's member scope under its superclass's.
    pub fn set_parent(&mut self, scope: ScopeId, parent: ScopeId) {
        self.scopes[scope.0].parent = Some(parent);
    }

    pub fn kind(&self, scope: ScopeId) -> ScopeKind {
        self.scopes[scope.0].kind
    }

    pub fn set_kind(&mut self, scope: ScopeId, kind: ScopeKind) {
        self.scopes[scope.0].kind = kind;
    }

    /// Returns true if `scope` is inside a class body (directly or transitively).
    pub fn is_in_class_scope(&self, scope: ScopeId) -> bool {
        self.kind(scope) == ScopeKind::Class
    }

    /// Inserts a name without any conflict checking, shadowing any previous occupant.
    pub fn insert(&mut self, scope: ScopeId, name: impl Into<String>, decl: DeclId) {
        self.scopes[scope.0].symbols.insert(name.into(), decl);
    }

    /// Looks a name up in `scope` alone, without walking parents.
    pub fn search_local(&self, scope: ScopeId, name: &str) -> Option<DeclId> {
        self.scopes[scope.0].symbols.get(name).copied()
    }

    /// Looks a name up in `scope` and all of its ancestors, innermost first.
    pub fn search(&self, scope: ScopeId, name: &str) -> Option<DeclId> {
        let mut current = Some(scope);
        while let Some(scope) = current {
            if let Some(decl) = self.search_local(scope, name) {
                return Some(decl);
            }
            current = self.parent(scope);
        }
        None
    }

    /// Looks a name up in at most `frames` scopes, starting from `scope` and walking outward.
    /// Used by the code generator to tell a local or parameter apart from an implicit `this`
    /// field: the search is bounded by the enclosing function's scope.
    pub fn search_bounded(&self, scope: ScopeId, name: &str, frames: usize) -> Option<DeclId> {
        let mut current = Some(scope);
        for _ in 0..frames {
            let scope = current?;
            if let Some(decl) = self.search_local(scope, name) {
                return Some(decl);
            }
            current = self.parent(scope);
        }
        None
    }

    /// Counts the scopes from `scope` up to and including `ancestor`.
    /// Returns None if `ancestor` is not on `scope`'s parent chain.
    pub fn frames_up_to(&self, scope: ScopeId, ancestor: ScopeId) -> Option<usize> {
        let mut frames = 1;
        let mut current = Some(scope);
        while let Some(scope) = current {
            if scope == ancestor {
                return Some(frames);
            }
            frames += 1;
            current = self.parent(scope);
        }
        None
    }
}

/// The flat name→declaration map recording every type name in the program (classes and
/// interfaces). Unlike [Scopes] it has no nesting: type names are global in Decaf.
#[derive(Debug, Default)]
pub struct TypeTable {
    types: HashMap<String, DeclId>,
}

impl TypeTable {
    pub fn new() -> Self {
        TypeTable::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, decl: DeclId) {
        self.types.insert(name.into(), decl);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<DeclId> {
        self.types.get(name).copied()
    }
}
