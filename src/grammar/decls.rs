// Copyright (c) ZeroC, Inc.

use super::Type;
use crate::ast::{DeclId, NodeRef, StmtId};
use crate::scope::ScopeId;
use crate::source_file::Span;
use crate::tac::MemLocation;

/// A name appearing in the source text.
///
/// Identifiers compare equal by name alone; the span exists purely so diagnostics can point at
/// the mention that triggered them.
#[derive(Clone, Debug)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Identifier { name: name.into(), span }
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// A declaration: one of the four kinds of named entities a Decaf program can introduce.
#[derive(Debug)]
pub struct Decl {
    pub id: Identifier,
    /// Back-link to the owning node, patched in after parsing. Used only for upward walks.
    pub parent: Option<NodeRef>,
    /// The scope this declaration's name was introduced into, set during analysis.
    pub scope: Option<ScopeId>,
    pub kind: DeclKind,
}

impl Decl {
    pub fn as_variable(&self) -> Option<&VariableDecl> {
        match &self.kind {
            DeclKind::Variable(variable) => Some(variable),
            _ => None,
        }
    }

    pub fn as_variable_mut(&mut self) -> Option<&mut VariableDecl> {
        match &mut self.kind {
            DeclKind::Variable(variable) => Some(variable),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDecl> {
        match &self.kind {
            DeclKind::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_function_mut(&mut self) -> Option<&mut FunctionDecl> {
        match &mut self.kind {
            DeclKind::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassDecl> {
        match &self.kind {
            DeclKind::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut ClassDecl> {
        match &mut self.kind {
            DeclKind::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&InterfaceDecl> {
        match &self.kind {
            DeclKind::Interface(interface) => Some(interface),
            _ => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.kind, DeclKind::Variable(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, DeclKind::Function(_))
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind, DeclKind::Class(_))
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, DeclKind::Interface(_))
    }

    /// The type a mention of this declaration's name resolves to: a variable's current (shadow)
    /// type, a function's return type, or the named type of a class or interface.
    pub fn resolved_type(&self) -> Type {
        match &self.kind {
            DeclKind::Variable(variable) => variable.shadow_type.clone(),
            DeclKind::Function(function) => function.return_type.clone(),
            DeclKind::Class(_) | DeclKind::Interface(_) => Type::Named(self.id.clone()),
        }
    }
}

#[derive(Debug)]
pub enum DeclKind {
    Variable(VariableDecl),
    Function(FunctionDecl),
    Class(ClassDecl),
    Interface(InterfaceDecl),
}

#[derive(Debug)]
pub struct VariableDecl {
    /// The type the variable was declared with. Immutable after parsing.
    pub declared_type: Type,
    /// The variable's currently inferred type. Starts equal to the declared type; flow analysis
    /// narrows it at assignment sites, and type-resolution failures collapse it to `error`.
    pub shadow_type: Type,
    /// Where the variable lives at runtime, assigned during code generation.
    pub location: Option<MemLocation>,
}

impl VariableDecl {
    pub fn new(declared_type: Type) -> Self {
        let shadow_type = declared_type.clone();
        VariableDecl {
            declared_type,
            shadow_type,
            location: None,
        }
    }
}

#[derive(Debug)]
pub struct FunctionDecl {
    pub return_type: Type,
    /// Formal parameters, in declaration order. Always variable declarations.
    pub formals: Vec<DeclId>,
    /// Absent for interface method prototypes.
    pub body: Option<StmtId>,
    /// The scope holding the formals, created in P2 for global functions and in P5 for methods.
    pub body_scope: Option<ScopeId>,
    /// The label this method occupies in its class's vtable, set during code generation.
    pub vtable_label: Option<String>,
}

impl FunctionDecl {
    pub fn new(return_type: Type, formals: Vec<DeclId>) -> Self {
        FunctionDecl {
            return_type,
            formals,
            body: None,
            body_scope: None,
            vtable_label: None,
        }
    }
}

#[derive(Debug)]
pub struct ClassDecl {
    pub extends: Option<Identifier>,
    pub implements: Vec<Identifier>,
    /// Fields and methods, in declaration order.
    pub members: Vec<DeclId>,
    /// The scope holding the class members, created in P3.
    pub members_scope: Option<ScopeId>,
    /// Guards P3 against revisiting a class that was already processed.
    pub checked: bool,
    /// Object and vtable layout, computed once during code generation.
    pub layout: Option<ClassLayout>,
}

impl ClassDecl {
    pub fn new(extends: Option<Identifier>, implements: Vec<Identifier>, members: Vec<DeclId>) -> Self {
        ClassDecl {
            extends,
            implements,
            members,
            members_scope: None,
            checked: false,
            layout: None,
        }
    }
}

#[derive(Debug)]
pub struct InterfaceDecl {
    /// Method prototypes, in declaration order. Always function declarations without bodies.
    pub members: Vec<DeclId>,
    /// The scope holding the prototypes, created in P3.
    pub members_scope: Option<ScopeId>,
}

impl InterfaceDecl {
    pub fn new(members: Vec<DeclId>) -> Self {
        InterfaceDecl {
            members,
            members_scope: None,
        }
    }
}

/// The runtime layout of a class: which object slot each field occupies and which vtable slot
/// each method occupies. Slot 0 of every object holds the vtable pointer, so fields start at
/// slot 1. Inherited fields and methods keep the slots they have in the superclass; an override
/// replaces the inherited vtable entry in place, and a new method extends the vtable.
#[derive(Clone, Debug, Default)]
pub struct ClassLayout {
    /// Field names in slot order; the field at index i lives in object slot i + 1.
    pub fields: Vec<String>,
    /// The vtable: method names and the labels dispatched through each slot.
    pub vtable: Vec<VtableEntry>,
}

#[derive(Clone, Debug)]
pub struct VtableEntry {
    pub method: String,
    pub label: String,
}

impl ClassLayout {
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the object slot of the named field. Slots are word-indexed; slot 0 is the vtable.
    pub fn field_slot(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field == name).map(|i| i + 1)
    }

    /// Returns the vtable slot of the named method.
    pub fn method_slot(&self, name: &str) -> Option<usize> {
        self.vtable.iter().position(|entry| entry.method == name)
    }

    /// The labels in the vtable, in slot order.
    pub fn method_labels(&self) -> Vec<String> {
        self.vtable.iter().map(|entry| entry.label.clone()).collect()
    }
}
