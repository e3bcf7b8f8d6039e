// Copyright (c) ZeroC, Inc.

use crate::implement_diagnostic_functions;
use crate::utils::string_util::prefix_with_article;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    // ----------------  Generic Errors ---------------- //
    IO {
        action: &'static str,
        path: String,
        error: std::io::Error,
    },

    Syntax {
        message: String,
    },

    // ----------------  Declaration Errors ---------------- //
    /// An undefined name was used where a declaration of the stated kind was required.
    IdentifierNotDeclared {
        /// The name that could not be resolved.
        identifier: String,
        /// The kind of declaration the name was expected to resolve to.
        looking_for: LookingFor,
    },

    /// A name was declared twice in the same scope, or clashed with an inherited declaration.
    DeclarationConflict {
        /// The name that was redeclared.
        identifier: String,
    },

    // ----------------  Inheritance Errors ---------------- //
    /// A method override has a signature that differs from the method it overrides.
    OverrideMismatch {
        /// The name of the overriding method.
        identifier: String,
    },

    /// A class declares an interface but lacks a method with a matching signature.
    InterfaceNotImplemented {
        /// The name of the offending class.
        class_identifier: String,
        /// The name of the interface that is not fully implemented.
        interface_identifier: String,
    },

    /// A class appears in its own chain of superclasses.
    CyclicInheritance {
        /// The name of the class.
        identifier: String,
    },

    // ----------------  Expression Errors ---------------- //
    /// The operands of a binary operator have types the operator cannot be applied to.
    IncompatibleOperands {
        operator: String,
        left: String,
        right: String,
    },

    /// The operand of a unary operator has a type the operator cannot be applied to.
    IncompatibleOperand {
        operator: String,
        operand: String,
    },

    /// The subscript operator was applied to a non-array value.
    BracketsOnNonArray,

    /// An array subscript does not have integer type.
    SubscriptNotInteger,

    /// The size expression of a NewArray does not have integer type.
    NewArraySizeNotInteger,

    /// `this` was used outside of any class scope.
    ThisOutsideClassScope,

    /// A qualified access named a member the base's type does not have.
    FieldNotFoundInBase {
        field: String,
        base_type: String,
    },

    /// A field of another object was accessed from outside any class scope.
    InaccessibleField {
        field: String,
        base_type: String,
    },

    /// A call supplied the wrong number of arguments.
    NumArgsMismatch {
        function: String,
        expected: usize,
        given: usize,
    },

    /// A call argument is not convertible to the corresponding formal parameter. Positions are 1-based.
    ArgMismatch {
        position: usize,
        given: String,
        expected: String,
    },

    // ----------------  Statement Errors ---------------- //
    /// The test of an if, while, or for statement is not boolean.
    TestNotBoolean,

    /// A break statement appeared outside of any loop.
    BreakOutsideLoop,

    /// A return expression is not convertible to the enclosing function's return type.
    ReturnMismatch {
        given: String,
        expected: String,
    },

    /// A Print argument is not an int, bool, or string. Positions are 1-based.
    PrintArgMismatch {
        position: usize,
        given: String,
    },

    // ----------------  Program Errors ---------------- //
    /// No global function named `main` was defined.
    NoMainFound,
}

implement_diagnostic_functions!(
    (
        "E001",
        IO,
        format!("unable to {action} '{path}': {error}"),
        action,
        path,
        error
    ),
    ("E002", Syntax, format!("{message}"), message),
    (
        "E003",
        IdentifierNotDeclared,
        format!(
            "no declaration found for {} named '{identifier}'",
            prefix_with_article(&looking_for.to_string()),
        ),
        identifier,
        looking_for
    ),
    (
        "E004",
        DeclarationConflict,
        format!("redefinition of '{identifier}'"),
        identifier
    ),
    (
        "E005",
        OverrideMismatch,
        format!("method '{identifier}' overrides an inherited method with an incompatible signature"),
        identifier
    ),
    (
        "E006",
        InterfaceNotImplemented,
        format!("class '{class_identifier}' does not implement all of interface '{interface_identifier}'"),
        class_identifier,
        interface_identifier
    ),
    (
        "E007",
        CyclicInheritance,
        format!("class '{identifier}' is its own ancestor"),
        identifier
    ),
    (
        "E008",
        IncompatibleOperands,
        format!("incompatible operands: {left} {operator} {right}"),
        operator,
        left,
        right
    ),
    (
        "E009",
        IncompatibleOperand,
        format!("incompatible operand: {operator} {operand}"),
        operator,
        operand
    ),
    ("E010", BracketsOnNonArray, "[] can only be applied to arrays"),
    ("E011", SubscriptNotInteger, "array subscript must be an integer"),
    ("E012", NewArraySizeNotInteger, "size for NewArray must be an integer"),
    ("E013", ThisOutsideClassScope, "'this' is only valid within class scope"),
    (
        "E014",
        FieldNotFoundInBase,
        format!("'{base_type}' has no member named '{field}'"),
        field,
        base_type
    ),
    (
        "E015",
        InaccessibleField,
        format!("'{base_type}' member '{field}' is inaccessible outside of class scope"),
        field,
        base_type
    ),
    (
        "E016",
        NumArgsMismatch,
        format!("function '{function}' expects {expected} argument(s) but {given} given"),
        function,
        expected,
        given
    ),
    (
        "E017",
        ArgMismatch,
        format!("incompatible argument {position}: {given} given, {expected} expected"),
        position,
        given,
        expected
    ),
    ("E018", TestNotBoolean, "test expression must have boolean type"),
    ("E019", BreakOutsideLoop, "break is only allowed inside a loop"),
    (
        "E020",
        ReturnMismatch,
        format!("incompatible return: {given} given, {expected} expected"),
        given,
        expected
    ),
    (
        "E021",
        PrintArgMismatch,
        format!("incompatible argument {position}: {given} given, int/bool/string expected"),
        position,
        given
    ),
    ("E022", NoMainFound, "no function 'main' defined in the program")
);

/// The kind of declaration an unresolved name was expected to resolve to.
/// Only used to phrase [IdentifierNotDeclared](Error::IdentifierNotDeclared) messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LookingFor {
    Variable,
    Function,
    Class,
    Interface,
    Type,
}

impl fmt::Display for LookingFor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LookingFor::Variable => "variable",
            LookingFor::Function => "function",
            LookingFor::Class => "class",
            LookingFor::Interface => "interface",
            LookingFor::Type => "type",
        })
    }
}
