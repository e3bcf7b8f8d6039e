// Copyright (c) ZeroC, Inc.

use super::Identifier;
use crate::inheritance::InheritanceRegistry;
use std::fmt;

/// The type of a Decaf value.
///
/// Primitive types are unit variants and are shared by copying. `Named` covers both classes and
/// interfaces; which one a name refers to is a property of the declaration it resolves to, not of
/// the type value. `Error` is the absorbing sentinel type: it is convertible from and to
/// everything, which suppresses cascades of diagnostics once a subtree is known to be ill-typed.
#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    Int,
    Double,
    Bool,
    String,
    Void,
    Null,
    Error,
    Named(Identifier),
    Array(Box<Type>),
}

impl Type {
    /// Returns true if the two types are equivalent: by name for primitives and named types,
    /// structurally over the element type for arrays. Equivalence is reflexive and symmetric.
    pub fn is_equivalent_to(&self, other: &Type) -> bool {
        self == other
    }

    /// Returns true if a value of this type is implicitly convertible to `other`.
    ///
    /// Convertibility subsumes equivalence and adds the directional rules: `error` converts in
    /// both directions with anything, `null` converts to any named type, a named type converts to
    /// an ancestor class or to an interface implemented anywhere along its ancestor chain, and
    /// arrays convert element-wise.
    pub fn is_convertible_to(&self, other: &Type, registry: &InheritanceRegistry) -> bool {
        if self.is_equivalent_to(other) || self.is_error() || other.is_error() {
            return true;
        }

        match (self, other) {
            (Type::Null, Type::Named(_)) => true,
            (Type::Named(sub), Type::Named(sup)) => {
                registry.is_subclass_of(&sup.name, &sub.name) || registry.is_interface_of(&sup.name, &sub.name)
            }
            (Type::Array(from), Type::Array(to)) => from.is_convertible_to(to, registry),
            _ => false,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Type::Named(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    /// Returns the element type if this is an array type.
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the identifier if this is a named type.
    pub fn named_identifier(&self) -> Option<&Identifier> {
        match self {
            Type::Named(identifier) => Some(identifier),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => f.write_str("int"),
            Type::Double => f.write_str("double"),
            Type::Bool => f.write_str("bool"),
            Type::String => f.write_str("string"),
            Type::Void => f.write_str("void"),
            Type::Null => f.write_str("null"),
            Type::Error => f.write_str("error"),
            Type::Named(identifier) => f.write_str(&identifier.name),
            Type::Array(element) => write!(f, "{element}[]"),
        }
    }
}
