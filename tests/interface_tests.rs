// Copyright (c) ZeroC, Inc.

mod test_helpers;

use crate::test_helpers::*;
use decafc::diagnostics::{Error, LookingFor};

#[test]
fn a_missing_method_fails_the_interface() {
    // Arrange
    let source = "
        interface I { int g(); }
        class C implements I { int f() { return 1; } }
        void main() {}
    ";

    // Act
    let diagnostics = parse_for_diagnostics(source);

    // Assert
    let expected = Error::InterfaceNotImplemented {
        class_identifier: "C".to_owned(),
        interface_identifier: "I".to_owned(),
    };
    check_diagnostics(diagnostics, [expected]);
}

#[test]
fn a_mismatched_signature_fails_the_interface() {
    // Arrange: the method exists but under the wrong signature, so the inheritance pass flags
    // the override and the implements pass still finds the interface unsatisfied.
    let source = "
        interface I { int g(); }
        class C implements I { bool g() { return true; } }
        void main() {}
    ";

    // Act
    let diagnostics = parse_for_diagnostics(source);

    // Assert
    let expected = [
        Error::OverrideMismatch {
            identifier: "g".to_owned(),
        },
        Error::InterfaceNotImplemented {
            class_identifier: "C".to_owned(),
            interface_identifier: "I".to_owned(),
        },
    ];
    check_diagnostics(diagnostics, expected);
}

#[test]
fn an_undeclared_interface_is_reported() {
    // Arrange
    let source = "
        class C implements J { }
        void main() {}
    ";

    // Act
    let diagnostics = parse_for_diagnostics(source);

    // Assert
    let expected = Error::IdentifierNotDeclared {
        identifier: "J".to_owned(),
        looking_for: LookingFor::Interface,
    };
    check_diagnostics(diagnostics, [expected]);
}

#[test]
fn a_satisfied_interface_compiles() {
    assert_parses(
        "
        interface I {
            int g();
            void h(int x);
        }
        class C implements I {
            int g() { return 1; }
            void h(int x) { Print(x); }
        }
        void main() {}
    ",
    );
}

#[test]
fn interface_typed_variables_accept_implementors() {
    assert_parses(
        "
        interface I { int g(); }
        class C implements I { int g() { return 1; } }
        void main() {
            I i;
            i = new C;
            Print(i.g());
        }
    ",
    );
}

#[test]
fn interfaces_are_satisfied_per_class_not_per_hierarchy() {
    // A method inherited from a superclass does not satisfy an interface; the implementing
    // class must declare it itself.
    let source = "
        interface I { int g(); }
        class A { int g() { return 1; } }
        class C extends A implements I { }
        void main() {}
    ";

    let diagnostics = parse_for_diagnostics(source);

    let expected = Error::InterfaceNotImplemented {
        class_identifier: "C".to_owned(),
        interface_identifier: "I".to_owned(),
    };
    check_diagnostics(diagnostics, [expected]);
}
