// Copyright (c) ZeroC, Inc.

mod test_helpers;

use crate::test_helpers::*;
use decafc::diagnostics::{Error, LookingFor};

mod members {
    use super::*;

    #[test]
    fn redeclaring_an_inherited_field_is_a_conflict() {
        // Arrange
        let source = "
            class A { int v; }
            class B extends A { int v; }
            void main() {}
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::DeclarationConflict {
            identifier: "v".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn a_method_cannot_replace_an_inherited_field() {
        // Arrange
        let source = "
            class A { int m; }
            class B extends A { int m() { return 1; } }
            void main() {}
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::DeclarationConflict {
            identifier: "m".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn an_override_must_keep_the_signature() {
        // Arrange
        let source = "
            class A { int f(int x) { return x; } }
            class B extends A { bool f(int x) { return true; } }
            void main() {}
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::OverrideMismatch {
            identifier: "f".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn a_matching_override_is_allowed() {
        assert_parses(
            "
            class A { int f(int x) { return x; } }
            class B extends A { int f(int y) { return y + 1; } }
            void main() {}
        ",
        );
    }

    #[test]
    fn inherited_methods_are_callable_through_the_subclass() {
        assert_parses(
            "
            class A { int f() { return 1; } }
            class B extends A { }
            void main() {
                B b;
                b = new B;
                Print(b.f());
            }
        ",
        );
    }
}

mod hierarchy {
    use super::*;

    #[test]
    fn an_undefined_superclass_is_reported_once() {
        // Arrange
        let source = "
            class B extends Missing { }
            void main() {}
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::IdentifierNotDeclared {
            identifier: "Missing".to_owned(),
            looking_for: LookingFor::Class,
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn a_class_cannot_extend_itself() {
        // Arrange
        let source = "
            class A extends A { }
            void main() {}
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::CyclicInheritance {
            identifier: "A".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn mutually_recursive_classes_are_both_reported() {
        // Arrange
        let source = "
            class A extends B { }
            class B extends A { }
            void main() {}
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = [
            Error::CyclicInheritance {
                identifier: "A".to_owned(),
            },
            Error::CyclicInheritance {
                identifier: "B".to_owned(),
            },
        ];
        check_diagnostics(diagnostics, expected);
    }

    #[test]
    fn a_subclass_declared_before_its_superclass_checks_once() {
        // B's inheritance pass pulls A's in early; A's own turn must then be a no-op,
        // producing no duplicate diagnostics.
        assert_parses(
            "
            class B extends A { int g() { return 1; } }
            class A { int f() { return 2; } }
            void main() {}
        ",
        );
    }

    #[test]
    fn subtype_values_flow_upward_only() {
        // Arrange: the second assignment goes the wrong way.
        let source = "
            class A { }
            class B extends A { }
            void main() {
                A a;
                B b;
                a = new B;
                b = new A;
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::IncompatibleOperands {
            operator: "=".to_owned(),
            left: "B".to_owned(),
            right: "A".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn a_downcast_narrows_the_shadow_type() {
        // `a` is declared as A but holds a B, so B's members are reachable through it.
        assert_parses(
            "
            class A { }
            class B extends A { int g() { return 1; } }
            void main() {
                A a;
                a = new B;
                Print(a.g());
            }
        ",
        );
    }
}
