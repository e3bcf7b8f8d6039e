// Copyright (c) ZeroC, Inc.

mod test_helpers;

use crate::test_helpers::*;
use decafc::diagnostics::{Error, LookingFor};

mod operators {
    use super::*;
    use test_case::test_case;

    #[test_case("+"; "addition")]
    #[test_case("-"; "subtraction")]
    #[test_case("*"; "multiplication")]
    #[test_case("/"; "division")]
    #[test_case("%"; "modulo")]
    fn arithmetic_rejects_mixed_operands(operator: &str) {
        // Arrange
        let source = format!(
            "
            void main() {{
                int i;
                bool b;
                b = false;
                i = i {operator} b;
            }}
        "
        );

        // Act
        let diagnostics = parse_for_diagnostics(&source);

        // Assert
        let expected = Error::IncompatibleOperands {
            operator: operator.to_owned(),
            left: "int".to_owned(),
            right: "bool".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test_case("+"; "addition")]
    #[test_case("%"; "modulo")]
    fn arithmetic_accepts_matching_ints(operator: &str) {
        assert_parses(&format!(
            "
            void main() {{
                int i;
                i = 4 {operator} 2;
                Print(i);
            }}
        "
        ));
    }

    #[test]
    fn arithmetic_accepts_matching_doubles() {
        assert_parses(
            "
            void main() {
                double d;
                d = 1.5 + 2.5;
                d = d * 2.0;
            }
        ",
        );
    }

    #[test]
    fn unary_minus_requires_a_numeric_operand() {
        // Arrange
        let source = "
            void main() {
                int i;
                i = -true;
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::IncompatibleOperand {
            operator: "-".to_owned(),
            operand: "bool".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test_case("<"; "less")]
    #[test_case("<="; "less equal")]
    #[test_case(">"; "greater")]
    #[test_case(">="; "greater equal")]
    fn relational_operators_yield_bool(operator: &str) {
        assert_parses(&format!(
            "
            void main() {{
                bool b;
                b = 1 {operator} 2;
            }}
        "
        ));
    }

    #[test]
    fn relational_operands_must_be_numeric() {
        // Arrange
        let source = "
            void main() {
                bool b;
                b = \"a\" < \"b\";
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::IncompatibleOperands {
            operator: "<".to_owned(),
            left: "string".to_owned(),
            right: "string".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn equality_requires_convertible_operands() {
        // Arrange
        let source = "
            void main() {
                bool b;
                b = 1 == true;
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::IncompatibleOperands {
            operator: "==".to_owned(),
            left: "int".to_owned(),
            right: "bool".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn null_compares_against_objects() {
        assert_parses(
            "
            class A { }
            void main() {
                A a;
                a = new A;
                if (a == null) Print(1);
            }
        ",
        );
    }

    #[test_case("&&"; "conjunction")]
    #[test_case("||"; "disjunction")]
    fn logical_operands_must_be_bool(operator: &str) {
        // Arrange
        let source = format!(
            "
            void main() {{
                bool b;
                b = true {operator} 3;
            }}
        "
        );

        // Act
        let diagnostics = parse_for_diagnostics(&source);

        // Assert
        let expected = Error::IncompatibleOperands {
            operator: operator.to_owned(),
            left: "bool".to_owned(),
            right: "int".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn one_bad_subtree_reports_once() {
        // Arrange: `3 * true` is ill-typed; the assignment built on it must stay quiet.
        let source = "
            void main() {
                int i;
                i = 3 * true;
                Print(i);
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::IncompatibleOperands {
            operator: "*".to_owned(),
            left: "int".to_owned(),
            right: "bool".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }
}

mod resolution {
    use super::*;

    #[test]
    fn every_expression_resolves_in_a_clean_program() {
        // Arrange/Act
        let state = compile(
            "
            class A { int v; int f(int x) { return this.v + x; } }
            void main() {
                A a;
                a = new A;
                Print(a.f(5));
            }
        ",
        );

        // Assert: no diagnostics, and no expression left with the error sentinel.
        assert!(!state.diagnostics.has_errors());
        for expr in state.ast.exprs() {
            assert!(
                !expr.resolved_type.is_error(),
                "expression resolved to error: {:?}",
                expr.kind
            );
        }
    }
}

mod assignments {
    use super::*;

    #[test]
    fn null_does_not_assign_to_primitives() {
        // Arrange
        let source = "
            void main() {
                int i;
                i = null;
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::IncompatibleOperands {
            operator: "=".to_owned(),
            left: "int".to_owned(),
            right: "null".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn null_does_not_assign_to_arrays() {
        // Arrange
        let source = "
            void main() {
                int[] a;
                a = null;
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::IncompatibleOperands {
            operator: "=".to_owned(),
            left: "int[]".to_owned(),
            right: "null".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn null_assigns_to_any_object_variable() {
        assert_parses(
            "
            class A { }
            void main() {
                A a;
                a = null;
            }
        ",
        );
    }
}

mod arrays {
    use super::*;

    #[test]
    fn subscripting_a_non_array_is_reported() {
        // Arrange
        let source = "
            void main() {
                int i;
                i = 3;
                Print(i[0]);
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        check_diagnostics(diagnostics, [Error::BracketsOnNonArray]);
    }

    #[test]
    fn subscripts_must_be_integers() {
        // Arrange
        let source = "
            void main() {
                int[] a;
                a = NewArray(4, int);
                Print(a[true]);
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        check_diagnostics(diagnostics, [Error::SubscriptNotInteger]);
    }

    #[test]
    fn new_array_sizes_must_be_integers() {
        // Arrange
        let source = "
            void main() {
                int[] a;
                a = NewArray(true, int);
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        check_diagnostics(diagnostics, [Error::NewArraySizeNotInteger]);
    }

    #[test]
    fn length_takes_no_arguments() {
        // Arrange
        let source = "
            void main() {
                int[] a;
                a = NewArray(4, int);
                Print(a.length(1));
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::NumArgsMismatch {
            function: "length".to_owned(),
            expected: 0,
            given: 1,
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn length_resolves_to_int_for_any_element_type() {
        assert_parses(
            "
            class A { }
            void main() {
                A[] objects;
                objects = NewArray(3, A);
                Print(objects.length());
            }
        ",
        );
    }
}

mod objects {
    use super::*;

    #[test]
    fn new_requires_a_class_name() {
        // Arrange
        let source = "
            void main() {
                int i;
                i = 3;
                i = new Widget;
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::IdentifierNotDeclared {
            identifier: "Widget".to_owned(),
            looking_for: LookingFor::Class,
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn this_is_rejected_outside_class_scope() {
        // Arrange
        let source = "
            void main() {
                Print(this);
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        check_diagnostics(diagnostics, [Error::ThisOutsideClassScope]);
    }

    #[test]
    fn fields_are_inaccessible_outside_class_scope() {
        // Arrange
        let source = "
            class A { int v; }
            void main() {
                A a;
                a = new A;
                Print(a.v);
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::InaccessibleField {
            field: "v".to_owned(),
            base_type: "A".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn fields_are_accessible_from_sibling_methods() {
        assert_parses(
            "
            class A {
                int v;
                int double_of(A other) { return other.v + other.v; }
            }
            void main() {}
        ",
        );
    }

    #[test]
    fn methods_are_callable_from_anywhere() {
        assert_parses(
            "
            class A {
                int v;
                int f(int x) { return this.v + x; }
            }
            void main() {
                A a;
                a = new A;
                Print(a.f(5));
            }
        ",
        );
    }

    #[test]
    fn an_unknown_member_is_reported_against_the_base_type() {
        // Arrange
        let source = "
            class A { int v; }
            class Holder {
                int probe(A a) { return a.w; }
            }
            void main() {}
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::FieldNotFoundInBase {
            field: "w".to_owned(),
            base_type: "A".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }
}

mod calls {
    use super::*;

    #[test]
    fn arity_mismatches_are_reported() {
        // Arrange
        let source = "
            int add(int a, int b) { return a + b; }
            void main() {
                Print(add(1));
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::NumArgsMismatch {
            function: "add".to_owned(),
            expected: 2,
            given: 1,
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn argument_types_are_checked_pairwise() {
        // Arrange
        let source = "
            int add(int a, int b) { return a + b; }
            void main() {
                Print(add(1, true));
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::ArgMismatch {
            position: 2,
            given: "bool".to_owned(),
            expected: "int".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn subtype_arguments_are_accepted() {
        assert_parses(
            "
            class A { }
            class B extends A { }
            void take(A a) {}
            void main() {
                take(new B);
            }
        ",
        );
    }

    #[test]
    fn read_builtins_have_fixed_types() {
        assert_parses(
            "
            void main() {
                int i;
                string s;
                i = ReadInteger();
                s = ReadLine();
                Print(i, s);
            }
        ",
        );
    }
}
