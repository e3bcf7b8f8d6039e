// Copyright (c) ZeroC, Inc.

mod test_helpers;

use crate::test_helpers::*;
use decafc::diagnostics::Error;

mod tests_must_be_boolean {
    use super::*;
    use test_case::test_case;

    #[test_case("if (3) Print(1);"; "if")]
    #[test_case("while (3) Print(1);"; "while")]
    #[test_case("for (; 3; ) Print(1);"; "for")]
    fn a_non_boolean_test_is_reported(statement: &str) {
        // Arrange
        let source = format!(
            "
            void main() {{
                {statement}
            }}
        "
        );

        // Act
        let diagnostics = parse_for_diagnostics(&source);

        // Assert
        check_diagnostics(diagnostics, [Error::TestNotBoolean]);
    }

    #[test]
    fn boolean_tests_are_accepted() {
        assert_parses(
            "
            void main() {
                int i;
                for (i = 0; i < 10; i = i + 1) {
                    if (i == 5) Print(i);
                }
                while (i < 20) i = i + 1;
            }
        ",
        );
    }
}

mod breaks {
    use super::*;

    #[test]
    fn break_outside_any_loop_is_reported() {
        // Arrange
        let source = "
            void main() {
                break;
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        check_diagnostics(diagnostics, [Error::BreakOutsideLoop]);
    }

    #[test]
    fn break_inside_a_conditional_still_finds_its_loop() {
        assert_parses(
            "
            void main() {
                int i;
                i = 0;
                while (true) {
                    i = i + 1;
                    if (i > 3) break;
                }
            }
        ",
        );
    }
}

mod returns {
    use super::*;

    #[test]
    fn return_values_must_convert_to_the_return_type() {
        // Arrange
        let source = "
            int f() { return true; }
            void main() {}
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::ReturnMismatch {
            given: "bool".to_owned(),
            expected: "int".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn an_empty_return_in_a_value_function_is_reported() {
        // Arrange
        let source = "
            int f() { return; }
            void main() {}
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::ReturnMismatch {
            given: "void".to_owned(),
            expected: "int".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn a_value_return_in_a_void_function_is_reported() {
        // Arrange
        let source = "
            void f() { return 5; }
            void main() {}
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::ReturnMismatch {
            given: "int".to_owned(),
            expected: "void".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn subtype_returns_are_accepted() {
        assert_parses(
            "
            class A { }
            class B extends A { }
            A make() { return new B; }
            void main() {}
        ",
        );
    }
}

mod prints {
    use super::*;

    #[test]
    fn unprintable_arguments_are_reported_with_their_position() {
        // Arrange
        let source = "
            void main() {
                double d;
                d = 1.0;
                Print(1, d, \"text\");
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::PrintArgMismatch {
            position: 2,
            given: "double".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn int_bool_and_string_arguments_are_accepted() {
        assert_parses(
            "
            void main() {
                Print(42, true, \"hello\");
            }
        ",
        );
    }
}

mod program_gate {
    use super::*;

    #[test]
    fn a_program_without_main_is_reported() {
        // Arrange
        let source = "
            int x;
            void helper() {}
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        check_diagnostics(diagnostics, [Error::NoMainFound]);
    }

    #[test]
    fn a_class_named_main_does_not_count() {
        // Arrange
        let source = "
            class main { }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        check_diagnostics(diagnostics, [Error::NoMainFound]);
    }

    #[test]
    fn analysis_errors_mask_the_main_check() {
        // Arrange: the missing-main diagnostic only fires for otherwise-clean programs.
        let source = "
            void helper() {
                break;
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        check_diagnostics(diagnostics, [Error::BreakOutsideLoop]);
    }
}
