// Copyright (c) ZeroC, Inc.

mod test_helpers;

use crate::test_helpers::*;
use decafc::diagnostics::{Error, LookingFor};

mod conflicts {
    use super::*;

    #[test]
    fn duplicate_globals_are_rejected() {
        // Arrange
        let source = "
            int x;
            bool x;
            void main() {}
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::DeclarationConflict {
            identifier: "x".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn duplicate_parameters_are_rejected() {
        // Arrange
        let source = "
            void f(int a, bool a) {}
            void main() {}
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::DeclarationConflict {
            identifier: "a".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn duplicate_locals_are_rejected() {
        // Arrange
        let source = "
            void main() {
                int a;
                int a;
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::DeclarationConflict {
            identifier: "a".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn a_function_and_a_global_cannot_share_a_name() {
        // Arrange
        let source = "
            int f;
            void f() {}
            void main() {}
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::DeclarationConflict {
            identifier: "f".to_owned(),
        };
        check_diagnostics(diagnostics, [expected]);
    }
}

mod shadowing {
    use super::*;

    #[test]
    fn a_local_may_shadow_a_global() {
        assert_parses(
            "
            int x;
            void main() {
                bool x;
                x = true;
            }
        ",
        );
    }

    #[test]
    fn an_inner_block_may_shadow_an_outer_local() {
        assert_parses(
            "
            void main() {
                int x;
                x = 1;
                if (x < 2) {
                    bool x;
                    x = false;
                }
            }
        ",
        );
    }
}

mod unresolved_names {
    use super::*;

    #[test]
    fn a_global_of_unknown_type_is_reported_once() {
        // Arrange
        let source = "
            Widget w;
            void main() {}
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::IdentifierNotDeclared {
            identifier: "Widget".to_owned(),
            looking_for: LookingFor::Type,
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn a_local_of_unknown_type_suppresses_cascading_errors() {
        // Arrange: `w` collapses to the error type, so the assignment stays quiet.
        let source = "
            void main() {
                Widget w;
                w = 3;
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::IdentifierNotDeclared {
            identifier: "Widget".to_owned(),
            looking_for: LookingFor::Type,
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn an_undeclared_variable_mention_is_reported() {
        // Arrange
        let source = "
            void main() {
                Print(y);
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::IdentifierNotDeclared {
            identifier: "y".to_owned(),
            looking_for: LookingFor::Variable,
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn a_function_mentioned_as_a_variable_is_reported() {
        // Arrange
        let source = "
            void f() {}
            void main() {
                f = 3;
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::IdentifierNotDeclared {
            identifier: "f".to_owned(),
            looking_for: LookingFor::Variable,
        };
        check_diagnostics(diagnostics, [expected]);
    }

    #[test]
    fn a_call_to_an_undeclared_function_is_reported() {
        // Arrange
        let source = "
            void main() {
                g();
            }
        ";

        // Act
        let diagnostics = parse_for_diagnostics(source);

        // Assert
        let expected = Error::IdentifierNotDeclared {
            identifier: "g".to_owned(),
            looking_for: LookingFor::Function,
        };
        check_diagnostics(diagnostics, [expected]);
    }
}
