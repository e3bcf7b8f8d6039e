// Copyright (c) ZeroC, Inc.

mod test_helpers;

use crate::test_helpers::*;

/// Returns the byte position of `needle` in `listing`, panicking with context when absent.
fn position_of(listing: &str, needle: &str) -> usize {
    match listing.find(needle) {
        Some(position) => position,
        None => panic!("expected the listing to contain {needle:?}, but it was:\n{listing}"),
    }
}

fn assert_contains(listing: &str, needle: &str) {
    position_of(listing, needle);
}

mod globals_and_functions {
    use super::*;

    #[test]
    fn globals_are_counted_and_accessed_by_name() {
        // Arrange/Act
        let listing = assert_compiles(
            "
            int x;
            int y;
            void main() {
                x = y + 3;
                Print(x);
            }
        ",
        );

        // Assert
        assert_contains(&listing, "global 2");
        assert_contains(&listing, "_main:");
        assert_contains(&listing, "_tmp0 = 3");
        assert_contains(&listing, "_tmp1 = y + _tmp0");
        assert_contains(&listing, "x = _tmp1");
        assert_contains(&listing, "PushParam x");
        assert_contains(&listing, "LCall _PrintInt");
        assert_contains(&listing, "PopParams 4");
    }

    #[test]
    fn a_program_without_globals_has_no_global_section() {
        let listing = assert_compiles("void main() { Print(1); }");
        assert!(!listing.contains("global"));
    }

    #[test]
    fn an_empty_main_still_frames_itself() {
        let listing = assert_compiles("void main() {}");
        assert_contains(&listing, "_main:");
        assert_contains(&listing, "BeginFunc 0");
        assert_contains(&listing, "EndFunc");
    }

    #[test]
    fn direct_calls_push_arguments_right_to_left() {
        // Arrange/Act
        let listing = assert_compiles(
            "
            int add(int a, int b) { return a + b; }
            void main() {
                Print(add(1, 2));
            }
        ",
        );

        // Assert: _tmp0 is minted inside _add; main loads 1 into _tmp1 and 2 into _tmp2,
        // and 2 is pushed first.
        let second = position_of(&listing, "PushParam _tmp2");
        let first = position_of(&listing, "PushParam _tmp1");
        assert!(second < first, "arguments should be pushed right-to-left:\n{listing}");
        assert_contains(&listing, "LCall _add");
        assert_contains(&listing, "PopParams 8");
    }

    #[test]
    fn emission_is_deterministic() {
        let source = "
            class A { int v; int f(int x) { return this.v + x; } }
            void main() {
                A a;
                a = new A;
                Print(a.f(5));
            }
        ";
        assert_eq!(assert_compiles(source), assert_compiles(source));
    }
}

mod classes {
    use super::*;

    #[test]
    fn methods_dispatch_through_the_vtable() {
        // Arrange/Act
        let listing = assert_compiles(
            "
            class A { int v; int f(int x) { return this.v + x; } }
            void main() {
                A a;
                a = new A;
                Print(a.f(5));
            }
        ",
        );

        // Assert: one vtable with one method; `new A` allocates two words (vtable + field) and
        // stores the vtable label; the call loads the vtable, pushes 5 then the receiver, and
        // pops both slots.
        assert_contains(&listing, "vtable A = [_A.f]");
        assert_contains(&listing, "_A.f:");
        assert_contains(&listing, "= 8");
        assert_contains(&listing, "LCall _Alloc");
        assert_contains(&listing, "= A");
        assert_contains(&listing, "= *(a)");
        assert_contains(&listing, "PushParam a");
        assert_contains(&listing, "ACall");
        assert_contains(&listing, "PopParams 8");

        // The receiver is pushed last.
        let argument = position_of(&listing, "PushParam _tmp5");
        let receiver = position_of(&listing, "PushParam a");
        assert!(argument < receiver, "the receiver should be pushed last:\n{listing}");
    }

    #[test]
    fn method_bodies_read_fields_through_the_receiver() {
        let listing = assert_compiles(
            "
            class C {
                int v;
                void set(int v) { this.v = v; }
                int get() { return v; }
            }
            void main() {
                C c;
                c = new C;
                c.set(5);
                Print(c.get());
            }
        ",
        );

        // Explicit `this.v` stores through the receiver; the bare `v` in get() reads back
        // through it, while the parameter `v` in set() stays a plain frame access.
        assert_contains(&listing, "*(this + 4) = v");
        assert_contains(&listing, "= *(this + 4)");
    }

    #[test]
    fn subclasses_extend_the_parent_layout() {
        let listing = assert_compiles(
            "
            class A { int a; int f() { return 1; } }
            class B extends A { int b; int g() { return 2; } int f() { return 3; } }
            void main() {
                B x;
                x = new B;
                Print(x.g());
            }
        ",
        );

        // B inherits A's field slot and f's vtable slot (overridden in place), and appends g.
        assert_contains(&listing, "vtable A = [_A.f]");
        assert_contains(&listing, "vtable B = [_B.f, _B.g]");
        // Two inherited-plus-own fields and the vtable slot: 12 bytes.
        assert_contains(&listing, "= 12");
        // g occupies vtable slot 1.
        assert_contains(&listing, "+ 4)");
    }

    #[test]
    fn inherited_methods_keep_the_parent_label() {
        let listing = assert_compiles(
            "
            class A { int f() { return 1; } }
            class B extends A { int g() { return 2; } }
            void main() {
                B x;
                x = new B;
                Print(x.f());
            }
        ",
        );

        assert_contains(&listing, "vtable B = [_A.f, _B.g]");
    }
}

mod arrays {
    use super::*;

    #[test]
    fn negative_sizes_trap_at_runtime() {
        // Arrange/Act
        let listing = assert_compiles(
            "
            void main() {
                int[] a;
                a = NewArray(-1, int);
                Print(a[0]);
            }
        ",
        );

        // Assert: the program compiles, and the emitted code carries both traps.
        assert_contains(&listing, "\"Decaf runtime error: Array size is negative\"");
        assert_contains(&listing, "\"Decaf runtime error: Array subscript out of bounds\"");
        assert_contains(&listing, "LCall _PrintString");
        assert_contains(&listing, "Halt");
        assert_contains(&listing, "IfZ");
    }

    #[test]
    fn length_reads_the_size_word_without_a_call() {
        let listing = assert_compiles(
            "
            void main() {
                int[] a;
                a = NewArray(3, int);
                Print(a.length());
            }
        ",
        );

        assert_contains(&listing, "= *(a + -4)");
        assert!(!listing.contains("ACall"), "length() must not dispatch:\n{listing}");
    }

    #[test]
    fn element_stores_are_bounds_checked() {
        let listing = assert_compiles(
            "
            void main() {
                int[] a;
                a = NewArray(2, int);
                a[1] = 9;
            }
        ",
        );

        // The store happens through a computed address, after the bounds check.
        let check = position_of(&listing, "IfZ");
        let trap = position_of(&listing, "Halt");
        assert!(check < trap);
        assert_contains(&listing, "\"Decaf runtime error: Array subscript out of bounds\"");
    }
}

mod strings_and_control_flow {
    use super::*;

    #[test]
    fn string_constants_are_interned_with_labels() {
        let listing = assert_compiles(
            "
            void main() {
                Print(\"hello\");
            }
        ",
        );

        assert_contains(&listing, "_string1: \"hello\"");
        assert_contains(&listing, "= _string1");
        assert_contains(&listing, "LCall _PrintString");
    }

    #[test]
    fn string_equality_calls_the_runtime() {
        let listing = assert_compiles(
            "
            void main() {
                string s;
                s = ReadLine();
                if (s == \"done\") Print(1);
            }
        ",
        );

        assert_contains(&listing, "LCall _StringEqual");
        assert_contains(&listing, "_string1: \"done\"");
    }

    #[test]
    fn if_branches_fall_through_to_then() {
        // Arrange/Act
        let listing = assert_compiles(
            "
            void main() {
                int x;
                x = 0;
                if (x < 1) x = 1; else x = 2;
            }
        ",
        );

        // Assert: the guard branches to the else label on false, so the then-body sits between
        // the branch and the else label.
        assert_contains(&listing, "IfZ _tmp2 Goto _L0");
        let then_body = position_of(&listing, "x = _tmp3");
        let else_label = position_of(&listing, "_L0:");
        assert!(then_body < else_label, "the then body should precede the else label:\n{listing}");
    }

    #[test]
    fn while_loops_jump_back_to_their_test() {
        let listing = assert_compiles(
            "
            void main() {
                while (true) { break; }
            }
        ",
        );

        assert_contains(&listing, "_L0:");
        assert_contains(&listing, "IfZ _tmp0 Goto _L1");
        assert_contains(&listing, "Goto _L0");
        // `break` jumps straight to the end label.
        assert_contains(&listing, "Goto _L1");
    }

    #[test]
    fn bools_print_through_their_own_builtin() {
        let listing = assert_compiles("void main() { Print(true); }");
        assert_contains(&listing, "LCall _PrintBool");
    }
}
