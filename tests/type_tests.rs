// Copyright (c) ZeroC, Inc.

use decafc::grammar::{Identifier, Type};
use decafc::inheritance::InheritanceRegistry;
use decafc::source_file::Span;

fn named(name: &str) -> Type {
    Type::Named(Identifier::new(name, Span::default()))
}

fn array_of(element: Type) -> Type {
    Type::Array(Box::new(element))
}

/// A registry modeling `class B {}`, `class A extends B implements I {}`.
fn sample_registry() -> InheritanceRegistry {
    let mut registry = InheritanceRegistry::new();
    registry.add("B", None, Vec::new());
    registry.add("A", Some("B".to_owned()), vec!["I".to_owned()]);
    registry
}

mod equivalence {
    use super::*;

    #[test]
    fn is_reflexive() {
        let types = [
            Type::Int,
            Type::Double,
            Type::Bool,
            Type::String,
            Type::Void,
            Type::Null,
            Type::Error,
            named("A"),
            array_of(Type::Int),
        ];
        for ty in &types {
            assert!(ty.is_equivalent_to(ty), "{ty} should be equivalent to itself");
        }
    }

    #[test]
    fn is_symmetric() {
        let pairs = [
            (Type::Int, Type::Double),
            (named("A"), named("B")),
            (named("A"), named("A")),
            (array_of(Type::Int), array_of(Type::Bool)),
        ];
        for (a, b) in &pairs {
            assert_eq!(a.is_equivalent_to(b), b.is_equivalent_to(a));
        }
    }

    #[test]
    fn named_types_compare_by_name_only() {
        let a = Type::Named(Identifier::new("A", Span::default()));
        let also_a = Type::Named(Identifier::new(
            "A",
            Span::new((4, 2).into(), (4, 3).into()),
        ));
        assert!(a.is_equivalent_to(&also_a));
        assert!(!a.is_equivalent_to(&named("B")));
    }

    #[test]
    fn arrays_are_structural() {
        assert!(array_of(Type::Int).is_equivalent_to(&array_of(Type::Int)));
        assert!(!array_of(Type::Int).is_equivalent_to(&array_of(Type::Double)));
        assert!(!array_of(Type::Int).is_equivalent_to(&Type::Int));
        assert!(array_of(array_of(named("A"))).is_equivalent_to(&array_of(array_of(named("A")))));
    }
}

mod convertibility {
    use super::*;

    #[test]
    fn error_absorbs_in_both_directions() {
        let registry = InheritanceRegistry::new();
        let types = [Type::Int, Type::Bool, named("A"), array_of(Type::Int), Type::Null];
        for ty in &types {
            assert!(Type::Error.is_convertible_to(ty, &registry));
            assert!(ty.is_convertible_to(&Type::Error, &registry));
        }
    }

    #[test]
    fn null_converts_to_named_types_only() {
        let registry = sample_registry();
        assert!(Type::Null.is_convertible_to(&named("A"), &registry));
        assert!(Type::Null.is_convertible_to(&named("Undefined"), &registry));
        assert!(!Type::Null.is_convertible_to(&Type::Int, &registry));
        assert!(!Type::Null.is_convertible_to(&Type::String, &registry));
        assert!(!Type::Null.is_convertible_to(&array_of(Type::Int), &registry));
    }

    #[test]
    fn subclass_converts_to_superclass_not_back() {
        let registry = sample_registry();
        assert!(named("A").is_convertible_to(&named("B"), &registry));
        assert!(!named("B").is_convertible_to(&named("A"), &registry));
    }

    #[test]
    fn class_converts_to_declared_interface() {
        let registry = sample_registry();
        assert!(named("A").is_convertible_to(&named("I"), &registry));
        assert!(!named("B").is_convertible_to(&named("I"), &registry));
    }

    #[test]
    fn interface_conversion_recurses_through_superclasses() {
        let mut registry = sample_registry();
        registry.add("C", Some("A".to_owned()), Vec::new());
        assert!(named("C").is_convertible_to(&named("I"), &registry));
        assert!(named("C").is_convertible_to(&named("B"), &registry));
    }

    #[test]
    fn arrays_convert_element_wise() {
        let registry = sample_registry();
        assert!(array_of(named("A")).is_convertible_to(&array_of(named("B")), &registry));
        assert!(!array_of(named("B")).is_convertible_to(&array_of(named("A")), &registry));
        assert!(!array_of(Type::Int).is_convertible_to(&Type::Int, &registry));
        assert!(!Type::Int.is_convertible_to(&array_of(Type::Int), &registry));
    }

    #[test]
    fn primitives_do_not_cross_convert() {
        let registry = InheritanceRegistry::new();
        assert!(!Type::Int.is_convertible_to(&Type::Double, &registry));
        assert!(!Type::Double.is_convertible_to(&Type::Int, &registry));
        assert!(!Type::Int.is_convertible_to(&Type::Bool, &registry));
        assert!(!Type::String.is_convertible_to(&Type::Int, &registry));
    }
}

mod registry {
    use super::*;

    #[test]
    fn subclass_query_walks_the_whole_chain() {
        let mut registry = sample_registry();
        registry.add("C", Some("A".to_owned()), Vec::new());
        assert!(registry.is_subclass_of("B", "C"));
        assert!(registry.is_subclass_of("A", "C"));
        assert!(!registry.is_subclass_of("C", "B"));
    }

    #[test]
    fn unregistered_classes_answer_nothing() {
        let registry = sample_registry();
        assert!(!registry.is_subclass_of("B", "Ghost"));
        assert!(!registry.is_interface_of("I", "Ghost"));
    }
}
