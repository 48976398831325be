//! Property tests for type canonicalization.
//!
//! 1. Qualifying twice is qualifying once by the union, and never nests.
//! 2. `non_reference_type(get_reference_type(T)) == T`.
//! 3. Structurally equal types built independently share one handle.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use kiln_ir::{Builder, Qualifiers, SharedSymbols, TypeId, TypeKind};
use proptest::prelude::*;

// -- Type Generation --

#[derive(Clone, Debug)]
enum Shape {
    Bool,
    Float,
    Int { signed: bool, precision: u16 },
    Pointer(Box<Shape>),
    Reference(Box<Shape>),
    Sequence(Box<Shape>),
    Qualified(Box<Shape>, u8),
    Function(Vec<Shape>, Box<Shape>),
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        Just(Shape::Bool),
        Just(Shape::Float),
        (any::<bool>(), prop::sample::select(vec![8u16, 16, 32, 64]))
            .prop_map(|(signed, precision)| Shape::Int { signed, precision }),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| Shape::Pointer(Box::new(s))),
            inner.clone().prop_map(|s| Shape::Reference(Box::new(s))),
            inner.clone().prop_map(|s| Shape::Sequence(Box::new(s))),
            (inner.clone(), 0u8..4).prop_map(|(s, q)| Shape::Qualified(Box::new(s), q)),
            (prop::collection::vec(inner.clone(), 0..3), inner)
                .prop_map(|(ps, r)| Shape::Function(ps, Box::new(r))),
        ]
    })
}

fn quals_strategy() -> impl Strategy<Value = Qualifiers> {
    (0u8..4).prop_map(Qualifiers::from_bits_truncate)
}

fn build(b: &mut Builder, shape: &Shape) -> TypeId {
    match shape {
        Shape::Bool => b.get_bool_type(),
        Shape::Float => b.get_float_type(),
        Shape::Int { signed, precision } => b.get_integer_type(*signed, *precision),
        Shape::Pointer(s) => {
            let t = build(b, s);
            b.get_pointer_type(t)
        }
        Shape::Reference(s) => {
            let t = build(b, s);
            b.get_reference_type(t)
        }
        Shape::Sequence(s) => {
            let t = build(b, s);
            b.get_sequence_type(t)
        }
        Shape::Qualified(s, q) => {
            let t = build(b, s);
            b.get_qualified_type(t, Qualifiers::from_bits_truncate(*q))
        }
        Shape::Function(params, ret) => {
            let ps: Vec<TypeId> = params.iter().map(|p| build(b, p)).collect();
            let r = build(b, ret);
            b.get_function_type_of(&ps, r)
        }
    }
}

proptest! {
    #[test]
    fn qualification_is_idempotent(shape in shape_strategy(), q1 in quals_strategy(), q2 in quals_strategy()) {
        let mut b = Builder::new(SharedSymbols::new());
        let t = build(&mut b, &shape);

        let twice = {
            let once = b.get_qualified_type(t, q1);
            b.get_qualified_type(once, q2)
        };
        let union = b.get_qualified_type(t, q1 | q2);
        prop_assert_eq!(twice, union);

        if let TypeKind::Qualified { base, quals } = b.ty(twice).clone() {
            prop_assert!(!b.is_qualified_type(base));
            prop_assert_eq!(quals, b.qualifiers(t) | q1 | q2);
        } else if b.is_reference_type(t) {
            prop_assert_eq!(twice, t);
        } else {
            prop_assert!((b.qualifiers(t) | q1 | q2).is_empty());
            prop_assert_eq!(twice, t);
        }
    }

    #[test]
    fn reference_round_trip(shape in shape_strategy()) {
        let mut b = Builder::new(SharedSymbols::new());
        let t = build(&mut b, &shape);
        let r = b.get_reference_type(t);
        prop_assert_eq!(b.non_reference_type(r), t);
    }

    #[test]
    fn equal_structure_shares_a_handle(shape in shape_strategy()) {
        let mut b = Builder::new(SharedSymbols::new());
        let t1 = build(&mut b, &shape);
        let count = b.type_count();
        let t2 = build(&mut b, &shape);
        prop_assert_eq!(t1, t2);
        prop_assert_eq!(b.type_count(), count);
    }
}
