#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use kiln_ir::{ExprKind, SharedSymbols};
use pretty_assertions::assert_eq;

use super::*;
use crate::error::SemaError;

fn builder() -> Builder {
    Builder::new(SharedSymbols::new())
}

fn conversion(b: &Builder, e: ExprId) -> (ConversionKind, ExprId) {
    match b.expr(e).kind {
        ExprKind::Conversion { kind, source } => (kind, source),
        ref other => panic!("expected a conversion, found {other:?}"),
    }
}

#[test]
fn identity_needs_no_node() {
    let mut b = builder();
    let five = b.get_int(5);
    let int = b.get_int_type();
    assert_eq!(standard_conversion(&mut b, five, int).unwrap(), five);

    // Top-level qualifiers of the target do not matter.
    let cint = b.get_const_type(int);
    assert_eq!(standard_conversion(&mut b, five, cint).unwrap(), five);
}

#[test]
fn lvalues_are_value_converted_first() {
    let mut b = builder();
    let int = b.get_int_type();
    let cint = b.get_const_type(int);
    let x = b.get_id("x");
    let x = b.make_variable(x, cint);
    let r = b.make_reference(x).unwrap();

    let converted = standard_conversion(&mut b, r, int).unwrap();
    assert_eq!(conversion(&b, converted), (ConversionKind::Value, r));
    assert_eq!(b.expr_type(converted), int);
}

#[test]
fn arithmetic_conversions() {
    let mut b = builder();
    let five = b.get_int(5);
    let uint = b.get_uint_type();

    let to_bool = standard_conversion(&mut b, five, TypeId::BOOL).unwrap();
    assert_eq!(conversion(&b, to_bool), (ConversionKind::Boolean, five));
    assert_eq!(b.expr_type(to_bool), TypeId::BOOL);

    let to_uint = standard_conversion(&mut b, five, uint).unwrap();
    assert_eq!(conversion(&b, to_uint).0, ConversionKind::Integer);

    let to_float = standard_conversion(&mut b, five, TypeId::FLOAT).unwrap();
    assert_eq!(conversion(&b, to_float).0, ConversionKind::Float);

    let yes = b.get_true();
    let from_bool = standard_conversion(&mut b, yes, uint).unwrap();
    assert_eq!(conversion(&b, from_bool).0, ConversionKind::Integer);
}

#[test]
fn pointers_gain_qualifiers_and_test_as_bool() {
    let mut b = builder();
    let int = b.get_int_type();
    let cint = b.get_const_type(int);
    let p = b.get_pointer_type(int);
    let pc = b.get_pointer_type(cint);
    let v = b.get_id("p");
    let v = b.make_variable(v, p);
    let r = b.make_reference(v).unwrap();

    let qualified = standard_conversion(&mut b, r, pc).unwrap();
    assert_eq!(conversion(&b, qualified).0, ConversionKind::Qualification);
    assert_eq!(b.expr_type(qualified), pc);

    let tested = contextual_bool(&mut b, r).unwrap();
    assert_eq!(conversion(&b, tested).0, ConversionKind::Boolean);
}

#[test]
fn qualifiers_cannot_be_dropped_through_pointers() {
    let mut b = builder();
    let int = b.get_int_type();
    let cint = b.get_const_type(int);
    let p = b.get_pointer_type(int);
    let pc = b.get_pointer_type(cint);
    let v = b.get_id("pc");
    let v = b.make_variable(v, pc);
    let r = b.make_reference(v).unwrap();

    let err = standard_conversion(&mut b, r, p).unwrap_err();
    assert_eq!(
        err,
        SemaError::Type(TypeError::NoConversion { from: pc, to: p })
    );
}

#[test]
fn void_does_not_convert() {
    let mut b = builder();
    let five = b.get_int(5);
    assert!(matches!(
        standard_conversion(&mut b, five, TypeId::VOID),
        Err(SemaError::Type(TypeError::NoConversion { .. }))
    ));
}

#[test]
fn dependent_operands_convert_later() {
    let mut b = builder();
    let t = b.get_id("T");
    let t = b.make_type_parameter(t);
    let t_ty = b.get_typename_type(t).unwrap();
    let x = b.get_id("x");
    let x = b.make_object_parm(x, t_ty);
    let r = b.make_reference(x).unwrap();

    let cond = contextual_bool(&mut b, r).unwrap();
    assert_eq!(conversion(&b, cond), (ConversionKind::Dependent, r));
    assert_eq!(b.expr_type(cond), TypeId::BOOL);
}

#[test]
fn common_types() {
    let mut b = builder();
    let int = b.get_int_type();
    let uint = b.get_uint_type();
    let long = b.get_integer_type(true, 64);

    assert_eq!(common_arithmetic_type(&mut b, TypeId::BOOL, TypeId::BOOL), Some(int));
    assert_eq!(common_arithmetic_type(&mut b, int, uint), Some(uint));
    assert_eq!(common_arithmetic_type(&mut b, uint, long), Some(long));
    assert_eq!(
        common_arithmetic_type(&mut b, int, TypeId::FLOAT),
        Some(TypeId::FLOAT)
    );
    let p = b.get_pointer_type(int);
    assert_eq!(common_arithmetic_type(&mut b, int, p), None);
}
