#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use pretty_assertions::assert_eq;

use super::*;
use crate::flags::{Qualifiers, TypeFlags};
use crate::term::{ConsKind, ExprKind, InitKind, TypeKind};

fn builder() -> Builder {
    Builder::new(SharedSymbols::new())
}

#[test]
fn global_singletons_are_stable() {
    let b = builder();
    assert_eq!(b.get_global_id(), b.get_global_id());
    assert_eq!(b.get_global_namespace(), DeclId::GLOBAL_NAMESPACE);
    assert_eq!(b.decl(b.get_global_namespace()).name, b.get_global_id());
}

#[test]
fn simple_ids_are_interned() {
    let mut b = builder();
    let x1 = b.get_id("x");
    let x2 = b.get_id("x");
    let y = b.get_id("y");
    assert_eq!(x1, x2);
    assert_ne!(x1, y);
}

#[test]
fn placeholder_ids_are_fresh() {
    let mut b = builder();
    assert_ne!(b.get_placeholder_id(), b.get_placeholder_id());
}

#[test]
fn int_types_follow_configured_precision() {
    let mut b = Builder::with_config(SharedSymbols::new(), BuildConfig { int_precision: 64 });
    let int = b.get_int_type();
    assert_eq!(
        b.ty(int),
        &TypeKind::Integer {
            signed: true,
            precision: 64
        }
    );
    assert_eq!(b.get_int_type(), int);
    assert_ne!(b.get_uint_type(), int);
}

#[test]
fn qualification_merges_instead_of_nesting() {
    let mut b = builder();
    let int = b.get_int_type();
    let c = b.get_const_type(int);
    let cv = b.get_volatile_type(c);

    assert_eq!(
        b.ty(cv),
        &TypeKind::Qualified {
            base: int,
            quals: Qualifiers::CONST_VOLATILE
        }
    );
    // Already covered: same handle.
    assert_eq!(b.get_const_type(cv), cv);
    assert_eq!(b.get_qualified_type(int, Qualifiers::empty()), int);
    assert_eq!(b.get_qualified_type(int, Qualifiers::CONST_VOLATILE), cv);
}

#[test]
fn references_drop_qualifiers() {
    let mut b = builder();
    let int = b.get_int_type();
    let r = b.get_reference_type(int);

    let cr = b.get_const_type(r);
    assert_eq!(cr, r);
    assert!(b.is_reference_type(cr));
    assert_eq!(b.non_reference_type(cr), int);
    assert_eq!(b.get_qualified_type(r, Qualifiers::CONST_VOLATILE), r);
}

#[test]
fn auto_types_are_distinct() {
    let mut b = builder();
    let a1 = b.get_auto_type();
    let a2 = b.get_auto_type();
    let d = b.get_declauto_type();
    assert_ne!(a1, a2);
    assert_ne!(a1, d);
    assert!(b.has_flag(a1, TypeFlags::HAS_PLACEHOLDER));
}

#[test]
fn function_type_from_parameters() {
    let mut b = builder();
    let int = b.get_int_type();
    let n = b.get_id("n");
    let m = b.get_id("m");
    let p1 = b.make_object_parm(n, int);
    let p2 = b.make_object_parm(m, TypeId::BOOL);

    let from_decls = b.get_function_type(&[p1, p2], TypeId::VOID).unwrap();
    let from_types = b.get_function_type_of(&[int, TypeId::BOOL], TypeId::VOID);
    assert_eq!(from_decls, from_types);
}

#[test]
fn function_type_rejects_type_parameters() {
    let mut b = builder();
    let t = b.get_id("T");
    let tp = b.make_type_parameter(t);
    assert!(matches!(
        b.get_function_type(&[tp], TypeId::VOID),
        Err(BuildError::Malformed { .. })
    ));
}

#[test]
fn unsupported_categories_are_not_yet_implemented() {
    let mut b = builder();
    let zero = b.get_int(0);
    let c = b.get_id("C");
    let class = b.make_class(c);

    assert_eq!(
        b.get_array_type(TypeId::BOOL, zero),
        Err(BuildError::NotYetImplemented(Feature::ArrayType))
    );
    assert_eq!(
        b.get_union_type(class),
        Err(BuildError::NotYetImplemented(Feature::UnionType))
    );
    assert_eq!(
        b.get_enum_type(class),
        Err(BuildError::NotYetImplemented(Feature::EnumType))
    );
    assert_eq!(
        b.get_decltype_type(zero),
        Err(BuildError::NotYetImplemented(Feature::DecltypeType))
    );
    assert_eq!(
        b.get_destructor_id(TypeId::BOOL),
        Err(BuildError::NotYetImplemented(Feature::DestructorId))
    );
}

#[test]
fn reference_expression_is_typed_reference_to_declared_type() {
    let mut b = builder();
    let int = b.get_int_type();
    let x = b.get_id("x");
    let var = b.make_variable(x, int);
    let e = b.make_reference(var).unwrap();

    let int_ref = b.get_reference_type(int);
    assert_eq!(b.expr_type(e), int_ref);
    assert_eq!(b.expr(e).kind, ExprKind::Reference(var));
}

#[test]
fn reference_to_class_is_malformed() {
    let mut b = builder();
    let c = b.get_id("C");
    let class = b.make_class(c);
    assert!(b.make_reference(class).is_err());
}

#[test]
fn template_reference_is_dependent() {
    let mut b = builder();
    let t = b.get_id("T");
    let tp = b.make_type_parameter(t);
    let tt = b.get_typename_type(tp).unwrap();
    let x = b.get_id("x");
    let parm = b.make_object_parm(x, tt);
    let f = b.get_id("f");
    let func = b.make_function(f, &[parm], tt).unwrap();
    let temp = b.make_template(&[tp], func);

    let r = b.make_template_reference(temp).unwrap();
    assert!(b.is_type_dependent(r));
    assert_eq!(b.decl(temp).name, f);
}

#[test]
fn call_records_type_without_checking() {
    let mut b = builder();
    let one = b.get_int(1);
    let e = b.make_call(TypeId::FLOAT, one, &[one]);
    assert_eq!(b.expr_type(e), TypeId::FLOAT);
    assert_eq!(
        b.expr(e).kind,
        ExprKind::Call {
            callee: one,
            args: Box::new([one])
        }
    );
}

#[test]
fn define_attaches_exactly_once() {
    let mut b = builder();
    let f = b.get_id("f");
    let func = b.make_function(f, &[], TypeId::VOID).unwrap();
    let body = b.make_compound_statement(&[]);
    let def = b.make_function_definition(body);

    b.define(func, def).unwrap();
    assert_eq!(
        b.define(func, def),
        Err(BuildError::AlreadyDefined { decl: func })
    );

    let x = b.get_id("x");
    let var = b.make_variable(x, TypeId::BOOL);
    assert!(matches!(
        b.define(var, def),
        Err(BuildError::Malformed { .. })
    ));
}

#[test]
fn initializer_is_attached_once() {
    let mut b = builder();
    let x = b.get_id("x");
    let var = b.make_variable(x, TypeId::BOOL);
    let t = b.get_true();
    let init = b.make_copy_init(TypeId::BOOL, t);

    b.set_initializer(var, init).unwrap();
    assert_eq!(b.init(init).kind, InitKind::Copy(t));
    assert!(b.set_initializer(var, init).is_err());
}

#[test]
fn constraints_are_canonical() {
    let mut b = builder();
    let e1 = b.get_true();
    let e2 = b.get_false();
    let p = b.get_predicate_constraint(e1);
    let q = b.get_predicate_constraint(e2);

    assert_eq!(b.get_predicate_constraint(e1), p);
    assert_eq!(b.get_conjunction_constraint(p, q), b.get_conjunction_constraint(q, p));
    assert_eq!(b.get_disjunction_constraint(p, p), p);
    assert_ne!(b.get_conjunction_constraint(p, q), b.get_disjunction_constraint(p, q));

    let conj = b.get_conjunction_constraint(q, p);
    let (lo, hi) = if p < q { (p, q) } else { (q, p) };
    assert_eq!(b.cons(conj), &ConsKind::Conjunction(lo, hi));
}

#[test]
fn concept_constraint_requires_concept() {
    let mut b = builder();
    let c = b.get_id("C");
    let class = b.make_class(c);
    assert!(b.get_concept_constraint(class, &[]).is_err());

    let t = b.get_id("T");
    let tp = b.make_type_parameter(t);
    let truth = b.get_true();
    let name = b.get_id("Any");
    let concept = b.make_concept_with_expr(name, &[tp], truth);
    let args = [Term::Type(TypeId::BOOL)];
    let c1 = b.get_concept_constraint(concept, &args).unwrap();
    let c2 = b.get_concept_constraint(concept, &args).unwrap();
    assert_eq!(c1, c2);
}

#[test]
fn template_ids_name_specializations() {
    let mut b = builder();
    let t = b.get_id("T");
    let tp = b.make_type_parameter(t);
    let f = b.get_id("f");
    let func = b.make_function(f, &[], TypeId::VOID).unwrap();
    let temp = b.make_template(&[tp], func);

    let id1 = b.get_template_id(temp, &[Term::Type(TypeId::BOOL)]).unwrap();
    let id2 = b.get_template_id(temp, &[Term::Type(TypeId::BOOL)]).unwrap();
    let id3 = b.get_template_id(temp, &[Term::Type(TypeId::FLOAT)]).unwrap();
    assert_eq!(id1, id2);
    assert_ne!(id1, id3);
    assert!(b.get_template_id(func, &[]).is_err());
}

#[test]
fn requires_expression_is_bool() {
    let mut b = builder();
    let e = b.get_int(1);
    let req = b.make_basic_requirement(e);
    let r = b.make_requires(&[], &[], &[req]);
    assert_eq!(b.expr_type(r), TypeId::BOOL);
    assert!(!b.is_type_dependent(r));
}
