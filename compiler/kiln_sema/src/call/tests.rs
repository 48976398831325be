#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use kiln_ir::{SharedSymbols, Term, TypeId};
use pretty_assertions::assert_eq;

use super::*;
use crate::context::SemaConfig;

fn setup() -> (Builder, Context) {
    let cx = Context::new(SemaConfig::default());
    let b = cx.builder(SharedSymbols::new());
    (b, cx)
}

fn strict() -> (Builder, Context) {
    let cx = Context::new(SemaConfig {
        subsumption_failures_are_errors: true,
        ..SemaConfig::default()
    });
    let b = cx.builder(SharedSymbols::new());
    (b, cx)
}

/// `int name(int)`
fn int_function(b: &mut Builder, name: &str) -> DeclId {
    let int = b.get_int_type();
    let p = b.get_id("p");
    let p = b.make_object_parm(p, int);
    let name = b.get_id(name);
    b.make_function(name, &[p], int).unwrap()
}

fn type_parameter(b: &mut Builder, name: &str) -> (DeclId, TypeId) {
    let t = b.get_id(name);
    let t = b.make_type_parameter(t);
    let ty = b.get_typename_type(t).unwrap();
    (t, ty)
}

fn parameter(b: &mut Builder, name: &str, ty: TypeId) -> ExprId {
    let name = b.get_id(name);
    let p = b.make_object_parm(name, ty);
    b.make_reference(p).unwrap()
}

fn concept(b: &mut Builder, name: &str) -> DeclId {
    let (t, _) = type_parameter(b, "T");
    let name = b.get_id(name);
    b.make_concept(name, &[t])
}

/// `template<typename T> requires constraint T id(T x)`
fn identity_template(
    b: &mut Builder,
    constraint: impl FnOnce(&mut Builder, TypeId) -> Option<ExprId>,
) -> DeclId {
    let (t, t_ty) = type_parameter(b, "T");
    let x = b.get_id("x");
    let x = b.make_object_parm(x, t_ty);
    let id = b.get_id("id");
    let f = b.make_function(id, &[x], t_ty).unwrap();
    match constraint(b, t_ty) {
        Some(c) => b.make_constrained_template(&[t], f, c),
        None => b.make_template(&[t], f),
    }
}

#[test]
fn regular_call_has_the_return_type() {
    let (mut b, mut cx) = setup();
    let f = int_function(&mut b, "f");
    let callee = b.make_reference(f).unwrap();
    let five = b.get_int(5);

    let call = make_call(&mut b, &mut cx, callee, &[five]).unwrap();
    let int = b.get_int_type();
    assert_eq!(b.expr_type(call), int);
    assert_eq!(
        b.expr(call).kind,
        ExprKind::Call {
            callee,
            args: vec![five].into()
        }
    );
}

#[test]
fn regular_call_checks_arity() {
    let (mut b, mut cx) = setup();
    let f = int_function(&mut b, "f");
    let callee = b.make_reference(f).unwrap();
    assert_eq!(
        make_call(&mut b, &mut cx, callee, &[]),
        Err(TypeError::ArgumentCount {
            expected: 1,
            found: 0
        }
        .into())
    );
}

#[test]
fn only_functions_are_callable() {
    let (mut b, mut cx) = setup();
    let int = b.get_int_type();
    let v = b.get_id("v");
    let v = b.make_variable(v, int);
    let callee = b.make_reference(v).unwrap();
    assert_eq!(
        make_call(&mut b, &mut cx, callee, &[]),
        Err(TypeError::NotCallable { callee }.into())
    );

    let five = b.get_int(5);
    assert_eq!(
        make_call(&mut b, &mut cx, five, &[]),
        Err(TypeError::NotCallable { callee: five }.into())
    );
}

#[test]
fn dependent_arguments_defer_in_unconstrained_templates() {
    let (mut b, mut cx) = setup();
    let (t, t_ty) = type_parameter(&mut b, "T");
    let x = parameter(&mut b, "x", t_ty);

    // Not a function at all: the regular path would reject it.
    let int = b.get_int_type();
    let v = b.get_id("v");
    let v = b.make_variable(v, int);
    let callee = b.make_reference(v).unwrap();

    let call = cx
        .with_template(&[t], None, |cx| make_call(&mut b, cx, callee, &[x]))
        .unwrap();
    assert!(b.is_type_dependent(call));
    assert!(matches!(b.ty(b.expr_type(call)), TypeKind::Auto(_)));
    assert!(cx.diagnostics().is_empty());
}

#[test]
fn requirements_reuse_equivalent_calls() {
    let (mut b, mut cx) = setup();
    let (_, t_ty) = type_parameter(&mut b, "T");
    let x = parameter(&mut b, "x", t_ty);
    let f = int_function(&mut b, "f");
    let callee = b.make_reference(f).unwrap();

    cx.with_requirements(|cx| {
        let first = make_call(&mut b, cx, callee, &[x]).unwrap();
        let second = make_call(&mut b, cx, callee, &[x]).unwrap();
        assert_eq!(first, second);
        assert_eq!(cx.required_expressions(), &[first]);
    });
    assert!(!cx.in_requirements());
}

#[test]
fn constraints_admit_required_calls() {
    let (mut b, mut cx) = setup();
    let (t, t_ty) = type_parameter(&mut b, "T");
    let x = parameter(&mut b, "x", t_ty);
    let f = int_function(&mut b, "f");
    let callee = b.make_reference(f).unwrap();

    // requires { f(x); }
    let auto = b.get_auto_type();
    let required = b.make_call(auto, callee, &[x]);
    let req = b.make_basic_requirement(required);
    let constraint = b.make_requires(&[t], &[], &[req]);

    let call = cx
        .with_template(&[t], Some(constraint), |cx| {
            make_call(&mut b, cx, callee, &[x])
        })
        .unwrap();
    assert_eq!(call, required);
}

#[test]
fn template_calls_take_the_specialization_return_type() {
    let (mut b, mut cx) = setup();
    let id = identity_template(&mut b, |_, _| None);
    let callee = b.make_template_reference(id).unwrap();
    let five = b.get_int(5);

    let call = make_call(&mut b, &mut cx, callee, &[five]).unwrap();
    let int = b.get_int_type();
    assert_eq!(b.expr_type(call), int);
    let ExprKind::Call { callee: kept, .. } = b.expr(call).kind else {
        panic!("expected a call");
    };
    assert_eq!(kept, callee);
}

#[test]
fn uncovered_constrained_calls_warn() {
    let (mut b, mut cx) = setup();
    let c = concept(&mut b, "C");
    let d = concept(&mut b, "D");
    let id = identity_template(&mut b, |b, t| Some(b.make_check(d, &[Term::Type(t)]).unwrap()));

    let (u, u_ty) = type_parameter(&mut b, "U");
    let ambient = b.make_check(c, &[Term::Type(u_ty)]).unwrap();
    let y = parameter(&mut b, "y", u_ty);
    let callee = b.make_template_reference(id).unwrap();

    let call = cx
        .with_template(&[u], Some(ambient), |cx| make_call(&mut b, cx, callee, &[y]))
        .unwrap();
    assert_eq!(b.expr_type(call), u_ty);

    let diags = cx.diagnostics();
    assert_eq!(diags.warning_count(), 1);
    assert_eq!(diags.error_count(), 0);
    assert_eq!(diags.peek().next().unwrap().code, ErrorCode::W2001);
}

#[test]
fn covered_constrained_calls_are_silent() {
    let (mut b, mut cx) = setup();
    let c = concept(&mut b, "C");
    let d = concept(&mut b, "D");
    let (u, u_ty) = type_parameter(&mut b, "U");
    let id = identity_template(&mut b, |b, _| {
        Some(b.make_check(c, &[Term::Type(u_ty)]).unwrap())
    });

    // C<U> && D<U> implies C<U>.
    let cu = b.make_check(c, &[Term::Type(u_ty)]).unwrap();
    let du = b.make_check(d, &[Term::Type(u_ty)]).unwrap();
    let ambient = b.make_and(TypeId::BOOL, cu, du);
    let y = parameter(&mut b, "y", u_ty);
    let callee = b.make_template_reference(id).unwrap();

    cx.with_template(&[u], Some(ambient), |cx| make_call(&mut b, cx, callee, &[y]))
        .unwrap();
    assert!(cx.diagnostics().is_empty());
}

#[test]
fn strict_mode_rejects_uncovered_calls() {
    let (mut b, mut cx) = strict();
    let c = concept(&mut b, "C");
    let d = concept(&mut b, "D");
    let id = identity_template(&mut b, |b, t| Some(b.make_check(d, &[Term::Type(t)]).unwrap()));

    let (u, u_ty) = type_parameter(&mut b, "U");
    let ambient = b.make_check(c, &[Term::Type(u_ty)]).unwrap();
    let y = parameter(&mut b, "y", u_ty);
    let callee = b.make_template_reference(id).unwrap();

    let err = cx
        .with_template(&[u], Some(ambient), |cx| make_call(&mut b, cx, callee, &[y]))
        .unwrap_err();
    assert_eq!(err, TypeError::UncoveredCall { template: id }.into());
    assert_eq!(err.code(), ErrorCode::E2015);
    // Returned, not queued: the caller decides how to report it.
    assert!(cx.diagnostics().is_empty());
}

#[test]
fn constrained_calls_outside_templates_warn() {
    let (mut b, mut cx) = setup();
    let d = concept(&mut b, "D");
    let id = identity_template(&mut b, |b, t| Some(b.make_check(d, &[Term::Type(t)]).unwrap()));
    let callee = b.make_template_reference(id).unwrap();
    let five = b.get_int(5);

    assert_eq!(cx.current_template_constraints(), None);
    let call = make_call(&mut b, &mut cx, callee, &[five]).unwrap();
    let int = b.get_int_type();
    assert_eq!(b.expr_type(call), int);

    let diags = cx.diagnostics();
    assert_eq!(diags.warning_count(), 1);
    assert_eq!(diags.peek().next().unwrap().code, ErrorCode::W2001);
}

#[test]
fn unconstrained_templates_never_warn() {
    let (mut b, mut cx) = setup();
    let id = identity_template(&mut b, |_, _| None);
    let callee = b.make_template_reference(id).unwrap();
    let five = b.get_int(5);

    make_call(&mut b, &mut cx, callee, &[five]).unwrap();
    assert!(cx.diagnostics().is_empty());
}

#[test]
fn failed_deduction_is_no_matching_call() {
    let (mut b, mut cx) = setup();
    let id = identity_template(&mut b, |_, _| None);
    let callee = b.make_template_reference(id).unwrap();

    let err = make_call(&mut b, &mut cx, callee, &[]).unwrap_err();
    assert!(err.is_recoverable());
    assert!(matches!(
        err,
        SemaError::Type(TypeError::NoMatchingCall {
            cause: TemplateError::Deduction(_),
            ..
        })
    ));
}

#[test]
fn dependent_calls_to_plain_functions_are_not_implemented() {
    let (mut b, mut cx) = setup();
    let (_, t_ty) = type_parameter(&mut b, "T");
    let x = parameter(&mut b, "x", t_ty);
    let f = int_function(&mut b, "f");
    let callee = b.make_reference(f).unwrap();

    assert_eq!(
        make_call(&mut b, &mut cx, callee, &[x]),
        Err(SemaError::NotYetImplemented(Feature::DependentFunctionCall))
    );
}

#[test]
fn other_dependent_callees_are_unhandled() {
    let (mut b, mut cx) = setup();
    let (_, t_ty) = type_parameter(&mut b, "T");
    let x = parameter(&mut b, "x", t_ty);
    let five = b.get_int(5);

    let err = make_call(&mut b, &mut cx, five, &[x]).unwrap_err();
    assert!(matches!(err, SemaError::UnhandledCase { .. }));
    assert!(!err.is_recoverable());
}
