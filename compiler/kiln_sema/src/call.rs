//! Call resolution.
//!
//! A call whose callee or arguments are type-dependent cannot be checked
//! yet. Inside a requires-expression it becomes a requirement; inside an
//! unconstrained template it is kept as written; under constraints it is
//! admitted when the constraints already establish it. A call to a function
//! template is resolved by deduction and specialization, and checked against
//! the enclosing constraints.
//!
//! A call that is not dependent must name a function directly.

use kiln_diagnostic::{Diagnostic, ErrorCode};
use kiln_ir::{Builder, DeclId, DeclKind, ExprId, ExprKind, Feature, TermGraph, TypeKind};

use crate::actions::spelling;
use crate::context::Context;
use crate::error::{SemaError, SemaResult, TypeError};
use crate::template::{Substitution, TemplateError};

/// Resolve `callee(args...)`.
#[tracing::instrument(level = "trace", skip(b, cx))]
pub fn make_call(
    b: &mut Builder,
    cx: &mut Context,
    callee: ExprId,
    args: &[ExprId],
) -> SemaResult<ExprId> {
    if b.is_type_dependent(callee) || b.any_type_dependent(args) {
        make_dependent_call(b, cx, callee, args)
    } else {
        make_regular_call(b, callee, args)
    }
}

fn make_regular_call(b: &mut Builder, callee: ExprId, args: &[ExprId]) -> SemaResult<ExprId> {
    let not_callable = TypeError::NotCallable { callee };
    let ExprKind::Reference(decl) = b.expr(callee).kind else {
        return Err(not_callable.into());
    };
    let Some(ty) = b.declared_type(decl) else {
        return Err(not_callable.into());
    };
    let (expected, ret) = match b.ty(ty) {
        TypeKind::Function { params, ret } => (params.len(), *ret),
        _ => return Err(not_callable.into()),
    };
    if expected != args.len() {
        return Err(TypeError::ArgumentCount {
            expected,
            found: args.len(),
        }
        .into());
    }
    Ok(b.make_call(ret, callee, args))
}

fn make_dependent_call(
    b: &mut Builder,
    cx: &mut Context,
    callee: ExprId,
    args: &[ExprId],
) -> SemaResult<ExprId> {
    let ty = b.get_auto_type();
    let call = b.make_call(ty, callee, args);

    if cx.in_requirements() {
        tracing::debug!(?call, "dependent call recorded as a requirement");
        return Ok(cx.require_expression(b, call));
    }

    if cx.in_unconstrained_template() {
        tracing::debug!(?call, "dependent call deferred to instantiation");
        return Ok(call);
    }

    if let Some(constraints) = cx.current_template_constraints() {
        if let Some(admitted) = cx.oracle().admit_expression(b, constraints, call) {
            tracing::debug!(?call, ?admitted, "dependent call admitted by constraints");
            return Ok(admitted);
        }
    }

    match b.expr(callee).kind.clone() {
        ExprKind::TemplateRef(template) => {
            make_dependent_template_call(b, cx, callee, template, args)
        }
        ExprKind::Reference(decl) if b.is_function_decl(decl) => {
            Err(SemaError::NotYetImplemented(Feature::DependentFunctionCall))
        }
        other => Err(SemaError::unhandled("dependent callee", format!("{other:?}"))),
    }
}

fn make_dependent_template_call(
    b: &mut Builder,
    cx: &mut Context,
    callee: ExprId,
    template: DeclId,
    args: &[ExprId],
) -> SemaResult<ExprId> {
    let DeclKind::Template {
        params: tparams,
        pattern,
        constraint,
    } = b.decl(template).kind.clone()
    else {
        return Err(SemaError::unhandled(
            "template reference",
            format!("{template:?} is not a template"),
        ));
    };
    let DeclKind::Function { params, .. } = b.decl(pattern).kind.clone() else {
        return Err(SemaError::unhandled(
            "template call",
            format!("pattern {pattern:?} is not a function"),
        ));
    };

    let spec = deduce_and_specialize(b, cx, template, &tparams, &params, args)
        .map_err(|cause| TypeError::NoMatchingCall { callee, cause })?;
    let ret = b
        .declared_type(spec)
        .and_then(|ty| b.function_return_type(ty))
        .ok_or_else(|| {
            SemaError::unhandled("specialization", format!("{spec:?} is not a function"))
        })?;

    // Outside any constrained template the ambient condition is `true`,
    // which subsumes no constraint.
    if let Some(required) = constraint {
        let covered = match cx.current_template_constraints() {
            Some(ambient) => cx.oracle().subsumes(b, ambient, required),
            None => false,
        };
        if !covered {
            report_uncovered_call(b, cx, template)?;
        }
    }

    Ok(b.make_call(ret, callee, args))
}

fn deduce_and_specialize(
    b: &mut Builder,
    cx: &Context,
    template: DeclId,
    tparams: &[DeclId],
    params: &[DeclId],
    args: &[ExprId],
) -> Result<DeclId, TemplateError> {
    let subst: Substitution = cx.oracle().deduce_from_call(b, tparams, params, args)?;
    let spec = cx.oracle().specialize_template(b, template, &subst)?;
    Ok(spec)
}

/// The enclosing constraints do not subsume the called template's.
///
/// A queued warning by default. In strict mode the call fails with
/// [`TypeError::UncoveredCall`], left to the caller to report.
fn report_uncovered_call(g: &TermGraph, cx: &mut Context, template: DeclId) -> SemaResult<()> {
    if cx.config().subsumption_failures_are_errors {
        return Err(TypeError::UncoveredCall { template }.into());
    }
    let span = cx.location();
    tracing::debug!(?template, "call not covered by constraints");
    cx.warning(
        Diagnostic::warning(ErrorCode::W2001)
            .with_message(format!(
                "call to function template `{}` not covered by constraints",
                spelling(g, g.decl(template).name)
            ))
            .with_label(span, "called here")
            .with_note("the enclosing constraints do not imply the template's constraints"),
    );
    Ok(())
}

#[cfg(test)]
mod tests;
