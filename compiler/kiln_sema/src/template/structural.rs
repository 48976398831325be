//! Structural reference implementation of the template capability.

use kiln_ir::{BuildError, Builder, DeclId, DeclKind, ExprId, Term, TermGraph, TypeFlags, TypeId, TypeKind};
use kiln_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use super::{
    admit_expression, substitute_type, subsumes, DeductionError, SpecializationError,
    Substitution, TemplateOracle,
};

/// Deduction by structural type matching, specialization by substitution.
///
/// Deduction compares each parameter type with its argument's value type,
/// both with the reference and top-level qualifiers removed. A `typename`
/// of the template being called binds to whatever it meets; every other
/// component must match exactly. Specializations are not cached: each call
/// produces a fresh function declaration named by the template-id.
#[derive(Copy, Clone, Debug, Default)]
pub struct StructuralOracle;

impl TemplateOracle for StructuralOracle {
    fn deduce_from_call(
        &self,
        b: &mut Builder,
        tparams: &[DeclId],
        params: &[DeclId],
        args: &[ExprId],
    ) -> Result<Substitution, DeductionError> {
        if params.len() != args.len() {
            return Err(DeductionError::ArgumentCount {
                expected: params.len(),
                found: args.len(),
            });
        }

        let mut subst = Substitution::new(tparams);
        for (&param, &arg) in params.iter().zip(args) {
            let DeclKind::ObjectParm { ty } = b.decl(param).kind else {
                return Err(DeductionError::NotAnObjectParameter { param });
            };
            let p = value_type(b, ty);
            let a = value_type(b, b.expr_type(arg));
            deduce_type(b, p, a, &mut subst)?;
        }

        // Defaults fill what the call left open.
        for &param in tparams {
            if subst.is_bound(param) {
                continue;
            }
            let DeclKind::TypeParm {
                default: Some(default),
            } = b.decl(param).kind
            else {
                return Err(DeductionError::Undeduced { param });
            };
            let ty = substitute_type(b, default, &subst);
            bind_type(&mut subst, param, ty)?;
        }

        tracing::trace!(?tparams, ?subst, "deduced template arguments");
        Ok(subst)
    }

    fn specialize_template(
        &self,
        b: &mut Builder,
        template: DeclId,
        subst: &Substitution,
    ) -> Result<DeclId, SpecializationError> {
        let not_a_function = SpecializationError::NotAFunctionTemplate { template };
        let DeclKind::Template { pattern, .. } = b.decl(template).kind else {
            return Err(not_a_function);
        };
        let (params, ret) = match &b.decl(pattern).kind {
            DeclKind::Function { ty, params, .. } => match b.function_return_type(*ty) {
                Some(ret) => (params.clone(), ret),
                None => return Err(not_a_function),
            },
            _ => return Err(not_a_function),
        };

        let args = subst
            .args()
            .map_err(|param| SpecializationError::MissingArgument { param })?;
        let name = b.get_template_id(template, &args)?;

        let mut spec_params: SmallVec<[DeclId; 4]> = SmallVec::with_capacity(params.len());
        for &param in params.iter() {
            let DeclKind::ObjectParm { ty } = b.decl(param).kind else {
                return Err(BuildError::Malformed {
                    what: "function parameter that is not an object parameter",
                }
                .into());
            };
            let param_name = b.decl(param).name;
            let ty = substitute_type(b, ty, subst);
            spec_params.push(b.make_object_parm(param_name, ty));
        }
        let ret = substitute_type(b, ret, subst);
        let spec = b.make_function(name, &spec_params, ret)?;

        for &param in &spec_params {
            b.set_context(param, spec);
        }
        if let Some(context) = b.decl(template).context {
            b.set_context(spec, context);
        }

        tracing::debug!(?template, ?spec, "specialized function template");
        Ok(spec)
    }

    fn subsumes(&self, b: &mut Builder, lhs: ExprId, rhs: ExprId) -> bool {
        subsumes(b, lhs, rhs)
    }

    fn admit_expression(
        &self,
        b: &mut Builder,
        constraints: ExprId,
        expr: ExprId,
    ) -> Option<ExprId> {
        admit_expression(b, constraints, expr)
    }
}

/// `ty` without its reference and top-level qualifiers.
fn value_type(g: &TermGraph, ty: TypeId) -> TypeId {
    g.unqualified_type(g.non_reference_type(ty))
}

fn bind_type(subst: &mut Substitution, param: DeclId, ty: TypeId) -> Result<(), DeductionError> {
    subst
        .bind(param, Term::Type(ty))
        .map_err(|first| DeductionError::Conflict {
            param,
            first,
            second: Term::Type(ty),
        })
}

fn deduce_type(
    g: &TermGraph,
    p: TypeId,
    a: TypeId,
    subst: &mut Substitution,
) -> Result<(), DeductionError> {
    if !g.has_flag(p, TypeFlags::HAS_PARAM) {
        return if p == a {
            Ok(())
        } else {
            Err(DeductionError::Mismatch { param: p, arg: a })
        };
    }

    ensure_sufficient_stack(|| match (g.ty(p), g.ty(a)) {
        (TypeKind::Typename(param), _) if subst.params().contains(param) => {
            bind_type(subst, *param, a)
        }
        (TypeKind::Pointer(x), TypeKind::Pointer(y))
        | (TypeKind::Reference(x), TypeKind::Reference(y))
        | (TypeKind::Sequence(x), TypeKind::Sequence(y)) => deduce_type(g, *x, *y, subst),
        (
            TypeKind::Qualified { base: x, quals: qx },
            TypeKind::Qualified { base: y, quals: qy },
        ) if qx == qy => deduce_type(g, *x, *y, subst),
        (
            TypeKind::Function {
                params: px,
                ret: rx,
            },
            TypeKind::Function {
                params: py,
                ret: ry,
            },
        ) if px.len() == py.len() => {
            for (&x, &y) in px.iter().zip(py.iter()) {
                deduce_type(g, x, y, subst)?;
            }
            deduce_type(g, *rx, *ry, subst)
        }
        _ if p == a => Ok(()),
        _ => Err(DeductionError::Mismatch { param: p, arg: a }),
    })
}
