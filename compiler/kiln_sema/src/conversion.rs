//! Implicit conversions.
//!
//! A standard conversion sequence is a value conversion followed by at most
//! one of: qualification, boolean, integer or float conversion. Each step
//! is an explicit `Conversion` node whose type is the converted type.

use kiln_ir::{Builder, ConversionKind, ExprId, TermGraph, TypeId, TypeKind};

use crate::error::{SemaResult, TypeError};

/// Produce the value of `expr`: strip its reference and top-level
/// qualifiers.
pub fn value_conversion(b: &mut Builder, expr: ExprId) -> ExprId {
    let ty = b.expr_type(expr);
    if !b.is_reference_type(ty) {
        return expr;
    }
    let value = b.unqualified_type(b.non_reference_type(ty));
    b.make_conversion(ConversionKind::Value, value, expr)
}

/// Convert `expr` to `target` by a standard conversion sequence.
pub fn standard_conversion(b: &mut Builder, expr: ExprId, target: TypeId) -> SemaResult<ExprId> {
    let expr = value_conversion(b, expr);
    let source = b.expr_type(expr);
    let target = b.unqualified_type(target);

    if source == target {
        return Ok(expr);
    }
    let kind = conversion_kind(b, source, target).ok_or(TypeError::NoConversion {
        from: source,
        to: target,
    })?;
    Ok(b.make_conversion(kind, target, expr))
}

/// The single conversion step from the value type `source` to the
/// unqualified type `target`.
fn conversion_kind(g: &TermGraph, source: TypeId, target: TypeId) -> Option<ConversionKind> {
    match (g.ty(source), g.ty(target)) {
        // Only pointers gain qualifiers below the top level.
        (&TypeKind::Pointer(from), &TypeKind::Pointer(to))
            if g.unqualified_type(from) == g.unqualified_type(to)
                && g.qualifiers(to).is_superset(g.qualifiers(from)) =>
        {
            Some(ConversionKind::Qualification)
        }
        (
            TypeKind::Boolean | TypeKind::Integer { .. } | TypeKind::Float | TypeKind::Pointer(_),
            TypeKind::Boolean,
        ) => Some(ConversionKind::Boolean),
        (TypeKind::Boolean | TypeKind::Integer { .. }, TypeKind::Integer { .. }) => {
            Some(ConversionKind::Integer)
        }
        (TypeKind::Boolean | TypeKind::Integer { .. }, TypeKind::Float)
        | (TypeKind::Float, TypeKind::Integer { .. }) => Some(ConversionKind::Float),
        _ => None,
    }
}

/// Defer the conversion of `expr` to `target` until instantiation.
pub fn dependent_conversion(b: &mut Builder, expr: ExprId, target: TypeId) -> ExprId {
    b.make_conversion(ConversionKind::Dependent, target, expr)
}

/// Convert `expr` to `bool` as a condition or logical operand.
pub fn contextual_bool(b: &mut Builder, expr: ExprId) -> SemaResult<ExprId> {
    let bool_ty = b.get_bool_type();
    if b.is_type_dependent(expr) {
        return Ok(dependent_conversion(b, expr, bool_ty));
    }
    standard_conversion(b, expr, bool_ty)
}

/// Common type of two arithmetic value types after promotion.
///
/// `bool` promotes to `int`. Float wins over integers; among integers the
/// wider precision wins, and unsigned wins at equal precision.
pub fn common_arithmetic_type(b: &mut Builder, lhs: TypeId, rhs: TypeId) -> Option<TypeId> {
    let lhs = promote(b, lhs)?;
    let rhs = promote(b, rhs)?;
    match (b.ty(lhs), b.ty(rhs)) {
        (TypeKind::Float, _) | (_, TypeKind::Float) => Some(b.get_float_type()),
        (
            &TypeKind::Integer {
                signed: ls,
                precision: lp,
            },
            &TypeKind::Integer {
                signed: rs,
                precision: rp,
            },
        ) => {
            let precision = lp.max(rp);
            let signed = match lp.cmp(&rp) {
                std::cmp::Ordering::Greater => ls,
                std::cmp::Ordering::Less => rs,
                std::cmp::Ordering::Equal => ls && rs,
            };
            Some(b.get_integer_type(signed, precision))
        }
        _ => None,
    }
}

fn promote(b: &mut Builder, ty: TypeId) -> Option<TypeId> {
    match b.ty(ty) {
        TypeKind::Boolean => Some(b.get_int_type()),
        TypeKind::Integer { .. } | TypeKind::Float => Some(ty),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
