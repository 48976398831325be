//! Initialization.
//!
//! Each entry point selects exactly one initialization strategy for a
//! target type and its initializer expressions, and builds the `Init` node
//! for it. The first matching rule wins. Categories the front end does not
//! handle yet fail with `NotYetImplemented`; rule violations fail with a
//! recoverable [`TypeError`].
//!
//! Nothing here consults the [`Context`](crate::Context): initialization is
//! decided by types alone.

use kiln_ir::{Builder, ExprId, Feature, InitId, TermGraph, TypeId};

use crate::conversion::{dependent_conversion, standard_conversion};
use crate::error::{SemaError, SemaResult, TypeError};

/// Initializer syntax, which selects the form of initialization.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Initializer<'a> {
    /// `T x = e;`
    Equal(ExprId),
    /// `T x(es...);`
    Paren(&'a [ExprId]),
    /// `T x{es...};`
    Brace(&'a [ExprId]),
}

/// Initialize an object of type `ty` from `init`.
pub fn initialize(b: &mut Builder, ty: TypeId, init: Initializer<'_>) -> SemaResult<InitId> {
    match init {
        Initializer::Equal(expr) => copy_initialize(b, ty, expr),
        Initializer::Paren(exprs) => direct_initialize(b, ty, exprs),
        Initializer::Brace(exprs) => list_initialize(b, ty, exprs),
    }
}

#[tracing::instrument(level = "trace", skip(b))]
pub fn zero_initialize(b: &mut Builder, ty: TypeId) -> SemaResult<InitId> {
    if b.is_function_type(ty) {
        return Err(TypeError::CannotZeroInitialize { ty }.into());
    }
    if b.is_reference_type(ty) {
        return Ok(b.make_trivial_init(ty));
    }
    if b.is_array_type(ty) {
        return Err(SemaError::NotYetImplemented(Feature::ArrayInitialization));
    }
    if b.is_maybe_qualified_class_type(ty) {
        return Err(SemaError::NotYetImplemented(Feature::ClassInitialization));
    }
    if b.is_maybe_qualified_union_type(ty) {
        return Err(SemaError::NotYetImplemented(Feature::UnionInitialization));
    }

    let unqualified = b.unqualified_type(ty);
    if b.is_scalar_type(unqualified) {
        let zero = if b.is_boolean_type(unqualified) {
            b.get_false()
        } else {
            b.get_zero(unqualified)
        };
        return Ok(b.make_copy_init(ty, zero));
    }
    Err(TypeError::CannotZeroInitialize { ty }.into())
}

#[tracing::instrument(level = "trace", skip(b))]
pub fn default_initialize(b: &mut Builder, ty: TypeId) -> SemaResult<InitId> {
    if b.is_reference_type(ty) {
        return Err(TypeError::ReferenceDefaultInit { ty }.into());
    }
    if b.is_array_type(ty) {
        return Err(SemaError::NotYetImplemented(Feature::ArrayInitialization));
    }
    // Class objects get a trivial initializer until constructors are
    // selected.
    if b.is_maybe_qualified_class_type(ty) {
        return Ok(b.make_trivial_init(ty));
    }
    if b.is_maybe_qualified_union_type(ty) {
        return Err(SemaError::NotYetImplemented(Feature::UnionInitialization));
    }
    Ok(b.make_trivial_init(ty))
}

#[tracing::instrument(level = "trace", skip(b))]
pub fn value_initialize(b: &mut Builder, ty: TypeId) -> SemaResult<InitId> {
    if b.is_reference_type(ty) {
        return Err(TypeError::ReferenceValueInit { ty }.into());
    }
    if b.is_array_type(ty) {
        return Err(SemaError::NotYetImplemented(Feature::ArrayInitialization));
    }
    if b.is_maybe_qualified_class_type(ty) {
        return Err(SemaError::NotYetImplemented(Feature::ClassInitialization));
    }
    if b.is_maybe_qualified_union_type(ty) {
        return Err(SemaError::NotYetImplemented(Feature::UnionInitialization));
    }
    zero_initialize(b, ty)
}

/// `T x = e;`
#[tracing::instrument(level = "trace", skip(b))]
pub fn copy_initialize(b: &mut Builder, ty: TypeId, expr: ExprId) -> SemaResult<InitId> {
    if b.is_reference_type(ty) {
        return reference_initialize(b, ty, expr);
    }
    if b.is_dependent_type(ty) {
        let converted = dependent_conversion(b, expr, ty);
        return Ok(b.make_copy_init(ty, converted));
    }
    if b.is_array_type(ty) || b.is_sequence_type(ty) {
        return Err(SemaError::NotYetImplemented(Feature::StringInitialization));
    }
    if b.is_maybe_qualified_class_or_union(ty) {
        return Err(SemaError::NotYetImplemented(Feature::ConstructorSearch));
    }
    convert_and_copy(b, ty, expr)
}

/// `T x(es...);`
#[tracing::instrument(level = "trace", skip(b))]
pub fn direct_initialize(b: &mut Builder, ty: TypeId, exprs: &[ExprId]) -> SemaResult<InitId> {
    if b.is_array_type(ty) || b.is_sequence_type(ty) {
        return Err(TypeError::InvalidArrayInitialization { ty }.into());
    }
    let Some(&expr) = exprs.first() else {
        return value_initialize(b, ty);
    };
    if exprs.len() > 1 && !b.is_maybe_qualified_class_or_union(ty) {
        return Err(TypeError::ScalarFromMultipleArguments { ty }.into());
    }

    if b.is_reference_type(ty) {
        return reference_initialize(b, ty, expr);
    }
    if b.is_dependent_type(ty) {
        let converted = dependent_conversion(b, expr, ty);
        return Ok(b.make_copy_init(ty, converted));
    }
    if b.is_maybe_qualified_class_or_union(ty) {
        return Err(SemaError::NotYetImplemented(Feature::ConstructorSearch));
    }
    convert_and_copy(b, ty, expr)
}

/// The tail shared by copy- and direct-initialization of a non-class,
/// non-dependent target from one expression.
fn convert_and_copy(b: &mut Builder, ty: TypeId, expr: ExprId) -> SemaResult<InitId> {
    let source = b.non_reference_type(b.expr_type(expr));
    if b.is_dependent_type(source) {
        let converted = dependent_conversion(b, expr, ty);
        return Ok(b.make_copy_init(ty, converted));
    }
    if b.is_maybe_qualified_class_or_union(source) {
        return Err(SemaError::NotYetImplemented(Feature::UserDefinedConversion));
    }
    let converted = standard_conversion(b, expr, ty)?;
    Ok(b.make_copy_init(ty, converted))
}

/// `T x{es...};`
pub fn list_initialize(_b: &mut Builder, _ty: TypeId, _exprs: &[ExprId]) -> SemaResult<InitId> {
    Err(SemaError::NotYetImplemented(Feature::ListInitialization))
}

/// Bind the reference type `ty` to `expr`.
///
/// Only direct binding to an lvalue of a reference-compatible type is
/// supported; this holds for dependent types as well.
#[tracing::instrument(level = "trace", skip(b))]
pub fn reference_initialize(b: &mut Builder, ty: TypeId, expr: ExprId) -> SemaResult<InitId> {
    if !b.is_reference_type(ty) {
        return Err(SemaError::unhandled(
            "reference initialization",
            format!("target {ty:?} is not a reference type"),
        ));
    }
    let target = b.non_reference_type(ty);
    let source_ty = b.expr_type(expr);
    if b.is_reference_type(source_ty) {
        let source = b.non_reference_type(source_ty);
        if reference_compatible(b, target, source) {
            return Ok(b.make_bind_init(ty, expr));
        }
    }
    Err(TypeError::ReferenceBinding { target: ty, expr }.into())
}

pub fn aggregate_initialize(
    _b: &mut Builder,
    _ty: TypeId,
    _exprs: &[ExprId],
) -> SemaResult<InitId> {
    Err(SemaError::NotYetImplemented(Feature::AggregateInitialization))
}

/// `t1` and `t2` are the same type up to top-level qualifiers.
pub fn reference_related(g: &TermGraph, t1: TypeId, t2: TypeId) -> bool {
    g.unqualified_type(t1) == g.unqualified_type(t2)
}

/// A reference to `t1` can bind directly to an lvalue of type `t2`.
pub fn reference_compatible(g: &TermGraph, t1: TypeId, t2: TypeId) -> bool {
    reference_related(g, t1, t2) && g.qualifiers(t1).is_superset(g.qualifiers(t2))
}
