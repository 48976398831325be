//! Semantic actions.
//!
//! The parser calls one action per construct it has recognized. Each action
//! checks the construct against the [`Context`], builds its term, and enters
//! any declaration it introduces into the current scope.
//!
//! Actions that open a scope (function bodies, templates, concepts and
//! requires-expressions) take a closure that builds the enclosed construct
//! while the scope is active. The scope is left on every exit path.

use kiln_ir::{
    BinaryOp, Builder, DeclId, DeclKind, ExprId, NameId, NameKind, ReqId, StmtId, Term, TermGraph,
    TypeId,
};

use crate::call::make_call;
use crate::context::Context;
use crate::conversion::{
    common_arithmetic_type, contextual_bool, standard_conversion, value_conversion,
};
use crate::error::{SemaError, SemaResult, TypeError};
use crate::init::{default_initialize, initialize, Initializer};

/// Source spelling of `name` for diagnostics.
pub(crate) fn spelling(g: &TermGraph, name: NameId) -> String {
    match g.name(name) {
        NameKind::Simple(sym) => g.symbols().lookup(*sym).to_owned(),
        other => format!("{other:?}"),
    }
}

// === Names ===

/// An identifier used as an expression.
pub fn on_id_expression(b: &mut Builder, cx: &mut Context, name: NameId) -> SemaResult<ExprId> {
    let Some(decl) = cx.lookup(name) else {
        return Err(TypeError::UndeclaredName {
            name: spelling(b, name),
        }
        .into());
    };
    match b.decl(decl).kind {
        DeclKind::Variable { .. }
        | DeclKind::Function { .. }
        | DeclKind::ObjectParm { .. }
        | DeclKind::ValueParm { .. } => Ok(b.make_reference(decl)?),
        DeclKind::Template { .. } => Ok(b.make_template_reference(decl)?),
        DeclKind::Namespace
        | DeclKind::Class { .. }
        | DeclKind::Concept { .. }
        | DeclKind::TypeParm { .. } => Err(TypeError::NotAValue { decl }.into()),
    }
}

// === Literals ===

pub fn on_integer_literal(b: &mut Builder, value: i128) -> ExprId {
    b.get_int(value)
}

pub fn on_boolean_literal(b: &mut Builder, value: bool) -> ExprId {
    b.get_bool(value)
}

// === Operators ===

/// `lhs && rhs`
pub fn on_logical_and(b: &mut Builder, lhs: ExprId, rhs: ExprId) -> SemaResult<ExprId> {
    let lhs = contextual_bool(b, lhs)?;
    let rhs = contextual_bool(b, rhs)?;
    Ok(b.make_and(TypeId::BOOL, lhs, rhs))
}

/// `lhs || rhs`
pub fn on_logical_or(b: &mut Builder, lhs: ExprId, rhs: ExprId) -> SemaResult<ExprId> {
    let lhs = contextual_bool(b, lhs)?;
    let rhs = contextual_bool(b, rhs)?;
    Ok(b.make_or(TypeId::BOOL, lhs, rhs))
}

/// `!operand`
pub fn on_logical_not(b: &mut Builder, operand: ExprId) -> SemaResult<ExprId> {
    let operand = contextual_bool(b, operand)?;
    Ok(b.make_not(TypeId::BOOL, operand))
}

/// An equality or relational comparison. The result is `bool`.
///
/// Arithmetic operands are brought to their common type; other operands
/// must already have the same value type.
#[tracing::instrument(level = "trace", skip(b))]
pub fn on_comparison(
    b: &mut Builder,
    op: BinaryOp,
    lhs: ExprId,
    rhs: ExprId,
) -> SemaResult<ExprId> {
    if !op.is_comparison() {
        return Err(SemaError::unhandled("comparison operator", op.symbol()));
    }
    let lhs = value_conversion(b, lhs);
    let rhs = value_conversion(b, rhs);
    if b.is_type_dependent(lhs) || b.is_type_dependent(rhs) {
        return Ok(b.make_binary(op, TypeId::BOOL, lhs, rhs));
    }

    let (lt, rt) = (b.expr_type(lhs), b.expr_type(rhs));
    if let Some(common) = common_arithmetic_type(b, lt, rt) {
        let (lhs, rhs) = convert_operands(b, lhs, rhs, common)?;
        return Ok(b.make_binary(op, TypeId::BOOL, lhs, rhs));
    }
    if lt == rt {
        return Ok(b.make_binary(op, TypeId::BOOL, lhs, rhs));
    }
    Err(TypeError::NoConversion { from: rt, to: lt }.into())
}

/// `+ - * / %` over arithmetic operands.
///
/// The result has the common type of the operands. When either operand is
/// type-dependent the result type is a fresh placeholder.
#[tracing::instrument(level = "trace", skip(b))]
pub fn on_arithmetic(
    b: &mut Builder,
    op: BinaryOp,
    lhs: ExprId,
    rhs: ExprId,
) -> SemaResult<ExprId> {
    if !op.is_arithmetic() {
        return Err(SemaError::unhandled("arithmetic operator", op.symbol()));
    }
    let lhs = value_conversion(b, lhs);
    let rhs = value_conversion(b, rhs);
    if b.is_type_dependent(lhs) || b.is_type_dependent(rhs) {
        let ty = b.get_auto_type();
        return Ok(b.make_binary(op, ty, lhs, rhs));
    }

    let (lt, rt) = (b.expr_type(lhs), b.expr_type(rhs));
    let common =
        common_arithmetic_type(b, lt, rt).ok_or(TypeError::NoConversion { from: rt, to: lt })?;
    let (lhs, rhs) = convert_operands(b, lhs, rhs, common)?;
    Ok(b.make_binary(op, common, lhs, rhs))
}

fn convert_operands(
    b: &mut Builder,
    lhs: ExprId,
    rhs: ExprId,
    common: TypeId,
) -> SemaResult<(ExprId, ExprId)> {
    Ok((
        standard_conversion(b, lhs, common)?,
        standard_conversion(b, rhs, common)?,
    ))
}

/// `callee(args...)`
pub fn on_call_expression(
    b: &mut Builder,
    cx: &mut Context,
    callee: ExprId,
    args: &[ExprId],
) -> SemaResult<ExprId> {
    make_call(b, cx, callee, args)
}

/// `C<args...>`
pub fn on_check_expression(b: &mut Builder, concept: DeclId, args: &[Term]) -> SemaResult<ExprId> {
    Ok(b.make_check(concept, args)?)
}

// === Statements ===

pub fn on_compound_statement(b: &mut Builder, stmts: &[StmtId]) -> StmtId {
    b.make_compound_statement(stmts)
}

pub fn on_return_statement(b: &mut Builder, expr: ExprId) -> StmtId {
    b.make_return_statement(expr)
}

pub fn on_expression_statement(b: &mut Builder, expr: ExprId) -> StmtId {
    b.make_expression_statement(expr)
}

pub fn on_declaration_statement(b: &mut Builder, decl: DeclId) -> StmtId {
    b.make_declaration_statement(decl)
}

// === Declarations ===

/// Enter `decl` into the current scope and record the scope as its context.
fn declare(b: &mut Builder, cx: &mut Context, decl: DeclId) -> SemaResult<()> {
    let name = b.decl(decl).name;
    if let Some(prev) = cx.lookup_local(name) {
        tracing::debug!(?decl, ?prev, "redeclaration in the same scope");
        return Err(TypeError::Redefinition { decl: prev }.into());
    }
    cx.bind(name, decl);
    b.set_context(decl, cx.current_scope());
    Ok(())
}

/// `T name;`, `T name = e;`, `T name(es...);` or `T name{es...};`
///
/// The variable is in scope in its own initializer. Without an initializer
/// the variable is default-initialized. If initialization fails the name is
/// unbound again.
#[tracing::instrument(level = "trace", skip(b, cx))]
pub fn on_variable_declaration(
    b: &mut Builder,
    cx: &mut Context,
    name: NameId,
    ty: TypeId,
    init: Option<Initializer<'_>>,
) -> SemaResult<DeclId> {
    let var = b.make_variable(name, ty);
    let before = cx.snapshot();
    declare(b, cx, var)?;
    let initialized = match init {
        Some(init) => initialize(b, ty, init),
        None => default_initialize(b, ty),
    }
    .and_then(|init| b.set_initializer(var, init).map_err(SemaError::from));
    if let Err(err) = initialized {
        tracing::debug!(?var, %err, "initialization failed; unbinding");
        cx.restore(before);
        return Err(err);
    }
    Ok(var)
}

/// A function parameter. It is entered into scope with the function body.
pub fn on_parameter_declaration(b: &mut Builder, name: NameId, ty: TypeId) -> DeclId {
    b.make_object_parm(name, ty)
}

/// A template type parameter, optionally with a default argument.
pub fn on_type_parameter(b: &mut Builder, name: NameId, default: Option<TypeId>) -> DeclId {
    match default {
        Some(default) => b.make_type_parameter_with_default(name, default),
        None => b.make_type_parameter(name),
    }
}

/// A template value parameter.
pub fn on_value_parameter(b: &mut Builder, name: NameId, ty: TypeId) -> DeclId {
    b.make_value_parm(name, ty)
}

/// `ret name(params...);`
pub fn on_function_declaration(
    b: &mut Builder,
    cx: &mut Context,
    name: NameId,
    params: &[DeclId],
    ret: TypeId,
) -> SemaResult<DeclId> {
    let func = b.make_function(name, params, ret)?;
    declare(b, cx, func)?;
    for &param in params {
        b.set_context(param, func);
    }
    Ok(func)
}

/// `{ body }` of a declared function.
///
/// The parameters are in scope while `body` builds the function body.
#[tracing::instrument(level = "trace", skip(b, cx, body))]
pub fn on_function_definition(
    b: &mut Builder,
    cx: &mut Context,
    func: DeclId,
    body: impl FnOnce(&mut Builder, &mut Context) -> SemaResult<StmtId>,
) -> SemaResult<()> {
    let DeclKind::Function { params, .. } = b.decl(func).kind.clone() else {
        return Err(SemaError::unhandled(
            "function definition",
            format!("{func:?} is not a function"),
        ));
    };
    let body = cx.with_scope(func, |cx| {
        for &param in &*params {
            declare(b, cx, param)?;
        }
        body(b, cx)
    })?;
    let def = b.make_function_definition(body);
    b.define(func, def)?;
    Ok(())
}

/// `class name;`
pub fn on_class_declaration(b: &mut Builder, cx: &mut Context, name: NameId) -> SemaResult<DeclId> {
    let class = b.make_class(name);
    declare(b, cx, class)?;
    Ok(class)
}

/// `class name { members... };` for a declared class.
pub fn on_class_definition(b: &mut Builder, class: DeclId, members: &[DeclId]) -> SemaResult<()> {
    let def = b.make_class_definition(members);
    for &member in members {
        b.set_context(member, class);
    }
    b.define(class, def)?;
    Ok(())
}

/// `template<params...> requires constraint pattern`
///
/// The parameters are in scope, and the constraint is ambient, while
/// `pattern` builds the parameterized declaration. The template takes the
/// pattern's name and is entered into the enclosing scope.
#[tracing::instrument(level = "trace", skip(b, cx, pattern))]
pub fn on_template_declaration(
    b: &mut Builder,
    cx: &mut Context,
    params: &[DeclId],
    constraint: Option<ExprId>,
    pattern: impl FnOnce(&mut Builder, &mut Context) -> SemaResult<DeclId>,
) -> SemaResult<DeclId> {
    let pattern = cx.with_template(params, constraint, |cx| {
        for &param in params {
            declare(b, cx, param)?;
        }
        pattern(b, cx)
    })?;
    let template = match constraint {
        Some(constraint) => b.make_constrained_template(params, pattern, constraint),
        None => b.make_template(params, pattern),
    };
    declare(b, cx, template)?;
    b.set_context(pattern, template);
    for &param in params {
        b.set_context(param, template);
    }
    Ok(template)
}

/// `template<params...> concept name = definition;`
pub fn on_concept_declaration(
    b: &mut Builder,
    cx: &mut Context,
    name: NameId,
    params: &[DeclId],
    definition: impl FnOnce(&mut Builder, &mut Context) -> SemaResult<ExprId>,
) -> SemaResult<DeclId> {
    let expr = cx.with_template(params, None, |cx| {
        for &param in params {
            declare(b, cx, param)?;
        }
        definition(b, cx)
    })?;
    let concept = b.make_concept_with_expr(name, params, expr);
    declare(b, cx, concept)?;
    for &param in params {
        b.set_context(param, concept);
    }
    Ok(concept)
}

// === Requirements ===

/// `requires (parms...) { reqs... }`
///
/// Dependent calls made while `reqs` runs are recorded as required
/// expressions rather than resolved.
pub fn on_requires_expression(
    b: &mut Builder,
    cx: &mut Context,
    tparms: &[DeclId],
    parms: &[DeclId],
    reqs: impl FnOnce(&mut Builder, &mut Context) -> SemaResult<Vec<ReqId>>,
) -> SemaResult<ExprId> {
    let reqs = cx.with_requirements(|cx| {
        for &parm in parms {
            declare(b, cx, parm)?;
        }
        reqs(b, cx)
    })?;
    Ok(b.make_requires(tparms, parms, &reqs))
}

/// `expr;`
pub fn on_basic_requirement(b: &mut Builder, expr: ExprId) -> ReqId {
    b.make_basic_requirement(expr)
}

/// `typename T;`
pub fn on_type_requirement(b: &mut Builder, ty: TypeId) -> ReqId {
    b.make_type_requirement(ty)
}

/// `{ expr } -> T;`
pub fn on_conversion_requirement(b: &mut Builder, expr: ExprId, ty: TypeId) -> ReqId {
    b.make_conversion_requirement(expr, ty)
}
