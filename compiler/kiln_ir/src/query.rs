//! Type and expression predicates.
//!
//! Stateless queries over a finished or in-progress graph. Type queries are
//! O(1): dependence comes from the flags computed at interning, and type
//! equivalence is handle equality. Only expression equivalence walks
//! structure.

use kiln_stack::ensure_sufficient_stack;

use crate::flags::{Qualifiers, TypeFlags};
use crate::graph::TermGraph;
use crate::ids::{DeclId, ExprId, ReqId, TypeId};
use crate::term::{DeclKind, ExprKind, ReqKind, Term, TypeKind};

impl TermGraph {
    // === Type Categories ===

    pub fn is_void_type(&self, ty: TypeId) -> bool {
        matches!(self.ty(ty), TypeKind::Void)
    }

    pub fn is_boolean_type(&self, ty: TypeId) -> bool {
        matches!(self.ty(ty), TypeKind::Boolean)
    }

    pub fn is_integer_type(&self, ty: TypeId) -> bool {
        matches!(self.ty(ty), TypeKind::Integer { .. })
    }

    pub fn is_float_type(&self, ty: TypeId) -> bool {
        matches!(self.ty(ty), TypeKind::Float)
    }

    /// `bool` or an integer type.
    pub fn is_integral_type(&self, ty: TypeId) -> bool {
        matches!(self.ty(ty), TypeKind::Boolean | TypeKind::Integer { .. })
    }

    pub fn is_arithmetic_type(&self, ty: TypeId) -> bool {
        matches!(
            self.ty(ty),
            TypeKind::Boolean | TypeKind::Integer { .. } | TypeKind::Float
        )
    }

    pub fn is_scalar_type(&self, ty: TypeId) -> bool {
        matches!(
            self.ty(ty),
            TypeKind::Boolean
                | TypeKind::Integer { .. }
                | TypeKind::Float
                | TypeKind::Pointer(_)
                | TypeKind::Enum(_)
        )
    }

    pub fn is_function_type(&self, ty: TypeId) -> bool {
        matches!(self.ty(ty), TypeKind::Function { .. })
    }

    pub fn is_pointer_type(&self, ty: TypeId) -> bool {
        matches!(self.ty(ty), TypeKind::Pointer(_))
    }

    pub fn is_reference_type(&self, ty: TypeId) -> bool {
        matches!(self.ty(ty), TypeKind::Reference(_))
    }

    pub fn is_array_type(&self, ty: TypeId) -> bool {
        matches!(self.ty(ty), TypeKind::Array { .. })
    }

    pub fn is_sequence_type(&self, ty: TypeId) -> bool {
        matches!(self.ty(ty), TypeKind::Sequence(_))
    }

    pub fn is_class_type(&self, ty: TypeId) -> bool {
        matches!(self.ty(ty), TypeKind::Class(_))
    }

    pub fn is_union_type(&self, ty: TypeId) -> bool {
        matches!(self.ty(ty), TypeKind::Union(_))
    }

    pub fn is_qualified_type(&self, ty: TypeId) -> bool {
        matches!(self.ty(ty), TypeKind::Qualified { .. })
    }

    pub fn is_maybe_qualified_class_type(&self, ty: TypeId) -> bool {
        self.is_class_type(self.unqualified_type(ty))
    }

    pub fn is_maybe_qualified_union_type(&self, ty: TypeId) -> bool {
        self.is_union_type(self.unqualified_type(ty))
    }

    /// Class or union, possibly qualified.
    pub fn is_maybe_qualified_class_or_union(&self, ty: TypeId) -> bool {
        matches!(
            self.ty(self.unqualified_type(ty)),
            TypeKind::Class(_) | TypeKind::Union(_)
        )
    }

    /// Mentions a template parameter, a placeholder, or `decltype`.
    #[inline]
    pub fn is_dependent_type(&self, ty: TypeId) -> bool {
        self.type_flags(ty).is_dependent()
    }

    #[inline]
    pub fn has_flag(&self, ty: TypeId, flag: TypeFlags) -> bool {
        self.type_flags(ty).contains(flag)
    }

    /// Interned types are equivalent exactly when their handles are equal.
    #[inline]
    pub fn is_equivalent(&self, a: TypeId, b: TypeId) -> bool {
        a == b
    }

    // === Type Decomposition ===

    /// Strip one level of reference.
    pub fn non_reference_type(&self, ty: TypeId) -> TypeId {
        match *self.ty(ty) {
            TypeKind::Reference(inner) => inner,
            _ => ty,
        }
    }

    pub fn unqualified_type(&self, ty: TypeId) -> TypeId {
        match *self.ty(ty) {
            TypeKind::Qualified { base, .. } => base,
            _ => ty,
        }
    }

    /// Qualifier set of `ty`; empty for an unqualified type.
    pub fn qualifiers(&self, ty: TypeId) -> Qualifiers {
        match *self.ty(ty) {
            TypeKind::Qualified { quals, .. } => quals,
            _ => Qualifiers::empty(),
        }
    }

    pub fn function_parameter_types(&self, ty: TypeId) -> Option<&[TypeId]> {
        match self.ty(ty) {
            TypeKind::Function { params, .. } => Some(params),
            _ => None,
        }
    }

    pub fn function_return_type(&self, ty: TypeId) -> Option<TypeId> {
        match *self.ty(ty) {
            TypeKind::Function { ret, .. } => Some(ret),
            _ => None,
        }
    }

    // === Declarations ===

    /// Type of the entity a declaration introduces, for declarations that
    /// introduce a typed entity.
    pub fn declared_type(&self, decl: DeclId) -> Option<TypeId> {
        match self.decl(decl).kind {
            DeclKind::Variable { ty, .. }
            | DeclKind::Function { ty, .. }
            | DeclKind::ObjectParm { ty }
            | DeclKind::ValueParm { ty } => Some(ty),
            DeclKind::Namespace
            | DeclKind::Class { .. }
            | DeclKind::Template { .. }
            | DeclKind::Concept { .. }
            | DeclKind::TypeParm { .. } => None,
        }
    }

    pub fn is_function_decl(&self, decl: DeclId) -> bool {
        matches!(self.decl(decl).kind, DeclKind::Function { .. })
    }

    pub fn is_template_decl(&self, decl: DeclId) -> bool {
        matches!(self.decl(decl).kind, DeclKind::Template { .. })
    }

    /// Constraint expression of a template; `None` when unconstrained or not
    /// a template.
    pub fn template_constraint(&self, decl: DeclId) -> Option<ExprId> {
        match self.decl(decl).kind {
            DeclKind::Template { constraint, .. } => constraint,
            _ => None,
        }
    }

    // === Expressions ===

    #[inline]
    pub fn is_type_dependent(&self, expr: ExprId) -> bool {
        self.is_dependent_type(self.expr_type(expr))
    }

    pub fn any_type_dependent(&self, exprs: &[ExprId]) -> bool {
        exprs.iter().any(|&e| self.is_type_dependent(e))
    }

    /// Structural equivalence of two expressions.
    ///
    /// Declarations and types compare by handle. Result types are compared
    /// only where the kind does not already determine them (literals and
    /// conversions), so two calls with fresh placeholder types are still
    /// equivalent when callee and arguments are.
    pub fn expr_equivalent(&self, a: ExprId, b: ExprId) -> bool {
        if a == b {
            return true;
        }
        ensure_sufficient_stack(|| self.expr_equivalent_inner(a, b))
    }

    fn expr_equivalent_inner(&self, a: ExprId, b: ExprId) -> bool {
        let (ea, eb) = (self.expr(a), self.expr(b));
        match (&ea.kind, &eb.kind) {
            (ExprKind::Boolean(x), ExprKind::Boolean(y)) => x == y,
            (ExprKind::Integer(x), ExprKind::Integer(y)) => x == y && ea.ty == eb.ty,
            (ExprKind::Reference(x), ExprKind::Reference(y))
            | (ExprKind::TemplateRef(x), ExprKind::TemplateRef(y))
            | (ExprKind::Synthetic(x), ExprKind::Synthetic(y)) => x == y,
            (
                ExprKind::Check { concept: c1, args: a1 },
                ExprKind::Check { concept: c2, args: a2 },
            ) => c1 == c2 && self.terms_equivalent(a1, a2),
            (
                ExprKind::Binary { op: o1, lhs: l1, rhs: r1 },
                ExprKind::Binary { op: o2, lhs: l2, rhs: r2 },
            ) => o1 == o2 && self.expr_equivalent(*l1, *l2) && self.expr_equivalent(*r1, *r2),
            (ExprKind::Not(x), ExprKind::Not(y)) => self.expr_equivalent(*x, *y),
            (
                ExprKind::Call { callee: f1, args: a1 },
                ExprKind::Call { callee: f2, args: a2 },
            ) => self.expr_equivalent(*f1, *f2) && self.exprs_equivalent(a1, a2),
            (
                ExprKind::Conversion { kind: k1, source: s1 },
                ExprKind::Conversion { kind: k2, source: s2 },
            ) => k1 == k2 && ea.ty == eb.ty && self.expr_equivalent(*s1, *s2),
            (
                ExprKind::Requires { tparms: t1, parms: p1, reqs: r1 },
                ExprKind::Requires { tparms: t2, parms: p2, reqs: r2 },
            ) => {
                t1 == t2
                    && p1 == p2
                    && r1.len() == r2.len()
                    && r1.iter().zip(r2.iter()).all(|(&x, &y)| self.req_equivalent(x, y))
            }
            _ => false,
        }
    }

    pub fn exprs_equivalent(&self, a: &[ExprId], b: &[ExprId]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| self.expr_equivalent(x, y))
    }

    fn terms_equivalent(&self, a: &[Term], b: &[Term]) -> bool {
        a.len() == b.len()
            && a.iter().zip(b).all(|(x, y)| match (x, y) {
                (Term::Expr(x), Term::Expr(y)) => self.expr_equivalent(*x, *y),
                _ => x == y,
            })
    }

    fn req_equivalent(&self, a: ReqId, b: ReqId) -> bool {
        match (self.req(a), self.req(b)) {
            (ReqKind::Basic(x), ReqKind::Basic(y)) => self.expr_equivalent(*x, *y),
            (ReqKind::Type(x), ReqKind::Type(y)) => x == y,
            (
                ReqKind::Conversion { expr: e1, ty: t1 },
                ReqKind::Conversion { expr: e2, ty: t2 },
            ) => t1 == t2 && self.expr_equivalent(*e1, *e2),
            _ => false,
        }
    }
}
