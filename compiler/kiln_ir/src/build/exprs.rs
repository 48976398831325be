//! Expression constructors.
//!
//! Every constructor takes or computes the expression's type up front, so an
//! expression handle never refers to a node without a type.

use super::Builder;
use crate::error::{BuildError, BuildResult};
use crate::ids::{DeclId, ExprId, ReqId, TypeId};
use crate::term::{BinaryOp, ConversionKind, DeclKind, Expr, ExprKind, Term};

impl Builder {
    fn alloc_expr(&mut self, kind: ExprKind, ty: TypeId) -> ExprId {
        self.graph.alloc_expr(Expr { kind, ty })
    }

    // === Literals ===

    pub fn get_bool(&mut self, value: bool) -> ExprId {
        self.alloc_expr(ExprKind::Boolean(value), TypeId::BOOL)
    }

    pub fn get_true(&mut self) -> ExprId {
        self.get_bool(true)
    }

    pub fn get_false(&mut self) -> ExprId {
        self.get_bool(false)
    }

    pub fn get_integer(&mut self, ty: TypeId, value: i128) -> ExprId {
        self.alloc_expr(ExprKind::Integer(value), ty)
    }

    /// The literal `0` of type `ty`.
    pub fn get_zero(&mut self, ty: TypeId) -> ExprId {
        self.get_integer(ty, 0)
    }

    pub fn get_int(&mut self, value: i128) -> ExprId {
        let ty = self.get_int_type();
        self.get_integer(ty, value)
    }

    pub fn get_uint(&mut self, value: i128) -> ExprId {
        let ty = self.get_uint_type();
        self.get_integer(ty, value)
    }

    // === References ===

    /// Reference to a variable, parameter, or function, typed as a reference
    /// to its declared type.
    pub fn make_reference(&mut self, decl: DeclId) -> BuildResult<ExprId> {
        let declared = self.graph.declared_type(decl).ok_or(BuildError::Malformed {
            what: "reference to a declaration without a type",
        })?;
        let ty = self.get_reference_type(declared);
        Ok(self.alloc_expr(ExprKind::Reference(decl), ty))
    }

    /// Reference to a template. Its type is a fresh placeholder: what the
    /// template denotes is known only once it is specialized.
    pub fn make_template_reference(&mut self, decl: DeclId) -> BuildResult<ExprId> {
        if !matches!(self.graph.decl(decl).kind, DeclKind::Template { .. }) {
            return Err(BuildError::Malformed {
                what: "template reference to a non-template",
            });
        }
        let ty = self.get_auto_type();
        Ok(self.alloc_expr(ExprKind::TemplateRef(decl), ty))
    }

    /// `C<args...>` as a `bool` expression.
    pub fn make_check(&mut self, concept: DeclId, args: &[Term]) -> BuildResult<ExprId> {
        if !matches!(self.graph.decl(concept).kind, DeclKind::Concept { .. }) {
            return Err(BuildError::Malformed {
                what: "check of a non-concept",
            });
        }
        Ok(self.alloc_expr(
            ExprKind::Check {
                concept,
                args: args.into(),
            },
            TypeId::BOOL,
        ))
    }

    // === Operators ===

    pub fn make_binary(&mut self, op: BinaryOp, ty: TypeId, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.alloc_expr(ExprKind::Binary { op, lhs, rhs }, ty)
    }

    pub fn make_and(&mut self, ty: TypeId, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.make_binary(BinaryOp::And, ty, lhs, rhs)
    }

    pub fn make_or(&mut self, ty: TypeId, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.make_binary(BinaryOp::Or, ty, lhs, rhs)
    }

    pub fn make_not(&mut self, ty: TypeId, operand: ExprId) -> ExprId {
        self.alloc_expr(ExprKind::Not(operand), ty)
    }

    pub fn make_eq(&mut self, ty: TypeId, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.make_binary(BinaryOp::Eq, ty, lhs, rhs)
    }

    pub fn make_ne(&mut self, ty: TypeId, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.make_binary(BinaryOp::Ne, ty, lhs, rhs)
    }

    pub fn make_lt(&mut self, ty: TypeId, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.make_binary(BinaryOp::Lt, ty, lhs, rhs)
    }

    pub fn make_gt(&mut self, ty: TypeId, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.make_binary(BinaryOp::Gt, ty, lhs, rhs)
    }

    pub fn make_le(&mut self, ty: TypeId, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.make_binary(BinaryOp::Le, ty, lhs, rhs)
    }

    pub fn make_ge(&mut self, ty: TypeId, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.make_binary(BinaryOp::Ge, ty, lhs, rhs)
    }

    // === Calls and Conversions ===

    /// Record a call of type `ty`. Callability is not checked here.
    pub fn make_call(&mut self, ty: TypeId, callee: ExprId, args: &[ExprId]) -> ExprId {
        self.alloc_expr(
            ExprKind::Call {
                callee,
                args: args.into(),
            },
            ty,
        )
    }

    /// Call the function `func` directly.
    pub fn make_call_to(&mut self, ty: TypeId, func: DeclId, args: &[ExprId]) -> BuildResult<ExprId> {
        let callee = self.make_reference(func)?;
        Ok(self.make_call(ty, callee, args))
    }

    pub fn make_conversion(&mut self, kind: ConversionKind, ty: TypeId, source: ExprId) -> ExprId {
        self.alloc_expr(ExprKind::Conversion { kind, source }, ty)
    }

    /// A value of the declared type of `decl`, used as an archetype.
    pub fn synthesize_expression(&mut self, decl: DeclId) -> BuildResult<ExprId> {
        let ty = self.graph.declared_type(decl).ok_or(BuildError::Malformed {
            what: "synthesized value of a declaration without a type",
        })?;
        Ok(self.alloc_expr(ExprKind::Synthetic(decl), ty))
    }

    /// `requires (parms) { reqs }`, a `bool` expression.
    pub fn make_requires(&mut self, tparms: &[DeclId], parms: &[DeclId], reqs: &[ReqId]) -> ExprId {
        self.alloc_expr(
            ExprKind::Requires {
                tparms: tparms.into(),
                parms: parms.into(),
                reqs: reqs.into(),
            },
            TypeId::BOOL,
        )
    }
}
