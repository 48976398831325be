//! The term model: one closed sum type per node category.
//!
//! Nodes refer to each other only through handles. Every classification site
//! matches exhaustively, so adding a variant is a compile error until every
//! rule that inspects the category has been taught about it.

use crate::flags::Qualifiers;
use crate::ids::{ConsId, DeclId, DefId, ExprId, InitId, NameId, ReqId, StmtId, TypeId};
use crate::symbol::Symbol;

/// A template or concept argument.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Term {
    Type(TypeId),
    Expr(ExprId),
    Decl(DeclId),
}

// === Names ===

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum NameKind {
    /// An identifier.
    Simple(Symbol),
    /// An unresolved name; each placeholder is distinct.
    Placeholder(u32),
    /// `~T`
    Destructor(TypeId),
    /// A template declaration applied to arguments.
    Template { decl: DeclId, args: Box<[Term]> },
    /// A concept declaration applied to arguments.
    Concept { decl: DeclId, args: Box<[Term]> },
    /// `scope::name`
    Qualified { scope: DeclId, name: NameId },
    /// The name of the global namespace.
    Global,
}

// === Types ===

/// Type category.
///
/// Qualification is never nested: the `base` of a `Qualified` type is
/// always an unqualified type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Void,
    Boolean,
    Integer { signed: bool, precision: u16 },
    Float,
    /// `auto`; the id makes each placeholder distinct.
    Auto(u32),
    /// `decltype(auto)`
    Declauto(u32),
    Decltype(ExprId),
    Function { params: Box<[TypeId]>, ret: TypeId },
    Qualified { base: TypeId, quals: Qualifiers },
    Pointer(TypeId),
    Reference(TypeId),
    Array { elem: TypeId, extent: ExprId },
    /// `T[]`
    Sequence(TypeId),
    Class(DeclId),
    Union(DeclId),
    Enum(DeclId),
    /// The type named by a template type parameter.
    Typename(DeclId),
    /// An archetype synthesized from a declaration during constraint checking.
    Synthetic(DeclId),
}

// === Expressions ===

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    pub const fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge
        )
    }

    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem
        )
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        }
    }
}

/// Implicit conversion applied to an operand.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConversionKind {
    /// Object-to-value (lvalue-to-rvalue).
    Value,
    /// Adds cv-qualifiers.
    Qualification,
    /// Arithmetic or pointer to `bool`.
    Boolean,
    /// Integer or `bool` to an integer of another width or signedness.
    Integer,
    /// Integer to floating point or floating point to integer.
    Float,
    /// Conversion whose meaning depends on a template parameter.
    Dependent,
    /// Argument passed through `...`.
    Ellipsis,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    Boolean(bool),
    Integer(i128),
    /// Names a variable, parameter, or function.
    Reference(DeclId),
    /// Names a template.
    TemplateRef(DeclId),
    /// A concept applied to arguments.
    Check { concept: DeclId, args: Box<[Term]> },
    Binary { op: BinaryOp, lhs: ExprId, rhs: ExprId },
    Not(ExprId),
    Call { callee: ExprId, args: Box<[ExprId]> },
    Conversion { kind: ConversionKind, source: ExprId },
    /// A value synthesized from a declaration during constraint checking.
    Synthetic(DeclId),
    Requires {
        tparms: Box<[DeclId]>,
        parms: Box<[DeclId]>,
        reqs: Box<[ReqId]>,
    },
}

/// An expression and its static type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: TypeId,
}

// === Declarations ===

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclKind {
    Namespace,
    Variable { ty: TypeId, init: Option<InitId> },
    Function {
        ty: TypeId,
        params: Box<[DeclId]>,
        def: Option<DefId>,
    },
    Class { def: Option<DefId> },
    Template {
        params: Box<[DeclId]>,
        pattern: DeclId,
        constraint: Option<ExprId>,
    },
    Concept { params: Box<[DeclId]>, def: Option<DefId> },
    ObjectParm { ty: TypeId },
    ValueParm { ty: TypeId },
    TypeParm { default: Option<TypeId> },
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Decl {
    pub name: NameId,
    /// Enclosing declaration; `None` until the declaration is placed in a scope.
    pub context: Option<DeclId>,
    pub kind: DeclKind,
}

// === Definitions ===

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum DefKind {
    Deleted,
    Defaulted,
    Expression(ExprId),
    Function(StmtId),
    Class(Box<[DeclId]>),
    Concept(Box<[ReqId]>),
}

// === Statements ===

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    Compound(Box<[StmtId]>),
    Return(ExprId),
    Expression(ExprId),
    Declaration(DeclId),
}

// === Initializers ===

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum InitKind {
    /// No initialization is performed.
    Trivial,
    Copy(ExprId),
    /// Reference binding.
    Bind(ExprId),
    Direct { ctor: DeclId, args: Box<[ExprId]> },
    Aggregate(Box<[ExprId]>),
}

/// An initializer and the type of the object it initializes.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Init {
    pub kind: InitKind,
    pub ty: TypeId,
}

// === Constraints ===

/// Normalized constraint. Interned, so equivalence is handle equality.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConsKind {
    Concept { concept: DeclId, args: Box<[Term]> },
    Predicate(ExprId),
    Conjunction(ConsId, ConsId),
    Disjunction(ConsId, ConsId),
}

// === Requirements ===

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ReqKind {
    /// The expression must be valid.
    Basic(ExprId),
    /// The type must be valid.
    Type(TypeId),
    /// The expression must be valid and convert to the type.
    Conversion { expr: ExprId, ty: TypeId },
}
