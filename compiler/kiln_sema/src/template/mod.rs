//! Template capability: deduction, specialization, subsumption, admission.
//!
//! Call resolution consults these four operations through the
//! [`TemplateOracle`] trait and never inspects how they are decided.
//! [`StructuralOracle`] is the reference implementation: structural type
//! matching for deduction, substitution through the function type for
//! specialization, and normal-form comparison for subsumption.

mod constraints;
mod structural;
mod substitute;

use std::fmt;

use kiln_ir::{BuildError, Builder, DeclId, ExprId, Term, TypeId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

pub use constraints::{admit_expression, normalize, subsumes};
pub use structural::StructuralOracle;
pub use substitute::substitute_type;

/// Template-argument deduction, template specialization and constraint
/// ordering, as call resolution needs them.
pub trait TemplateOracle: fmt::Debug {
    /// Deduce arguments for `tparams` by matching the function parameters
    /// `params` against the call arguments `args`.
    fn deduce_from_call(
        &self,
        b: &mut Builder,
        tparams: &[DeclId],
        params: &[DeclId],
        args: &[ExprId],
    ) -> Result<Substitution, DeductionError>;

    /// Instantiate the pattern of `template` under `subst`.
    fn specialize_template(
        &self,
        b: &mut Builder,
        template: DeclId,
        subst: &Substitution,
    ) -> Result<DeclId, SpecializationError>;

    /// Whether the constraint `lhs` subsumes the constraint `rhs`.
    fn subsumes(&self, b: &mut Builder, lhs: ExprId, rhs: ExprId) -> bool;

    /// The expression `constraints` guarantees valid in place of `expr`.
    fn admit_expression(&self, b: &mut Builder, constraints: ExprId, expr: ExprId)
        -> Option<ExprId>;
}

/// Template arguments for an ordered list of template parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Substitution {
    params: SmallVec<[DeclId; 4]>,
    bindings: FxHashMap<DeclId, Term>,
}

impl Substitution {
    pub fn new(params: &[DeclId]) -> Self {
        Substitution {
            params: params.iter().copied().collect(),
            bindings: FxHashMap::default(),
        }
    }

    pub fn params(&self) -> &[DeclId] {
        &self.params
    }

    pub fn get(&self, param: DeclId) -> Option<Term> {
        self.bindings.get(&param).copied()
    }

    /// The type bound to `param`, if it is bound to a type.
    pub fn get_type(&self, param: DeclId) -> Option<TypeId> {
        match self.get(param)? {
            Term::Type(ty) => Some(ty),
            Term::Expr(_) | Term::Decl(_) => None,
        }
    }

    pub fn is_bound(&self, param: DeclId) -> bool {
        self.bindings.contains_key(&param)
    }

    /// Bind `param` to `arg`.
    ///
    /// Rebinding to the same argument is a no-op. Rebinding to a different
    /// one fails with the existing binding.
    pub fn bind(&mut self, param: DeclId, arg: Term) -> Result<(), Term> {
        match self.bindings.get(&param) {
            Some(&prev) if prev != arg => Err(prev),
            Some(_) => Ok(()),
            None => {
                self.bindings.insert(param, arg);
                Ok(())
            }
        }
    }

    /// First parameter without an argument.
    pub fn first_unbound(&self) -> Option<DeclId> {
        self.params.iter().copied().find(|p| !self.is_bound(*p))
    }

    pub fn is_complete(&self) -> bool {
        self.first_unbound().is_none()
    }

    /// Arguments in parameter order; fails with the first unbound parameter.
    pub fn args(&self) -> Result<Vec<Term>, DeclId> {
        self.params
            .iter()
            .map(|&p| self.get(p).ok_or(p))
            .collect()
    }
}

#[derive(Error, Clone, Eq, PartialEq, Debug)]
pub enum DeductionError {
    #[error("expected {expected} arguments, found {found}")]
    ArgumentCount { expected: usize, found: usize },

    #[error("parameter type {param:?} does not match argument type {arg:?}")]
    Mismatch { param: TypeId, arg: TypeId },

    #[error("conflicting arguments deduced for {param:?}: {first:?} and {second:?}")]
    Conflict {
        param: DeclId,
        first: Term,
        second: Term,
    },

    #[error("could not deduce an argument for {param:?}")]
    Undeduced { param: DeclId },

    #[error("{param:?} is not an object parameter")]
    NotAnObjectParameter { param: DeclId },
}

#[derive(Error, Clone, Eq, PartialEq, Debug)]
pub enum SpecializationError {
    #[error("{template:?} is not a function template")]
    NotAFunctionTemplate { template: DeclId },

    #[error("no argument for template parameter {param:?}")]
    MissingArgument { param: DeclId },

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Why a template could not be called.
#[derive(Error, Clone, Eq, PartialEq, Debug)]
pub enum TemplateError {
    #[error("deduction failed: {0}")]
    Deduction(#[from] DeductionError),

    #[error("specialization failed: {0}")]
    Specialization(#[from] SpecializationError),
}
