//! Constraint constructors.
//!
//! Constraints are interned. Conjunction and disjunction are commutative and
//! idempotent, so their operands are ordered by handle and `P ∧ P` is `P`:
//! two constraints that differ only in operand order share one handle.

use super::Builder;
use crate::error::{BuildError, BuildResult};
use crate::ids::{ConsId, DeclId, ExprId};
use crate::term::{ConsKind, DeclKind, Term};

impl Builder {
    pub fn get_concept_constraint(&mut self, concept: DeclId, args: &[Term]) -> BuildResult<ConsId> {
        if !matches!(self.graph.decl(concept).kind, DeclKind::Concept { .. }) {
            return Err(BuildError::Malformed {
                what: "concept constraint on a non-concept",
            });
        }
        Ok(self.graph.intern_cons(ConsKind::Concept {
            concept,
            args: args.into(),
        }))
    }

    pub fn get_predicate_constraint(&mut self, expr: ExprId) -> ConsId {
        self.graph.intern_cons(ConsKind::Predicate(expr))
    }

    pub fn get_conjunction_constraint(&mut self, lhs: ConsId, rhs: ConsId) -> ConsId {
        if lhs == rhs {
            return lhs;
        }
        let (a, b) = ordered(lhs, rhs);
        self.graph.intern_cons(ConsKind::Conjunction(a, b))
    }

    pub fn get_disjunction_constraint(&mut self, lhs: ConsId, rhs: ConsId) -> ConsId {
        if lhs == rhs {
            return lhs;
        }
        let (a, b) = ordered(lhs, rhs);
        self.graph.intern_cons(ConsKind::Disjunction(a, b))
    }
}

#[inline]
fn ordered(a: ConsId, b: ConsId) -> (ConsId, ConsId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
