//! Constraint normalization, subsumption and admission.
//!
//! A constraint expression normalizes to a hash-consed `Cons` tree: `&&`
//! becomes a conjunction, `||` a disjunction, a concept check a concept
//! atom, and any other expression a predicate atom. `P` subsumes `Q` when
//! every clause of `P`'s disjunctive normal form covers every clause of
//! `Q`'s conjunctive normal form, where a clause covers another if they
//! share an atom.

use kiln_ir::{BinaryOp, Builder, ConsId, ConsKind, ExprId, ExprKind, ReqKind, TermGraph};
use kiln_stack::ensure_sufficient_stack;
use smallvec::{smallvec, SmallVec};

type Clause = SmallVec<[ConsId; 4]>;

/// Normalize a constraint expression.
pub fn normalize(b: &mut Builder, expr: ExprId) -> ConsId {
    ensure_sufficient_stack(|| normalize_inner(b, expr))
}

fn normalize_inner(b: &mut Builder, expr: ExprId) -> ConsId {
    match b.expr(expr).kind.clone() {
        ExprKind::Binary {
            op: BinaryOp::And,
            lhs,
            rhs,
        } => {
            let lhs = normalize(b, lhs);
            let rhs = normalize(b, rhs);
            b.get_conjunction_constraint(lhs, rhs)
        }
        ExprKind::Binary {
            op: BinaryOp::Or,
            lhs,
            rhs,
        } => {
            let lhs = normalize(b, lhs);
            let rhs = normalize(b, rhs);
            b.get_disjunction_constraint(lhs, rhs)
        }
        ExprKind::Check { concept, args } => match b.get_concept_constraint(concept, &args) {
            Ok(cons) => cons,
            Err(_) => b.get_predicate_constraint(expr),
        },
        _ => b.get_predicate_constraint(expr),
    }
}

/// Whether the constraint expression `lhs` subsumes `rhs`.
pub fn subsumes(b: &mut Builder, lhs: ExprId, rhs: ExprId) -> bool {
    let p = normalize(b, lhs);
    let q = normalize(b, rhs);
    let result = cons_subsumes(b, p, q);
    tracing::debug!(?lhs, ?rhs, result, "constraint subsumption");
    result
}

fn cons_subsumes(g: &TermGraph, p: ConsId, q: ConsId) -> bool {
    if p == q {
        return true;
    }
    let dnf = disjunctive_form(g, p);
    let cnf = conjunctive_form(g, q);
    dnf.iter().all(|pi| {
        cnf.iter()
            .all(|qj| pi.iter().any(|&a| qj.iter().any(|&b| atoms_match(g, a, b))))
    })
}

/// Atoms are identical, or are predicates over equivalent expressions.
fn atoms_match(g: &TermGraph, a: ConsId, b: ConsId) -> bool {
    if a == b {
        return true;
    }
    match (g.cons(a), g.cons(b)) {
        (ConsKind::Predicate(x), ConsKind::Predicate(y)) => g.expr_equivalent(*x, *y),
        _ => false,
    }
}

/// Clauses whose disjunction is `c`; each clause is a conjunction of atoms.
fn disjunctive_form(g: &TermGraph, c: ConsId) -> Vec<Clause> {
    ensure_sufficient_stack(|| match *g.cons(c) {
        ConsKind::Disjunction(lhs, rhs) => {
            let mut clauses = disjunctive_form(g, lhs);
            clauses.extend(disjunctive_form(g, rhs));
            clauses
        }
        ConsKind::Conjunction(lhs, rhs) => {
            distribute(&disjunctive_form(g, lhs), &disjunctive_form(g, rhs))
        }
        ConsKind::Concept { .. } | ConsKind::Predicate(_) => vec![smallvec![c]],
    })
}

/// Clauses whose conjunction is `c`; each clause is a disjunction of atoms.
fn conjunctive_form(g: &TermGraph, c: ConsId) -> Vec<Clause> {
    ensure_sufficient_stack(|| match *g.cons(c) {
        ConsKind::Conjunction(lhs, rhs) => {
            let mut clauses = conjunctive_form(g, lhs);
            clauses.extend(conjunctive_form(g, rhs));
            clauses
        }
        ConsKind::Disjunction(lhs, rhs) => {
            distribute(&conjunctive_form(g, lhs), &conjunctive_form(g, rhs))
        }
        ConsKind::Concept { .. } | ConsKind::Predicate(_) => vec![smallvec![c]],
    })
}

fn distribute(lhs: &[Clause], rhs: &[Clause]) -> Vec<Clause> {
    let mut out = Vec::with_capacity(lhs.len() * rhs.len());
    for x in lhs {
        for y in rhs {
            let mut clause = x.clone();
            clause.extend(y.iter().copied());
            out.push(clause);
        }
    }
    out
}

/// The expression `constraints` already establishes in place of `expr`.
///
/// A conjunctive atom admits `expr` when it is a predicate over an
/// equivalent expression, or a requires-expression with a basic or
/// conversion requirement over one. The result is the admitting
/// expression.
pub fn admit_expression(b: &mut Builder, constraints: ExprId, expr: ExprId) -> Option<ExprId> {
    let cons = normalize(b, constraints);
    let g: &TermGraph = b;
    let mut atoms: SmallVec<[ConsId; 8]> = SmallVec::new();
    conjunctive_atoms(g, cons, &mut atoms);
    atoms.iter().find_map(|&atom| admitted_by(g, atom, expr))
}

fn conjunctive_atoms(g: &TermGraph, c: ConsId, out: &mut SmallVec<[ConsId; 8]>) {
    ensure_sufficient_stack(|| match *g.cons(c) {
        ConsKind::Conjunction(lhs, rhs) => {
            conjunctive_atoms(g, lhs, out);
            conjunctive_atoms(g, rhs, out);
        }
        ConsKind::Disjunction(..) | ConsKind::Concept { .. } | ConsKind::Predicate(_) => {
            out.push(c);
        }
    });
}

fn admitted_by(g: &TermGraph, atom: ConsId, expr: ExprId) -> Option<ExprId> {
    let ConsKind::Predicate(pred) = *g.cons(atom) else {
        return None;
    };
    if g.expr_equivalent(pred, expr) {
        return Some(pred);
    }
    let ExprKind::Requires { reqs, .. } = &g.expr(pred).kind else {
        return None;
    };
    reqs.iter().find_map(|&req| match *g.req(req) {
        ReqKind::Basic(e) | ReqKind::Conversion { expr: e, .. } if g.expr_equivalent(e, expr) => {
            Some(e)
        }
        _ => None,
    })
}
