//! The builder: the single entry point for new term-graph nodes.
//!
//! The builder owns the [`TermGraph`] and dereferences to it, so read access
//! goes straight through. Canonicalization happens here, at construction:
//!
//! - names, types and constraints are interned;
//! - qualifiers are merged instead of nested;
//! - `auto`, `decltype(auto)` and placeholder names get a fresh identity;
//! - conjunctions and disjunctions order their operands.
//!
//! Operations that can be handed a node of the wrong category, or that build
//! a category not supported yet, return [`BuildResult`].

mod cons;
mod decls;
mod exprs;
mod types;

use std::ops::Deref;

use crate::error::{BuildError, BuildResult};
use crate::graph::TermGraph;
use crate::ids::{DeclId, NameId, TypeId};
use crate::symbol::SharedSymbols;
use crate::term::{DeclKind, NameKind, Term};
use crate::Feature;

/// Builder configuration.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildConfig {
    /// Width of `int` and `unsigned int`.
    pub int_precision: u16,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self { int_precision: 32 }
    }
}

pub struct Builder {
    graph: TermGraph,
    config: BuildConfig,
}

impl Builder {
    pub fn new(symbols: SharedSymbols) -> Self {
        Self::with_config(symbols, BuildConfig::default())
    }

    pub fn with_config(symbols: SharedSymbols, config: BuildConfig) -> Self {
        Self {
            graph: TermGraph::new(symbols),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> BuildConfig {
        self.config
    }

    #[inline]
    pub fn graph(&self) -> &TermGraph {
        &self.graph
    }

    /// Finish building and hand the graph to later stages.
    pub fn into_graph(self) -> TermGraph {
        self.graph
    }

    // === Names ===

    /// Intern `s` and return its simple-id.
    pub fn get_id(&mut self, s: &str) -> NameId {
        let sym = self.graph.symbols().intern(s);
        self.graph.intern_name(NameKind::Simple(sym))
    }

    /// A name distinct from every other name in the graph.
    pub fn get_placeholder_id(&mut self) -> NameId {
        let id = self.graph.fresh_placeholder();
        self.graph.intern_name(NameKind::Placeholder(id))
    }

    pub fn get_destructor_id(&mut self, _ty: TypeId) -> BuildResult<NameId> {
        Err(BuildError::NotYetImplemented(Feature::DestructorId))
    }

    pub fn get_template_id(&mut self, decl: DeclId, args: &[Term]) -> BuildResult<NameId> {
        if !matches!(self.graph.decl(decl).kind, DeclKind::Template { .. }) {
            return Err(BuildError::Malformed {
                what: "template-id of a non-template",
            });
        }
        Ok(self.graph.intern_name(NameKind::Template {
            decl,
            args: args.into(),
        }))
    }

    pub fn get_concept_id(&mut self, decl: DeclId, args: &[Term]) -> BuildResult<NameId> {
        if !matches!(self.graph.decl(decl).kind, DeclKind::Concept { .. }) {
            return Err(BuildError::Malformed {
                what: "concept-id of a non-concept",
            });
        }
        Ok(self.graph.intern_name(NameKind::Concept {
            decl,
            args: args.into(),
        }))
    }

    pub fn get_qualified_id(&mut self, scope: DeclId, name: NameId) -> NameId {
        self.graph.intern_name(NameKind::Qualified { scope, name })
    }

    #[inline]
    pub fn get_global_id(&self) -> NameId {
        NameId::GLOBAL
    }
}

impl Deref for Builder {
    type Target = TermGraph;

    #[inline]
    fn deref(&self) -> &TermGraph {
        &self.graph
    }
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("config", &self.config)
            .field("graph", &self.graph)
            .finish()
    }
}

#[cfg(test)]
mod tests;
