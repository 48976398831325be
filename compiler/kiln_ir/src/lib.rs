//! Term graph for the Kiln front end.
//!
//! Every entity the semantic core produces is a node in one [`TermGraph`]:
//! names, types, expressions, declarations, statements, definitions,
//! initializers, constraints and requirements. Nodes refer to each other
//! through typed 32-bit handles and live as long as the graph.
//!
//! - [`term`]: the closed set of node categories
//! - [`Builder`]: the only way to add nodes; applies canonicalization
//! - `query`: type and expression predicates, as methods on [`TermGraph`]
//! - [`SharedSymbols`]: identifier spellings, shareable between graphs

mod build;
mod error;
mod flags;
mod graph;
mod ids;
mod query;
mod span;
mod symbol;
pub mod term;

pub use build::{BuildConfig, Builder};
pub use error::{BuildError, BuildResult, Feature};
pub use flags::{Qualifiers, TypeFlags};
pub use graph::TermGraph;
pub use ids::{ConsId, DeclId, DefId, ExprId, InitId, NameId, ReqId, StmtId, TypeId};
pub use span::Span;
pub use symbol::{SharedSymbols, Symbol, SymbolTable};
pub use term::{
    BinaryOp, ConsKind, ConversionKind, Decl, DeclKind, DefKind, Expr, ExprKind, Init, InitKind,
    NameKind, ReqKind, StmtKind, Term, TypeKind,
};
