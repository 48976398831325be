//! The term graph: owning storage for every node of a translation unit.
//!
//! Each category lives in its own arena indexed by its handle type. Names,
//! types and constraints are hash-consed: the first request for a structure
//! allocates it, later requests return the same handle. All other categories
//! are plain append-only arenas.
//!
//! Mutation is crate-private. Outside `kiln_ir` the only way to add nodes is
//! through [`Builder`](crate::Builder), which applies the canonicalization
//! rules before a node reaches the graph.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::flags::TypeFlags;
use crate::ids::{
    to_u32, ConsId, DeclId, DefId, ExprId, InitId, NameId, ReqId, StmtId, TypeId,
};
use crate::symbol::SharedSymbols;
use crate::term::{
    ConsKind, Decl, DeclKind, DefKind, Expr, Init, NameKind, ReqKind, StmtKind, TypeKind,
};

/// Arena with structural deduplication.
struct Interned<K, Id> {
    nodes: Vec<K>,
    map: FxHashMap<K, Id>,
}

impl<K: Clone + Eq + Hash, Id: Copy> Interned<K, Id> {
    fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(64),
            map: FxHashMap::default(),
        }
    }

    /// Returns the handle and whether the node was newly allocated.
    fn intern(&mut self, key: K, make_id: impl FnOnce(u32) -> Id, what: &str) -> (Id, bool) {
        if let Some(&id) = self.map.get(&key) {
            return (id, false);
        }
        let id = make_id(to_u32(self.nodes.len(), what));
        self.nodes.push(key.clone());
        self.map.insert(key, id);
        (id, true)
    }
}

pub struct TermGraph {
    symbols: SharedSymbols,
    names: Interned<NameKind, NameId>,
    types: Interned<TypeKind, TypeId>,
    /// Parallel to `types`.
    type_flags: Vec<TypeFlags>,
    exprs: Vec<Expr>,
    decls: Vec<Decl>,
    stmts: Vec<StmtKind>,
    defs: Vec<DefKind>,
    inits: Vec<Init>,
    cons: Interned<ConsKind, ConsId>,
    reqs: Vec<ReqKind>,
    /// Source of fresh identities for placeholder names and types.
    next_placeholder: u32,
}

impl TermGraph {
    /// Create a graph with the global namespace, the global-id and the
    /// fixed fundamental types already allocated.
    pub fn new(symbols: SharedSymbols) -> Self {
        let mut graph = Self {
            symbols,
            names: Interned::new(),
            types: Interned::new(),
            type_flags: Vec::with_capacity(64),
            exprs: Vec::with_capacity(256),
            decls: Vec::with_capacity(64),
            stmts: Vec::new(),
            defs: Vec::new(),
            inits: Vec::new(),
            cons: Interned::new(),
            reqs: Vec::new(),
            next_placeholder: 0,
        };

        let global = graph.intern_name(NameKind::Global);
        debug_assert_eq!(global, NameId::GLOBAL);
        let ns = graph.alloc_decl(Decl {
            name: global,
            context: None,
            kind: DeclKind::Namespace,
        });
        debug_assert_eq!(ns, DeclId::GLOBAL_NAMESPACE);

        // Order matches the TypeId constants.
        for kind in [TypeKind::Void, TypeKind::Boolean, TypeKind::Float] {
            graph.intern_type(kind);
        }
        debug_assert_eq!(graph.type_count(), TypeId::PREINTERNED as usize);

        graph
    }

    #[inline]
    pub fn symbols(&self) -> &SharedSymbols {
        &self.symbols
    }

    // === Read access ===

    #[inline]
    pub fn name(&self, id: NameId) -> &NameKind {
        &self.names.nodes[id.index()]
    }

    #[inline]
    pub fn ty(&self, id: TypeId) -> &TypeKind {
        &self.types.nodes[id.index()]
    }

    #[inline]
    pub fn type_flags(&self, id: TypeId) -> TypeFlags {
        self.type_flags[id.index()]
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Static type of an expression.
    #[inline]
    pub fn expr_type(&self, id: ExprId) -> TypeId {
        self.exprs[id.index()].ty
    }

    #[inline]
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &StmtKind {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn def(&self, id: DefId) -> &DefKind {
        &self.defs[id.index()]
    }

    #[inline]
    pub fn init(&self, id: InitId) -> &Init {
        &self.inits[id.index()]
    }

    #[inline]
    pub fn cons(&self, id: ConsId) -> &ConsKind {
        &self.cons.nodes[id.index()]
    }

    #[inline]
    pub fn req(&self, id: ReqId) -> &ReqKind {
        &self.reqs[id.index()]
    }

    pub fn type_count(&self) -> usize {
        self.types.nodes.len()
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    pub fn cons_count(&self) -> usize {
        self.cons.nodes.len()
    }

    // === Allocation (crate-private) ===

    pub(crate) fn fresh_placeholder(&mut self) -> u32 {
        let id = self.next_placeholder;
        self.next_placeholder += 1;
        id
    }

    pub(crate) fn intern_name(&mut self, kind: NameKind) -> NameId {
        self.names.intern(kind, NameId::new, "names").0
    }

    pub(crate) fn intern_type(&mut self, kind: TypeKind) -> TypeId {
        let flags = self.compute_flags(&kind);
        let (id, fresh) = self.types.intern(kind, TypeId::new, "types");
        if fresh {
            self.type_flags.push(flags);
        }
        id
    }

    pub(crate) fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expressions"));
        self.exprs.push(expr);
        id
    }

    pub(crate) fn alloc_decl(&mut self, decl: Decl) -> DeclId {
        let id = DeclId::new(to_u32(self.decls.len(), "declarations"));
        self.decls.push(decl);
        id
    }

    pub(crate) fn decl_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id.index()]
    }

    pub(crate) fn alloc_stmt(&mut self, stmt: StmtKind) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len(), "statements"));
        self.stmts.push(stmt);
        id
    }

    pub(crate) fn alloc_def(&mut self, def: DefKind) -> DefId {
        let id = DefId::new(to_u32(self.defs.len(), "definitions"));
        self.defs.push(def);
        id
    }

    pub(crate) fn alloc_init(&mut self, init: Init) -> InitId {
        let id = InitId::new(to_u32(self.inits.len(), "initializers"));
        self.inits.push(init);
        id
    }

    pub(crate) fn intern_cons(&mut self, kind: ConsKind) -> ConsId {
        self.cons.intern(kind, ConsId::new, "constraints").0
    }

    pub(crate) fn alloc_req(&mut self, req: ReqKind) -> ReqId {
        let id = ReqId::new(to_u32(self.reqs.len(), "requirements"));
        self.reqs.push(req);
        id
    }

    /// Flags of a type about to be interned. Components are already interned,
    /// so this never recurses.
    fn compute_flags(&self, kind: &TypeKind) -> TypeFlags {
        match kind {
            TypeKind::Void
            | TypeKind::Boolean
            | TypeKind::Integer { .. }
            | TypeKind::Float
            | TypeKind::Enum(_)
            | TypeKind::Union(_) => TypeFlags::empty(),
            TypeKind::Auto(_) | TypeKind::Declauto(_) => TypeFlags::HAS_PLACEHOLDER,
            TypeKind::Decltype(_) => TypeFlags::HAS_DECLTYPE,
            TypeKind::Typename(_) => TypeFlags::HAS_PARAM,
            TypeKind::Synthetic(_) => TypeFlags::HAS_SYNTHETIC,
            TypeKind::Class(_) => TypeFlags::HAS_CLASS,
            TypeKind::Function { params, ret } => TypeFlags::propagate_all(
                params
                    .iter()
                    .chain(std::iter::once(ret))
                    .map(|&t| self.type_flags(t)),
            ),
            TypeKind::Qualified { base: inner, .. }
            | TypeKind::Pointer(inner)
            | TypeKind::Reference(inner)
            | TypeKind::Sequence(inner)
            | TypeKind::Array { elem: inner, .. } => self.type_flags(*inner),
        }
    }
}

impl std::fmt::Debug for TermGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermGraph")
            .field("names", &self.names.nodes.len())
            .field("types", &self.types.nodes.len())
            .field("exprs", &self.exprs.len())
            .field("decls", &self.decls.len())
            .field("cons", &self.cons.nodes.len())
            .finish_non_exhaustive()
    }
}
