//! Typed handles into the term graph.
//!
//! Every node category has its own 32-bit index space, so a `TypeId` can never
//! be used where an `ExprId` is expected. Handles are `Copy` and compare in
//! O(1); for interned categories (types, constraints) handle equality is
//! structural equivalence.

/// Define a handle type.
///
/// Each generated type has `new()`, `index()`, `raw()` and a `Debug`
/// implementation printing `TypeName(n)`.
macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    )* };
}

define_id!(
    /// Handle to a name node.
    NameId,
    /// Handle to an interned type.
    TypeId,
    /// Handle to an expression.
    ExprId,
    /// Handle to a declaration.
    DeclId,
    /// Handle to a statement.
    StmtId,
    /// Handle to a definition.
    DefId,
    /// Handle to an initializer.
    InitId,
    /// Handle to an interned constraint.
    ConsId,
    /// Handle to a requirement.
    ReqId,
);

impl NameId {
    /// The global-id, allocated when the graph is created.
    pub const GLOBAL: NameId = NameId(0);
}

impl DeclId {
    /// The global namespace, allocated when the graph is created.
    pub const GLOBAL_NAMESPACE: DeclId = DeclId(0);
}

impl TypeId {
    // Pre-interned fundamental types. Integer types depend on the configured
    // precision and are interned on first use.

    /// `void`
    pub const VOID: TypeId = TypeId(0);
    /// `bool`
    pub const BOOL: TypeId = TypeId(1);
    /// `float`
    pub const FLOAT: TypeId = TypeId(2);

    /// Number of types interned by `TermGraph::new`.
    pub const PREINTERNED: u32 = 3;
}

/// Convert an arena length into a handle index.
///
/// # Panics
/// Panics if an arena holds more than `u32::MAX` nodes.
#[inline]
pub(crate) fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("term graph exceeded u32::MAX {what}"))
}
