//! Interned identifier spellings.
//!
//! A term graph belongs to one translation unit, but identifier spellings are
//! shared across units: [`SharedSymbols`] wraps one [`SymbolTable`] behind a
//! lock so several graphs can intern into it.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ids::to_u32;

/// An interned identifier spelling.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Symbol(u32);

impl Symbol {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Single-owner symbol table.
#[derive(Default)]
pub struct SymbolTable {
    map: FxHashMap<&'static str, Symbol>,
    strings: Vec<&'static str>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning the existing symbol if it was seen before.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            return sym;
        }
        // Spellings live for the rest of the process, like the graphs that
        // refer to them.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let sym = Symbol(to_u32(self.strings.len(), "symbols"));
        self.strings.push(leaked);
        self.map.insert(leaked, sym);
        sym
    }

    /// Spelling of an interned symbol.
    ///
    /// # Panics
    /// Panics if `sym` came from a different table.
    pub fn lookup(&self, sym: Symbol) -> &'static str {
        self.strings[sym.0 as usize]
    }

    /// Find the symbol for `s` without interning it.
    pub fn get(&self, s: &str) -> Option<Symbol> {
        self.map.get(s).copied()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Symbol table shared between term graphs.
#[derive(Clone, Default)]
pub struct SharedSymbols(Arc<RwLock<SymbolTable>>);

impl SharedSymbols {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, s: &str) -> Symbol {
        // Fast path: most lookups hit an existing spelling.
        if let Some(sym) = self.0.read().get(s) {
            return sym;
        }
        self.0.write().intern(s)
    }

    pub fn lookup(&self, sym: Symbol) -> &'static str {
        self.0.read().lookup(sym)
    }

    pub fn get(&self, s: &str) -> Option<Symbol> {
        self.0.read().get(s)
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
}

impl fmt::Debug for SharedSymbols {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSymbols")
            .field("len", &self.len())
            .finish()
    }
}
