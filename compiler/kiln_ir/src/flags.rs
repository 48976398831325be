//! Qualifier sets and pre-computed type flags.
//!
//! Both are `bitflags` sets. [`Qualifiers`] is part of a qualified type's
//! identity; [`TypeFlags`] is derived once when a type is interned, so
//! dependence queries never traverse the type.

use bitflags::bitflags;

bitflags! {
    /// cv-qualifier set of a qualified type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Qualifiers: u8 {
        const CONST = 1 << 0;
        const VOLATILE = 1 << 1;
        const CONST_VOLATILE = Self::CONST.bits() | Self::VOLATILE.bits();
    }
}

impl Qualifiers {
    /// `self` is at least as qualified as `other`.
    #[inline]
    pub const fn is_superset(self, other: Self) -> bool {
        self.contains(other)
    }
}

bitflags! {
    /// Presence flags computed at interning time.
    ///
    /// Every flag propagates from a type's components to the type itself.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u8 {
        /// Contains `auto` or `decltype(auto)`.
        const HAS_PLACEHOLDER = 1 << 0;
        /// Contains a template type parameter (`typename` type).
        const HAS_PARAM = 1 << 1;
        /// Contains a `decltype(e)` type.
        const HAS_DECLTYPE = 1 << 2;
        /// Contains a synthesized archetype type.
        const HAS_SYNTHETIC = 1 << 3;
        /// Contains a class type.
        const HAS_CLASS = 1 << 4;
    }
}

impl TypeFlags {
    /// Flags whose presence makes a type dependent.
    pub const DEPENDENT: Self = Self::from_bits_truncate(
        Self::HAS_PLACEHOLDER.bits() | Self::HAS_PARAM.bits() | Self::HAS_DECLTYPE.bits(),
    );

    #[inline]
    pub const fn is_dependent(self) -> bool {
        self.intersects(Self::DEPENDENT)
    }

    /// Union of the flags of all components.
    #[inline]
    pub fn propagate_all(children: impl IntoIterator<Item = Self>) -> Self {
        children.into_iter().fold(Self::empty(), Self::union)
    }
}

impl Default for Qualifiers {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for TypeFlags {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superset_is_containment() {
        assert!(Qualifiers::CONST_VOLATILE.is_superset(Qualifiers::CONST));
        assert!(Qualifiers::CONST.is_superset(Qualifiers::empty()));
        assert!(!Qualifiers::empty().is_superset(Qualifiers::CONST));
        assert!(!Qualifiers::CONST.is_superset(Qualifiers::VOLATILE));
    }

    #[test]
    fn dependence_comes_from_placeholders_params_and_decltype() {
        assert!(TypeFlags::HAS_PARAM.is_dependent());
        assert!(TypeFlags::HAS_PLACEHOLDER.is_dependent());
        assert!(TypeFlags::HAS_DECLTYPE.is_dependent());
        assert!(!TypeFlags::HAS_SYNTHETIC.is_dependent());
        assert!(!TypeFlags::HAS_CLASS.is_dependent());
    }

    #[test]
    fn propagation_unions_children() {
        let flags = TypeFlags::propagate_all([TypeFlags::HAS_CLASS, TypeFlags::HAS_PARAM]);
        assert!(flags.contains(TypeFlags::HAS_CLASS | TypeFlags::HAS_PARAM));
        assert!(TypeFlags::propagate_all([]).is_empty());
    }
}
