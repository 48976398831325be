//! Type constructors.

use smallvec::SmallVec;

use super::Builder;
use crate::error::{BuildError, BuildResult};
use crate::flags::Qualifiers;
use crate::ids::{DeclId, ExprId, TypeId};
use crate::term::{DeclKind, TypeKind};
use crate::Feature;

impl Builder {
    // === Fundamental Types ===

    #[inline]
    pub fn get_void_type(&self) -> TypeId {
        TypeId::VOID
    }

    #[inline]
    pub fn get_bool_type(&self) -> TypeId {
        TypeId::BOOL
    }

    #[inline]
    pub fn get_float_type(&self) -> TypeId {
        TypeId::FLOAT
    }

    pub fn get_integer_type(&mut self, signed: bool, precision: u16) -> TypeId {
        self.graph
            .intern_type(TypeKind::Integer { signed, precision })
    }

    /// Signed integer of the configured precision.
    pub fn get_int_type(&mut self) -> TypeId {
        self.get_integer_type(true, self.config.int_precision)
    }

    /// Unsigned integer of the configured precision.
    pub fn get_uint_type(&mut self) -> TypeId {
        self.get_integer_type(false, self.config.int_precision)
    }

    // === Placeholder Types ===

    /// A fresh `auto` type, distinct from every other.
    pub fn get_auto_type(&mut self) -> TypeId {
        let id = self.graph.fresh_placeholder();
        self.graph.intern_type(TypeKind::Auto(id))
    }

    /// A fresh `decltype(auto)` type.
    pub fn get_declauto_type(&mut self) -> TypeId {
        let id = self.graph.fresh_placeholder();
        self.graph.intern_type(TypeKind::Declauto(id))
    }

    pub fn get_decltype_type(&mut self, _expr: ExprId) -> BuildResult<TypeId> {
        Err(BuildError::NotYetImplemented(Feature::DecltypeType))
    }

    // === Function Types ===

    /// Function type whose parameter types are the declared types of the
    /// object parameters `params`, in order.
    pub fn get_function_type(&mut self, params: &[DeclId], ret: TypeId) -> BuildResult<TypeId> {
        let mut types: SmallVec<[TypeId; 4]> = SmallVec::with_capacity(params.len());
        for &p in params {
            match self.graph.decl(p).kind {
                DeclKind::ObjectParm { ty } => types.push(ty),
                _ => {
                    return Err(BuildError::Malformed {
                        what: "function parameter is not an object parameter",
                    })
                }
            }
        }
        Ok(self.get_function_type_of(&types, ret))
    }

    pub fn get_function_type_of(&mut self, params: &[TypeId], ret: TypeId) -> TypeId {
        self.graph.intern_type(TypeKind::Function {
            params: params.into(),
            ret,
        })
    }

    // === Qualified Types ===

    /// Qualify `ty` by `quals`.
    ///
    /// Qualifying an already qualified type merges the qualifier sets, so a
    /// qualified type never wraps another. An empty set on an unqualified
    /// type is the type itself. References are never qualified; qualifying
    /// one yields the reference unchanged.
    pub fn get_qualified_type(&mut self, ty: TypeId, quals: Qualifiers) -> TypeId {
        let (base, merged) = match *self.graph.ty(ty) {
            TypeKind::Reference(_) => return ty,
            TypeKind::Qualified { base, quals: q0 } => {
                if q0.is_superset(quals) {
                    return ty;
                }
                (base, q0 | quals)
            }
            _ => {
                if quals.is_empty() {
                    return ty;
                }
                (ty, quals)
            }
        };
        self.graph.intern_type(TypeKind::Qualified {
            base,
            quals: merged,
        })
    }

    pub fn get_const_type(&mut self, ty: TypeId) -> TypeId {
        self.get_qualified_type(ty, Qualifiers::CONST)
    }

    pub fn get_volatile_type(&mut self, ty: TypeId) -> TypeId {
        self.get_qualified_type(ty, Qualifiers::VOLATILE)
    }

    // === Compound Types ===

    pub fn get_pointer_type(&mut self, ty: TypeId) -> TypeId {
        self.graph.intern_type(TypeKind::Pointer(ty))
    }

    pub fn get_reference_type(&mut self, ty: TypeId) -> TypeId {
        self.graph.intern_type(TypeKind::Reference(ty))
    }

    pub fn get_array_type(&mut self, _elem: TypeId, _extent: ExprId) -> BuildResult<TypeId> {
        Err(BuildError::NotYetImplemented(Feature::ArrayType))
    }

    /// `T[]`
    pub fn get_sequence_type(&mut self, ty: TypeId) -> TypeId {
        self.graph.intern_type(TypeKind::Sequence(ty))
    }

    // === User-Defined Types ===

    pub fn get_class_type(&mut self, decl: DeclId) -> BuildResult<TypeId> {
        if !matches!(self.graph.decl(decl).kind, DeclKind::Class { .. }) {
            return Err(BuildError::Malformed {
                what: "class type of a non-class declaration",
            });
        }
        Ok(self.graph.intern_type(TypeKind::Class(decl)))
    }

    pub fn get_union_type(&mut self, _decl: DeclId) -> BuildResult<TypeId> {
        Err(BuildError::NotYetImplemented(Feature::UnionType))
    }

    pub fn get_enum_type(&mut self, _decl: DeclId) -> BuildResult<TypeId> {
        Err(BuildError::NotYetImplemented(Feature::EnumType))
    }

    /// The type named by the type parameter `decl`.
    pub fn get_typename_type(&mut self, decl: DeclId) -> BuildResult<TypeId> {
        if !matches!(self.graph.decl(decl).kind, DeclKind::TypeParm { .. }) {
            return Err(BuildError::Malformed {
                what: "typename type of a non-type-parameter",
            });
        }
        Ok(self.graph.intern_type(TypeKind::Typename(decl)))
    }

    /// Archetype standing for `decl` during constraint checking.
    pub fn synthesize_type(&mut self, decl: DeclId) -> TypeId {
        self.graph.intern_type(TypeKind::Synthetic(decl))
    }
}
