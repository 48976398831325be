//! Substitution of template arguments into types.

use kiln_ir::{Builder, TypeFlags, TypeId, TypeKind};
use kiln_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use super::Substitution;

/// Replace every bound `typename` in `ty` by its argument.
///
/// Types that mention no template parameter come back unchanged, and so do
/// parameters `subst` leaves unbound. Qualifiers merge through
/// [`Builder::get_qualified_type`], so `const T` with `T := const int` is
/// the single node `const int`.
pub fn substitute_type(b: &mut Builder, ty: TypeId, subst: &Substitution) -> TypeId {
    if !b.has_flag(ty, TypeFlags::HAS_PARAM) {
        return ty;
    }
    ensure_sufficient_stack(|| substitute_inner(b, ty, subst))
}

fn substitute_inner(b: &mut Builder, ty: TypeId, subst: &Substitution) -> TypeId {
    match b.ty(ty).clone() {
        TypeKind::Typename(param) => subst.get_type(param).unwrap_or(ty),
        TypeKind::Function { params, ret } => {
            let params: SmallVec<[TypeId; 8]> = params
                .iter()
                .map(|&p| substitute_type(b, p, subst))
                .collect();
            let ret = substitute_type(b, ret, subst);
            b.get_function_type_of(&params, ret)
        }
        TypeKind::Qualified { base, quals } => {
            let base = substitute_type(b, base, subst);
            b.get_qualified_type(base, quals)
        }
        TypeKind::Pointer(inner) => {
            let inner = substitute_type(b, inner, subst);
            b.get_pointer_type(inner)
        }
        TypeKind::Reference(inner) => {
            let inner = substitute_type(b, inner, subst);
            b.get_reference_type(inner)
        }
        TypeKind::Sequence(inner) => {
            let inner = substitute_type(b, inner, subst);
            b.get_sequence_type(inner)
        }
        // Array types cannot be rebuilt yet; the rest have no components.
        TypeKind::Array { .. }
        | TypeKind::Void
        | TypeKind::Boolean
        | TypeKind::Integer { .. }
        | TypeKind::Float
        | TypeKind::Auto(_)
        | TypeKind::Declauto(_)
        | TypeKind::Decltype(_)
        | TypeKind::Class(_)
        | TypeKind::Union(_)
        | TypeKind::Enum(_)
        | TypeKind::Synthetic(_) => ty,
    }
}
