//! Declarations, definitions, statements, initializers and requirements.

use super::Builder;
use crate::error::{BuildError, BuildResult};
use crate::ids::{DeclId, DefId, ExprId, InitId, NameId, ReqId, StmtId, TypeId};
use crate::term::{Decl, DeclKind, DefKind, Init, InitKind, ReqKind, StmtKind};

impl Builder {
    fn alloc_decl(&mut self, name: NameId, kind: DeclKind) -> DeclId {
        self.graph.alloc_decl(Decl {
            name,
            context: None,
            kind,
        })
    }

    // === Declarations ===

    #[inline]
    pub fn get_global_namespace(&self) -> DeclId {
        DeclId::GLOBAL_NAMESPACE
    }

    pub fn make_namespace(&mut self, name: NameId) -> DeclId {
        self.alloc_decl(name, DeclKind::Namespace)
    }

    pub fn make_variable(&mut self, name: NameId, ty: TypeId) -> DeclId {
        self.alloc_decl(name, DeclKind::Variable { ty, init: None })
    }

    pub fn make_variable_with_init(&mut self, name: NameId, ty: TypeId, init: InitId) -> DeclId {
        self.alloc_decl(
            name,
            DeclKind::Variable {
                ty,
                init: Some(init),
            },
        )
    }

    /// An undefined function taking the object parameters `params`.
    pub fn make_function(&mut self, name: NameId, params: &[DeclId], ret: TypeId) -> BuildResult<DeclId> {
        let ty = self.get_function_type(params, ret)?;
        Ok(self.alloc_decl(
            name,
            DeclKind::Function {
                ty,
                params: params.into(),
                def: None,
            },
        ))
    }

    pub fn make_class(&mut self, name: NameId) -> DeclId {
        self.alloc_decl(name, DeclKind::Class { def: None })
    }

    /// A template over `params`. The template takes the name of the
    /// declaration it parameterizes.
    pub fn make_template(&mut self, params: &[DeclId], pattern: DeclId) -> DeclId {
        self.make_template_decl(params, pattern, None)
    }

    pub fn make_constrained_template(
        &mut self,
        params: &[DeclId],
        pattern: DeclId,
        constraint: ExprId,
    ) -> DeclId {
        self.make_template_decl(params, pattern, Some(constraint))
    }

    fn make_template_decl(
        &mut self,
        params: &[DeclId],
        pattern: DeclId,
        constraint: Option<ExprId>,
    ) -> DeclId {
        let name = self.graph.decl(pattern).name;
        self.alloc_decl(
            name,
            DeclKind::Template {
                params: params.into(),
                pattern,
                constraint,
            },
        )
    }

    /// A concept without a definition yet.
    pub fn make_concept(&mut self, name: NameId, params: &[DeclId]) -> DeclId {
        self.alloc_decl(
            name,
            DeclKind::Concept {
                params: params.into(),
                def: None,
            },
        )
    }

    pub fn make_concept_with_def(&mut self, name: NameId, params: &[DeclId], def: DefId) -> DeclId {
        self.alloc_decl(
            name,
            DeclKind::Concept {
                params: params.into(),
                def: Some(def),
            },
        )
    }

    /// A concept defined by the constraint expression `expr`.
    pub fn make_concept_with_expr(&mut self, name: NameId, params: &[DeclId], expr: ExprId) -> DeclId {
        let def = self.make_expression_definition(expr);
        self.make_concept_with_def(name, params, def)
    }

    pub fn make_object_parm(&mut self, name: NameId, ty: TypeId) -> DeclId {
        self.alloc_decl(name, DeclKind::ObjectParm { ty })
    }

    pub fn make_value_parm(&mut self, name: NameId, ty: TypeId) -> DeclId {
        self.alloc_decl(name, DeclKind::ValueParm { ty })
    }

    pub fn make_type_parameter(&mut self, name: NameId) -> DeclId {
        self.alloc_decl(name, DeclKind::TypeParm { default: None })
    }

    pub fn make_type_parameter_with_default(&mut self, name: NameId, default: TypeId) -> DeclId {
        self.alloc_decl(
            name,
            DeclKind::TypeParm {
                default: Some(default),
            },
        )
    }

    /// Record the enclosing declaration of `decl`.
    pub fn set_context(&mut self, decl: DeclId, context: DeclId) {
        self.graph.decl_mut(decl).context = Some(context);
    }

    /// Attach `def` to a function, class, or concept. A declaration is
    /// defined at most once.
    pub fn define(&mut self, decl: DeclId, def: DefId) -> BuildResult<()> {
        let slot = match &mut self.graph.decl_mut(decl).kind {
            DeclKind::Function { def: slot, .. }
            | DeclKind::Class { def: slot }
            | DeclKind::Concept { def: slot, .. } => slot,
            _ => {
                return Err(BuildError::Malformed {
                    what: "definition of a declaration that cannot be defined",
                })
            }
        };
        if slot.is_some() {
            return Err(BuildError::AlreadyDefined { decl });
        }
        *slot = Some(def);
        tracing::trace!(?decl, ?def, "defined");
        Ok(())
    }

    /// Attach an initializer to a variable declared without one.
    pub fn set_initializer(&mut self, decl: DeclId, init: InitId) -> BuildResult<()> {
        match &mut self.graph.decl_mut(decl).kind {
            DeclKind::Variable { init: slot, .. } => {
                if slot.is_some() {
                    return Err(BuildError::AlreadyDefined { decl });
                }
                *slot = Some(init);
                Ok(())
            }
            _ => Err(BuildError::Malformed {
                what: "initializer for a non-variable",
            }),
        }
    }

    // === Definitions ===

    pub fn make_deleted_definition(&mut self) -> DefId {
        self.graph.alloc_def(DefKind::Deleted)
    }

    pub fn make_defaulted_definition(&mut self) -> DefId {
        self.graph.alloc_def(DefKind::Defaulted)
    }

    pub fn make_expression_definition(&mut self, expr: ExprId) -> DefId {
        self.graph.alloc_def(DefKind::Expression(expr))
    }

    pub fn make_function_definition(&mut self, body: StmtId) -> DefId {
        self.graph.alloc_def(DefKind::Function(body))
    }

    pub fn make_class_definition(&mut self, members: &[DeclId]) -> DefId {
        self.graph.alloc_def(DefKind::Class(members.into()))
    }

    pub fn make_concept_definition(&mut self, reqs: &[ReqId]) -> DefId {
        self.graph.alloc_def(DefKind::Concept(reqs.into()))
    }

    // === Statements ===

    pub fn make_compound_statement(&mut self, stmts: &[StmtId]) -> StmtId {
        self.graph.alloc_stmt(StmtKind::Compound(stmts.into()))
    }

    pub fn make_return_statement(&mut self, expr: ExprId) -> StmtId {
        self.graph.alloc_stmt(StmtKind::Return(expr))
    }

    pub fn make_expression_statement(&mut self, expr: ExprId) -> StmtId {
        self.graph.alloc_stmt(StmtKind::Expression(expr))
    }

    pub fn make_declaration_statement(&mut self, decl: DeclId) -> StmtId {
        self.graph.alloc_stmt(StmtKind::Declaration(decl))
    }

    // === Initializers ===

    pub fn make_trivial_init(&mut self, ty: TypeId) -> InitId {
        self.graph.alloc_init(Init {
            kind: InitKind::Trivial,
            ty,
        })
    }

    pub fn make_copy_init(&mut self, ty: TypeId, expr: ExprId) -> InitId {
        self.graph.alloc_init(Init {
            kind: InitKind::Copy(expr),
            ty,
        })
    }

    pub fn make_bind_init(&mut self, ty: TypeId, expr: ExprId) -> InitId {
        self.graph.alloc_init(Init {
            kind: InitKind::Bind(expr),
            ty,
        })
    }

    pub fn make_direct_init(&mut self, ty: TypeId, ctor: DeclId, args: &[ExprId]) -> InitId {
        self.graph.alloc_init(Init {
            kind: InitKind::Direct {
                ctor,
                args: args.into(),
            },
            ty,
        })
    }

    pub fn make_aggregate_init(&mut self, ty: TypeId, elems: &[ExprId]) -> InitId {
        self.graph.alloc_init(Init {
            kind: InitKind::Aggregate(elems.into()),
            ty,
        })
    }

    // === Requirements ===

    pub fn make_basic_requirement(&mut self, expr: ExprId) -> ReqId {
        self.graph.alloc_req(ReqKind::Basic(expr))
    }

    pub fn make_type_requirement(&mut self, ty: TypeId) -> ReqId {
        self.graph.alloc_req(ReqKind::Type(ty))
    }

    pub fn make_conversion_requirement(&mut self, expr: ExprId, ty: TypeId) -> ReqId {
        self.graph.alloc_req(ReqKind::Conversion { expr, ty })
    }
}
