//! Semantic context: the ambient state threaded through resolution.
//!
//! The context carries what the term graph does not:
//!
//! - the scope stack, for name lookup and redeclaration checks
//! - the template stack, with each template's constraint
//! - the requirement stack, collecting required expressions
//! - the diagnostic queue
//! - the template capability ([`TemplateOracle`])
//!
//! Frames are pushed through RAII guards ([`ScopedContext`]), so every exit
//! path restores the previous state. Trial resolution uses
//! [`Context::snapshot`] and [`Context::restore`].

mod guard;
mod snapshot;

use kiln_diagnostic::{Diagnostic, DiagnosticConfig, DiagnosticQueue, ErrorGuaranteed};
use kiln_ir::{BuildConfig, Builder, DeclId, ExprId, NameId, SharedSymbols, Span, TermGraph};

use crate::error::SemaError;
use crate::template::{StructuralOracle, TemplateOracle};

pub use guard::ScopedContext;
pub use snapshot::ContextSnapshot;

/// Configuration for semantic resolution.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SemaConfig {
    pub build: BuildConfig,
    pub diagnostics: DiagnosticConfig,
    /// Report a constrained template call the enclosing constraints do not
    /// cover as an error instead of a warning.
    pub subsumption_failures_are_errors: bool,
}

#[derive(Copy, Clone, Debug)]
struct ScopeFrame {
    /// Declaration that owns the scope.
    owner: DeclId,
    /// Index of the first binding of this scope.
    start: usize,
}

#[derive(Clone, Debug)]
struct TemplateFrame {
    params: Box<[DeclId]>,
    constraint: Option<ExprId>,
}

pub struct Context {
    config: SemaConfig,
    scopes: Vec<ScopeFrame>,
    bindings: Vec<(NameId, DeclId)>,
    templates: Vec<TemplateFrame>,
    requirements: Vec<Vec<ExprId>>,
    diagnostics: DiagnosticQueue,
    oracle: Box<dyn TemplateOracle>,
    location: Span,
}

impl Context {
    /// A context at global scope using [`StructuralOracle`].
    pub fn new(config: SemaConfig) -> Self {
        Self::with_oracle(config, Box::new(StructuralOracle))
    }

    pub fn with_oracle(config: SemaConfig, oracle: Box<dyn TemplateOracle>) -> Self {
        let diagnostics = DiagnosticQueue::with_config(config.diagnostics.clone());
        Context {
            config,
            scopes: vec![ScopeFrame {
                owner: DeclId::GLOBAL_NAMESPACE,
                start: 0,
            }],
            bindings: Vec::new(),
            templates: Vec::new(),
            requirements: Vec::new(),
            diagnostics,
            oracle,
            location: Span::DUMMY,
        }
    }

    /// A builder configured the way this context expects.
    pub fn builder(&self, symbols: SharedSymbols) -> Builder {
        Builder::with_config(symbols, self.config.build)
    }

    #[inline]
    pub fn config(&self) -> &SemaConfig {
        &self.config
    }

    #[inline]
    pub fn oracle(&self) -> &dyn TemplateOracle {
        self.oracle.as_ref()
    }

    // === Scopes ===

    /// Declaration owning the innermost scope.
    pub fn current_scope(&self) -> DeclId {
        self.scopes
            .last()
            .map_or(DeclId::GLOBAL_NAMESPACE, |frame| frame.owner)
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Innermost declaration of `name`.
    pub fn lookup(&self, name: NameId) -> Option<DeclId> {
        self.bindings
            .iter()
            .rev()
            .find(|(n, _)| *n == name)
            .map(|&(_, decl)| decl)
    }

    /// Declaration of `name` in the innermost scope only.
    pub fn lookup_local(&self, name: NameId) -> Option<DeclId> {
        let start = self.scopes.last().map_or(0, |frame| frame.start);
        self.bindings[start..]
            .iter()
            .rev()
            .find(|(n, _)| *n == name)
            .map(|&(_, decl)| decl)
    }

    /// Bind `name` in the innermost scope. Redeclaration is checked by the
    /// caller.
    pub fn bind(&mut self, name: NameId, decl: DeclId) {
        self.bindings.push((name, decl));
    }

    pub(crate) fn push_scope(&mut self, owner: DeclId) {
        self.scopes.push(ScopeFrame {
            owner,
            start: self.bindings.len(),
        });
    }

    pub(crate) fn pop_scope(&mut self) {
        // The global scope is never popped.
        if self.scopes.len() > 1 {
            if let Some(frame) = self.scopes.pop() {
                self.bindings.truncate(frame.start);
            }
        }
    }

    // === Templates ===

    pub fn in_template(&self) -> bool {
        !self.templates.is_empty()
    }

    /// Inside a template that has no constraint.
    pub fn in_unconstrained_template(&self) -> bool {
        self.templates
            .last()
            .is_some_and(|frame| frame.constraint.is_none())
    }

    /// Constraint of the innermost template, if it has one.
    pub fn current_template_constraints(&self) -> Option<ExprId> {
        self.templates.last().and_then(|frame| frame.constraint)
    }

    /// Parameters of the innermost template.
    pub fn current_template_parameters(&self) -> &[DeclId] {
        self.templates.last().map_or(&[][..], |frame| &*frame.params)
    }

    pub(crate) fn push_template(&mut self, params: &[DeclId], constraint: Option<ExprId>) {
        self.templates.push(TemplateFrame {
            params: params.into(),
            constraint,
        });
    }

    pub(crate) fn pop_template(&mut self) {
        self.templates.pop();
    }

    // === Requirements ===

    pub fn in_requirements(&self) -> bool {
        !self.requirements.is_empty()
    }

    /// Record `expr` as required by the innermost requirement frame.
    ///
    /// An equivalent expression already required in the same frame is
    /// returned instead, so each requirement is stated once.
    pub fn require_expression(&mut self, g: &TermGraph, expr: ExprId) -> ExprId {
        let Some(frame) = self.requirements.last_mut() else {
            return expr;
        };
        if let Some(&existing) = frame.iter().find(|&&e| g.expr_equivalent(e, expr)) {
            return existing;
        }
        frame.push(expr);
        expr
    }

    /// Expressions required so far in the innermost requirement frame.
    pub fn required_expressions(&self) -> &[ExprId] {
        self.requirements.last().map_or(&[][..], Vec::as_slice)
    }

    pub(crate) fn push_requirements(&mut self) {
        self.requirements.push(Vec::new());
    }

    pub(crate) fn pop_requirements(&mut self) {
        self.requirements.pop();
    }

    // === Diagnostics ===

    /// Source location attached to diagnostics reported from here on.
    pub fn set_location(&mut self, span: Span) {
        self.location = span;
    }

    pub fn location(&self) -> Span {
        self.location
    }

    pub fn warning(&mut self, diag: Diagnostic) {
        tracing::warn!(code = %diag.code, message = %diag.message, "semantic warning");
        self.diagnostics.add(diag);
    }

    pub fn error(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        self.diagnostics.emit_error(diag)
    }

    /// Report `err` at the current location.
    pub fn report(&mut self, err: &SemaError) -> ErrorGuaranteed {
        let diag = err.to_diagnostic(self.location);
        self.error(diag)
    }

    pub fn diagnostics(&self) -> &DiagnosticQueue {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut DiagnosticQueue {
        &mut self.diagnostics
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("scopes", &self.scopes.len())
            .field("bindings", &self.bindings.len())
            .field("templates", &self.templates.len())
            .field("requirements", &self.requirements.len())
            .field("diagnostics", &self.diagnostics.len())
            .field("oracle", &self.oracle)
            .finish_non_exhaustive()
    }
}
