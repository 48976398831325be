//! RAII guards for context frames.
//!
//! Each `enter_*` method pushes a frame and returns a [`ScopedContext`]
//! that pops it again when dropped, including during unwinding. The guard
//! implements `Deref`/`DerefMut` to [`Context`], so it is used exactly like
//! the context itself:
//!
//! ```text
//! {
//!     let mut cx = cx.enter_template(&params, constraint);
//!     let body = actions::on_call_expression(b, &mut cx, callee, &args)?;
//! } // template frame popped here
//!
//! cx.with_requirements(|cx| actions::on_call_expression(b, cx, callee, &args))
//! ```

use std::ops::{Deref, DerefMut};

use kiln_ir::{DeclId, ExprId};

use super::Context;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Frame {
    Scope,
    Template,
    Requirements,
}

/// Guard that pops one context frame on drop.
pub struct ScopedContext<'cx> {
    cx: &'cx mut Context,
    frame: Frame,
}

impl Drop for ScopedContext<'_> {
    fn drop(&mut self) {
        match self.frame {
            Frame::Scope => self.cx.pop_scope(),
            Frame::Template => {
                self.cx.pop_template();
                self.cx.pop_scope();
            }
            Frame::Requirements => {
                self.cx.pop_requirements();
                self.cx.pop_scope();
            }
        }
    }
}

impl Deref for ScopedContext<'_> {
    type Target = Context;

    fn deref(&self) -> &Context {
        self.cx
    }
}

impl DerefMut for ScopedContext<'_> {
    fn deref_mut(&mut self) -> &mut Context {
        self.cx
    }
}

impl Context {
    /// Enter the scope of `owner` (a namespace, class or function).
    pub fn enter_scope(&mut self, owner: DeclId) -> ScopedContext<'_> {
        self.push_scope(owner);
        ScopedContext {
            cx: self,
            frame: Frame::Scope,
        }
    }

    /// Enter a template with parameters `params`.
    ///
    /// The template gets its own scope for its parameters, owned by the
    /// enclosing declaration.
    pub fn enter_template(
        &mut self,
        params: &[DeclId],
        constraint: Option<ExprId>,
    ) -> ScopedContext<'_> {
        let owner = self.current_scope();
        self.push_scope(owner);
        self.push_template(params, constraint);
        ScopedContext {
            cx: self,
            frame: Frame::Template,
        }
    }

    /// Enter the body of a requires-expression or concept definition.
    pub fn enter_requirements(&mut self) -> ScopedContext<'_> {
        let owner = self.current_scope();
        self.push_scope(owner);
        self.push_requirements();
        ScopedContext {
            cx: self,
            frame: Frame::Requirements,
        }
    }

    pub fn with_scope<T>(&mut self, owner: DeclId, f: impl FnOnce(&mut Context) -> T) -> T {
        let mut scoped = self.enter_scope(owner);
        f(&mut *scoped)
    }

    pub fn with_template<T>(
        &mut self,
        params: &[DeclId],
        constraint: Option<ExprId>,
        f: impl FnOnce(&mut Context) -> T,
    ) -> T {
        let mut scoped = self.enter_template(params, constraint);
        f(&mut *scoped)
    }

    pub fn with_requirements<T>(&mut self, f: impl FnOnce(&mut Context) -> T) -> T {
        let mut scoped = self.enter_requirements();
        f(&mut *scoped)
    }
}
