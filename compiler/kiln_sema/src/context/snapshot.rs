//! Context snapshots for trial resolution.
//!
//! The parser sometimes resolves a construct one way, inspects the result,
//! and backs out to try another reading. A snapshot records the depth of
//! every context stack and the number of queued diagnostics; restoring it
//! truncates back to those marks.
//!
//! **Arena state is NOT captured.** Nodes built during a failed trial stay
//! in the term graph, unreachable from anything the parser keeps.

use crate::error::SemaResult;

use super::Context;

/// Marks of the context stacks at one point in time.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ContextSnapshot {
    scopes: usize,
    bindings: usize,
    templates: usize,
    requirements: usize,
    /// Length of the innermost requirement frame.
    required: usize,
    diagnostics: usize,
}

impl Context {
    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            scopes: self.scopes.len(),
            bindings: self.bindings.len(),
            templates: self.templates.len(),
            requirements: self.requirements.len(),
            required: self.requirements.last().map_or(0, Vec::len),
            diagnostics: self.diagnostics.len(),
        }
    }

    /// Return to the state recorded by `snapshot`.
    ///
    /// Frames pushed since the snapshot must have been popped already (their
    /// guards dropped); only bindings, required expressions and diagnostics
    /// added inside the surviving frames are rolled back.
    pub fn restore(&mut self, snapshot: ContextSnapshot) {
        debug_assert_eq!(self.scopes.len(), snapshot.scopes, "scope frame still open");
        debug_assert_eq!(self.templates.len(), snapshot.templates, "template frame still open");
        self.scopes.truncate(snapshot.scopes);
        self.bindings.truncate(snapshot.bindings);
        self.templates.truncate(snapshot.templates);
        self.requirements.truncate(snapshot.requirements);
        if let Some(frame) = self.requirements.last_mut() {
            frame.truncate(snapshot.required);
        }
        self.diagnostics.truncate(snapshot.diagnostics);
    }

    /// Run `f`, undoing its effect on the context if it fails recoverably.
    ///
    /// Fatal errors leave the context as `f` left it; they end resolution
    /// anyway.
    pub fn try_resolve<T>(&mut self, f: impl FnOnce(&mut Context) -> SemaResult<T>) -> SemaResult<T> {
        let snapshot = self.snapshot();
        let result = f(self);
        if let Err(err) = &result {
            if err.is_recoverable() {
                tracing::trace!(%err, "trial resolution failed; restoring context");
                self.restore(snapshot);
            }
        }
        result
    }
}
