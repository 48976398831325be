//! Diagnostics for the Kiln front end.
//!
//! Semantic errors are values ([`Diagnostic`]) with a searchable
//! [`ErrorCode`], a message, labeled spans, notes and suggestions. The
//! semantic context collects them in a [`DiagnosticQueue`].
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] is type-level proof that at least one error was
//! emitted:
//!
//! ```text
//! let guarantee = queue.emit_error(diagnostic);
//! fn resolve() -> Result<Resolved, ErrorGuaranteed> { ... }
//! ```

mod diagnostic;
mod error_code;
mod guarantee;
pub mod queue;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
