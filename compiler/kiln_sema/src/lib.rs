//! Semantic core of the Kiln front end.
//!
//! Turns constructs the parser has recognized into typed terms, deciding
//! which language rule applies to each:
//!
//! - [`init`]: selects the initialization strategy for a target type and
//!   its initializer expressions
//! - [`make_call`]: resolves calls, deferring those that depend on template
//!   parameters and checking template calls against the ambient constraints
//! - [`template`]: deduction, specialization and constraint subsumption,
//!   behind the [`TemplateOracle`] trait
//! - [`actions`]: the entry points the parser calls
//!
//! All operations take the [`Builder`](kiln_ir::Builder) that owns the term
//! graph and, where scope or template state matters, the [`Context`].

pub mod actions;
mod call;
mod context;
mod conversion;
mod error;
pub mod init;
pub mod template;

pub use call::make_call;
pub use context::{Context, ContextSnapshot, ScopedContext, SemaConfig};
pub use conversion::{
    common_arithmetic_type, contextual_bool, dependent_conversion, standard_conversion,
    value_conversion,
};
pub use error::{SemaError, SemaResult, TypeError};
pub use init::{
    aggregate_initialize, copy_initialize, default_initialize, direct_initialize, initialize,
    list_initialize, reference_compatible, reference_initialize, reference_related,
    value_initialize, zero_initialize, Initializer,
};
pub use template::{
    DeductionError, SpecializationError, StructuralOracle, Substitution, TemplateError,
    TemplateOracle,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once. Enable with `RUST_LOG=kiln_sema=debug` or
/// `RUST_LOG=kiln_sema=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
