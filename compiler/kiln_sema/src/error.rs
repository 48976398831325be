//! Semantic errors.
//!
//! Three failure classes leave the semantic core:
//!
//! - [`SemaError::NotYetImplemented`]: a recognized category the engine does
//!   not handle. Fatal to the operation.
//! - [`SemaError::UnhandledCase`]: an internal invariant was violated. Fatal.
//! - [`SemaError::Type`]: the source program breaks a language rule.
//!   Recoverable; the parser may retry another interpretation.
//!
//! Subsumption warnings are not errors; they go straight to the diagnostic
//! queue and the call proceeds.

use kiln_diagnostic::{Diagnostic, ErrorCode};
use kiln_ir::{BuildError, DeclId, ExprId, Feature, Span, TypeId};
use thiserror::Error;

use crate::template::TemplateError;

/// A violation of a language rule.
#[derive(Error, Clone, Eq, PartialEq, Debug)]
pub enum TypeError {
    #[error("expression is not callable")]
    NotCallable { callee: ExprId },

    #[error("wrong number of arguments: expected {expected}, found {found}")]
    ArgumentCount { expected: usize, found: usize },

    #[error("scalar initialized from multiple arguments")]
    ScalarFromMultipleArguments { ty: TypeId },

    #[error("invalid array initialization")]
    InvalidArrayInitialization { ty: TypeId },

    #[error("default initialization of reference")]
    ReferenceDefaultInit { ty: TypeId },

    #[error("value initialization of reference")]
    ReferenceValueInit { ty: TypeId },

    #[error("type cannot be zero initialized")]
    CannotZeroInitialize { ty: TypeId },

    #[error("reference cannot bind to initializer")]
    ReferenceBinding { target: TypeId, expr: ExprId },

    #[error("no conversion from {from:?} to {to:?}")]
    NoConversion { from: TypeId, to: TypeId },

    #[error("no matching call: {cause}")]
    NoMatchingCall {
        callee: ExprId,
        #[source]
        cause: TemplateError,
    },

    #[error("use of undeclared name `{name}`")]
    UndeclaredName { name: String },

    #[error("name does not denote a value")]
    NotAValue { decl: DeclId },

    /// `decl` is the earlier declaration or definition.
    #[error("redefinition of {decl:?}")]
    Redefinition { decl: DeclId },

    #[error("call to function template not covered by constraints")]
    UncoveredCall { template: DeclId },
}

impl TypeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TypeError::NotCallable { .. } => ErrorCode::E2001,
            TypeError::ArgumentCount { .. } => ErrorCode::E2002,
            TypeError::ScalarFromMultipleArguments { .. } => ErrorCode::E2003,
            TypeError::InvalidArrayInitialization { .. } => ErrorCode::E2004,
            TypeError::ReferenceDefaultInit { .. } | TypeError::ReferenceValueInit { .. } => {
                ErrorCode::E2005
            }
            TypeError::CannotZeroInitialize { .. } => ErrorCode::E2006,
            TypeError::ReferenceBinding { .. } => ErrorCode::E2007,
            TypeError::NoConversion { .. } => ErrorCode::E2008,
            TypeError::NoMatchingCall { cause, .. } => match cause {
                TemplateError::Deduction(_) => ErrorCode::E2013,
                TemplateError::Specialization(_) => ErrorCode::E2014,
            },
            TypeError::UndeclaredName { .. } => ErrorCode::E2010,
            TypeError::NotAValue { .. } => ErrorCode::E2011,
            TypeError::Redefinition { .. } => ErrorCode::E2012,
            TypeError::UncoveredCall { .. } => ErrorCode::E2015,
        }
    }
}

#[derive(Error, Clone, Eq, PartialEq, Debug)]
pub enum SemaError {
    #[error("not yet implemented: {0}")]
    NotYetImplemented(Feature),

    #[error("unhandled case: {what}: {detail}")]
    UnhandledCase { what: &'static str, detail: String },

    #[error(transparent)]
    Type(#[from] TypeError),
}

pub type SemaResult<T> = Result<T, SemaError>;

impl SemaError {
    #[cold]
    pub(crate) fn unhandled(what: &'static str, detail: impl Into<String>) -> Self {
        SemaError::UnhandledCase {
            what,
            detail: detail.into(),
        }
    }

    /// Only rule violations are recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SemaError::Type(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SemaError::NotYetImplemented(_) => ErrorCode::E9001,
            SemaError::UnhandledCase { .. } => ErrorCode::E9003,
            SemaError::Type(err) => err.code(),
        }
    }

    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            SemaError::NotYetImplemented(_) => diag
                .with_label(span, "not supported yet")
                .with_note("this construct is recognized but not handled by the front end"),
            SemaError::UnhandledCase { .. } => diag
                .with_label(span, "while resolving this")
                .with_note("this is a bug in the front end"),
            SemaError::Type(TypeError::ScalarFromMultipleArguments { .. }) => diag
                .with_label(span, "too many initializers")
                .with_suggestion("initialize a scalar from a single expression"),
            SemaError::Type(TypeError::UndeclaredName { .. }) => {
                diag.with_label(span, "not found in this scope")
            }
            SemaError::Type(_) => diag.with_label(span, "here"),
        }
    }
}

impl From<BuildError> for SemaError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::NotYetImplemented(feature) => SemaError::NotYetImplemented(feature),
            BuildError::Malformed { what } => SemaError::unhandled("malformed term", what),
            BuildError::AlreadyDefined { decl } => TypeError::Redefinition { decl }.into(),
        }
    }
}
