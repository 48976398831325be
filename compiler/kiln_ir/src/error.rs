//! Builder errors.

use thiserror::Error;

use crate::ids::DeclId;

/// A language feature the front end recognizes but does not handle yet.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Feature {
    DestructorId,
    DecltypeType,
    ArrayType,
    UnionType,
    EnumType,
    ArrayInitialization,
    ClassInitialization,
    UnionInitialization,
    StringInitialization,
    ConstructorSearch,
    UserDefinedConversion,
    ListInitialization,
    AggregateInitialization,
    DependentFunctionCall,
}

impl Feature {
    pub const fn description(self) -> &'static str {
        match self {
            Feature::DestructorId => "destructor names",
            Feature::DecltypeType => "decltype types",
            Feature::ArrayType => "array types",
            Feature::UnionType => "union types",
            Feature::EnumType => "enum types",
            Feature::ArrayInitialization => "initialization of arrays",
            Feature::ClassInitialization => "initialization of class objects",
            Feature::UnionInitialization => "initialization of unions",
            Feature::StringInitialization => "initialization of arrays from strings",
            Feature::ConstructorSearch => "constructor selection",
            Feature::UserDefinedConversion => "user-defined conversions",
            Feature::ListInitialization => "list initialization",
            Feature::AggregateInitialization => "aggregate initialization",
            Feature::DependentFunctionCall => "dependent calls to non-template functions",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

#[derive(Error, Clone, Eq, PartialEq, Debug)]
pub enum BuildError {
    #[error("not yet implemented: {0}")]
    NotYetImplemented(Feature),
    /// A builder operation was handed a node of the wrong category.
    #[error("malformed term: {what}")]
    Malformed { what: &'static str },
    #[error("{decl:?} is already defined")]
    AlreadyDefined { decl: DeclId },
}

pub type BuildResult<T> = Result<T, BuildError>;
