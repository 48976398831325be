//! Error codes for semantic diagnostics.
//!
//! The letter gives the severity class and the first digit the phase:
//! - E2xxx: semantic errors (typing, initialization, call resolution)
//! - W2xxx: semantic warnings
//! - E9xxx: internal errors and unimplemented features

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    // Semantic Errors (E2xxx)
    /// Expression is not callable
    E2001,
    /// Argument count mismatch
    E2002,
    /// Scalar initialized from multiple arguments
    E2003,
    /// Invalid array initialization
    E2004,
    /// Default or value initialization of a reference
    E2005,
    /// Type cannot be zero-initialized
    E2006,
    /// Reference cannot bind to initializer
    E2007,
    /// No conversion between types
    E2008,
    /// Undeclared name
    E2010,
    /// Name does not denote a value
    E2011,
    /// Redefinition in the same scope
    E2012,
    /// Template argument deduction failed
    E2013,
    /// Template specialization failed
    E2014,
    /// Call not covered by the enclosing constraints
    E2015,

    // Warnings (W2xxx)
    /// Call not covered by the enclosing constraints
    W2001,

    // Internal Errors (E9xxx)
    /// Feature not yet implemented
    E9001,
    /// Too many errors
    E9002,
    /// Unhandled case in the semantic core
    E9003,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2010,
        ErrorCode::E2011,
        ErrorCode::E2012,
        ErrorCode::E2013,
        ErrorCode::E2014,
        ErrorCode::E2015,
        ErrorCode::W2001,
        ErrorCode::E9001,
        ErrorCode::E9002,
        ErrorCode::E9003,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E2013 => "E2013",
            ErrorCode::E2014 => "E2014",
            ErrorCode::E2015 => "E2015",
            ErrorCode::W2001 => "W2001",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::E9003 => "E9003",
        }
    }

    /// One-line description, used by `--explain` style lookups.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "expression is not callable",
            ErrorCode::E2002 => "wrong number of arguments",
            ErrorCode::E2003 => "scalar initialized from multiple arguments",
            ErrorCode::E2004 => "invalid array initialization",
            ErrorCode::E2005 => "reference requires an initializer",
            ErrorCode::E2006 => "type cannot be zero-initialized",
            ErrorCode::E2007 => "reference cannot bind to initializer",
            ErrorCode::E2008 => "no conversion between types",
            ErrorCode::E2010 => "undeclared name",
            ErrorCode::E2011 => "name does not denote a value",
            ErrorCode::E2012 => "redefinition",
            ErrorCode::E2013 => "template argument deduction failed",
            ErrorCode::E2014 => "template specialization failed",
            ErrorCode::E2015 | ErrorCode::W2001 => "call not covered by constraints",
            ErrorCode::E9001 => "not yet implemented",
            ErrorCode::E9002 => "too many errors",
            ErrorCode::E9003 => "unhandled case",
        }
    }

    pub fn is_semantic_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9002 | ErrorCode::E9003)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W2001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"` or `"w2001"`.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
