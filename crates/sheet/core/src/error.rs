//! Common error infrastructure for sheet-core.
//!
//! Errors in this crate never abort a derivation pass. They are classified
//! here, attached to the offending change, and surfaced through
//! [`crate::engine::DerivationReport`] so the rest of the pass (and every
//! other character) keeps computing.
//!
//! # Taxonomy
//!
//! - [`FormulaError`]: an authored expression failed to lex, parse or evaluate.
//!   Recovered locally; the change contributes nothing for the pass.
//! - [`ChangeError::DuplicateId`]: two changes share an id within one pass.
//!   A content-pipeline defect; only the duplicate is dropped.
//! - Unresolvable targets are *not* errors. The change is inert.

use crate::change::ChangeId;
use crate::engine::PassPhase;

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Authored content is wrong; the author can fix it.
    ///
    /// Examples: malformed formula, unknown `@` reference
    Content,

    /// Content pipeline produced data that violates an engine invariant.
    ///
    /// Examples: duplicate change id within one pass
    Invariant,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Invariant => "invariant",
        }
    }

    /// Returns true if the author of the content can fix this error.
    pub const fn is_author_fixable(&self) -> bool {
        matches!(self, Self::Content)
    }
}

/// Common trait for all sheet-core errors.
pub trait SheetError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Failure while evaluating an authored formula.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormulaError {
    #[error("unexpected character at offset {offset} in `{expr}`")]
    Lex { expr: String, offset: usize },

    #[error("cannot parse `{expr}`: {message}")]
    Parse { expr: String, message: String },

    #[error("unknown reference @{0}")]
    UnknownReference(String),

    #[error("unknown function {0}()")]
    UnknownFunction(String),

    #[error("{function}() expects {expected} argument(s), found {found}")]
    Arity {
        function: String,
        expected: String,
        found: usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("formula produced a non-finite value")]
    NonFinite,

    #[error("computed formula failed: {0}")]
    Computed(String),
}

impl FormulaError {
    pub(crate) fn parse(expr: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            expr: expr.to_string(),
            message: message.into(),
        }
    }
}

impl SheetError for FormulaError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Content
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Lex { .. } => "FORMULA_LEX",
            Self::Parse { .. } => "FORMULA_PARSE",
            Self::UnknownReference(_) => "FORMULA_UNKNOWN_REFERENCE",
            Self::UnknownFunction(_) => "FORMULA_UNKNOWN_FUNCTION",
            Self::Arity { .. } => "FORMULA_ARITY",
            Self::DivisionByZero => "FORMULA_DIVISION_BY_ZERO",
            Self::NonFinite => "FORMULA_NON_FINITE",
            Self::Computed(_) => "FORMULA_COMPUTED",
        }
    }
}

/// Errors attributed to a single change during a pass.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChangeError {
    #[error("change {change}: {source}")]
    Formula {
        change: ChangeId,
        #[source]
        source: FormulaError,
    },

    #[error("change id {0} appears more than once in this pass; duplicate dropped")]
    DuplicateId(ChangeId),
}

impl ChangeError {
    /// Id of the change this error is attributed to.
    pub fn change_id(&self) -> &ChangeId {
        match self {
            Self::Formula { change, .. } => change,
            Self::DuplicateId(change) => change,
        }
    }
}

impl SheetError for ChangeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Formula { .. } => ErrorSeverity::Content,
            Self::DuplicateId(_) => ErrorSeverity::Invariant,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Formula { source, .. } => source.error_code(),
            Self::DuplicateId(_) => "DUPLICATE_CHANGE_ID",
        }
    }
}

/// Associates a pass phase with the underlying error.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseError<E> {
    pub phase: PassPhase,
    pub error: E,
}

impl<E> PhaseError<E> {
    pub fn new(phase: PassPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: core::fmt::Display> core::fmt::Display for PhaseError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: core::fmt::Display + core::fmt::Debug> std::error::Error for PhaseError<E> {}
