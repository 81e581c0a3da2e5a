//! The result/error aggregator.
//!
//! Validation rules append `ValidationError`s to a `ResultStatus`. A status
//! built for transition validation is fail-fast: the call that brings the
//! error count to `FAIL_FAST_LIMIT` reports truncation, which rule code
//! propagates with `?` so the remaining rules of the pass never run. A
//! status built for state validation accumulates without bound.

use crate::ErrorCode;
use thiserror::Error;

/// Number of errors a fail-fast status accepts before truncating the pass.
pub const FAIL_FAST_LIMIT: usize = 2;

/// A single validation failure: a code plus its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Positional message parameters.
    pub params: Vec<String>,
}

impl ValidationError {
    /// Create an error with no parameters.
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            params: Vec::new(),
        }
    }

    /// Create an error with positional parameters.
    pub fn with_params<I, S>(code: ErrorCode, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code,
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}

/// Raised (as an `Err`) when a fail-fast status reaches its error limit.
/// This is a control signal that bounds user-visible output, not a failure
/// of the validation machinery itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("validation truncated after {FAIL_FAST_LIMIT} errors")]
pub struct Truncated;

/// Aggregates validation errors with a success flag and fail-fast policy.
#[derive(Debug, Clone)]
pub struct ResultStatus {
    errors: Vec<ValidationError>,
    fail_fast: bool,
}

impl ResultStatus {
    /// Create a status, initially successful. `fail_fast` selects the
    /// transition-validation policy.
    pub fn new(fail_fast: bool) -> Self {
        Self {
            errors: Vec::new(),
            fail_fast,
        }
    }

    /// Append an error and flip success to false. Returns `Err(Truncated)`
    /// once a fail-fast status has accumulated `FAIL_FAST_LIMIT` errors;
    /// the error that triggered truncation is still recorded.
    pub fn add(&mut self, error: ValidationError) -> Result<(), Truncated> {
        self.errors.push(error);

        if self.fail_fast && self.errors.len() >= FAIL_FAST_LIMIT {
            return Err(Truncated);
        }
        Ok(())
    }

    /// Append an error without parameters.
    pub fn add_code(&mut self, code: ErrorCode) -> Result<(), Truncated> {
        self.add(ValidationError::new(code))
    }

    /// True while no error has been recorded.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Ordered view of the recorded errors.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// True if this status truncates on the error limit.
    pub fn is_fail_fast(&self) -> bool {
        self.fail_fast
    }
}
