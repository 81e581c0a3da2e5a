//! Control-flow signal for rule evaluation.

use redline_core::Truncated;
use redline_store::StoreError;

/// Why a validation pass stopped early: the fail-fast error limit was
/// reached (recoverable — the partial status is the result) or a store call
/// failed (fatal to the pass).
#[derive(Debug)]
pub enum Halt {
    Truncated(Truncated),
    Store(StoreError),
}

/// Result type threaded through every rule implementation.
pub type RuleFlow = Result<(), Halt>;

impl From<Truncated> for Halt {
    fn from(t: Truncated) -> Self {
        Halt::Truncated(t)
    }
}

impl From<StoreError> for Halt {
    fn from(e: StoreError) -> Self {
        Halt::Store(e)
    }
}
