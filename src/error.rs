//! Crate error type.
//!
//! Every fallible operation returns a typed [`SrsError`]; nothing is
//! swallowed. The caller decides the policy: retry (`Conflict`), reject the
//! request (`InvalidInput`), report missing (`NotFound`), or treat as
//! fatal (`InvariantViolation`).

#[derive(Debug, thiserror::Error)]
pub enum SrsError {
    /// Malformed caller input: a review date before the card's last review,
    /// or a negative response time. Rejected before the scheduler runs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Card id unresolvable by the store; scheduling never runs.
    #[error("not found: {0}")]
    NotFound(String),

    /// A conditional write lost a version race. Always retryable by
    /// re-reading state, recomputing and re-writing.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A computed ease factor or interval fell outside its documented
    /// floor. Indicates an implementation bug; never clamped away.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl SrsError {
    /// Whether the caller may retry by re-reading and recomputing.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
