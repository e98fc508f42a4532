//! Error type shared by the ticket, pool and generator modules.

use thiserror::Error;

use crate::store::StoreError;

/// Errors raised by the lottery core.
#[derive(Debug, Error)]
pub enum LotteryError {
    /// Recurrence limit, prefix length or draw ranges outside their domain.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Generation request outside the supported bounds.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Explicitly constructed ticket with out-of-range or duplicate numbers.
    #[error("invalid ticket: {0}")]
    InvalidTicket(String),

    /// A generation round timed out, ran out of round budget or lost a producer.
    #[error("generation stalled: {0}")]
    GenerationStall(String),

    /// Storage backend error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
