//! Storage trait and error type.

use thiserror::Error;

use crate::ticket::{RecurrenceLimit, Ticket};

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend could not be opened, read or written.
    #[error("database error: {0}")]
    Database(String),

    /// Stored data could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Whole-value load/save operations for lottery state.
///
/// Every save replaces the previous value entirely. `Ok(None)` from a load
/// means nothing was saved yet.
pub trait LotteryStore: Send + Sync {
    /// Load the saved recurrence limit.
    ///
    /// The raw value is returned; callers decide what to do with a value outside
    /// the accepted domain.
    fn load_recurrence_limit(&self) -> Result<Option<u8>, StoreError>;

    /// Save the recurrence limit.
    fn save_recurrence_limit(&self, limit: RecurrenceLimit) -> Result<(), StoreError>;

    /// Load the saved winning ticket.
    fn load_winning_ticket(&self) -> Result<Option<Ticket>, StoreError>;

    /// Save the winning ticket.
    fn save_winning_ticket(&self, ticket: &Ticket) -> Result<(), StoreError>;

    /// Load the saved ticket pool in its saved order.
    fn load_pool(&self) -> Result<Option<Vec<Ticket>>, StoreError>;

    /// Save the ticket pool.
    fn save_pool(&self, tickets: &[Ticket]) -> Result<(), StoreError>;
}
