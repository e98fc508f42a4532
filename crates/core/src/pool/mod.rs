//! Deduplicating ordered ticket storage.

mod ordered_set;
mod ticket_pool;

pub use ordered_set::OrderedSet;
pub use ticket_pool::TicketPool;
