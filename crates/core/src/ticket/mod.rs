//! Lottery tickets and the rules that decide when two tickets are too similar.

mod equivalence;
mod types;

pub use equivalence::{
    compare, compare_prefix, ordering_equal, overlap_count, overlap_equal, RecurrenceLimit,
};
pub use types::{
    DrawRanges, Ticket, PRIMARY_COUNT, PRIMARY_MAX, PRIMARY_MIN, SECONDARY_MAX, SECONDARY_MIN,
};
