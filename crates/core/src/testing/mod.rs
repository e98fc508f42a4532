//! Testing utilities and mock implementations.
//!
//! This module provides a mock of the storage trait and ticket fixtures,
//! allowing session and menu tests without a database.
//!
//! # Example
//!
//! ```rust,ignore
//! use powerball_core::testing::{fixtures, MockLotteryStore};
//!
//! let store = MockLotteryStore::new();
//! store.set_pool(vec![fixtures::ticket(&[1, 2, 3, 4, 5])]);
//!
//! // Use in Lottery::open...
//! ```

mod mock_store;

pub use mock_store::MockLotteryStore;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::ticket::{ordering_equal, RecurrenceLimit, Ticket};

    /// Build a ticket from explicit values, panicking on invalid input.
    pub fn ticket(values: &[u8]) -> Ticket {
        Ticket::from_numbers(values).expect("fixture ticket must be valid")
    }

    /// Build a recurrence limit, panicking outside 3..=5.
    pub fn limit(value: u8) -> RecurrenceLimit {
        RecurrenceLimit::new(value).expect("fixture limit must be valid")
    }

    /// `count` tickets that are pairwise distinct under any recurrence limit.
    pub fn distinct_tickets(count: usize) -> Vec<Ticket> {
        assert!(count <= 60, "only 60 distinct leading values are available");
        (1..=count as u8)
            .map(|head| ticket(&[head, 61, 62, 63, 64]))
            .collect()
    }

    /// First pair of tickets that collide under `limit`, if any.
    pub fn find_collision(tickets: &[Ticket], limit: RecurrenceLimit) -> Option<(Ticket, Ticket)> {
        tickets.iter().enumerate().find_map(|(i, a)| {
            tickets[i + 1..]
                .iter()
                .find(|b| ordering_equal(a, b, limit))
                .map(|b| (*a, *b))
        })
    }
}
