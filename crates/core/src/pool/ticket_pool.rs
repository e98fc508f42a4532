//! Concurrent pool of generated tickets.

use crate::ticket::{compare, RecurrenceLimit, Ticket};

use super::OrderedSet;

/// Generated tickets, kept in ascending order with at most one member per
/// ordering-equal class.
///
/// The recurrence limit is passed to each call rather than stored: the
/// duplicate rule in force is the one given at insertion time, and changing
/// it later never re-validates existing members.
#[derive(Debug, Default)]
pub struct TicketPool {
    tickets: OrderedSet<Ticket>,
}

impl TicketPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a ticket unless an ordering-equal ticket is already held.
    ///
    /// Returns `true` if the ticket was added. Safe to call from many tasks at
    /// once.
    pub fn insert(&self, ticket: Ticket, limit: RecurrenceLimit) -> bool {
        self.tickets
            .insert_by(ticket, |member, candidate| compare(member, candidate, limit))
    }

    /// Whether an ordering-equal ticket is held.
    pub fn contains(&self, ticket: &Ticket, limit: RecurrenceLimit) -> bool {
        self.tickets
            .contains_by(ticket, |member, candidate| compare(member, candidate, limit))
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn clear(&self) {
        self.tickets.clear();
    }

    /// Members in ascending order.
    pub fn snapshot(&self) -> Vec<Ticket> {
        self.tickets.to_vec()
    }

    /// Replace the contents with previously saved `tickets`.
    ///
    /// Members are not re-checked against any recurrence limit; only repeated
    /// primary sets are dropped. Returns the number of tickets kept.
    pub fn restore<I>(&self, tickets: I) -> usize
    where
        I: IntoIterator<Item = Ticket>,
    {
        self.clear();
        tickets
            .into_iter()
            .filter(|ticket| self.insert(*ticket, RecurrenceLimit::FULL))
            .count()
    }
}
