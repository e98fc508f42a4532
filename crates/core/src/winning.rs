//! The single winning ticket slot.

use rand::Rng;

use crate::ticket::{DrawRanges, Ticket};

/// Message shown while no winning ticket exists.
pub const NO_WINNING_TICKET: &str = "A winning ticket has not been drawn yet!";

/// Holds at most one winning ticket, replaced wholesale on every draw.
#[derive(Debug, Clone, Default)]
pub struct WinningTicketHolder {
    current: Option<Ticket>,
}

impl WinningTicketHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a new winning ticket, replacing any previous one.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, ranges: &DrawRanges, rng: &mut R) -> Ticket {
        let ticket = Ticket::random(ranges, rng);
        self.current = Some(ticket);
        ticket
    }

    /// Put back a previously saved ticket.
    pub fn restore(&mut self, ticket: Ticket) {
        self.current = Some(ticket);
    }

    pub fn current(&self) -> Option<Ticket> {
        self.current
    }

    /// Rendered winning ticket, or a notice that none was drawn yet.
    pub fn show(&self) -> String {
        match self.current {
            Some(ticket) => ticket.to_string(),
            None => NO_WINNING_TICKET.to_string(),
        }
    }
}
