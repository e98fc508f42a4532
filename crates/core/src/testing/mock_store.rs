//! Mock lottery store for testing.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::store::{LotteryStore, StoreError};
use crate::ticket::{RecurrenceLimit, Ticket};

#[derive(Debug, Default)]
struct StoredState {
    recurrence_limit: Option<u8>,
    winning_ticket: Option<Ticket>,
    pool: Option<Vec<Ticket>>,
}

/// In-memory implementation of the LotteryStore trait.
///
/// Provides controllable behavior for testing:
/// - Seed stored values, including out-of-domain limits
/// - Simulate an unavailable backend
/// - Count saves for assertions
///
/// # Example
///
/// ```rust,ignore
/// use powerball_core::testing::MockLotteryStore;
///
/// let store = MockLotteryStore::new();
/// store.set_failing(true);
///
/// // Every load and save now returns StoreError::Database
/// assert!(store.load_pool().is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockLotteryStore {
    state: Mutex<StoredState>,
    failing: AtomicBool,
    saves: AtomicUsize,
}

impl MockLotteryStore {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Seed a raw recurrence limit, bypassing validation.
    pub fn set_raw_recurrence_limit(&self, value: u8) {
        self.state.lock().unwrap().recurrence_limit = Some(value);
    }

    /// Seed a winning ticket.
    pub fn set_winning_ticket(&self, ticket: Ticket) {
        self.state.lock().unwrap().winning_ticket = Some(ticket);
    }

    /// Seed a saved pool.
    pub fn set_pool(&self, tickets: Vec<Ticket>) {
        self.state.lock().unwrap().pool = Some(tickets);
    }

    /// Currently stored pool, if any.
    pub fn stored_pool(&self) -> Option<Vec<Ticket>> {
        self.state.lock().unwrap().pool.clone()
    }

    /// Currently stored winning ticket, if any.
    pub fn stored_winning_ticket(&self) -> Option<Ticket> {
        self.state.lock().unwrap().winning_ticket
    }

    /// Currently stored raw recurrence limit, if any.
    pub fn stored_recurrence_limit(&self) -> Option<u8> {
        self.state.lock().unwrap().recurrence_limit
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Database("mock store unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    fn record_save(&self) {
        self.saves.fetch_add(1, Ordering::SeqCst);
    }
}

impl LotteryStore for MockLotteryStore {
    fn load_recurrence_limit(&self) -> Result<Option<u8>, StoreError> {
        self.check_available()?;
        Ok(self.stored_recurrence_limit())
    }

    fn save_recurrence_limit(&self, limit: RecurrenceLimit) -> Result<(), StoreError> {
        self.check_available()?;
        self.state.lock().unwrap().recurrence_limit = Some(limit.get());
        self.record_save();
        Ok(())
    }

    fn load_winning_ticket(&self) -> Result<Option<Ticket>, StoreError> {
        self.check_available()?;
        Ok(self.stored_winning_ticket())
    }

    fn save_winning_ticket(&self, ticket: &Ticket) -> Result<(), StoreError> {
        self.check_available()?;
        self.state.lock().unwrap().winning_ticket = Some(*ticket);
        self.record_save();
        Ok(())
    }

    fn load_pool(&self) -> Result<Option<Vec<Ticket>>, StoreError> {
        self.check_available()?;
        Ok(self.stored_pool())
    }

    fn save_pool(&self, tickets: &[Ticket]) -> Result<(), StoreError> {
        self.check_available()?;
        self.state.lock().unwrap().pool = Some(tickets.to_vec());
        self.record_save();
        Ok(())
    }
}
