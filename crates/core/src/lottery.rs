//! Lottery session: the single control point over pool, generator, winning
//! ticket and recurrence limit.
//!
//! State is loaded from the store once at open and saved after every mutating
//! action. Storage failures never abort an action: they are logged and the
//! in-memory state stays authoritative.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::LotteryError;
use crate::generator::{BatchGenerator, GenerationReport};
use crate::metrics;
use crate::pool::TicketPool;
use crate::store::{LotteryStore, StoreError};
use crate::ticket::{RecurrenceLimit, Ticket};
use crate::winning::WinningTicketHolder;

pub struct Lottery {
    store: Arc<dyn LotteryStore>,
    generator: BatchGenerator,
    winning: WinningTicketHolder,
    limit: RecurrenceLimit,
}

impl Lottery {
    /// Open a session over `store`, restoring whatever it holds.
    ///
    /// Only configuration problems fail; unreadable stored state falls back to
    /// the configured limit, no winning ticket and an empty pool.
    pub fn open(store: Arc<dyn LotteryStore>, config: &Config) -> Result<Self, LotteryError> {
        let limit = config.lottery.recurrence_limit()?;
        let generator = BatchGenerator::new(
            Arc::new(TicketPool::new()),
            config.draw,
            config.generator.clone(),
        )?;

        let mut lottery = Self {
            store,
            generator,
            winning: WinningTicketHolder::new(),
            limit,
        };
        lottery.load();
        Ok(lottery)
    }

    fn load(&mut self) {
        match self.store.load_recurrence_limit() {
            Ok(Some(raw)) => match RecurrenceLimit::new(raw) {
                Ok(limit) => self.limit = limit,
                Err(e) => warn!(
                    "Ignoring stored recurrence limit, using {}: {}",
                    self.limit, e
                ),
            },
            Ok(None) => {}
            Err(e) => warn!("Failed to load recurrence limit, using {}: {}", self.limit, e),
        }

        match self.store.load_winning_ticket() {
            Ok(Some(ticket)) => self.winning.restore(ticket),
            Ok(None) => {}
            Err(e) => warn!("Failed to load winning ticket: {}", e),
        }

        match self.store.load_pool() {
            Ok(Some(tickets)) => {
                let stored = tickets.len();
                let kept = self.pool().restore(tickets);
                if kept < stored {
                    warn!("Dropped {} repeated stored tickets", stored - kept);
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to load ticket pool: {}", e),
        }
        metrics::POOL_SIZE.set(self.pool().len() as i64);

        info!(
            "Lottery loaded: limit {}, {} tickets, winning ticket {}",
            self.limit,
            self.pool().len(),
            if self.winning.current().is_some() {
                "present"
            } else {
                "absent"
            }
        );
    }

    pub fn recurrence_limit(&self) -> RecurrenceLimit {
        self.limit
    }

    /// Replace the recurrence limit for future generation.
    ///
    /// Tickets already in the pool are not re-checked against the new limit.
    pub fn set_recurrence_limit(&mut self, limit: RecurrenceLimit) {
        self.limit = limit;
        info!("Recurrence limit set to {}", limit);
        absorb("recurrence limit", self.store.save_recurrence_limit(limit));
    }

    /// Draw and save a new winning ticket.
    pub fn draw_winning(&mut self) -> Ticket {
        let ticket = self
            .winning
            .regenerate(self.generator.ranges(), &mut rand::thread_rng());
        metrics::WINNING_DRAWS.inc();
        info!("Drew winning ticket {}", ticket);
        absorb("winning ticket", self.store.save_winning_ticket(&ticket));
        ticket
    }

    pub fn winning_ticket(&self) -> Option<Ticket> {
        self.winning.current()
    }

    /// Rendered winning ticket or a not-yet-drawn notice.
    pub fn show_winning(&self) -> String {
        self.winning.show()
    }

    /// Fill the pool to `target` tickets under the current limit, then save it.
    ///
    /// A stalled request still saves the tickets it managed to add.
    pub async fn generate_tickets(&self, target: usize) -> Result<GenerationReport, LotteryError> {
        let result = self.generator.fill_to(target, self.limit).await;
        if !matches!(result, Err(LotteryError::InvalidRequest(_))) {
            self.save_pool();
        }
        result
    }

    /// Remove every generated ticket and save the empty pool.
    pub fn clear_tickets(&self) {
        self.pool().clear();
        metrics::POOL_CLEARS.with_label_values(&["user"]).inc();
        metrics::POOL_SIZE.set(0);
        info!("Ticket pool cleared");
        self.save_pool();
    }

    /// Generated tickets in ascending order.
    pub fn tickets(&self) -> Vec<Ticket> {
        self.pool().snapshot()
    }

    pub fn ticket_count(&self) -> usize {
        self.pool().len()
    }

    pub fn pool(&self) -> &Arc<TicketPool> {
        self.generator.pool()
    }

    fn save_pool(&self) {
        absorb("ticket pool", self.store.save_pool(&self.pool().snapshot()));
    }
}

fn absorb(what: &str, result: Result<(), StoreError>) {
    if let Err(e) = result {
        warn!("Failed to save {}: {}", what, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LotteryConfig;
    use crate::testing::{fixtures, MockLotteryStore};
    use crate::winning::NO_WINNING_TICKET;

    fn open(store: &Arc<MockLotteryStore>) -> Lottery {
        Lottery::open(
            Arc::clone(store) as Arc<dyn LotteryStore>,
            &Config::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_open_empty_store_uses_defaults() {
        let store = Arc::new(MockLotteryStore::new());
        let lottery = open(&store);

        assert_eq!(lottery.recurrence_limit().get(), 3);
        assert!(lottery.winning_ticket().is_none());
        assert_eq!(lottery.show_winning(), NO_WINNING_TICKET);
        assert_eq!(lottery.ticket_count(), 0);
    }

    #[test]
    fn test_open_restores_stored_state() {
        let store = Arc::new(MockLotteryStore::new());
        let winning = fixtures::ticket(&[4, 8, 15, 16, 23, 20]);
        store.set_raw_recurrence_limit(5);
        store.set_winning_ticket(winning);
        store.set_pool(fixtures::distinct_tickets(12));

        let lottery = open(&store);

        assert_eq!(lottery.recurrence_limit().get(), 5);
        assert_eq!(lottery.winning_ticket(), Some(winning));
        assert_eq!(lottery.ticket_count(), 12);
    }

    #[test]
    fn test_open_uses_configured_default_limit() {
        let store = Arc::new(MockLotteryStore::new());
        let config = Config {
            lottery: LotteryConfig {
                recurrence_limit: 4,
            },
            ..Default::default()
        };
        let lottery = Lottery::open(store as Arc<dyn LotteryStore>, &config).unwrap();
        assert_eq!(lottery.recurrence_limit().get(), 4);
    }

    #[test]
    fn test_open_rejects_bad_config() {
        let store = Arc::new(MockLotteryStore::new());
        let config = Config {
            lottery: LotteryConfig {
                recurrence_limit: 9,
            },
            ..Default::default()
        };
        let result = Lottery::open(store as Arc<dyn LotteryStore>, &config);
        assert!(matches!(result, Err(LotteryError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_out_of_domain_stored_limit_falls_back() {
        let store = Arc::new(MockLotteryStore::new());
        store.set_raw_recurrence_limit(8);

        let lottery = open(&store);
        assert_eq!(lottery.recurrence_limit().get(), 3);
    }

    #[test]
    fn test_stored_pool_not_rechecked_on_load() {
        let store = Arc::new(MockLotteryStore::new());
        store.set_pool(vec![
            fixtures::ticket(&[1, 2, 3, 4, 5]),
            fixtures::ticket(&[1, 2, 3, 10, 11]),
            fixtures::ticket(&[20, 21, 22, 23, 24]),
            fixtures::ticket(&[20, 21, 22, 23, 24, 9]),
        ]);

        let lottery = open(&store);
        assert_eq!(lottery.recurrence_limit().get(), 3);
        assert_eq!(lottery.ticket_count(), 3);
    }

    #[test]
    fn test_lowered_limit_keeps_pool_across_reopen() {
        let store = Arc::new(MockLotteryStore::new());
        store.set_raw_recurrence_limit(5);
        store.set_pool(vec![
            fixtures::ticket(&[1, 2, 3, 4, 5]),
            fixtures::ticket(&[1, 2, 3, 4, 6]),
            fixtures::ticket(&[1, 2, 3, 7, 8]),
        ]);

        let mut lottery = open(&store);
        lottery.set_recurrence_limit(fixtures::limit(3));
        let before = lottery.tickets();
        drop(lottery);

        let reopened = open(&store);
        assert_eq!(reopened.recurrence_limit().get(), 3);
        assert_eq!(reopened.ticket_count(), 3);
        assert_eq!(reopened.tickets(), before);
    }

    #[test]
    fn test_unavailable_store_is_absorbed() {
        let store = Arc::new(MockLotteryStore::new());
        store.set_failing(true);

        let mut lottery = open(&store);
        assert_eq!(lottery.ticket_count(), 0);

        let ticket = lottery.draw_winning();
        assert_eq!(lottery.winning_ticket(), Some(ticket));

        lottery.set_recurrence_limit(fixtures::limit(4));
        assert_eq!(lottery.recurrence_limit().get(), 4);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_draw_winning_saves() {
        let store = Arc::new(MockLotteryStore::new());
        let mut lottery = open(&store);

        let ticket = lottery.draw_winning();

        assert_eq!(store.stored_winning_ticket(), Some(ticket));
        assert_eq!(lottery.show_winning(), ticket.to_string());
    }

    #[test]
    fn test_set_limit_saves_and_keeps_pool() {
        let store = Arc::new(MockLotteryStore::new());
        store.set_pool(vec![
            fixtures::ticket(&[1, 2, 3, 4, 5]),
            fixtures::ticket(&[1, 2, 4, 5, 6]),
        ]);
        let mut lottery = open(&store);
        assert_eq!(lottery.ticket_count(), 2);

        lottery.set_recurrence_limit(fixtures::limit(5));

        assert_eq!(store.stored_recurrence_limit(), Some(5));
        assert_eq!(lottery.ticket_count(), 2);
    }

    #[tokio::test]
    async fn test_generate_tickets_saves_pool() {
        let store = Arc::new(MockLotteryStore::new());
        let lottery = open(&store);

        let report = lottery.generate_tickets(40).await.unwrap();

        assert_eq!(report.final_size, 40);
        let stored = store.stored_pool().unwrap();
        assert_eq!(stored, lottery.tickets());
        assert!(fixtures::find_collision(&stored, lottery.recurrence_limit()).is_none());
    }

    #[tokio::test]
    async fn test_invalid_request_does_not_save() {
        let store = Arc::new(MockLotteryStore::new());
        let lottery = open(&store);

        let result = lottery.generate_tickets(30_001).await;

        assert!(matches!(result, Err(LotteryError::InvalidRequest(_))));
        assert_eq!(store.save_count(), 0);
        assert!(store.stored_pool().is_none());
    }

    #[tokio::test]
    async fn test_clear_tickets_saves_empty_pool() {
        let store = Arc::new(MockLotteryStore::new());
        let lottery = open(&store);
        lottery.generate_tickets(10).await.unwrap();

        lottery.clear_tickets();

        assert_eq!(lottery.ticket_count(), 0);
        assert_eq!(store.stored_pool(), Some(vec![]));
    }
}
