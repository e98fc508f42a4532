//! Batch generator implementation.

use std::sync::Arc;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::LotteryError;
use crate::metrics;
use crate::pool::TicketPool;
use crate::ticket::{DrawRanges, RecurrenceLimit, Ticket};

use super::config::GeneratorConfig;
use super::types::GenerationReport;

/// Largest pool size a single request may ask for.
pub const MAX_TARGET: usize = 30_000;

/// Fills a shared [`TicketPool`] with random tickets using concurrent producers.
pub struct BatchGenerator {
    pool: Arc<TicketPool>,
    ranges: DrawRanges,
    config: GeneratorConfig,
}

impl BatchGenerator {
    /// Create a generator over `pool`.
    ///
    /// Fails if `ranges` is not a valid set of draw ranges.
    pub fn new(
        pool: Arc<TicketPool>,
        ranges: DrawRanges,
        config: GeneratorConfig,
    ) -> Result<Self, LotteryError> {
        ranges.validate()?;
        Ok(Self {
            pool,
            ranges,
            config,
        })
    }

    pub fn pool(&self) -> &Arc<TicketPool> {
        &self.pool
    }

    pub fn ranges(&self) -> &DrawRanges {
        &self.ranges
    }

    /// Grow the pool to exactly `target` tickets.
    ///
    /// A target below the current size clears the pool first; a target equal to
    /// it changes nothing. Rounds repeat until collisions are made up for. A
    /// round timeout or an exhausted round budget aborts with `GenerationStall`,
    /// keeping every ticket inserted so far.
    pub async fn fill_to(
        &self,
        target: usize,
        limit: RecurrenceLimit,
    ) -> Result<GenerationReport, LotteryError> {
        if !(1..=MAX_TARGET).contains(&target) {
            return Err(LotteryError::InvalidRequest(format!(
                "ticket count must be between 1 and {}, got {}",
                MAX_TARGET, target
            )));
        }

        let mut report = GenerationReport {
            target,
            ..Default::default()
        };

        if target < self.pool.len() {
            info!(
                "Requested {} tickets but pool holds {}, clearing pool",
                target,
                self.pool.len()
            );
            self.pool.clear();
            metrics::POOL_CLEARS.with_label_values(&["shrink"]).inc();
            report.cleared = true;
        }

        loop {
            let size = self.pool.len();
            if size >= target {
                break;
            }

            if report.rounds >= self.config.max_rounds {
                metrics::GENERATION_STALLS.inc();
                metrics::POOL_SIZE.set(size as i64);
                return Err(LotteryError::GenerationStall(format!(
                    "pool reached {} of {} tickets after {} rounds",
                    size, target, report.rounds
                )));
            }

            let remaining = target - size;
            report.rounds += 1;

            let accepted = match self.run_round(remaining, limit).await {
                Ok(accepted) => accepted,
                Err(e) => {
                    metrics::GENERATION_STALLS.inc();
                    metrics::POOL_SIZE.set(self.pool.len() as i64);
                    return Err(e);
                }
            };

            report.accepted += accepted;
            report.collisions += remaining - accepted;
            debug!(
                round = report.rounds,
                producers = remaining,
                accepted,
                "Generation round finished"
            );
        }

        report.final_size = self.pool.len();
        metrics::POOL_SIZE.set(report.final_size as i64);

        if report.rounds > 0 {
            info!(
                "Generated {} tickets in {} rounds ({} collisions, limit {})",
                report.accepted, report.rounds, report.collisions, limit
            );
        }

        Ok(report)
    }

    /// Run one round of `producers` concurrent tasks. Returns how many tickets
    /// the pool accepted.
    async fn run_round(
        &self,
        producers: usize,
        limit: RecurrenceLimit,
    ) -> Result<usize, LotteryError> {
        metrics::GENERATION_ROUNDS.inc();
        let timer = metrics::ROUND_DURATION.start_timer();

        let handles: Vec<JoinHandle<bool>> = (0..producers)
            .map(|_| {
                let pool = Arc::clone(&self.pool);
                let ranges = self.ranges;
                tokio::spawn(async move {
                    let ticket = Ticket::random(&ranges, &mut rand::thread_rng());
                    pool.insert(ticket, limit)
                })
            })
            .collect();
        let abort_handles: Vec<_> = handles.iter().map(|h| h.abort_handle()).collect();

        let results =
            match tokio::time::timeout(self.config.round_timeout(), join_all(handles)).await {
                Ok(results) => results,
                Err(_) => {
                    for handle in abort_handles {
                        handle.abort();
                    }
                    warn!(
                        "Generation round of {} producers exceeded {:?}",
                        producers,
                        self.config.round_timeout()
                    );
                    return Err(LotteryError::GenerationStall(format!(
                        "round of {} producers did not finish within {:?}",
                        producers,
                        self.config.round_timeout()
                    )));
                }
            };
        timer.observe_duration();

        let mut accepted = 0;
        for result in results {
            match result {
                Ok(true) => accepted += 1,
                Ok(false) => {}
                Err(e) => {
                    return Err(LotteryError::GenerationStall(format!(
                        "producer task failed: {}",
                        e
                    )));
                }
            }
        }

        metrics::TICKETS_PRODUCED
            .with_label_values(&["accepted"])
            .inc_by(accepted as u64);
        metrics::TICKETS_PRODUCED
            .with_label_values(&["collision"])
            .inc_by((producers - accepted) as u64);

        Ok(accepted)
    }
}
