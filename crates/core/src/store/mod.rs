//! Durable storage for the recurrence limit, winning ticket and ticket pool.

mod sqlite;
mod traits;

pub use sqlite::SqliteLotteryStore;
pub use traits::{LotteryStore, StoreError};
