pub mod config;
pub mod error;
pub mod generator;
pub mod lottery;
pub mod metrics;
pub mod pool;
pub mod store;
pub mod testing;
pub mod ticket;
pub mod winning;

pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, Config,
    ConfigError, DatabaseConfig, LotteryConfig,
};
pub use error::LotteryError;
pub use generator::{BatchGenerator, GenerationReport, GeneratorConfig, MAX_TARGET};
pub use lottery::Lottery;
pub use pool::{OrderedSet, TicketPool};
pub use store::{LotteryStore, SqliteLotteryStore, StoreError};
pub use ticket::{
    compare, compare_prefix, ordering_equal, overlap_count, overlap_equal, DrawRanges,
    RecurrenceLimit, Ticket,
};
pub use winning::{WinningTicketHolder, NO_WINNING_TICKET};
