//! Ticket value type and draw ranges.

use std::collections::BTreeSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::LotteryError;

/// Number of primary (white ball) values on a ticket.
pub const PRIMARY_COUNT: usize = 5;

/// Lowest primary value.
pub const PRIMARY_MIN: u8 = 1;
/// Highest primary value.
pub const PRIMARY_MAX: u8 = 69;
/// Lowest secondary (red ball) value.
pub const SECONDARY_MIN: u8 = 1;
/// Highest secondary value.
pub const SECONDARY_MAX: u8 = 26;

/// Values used for omitted trailing positions in explicit construction.
/// The first five fill primary positions, the last one the secondary.
const FILLER: [u8; PRIMARY_COUNT + 1] = [1, 2, 3, 4, 5, 1];

/// A lottery ticket: five distinct ascending primary values plus one secondary.
///
/// Tickets are plain values and never change after construction. The derived
/// `PartialEq` compares every number; the ticket pool never uses it and relies
/// on [`crate::ticket::compare`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTicket", into = "RawTicket")]
pub struct Ticket {
    primary: [u8; PRIMARY_COUNT],
    secondary: u8,
}

impl Ticket {
    /// Draw a random ticket within `ranges`.
    ///
    /// Primary values are drawn by rejection sampling into a set until five
    /// distinct values are held. There is no retry cap; `DrawRanges` guarantees
    /// the primary span holds at least five values.
    pub fn random<R: Rng + ?Sized>(ranges: &DrawRanges, rng: &mut R) -> Self {
        let mut drawn = BTreeSet::new();
        while drawn.len() < PRIMARY_COUNT {
            drawn.insert(rng.gen_range(ranges.primary_min..=ranges.primary_max));
        }

        let mut primary = [0u8; PRIMARY_COUNT];
        for (slot, value) in primary.iter_mut().zip(drawn) {
            *slot = value;
        }

        Self {
            primary,
            secondary: rng.gen_range(ranges.secondary_min..=ranges.secondary_max),
        }
    }

    /// Build a ticket from up to six explicit values.
    ///
    /// The first five values are primary numbers (in any order), the sixth is the
    /// secondary number. Omitted trailing values default to `1, 2, 3, 4, 5` for
    /// primary positions and `1` for the secondary.
    pub fn from_numbers(values: &[u8]) -> Result<Self, LotteryError> {
        if values.len() > PRIMARY_COUNT + 1 {
            return Err(LotteryError::InvalidTicket(format!(
                "expected at most {} values, got {}",
                PRIMARY_COUNT + 1,
                values.len()
            )));
        }

        let mut filled = FILLER;
        filled[..values.len()].copy_from_slice(values);

        let mut primary = [0u8; PRIMARY_COUNT];
        primary.copy_from_slice(&filled[..PRIMARY_COUNT]);
        Self::new(primary, filled[PRIMARY_COUNT])
    }

    /// Build a ticket from five primary values and a secondary value.
    ///
    /// Primary values are sorted; duplicates and out-of-range values are rejected.
    pub fn new(mut primary: [u8; PRIMARY_COUNT], secondary: u8) -> Result<Self, LotteryError> {
        if let Some(value) = primary
            .iter()
            .find(|v| !(PRIMARY_MIN..=PRIMARY_MAX).contains(*v))
        {
            return Err(LotteryError::InvalidTicket(format!(
                "primary value {} outside {}..={}",
                value, PRIMARY_MIN, PRIMARY_MAX
            )));
        }
        if !(SECONDARY_MIN..=SECONDARY_MAX).contains(&secondary) {
            return Err(LotteryError::InvalidTicket(format!(
                "secondary value {} outside {}..={}",
                secondary, SECONDARY_MIN, SECONDARY_MAX
            )));
        }

        primary.sort_unstable();
        if let Some(pair) = primary.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(LotteryError::InvalidTicket(format!(
                "primary value {} appears more than once",
                pair[0]
            )));
        }

        Ok(Self { primary, secondary })
    }

    /// Primary values in ascending order.
    pub fn primary(&self) -> &[u8; PRIMARY_COUNT] {
        &self.primary
    }

    /// Secondary value.
    pub fn secondary(&self) -> u8 {
        self.secondary
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.primary;
        write!(f, "[{}, {}, {}, {}, {}] [{}]", a, b, c, d, e, self.secondary)
    }
}

/// Serialized form of a ticket, validated on the way back in.
#[derive(Serialize, Deserialize)]
struct RawTicket {
    primary: [u8; PRIMARY_COUNT],
    secondary: u8,
}

impl TryFrom<RawTicket> for Ticket {
    type Error = LotteryError;

    fn try_from(raw: RawTicket) -> Result<Self, Self::Error> {
        Ticket::new(raw.primary, raw.secondary)
    }
}

impl From<Ticket> for RawTicket {
    fn from(ticket: Ticket) -> Self {
        Self {
            primary: ticket.primary,
            secondary: ticket.secondary,
        }
    }
}

/// Inclusive value ranges used when drawing random tickets.
///
/// Defaults to the standard Powerball ranges. Narrower sub-ranges raise the
/// collision rate and exist for exercising the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRanges {
    #[serde(default = "default_primary_min")]
    pub primary_min: u8,
    #[serde(default = "default_primary_max")]
    pub primary_max: u8,
    #[serde(default = "default_secondary_min")]
    pub secondary_min: u8,
    #[serde(default = "default_secondary_max")]
    pub secondary_max: u8,
}

fn default_primary_min() -> u8 {
    PRIMARY_MIN
}

fn default_primary_max() -> u8 {
    PRIMARY_MAX
}

fn default_secondary_min() -> u8 {
    SECONDARY_MIN
}

fn default_secondary_max() -> u8 {
    SECONDARY_MAX
}

impl Default for DrawRanges {
    fn default() -> Self {
        Self {
            primary_min: PRIMARY_MIN,
            primary_max: PRIMARY_MAX,
            secondary_min: SECONDARY_MIN,
            secondary_max: SECONDARY_MAX,
        }
    }
}

impl DrawRanges {
    /// Check that both ranges sit inside the standard ranges and that the
    /// primary range holds enough values for a full ticket.
    pub fn validate(&self) -> Result<(), LotteryError> {
        if self.primary_min < PRIMARY_MIN || self.primary_max > PRIMARY_MAX {
            return Err(LotteryError::InvalidConfiguration(format!(
                "primary range {}..={} must lie within {}..={}",
                self.primary_min, self.primary_max, PRIMARY_MIN, PRIMARY_MAX
            )));
        }
        if self.primary_max < self.primary_min
            || usize::from(self.primary_max - self.primary_min) + 1 < PRIMARY_COUNT
        {
            return Err(LotteryError::InvalidConfiguration(format!(
                "primary range {}..={} must hold at least {} values",
                self.primary_min, self.primary_max, PRIMARY_COUNT
            )));
        }
        if self.secondary_min < SECONDARY_MIN
            || self.secondary_max > SECONDARY_MAX
            || self.secondary_max < self.secondary_min
        {
            return Err(LotteryError::InvalidConfiguration(format!(
                "secondary range {}..={} must be a non-empty range within {}..={}",
                self.secondary_min, self.secondary_max, SECONDARY_MIN, SECONDARY_MAX
            )));
        }
        Ok(())
    }
}
