//! Similarity rules between tickets.
//!
//! Two independent notions exist and must not be conflated:
//!
//! - **ordering-equal**: the first `limit` ascending primary values match
//!   pairwise. This drives both the sort order and duplicate rejection in the
//!   ticket pool.
//! - **overlap-equal**: the primary sets share at least `limit` values,
//!   regardless of position. This is the standalone similarity check and the
//!   pool never consults it.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{Ticket, PRIMARY_COUNT};
use crate::error::LotteryError;

/// Maximum number of matching sorted positions a stored ticket may share with
/// another. Always one of 3, 4 or 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RecurrenceLimit(u8);

impl RecurrenceLimit {
    /// Smallest accepted limit.
    pub const MIN: u8 = 3;
    /// Largest accepted limit (the full primary set).
    pub const MAX: u8 = PRIMARY_COUNT as u8;
    /// Limit spanning the whole primary set: only identical primary sets are
    /// ordering-equal, and its order agrees with every shorter prefix.
    pub const FULL: RecurrenceLimit = RecurrenceLimit(Self::MAX);

    /// Create a limit, rejecting values outside `3..=5`.
    pub fn new(value: u8) -> Result<Self, LotteryError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(LotteryError::InvalidConfiguration(format!(
                "recurrence limit must be {}, {} or {}, got {}",
                Self::MIN,
                Self::MIN + 1,
                Self::MAX,
                value
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    fn len(self) -> usize {
        usize::from(self.0)
    }
}

impl Default for RecurrenceLimit {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for RecurrenceLimit {
    type Error = LotteryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecurrenceLimit> for u8 {
    fn from(limit: RecurrenceLimit) -> Self {
        limit.0
    }
}

impl fmt::Display for RecurrenceLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order two tickets by their first `limit` ascending primary values.
///
/// `Equal` means the tickets are ordering-equal and collide in the pool.
pub fn compare(a: &Ticket, b: &Ticket, limit: RecurrenceLimit) -> Ordering {
    let len = limit.len();
    a.primary()[..len].cmp(&b.primary()[..len])
}

/// Same as [`compare`] for an unvalidated prefix length.
///
/// Fails with `InvalidConfiguration` when `len` is outside `3..=5` instead of
/// reading past the primary values.
pub fn compare_prefix(a: &Ticket, b: &Ticket, len: usize) -> Result<Ordering, LotteryError> {
    let limit = u8::try_from(len)
        .map_err(|_| {
            LotteryError::InvalidConfiguration(format!("prefix length {} out of range", len))
        })
        .and_then(RecurrenceLimit::new)?;
    Ok(compare(a, b, limit))
}

/// Whether the first `limit` ascending primary values match pairwise.
pub fn ordering_equal(a: &Ticket, b: &Ticket, limit: RecurrenceLimit) -> bool {
    compare(a, b, limit) == Ordering::Equal
}

/// Number of primary values the two tickets have in common.
pub fn overlap_count(a: &Ticket, b: &Ticket) -> usize {
    let (left, right) = (a.primary(), b.primary());
    let (mut i, mut j, mut shared) = (0, 0, 0);

    // Both sides are sorted, so a single merge pass counts the intersection.
    while i < left.len() && j < right.len() {
        match left[i].cmp(&right[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                shared += 1;
                i += 1;
                j += 1;
            }
        }
    }
    shared
}

/// Whether the primary sets share at least `limit` values, ignoring position.
pub fn overlap_equal(a: &Ticket, b: &Ticket, limit: RecurrenceLimit) -> bool {
    overlap_count(a, b) >= limit.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(values: &[u8]) -> Ticket {
        Ticket::from_numbers(values).unwrap()
    }

    fn limit(value: u8) -> RecurrenceLimit {
        RecurrenceLimit::new(value).unwrap()
    }

    #[test]
    fn test_full_limit_only_matches_identical_primary_sets() {
        let a = Ticket::from_numbers(&[1, 2, 3, 4, 5]).unwrap();
        let b = Ticket::from_numbers(&[1, 2, 3, 4, 6]).unwrap();
        let c = Ticket::from_numbers(&[5, 4, 3, 2, 1, 20]).unwrap();

        assert_eq!(RecurrenceLimit::FULL.get(), RecurrenceLimit::MAX);
        assert!(!ordering_equal(&a, &b, RecurrenceLimit::FULL));
        assert!(ordering_equal(&a, &c, RecurrenceLimit::FULL));
    }

    #[test]
    fn test_limit_domain() {
        assert!(RecurrenceLimit::new(3).is_ok());
        assert!(RecurrenceLimit::new(4).is_ok());
        assert!(RecurrenceLimit::new(5).is_ok());
        assert!(matches!(
            RecurrenceLimit::new(2),
            Err(LotteryError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            RecurrenceLimit::new(6),
            Err(LotteryError::InvalidConfiguration(_))
        ));
        assert_eq!(RecurrenceLimit::default().get(), 3);
    }

    #[test]
    fn test_limit_deserialize_rejects_out_of_domain() {
        let parsed: RecurrenceLimit = serde_json::from_str("4").unwrap();
        assert_eq!(parsed.get(), 4);
        assert!(serde_json::from_str::<RecurrenceLimit>("9").is_err());
    }

    #[test]
    fn test_prefix_match_depends_on_limit() {
        let t1 = ticket(&[1, 2, 3, 4, 5]);
        let t2 = ticket(&[1, 2, 3, 9, 10]);

        assert!(ordering_equal(&t1, &t2, limit(3)));
        assert!(!ordering_equal(&t1, &t2, limit(4)));
        assert_eq!(compare(&t1, &t2, limit(4)), Ordering::Less);
        assert_eq!(compare(&t2, &t1, limit(4)), Ordering::Greater);
    }

    #[test]
    fn test_reversed_input_is_equal_at_every_limit() {
        let t1 = ticket(&[1, 2, 3, 4, 5]);
        let t2 = ticket(&[5, 4, 3, 2, 1]);

        for value in 3..=5 {
            assert!(ordering_equal(&t1, &t2, limit(value)));
        }
    }

    #[test]
    fn test_ordering_equal_reflexive_and_symmetric() {
        let tickets = [
            ticket(&[1, 2, 3, 4, 5]),
            ticket(&[1, 2, 3, 60, 61]),
            ticket(&[7, 8, 9, 10, 11]),
            ticket(&[1, 2, 4, 5, 6]),
        ];

        for value in 3..=5 {
            let l = limit(value);
            for a in &tickets {
                assert!(ordering_equal(a, a, l));
                for b in &tickets {
                    assert_eq!(ordering_equal(a, b, l), ordering_equal(b, a, l));
                    assert_eq!(compare(a, b, l), compare(b, a, l).reverse());
                }
            }
        }
    }

    #[test]
    fn test_secondary_is_ignored() {
        let t1 = ticket(&[1, 2, 3, 4, 5, 1]);
        let t2 = ticket(&[1, 2, 3, 4, 5, 26]);
        assert!(ordering_equal(&t1, &t2, limit(5)));
        assert_ne!(t1, t2);
    }

    #[test]
    fn test_compare_prefix_fails_fast() {
        let t1 = ticket(&[1, 2, 3, 4, 5]);
        let t2 = ticket(&[1, 2, 3, 4, 6]);

        assert_eq!(compare_prefix(&t1, &t2, 5).unwrap(), Ordering::Less);
        assert_eq!(compare_prefix(&t1, &t2, 4).unwrap(), Ordering::Equal);
        assert!(matches!(
            compare_prefix(&t1, &t2, 6),
            Err(LotteryError::InvalidConfiguration(_))
        ));
        assert!(compare_prefix(&t1, &t2, 2).is_err());
        assert!(compare_prefix(&t1, &t2, 1000).is_err());
    }

    #[test]
    fn test_overlap_is_independent_of_position() {
        let t1 = ticket(&[1, 2, 3, 4, 5]);
        let t2 = ticket(&[3, 4, 5, 6, 7]);

        assert_eq!(overlap_count(&t1, &t2), 3);
        assert!(overlap_equal(&t1, &t2, limit(3)));
        assert!(!overlap_equal(&t1, &t2, limit(4)));
        // Same pair, same limit: ordering comparison disagrees
        assert!(!ordering_equal(&t1, &t2, limit(3)));
    }

    #[test]
    fn test_overlap_count_edges() {
        let t1 = ticket(&[10, 20, 30, 40, 50]);
        let t2 = ticket(&[11, 21, 31, 41, 51]);
        assert_eq!(overlap_count(&t1, &t2), 0);
        assert_eq!(overlap_count(&t1, &t1), 5);
        assert!(overlap_equal(&t1, &t1, limit(5)));
    }
}
