//! Types reported by the batch generator.

/// Outcome of a `fill_to` request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Requested pool size.
    pub target: usize,
    /// Whether the pool was cleared because the target was below its size.
    pub cleared: bool,
    /// Rounds run.
    pub rounds: usize,
    /// Tickets added to the pool.
    pub accepted: usize,
    /// Tickets dropped as ordering-equal to a member.
    pub collisions: usize,
    /// Pool size when the request finished.
    pub final_size: usize,
}

impl GenerationReport {
    /// Whether the request changed nothing.
    pub fn is_noop(&self) -> bool {
        !self.cleared && self.rounds == 0
    }
}
