//! Index filters over `u64`.
//!
//! The "eventually" structure of convergence arguments, made bounded and
//! total: an [`IndexFilter`] ranges over `0..=horizon` and answers
//! threshold queries. A predicate holds eventually when some least
//! threshold N within the horizon makes it hold on every index from N to
//! the horizon; the threshold is the certificate the reports record.

/// The at-top filter over a bounded index range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexFilter {
    horizon: u64,
}

impl IndexFilter {
    /// The filter of tails of `0..=horizon`.
    pub fn at_top(horizon: u64) -> Self {
        IndexFilter { horizon }
    }

    pub fn horizon(&self) -> u64 {
        self.horizon
    }

    /// Tails of a non-empty range are non-empty.
    pub fn is_proper(&self) -> bool {
        true
    }

    /// All indices the simulation ranges over.
    pub fn indices(&self) -> impl Iterator<Item = u64> + use<> {
        0..=self.horizon
    }

    /// Least threshold N such that the predicate holds on every index in
    /// `N..=horizon`, or `None` when even the horizon itself fails.
    pub fn eventually(&self, pred: impl Fn(u64) -> bool) -> Option<u64> {
        if !pred(self.horizon) {
            return None;
        }
        let mut n = self.horizon;
        while n > 0 && pred(n - 1) {
            n -= 1;
        }
        Some(n)
    }
}
