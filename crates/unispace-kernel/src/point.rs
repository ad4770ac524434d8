//! Points and finite point sets.
//!
//! The carrier is whatever type the caller supplies. The engine never
//! inspects points: it compares them, clones them, and renders them into
//! reports. Everything else — closeness, neighborhoods, limits — comes
//! from the uniformity the points are paired with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A carrier point.
///
/// Blanket-implemented for every type with ordering (deterministic set
/// iteration and witness ordering), cloning, and a serde rendering for
/// report contexts.
pub trait Point: Clone + Ord + std::fmt::Debug + Serialize {}

impl<T: Clone + Ord + std::fmt::Debug + Serialize> Point for T {}

/// A finite set of carrier points.
///
/// Backed by a `BTreeSet` so iteration order is deterministic: two runs
/// over the same data produce identical witnesses and witness IDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSet<P: Ord>(BTreeSet<P>);

impl<P: Point> PointSet<P> {
    /// The empty set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// The singleton {p}.
    pub fn singleton(p: P) -> Self {
        let mut s = BTreeSet::new();
        s.insert(p);
        Self(s)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, p: &P) -> bool {
        self.0.contains(p)
    }

    pub fn insert(&mut self, p: P) -> bool {
        self.0.insert(p)
    }

    pub fn iter(&self) -> impl Iterator<Item = &P> + '_ {
        self.0.iter()
    }

    /// The least element, if any. Used as the deterministic default
    /// choice function.
    pub fn first(&self) -> Option<&P> {
        self.0.iter().next()
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn union(&self, other: &Self) -> Self {
        Self(self.0.union(&other.0).cloned().collect())
    }

    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0.intersection(&other.0).cloned().collect())
    }

    /// The subset of points satisfying a predicate.
    pub fn filtered(&self, mut pred: impl FnMut(&P) -> bool) -> Self {
        Self(self.0.iter().filter(|p| pred(p)).cloned().collect())
    }
}

impl<P: Point> Default for PointSet<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Point> FromIterator<P> for PointSet<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<P: Point> From<BTreeSet<P>> for PointSet<P> {
    fn from(set: BTreeSet<P>) -> Self {
        Self(set)
    }
}
