//! Finite entourage algebra.
//!
//! An entourage is a set of ordered pairs over the carrier: a single
//! scale of closeness. `(a, b) ∈ U` reads "b is U-close to a".
//!
//! The operations here are the raw set-theoretic algebra the uniformity
//! axioms are phrased in: inverse, relational composition, the largest
//! symmetric sub-relation, diagonal and ball queries. The axioms
//! themselves are enforced one level up, by
//! [`RelationalUniformity::new`](crate::uniformity::RelationalUniformity::new).

use crate::point::{Point, PointSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A finite relation over the carrier: one explicit entourage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation<P: Ord>(BTreeSet<(P, P)>);

impl<P: Point> Relation<P> {
    /// The empty relation.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (P, P)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    /// The diagonal Δ = {(p, p)} over the given points.
    pub fn diagonal(points: &PointSet<P>) -> Self {
        Self(points.iter().map(|p| (p.clone(), p.clone())).collect())
    }

    /// The full relation points × points: the coarsest scale.
    pub fn full(points: &PointSet<P>) -> Self {
        let mut pairs = BTreeSet::new();
        for a in points.iter() {
            for b in points.iter() {
                pairs.insert((a.clone(), b.clone()));
            }
        }
        Self(pairs)
    }

    /// The equivalence entourage of a partition: the union of block².
    ///
    /// Partition-chain bases are the natural finite uniformities; finer
    /// partitions give finer entourages.
    pub fn from_partition(blocks: &[PointSet<P>]) -> Self {
        let mut pairs = BTreeSet::new();
        for block in blocks {
            for a in block.iter() {
                for b in block.iter() {
                    pairs.insert((a.clone(), b.clone()));
                }
            }
        }
        Self(pairs)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, a: &P, b: &P) -> bool {
        self.0.contains(&(a.clone(), b.clone()))
    }

    pub fn pairs(&self) -> impl Iterator<Item = &(P, P)> + '_ {
        self.0.iter()
    }

    /// U⁻¹ = {(b, a) : (a, b) ∈ U}.
    pub fn inverse(&self) -> Self {
        Self(self.0.iter().map(|(a, b)| (b.clone(), a.clone())).collect())
    }

    /// Relational composition: U ∘ V = {(a, c) : ∃b, (a, b) ∈ U ∧ (b, c) ∈ V}.
    pub fn compose(&self, other: &Self) -> Self {
        let mut pairs = BTreeSet::new();
        for (a, b) in &self.0 {
            for (b2, c) in &other.0 {
                if b == b2 {
                    pairs.insert((a.clone(), c.clone()));
                }
            }
        }
        Self(pairs)
    }

    /// The largest symmetric entourage contained in U: U ∩ U⁻¹.
    pub fn symmetrize(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(a, b)| self.0.contains(&(b.clone(), a.clone())))
                .cloned()
                .collect(),
        )
    }

    pub fn is_symmetric(&self) -> bool {
        self.0
            .iter()
            .all(|(a, b)| self.0.contains(&(b.clone(), a.clone())))
    }

    /// Whether Δ over the given points sits inside this entourage.
    pub fn contains_diagonal(&self, points: &PointSet<P>) -> bool {
        points.iter().all(|p| self.contains(p, p))
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0.intersection(&other.0).cloned().collect())
    }

    /// The ball U[x] = {y : (x, y) ∈ U}.
    pub fn ball(&self, x: &P) -> PointSet<P> {
        self.0
            .iter()
            .filter(|(a, _)| a == x)
            .map(|(_, b)| b.clone())
            .collect()
    }
}

impl<P: Point> Default for Relation<P> {
    fn default() -> Self {
        Self::new()
    }
}
