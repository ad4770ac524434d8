//! Uniformities: bases of entourages.
//!
//! A uniformity over a carrier is a filter of entourages satisfying
//! three axioms, here phrased in basis form:
//!
//! 1. **Reflexivity**: every basis entourage contains the diagonal.
//! 2. **Symmetry refinement**: every basis entourage contains a
//!    symmetric entourage.
//! 3. **Triangle refinement**: for every basis entourage U there is a
//!    half-size V with V ∘ V ⊆ U.
//!
//! The [`Uniformity`] trait is the interface the checkers consume. It is
//! deliberately abstract: the finite [`RelationalUniformity`] implements
//! it with explicit pair sets and basis search, and the rational line in
//! [`crate::line`] implements it with exact ε-scales. The same checker
//! logic runs against both.

use crate::entourage::Relation;
use crate::error::UnispaceError;
use crate::point::{Point, PointSet};

/// A basis-presented uniformity: the interface consumed by every checker.
///
/// Entourages are opaque handles; the checkers only ever ask three
/// questions of them: is a pair inside, what is a half-size refinement,
/// what is a symmetric refinement.
pub trait Uniformity {
    /// The carrier point type.
    type Point: Point;

    /// One scale of closeness.
    type Entourage: Clone + std::fmt::Debug;

    /// Name of this space (for diagnostics).
    fn name(&self) -> &str;

    /// The generating basis, coarsest first.
    fn basis(&self) -> Vec<Self::Entourage>;

    /// Membership: (a, b) ∈ U.
    fn near(&self, u: &Self::Entourage, a: &Self::Point, b: &Self::Point) -> bool;

    /// Some V with V ∘ V ⊆ U, when one is available.
    fn half(&self, u: &Self::Entourage) -> Option<Self::Entourage>;

    /// Some symmetric V ⊆ U containing the diagonal, when available.
    fn symmetric(&self, u: &Self::Entourage) -> Option<Self::Entourage>;

    /// Some symmetric V with V ∘ V ⊆ U.
    ///
    /// The combination the cover and continuity constructions need: a
    /// symmetric half of a half is both symmetric and composable into
    /// the original scale.
    fn symmetric_half(&self, u: &Self::Entourage) -> Option<Self::Entourage> {
        self.half(u).and_then(|v| self.symmetric(&v))
    }

    /// Render an entourage for report contexts.
    fn describe(&self, u: &Self::Entourage) -> String;
}

/// A finite uniform space: an enumerated carrier with an explicit
/// entourage basis.
///
/// Construction validates the uniformity axioms eagerly; every query on
/// a constructed value is exact. Bypassing validation (there is no way
/// through the public API) would make downstream answers unreliable by
/// contract.
#[derive(Debug, Clone)]
pub struct RelationalUniformity<P: Point> {
    name: String,
    points: PointSet<P>,
    basis: Vec<Relation<P>>,
}

impl<P: Point> RelationalUniformity<P> {
    /// Build and validate a finite uniformity.
    ///
    /// Fails with [`UnispaceError::InvalidUniformity`] when the supplied
    /// family violates the axioms: empty basis, pairs outside the
    /// carrier, a missing diagonal, a non-directed basis, or a basis
    /// entourage without a symmetric or half-size refinement.
    pub fn new(
        name: impl Into<String>,
        points: PointSet<P>,
        basis: Vec<Relation<P>>,
    ) -> Result<Self, UnispaceError> {
        let name = name.into();

        if basis.is_empty() {
            return Err(UnispaceError::InvalidUniformity {
                description: format!("{name}: entourage basis is empty"),
            });
        }

        for (i, u) in basis.iter().enumerate() {
            for (a, b) in u.pairs() {
                if !points.contains(a) || !points.contains(b) {
                    return Err(UnispaceError::InvalidUniformity {
                        description: format!(
                            "{name}: basis entourage {i} relates points outside the carrier"
                        ),
                    });
                }
            }
            if !u.contains_diagonal(&points) {
                return Err(UnispaceError::InvalidUniformity {
                    description: format!(
                        "{name}: basis entourage {i} does not contain the diagonal"
                    ),
                });
            }
        }

        // Directedness: each pairwise intersection contains a basis entourage.
        for i in 0..basis.len() {
            for j in (i + 1)..basis.len() {
                let meet = basis[i].intersection(&basis[j]);
                if !basis.iter().any(|v| v.is_subset(&meet)) {
                    return Err(UnispaceError::InvalidUniformity {
                        description: format!(
                            "{name}: no basis entourage inside the intersection of {i} and {j}"
                        ),
                    });
                }
            }
        }

        // Symmetry refinement: some basis entourage inside U ∩ U⁻¹.
        for (i, u) in basis.iter().enumerate() {
            let sym = u.symmetrize();
            if !basis.iter().any(|v| v.is_subset(&sym)) {
                return Err(UnispaceError::InvalidUniformity {
                    description: format!(
                        "{name}: basis entourage {i} has no symmetric refinement in the basis"
                    ),
                });
            }
        }

        // Triangle refinement: some basis V with V ∘ V ⊆ U.
        for (i, u) in basis.iter().enumerate() {
            if !basis.iter().any(|v| v.compose(v).is_subset(u)) {
                return Err(UnispaceError::InvalidUniformity {
                    description: format!(
                        "{name}: basis entourage {i} has no half-size refinement in the basis"
                    ),
                });
            }
        }

        Ok(Self {
            name,
            points,
            basis,
        })
    }

    /// The discrete uniformity: the diagonal alone.
    pub fn discrete(name: impl Into<String>, points: PointSet<P>) -> Self {
        let diag = Relation::diagonal(&points);
        Self {
            name: name.into(),
            points,
            basis: vec![diag],
        }
    }

    /// A uniformity generated by a chain of partitions, coarsest first.
    ///
    /// Each partition contributes its equivalence entourage. The caller
    /// must supply genuinely refining partitions; validation rejects
    /// anything else.
    pub fn from_partitions(
        name: impl Into<String>,
        points: PointSet<P>,
        chain: &[Vec<PointSet<P>>],
    ) -> Result<Self, UnispaceError> {
        let basis = chain.iter().map(|p| Relation::from_partition(p)).collect();
        Self::new(name, points, basis)
    }

    /// The enumerated carrier.
    pub fn points(&self) -> &PointSet<P> {
        &self.points
    }

    /// The validated entourage basis.
    pub fn entourages(&self) -> &[Relation<P>] {
        &self.basis
    }
}

impl<P: Point> Uniformity for RelationalUniformity<P> {
    type Point = P;
    type Entourage = Relation<P>;

    fn name(&self) -> &str {
        &self.name
    }

    fn basis(&self) -> Vec<Relation<P>> {
        self.basis.clone()
    }

    fn near(&self, u: &Relation<P>, a: &P, b: &P) -> bool {
        u.contains(a, b)
    }

    fn half(&self, u: &Relation<P>) -> Option<Relation<P>> {
        // Basis search. `u` may be a derived entourage (a symmetrization),
        // so this can come up empty even on a validated space.
        self.basis
            .iter()
            .find(|v| v.compose(v).is_subset(u))
            .cloned()
    }

    fn symmetric(&self, u: &Relation<P>) -> Option<Relation<P>> {
        // U ∩ U⁻¹ is the largest symmetric entourage inside U; it keeps
        // the diagonal because U has it.
        Some(u.symmetrize())
    }

    fn describe(&self, u: &Relation<P>) -> String {
        match self.basis.iter().position(|v| v == u) {
            Some(i) => format!("basis[{i}]"),
            None => format!("derived({} pairs)", u.len()),
        }
    }
}

/// The closure of a set inside a pool of candidate points: every point
/// whose every basis-entourage ball meets the set.
///
/// Over a validated finite space with `pool` = the carrier this is the
/// topological closure induced by the uniformity.
pub fn closure<U: Uniformity>(
    set: &PointSet<U::Point>,
    pool: &PointSet<U::Point>,
    uni: &U,
) -> PointSet<U::Point> {
    let basis = uni.basis();
    pool.filtered(|x| {
        basis
            .iter()
            .all(|u| set.iter().any(|s| uni.near(u, x, s)))
    })
}
