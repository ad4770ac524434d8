//! Filter bases and ultrafilters.
//!
//! A filter over the carrier is an upward-closed, intersection-closed,
//! non-empty family of subsets: the "eventually" or "large" sets. The
//! engine never materializes the upward closure — a filter is
//! represented by an explicit generating basis, a directed family of
//! finite sets, and every query is answered against the basis:
//!
//!   S ∈ F  ⟺  some basis set t ⊆ S
//!
//! The degenerate bottom filter (the one containing ∅, hence everything)
//! is representable but only through [`FilterBase::bot`]; the validating
//! constructor rejects empty members.

use crate::error::UnispaceError;
use crate::point::{Point, PointSet};
use serde::{Deserialize, Serialize};

/// An explicit generating basis for a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterBase<P: Ord> {
    sets: Vec<PointSet<P>>,
    proper: bool,
}

impl<P: Point> FilterBase<P> {
    /// Build and validate a proper filter basis.
    ///
    /// Fails with [`UnispaceError::InvalidFilterBasis`] when the family
    /// is empty, contains an empty set, or is not directed (some
    /// pairwise intersection contains no basis set).
    pub fn new(sets: Vec<PointSet<P>>) -> Result<Self, UnispaceError> {
        if sets.is_empty() {
            return Err(UnispaceError::InvalidFilterBasis {
                description: "generating family is empty".to_string(),
            });
        }
        if let Some(i) = sets.iter().position(|s| s.is_empty()) {
            return Err(UnispaceError::InvalidFilterBasis {
                description: format!(
                    "basis set {i} is empty; use FilterBase::bot for the bottom filter"
                ),
            });
        }
        for i in 0..sets.len() {
            for j in (i + 1)..sets.len() {
                let meet = sets[i].intersection(&sets[j]);
                if !sets.iter().any(|t| t.is_subset(&meet)) {
                    return Err(UnispaceError::InvalidFilterBasis {
                        description: format!(
                            "basis is not directed: no basis set inside the \
                             intersection of sets {i} and {j}"
                        ),
                    });
                }
            }
        }
        Ok(Self { sets, proper: true })
    }

    /// The degenerate bottom filter: contains every set.
    pub fn bot() -> Self {
        Self {
            sets: vec![PointSet::new()],
            proper: false,
        }
    }

    /// The principal filter of a set. The principal filter of ∅ is bot.
    pub fn principal(set: PointSet<P>) -> Self {
        if set.is_empty() {
            Self::bot()
        } else {
            Self {
                sets: vec![set],
                proper: true,
            }
        }
    }

    /// Sampled tails of a sequence: the pushforward of the at-top filter,
    /// truncated at a horizon.
    ///
    /// Basis set N is {seq(n) : N ≤ n ≤ horizon}, for N in 0..=horizon/2.
    /// A bounded stand-in for the genuine "eventually" filter. Tail
    /// starts stop at half the window so every basis set keeps a real
    /// sample: otherwise the final near-singleton tails would certify
    /// any sequence as Cauchy.
    pub fn eventually_tail(seq: impl Fn(u64) -> P, horizon: u64) -> Self {
        let sets = (0..=horizon / 2)
            .map(|start| (start..=horizon).map(&seq).collect())
            .collect();
        Self { sets, proper: true }
    }

    /// Whether this filter avoids the empty set.
    pub fn is_proper(&self) -> bool {
        self.proper
    }

    /// The generating basis.
    pub fn sets(&self) -> &[PointSet<P>] {
        &self.sets
    }

    /// Membership: does the filter contain `target`?
    pub fn contains_set(&self, target: &PointSet<P>) -> bool {
        self.sets.iter().any(|t| t.is_subset(target))
    }

    /// Membership against a predicate-described set: the index of the
    /// first basis set all of whose members satisfy `pred`, if any.
    ///
    /// This is how entourage balls over non-enumerable carriers are
    /// tested for membership.
    pub fn witness_where(&self, mut pred: impl FnMut(&P) -> bool) -> Option<usize> {
        self.sets
            .iter()
            .position(|t| t.iter().all(|p| pred(p)))
    }

    /// Whether this filter refines `other`: every member of `other` is a
    /// member of this filter. The bottom filter refines everything and is
    /// refined only by itself.
    pub fn refines(&self, other: &Self) -> bool {
        other.sets.iter().all(|s| self.contains_set(s))
    }

    /// The intersection of all basis sets.
    ///
    /// For a proper directed finite basis this is non-empty: it contains
    /// a basis set that sits inside every other one.
    pub fn core(&self) -> PointSet<P> {
        let mut iter = self.sets.iter();
        let first = match iter.next() {
            Some(s) => s.clone(),
            None => return PointSet::new(),
        };
        iter.fold(first, |acc, s| acc.intersection(s))
    }

    /// A basis for the product filter F × G: pairwise products of basis
    /// sets.
    pub fn product<Q: Point>(&self, other: &FilterBase<Q>) -> FilterBase<(P, Q)> {
        if !self.proper || !other.proper {
            return FilterBase::bot();
        }
        let sets = self
            .sets
            .iter()
            .flat_map(|s| {
                other.sets.iter().map(|t| {
                    s.iter()
                        .flat_map(|a| t.iter().map(move |b| (a.clone(), b.clone())))
                        .collect::<PointSet<(P, Q)>>()
                })
            })
            .collect();
        FilterBase { sets, proper: true }
    }

    /// A basis for the self-product F × F: the diagonal-cofinal sets
    /// t × t. These decide Cauchy-ness.
    pub fn self_product(&self) -> FilterBase<(P, P)> {
        if !self.proper {
            return FilterBase::bot();
        }
        let sets = self
            .sets
            .iter()
            .map(|t| {
                t.iter()
                    .flat_map(|a| t.iter().map(move |b| (a.clone(), b.clone())))
                    .collect::<PointSet<(P, P)>>()
            })
            .collect();
        FilterBase { sets, proper: true }
    }

    /// The pushforward along a map: images of the basis sets.
    ///
    /// Directedness and properness survive taking images.
    pub fn pushforward<Q: Point>(&self, f: impl Fn(&P) -> Q) -> FilterBase<Q> {
        let sets = self
            .sets
            .iter()
            .map(|t| t.iter().map(&f).collect())
            .collect();
        FilterBase {
            sets,
            proper: self.proper,
        }
    }

}

/// The pullback of a codomain filter along `f`, within a finite domain:
/// basis sets are the preimages f⁻¹(t) ∩ domain.
///
/// If any preimage is empty the result is bot; non-triviality is the
/// caller's obligation to check.
pub fn pullback_along<P: Point, Q: Point>(
    codomain: &FilterBase<Q>,
    f: impl Fn(&P) -> Q,
    domain: &PointSet<P>,
) -> FilterBase<P> {
    if !codomain.is_proper() {
        return FilterBase::bot();
    }
    let mut sets = Vec::with_capacity(codomain.sets().len());
    for t in codomain.sets() {
        let pre: PointSet<P> = domain.filtered(|x| t.contains(&f(x)));
        if pre.is_empty() {
            return FilterBase::bot();
        }
        sets.push(pre);
    }
    FilterBase { sets, proper: true }
}

/// The deterministic default choice function: the least element.
pub fn min_choice<P: Point>(set: &PointSet<P>) -> Option<P> {
    set.first().cloned()
}

/// A principal ultrafilter: the maximal filter of all sets containing
/// one point.
///
/// Over a finite carrier every ultrafilter is principal, so this is the
/// whole story for the enumerated models; the point doubles as the
/// convergence witness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ultrafilter<P: Ord> {
    point: P,
}

impl<P: Point> Ultrafilter<P> {
    pub fn principal(point: P) -> Self {
        Self { point }
    }

    pub fn point(&self) -> &P {
        &self.point
    }

    /// Ultrafilters are decisive: a set is in iff it contains the point.
    pub fn contains(&self, set: &PointSet<P>) -> bool {
        set.contains(&self.point)
    }

    /// The ultrafilter as a filter base.
    pub fn filter(&self) -> FilterBase<P> {
        FilterBase::principal(PointSet::singleton(self.point.clone()))
    }

    /// Extend a proper filter base to an ultrafilter refining it.
    ///
    /// The directed finite basis has a non-empty core; the injected
    /// choice function (the engine assumes no global choice) picks the
    /// representative. Fails on bot bases or a declining provider.
    pub fn extending(
        base: &FilterBase<P>,
        choice: &dyn Fn(&PointSet<P>) -> Option<P>,
    ) -> Result<Self, UnispaceError> {
        if !base.is_proper() {
            return Err(UnispaceError::InvalidFilterBasis {
                description: "cannot extend the bottom filter to an ultrafilter".to_string(),
            });
        }
        let core = base.core();
        if core.is_empty() {
            return Err(UnispaceError::ChoiceFailed {
                description: "filter base has an empty core; no principal extension exists"
                    .to_string(),
            });
        }
        match choice(&core) {
            Some(point) => Ok(Self { point }),
            None => Err(UnispaceError::ChoiceFailed {
                description: "witness provider declined to pick from a non-empty core"
                    .to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(ids: &[u32]) -> PointSet<u32> {
        ids.iter().copied().collect()
    }

    #[test]
    fn rejects_empty_member() {
        let err = FilterBase::new(vec![pts(&[1]), PointSet::new()]).unwrap_err();
        match err {
            UnispaceError::InvalidFilterBasis { description } => {
                assert!(description.contains("empty"));
            }
            other => panic!("expected InvalidFilterBasis, got {other:?}"),
        }
    }

    #[test]
    fn rejects_undirected_basis() {
        // {1} and {2} intersect in ∅ and no basis set sits inside it.
        assert!(FilterBase::new(vec![pts(&[1]), pts(&[2])]).is_err());
    }

    #[test]
    fn membership_against_basis() {
        let f = FilterBase::new(vec![pts(&[1, 2, 3]), pts(&[2, 3])]).unwrap();
        assert!(f.contains_set(&pts(&[1, 2, 3, 4])));
        assert!(f.contains_set(&pts(&[2, 3])));
        assert!(!f.contains_set(&pts(&[1, 2])));
        assert_eq!(f.witness_where(|p| *p >= 2), Some(1));
        assert_eq!(f.witness_where(|p| *p >= 3), None);
    }

    #[test]
    fn tails_are_nested_and_proper() {
        let f = FilterBase::eventually_tail(|n| n as u32, 6);
        assert!(f.is_proper());
        // Tail starts run to half the window only.
        assert_eq!(f.sets().len(), 4);
        // Later tails refine earlier ones, and all keep the window's end.
        assert!(f.sets()[3].is_subset(&f.sets()[0]));
        assert!(f.sets().iter().all(|t| t.contains(&6)));
    }

    #[test]
    fn self_product_squares_basis_sets() {
        let f = FilterBase::new(vec![pts(&[1, 2])]).unwrap();
        let ff = f.self_product();
        assert!(ff.contains_set(
            &[(1u32, 1u32), (1, 2), (2, 1), (2, 2)].into_iter().collect()
        ));
    }

    #[test]
    fn pushforward_keeps_direction() {
        let f = FilterBase::new(vec![pts(&[1, 2, 3]), pts(&[2, 3])]).unwrap();
        let g = f.pushforward(|p| p * 10);
        assert!(g.is_proper());
        assert!(g.contains_set(&pts(&[20, 30])));
    }

    #[test]
    fn pullback_collapses_on_empty_preimage() {
        let codomain = FilterBase::new(vec![pts(&[10])]).unwrap();
        let domain = pts(&[1, 2]);
        // Nothing maps onto 10.
        let pulled = pullback_along(&codomain, |p| p * 2, &domain);
        assert!(!pulled.is_proper());

        // 5 maps onto 10.
        let domain = pts(&[1, 5]);
        let pulled = pullback_along(&codomain, |p| p * 2, &domain);
        assert!(pulled.is_proper());
        assert!(pulled.contains_set(&pts(&[5])));
    }

    #[test]
    fn refinement_of_principal() {
        let coarse = FilterBase::principal(pts(&[1, 2, 3]));
        let fine = FilterBase::principal(pts(&[2]));
        assert!(fine.refines(&coarse));
        assert!(!coarse.refines(&fine));
    }

    #[test]
    fn refinement_of_bot_is_one_sided() {
        let bot: FilterBase<u32> = FilterBase::bot();
        let proper = FilterBase::principal(pts(&[1, 2]));
        // Bot contains every set, so no proper filter refines it.
        assert!(!proper.refines(&bot));
        assert!(bot.refines(&proper));
        assert!(bot.refines(&bot));
    }

    #[test]
    fn ultrafilter_extension_picks_from_core() {
        let f = FilterBase::new(vec![pts(&[1, 2, 3]), pts(&[2, 3])]).unwrap();
        let u = Ultrafilter::extending(&f, &min_choice).unwrap();
        assert_eq!(*u.point(), 2);
        assert!(u.filter().refines(&f));
        assert!(u.contains(&pts(&[2, 9])));
        assert!(!u.contains(&pts(&[3])));
    }

    #[test]
    fn ultrafilter_extension_rejects_bot() {
        let bot: FilterBase<u32> = FilterBase::bot();
        assert!(Ultrafilter::extending(&bot, &min_choice).is_err());
    }
}
