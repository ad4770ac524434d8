//! The completeness checker.
//!
//! A set is complete when every Cauchy filter containing it converges to
//! a point inside it. Two decision paths:
//!
//! - **Enumerated carriers** ([`is_complete`]): reduction to
//!   ultrafilters. Over a finite carrier every ultrafilter is principal,
//!   and every Cauchy filter's convergence follows from the convergence
//!   of an ultrafilter extending it — so the checker walks the principal
//!   ultrafilters refining the principal filter of the set and verifies
//!   each converges inside the set through entourage balls.
//! - **Non-enumerable carriers** ([`is_complete_against`]): refutation
//!   against caller-supplied Cauchy probe filters and candidate limits.
//!   A probe containing the set with no limit among the in-set
//!   candidates refutes completeness; the report names what was probed.
//!
//! The separated-union law is the composition rule: complete pieces with
//! an entourage forbidding migration between them stay complete as a
//! union, with no re-enumeration of the union's filters.

use crate::bounded::is_totally_bounded;
use crate::cauchy::is_cauchy;
use crate::report::{CheckFailure, CheckReport, axiom, failure_class, render};
use serde_json::json;
use unispace_kernel::{
    FilterBase, Point, PointSet, Relation, RelationalUniformity, Ultrafilter, Uniformity,
};

/// Does the filter converge to the point: is every basis-entourage ball
/// around the point a member of the filter?
pub fn converges_to<U: Uniformity>(
    filter: &FilterBase<U::Point>,
    point: &U::Point,
    uni: &U,
) -> bool {
    filter.is_proper()
        && uni
            .basis()
            .iter()
            .all(|u| filter.witness_where(|y| uni.near(u, point, y)).is_some())
}

/// The first candidate the filter converges to, in the candidate set's
/// order, if any. In a non-separated space several candidates may
/// qualify; the least one wins.
pub fn limit_in<U: Uniformity>(
    filter: &FilterBase<U::Point>,
    candidates: &PointSet<U::Point>,
    uni: &U,
) -> Option<U::Point> {
    candidates
        .iter()
        .find(|&x| converges_to(filter, x, uni))
        .cloned()
}

/// Completeness of a set over an enumerated carrier, by ultrafilter
/// reduction.
///
/// The ultrafilters refining the principal filter of the set are exactly
/// the principal ultrafilters at its points; each must converge to a
/// limit inside the set.
pub fn is_complete<P: Point>(
    set: &PointSet<P>,
    space: &RelationalUniformity<P>,
) -> CheckReport {
    let mut witnesses = Vec::new();

    for x in set.iter() {
        let ultra = Ultrafilter::principal(x.clone());
        match limit_in(&ultra.filter(), set, space) {
            Some(limit) => {
                witnesses.push(json!({
                    "ultrafilterAt": render(x),
                    "limit": render(&limit),
                }));
            }
            None => {
                return CheckReport::refuted(
                    "complete",
                    vec![CheckFailure::new(
                        failure_class::LIMIT_MISSING,
                        axiom::COMPLETE_LIMIT,
                        "an ultrafilter meeting the set has no limit inside it",
                        Some(json!({"ultrafilterAt": render(x)})),
                    )],
                );
            }
        }
    }

    CheckReport::satisfied("complete", witnesses)
}

/// Refutation-oriented completeness for non-enumerable carriers.
///
/// `set` is a membership predicate (the target set need not be finite);
/// `probes` are the Cauchy filters the caller puts forward; `candidates`
/// are the points limits are searched among. Each probe must be proper,
/// Cauchy, and contain the set — premise violations are reported as
/// such. A probe with no limit among the in-set candidates refutes.
pub fn is_complete_against<U: Uniformity>(
    set: impl Fn(&U::Point) -> bool,
    set_label: &str,
    probes: &[FilterBase<U::Point>],
    candidates: &PointSet<U::Point>,
    uni: &U,
) -> CheckReport {
    let mut witnesses = Vec::new();

    for (i, probe) in probes.iter().enumerate() {
        if !probe.is_proper() {
            return CheckReport::refuted(
                "complete",
                vec![CheckFailure::new(
                    failure_class::PREMISE_FAILURE,
                    axiom::COMPLETE_LIMIT,
                    "probe filter is improper",
                    Some(json!({"probe": i, "set": set_label})),
                )],
            );
        }
        if probe.witness_where(&set).is_none() {
            return CheckReport::refuted(
                "complete",
                vec![CheckFailure::new(
                    failure_class::PREMISE_FAILURE,
                    axiom::COMPLETE_LIMIT,
                    "probe filter does not contain the set",
                    Some(json!({"probe": i, "set": set_label})),
                )],
            );
        }
        let cauchy = is_cauchy(probe, uni);
        if !cauchy.is_satisfied() {
            let mut failures = vec![CheckFailure::new(
                failure_class::PREMISE_FAILURE,
                axiom::COMPLETE_LIMIT,
                "probe filter is not Cauchy",
                Some(json!({"probe": i, "set": set_label})),
            )];
            failures.extend(cauchy.failures);
            return CheckReport::refuted("complete", failures);
        }

        let in_set = candidates.filtered(&set);
        match limit_in(probe, &in_set, uni) {
            Some(limit) => {
                witnesses.push(json!({
                    "probe": i,
                    "limit": render(&limit),
                }));
            }
            None => {
                return CheckReport::refuted(
                    "complete",
                    vec![CheckFailure::new(
                        failure_class::LIMIT_MISSING,
                        axiom::COMPLETE_LIMIT,
                        "a Cauchy probe containing the set has no limit among the \
                         in-set candidates",
                        Some(json!({
                            "probe": i,
                            "set": set_label,
                            "candidates": in_set.len(),
                        })),
                    )],
                );
            }
        }
    }

    CheckReport::satisfied("complete", witnesses)
}

/// The separated-union law: complete pieces that cannot migrate into
/// each other below the separator's scale stay complete as a union.
///
/// Verifies the separation (no left point is near a right point, in
/// either orientation) and the completeness of each piece, then
/// certifies the union without enumerating its filters: a Cauchy filter
/// meeting the union is eventually inside one piece — a filter set finer
/// than the separator cannot straddle both.
pub fn separated_union_complete<P: Point>(
    left: &PointSet<P>,
    right: &PointSet<P>,
    separator: &Relation<P>,
    space: &RelationalUniformity<P>,
) -> CheckReport {
    separated_family_complete(&[left.clone(), right.clone()], separator, space)
}

/// The separated-union law for a finite family under one global
/// separating entourage: every distinct pair of pieces must be
/// separated by the same entourage.
pub fn separated_family_complete<P: Point>(
    pieces: &[PointSet<P>],
    separator: &Relation<P>,
    space: &RelationalUniformity<P>,
) -> CheckReport {
    let mut failures = Vec::new();

    for i in 0..pieces.len() {
        for j in (i + 1)..pieces.len() {
            let breach = pieces[i].iter().find_map(|s| {
                pieces[j]
                    .iter()
                    .find(|t| space.near(separator, s, t) || space.near(separator, t, s))
                    .map(|t| (s.clone(), t.clone()))
            });
            if let Some((s, t)) = breach {
                failures.push(CheckFailure::new(
                    failure_class::SEPARATION_FAILURE,
                    axiom::COMPLETE_SEPARATION,
                    "pieces are not separated by the supplied entourage",
                    Some(json!({
                        "pieces": [i, j],
                        "pair": [render(&s), render(&t)],
                        "entourage": space.describe(separator),
                    })),
                ));
            }
        }
    }
    if !failures.is_empty() {
        return CheckReport::refuted("complete_union", failures);
    }

    let mut parts = Vec::with_capacity(pieces.len());
    for piece in pieces {
        parts.push(is_complete(piece, space));
    }
    let combined = CheckReport::combine("complete_union", parts);
    if !combined.is_satisfied() {
        return combined;
    }

    let mut witnesses = vec![json!({
        "separated": pieces.len(),
        "entourage": space.describe(separator),
    })];
    witnesses.extend(combined.witnesses);
    CheckReport::satisfied("complete_union", witnesses)
}

/// Compactness: totally bounded and complete.
///
/// The cover pool is the whole carrier; the completeness side runs the
/// ultrafilter reduction.
pub fn is_compact<P: Point>(
    set: &PointSet<P>,
    space: &RelationalUniformity<P>,
) -> CheckReport {
    let bounded = is_totally_bounded(set, space.points(), space);
    let complete = is_complete(set, space);
    let mut report = CheckReport::combine("compact", vec![bounded, complete]);
    if report.is_satisfied() {
        report.witnesses.insert(
            0,
            json!({
                "axiom": axiom::COMPACT_SPLIT,
                "split": [axiom::BOUNDED_COVER, axiom::COMPLETE_LIMIT],
            }),
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use unispace_kernel::{Rat, RationalLine, Relation, rat};

    fn pts(ids: &[u32]) -> PointSet<u32> {
        ids.iter().copied().collect()
    }

    /// Carrier {1,2,3,4}, scales: everything, then {1,2} | {3,4}.
    fn blocks() -> RelationalUniformity<u32> {
        let points = pts(&[1, 2, 3, 4]);
        let coarse = Relation::full(&points);
        let fine = Relation::from_partition(&[pts(&[1, 2]), pts(&[3, 4])]);
        RelationalUniformity::new("blocks", points, vec![coarse, fine]).unwrap()
    }

    #[test]
    fn finite_sets_are_complete() {
        let uni = blocks();
        let report = is_complete(&pts(&[1, 3]), &uni);
        assert!(report.is_satisfied());
        assert_eq!(report.witnesses.len(), 2);
    }

    #[test]
    fn principal_ultrafilter_converges_to_its_point() {
        let uni = blocks();
        let u = Ultrafilter::principal(2u32);
        assert!(converges_to(&u.filter(), &2, &uni));
        // 1 shares every block with 2, so both are limits; the least
        // candidate wins.
        assert_eq!(limit_in(&u.filter(), uni.points(), &uni), Some(1));
        assert_eq!(limit_in(&u.filter(), &pts(&[2, 3, 4]), &uni), Some(2));
        assert_eq!(limit_in(&u.filter(), &pts(&[3, 4]), &uni), None);
    }

    #[test]
    fn separated_union_is_complete() {
        let uni = blocks();
        // The fine entourage separates {1,2} from {3,4}.
        let separator = uni.entourages()[1].clone();
        let report =
            separated_union_complete(&pts(&[1, 2]), &pts(&[3, 4]), &separator, &uni);
        assert!(report.is_satisfied());
    }

    #[test]
    fn union_law_rejects_unseparated_pieces() {
        let uni = blocks();
        // The coarse entourage relates everything: no separation.
        let separator = uni.entourages()[0].clone();
        let report = separated_union_complete(&pts(&[1]), &pts(&[3]), &separator, &uni);
        assert!(!report.is_satisfied());
        assert_eq!(
            report.failures[0].class,
            failure_class::SEPARATION_FAILURE
        );
    }

    #[test]
    fn family_law_separates_pairwise() {
        let uni = blocks();
        let separator = uni.entourages()[1].clone();
        // {1} and {2} share a block: the fine entourage does not
        // separate them.
        let report = separated_family_complete(
            &[pts(&[1]), pts(&[2]), pts(&[3])],
            &separator,
            &uni,
        );
        assert!(!report.is_satisfied());

        let report =
            separated_family_complete(&[pts(&[1, 2]), pts(&[3, 4])], &separator, &uni);
        assert!(report.is_satisfied());
    }

    #[test]
    fn compact_is_bounded_and_complete() {
        let uni = blocks();
        let set = pts(&[1, 2, 3]);
        let compact = is_compact(&set, &uni);
        let bounded = is_totally_bounded(&set, uni.points(), &uni);
        let complete = is_complete(&set, &uni);
        assert_eq!(
            compact.is_satisfied(),
            bounded.is_satisfied() && complete.is_satisfied()
        );
        assert!(compact.is_satisfied());
    }

    #[test]
    fn positive_rationals_refuted_complete_against_reciprocal_tails() {
        // The tails of 1/n form a Cauchy filter containing the positive
        // rationals, converging to 0 — which is outside the set. No
        // in-set candidate is a limit, so completeness is refuted.
        let line = RationalLine::dyadic(6);
        let tails = FilterBase::eventually_tail(|n| rat(1, n as i64 + 1), 200);

        let candidates: PointSet<Rat> = (1..=40)
            .map(|n| rat(1, n))
            .chain(std::iter::once(rat(0, 1)))
            .collect();

        let positive = |q: &Rat| *q > rat(0, 1);
        let report =
            is_complete_against(positive, "positive-rationals", &[tails.clone()], &candidates, &line);
        assert!(!report.is_satisfied());
        assert_eq!(report.failures[0].class, failure_class::LIMIT_MISSING);

        // The same probe against all of ℚ finds its limit at 0.
        let all = |_: &Rat| true;
        let report = is_complete_against(all, "rationals", &[tails], &candidates, &line);
        assert!(report.is_satisfied());
    }

    #[test]
    fn probe_that_misses_the_set_is_a_premise_failure() {
        let line = RationalLine::dyadic(3);
        let tails = FilterBase::eventually_tail(|n| rat(1, n as i64 + 1), 60);
        let negative = |q: &Rat| *q < rat(0, 1);
        let report = is_complete_against(
            negative,
            "negative-rationals",
            &[tails],
            &PointSet::new(),
            &line,
        );
        assert!(!report.is_satisfied());
        assert_eq!(report.failures[0].class, failure_class::PREMISE_FAILURE);
    }
}
