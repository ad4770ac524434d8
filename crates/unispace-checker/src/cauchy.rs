//! The Cauchy checker.
//!
//! A filter f is Cauchy for a uniformity exactly when it is proper and
//! its self-product refines the uniformity: for every basis entourage U
//! there is a basis set t of f with t × t ⊆ U. The members of a Cauchy
//! filter become arbitrarily fine.
//!
//! The check iterates the uniformity basis and asks the filter for a
//! witness set per entourage, short-circuiting on the first entourage
//! without one.

use crate::report::{CheckFailure, CheckReport, axiom, failure_class, render};
use serde_json::json;
use unispace_kernel::{FilterBase, Uniformity};

/// Is the filter Cauchy against the uniformity?
///
/// Satisfied reports carry one witness per basis entourage: the index of
/// the filter basis set whose self-product fits inside it.
pub fn is_cauchy<U: Uniformity>(filter: &FilterBase<U::Point>, uni: &U) -> CheckReport {
    if !filter.is_proper() {
        return CheckReport::refuted(
            "cauchy",
            vec![CheckFailure::new(
                failure_class::IMPROPER_FILTER,
                axiom::CAUCHY_PRODUCT,
                "the bottom filter is not Cauchy by convention",
                None,
            )],
        );
    }

    let mut witnesses = Vec::new();
    for entourage in uni.basis() {
        let found = filter.sets().iter().position(|t| {
            t.iter()
                .all(|a| t.iter().all(|b| uni.near(&entourage, a, b)))
        });
        match found {
            Some(index) => {
                witnesses.push(json!({
                    "entourage": uni.describe(&entourage),
                    "basisSet": index,
                    "size": filter.sets()[index].len(),
                }));
            }
            None => {
                // First entourage without a witness set refutes.
                return CheckReport::refuted(
                    "cauchy",
                    vec![CheckFailure::new(
                        failure_class::CAUCHY_FAILURE,
                        axiom::CAUCHY_PRODUCT,
                        "no filter basis set has its self-product inside the entourage",
                        Some(json!({"entourage": uni.describe(&entourage)})),
                    )],
                );
            }
        }
    }

    CheckReport::satisfied("cauchy", witnesses)
}

/// Cauchy-ness of a sequence through its sampled-tail filter.
///
/// The report's witnesses are tail thresholds: basis set N is the tail
/// starting at index N, so the recorded `basisSet` doubles as the "choose
/// N large enough" certificate.
pub fn sequence_is_cauchy<U: Uniformity>(
    seq: impl Fn(u64) -> U::Point,
    horizon: u64,
    uni: &U,
) -> CheckReport {
    let tails = FilterBase::eventually_tail(seq, horizon);
    is_cauchy(&tails, uni)
}

/// Does the map carry a Cauchy filter to a Cauchy filter?
///
/// Verifies the premise (the source filter is Cauchy), verifies the map
/// is uniformly continuous on the filter's basis sets (every target
/// entourage admits a source entourage mapped into it, checked on basis
/// pairs), then checks the pushforward. Premise failures are reported as
/// such rather than silently conflated with the conclusion.
pub fn pushforward_cauchy<S: Uniformity, T: Uniformity>(
    filter: &FilterBase<S::Point>,
    map: impl Fn(&S::Point) -> T::Point,
    source: &S,
    target: &T,
) -> CheckReport {
    let premise = is_cauchy(filter, source);
    if !premise.is_satisfied() {
        let mut failures = vec![CheckFailure::new(
            failure_class::PREMISE_FAILURE,
            axiom::CAUCHY_PUSHFORWARD,
            "source filter is not Cauchy",
            Some(json!({"space": source.name()})),
        )];
        failures.extend(premise.failures);
        return CheckReport::refuted("cauchy_pushforward", failures);
    }

    // Uniform continuity, observed on the filter's own basis pairs: for
    // every target entourage V some source entourage U with
    // (a, b) ∈ U ⇒ (m a, m b) ∈ V across the basis sets.
    let source_basis = source.basis();
    for v in target.basis() {
        let admissible = source_basis.iter().any(|u| {
            filter.sets().iter().all(|t| {
                t.iter().all(|a| {
                    t.iter()
                        .all(|b| !source.near(u, a, b) || target.near(&v, &map(a), &map(b)))
                })
            })
        });
        if !admissible {
            return CheckReport::refuted(
                "cauchy_pushforward",
                vec![CheckFailure::new(
                    failure_class::PREMISE_FAILURE,
                    axiom::CAUCHY_PUSHFORWARD,
                    "map is not uniformly continuous on the filter basis at this scale",
                    Some(json!({"entourage": target.describe(&v)})),
                )],
            );
        }
    }

    let pushed = filter.pushforward(map);
    let conclusion = is_cauchy(&pushed, target);
    let mut witnesses = vec![json!({
        "premise": "cauchy",
        "space": source.name(),
        "witnesses": render(&premise.witnesses),
    })];
    witnesses.extend(conclusion.witnesses.clone());
    if conclusion.is_satisfied() {
        CheckReport::satisfied("cauchy_pushforward", witnesses)
    } else {
        CheckReport::refuted("cauchy_pushforward", conclusion.failures)
    }
}
