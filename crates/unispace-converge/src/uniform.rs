//! Uniform and locally uniform convergence checks.
//!
//! Everything here is a bounded simulation: domains are finite point
//! sets, indices range over an [`IndexFilter`] horizon, and every
//! satisfied report records the thresholds and neighborhoods it found.
//! Refutations name the first entourage (and point, where relevant) that
//! admits no certificate within the horizon.

use crate::family::{IndexedFamily, PointMap};
use crate::index::IndexFilter;
use serde_json::json;
use unispace_checker::{CheckFailure, CheckReport, axiom, failure_class};
use unispace_kernel::{PointSet, Uniformity};

/// Does the family tend to the limit uniformly on the domain?
///
/// For every basis entourage U there must be a threshold N within the
/// horizon with `(limit(x), family(n, x)) ∈ U` for every domain point x
/// and every index n from N on. One witness per entourage records N.
pub fn tendsto_uniformly_on<U: Uniformity>(
    family: &impl IndexedFamily<U::Point>,
    limit: &impl PointMap<U::Point>,
    index: &IndexFilter,
    domain: &PointSet<U::Point>,
    uni: &U,
) -> CheckReport {
    let mut witnesses = Vec::new();

    for entourage in uni.basis() {
        let threshold = index.eventually(|n| {
            domain
                .iter()
                .all(|x| uni.near(&entourage, &limit.apply(x), &family.at(n, x)))
        });
        match threshold {
            Some(n) => {
                witnesses.push(json!({
                    "entourage": uni.describe(&entourage),
                    "threshold": n,
                }));
            }
            None => {
                return CheckReport::refuted(
                    "tendsto_uniformly_on",
                    vec![CheckFailure::new(
                        failure_class::CONVERGENCE_FAILURE,
                        axiom::CONV_UNIFORM,
                        "no threshold within the horizon works for every domain point",
                        Some(json!({"entourage": uni.describe(&entourage)})),
                    )],
                );
            }
        }
    }

    CheckReport::satisfied("tendsto_uniformly_on", witnesses)
}

/// Locally uniform witness at a single point: a basis ball around x
/// (intersected with the domain) and a threshold making every point of
/// the ball eventually near its limit. Returns the ball description and
/// the threshold.
fn locally_uniform_at<U: Uniformity>(
    family: &impl IndexedFamily<U::Point>,
    limit: &impl PointMap<U::Point>,
    index: &IndexFilter,
    domain: &PointSet<U::Point>,
    x: &U::Point,
    entourage: &U::Entourage,
    uni: &U,
) -> Option<(String, u64)> {
    uni.basis().iter().find_map(|w| {
        let ball = domain.filtered(|y| uni.near(w, x, y));
        let threshold = index.eventually(|n| {
            ball.iter()
                .all(|y| uni.near(entourage, &limit.apply(y), &family.at(n, y)))
        })?;
        Some((uni.describe(w), threshold))
    })
}

/// Does the family tend to the limit locally uniformly on the domain?
///
/// Per basis entourage and per domain point, some relative neighborhood
/// of the point must carry a common threshold. Weaker than
/// [`tendsto_uniformly_on`]: the neighborhood and threshold may vary
/// with the point.
pub fn tendsto_locally_uniformly_on<U: Uniformity>(
    family: &impl IndexedFamily<U::Point>,
    limit: &impl PointMap<U::Point>,
    index: &IndexFilter,
    domain: &PointSet<U::Point>,
    uni: &U,
) -> CheckReport {
    let mut witnesses = Vec::new();

    for entourage in uni.basis() {
        let mut max_threshold = 0u64;
        for x in domain.iter() {
            match locally_uniform_at(family, limit, index, domain, x, &entourage, uni) {
                Some((_, threshold)) => max_threshold = max_threshold.max(threshold),
                None => {
                    return CheckReport::refuted(
                        "tendsto_locally_uniformly_on",
                        vec![CheckFailure::new(
                            failure_class::CONVERGENCE_FAILURE,
                            axiom::CONV_LOCAL,
                            "no neighborhood of the point carries a common threshold",
                            Some(json!({
                                "entourage": uni.describe(&entourage),
                                "point": format!("{x:?}"),
                            })),
                        )],
                    );
                }
            }
        }
        witnesses.push(json!({
            "entourage": uni.describe(&entourage),
            "points": domain.len(),
            "maxThreshold": max_threshold,
        }));
    }

    CheckReport::satisfied("tendsto_locally_uniformly_on", witnesses)
}

/// Entourage-ball continuity of a map at a point, relative to the
/// domain: for every basis entourage U some basis ball around x maps
/// into the U-ball around map(x).
pub fn continuous_within_at<U: Uniformity>(
    map: &impl PointMap<U::Point>,
    x: &U::Point,
    domain: &PointSet<U::Point>,
    uni: &U,
) -> bool {
    uni.basis().iter().all(|u| {
        uni.basis().iter().any(|w| {
            domain
                .iter()
                .filter(|y| uni.near(w, x, y))
                .all(|y| uni.near(u, &map.apply(x), &map.apply(y)))
        })
    })
}

/// Entourage-ball continuity at every point of the domain.
pub fn continuous_on<U: Uniformity>(
    map: &impl PointMap<U::Point>,
    domain: &PointSet<U::Point>,
    uni: &U,
) -> CheckReport {
    for x in domain.iter() {
        if !continuous_within_at(map, x, domain, uni) {
            return CheckReport::refuted(
                "continuous_on",
                vec![CheckFailure::new(
                    failure_class::CONTINUITY_FAILURE,
                    axiom::CONV_CONTINUITY,
                    "no basis ball around the point maps inside the target ball",
                    Some(json!({"point": format!("{x:?}")})),
                )],
            );
        }
    }
    CheckReport::satisfied(
        "continuous_on",
        vec![json!({"points": domain.len()})],
    )
}

/// Continuity transfer: eventually-continuous members converging locally
/// uniformly have a continuous limit.
///
/// Per target entourage U₀ the check shrinks twice, v₁ = symmetric half
/// of U₀ and v₂ = symmetric half of v₁, so v₂ is symmetric and
/// v₂ ∘ v₂ ∘ v₂ ⊆ U₀. Around each point it obtains a locally uniform
/// neighborhood at scale v₂, finds a member continuous at that scale on
/// the neighborhood, and chains
///
/// ```text
/// limit(x)  v₂  F_n(x)  v₂  F_n(y)  v₂  limit(y)
/// ```
///
/// The conclusion `(limit(x), limit(y)) ∈ U₀` is then verified directly
/// on every neighborhood point.
pub fn limit_continuous_on<U: Uniformity>(
    family: &impl IndexedFamily<U::Point>,
    limit: &impl PointMap<U::Point>,
    index: &IndexFilter,
    domain: &PointSet<U::Point>,
    uni: &U,
) -> CheckReport {
    let mut witnesses = Vec::new();

    for u0 in uni.basis() {
        let v2 = uni
            .symmetric_half(&u0)
            .and_then(|v1| uni.symmetric_half(&v1));
        let v2 = match v2 {
            Some(v2) => v2,
            None => {
                return CheckReport::refuted(
                    "limit_continuous_on",
                    vec![CheckFailure::new(
                        failure_class::CONTINUITY_FAILURE,
                        axiom::CONV_CONTINUITY,
                        "the basis admits no second symmetric half at this scale",
                        Some(json!({"entourage": uni.describe(&u0)})),
                    )],
                );
            }
        };

        for x in domain.iter() {
            let witness = uni.basis().iter().find_map(|w| {
                let ball = domain.filtered(|y| uni.near(w, x, y));
                let threshold = index.eventually(|n| {
                    ball.iter()
                        .all(|y| uni.near(&v2, &limit.apply(y), &family.at(n, y)))
                })?;
                // A member continuous at scale v₂ on the neighborhood.
                let member = (threshold..=index.horizon()).find(|&n| {
                    ball.iter()
                        .all(|y| uni.near(&v2, &family.at(n, x), &family.at(n, y)))
                })?;
                Some((ball, member))
            });
            let (ball, member) = match witness {
                Some(found) => found,
                None => {
                    return CheckReport::refuted(
                        "limit_continuous_on",
                        vec![CheckFailure::new(
                            failure_class::PREMISE_FAILURE,
                            axiom::CONV_CONTINUITY,
                            "no neighborhood carries both a threshold and a continuous member",
                            Some(json!({
                                "entourage": uni.describe(&u0),
                                "point": format!("{x:?}"),
                            })),
                        )],
                    );
                }
            };

            // The three-link chain must land inside U₀.
            let chained = ball
                .iter()
                .all(|y| uni.near(&u0, &limit.apply(x), &limit.apply(y)));
            if !chained {
                return CheckReport::refuted(
                    "limit_continuous_on",
                    vec![CheckFailure::new(
                        failure_class::CONTINUITY_FAILURE,
                        axiom::CONV_CONTINUITY,
                        "the chained approximation escapes the target entourage",
                        Some(json!({
                            "entourage": uni.describe(&u0),
                            "point": format!("{x:?}"),
                            "member": member,
                        })),
                    )],
                );
            }
        }

        witnesses.push(json!({
            "entourage": uni.describe(&u0),
            "shrunk": uni.describe(&v2),
            "points": domain.len(),
        }));
    }

    CheckReport::satisfied("limit_continuous_on", witnesses)
}

/// Composition with limits: if the family converges locally uniformly
/// around x, the limit is continuous at x, and `g(n) → x` inside the
/// domain, then `family(n, g(n)) → limit(x)`.
///
/// The premises are verified first and reported as premise failures when
/// they break, which is what happens for pointwise-but-not-uniform
/// convergence. The conclusion is then checked directly: one threshold
/// per basis entourage.
pub fn tendsto_comp_of_locally_uniform<U: Uniformity>(
    family: &impl IndexedFamily<U::Point>,
    limit: &impl PointMap<U::Point>,
    g: &impl Fn(u64) -> U::Point,
    x: &U::Point,
    index: &IndexFilter,
    domain: &PointSet<U::Point>,
    uni: &U,
) -> CheckReport {
    if let Some(n) = index.indices().find(|&n| !domain.contains(&g(n))) {
        return CheckReport::refuted(
            "tendsto_comp_of_locally_uniform",
            vec![CheckFailure::new(
                failure_class::PREMISE_FAILURE,
                axiom::CONV_COMPOSE,
                "the approaching sequence leaves the domain",
                Some(json!({"index": n})),
            )],
        );
    }

    for entourage in uni.basis() {
        if index.eventually(|n| uni.near(&entourage, x, &g(n))).is_none() {
            return CheckReport::refuted(
                "tendsto_comp_of_locally_uniform",
                vec![CheckFailure::new(
                    failure_class::PREMISE_FAILURE,
                    axiom::CONV_COMPOSE,
                    "the approaching sequence does not tend to the point",
                    Some(json!({"entourage": uni.describe(&entourage)})),
                )],
            );
        }
        if locally_uniform_at(family, limit, index, domain, x, &entourage, uni).is_none() {
            return CheckReport::refuted(
                "tendsto_comp_of_locally_uniform",
                vec![CheckFailure::new(
                    failure_class::PREMISE_FAILURE,
                    axiom::CONV_LOCAL,
                    "convergence is not locally uniform around the point",
                    Some(json!({
                        "entourage": uni.describe(&entourage),
                        "point": format!("{x:?}"),
                    })),
                )],
            );
        }
    }

    if !continuous_within_at(limit, x, domain, uni) {
        return CheckReport::refuted(
            "tendsto_comp_of_locally_uniform",
            vec![CheckFailure::new(
                failure_class::PREMISE_FAILURE,
                axiom::CONV_CONTINUITY,
                "the limit is not continuous at the point",
                Some(json!({"point": format!("{x:?}")})),
            )],
        );
    }

    let mut witnesses = Vec::new();
    for entourage in uni.basis() {
        let target = limit.apply(x);
        let threshold = index.eventually(|n| uni.near(&entourage, &target, &family.at(n, &g(n))));
        match threshold {
            Some(n) => {
                witnesses.push(json!({
                    "entourage": uni.describe(&entourage),
                    "threshold": n,
                }));
            }
            None => {
                return CheckReport::refuted(
                    "tendsto_comp_of_locally_uniform",
                    vec![CheckFailure::new(
                        failure_class::CONVERGENCE_FAILURE,
                        axiom::CONV_COMPOSE,
                        "the composed sequence misses the limit at this scale",
                        Some(json!({"entourage": uni.describe(&entourage)})),
                    )],
                );
            }
        }
    }

    CheckReport::satisfied("tendsto_comp_of_locally_uniform", witnesses)
}
