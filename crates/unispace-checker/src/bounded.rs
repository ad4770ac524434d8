//! The totally-bounded engine.
//!
//! A set is totally bounded when, at every scale, finitely many
//! entourage balls cover it. The engine searches covers greedily from a
//! caller-supplied center pool, extracts in-set covers from external
//! ones (the center-extraction algorithm), and derives Cauchy-ness of
//! ultrafilters that contain a totally bounded set.

use crate::report::{CheckFailure, CheckReport, axiom, failure_class, render};
use serde_json::json;
use unispace_kernel::{PointSet, Ultrafilter, UnispaceError, Uniformity};

/// Greedily cover `set` at scale `u` with centers drawn from `pool`.
///
/// Walks the set in order; every point not yet covered recruits a pool
/// center whose ball contains it (the point itself when the pool allows,
/// so balls contain their centers via the diagonal). Returns the centers
/// or the first uncoverable point.
fn greedy_cover<U: Uniformity>(
    set: &PointSet<U::Point>,
    pool: &PointSet<U::Point>,
    u: &U::Entourage,
    uni: &U,
) -> Result<Vec<U::Point>, U::Point> {
    let mut centers: Vec<U::Point> = Vec::new();
    for x in set.iter() {
        if centers.iter().any(|c| uni.near(u, c, x)) {
            continue;
        }
        if pool.contains(x) {
            centers.push(x.clone());
            continue;
        }
        match pool.iter().find(|c| uni.near(u, c, x)) {
            Some(c) => centers.push(c.clone()),
            None => return Err(x.clone()),
        }
    }
    Ok(centers)
}

/// Is the set finitely coverable by entourage balls at every basis
/// scale, with centers drawn from `pool`?
///
/// Satisfied reports carry one witness per entourage: the centers found.
/// Refuted reports name the entourage and the first point no pool ball
/// reaches.
pub fn is_totally_bounded<U: Uniformity>(
    set: &PointSet<U::Point>,
    pool: &PointSet<U::Point>,
    uni: &U,
) -> CheckReport {
    let mut witnesses = Vec::new();

    for entourage in uni.basis() {
        match greedy_cover(set, pool, &entourage, uni) {
            Ok(centers) => {
                witnesses.push(json!({
                    "entourage": uni.describe(&entourage),
                    "centers": render(&centers),
                }));
            }
            Err(point) => {
                return CheckReport::refuted(
                    "totally_bounded",
                    vec![CheckFailure::new(
                        failure_class::COVER_MISSING,
                        axiom::BOUNDED_COVER,
                        "no ball from the center pool reaches a point of the set",
                        Some(json!({
                            "entourage": uni.describe(&entourage),
                            "point": render(&point),
                        })),
                    )],
                );
            }
        }
    }

    CheckReport::satisfied("totally_bounded", witnesses)
}

/// Center extraction: turn an external cover into an in-set cover one
/// scale up.
///
/// Given a symmetric entourage `r` and a finite `r`-cover of the set
/// (centers anywhere), pick a representative inside the set from every
/// cell that meets it, via the injected choice function. For any point x
/// of the set there is a cell center c with (c, x) ∈ r and a
/// representative y with (c, y) ∈ r, hence (y, x) ∈ r ∘ r — the
/// representatives cover the set at scale r ∘ r using only points of
/// the set, and there are no more of them than cells.
///
/// Downstream consumers need exactly this: covering points drawn from
/// the set itself, not external witnesses.
pub fn centers_within<U: Uniformity>(
    set: &PointSet<U::Point>,
    r: &U::Entourage,
    cover: &[U::Point],
    uni: &U,
    choice: &dyn Fn(&PointSet<U::Point>) -> Option<U::Point>,
) -> Result<Vec<U::Point>, UnispaceError> {
    let mut reps = Vec::new();
    for c in cover {
        let cell = set.filtered(|x| uni.near(r, c, x));
        if cell.is_empty() {
            continue;
        }
        match choice(&cell) {
            Some(y) => reps.push(y),
            None => {
                return Err(UnispaceError::ChoiceFailed {
                    description: "witness provider declined to pick from a non-empty cell"
                        .to_string(),
                });
            }
        }
    }
    Ok(reps)
}

/// An ultrafilter containing a totally bounded set is Cauchy.
///
/// Per basis entourage U: take a symmetric half r, cover the set with
/// r-balls centered inside it, and locate the covering cell the
/// ultrafilter decides for — membership in a finite union splits over an
/// ultrafilter, so exactly one search succeeds. The located cell's
/// self-product is verified to sit inside U.
pub fn cauchy_of_totally_bounded<U: Uniformity>(
    ultra: &Ultrafilter<U::Point>,
    set: &PointSet<U::Point>,
    uni: &U,
) -> CheckReport {
    if !ultra.contains(set) {
        return CheckReport::refuted(
            "cauchy_of_totally_bounded",
            vec![CheckFailure::new(
                failure_class::PREMISE_FAILURE,
                axiom::BOUNDED_ULTRA,
                "the ultrafilter does not contain the set",
                Some(json!({"point": render(ultra.point())})),
            )],
        );
    }

    let mut witnesses = Vec::new();

    for entourage in uni.basis() {
        let r = match uni.symmetric_half(&entourage) {
            Some(r) => r,
            None => {
                return CheckReport::refuted(
                    "cauchy_of_totally_bounded",
                    vec![CheckFailure::new(
                        failure_class::CAUCHY_FAILURE,
                        axiom::BOUNDED_ULTRA,
                        "no symmetric half-size entourage is available at this scale",
                        Some(json!({"entourage": uni.describe(&entourage)})),
                    )],
                );
            }
        };

        // Cover with centers inside the set; balls own their centers.
        let centers = match greedy_cover(set, set, &r, uni) {
            Ok(centers) => centers,
            Err(point) => {
                return CheckReport::refuted(
                    "cauchy_of_totally_bounded",
                    vec![CheckFailure::new(
                        failure_class::COVER_MISSING,
                        axiom::BOUNDED_ULTRA,
                        "the set is not totally bounded at the derived scale",
                        Some(json!({
                            "entourage": uni.describe(&r),
                            "point": render(&point),
                        })),
                    )],
                );
            }
        };

        // The ultrafilter decides for exactly one covering cell.
        let cell = centers
            .iter()
            .map(|c| set.filtered(|x| uni.near(&r, c, x)))
            .find(|cell| ultra.contains(cell));
        let cell = match cell {
            Some(cell) => cell,
            None => {
                return CheckReport::refuted(
                    "cauchy_of_totally_bounded",
                    vec![CheckFailure::new(
                        failure_class::CAUCHY_FAILURE,
                        axiom::BOUNDED_ULTRA,
                        "no covering cell is a member of the ultrafilter",
                        Some(json!({"entourage": uni.describe(&entourage)})),
                    )],
                );
            }
        };

        // r symmetric and r ∘ r ⊆ U force the cell's self-product in.
        let fine = cell
            .iter()
            .all(|a| cell.iter().all(|b| uni.near(&entourage, a, b)));
        if !fine {
            return CheckReport::refuted(
                "cauchy_of_totally_bounded",
                vec![CheckFailure::new(
                    failure_class::CAUCHY_FAILURE,
                    axiom::BOUNDED_ULTRA,
                    "the located cell's self-product escapes the entourage",
                    Some(json!({"entourage": uni.describe(&entourage)})),
                )],
            );
        }

        witnesses.push(json!({
            "entourage": uni.describe(&entourage),
            "cellSize": cell.len(),
        }));
    }

    CheckReport::satisfied("cauchy_of_totally_bounded", witnesses)
}
