//! The rational line: an exact non-enumerable model space.
//!
//! Carrier ℚ, entourages Eps(ε) = {(x, y) : |x − y| < ε} for a declared
//! list of probe scales. Arithmetic is exact and arbitrary-precision
//! (`BigRational`), so `near` answers are never victims of rounding or
//! overflow; what is bounded is the probe basis itself — checks against
//! this space quantify over the declared scales, and every report names
//! them.
//!
//! This is the conformance model for the sequence scenarios: 1/n tails,
//! x/n and xⁿ function families.

use crate::error::UnispaceError;
use crate::point::PointSet;
use crate::uniformity::Uniformity;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;
use serde::{Deserialize, Serialize};

/// Exact rational scalar.
pub type Rat = BigRational;

/// Shorthand for small rational literals: `rat(1, 8)` is 1/8.
pub fn rat(num: i64, den: i64) -> Rat {
    Rat::new(num.into(), den.into())
}

/// A metric entourage: all pairs strictly closer than ε.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eps(pub Rat);

/// ℚ with the entourages of the standard absolute-value uniformity,
/// probed at a declared basis of scales.
#[derive(Debug, Clone)]
pub struct RationalLine {
    probes: Vec<Rat>,
}

impl RationalLine {
    /// Build a rational line with the given probe scales.
    ///
    /// Fails with [`UnispaceError::InvalidUniformity`] unless every
    /// probe is strictly positive and at least one is supplied.
    pub fn new(probes: Vec<Rat>) -> Result<Self, UnispaceError> {
        if probes.is_empty() {
            return Err(UnispaceError::InvalidUniformity {
                description: "rational line: probe basis is empty".to_string(),
            });
        }
        if let Some(bad) = probes.iter().find(|e| !e.is_positive()) {
            return Err(UnispaceError::InvalidUniformity {
                description: format!("rational line: probe scale {bad} is not positive"),
            });
        }
        let mut probes = probes;
        probes.sort();
        probes.reverse();
        probes.dedup();
        Ok(Self { probes })
    }

    /// The dyadic probe basis 1, 1/2, 1/4, …, 1/2ᵏ.
    pub fn dyadic(k: u32) -> Self {
        let probes = (0..=k)
            .map(|i| Rat::new(BigInt::from(1), BigInt::from(1) << i))
            .collect();
        Self { probes }
    }

    pub fn probes(&self) -> &[Rat] {
        &self.probes
    }

    /// Rationals q, q + step, …, up to and including `hi` (finite sample
    /// sets for domains like [0,1] ∩ ℚ).
    ///
    /// Fails with [`UnispaceError::InvalidUniformity`] unless the step is
    /// strictly positive.
    pub fn sample(lo: Rat, hi: Rat, step: Rat) -> Result<PointSet<Rat>, UnispaceError> {
        if !step.is_positive() {
            return Err(UnispaceError::InvalidUniformity {
                description: format!("rational line: sample step {step} is not positive"),
            });
        }
        let mut points = PointSet::new();
        let mut x = lo;
        while x <= hi {
            points.insert(x.clone());
            x += step.clone();
        }
        Ok(points)
    }
}

impl Uniformity for RationalLine {
    type Point = Rat;
    type Entourage = Eps;

    fn name(&self) -> &str {
        "rational-line"
    }

    fn basis(&self) -> Vec<Eps> {
        self.probes.iter().cloned().map(Eps).collect()
    }

    fn near(&self, u: &Eps, a: &Rat, b: &Rat) -> bool {
        (a - b).abs() < u.0
    }

    fn half(&self, u: &Eps) -> Option<Eps> {
        // |a−b| < ε/2 and |b−c| < ε/2 give |a−c| < ε, exactly.
        Some(Eps(u.0.clone() / rat(2, 1)))
    }

    fn symmetric(&self, u: &Eps) -> Option<Eps> {
        // |a−b| = |b−a|: every metric entourage is symmetric.
        Some(u.clone())
    }

    fn describe(&self, u: &Eps) -> String {
        format!("eps={}", u.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rat {
        rat(n, d)
    }

    #[test]
    fn near_is_strict_and_symmetric() {
        let line = RationalLine::dyadic(3);
        let e = Eps(r(1, 4));
        assert!(line.near(&e, &r(0, 1), &r(1, 5)));
        assert!(line.near(&e, &r(1, 5), &r(0, 1)));
        // Exactly ε apart is not near.
        assert!(!line.near(&e, &r(0, 1), &r(1, 4)));
    }

    #[test]
    fn half_composes_into_whole() {
        let line = RationalLine::dyadic(2);
        let e = Eps(r(1, 2));
        let h = line.half(&e).unwrap();
        // a ~h b ~h c forces a ~e c.
        let (a, b, c) = (r(0, 1), r(1, 5), r(2, 5));
        assert!(line.near(&h, &a, &b) && line.near(&h, &b, &c));
        assert!(line.near(&e, &a, &c));
    }

    #[test]
    fn probes_sorted_coarse_to_fine() {
        let line = RationalLine::new(vec![r(1, 8), r(1, 2), r(1, 8)]).unwrap();
        assert_eq!(line.probes(), &[r(1, 2), r(1, 8)]);
    }

    #[test]
    fn fine_dyadic_probes_stay_exact() {
        // Scales far past the machine-word range are still exact.
        let line = RationalLine::dyadic(80);
        let finest = line.probes().last().unwrap();
        assert!(finest.is_positive());
        assert_eq!(finest * Rat::new(BigInt::from(1) << 80, 1.into()), r(1, 1));
    }

    #[test]
    fn rejects_nonpositive_probe() {
        assert!(RationalLine::new(vec![r(0, 1)]).is_err());
        assert!(RationalLine::new(vec![]).is_err());
    }

    #[test]
    fn sample_covers_unit_interval() {
        let domain = RationalLine::sample(r(0, 1), r(1, 1), r(1, 4)).unwrap();
        assert_eq!(domain.len(), 5);
        assert!(domain.contains(&r(1, 2)));
    }

    #[test]
    fn sample_rejects_nonpositive_step() {
        assert!(RationalLine::sample(r(0, 1), r(1, 1), r(0, 1)).is_err());
        assert!(RationalLine::sample(r(0, 1), r(1, 1), r(-1, 4)).is_err());
    }
}
