//! Indexed function families and point maps.
//!
//! The simulator checks convergence of a family `F : index × point →
//! point` toward a limit `point → point`. Both seams are traits with
//! blanket closure impls so callers pass plain closures while scenario
//! code can supply table-backed implementations.

/// A family of maps indexed by `u64`.
pub trait IndexedFamily<P> {
    fn at(&self, n: u64, x: &P) -> P;
}

impl<P, F> IndexedFamily<P> for F
where
    F: Fn(u64, &P) -> P,
{
    fn at(&self, n: u64, x: &P) -> P {
        self(n, x)
    }
}

/// A self-map of the carrier, used for limits and for maps under
/// continuity checks.
pub trait PointMap<P> {
    fn apply(&self, x: &P) -> P;
}

impl<P, F> PointMap<P> for F
where
    F: Fn(&P) -> P,
{
    fn apply(&self, x: &P) -> P {
        self(x)
    }
}
