//! # Unispace Converge
//!
//! The uniform-convergence simulator. Convergence statements about
//! infinite index sets are made bounded and total: an [`IndexFilter`]
//! ranges over `0..=horizon`, function families are probed on finite
//! domain samples, and every check is an exhaustive search for
//! thresholds and neighborhoods at the declared entourage scales.
//!
//! The checks:
//!
//! - [`tendsto_uniformly_on`] — one threshold per entourage covers the
//!   whole domain;
//! - [`tendsto_locally_uniformly_on`] — thresholds may vary with the
//!   point, each backed by a relative neighborhood;
//! - [`continuous_on`] / [`continuous_within_at`] — entourage-ball
//!   continuity on the sample;
//! - [`limit_continuous_on`] — continuity transfer through the
//!   three-link entourage chain;
//! - [`tendsto_comp_of_locally_uniform`] — composition with limits,
//!   with premise failures reported as such.
//!
//! Results come back as `CheckReport`s from `unispace-checker`, so
//! convergence verdicts carry the same deterministic witnesses as the
//! Cauchy and completeness checks.

pub mod family;
pub mod index;
pub mod uniform;

pub use family::{IndexedFamily, PointMap};
pub use index::IndexFilter;
pub use uniform::{
    continuous_on, continuous_within_at, limit_continuous_on, tendsto_comp_of_locally_uniform,
    tendsto_locally_uniformly_on, tendsto_uniformly_on,
};
