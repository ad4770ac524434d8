//! # Unispace Kernel
//!
//! The kernel of the uniform-space evaluation engine: entourages,
//! uniformity bases, and explicit filter bases over an arbitrary carrier.
//!
//! This crate is **carrier-agnostic**: it does not prescribe what points
//! are (identifiers, rationals, tuples, …). It only prescribes how
//! closeness scales compose and how filter bases must behave.
//!
//! ## Architecture
//!
//! ```text
//! Point / PointSet       ← The carrier, opaque to the engine
//!     │
//! Relation               ← Finite sets of ordered pairs (one scale)
//!     │
//! Uniformity             ← A basis of entourages: near / half / symmetric
//!     │
//! FilterBase             ← Directed generating families of subsets
//!     │
//! Ultrafilter            ← Decisive filters, extension via injected choice
//! ```
//!
//! Every value is immutable once constructed; the validating constructors
//! (`RelationalUniformity::new`, `FilterBase::new`) are the only place
//! structural preconditions are enforced. Queries on validated inputs
//! never fail — they answer.

pub mod entourage;
pub mod error;
pub mod filter;
pub mod line;
pub mod point;
pub mod uniformity;

pub use entourage::Relation;
pub use error::UnispaceError;
pub use filter::{FilterBase, Ultrafilter, min_choice, pullback_along};
pub use line::{Eps, Rat, RationalLine, rat};
pub use point::{Point, PointSet};
pub use uniformity::{RelationalUniformity, Uniformity, closure};
