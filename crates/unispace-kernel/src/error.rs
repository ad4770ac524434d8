//! Error types for Unispace kernel operations.

/// Errors arising from structural precondition violations in
/// caller-supplied data.
///
/// These are raised eagerly by the validating constructors. Query-time
/// operations on successfully constructed values do not error — a
/// predicate that does not hold is an ordinary refuted outcome, not a
/// failure.
#[derive(Debug, thiserror::Error)]
pub enum UnispaceError {
    /// The supplied entourage family violates the uniformity axioms.
    #[error("invalid uniformity: {description}")]
    InvalidUniformity { description: String },

    /// The supplied generating family is not a proper, directed
    /// filter basis.
    #[error("invalid filter basis: {description}")]
    InvalidFilterBasis { description: String },

    /// A nonempty-witness provider declined to produce a representative.
    #[error("choice failed: {description}")]
    ChoiceFailed { description: String },

    /// A scenario description could not be assembled into engine values.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}
