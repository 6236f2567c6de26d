//! Errors reported by sorting, selection and the generational driver.

/// An alias for results returned throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while ranking or evolving a population.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// Fitness vectors compared together have different lengths.
  #[error("dimension mismatch: expected {expected} objectives, found {found}")]
  DimensionMismatch {
    /// Number of objectives of the first fitness vector.
    expected: usize,
    /// Number of objectives of the offending one.
    found: usize,
  },
  /// A front or crowding distance was requested for zero individuals.
  #[error("empty input: at least one individual is required")]
  EmptyInput,
  /// Fitness vectors have no objectives at all.
  #[error("fitness vectors must have at least one objective")]
  ZeroObjectives,
  /// No fitness is known for an individual taking part in a comparison.
  #[error("no fitness known for {0:?}")]
  MissingFitness(crate::individual::Individual),
  /// The evaluator failed. Its error is kept as is.
  #[error("evaluation failed: {0}")]
  Evaluation(#[source] anyhow::Error),
  /// Reproduction produced no individuals.
  #[error("reproduction produced an empty population")]
  EmptyOffspring,
  /// The configuration is not usable.
  #[error("invalid configuration: {0}")]
  InvalidConfig(String),
}
