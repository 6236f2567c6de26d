//! Stopping policies for the generational loop.

use crate::score::Fitness;

/// A snapshot of an optimizer's progress passed to a [`Terminator`].
#[derive(Clone, Copy, Debug)]
pub struct Progress<'a> {
  /// Number of completed generations.
  pub generation: usize,
  /// Number of evaluator calls so far. Cached individuals aren't evaluated
  /// twice, so this may grow slower than the population.
  pub evaluations: usize,
  /// Fitness vectors of the best-known front.
  pub best_evaluation: &'a [Fitness],
}

/// An operator that decides whether the optimizer should stop before running
/// another generation.
///
/// # Examples
/// ```
/// # use paretoga::termination::{Progress, Terminator};
/// // stop once the best front holds at least 10 individuals
/// let t = |p: &Progress| p.best_evaluation.len() >= 10;
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Terminator {
  /// If returns `true`, the optimizer stops.
  fn terminate(&mut self, progress: &Progress<'_>) -> bool;
}

impl<F> Terminator for F
where
  F: FnMut(&Progress<'_>) -> bool,
{
  fn terminate(&mut self, progress: &Progress<'_>) -> bool {
    self(progress)
  }
}

/// A `Terminator` that never stops the optimizer. Whoever drives it has to
/// stop calling [`one_generation()`].
///
/// [`one_generation()`]: crate::optimizer::nsga::Nsga2::one_generation
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct NeverTerminator;

impl Terminator for NeverTerminator {
  fn terminate(&mut self, _: &Progress<'_>) -> bool {
    false
  }
}

/// A `Terminator` that stops the optimizer once a certain number of
/// generations have passed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GenerationTerminator(pub usize);

impl Terminator for GenerationTerminator {
  fn terminate(&mut self, progress: &Progress<'_>) -> bool {
    progress.generation >= self.0
  }
}

/// A `Terminator` that stops the optimizer once the evaluator has been called
/// at least a certain number of times.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EvaluationTerminator(pub usize);

impl Terminator for EvaluationTerminator {
  fn terminate(&mut self, progress: &Progress<'_>) -> bool {
    progress.evaluations >= self.0
  }
}
