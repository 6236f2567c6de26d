//! Objective vectors and the ways to look them up.

use std::{
  cmp::Ordering,
  collections::HashMap,
  hash::BuildHasher,
  ops::Deref,
  sync::Arc,
};

use crate::{cache::FitnessCache, individual::Individual};

/// An alias for a score of a single objective. Lower is better.
pub type Score = f64;

/// An immutable objective vector, one [`Score`] per objective, each of them
/// minimized. Cloning is cheap.
#[derive(Clone, PartialEq, Debug)]
pub struct Fitness(Arc<[Score]>);

impl Fitness {
  /// Returns the number of objectives.
  pub fn dim(&self) -> usize {
    self.0.len()
  }

  /// Returns the scores.
  pub fn scores(&self) -> &[Score] {
    &self.0
  }
}

impl Deref for Fitness {
  type Target = [Score];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl From<Vec<Score>> for Fitness {
  fn from(scores: Vec<Score>) -> Self {
    Self(scores.into())
  }
}

impl From<&[Score]> for Fitness {
  fn from(scores: &[Score]) -> Self {
    Self(scores.into())
  }
}

impl<const N: usize> From<[Score; N]> for Fitness {
  fn from(scores: [Score; N]) -> Self {
    Self(Arc::new(scores))
  }
}

/// Something that maps an [`Individual`] to its [`Fitness`].
///
/// Implemented for [`FitnessCache`], for `HashMap<Individual, Fitness>` and for
/// closures of type `Fn(&Individual) -> Option<Fitness>`, the latter being the
/// way to compute fitness on demand.
///
/// # Examples
/// ```
/// # use paretoga::{individual::Individual, score::{Fitness, FitnessLookup}};
/// let on_demand = |i: &Individual| Some(Fitness::from(vec![i[0], -i[0]]));
/// assert_eq!(
///   on_demand.fitness(&Individual::from([2.0])),
///   Some(Fitness::from([2.0, -2.0]))
/// );
/// ```
pub trait FitnessLookup {
  /// Returns the fitness of `individual`, or `None` if it is unknown.
  fn fitness(&self, individual: &Individual) -> Option<Fitness>;
}

impl<S: BuildHasher> FitnessLookup for HashMap<Individual, Fitness, S> {
  fn fitness(&self, individual: &Individual) -> Option<Fitness> {
    self.get(individual).cloned()
  }
}

impl FitnessLookup for FitnessCache {
  fn fitness(&self, individual: &Individual) -> Option<Fitness> {
    self.get(individual).cloned()
  }
}

impl<F> FitnessLookup for F
where
  F: Fn(&Individual) -> Option<Fitness>,
{
  fn fitness(&self, individual: &Individual) -> Option<Fitness> {
    self(individual)
  }
}

/// Describes pareto dominance for slices of `Score`s.
///
/// Dominance is strict on every objective: `a` dominates `b` only if each
/// score of `a` is strictly lower than the respective score of `b`. A tie on
/// any objective means neither dominates. Both slices are expected to be of
/// the same, non-zero length.
pub trait ParetoDominance {
  /// Returns `Less` if `self` dominates `other`, `Greater` if `other`
  /// dominates `self`, otherwise `Equal`.
  fn dominance(&self, other: &Self) -> Ordering;

  /// Returns `true` if `self` dominates `other`.
  fn dominates(&self, other: &Self) -> bool {
    self.dominance(other) == Ordering::Less
  }
}

impl ParetoDominance for [Score] {
  fn dominance(&self, other: &Self) -> Ordering {
    debug_assert_eq!(self.len(), other.len(), "dimensions must match");
    if self.is_empty() {
      return Ordering::Equal;
    }
    if self.iter().zip(other).all(|(a, b)| a < b) {
      Ordering::Less
    } else if self.iter().zip(other).all(|(a, b)| a > b) {
      Ordering::Greater
    } else {
      Ordering::Equal
    }
  }
}

#[cfg(test)]
mod tests {
  use std::cmp::Ordering;

  use super::*;

  #[test]
  fn test_pareto_dominance() {
    assert_eq!([1.0, 2.0, 3.0].dominance(&[1.0, 2.0, 3.0]), Ordering::Equal);
    assert_eq!([1.0, 2.0, 3.0].dominance(&[3.0, 2.0, 1.0]), Ordering::Equal);
    assert_eq!([1.0, 1.0].dominance(&[2.0, 2.0]), Ordering::Less);
    assert_eq!([2.0, 2.0].dominance(&[1.0, 1.0]), Ordering::Greater);
    assert_eq!(
      [-3.0, -2.0, -1.0].dominance(&[1.0, 2.0, 3.0]),
      Ordering::Less
    );

    // better on one, tied on another: not dominating
    assert_eq!([1.0, 2.0].dominance(&[2.0, 2.0]), Ordering::Equal);
    assert_eq!([2.0, 2.0].dominance(&[1.0, 2.0]), Ordering::Equal);

    assert_eq!([f64::NAN, 1.0].dominance(&[2.0, 2.0]), Ordering::Equal);
    assert_eq!([1.0; 0].dominance(&[0.0; 0]), Ordering::Equal);
  }

  #[test]
  fn test_fitness_conversions() {
    let f = Fitness::from([1.0, 2.0]);
    assert_eq!(f.dim(), 2);
    assert_eq!(f, Fitness::from(vec![1.0, 2.0]));
    assert_eq!(f.scores(), &[1.0, 2.0][..]);
  }

  #[test]
  fn test_lookup_from_map() {
    let mut map = HashMap::new();
    map.insert(Individual::from([0.0]), Fitness::from([1.0]));
    assert_eq!(
      map.fitness(&Individual::from([0.0])),
      Some(Fitness::from([1.0]))
    );
    assert_eq!(map.fitness(&Individual::from([1.0])), None);
  }
}
