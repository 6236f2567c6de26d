//! Memoized fitness evaluations.

use std::collections::{HashMap, HashSet};

use log::trace;

use crate::{
  error::{Error, Result},
  evaluation::executor::EvaluationExecutor,
  individual::Individual,
  score::Fitness,
};

/// Maps each evaluated individual to its fitness.
///
/// The cache only grows: an individual's fitness is assumed to be
/// deterministic, so once stored it is never replaced. All stored fitness
/// vectors share one dimensionality, fixed by the first insertion.
#[derive(Clone, Debug, Default)]
pub struct FitnessCache {
  entries: HashMap<Individual, Fitness>,
  dim: Option<usize>,
}

impl FitnessCache {
  /// Creates an empty cache.
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the number of cached individuals.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` if nothing has been cached yet.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Returns the number of objectives of cached fitness vectors, if known.
  pub fn dim(&self) -> Option<usize> {
    self.dim
  }

  /// Returns `true` if `individual` has a cached fitness.
  pub fn contains(&self, individual: &Individual) -> bool {
    self.entries.contains_key(individual)
  }

  /// Returns the cached fitness of `individual`.
  pub fn get(&self, individual: &Individual) -> Option<&Fitness> {
    self.entries.get(individual)
  }

  /// Stores `fitness` for `individual` unless it is already cached.
  ///
  /// # Errors
  ///
  /// Returns [`Error::DimensionMismatch`] if `fitness` has a different number
  /// of objectives than the fitness vectors cached before, and
  /// [`Error::ZeroObjectives`] if it has none.
  pub fn insert(&mut self, individual: Individual, fitness: Fitness) -> Result<()> {
    self.dim = Some(check_dim(self.dim, &fitness)?);
    self.entries.entry(individual).or_insert(fitness);
    Ok(())
  }

  /// Builds a cache from individual and fitness pairs.
  ///
  /// # Errors
  ///
  /// Fails like [`insert`](Self::insert) on the first pair whose fitness
  /// doesn't fit the ones before it.
  pub fn try_from_pairs<T>(pairs: T) -> Result<Self>
  where
    T: IntoIterator<Item = (Individual, Fitness)>,
  {
    let mut cache = Self::new();
    for (individual, fitness) in pairs {
      cache.insert(individual, fitness)?;
    }
    Ok(cache)
  }

  /// Evaluates each individual of `population` that isn't cached yet, once
  /// per unique individual, and stores the results. Returns the number of
  /// evaluations performed.
  ///
  /// All evaluations are finished and checked before anything is written into
  /// the cache, so the cache is left untouched on failure.
  ///
  /// # Errors
  ///
  /// Returns [`Error::Evaluation`] if the evaluator fails, and the errors of
  /// [`insert`](Self::insert) if it returns inconsistent fitness vectors.
  pub fn evaluate<ES, E>(
    &mut self,
    population: &[Individual],
    evaluator: &E,
  ) -> Result<usize>
  where
    E: EvaluationExecutor<ES>,
  {
    let mut seen = HashSet::new();
    let missing: Vec<Individual> = population
      .iter()
      .filter(|i| !self.contains(i) && seen.insert(*i))
      .cloned()
      .collect();
    if missing.is_empty() {
      return Ok(0);
    }

    trace!("evaluating {} uncached individuals", missing.len());
    let fitnesses = evaluator
      .execute_evaluations(&missing)
      .map_err(Error::Evaluation)?;
    let mut dim = self.dim;
    for fitness in &fitnesses {
      dim = Some(check_dim(dim, fitness)?);
    }

    let evaluated = missing.len();
    self.dim = dim;
    for (individual, fitness) in missing.into_iter().zip(fitnesses) {
      self.entries.insert(individual, fitness);
    }
    Ok(evaluated)
  }
}

// dimensionality of `fitness` if it fits the `expected` one
fn check_dim(expected: Option<usize>, fitness: &Fitness) -> Result<usize> {
  match expected {
    _ if fitness.dim() == 0 => Err(Error::ZeroObjectives),
    Some(expected) if expected != fitness.dim() => Err(Error::DimensionMismatch {
      expected,
      found: fitness.dim(),
    }),
    _ => Ok(fitness.dim()),
  }
}
