//! Initial population operators.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::{
  config::Config,
  individual::Population,
};

/// An operator that creates the initial population.
///
/// The optimizer always seeds the population with [`Config::x0`]; the
/// initializer is asked for the remaining `population_size - 1` individuals.
/// Extra individuals are dropped, missing ones are not replaced.
///
/// # Examples
/// ```
/// # use paretoga::{config::Config, individual::Individual};
/// // a line of individuals next to the starting point
/// let i = |c: &Config| -> Vec<Individual> {
///   (1..c.population_size).map(|k| c.x0.modified(|g| g[0] += k as f64)).collect()
/// };
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Initialization {
  /// Returns individuals to fill the initial population with.
  fn initialize(&mut self, config: &Config) -> Population;
}

impl<F> Initialization for F
where
  F: FnMut(&Config) -> Population,
{
  fn initialize(&mut self, config: &Config) -> Population {
    self(config)
  }
}

/// Scatters the initial population around the starting point, adding
/// Gaussian noise with [`Config::init_std_dev`] to each gene.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct GaussianInitialization;

impl Initialization for GaussianInitialization {
  fn initialize(&mut self, config: &Config) -> Population {
    let mut rng = config.rng(0);
    (1..config.population_size)
      .map(|_| {
        config.x0.modified(|genes| {
          genes.iter_mut().for_each(|g| {
            *g += config.init_std_dev * rng.sample::<f64, _>(StandardNormal)
          })
        })
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_gaussian_initialization() {
    let config = Config::builder()
      .x0([1.0, 2.0, 3.0])
      .population_size(20)
      .seed(7)
      .build();
    let population = GaussianInitialization.initialize(&config);
    assert_eq!(population.len(), 19);
    assert!(population.iter().all(|i| i.len() == 3));
    assert!(population.iter().any(|i| *i != config.x0));
    // seeded runs are reproducible
    assert_eq!(population, GaussianInitialization.initialize(&config));
  }

  #[test]
  fn test_zero_spread_copies_starting_point() {
    let config = Config::builder()
      .x0([1.0, -1.0])
      .population_size(4)
      .init_std_dev(0.0)
      .build();
    let population = GaussianInitialization.initialize(&config);
    assert_eq!(population, vec![config.x0.clone(); 3]);
  }

  #[test]
  fn test_initialization_from_closure() {
    let mut calls = 0;
    let mut initialization = |c: &Config| -> Population {
      calls += 1;
      vec![c.x0.clone()]
    };
    let config = Config::builder().x0([0.0]).build();
    assert_eq!(initialization.initialize(&config).len(), 1);
    assert_eq!(calls, 1);
  }
}
