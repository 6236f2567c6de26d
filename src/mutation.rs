//! Mutation operators.

use rand::{Rng, RngCore};
use rand_distr::StandardNormal;

use crate::{config::Config, individual::Gene};

/// An operator that perturbs the genes of a single individual in place.
///
/// Mutation works on a plain gene buffer; use [`Individual::modified`] to
/// apply it to an individual and get a new one back.
///
/// # Examples
/// ```
/// # use paretoga::{individual::Individual, mutation::Mutation};
/// # use rand::RngCore;
/// // flips the sign of every gene
/// let mut m = |g: &mut [f64], _: &mut dyn RngCore| g.iter_mut().for_each(|x| *x = -*x);
/// let mut rng = rand::thread_rng();
/// let mutated = Individual::from([1.0, -2.0]).modified(|g| m.mutate(g, &mut rng));
/// assert_eq!(mutated, Individual::from([-1.0, 2.0]));
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
///
/// [`Individual::modified`]: crate::individual::Individual::modified
pub trait Mutation {
  /// Mutates given genes.
  fn mutate(&mut self, genes: &mut [Gene], rng: &mut dyn RngCore);
}

impl<F> Mutation for F
where
  F: FnMut(&mut [Gene], &mut dyn RngCore),
{
  fn mutate(&mut self, genes: &mut [Gene], rng: &mut dyn RngCore) {
    self(genes, rng)
  }
}

/// Adds Gaussian noise to each gene with some probability.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GaussianMutation {
  /// Standard deviation of the noise.
  pub std_dev: f64,
  /// Probability of each gene to be mutated.
  pub probability: f64,
}

impl GaussianMutation {
  /// Creates a mutation with given noise and per-gene probability.
  pub fn new(std_dev: f64, probability: f64) -> Self {
    Self {
      std_dev,
      probability,
    }
  }

  /// Creates a mutation from [`Config::mutation_std_dev`] and
  /// [`Config::mutation_probability`].
  pub fn from_config(config: &Config) -> Self {
    Self::new(config.mutation_std_dev, config.mutation_probability)
  }
}

impl Mutation for GaussianMutation {
  fn mutate(&mut self, genes: &mut [Gene], rng: &mut dyn RngCore) {
    for gene in genes {
      if rng.gen::<f64>() < self.probability {
        *gene += self.std_dev * rng.sample::<f64, _>(StandardNormal);
      }
    }
  }
}
