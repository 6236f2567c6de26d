//! Optimizer configuration.

use rand::{rngs::StdRng, SeedableRng};
use typed_builder::TypedBuilder;

use crate::{
  error::{Error, Result},
  individual::Individual,
};

/// Settings of an [`Nsga2`](crate::optimizer::nsga::Nsga2) run.
///
/// Built with a builder that only requires the starting point; every other
/// field has a default:
/// ```
/// # use paretoga::config::Config;
/// let config = Config::builder()
///   .x0(vec![0.0, 0.0])
///   .population_size(50)
///   .elitism(false)
///   .build();
/// assert_eq!(config.survivors, 25);
/// assert!(config.validate().is_ok());
/// ```
#[derive(TypedBuilder, Clone, Debug)]
pub struct Config {
  /// Starting point. It is the first member of the initial population and the
  /// best-known front before the first generation.
  #[builder(setter(into))]
  pub x0: Individual,
  /// Number of individuals reproduction is asked to produce each generation.
  #[builder(default = 100)]
  pub population_size: usize,
  /// Number of individuals NSGA-II selection keeps for breeding. Half of the
  /// population by default.
  #[builder(default = population_size / 2)]
  pub survivors: usize,
  /// With elitism, the best-known front is derived from the current
  /// population alone. Without it, the previous best front is merged with the
  /// current population first, so good individuals lost by reproduction
  /// are still remembered.
  #[builder(default = true)]
  pub elitism: bool,
  /// Standard deviation of the Gaussian noise added by mutation.
  #[builder(default = 1.0)]
  pub mutation_std_dev: f64,
  /// Probability of each gene to be mutated.
  #[builder(default = 0.1)]
  pub mutation_probability: f64,
  /// Standard deviation of the initial population around `x0`.
  #[builder(default = 1.0)]
  pub init_std_dev: f64,
  /// Seed of the random number generators of built-in operators. Taken from
  /// the OS if absent.
  #[builder(default, setter(strip_option))]
  pub seed: Option<u64>,
}

impl Config {
  /// Checks that the settings can be used.
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidConfig`] for an empty population or starting
  /// point, negative or non-finite standard deviations and probabilities
  /// outside of `[0, 1]`.
  pub fn validate(&self) -> Result<()> {
    if self.population_size == 0 {
      return Err(Error::InvalidConfig("population size is zero".into()));
    }
    if self.x0.is_empty() {
      return Err(Error::InvalidConfig("starting point has no genes".into()));
    }
    for (name, std_dev) in [
      ("mutation_std_dev", self.mutation_std_dev),
      ("init_std_dev", self.init_std_dev),
    ] {
      if !(std_dev.is_finite() && std_dev >= 0.0) {
        return Err(Error::InvalidConfig(format!(
          "{name} must be finite and non-negative, got {std_dev}"
        )));
      }
    }
    if !(0.0..=1.0).contains(&self.mutation_probability) {
      return Err(Error::InvalidConfig(format!(
        "mutation_probability must be within [0, 1], got {}",
        self.mutation_probability
      )));
    }
    Ok(())
  }

  /// Creates a random number generator for a built-in operator. Operators
  /// pass distinct `stream`s so that they don't share a sequence.
  pub(crate) fn rng(&self, stream: u64) -> StdRng {
    match self.seed {
      Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
      None => StdRng::from_entropy(),
    }
  }
}
