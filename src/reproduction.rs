//! Reproduction operators and the breeding handle passed to them.

use rand::{rngs::StdRng, seq::SliceRandom, Rng};

use crate::{
  cache::FitnessCache,
  config::Config,
  error::Result,
  individual::{Individual, Population},
  mutation::{GaussianMutation, Mutation},
  score::Fitness,
  selection::nsga2_select,
};

/// What a [`Reproduction`] gets to work with: the evaluated population of the
/// current generation, the settings of the run and a survivor selection hook.
#[derive(Clone, Copy, Debug)]
pub struct Breeding<'a> {
  config: &'a Config,
  population: &'a [Individual],
  cache: &'a FitnessCache,
  generation: usize,
}

impl<'a> Breeding<'a> {
  pub(crate) fn new(
    config: &'a Config,
    population: &'a [Individual],
    cache: &'a FitnessCache,
    generation: usize,
  ) -> Self {
    Self {
      config,
      population,
      cache,
      generation,
    }
  }

  /// Settings of the run.
  pub fn config(&self) -> &'a Config {
    self.config
  }

  /// The current population. Every member has a known fitness.
  pub fn population(&self) -> &'a [Individual] {
    self.population
  }

  /// Number of completed generations.
  pub fn generation(&self) -> usize {
    self.generation
  }

  /// Returns the fitness of an evaluated individual.
  pub fn fitness(&self, individual: &Individual) -> Option<Fitness> {
    self.cache.get(individual).cloned()
  }

  /// Selects [`Config::survivors`] individuals of the population with
  /// [`nsga2_select`].
  pub fn select(&self) -> Result<Vec<&'a Individual>> {
    self.select_n(self.config.survivors)
  }

  /// Selects `survivors` individuals of the population with [`nsga2_select`].
  pub fn select_n(&self, survivors: usize) -> Result<Vec<&'a Individual>> {
    nsga2_select(self.population, self.cache, survivors)
  }
}

/// An operator that produces the population of the next generation.
///
/// # Examples
/// ```
/// # use paretoga::{error::Result, individual::Individual, reproduction::Breeding};
/// // clone the selected individuals twice
/// fn twice(b: &Breeding<'_>) -> Result<Vec<Individual>> {
///   let selected = b.select()?;
///   Ok(selected.iter().chain(&selected).map(|&i| i.clone()).collect())
/// }
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Reproduction {
  /// Returns the next population. An empty population is an error.
  fn reproduce(&mut self, breeding: &Breeding<'_>) -> Result<Population>;
}

impl<F> Reproduction for F
where
  F: FnMut(&Breeding<'_>) -> Result<Population>,
{
  fn reproduce(&mut self, breeding: &Breeding<'_>) -> Result<Population> {
    self(breeding)
  }
}

/// Selects parents with [`Breeding::select`] and breeds them until the
/// population is full again. A child is a one-point crossover of two random
/// parents, mutated afterwards. With [`Config::elitism`] the parents are kept
/// in the next population as well.
#[derive(Clone, Debug)]
pub struct StandardReproduction<M = GaussianMutation> {
  mutation: M,
  rng: Option<StdRng>,
}

impl<M: Mutation> StandardReproduction<M> {
  /// Creates a reproduction that mutates children with `mutation`.
  pub fn new(mutation: M) -> Self {
    Self {
      mutation,
      rng: None,
    }
  }
}

impl StandardReproduction {
  /// Creates a reproduction with [`GaussianMutation`] set up from `config`.
  pub fn gaussian(config: &Config) -> Self {
    Self::new(GaussianMutation::from_config(config))
  }
}

impl<M: Mutation> Reproduction for StandardReproduction<M> {
  fn reproduce(&mut self, breeding: &Breeding<'_>) -> Result<Population> {
    let config = breeding.config();
    let rng = self.rng.get_or_insert_with(|| config.rng(1));
    let parents = breeding.select()?;

    let size = config.population_size;
    let mut offspring: Population = if config.elitism {
      parents.iter().take(size).map(|&p| p.clone()).collect()
    } else {
      Vec::with_capacity(size)
    };
    while offspring.len() < size {
      let (Some(&a), Some(&b)) =
        (parents.choose(&mut *rng), parents.choose(&mut *rng))
      else {
        break;
      };
      let child = one_point_crossover(a, b, &mut *rng)
        .modified(|genes| self.mutation.mutate(genes, &mut *rng));
      offspring.push(child);
    }
    Ok(offspring)
  }
}

/// Takes the genes of `a` up to a random point and the genes of `b` after it.
/// Returns `a` unchanged if it has less than two genes or the parents differ
/// in length.
pub fn one_point_crossover<R: Rng + ?Sized>(
  a: &Individual,
  b: &Individual,
  rng: &mut R,
) -> Individual {
  if a.len() < 2 || a.len() != b.len() {
    return a.clone();
  }
  let point = rng.gen_range(1..a.len());
  Individual::new(
    a.iter()
      .take(point)
      .chain(b.iter().skip(point))
      .copied()
      .collect::<Vec<_>>(),
  )
}

#[cfg(test)]
mod tests {
  use rand::SeedableRng;

  use super::*;

  // a chain `[0] < [1] < ...` where each individual dominates the next ones
  fn ranked(n: usize) -> (Population, FitnessCache) {
    let population: Population =
      (0..n).map(|i| Individual::from([i as f64])).collect();
    let cache = FitnessCache::try_from_pairs(
      population
        .iter()
        .map(|i| (i.clone(), Fitness::from([i[0], i[0]]))),
    )
    .unwrap();
    (population, cache)
  }

  fn config(elitism: bool, mutation_probability: f64) -> Config {
    Config::builder()
      .x0([0.0])
      .population_size(6)
      .survivors(3)
      .elitism(elitism)
      .mutation_probability(mutation_probability)
      .seed(11)
      .build()
  }

  #[test]
  fn test_breeding_select() {
    let (population, cache) = ranked(6);
    let config = config(true, 0.0);
    let breeding = Breeding::new(&config, &population, &cache, 4);
    assert_eq!(breeding.generation(), 4);
    assert_eq!(
      breeding.select().unwrap(),
      vec![&population[0], &population[1], &population[2]]
    );
    assert_eq!(breeding.select_n(1).unwrap(), vec![&population[0]]);
    assert_eq!(
      breeding.fitness(&population[5]),
      Some(Fitness::from([5.0, 5.0]))
    );
    assert_eq!(breeding.fitness(&Individual::from([9.0])), None);
  }

  #[test]
  fn test_elitist_reproduction_keeps_parents() {
    let (population, cache) = ranked(6);
    let config = config(true, 0.0);
    let breeding = Breeding::new(&config, &population, &cache, 0);
    let offspring = StandardReproduction::gaussian(&config)
      .reproduce(&breeding)
      .unwrap();
    assert_eq!(offspring.len(), 6);
    assert_eq!(offspring[..3], population[..3]);
    // single genes can't be crossed over and nothing is mutated
    assert!(offspring[3..].iter().all(|c| population[..3].contains(c)));
  }

  #[test]
  fn test_non_elitist_reproduction_only_children() {
    let (population, cache) = ranked(6);
    let config = config(false, 1.0);
    let breeding = Breeding::new(&config, &population, &cache, 0);
    let offspring = StandardReproduction::gaussian(&config)
      .reproduce(&breeding)
      .unwrap();
    assert_eq!(offspring.len(), 6);
    assert!(offspring.iter().all(|c| !population.contains(c)));
  }

  #[test]
  fn test_seeded_reproduction_is_reproducible() {
    let (population, cache) = ranked(6);
    let config = config(false, 0.5);
    let breeding = Breeding::new(&config, &population, &cache, 0);
    assert_eq!(
      StandardReproduction::gaussian(&config)
        .reproduce(&breeding)
        .unwrap(),
      StandardReproduction::gaussian(&config)
        .reproduce(&breeding)
        .unwrap()
    );
  }

  #[test]
  fn test_no_parents_no_offspring() {
    let (population, cache) = ranked(3);
    let config = Config::builder().x0([0.0]).population_size(3).survivors(0).build();
    let breeding = Breeding::new(&config, &population, &cache, 0);
    assert!(StandardReproduction::gaussian(&config)
      .reproduce(&breeding)
      .unwrap()
      .is_empty());
  }

  #[test]
  fn test_one_point_crossover() {
    let mut rng = StdRng::seed_from_u64(5);
    let a = Individual::from([0.0; 4]);
    let b = Individual::from([1.0; 4]);
    for _ in 0..20 {
      let child = one_point_crossover(&a, &b, &mut rng);
      let point = child.iter().take_while(|&&g| g == 0.0).count();
      assert!((1..4).contains(&point), "{child:?}");
      assert!(child[point..].iter().all(|&g| g == 1.0));
    }
    let single = Individual::from([3.0]);
    assert_eq!(one_point_crossover(&single, &b, &mut rng), single);
  }

  #[test]
  fn test_reproduction_from_fn() {
    fn best_twice(b: &Breeding<'_>) -> Result<Population> {
      let best = b.select_n(1)?;
      Ok(vec![best[0].clone(); 2])
    }
    let (population, cache) = ranked(3);
    let config = config(true, 0.0);
    let breeding = Breeding::new(&config, &population, &cache, 0);
    let mut reproduction = best_twice;
    assert_eq!(
      reproduction.reproduce(&breeding).unwrap(),
      vec![population[0].clone(); 2]
    );
  }
}
