//! The NSGA-II generational driver.

use std::{marker::PhantomData, slice};

use log::{debug, info};
use typed_builder::TypedBuilder;

use crate::{
  cache::FitnessCache,
  config::Config,
  error::{Error, Result},
  evaluation::executor::EvaluationExecutor,
  individual::{Individual, Population},
  initialization::Initialization,
  optimizer::Optimizer,
  pareto::non_dominated_front,
  reproduction::{Breeding, Reproduction},
  score::Fitness,
  termination::{Progress, Terminator},
};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
enum Phase {
  #[default]
  Initializing,
  Generating,
}

/// A generational multi-objective optimizer around NSGA-II selection.
///
/// Each generation evaluates the individuals of the population that aren't
/// cached yet, recomputes the best-known front and asks the reproducer for the
/// next population. The population of the first generation is
/// [`Config::x0`] followed by the output of the initializer.
///
/// The best-known front is the non-dominated front of the current population
/// when [`Config::elitism`] is on. When it's off, the previous best front is
/// merged into the current population first.
///
/// Generations can be driven one by one with
/// [`one_generation()`](Self::one_generation), or all at once with
/// [`optimize()`](Optimizer::optimize), which stops when the terminator says
/// so. Use [`NeverTerminator`] when stepping by hand.
///
/// # Examples
/// ```no_run
/// # use paretoga::{
/// #   config::Config,
/// #   initialization::GaussianInitialization,
/// #   optimizer::{nsga::Nsga2, Optimizer},
/// #   reproduction::StandardReproduction,
/// #   score::Fitness,
/// #   termination::GenerationTerminator,
/// # };
/// let config = Config::builder().x0([10.0]).seed(42).build();
/// let nsga2 = Nsga2::builder()
///   .reproducer(StandardReproduction::gaussian(&config))
///   .config(config)
///   .initializer(GaussianInitialization)
///   .evaluator(|g: &[f64]| -> anyhow::Result<Fitness> {
///     Ok(Fitness::from([g[0].powi(2), (g[0] - 2.0).powi(2)]))
///   })
///   .terminator(GenerationTerminator(50))
///   .build();
/// for (individual, fitness) in nsga2.optimize().unwrap() {
///   println!("{individual:?}: {fitness:?}");
/// }
/// ```
///
/// [`NeverTerminator`]: crate::termination::NeverTerminator
#[derive(TypedBuilder, Debug)]
pub struct Nsga2<
  Init: Initialization,
  Eval: EvaluationExecutor<EvalExecStrat>,
  Rep: Reproduction,
  Ter: Terminator,
  EvalExecStrat,
> {
  config: Config,
  initializer: Init,
  evaluator: Eval,
  reproducer: Rep,
  terminator: Ter,
  #[builder(setter(skip), default)]
  phase: Phase,
  #[builder(setter(skip), default)]
  population: Population,
  #[builder(setter(skip), default)]
  history: Vec<Population>,
  #[builder(setter(skip), default)]
  best_evaluable: Population,
  #[builder(setter(skip), default)]
  best_evaluation: Vec<Fitness>,
  #[builder(setter(skip), default)]
  cache: FitnessCache,
  #[builder(setter(skip), default)]
  generation: usize,
  #[builder(setter(skip), default)]
  evaluations: usize,
  #[builder(setter(skip), default)]
  _eval_es: PhantomData<EvalExecStrat>,
}

impl<Init, Eval, Rep, Ter, EvalExecStrat> Nsga2<Init, Eval, Rep, Ter, EvalExecStrat>
where
  Init: Initialization,
  Eval: EvaluationExecutor<EvalExecStrat>,
  Rep: Reproduction,
  Ter: Terminator,
{
  fn initial_population(&mut self) -> Result<Population> {
    self.config.validate()?;
    let size = self.config.population_size;
    let mut population = Vec::with_capacity(size);
    population.push(self.config.x0.clone());
    population.extend(
      self
        .initializer
        .initialize(&self.config)
        .into_iter()
        .take(size - 1),
    );
    if population.len() < size {
      debug!(
        "initializer filled {} of {size} individuals",
        population.len()
      );
    }
    info!(
      "initialized population of {} individuals with {} genes",
      population.len(),
      self.config.x0.len()
    );
    Ok(population)
  }

  /// Runs a single generation, initializing the optimizer first if needed.
  ///
  /// Nothing observable changes if the generation fails, except that
  /// individuals evaluated before the failure stay cached and counted.
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidConfig`] if the configuration is invalid,
  /// [`Error::Evaluation`] if the evaluator fails, [`Error::EmptyOffspring`]
  /// if the reproducer produces nothing, and the errors of the reproducer
  /// itself.
  pub fn one_generation(&mut self) -> Result<()> {
    let initial = match self.phase {
      Phase::Initializing => Some(self.initial_population()?),
      Phase::Generating => None,
    };
    let population = initial.as_deref().unwrap_or(self.population.as_slice());
    let previous_best = match self.phase {
      Phase::Initializing => slice::from_ref(&self.config.x0),
      Phase::Generating => self.best_evaluable.as_slice(),
    };

    let evaluated = self
      .cache
      .evaluate::<EvalExecStrat, _>(population, &self.evaluator)?;
    self.evaluations += evaluated;

    let best_evaluable: Population = if self.config.elitism {
      non_dominated_front(population, &self.cache)?
        .into_iter()
        .cloned()
        .collect()
    } else {
      non_dominated_front(population.iter().chain(previous_best), &self.cache)?
        .into_iter()
        .cloned()
        .collect()
    };
    let best_evaluation = best_evaluable
      .iter()
      .map(|i| {
        self
          .cache
          .get(i)
          .cloned()
          .ok_or_else(|| Error::MissingFitness(i.clone()))
      })
      .collect::<Result<Vec<_>>>()?;

    let breeding =
      Breeding::new(&self.config, population, &self.cache, self.generation);
    let offspring = self.reproducer.reproduce(&breeding)?;
    if offspring.is_empty() {
      return Err(Error::EmptyOffspring);
    }

    debug!(
      "generation {}: {evaluated} evaluated, best front of {}, {} offspring",
      self.generation,
      best_evaluable.len(),
      offspring.len()
    );
    let evaluated_population = match initial {
      Some(initial) => {
        self.population = offspring;
        initial
      }
      None => std::mem::replace(&mut self.population, offspring),
    };
    self.history.push(evaluated_population);
    self.best_evaluable = best_evaluable;
    self.best_evaluation = best_evaluation;
    self.phase = Phase::Generating;
    self.generation += 1;
    Ok(())
  }

  /// Returns the population the next generation will evaluate. Empty before
  /// the first generation.
  pub fn population(&self) -> &[Individual] {
    &self.population
  }

  /// Returns the populations of completed generations, oldest first.
  pub fn history(&self) -> &[Population] {
    &self.history
  }

  /// Returns the best-known front. Before the first generation it consists of
  /// the starting point alone.
  pub fn best_evaluable(&self) -> &[Individual] {
    match self.phase {
      Phase::Initializing => slice::from_ref(&self.config.x0),
      Phase::Generating => &self.best_evaluable,
    }
  }

  /// Returns fitness vectors of [`best_evaluable()`](Self::best_evaluable),
  /// in the same order. Empty before the first generation.
  pub fn best_evaluation(&self) -> &[Fitness] {
    &self.best_evaluation
  }

  /// Returns the number of evaluator calls so far.
  pub fn evaluations(&self) -> usize {
    self.evaluations
  }

  /// Returns the number of completed generations.
  pub fn generation(&self) -> usize {
    self.generation
  }

  /// Returns every fitness evaluated so far.
  pub fn fitness_cache(&self) -> &FitnessCache {
    &self.cache
  }

  /// Returns the settings of the run.
  pub fn config(&self) -> &Config {
    &self.config
  }
}

impl<Init, Eval, Rep, Ter, EvalExecStrat> Optimizer
  for Nsga2<Init, Eval, Rep, Ter, EvalExecStrat>
where
  Init: Initialization,
  Eval: EvaluationExecutor<EvalExecStrat>,
  Rep: Reproduction,
  Ter: Terminator,
{
  type Solution = (Individual, Fitness);

  /// Runs generations until the terminator fires and returns the best-known
  /// front with its fitness vectors. The result is empty if the terminator
  /// fires before the first generation.
  fn optimize(mut self) -> Result<Vec<Self::Solution>> {
    loop {
      let progress = Progress {
        generation: self.generation,
        evaluations: self.evaluations,
        best_evaluation: &self.best_evaluation,
      };
      if self.terminator.terminate(&progress) {
        break;
      }
      self.one_generation()?;
    }
    info!(
      "stopped after {} generations and {} evaluations",
      self.generation, self.evaluations
    );

    Ok(
      self
        .best_evaluable
        .into_iter()
        .zip(self.best_evaluation)
        .collect(),
    )
  }
}
