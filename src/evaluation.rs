//! Fitness evaluation operators and utilities.

use rayon::prelude::*;

use crate::{
  execution::strategy::*,
  individual::{Gene, Individual},
  operator::{
    tag::EvaluationOperatorTag,
    ParBatch,
    ParBatchOperator,
    ParEach,
    ParEachOperator,
  },
  score::Fitness,
};

/// An operator that scores an individual's genes, producing one score per
/// objective. Lower scores are better.
///
/// The evaluator is expected to be deterministic: an individual is evaluated
/// at most once and its fitness is cached for the rest of a run. It must
/// return vectors of the same length for every individual. Failures are
/// reported as [`anyhow::Error`] and stop the generation being computed.
///
/// Can be applied in parallel to each individual or to batches of individuals
/// by converting it into a parallelized operator with `par_each()` or
/// `par_batch()` methods.
///
/// # Examples
/// ```
/// # use paretoga::{operator::*, score::Fitness};
/// // Schaffer's problem No.1
/// let e = |g: &[f64]| -> anyhow::Result<Fitness> {
///   Ok(Fitness::from([g[0].powi(2), (g[0] - 2.0).powi(2)]))
/// };
/// let e = e.par_batch();
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Evaluation {
  /// Returns the fitness of given genes.
  fn evaluate(&self, genes: &[Gene]) -> anyhow::Result<Fitness>;
}

impl<F> Evaluation for F
where
  F: Fn(&[Gene]) -> anyhow::Result<Fitness>,
{
  fn evaluate(&self, genes: &[Gene]) -> anyhow::Result<Fitness> {
    self(genes)
  }
}

impl<E> ParEach<EvaluationOperatorTag> for E where E: Evaluation + Sync {}

impl<E> ParBatch<EvaluationOperatorTag> for E where E: Evaluation + Sync {}

/// This private module prevents exposing the `Executor` to a user.
pub(crate) mod executor {
  use crate::{individual::Individual, score::Fitness};

  /// An internal evaluation executor.
  pub trait EvaluationExecutor<ExecutionStrategy> {
    /// Evaluates each individual, optionally parallelizing operator's
    /// application. Results are in the order of `individuals`.
    fn execute_evaluations(
      &self,
      individuals: &[Individual],
    ) -> anyhow::Result<Vec<Fitness>>;
  }
}

use executor::EvaluationExecutor;

impl<E> EvaluationExecutor<SequentialExecutionStrategy> for E
where
  E: Evaluation,
{
  fn execute_evaluations(
    &self,
    individuals: &[Individual],
  ) -> anyhow::Result<Vec<Fitness>> {
    individuals.iter().map(|i| self.evaluate(i)).collect()
  }
}

impl<E> EvaluationExecutor<ParallelEachExecutionStrategy>
  for ParEachOperator<EvaluationOperatorTag, E>
where
  E: Evaluation + Sync,
{
  fn execute_evaluations(
    &self,
    individuals: &[Individual],
  ) -> anyhow::Result<Vec<Fitness>> {
    individuals
      .par_iter()
      .map(|i| self.operator().evaluate(i))
      .collect()
  }
}

impl<E> EvaluationExecutor<ParallelBatchExecutionStrategy>
  for ParBatchOperator<EvaluationOperatorTag, E>
where
  E: Evaluation + Sync,
{
  fn execute_evaluations(
    &self,
    individuals: &[Individual],
  ) -> anyhow::Result<Vec<Fitness>> {
    let chunk_size = (individuals.len() / rayon::current_num_threads()).max(1);
    individuals
      .par_chunks(chunk_size)
      .flat_map_iter(|chunk| chunk.iter().map(|i| self.operator().evaluate(i)))
      .collect()
  }
}
