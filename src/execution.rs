/// Execution strategy markers used by executors to choose how an operator is
/// applied.
pub(crate) mod strategy {
  /// Operator is applied to each individual in sequence.
  pub enum SequentialExecutionStrategy {}

  /// Operator is applied to each individual in parallel.
  pub enum ParallelEachExecutionStrategy {}

  /// Operator is applied to batches of individuals in parallel, one batch per
  /// available thread.
  pub enum ParallelBatchExecutionStrategy {}
}
