//! Conversions of operators into their parallelized versions.

use std::marker::PhantomData;

/// A wrapper around an operator that marks it to be executed in parallel for
/// **each** individual by an executor.
pub struct ParEachOperator<OperatorTag, O> {
  operator: O,
  _operator_tag: PhantomData<OperatorTag>,
}

impl<OperatorTag, O> ParEachOperator<OperatorTag, O> {
  pub(crate) fn operator(&self) -> &O {
    &self.operator
  }
}

/// A wrapper around an operator that marks it to be executed in parallel for
/// each **batch** of individuals by an executor.
pub struct ParBatchOperator<OperatorTag, O> {
  operator: O,
  _operator_tag: PhantomData<OperatorTag>,
}

impl<OperatorTag, O> ParBatchOperator<OperatorTag, O> {
  pub(crate) fn operator(&self) -> &O {
    &self.operator
  }
}

/// Allows conversion of an operator into a parallelized operator, applied to
/// each individual in parallel.
pub trait ParEach<OperatorTag> {
  /// Creates a wrapper around given operator that marks it to be executed in
  /// parallel for **each** individual.
  ///
  /// **Parallelization is implemented with [rayon]. For cheap operators,
  /// parallelization may only decrease performance because of additional
  /// overhead introduced. Benchmark if in doubt.**
  ///
  /// [rayon]: https://docs.rs/rayon
  fn par_each(self) -> ParEachOperator<OperatorTag, Self>
  where
    Self: Sized,
  {
    ParEachOperator {
      operator: self,
      _operator_tag: PhantomData,
    }
  }
}

/// Allows conversion of an operator into a parallelized operator, applied to
/// batches of individuals in parallel.
pub trait ParBatch<OperatorTag> {
  /// Creates a wrapper around given operator that marks it to be executed in
  /// parallel for each **batch** of individuals. The batch size is chosen so
  /// that the work is split evenly across all available threads.
  ///
  /// **Parallelization is implemented with [rayon]. For cheap operators,
  /// parallelization may only decrease performance because of additional
  /// overhead introduced. Benchmark if in doubt.**
  ///
  /// [rayon]: https://docs.rs/rayon
  fn par_batch(self) -> ParBatchOperator<OperatorTag, Self>
  where
    Self: Sized,
  {
    ParBatchOperator {
      operator: self,
      _operator_tag: PhantomData,
    }
  }
}

/// Operator tags used to tell parallelized operators apart.
pub mod tag {
  /// Marks evaluation operators.
  pub enum EvaluationOperatorTag {}
}
