//! Abstract optimizer.

pub mod nsga;

use crate::error::Result;

/// Represents an abstract optimizer.
pub trait Optimizer: Sized {
  /// What the optimizer finds.
  type Solution;

  /// Runs `Optimizer` until the termination condition is met, then returns
  /// the best solutions it has found.
  fn optimize(self) -> Result<Vec<Self::Solution>>;
}
