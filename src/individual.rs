//! Hashable candidate solutions.
//!
//! Everything that crosses the boundary between a raw numeric buffer and the
//! rest of the crate goes through [`Individual`]: operators work on `&[Gene]`
//! and `Vec<Gene>`, while sorting, caching and selection only ever see the
//! hashable form.

use std::{
  fmt,
  hash::{Hash, Hasher},
  ops::Deref,
  sync::Arc,
};

/// An alias for a single gene value.
pub type Gene = f64;

/// An alias for a collection of individuals. May hold duplicates; selection
/// treats it as a set.
pub type Population = Vec<Individual>;

/// An immutable, fixed-length sequence of genes that can be used as a map key.
///
/// Equality and hashing are by value. Negative zero is stored as positive zero
/// and every NaN as the canonical NaN, so two individuals that would print the
/// same genes are the same key. Cloning is cheap: genes are reference counted.
#[derive(Clone)]
pub struct Individual(Arc<[Gene]>);

impl Individual {
  /// Creates an individual from given genes.
  pub fn new(genes: impl Into<Vec<Gene>>) -> Self {
    let mut genes = genes.into();
    genes.iter_mut().for_each(|g| *g = canonical(*g));
    Self(genes.into())
  }

  /// Returns the genes of this individual.
  pub fn genes(&self) -> &[Gene] {
    &self.0
  }

  /// Copies the genes into a mutable buffer.
  pub fn to_vec(&self) -> Vec<Gene> {
    self.0.to_vec()
  }

  /// Copies the genes into a buffer, lets `f` modify it and converts the
  /// result back into an individual.
  pub fn modified(&self, f: impl FnOnce(&mut [Gene])) -> Self {
    let mut genes = self.to_vec();
    f(&mut genes);
    Self::new(genes)
  }
}

fn canonical(gene: Gene) -> Gene {
  if gene == 0.0 {
    0.0
  } else if gene.is_nan() {
    Gene::NAN
  } else {
    gene
  }
}

impl Deref for Individual {
  type Target = [Gene];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl PartialEq for Individual {
  fn eq(&self, other: &Self) -> bool {
    self.0.len() == other.0.len()
      && self
        .0
        .iter()
        .zip(other.0.iter())
        .all(|(a, b)| a.to_bits() == b.to_bits())
  }
}

impl Eq for Individual {}

impl Hash for Individual {
  fn hash<H: Hasher>(&self, state: &mut H) {
    state.write_usize(self.0.len());
    self.0.iter().for_each(|g| state.write_u64(g.to_bits()));
  }
}

impl fmt::Debug for Individual {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Individual").field(&&*self.0).finish()
  }
}

impl From<Vec<Gene>> for Individual {
  fn from(genes: Vec<Gene>) -> Self {
    Self::new(genes)
  }
}

impl From<&[Gene]> for Individual {
  fn from(genes: &[Gene]) -> Self {
    Self::new(genes)
  }
}

impl<const N: usize> From<[Gene; N]> for Individual {
  fn from(genes: [Gene; N]) -> Self {
    Self::new(genes)
  }
}

impl From<Individual> for Vec<Gene> {
  fn from(individual: Individual) -> Self {
    individual.to_vec()
  }
}
