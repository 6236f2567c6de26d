//! Pareto domination, non-dominated fronts and non-dominated sorting.
//!
//! Functions of this module accept any iterable of individual references plus
//! a [`FitnessLookup`]. Duplicate individuals are collapsed: the input is
//! treated as a set, in the order individuals are first seen. Returned fronts
//! keep that order, which makes every result deterministic.

use std::collections::HashSet;

use crate::{
  error::{Error, Result},
  individual::Individual,
  score::{Fitness, FitnessLookup, ParetoDominance},
};

/// A set of mutually non-dominated individuals.
pub type Front<'a> = Vec<&'a Individual>;

/// Returns `true` if `a` dominates `b`, i.e. `a` is strictly better than `b`
/// on every objective.
///
/// # Errors
///
/// Fails if a fitness is unknown or the fitness vectors differ in length.
pub fn dominates<L: FitnessLookup>(
  a: &Individual,
  b: &Individual,
  fitness: &L,
) -> Result<bool> {
  let keyed = Keyed::new([a, b], fitness)?;
  match keyed.fitnesses.as_slice() {
    [fa, fb] => Ok(fa.dominates(fb)),
    // `a` and `b` are the same individual
    _ => Ok(false),
  }
}

/// Returns the individuals that are not dominated by any other individual of
/// `individuals`.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if there are no individuals, and fails if a
/// fitness is unknown or the fitness vectors differ in length. Dimensions are
/// checked before any comparison is made.
///
/// # Examples
/// ```
/// # use std::collections::HashMap;
/// # use paretoga::{individual::Individual, pareto::non_dominated_front, score::Fitness};
/// let a = Individual::from([0.0]);
/// let b = Individual::from([1.0]);
/// let fitness = HashMap::from([
///   (a.clone(), Fitness::from([1.0, 1.0])),
///   (b.clone(), Fitness::from([2.0, 2.0])),
/// ]);
/// assert_eq!(non_dominated_front([&a, &b], &fitness).unwrap(), vec![&a]);
/// ```
pub fn non_dominated_front<'a, I, L>(individuals: I, fitness: &L) -> Result<Front<'a>>
where
  I: IntoIterator<Item = &'a Individual>,
  L: FitnessLookup,
{
  let keyed = Keyed::new(individuals, fitness)?;
  if keyed.is_empty() {
    return Err(Error::EmptyInput);
  }
  let index = DominanceIndex::new(&keyed.fitnesses);
  Ok(keyed.pick(&index.first_front()))
}

/// Splits `individuals` into consecutive non-dominated fronts. The first
/// front is the non-dominated front of all individuals, each next one is the
/// non-dominated front of what remains after removing the previous fronts.
///
/// The fronts are disjoint and together contain every unique individual.
/// Empty input produces no fronts.
///
/// # Errors
///
/// Fails if a fitness is unknown or the fitness vectors differ in length.
pub fn non_dominated_sort<'a, I, L>(
  individuals: I,
  fitness: &L,
) -> Result<Vec<Front<'a>>>
where
  I: IntoIterator<Item = &'a Individual>,
  L: FitnessLookup,
{
  let keyed = Keyed::new(individuals, fitness)?;
  let index = DominanceIndex::new(&keyed.fitnesses);
  Ok(
    index
      .fronts()
      .into_iter()
      .map(|front| keyed.pick(&front))
      .collect(),
  )
}

/// Unique individuals paired with their fitness vectors, all of the same
/// non-zero dimensionality.
pub(crate) struct Keyed<'a> {
  pub(crate) individuals: Vec<&'a Individual>,
  pub(crate) fitnesses: Vec<Fitness>,
}

impl<'a> Keyed<'a> {
  pub(crate) fn new<I, L>(individuals: I, fitness: &L) -> Result<Self>
  where
    I: IntoIterator<Item = &'a Individual>,
    L: FitnessLookup,
  {
    let mut seen = HashSet::new();
    let individuals: Vec<&'a Individual> =
      individuals.into_iter().filter(|i| seen.insert(*i)).collect();
    let fitnesses = individuals
      .iter()
      .map(|&i| fitness.fitness(i).ok_or_else(|| Error::MissingFitness(i.clone())))
      .collect::<Result<Vec<_>>>()?;

    if let Some(first) = fitnesses.first() {
      let expected = first.dim();
      if expected == 0 {
        return Err(Error::ZeroObjectives);
      }
      if let Some(f) = fitnesses.iter().find(|f| f.dim() != expected) {
        return Err(Error::DimensionMismatch {
          expected,
          found: f.dim(),
        });
      }
    }

    Ok(Self {
      individuals,
      fitnesses,
    })
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.individuals.is_empty()
  }

  pub(crate) fn pick(&self, indices: &[SolutionIndex]) -> Front<'a> {
    indices.iter().map(|&idx| self.individuals[idx]).collect()
  }
}

// index of an individual in `Keyed`
pub(crate) type SolutionIndex = usize;
// number of individuals dominating an individual
type DominanceCounter = u32;
// indices of individuals dominated by an individual
type DominanceList = Vec<SolutionIndex>;

/// Pairwise domination relation over a set of fitness vectors.
pub(crate) struct DominanceIndex {
  dominance_lists: Vec<DominanceList>,
  dominance_counters: Vec<DominanceCounter>,
}

impl DominanceIndex {
  pub(crate) fn new(fitnesses: &[Fitness]) -> Self {
    let mut dominance_lists: Vec<DominanceList> =
      vec![Vec::new(); fitnesses.len()];
    let mut dominance_counters: Vec<DominanceCounter> =
      vec![0; fitnesses.len()];

    // for each unique pair of individuals `p` and `q`...
    for (p_idx, p_fit) in fitnesses.iter().enumerate() {
      for (q_idx, q_fit) in fitnesses.iter().enumerate().skip(p_idx + 1) {
        match p_fit.dominance(q_fit) {
          std::cmp::Ordering::Less => {
            dominance_lists[p_idx].push(q_idx);
            dominance_counters[q_idx] += 1;
          }
          std::cmp::Ordering::Greater => {
            dominance_lists[q_idx].push(p_idx);
            dominance_counters[p_idx] += 1;
          }
          std::cmp::Ordering::Equal => {}
        }
      }
    }

    Self {
      dominance_lists,
      dominance_counters,
    }
  }

  /// Indices of individuals no other individual dominates, in input order.
  pub(crate) fn first_front(&self) -> Vec<SolutionIndex> {
    self
      .dominance_counters
      .iter()
      .enumerate()
      .filter_map(|(idx, &cnt)| (cnt == 0).then_some(idx))
      .collect()
  }

  /// Peels fronts one by one. Removing a front releases the individuals it
  /// dominated; those no longer dominated by anyone form the next front.
  pub(crate) fn fronts(&self) -> Vec<Vec<SolutionIndex>> {
    let mut counters = self.dominance_counters.clone();
    let mut fronts = Vec::new();
    let mut last_front = self.first_front();
    while !last_front.is_empty() {
      let mut next_front = Vec::new();
      for &p_idx in &last_front {
        for &q_idx in &self.dominance_lists[p_idx] {
          counters[q_idx] -= 1;
          if counters[q_idx] == 0 {
            next_front.push(q_idx);
          }
        }
      }
      // keep input order within a front
      next_front.sort_unstable();
      fronts.push(std::mem::replace(&mut last_front, next_front));
    }
    fronts
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use proptest::prelude::*;

  use super::*;

  fn population(
    scores: &[&[f64]],
  ) -> (Vec<Individual>, HashMap<Individual, Fitness>) {
    let individuals: Vec<_> = (0..scores.len())
      .map(|i| Individual::from([i as f64]))
      .collect();
    let fitness = individuals
      .iter()
      .cloned()
      .zip(scores.iter().map(|&s| Fitness::from(s)))
      .collect();
    (individuals, fitness)
  }

  #[test]
  fn test_dominates() {
    let (p, f) = population(&[&[1.0, 1.0], &[2.0, 2.0], &[1.0, 3.0]]);
    assert!(dominates(&p[0], &p[1], &f).unwrap());
    assert!(!dominates(&p[1], &p[0], &f).unwrap());
    // tie on the first objective
    assert!(!dominates(&p[0], &p[2], &f).unwrap());
    assert!(!dominates(&p[0], &p[0], &f).unwrap());
  }

  #[test]
  fn test_dominates_dimension_mismatch() {
    let (p, f) = population(&[&[1.0, 1.0], &[2.0]]);
    assert!(matches!(
      dominates(&p[0], &p[1], &f),
      Err(Error::DimensionMismatch {
        expected: 2,
        found: 1
      })
    ));
  }

  #[test]
  fn test_trade_off_curve_is_one_front() {
    let (p, f) =
      population(&[&[1.0, 4.0], &[2.0, 3.0], &[3.0, 2.0], &[4.0, 1.0]]);
    let front = non_dominated_front(&p, &f).unwrap();
    assert_eq!(front, p.iter().collect::<Vec<_>>());
  }

  #[test]
  fn test_dominated_pair() {
    let (p, f) = population(&[&[1.0, 1.0], &[2.0, 2.0]]);
    assert_eq!(non_dominated_front(&p, &f).unwrap(), vec![&p[0]]);
    assert_eq!(
      non_dominated_sort(&p, &f).unwrap(),
      vec![vec![&p[0]], vec![&p[1]]]
    );
  }

  #[test]
  fn test_front_is_order_independent() {
    let (p, f) = population(&[
      &[5.0, 5.0],
      &[1.0, 4.0],
      &[4.0, 1.0],
      &[3.0, 3.0],
      &[2.0, 2.0],
    ]);
    let forward: HashSet<_> =
      non_dominated_front(&p, &f).unwrap().into_iter().collect();
    let backward: HashSet<_> =
      non_dominated_front(p.iter().rev(), &f).unwrap().into_iter().collect();
    assert_eq!(forward, backward);
    assert_eq!(forward, HashSet::from([&p[1], &p[2], &p[4]]));
  }

  #[test]
  fn test_sort_layers() {
    let (p, f) = population(&[
      &[3.0, 3.0],
      &[1.0, 1.0],
      &[2.0, 2.0],
      &[1.5, 0.5],
      &[2.5, 2.5],
    ]);
    assert_eq!(
      non_dominated_sort(&p, &f).unwrap(),
      vec![vec![&p[1], &p[3]], vec![&p[2]], vec![&p[4]], vec![&p[0]]]
    );
  }

  #[test]
  fn test_duplicates_are_collapsed() {
    let (p, f) = population(&[&[1.0, 1.0], &[2.0, 2.0]]);
    let input = [&p[1], &p[0], &p[1], &p[0]];
    assert_eq!(
      non_dominated_sort(input, &f).unwrap(),
      vec![vec![&p[0]], vec![&p[1]]]
    );
  }

  #[test]
  fn test_empty_input() {
    let f: HashMap<Individual, Fitness> = HashMap::new();
    assert!(matches!(
      non_dominated_front(std::iter::empty::<&Individual>(), &f),
      Err(Error::EmptyInput)
    ));
    assert!(non_dominated_sort(std::iter::empty::<&Individual>(), &f)
      .unwrap()
      .is_empty());
  }

  #[test]
  fn test_errors_before_comparing() {
    let (p, f) = population(&[&[1.0, 1.0], &[2.0, 2.0], &[0.0]]);
    assert!(matches!(
      non_dominated_sort(&p, &f),
      Err(Error::DimensionMismatch {
        expected: 2,
        found: 1
      })
    ));

    let unknown = Individual::from([10.0]);
    assert!(matches!(
      non_dominated_front([&p[0], &unknown], &f),
      Err(Error::MissingFitness(i)) if i == unknown
    ));

    let (p, f) = population(&[&[], &[]]);
    assert!(matches!(
      non_dominated_front(&p, &f),
      Err(Error::ZeroObjectives)
    ));
  }

  fn scores_strategy() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1usize..4).prop_flat_map(|dim| {
      prop::collection::vec(
        prop::collection::vec(
          (0i32..6).prop_map(f64::from),
          dim..=dim,
        ),
        1..24,
      )
    })
  }

  fn owned_population(
    scores: &[Vec<f64>],
  ) -> (Vec<Individual>, HashMap<Individual, Fitness>) {
    let slices: Vec<&[f64]> = scores.iter().map(Vec::as_slice).collect();
    population(&slices)
  }

  proptest! {
    #[test]
    fn test_dominance_is_asymmetric(scores in scores_strategy()) {
      let (p, f) = owned_population(&scores);
      for a in &p {
        for b in &p {
          prop_assert!(
            !(dominates(a, b, &f).unwrap() && dominates(b, a, &f).unwrap())
          );
        }
      }
    }

    #[test]
    fn test_front_is_idempotent(scores in scores_strategy()) {
      let (p, f) = owned_population(&scores);
      let front = non_dominated_front(&p, &f).unwrap();
      let again = non_dominated_front(front.iter().copied(), &f).unwrap();
      prop_assert_eq!(&again, &front);
      for a in &front {
        for b in &front {
          prop_assert!(!dominates(a, b, &f).unwrap());
        }
      }
    }

    #[test]
    fn test_sort_partitions_input(scores in scores_strategy()) {
      let (p, f) = owned_population(&scores);
      let fronts = non_dominated_sort(&p, &f).unwrap();
      prop_assert_eq!(&fronts[0], &non_dominated_front(&p, &f).unwrap());

      let all: Vec<&Individual> = fronts.iter().flatten().copied().collect();
      let unique: HashSet<&Individual> = all.iter().copied().collect();
      prop_assert_eq!(all.len(), unique.len());
      prop_assert_eq!(unique, p.iter().collect::<HashSet<_>>());

      // every member of a later front is dominated by someone earlier
      for (k, front) in fronts.iter().enumerate().skip(1) {
        for b in front {
          prop_assert!(fronts[k - 1]
            .iter()
            .any(|a| dominates(a, b, &f).unwrap()));
        }
      }
    }
  }
}
