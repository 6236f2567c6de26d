//! Crowding distance, the diversity measure used to truncate a front.

use std::collections::HashMap;

use itertools::Itertools;
use log::trace;

use crate::{
  error::{Error, Result},
  individual::Individual,
  pareto::Keyed,
  score::{Fitness, FitnessLookup},
};

/// An alias for a crowding distance. The bigger, the more isolated an
/// individual is within its front.
pub type CrowdingDistance = f64;

/// Distance given to the extreme individuals of an objective, so that they are
/// always kept when a front is truncated.
pub const BOUNDARY_DISTANCE: CrowdingDistance = CrowdingDistance::INFINITY;

/// Computes the crowding distance of each individual of `front`.
///
/// For each objective, individuals are sorted by that objective. The first and
/// the last one get [`BOUNDARY_DISTANCE`], every other one accumulates the
/// distance between its two neighbours, normalized by the objective's range.
/// An objective on which every individual has the same value (or whose range
/// isn't finite) contributes nothing, to any individual. Distances are only
/// meaningful within one front.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if `front` is empty, and fails if a fitness is
/// unknown or the fitness vectors differ in length.
pub fn crowding_distance<'a, I, L>(
  front: I,
  fitness: &L,
) -> Result<HashMap<&'a Individual, CrowdingDistance>>
where
  I: IntoIterator<Item = &'a Individual>,
  L: FitnessLookup,
{
  let keyed = Keyed::new(front, fitness)?;
  if keyed.is_empty() {
    return Err(Error::EmptyInput);
  }
  let distances = crowding_distances(&keyed.fitnesses);
  Ok(keyed.individuals.into_iter().zip(distances).collect())
}

/// Crowding distances of non-empty `fitnesses` of equal dimensionality, in
/// the same order.
pub(crate) fn crowding_distances(fitnesses: &[Fitness]) -> Vec<CrowdingDistance> {
  let mut distances = vec![0.0; fitnesses.len()];
  let Some(dim) = fitnesses.first().map(Fitness::dim) else {
    return distances;
  };
  let mut order: Vec<usize> = (0..fitnesses.len()).collect();

  for o_idx in 0..dim {
    order.sort_by(|&a, &b| fitnesses[a][o_idx].total_cmp(&fitnesses[b][o_idx]));
    let (first, last) = (order[0], order[order.len() - 1]);
    // non-positive, since `order` is ascending
    let normalization = fitnesses[first][o_idx] - fitnesses[last][o_idx];
    if normalization == 0.0 || !normalization.is_finite() {
      trace!("objective {o_idx} is degenerate, skipping");
      continue;
    }

    distances[first] = BOUNDARY_DISTANCE;
    distances[last] = BOUNDARY_DISTANCE;
    for (&pre, &ind, &post) in order.iter().tuple_windows() {
      distances[ind] +=
        (fitnesses[pre][o_idx] - fitnesses[post][o_idx]) / normalization;
    }
  }

  distances
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;

  fn front(
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
  fn test_trade_off_curve() {
    let (p, f) = front(&[&[1.0, 4.0], &[2.0, 3.0], &[3.0, 2.0], &[4.0, 1.0]]);
    let d = crowding_distance(&p, &f).unwrap();
    assert_eq!(d[&p[0]], BOUNDARY_DISTANCE);
    assert_eq!(d[&p[3]], BOUNDARY_DISTANCE);
    // (1 - 3) / (1 - 4) on each objective
    assert!((d[&p[1]] - 4.0 / 3.0).abs() < 1e-12);
    assert!((d[&p[2]] - 4.0 / 3.0).abs() < 1e-12);
  }

  #[test]
  fn test_isolated_individual_is_further() {
    let (p, f) = front(&[
      &[0.0, 10.0],
      &[1.0, 9.0],
      &[2.0, 8.0],
      &[8.0, 2.0],
      &[10.0, 0.0],
    ]);
    let d = crowding_distance(&p, &f).unwrap();
    assert!(d[&p[3]] > d[&p[1]]);
    assert!(d[&p[2]] > d[&p[1]]);
  }

  #[test]
  fn test_degenerate_objective_contributes_nothing() {
    let (p, f) = front(&[&[1.0, 3.0], &[1.0, 2.0], &[1.0, 1.0]]);
    let d = crowding_distance(&p, &f).unwrap();
    assert!(d.values().all(|v| !v.is_nan()));
    assert_eq!(d[&p[0]], BOUNDARY_DISTANCE);
    assert_eq!(d[&p[2]], BOUNDARY_DISTANCE);
    // only the second objective: (1 - 3) / (1 - 3)
    assert_eq!(d[&p[1]], 1.0);

    let (p, f) = front(&[&[5.0, 5.0], &[5.0, 5.0]]);
    let d = crowding_distance(&p, &f).unwrap();
    assert!(d.values().all(|&v| v == 0.0));
  }

  #[test]
  fn test_small_fronts() {
    let (p, f) = front(&[&[1.0, 2.0]]);
    assert_eq!(crowding_distance(&p, &f).unwrap()[&p[0]], 0.0);

    let (p, f) = front(&[&[1.0, 2.0], &[2.0, 1.0]]);
    let d = crowding_distance(&p, &f).unwrap();
    assert!(d.values().all(|&v| v == BOUNDARY_DISTANCE));
  }

  #[test]
  fn test_errors() {
    let (p, f) = front(&[&[1.0, 2.0], &[2.0]]);
    assert!(matches!(
      crowding_distance(&p, &f),
      Err(Error::DimensionMismatch { .. })
    ));
    assert!(matches!(
      crowding_distance(std::iter::empty::<&Individual>(), &f),
      Err(Error::EmptyInput)
    ));
  }

  proptest! {
    #[test]
    fn test_extremes_get_boundary_distance(
      scores in (1usize..4).prop_flat_map(|dim| {
        prop::collection::hash_set(-1000i32..1000, 3..16).prop_flat_map(
          move |first| {
            let n = first.len();
            (
              Just(first.into_iter().collect::<Vec<_>>()),
              prop::collection::vec(
                prop::collection::hash_set(-1000i32..1000, n..=n),
                dim - 1..=dim - 1,
              ),
            )
          },
        )
      })
    ) {
      // distinct values on every objective
      let (first, rest) = scores;
      let columns: Vec<Vec<f64>> = std::iter::once(first)
        .chain(rest.into_iter().map(|c| c.into_iter().collect()))
        .map(|c| c.into_iter().map(f64::from).collect())
        .collect();
      let rows: Vec<Vec<f64>> = (0..columns[0].len())
        .map(|i| columns.iter().map(|c| c[i]).collect())
        .collect();
      let slices: Vec<&[f64]> = rows.iter().map(Vec::as_slice).collect();
      let (p, f) = front(&slices);
      let d = crowding_distance(&p, &f).unwrap();

      for column in &columns {
        let min = (0..p.len()).min_by(|&a, &b| column[a].total_cmp(&column[b])).unwrap();
        let max = (0..p.len()).max_by(|&a, &b| column[a].total_cmp(&column[b])).unwrap();
        prop_assert_eq!(d[&p[min]], BOUNDARY_DISTANCE);
        prop_assert_eq!(d[&p[max]], BOUNDARY_DISTANCE);
      }
      prop_assert!(d.values().all(|&v| v >= 0.0));
    }
  }
}
