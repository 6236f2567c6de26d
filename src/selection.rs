//! NSGA-II survivor selection.

use log::trace;

use crate::{
  crowding::crowding_distances,
  error::Result,
  individual::Individual,
  pareto::{DominanceIndex, Keyed},
  score::FitnessLookup,
};

/// The NSGA-II selection strategy (Deb et al., 2002).
///
/// Walks the non-dominated fronts of `population` from best to worst, taking
/// whole fronts while they fit into `survivors`. The first front that doesn't
/// fit is truncated to the remaining slots by keeping its members with the
/// largest crowding distance; later fronts are ignored. Crowding distance is
/// computed for that front only.
///
/// Returns exactly `min(survivors, n)` individuals, where `n` is the number of
/// unique individuals in `population`. Ties in crowding distance are resolved
/// in favour of the individual seen first.
///
/// # Errors
///
/// Fails if a fitness is unknown or the fitness vectors differ in length.
///
/// # Examples
/// ```
/// # use std::collections::HashMap;
/// # use paretoga::{individual::Individual, score::Fitness, selection::nsga2_select};
/// let population: Vec<_> = (0..4).map(|i| Individual::from([i as f64])).collect();
/// let fitness: HashMap<_, _> = population
///   .iter()
///   .cloned()
///   .zip([[1.0, 4.0], [2.0, 3.0], [3.0, 2.0], [4.0, 1.0]].map(Fitness::from))
///   .collect();
/// // the extremes of the trade-off curve survive
/// let selected = nsga2_select(&population, &fitness, 2).unwrap();
/// assert_eq!(selected, vec![&population[0], &population[3]]);
/// ```
pub fn nsga2_select<'a, I, L>(
  population: I,
  fitness: &L,
  survivors: usize,
) -> Result<Vec<&'a Individual>>
where
  I: IntoIterator<Item = &'a Individual>,
  L: FitnessLookup,
{
  let keyed = Keyed::new(population, fitness)?;
  let mut selected = Vec::with_capacity(survivors.min(keyed.individuals.len()));

  for (front_idx, mut front) in
    DominanceIndex::new(&keyed.fitnesses).fronts().into_iter().enumerate()
  {
    let remaining = survivors - selected.len();
    if remaining == 0 {
      break;
    }
    if front.len() > remaining {
      trace!(
        "truncating front {front_idx} from {} to {remaining} by crowding distance",
        front.len()
      );
      let fitnesses: Vec<_> =
        front.iter().map(|&idx| keyed.fitnesses[idx].clone()).collect();
      let distances = crowding_distances(&fitnesses);
      let mut by_distance: Vec<usize> = (0..front.len()).collect();
      // stable, so equal distances keep input order
      by_distance.sort_by(|&a, &b| distances[b].total_cmp(&distances[a]));
      front = by_distance
        .into_iter()
        .take(remaining)
        .map(|pos| front[pos])
        .collect();
    }
    selected.extend(keyed.pick(&front));
  }

  Ok(selected)
}
