use paretoga::{
  config::Config,
  error::Result,
  individual::{Gene, Individual, Population},
  initialization::{GaussianInitialization, Initialization},
  mutation::GaussianMutation,
  optimizer::{nsga::Nsga2, Optimizer},
  reproduction::{Breeding, Reproduction, StandardReproduction},
  score::Fitness,
  termination::{Progress, Terminator},
};

// the search space is `0 <= x <= 5`, `0 <= y <= 3`
fn clamp(genes: &mut [Gene]) {
  genes[0] = genes[0].clamp(0.0, 5.0);
  genes[1] = genes[1].clamp(0.0, 3.0);
}

// objective functions `f1(x, y) = 4x^2 + 4y^2` and
// `f2(x, y) = (x - 5)^2 + (y - 5)^2`, constraints are penalized
fn binh_korn(g: &[Gene]) -> anyhow::Result<Fitness> {
  let (x, y) = (g[0], g[1]);
  let c1 = ((x - 5.0).powi(2) + y.powi(2) - 25.0).max(0.0);
  let c2 = (7.7 - (x - 8.0).powi(2) - (y + 3.0).powi(2)).max(0.0);
  let penalty = 1000.0 * (c1 + c2);
  Ok(Fitness::from([
    4.0 * x.powi(2) + 4.0 * y.powi(2) + penalty,
    (x - 5.0).powi(2) + (y - 5.0).powi(2) + penalty,
  ]))
}

// standard reproduction that keeps children inside of the search space
struct Clamped(StandardReproduction);

impl Reproduction for Clamped {
  fn reproduce(&mut self, breeding: &Breeding<'_>) -> Result<Population> {
    let offspring = self.0.reproduce(breeding)?;
    Ok(offspring.iter().map(|i| i.modified(clamp)).collect())
  }
}

// stops once the best front is large enough or after 200 generations
struct Enough;

impl Terminator for Enough {
  fn terminate(&mut self, progress: &Progress<'_>) -> bool {
    progress.best_evaluation.len() >= 50 || progress.generation >= 200
  }
}

fn main() -> anyhow::Result<()> {
  env_logger::init();

  let config = Config::builder()
    .x0([2.5, 1.5])
    .population_size(100)
    .init_std_dev(2.0)
    .build();

  let nsga2 = Nsga2::builder()
    .reproducer(Clamped(StandardReproduction::new(GaussianMutation::new(
      0.3, 0.5,
    ))))
    .config(config)
    .initializer(|c: &Config| -> Vec<Individual> {
      GaussianInitialization
        .initialize(c)
        .iter()
        .map(|i| i.modified(clamp))
        .collect()
    })
    .evaluator(binh_korn)
    .terminator(Enough)
    .build();

  print!("l=[");
  let front = nsga2.optimize()?;
  for (idx, (_, fitness)) in front.iter().enumerate() {
    let sep = if idx == 0 { "" } else { "," };
    print!("{sep}({:.2},{:.2})", fitness[0], fitness[1]);
  }
  println!("]");
  Ok(())
}
