use paretoga::{
  config::Config,
  initialization::GaussianInitialization,
  operator::ParEach,
  optimizer::{nsga::Nsga2, Optimizer},
  reproduction::StandardReproduction,
  score::Fitness,
  termination::GenerationTerminator,
};

fn main() -> anyhow::Result<()> {
  // try `RUST_LOG=debug`
  env_logger::init();

  // objective functions `f1(x) = x^2` and `f2(x) = (x - 2)^2`
  let evaluation = |g: &[f64]| -> anyhow::Result<Fitness> {
    Ok(Fitness::from([g[0].powi(2), (g[0] - 2.0).powi(2)]))
  };

  // start far away from the optimal range `[0, 2]`
  let config = Config::builder()
    .x0([10.0])
    .population_size(100)
    .mutation_probability(0.5)
    .seed(42)
    .build();

  let nsga2 = Nsga2::builder()
    .reproducer(StandardReproduction::gaussian(&config))
    .config(config)
    .initializer(GaussianInitialization)
    .evaluator(evaluation.par_each())
    .terminator(GenerationTerminator(100))
    .build();

  let mut front = nsga2.optimize()?;
  front.sort_by(|(a, _), (b, _)| a[0].total_cmp(&b[0]));
  for (individual, fitness) in front {
    println!("x = {:8.4}, f = {:?}", individual[0], fitness.scores());
  }
  Ok(())
}
