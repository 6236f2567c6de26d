//! **paretoga** is a small multi-objective genetic algorithm framework built
//! around NSGA-II selection. It finds trade-off curves of problems with
//! several competing objectives, all of which are minimized.
//!
//! Here's a [quick start example](#example) for the impatient.
//!
//! The crate has two layers.
//! - **Pareto machinery** - plain functions over individuals and a fitness
//!   lookup: [`dominates`], [`non_dominated_front`], [`non_dominated_sort`],
//!   [`crowding_distance`] and the NSGA-II survivor selection
//!   [`nsga2_select`]. They can be used on their own, with any
//!   [`FitnessLookup`]: a [`HashMap`], a [`FitnessCache`] or a closure
//! - **Generational driver** - [`Nsga2`], which evaluates a population, keeps
//!   track of the best-known front and asks a reproduction operator for the
//!   next population, generation after generation:
//!   1. **Evaluate** individuals that haven't been evaluated yet, caching
//!      their fitness for the rest of the run
//!   2. **Record** the population in the history
//!   3. **Recompute** the best-known front
//!   4. **Reproduce**, producing the next population. Reproduction selects
//!      parents with [`nsga2_select`]
//!
//! # Individuals and fitness
//!
//! An [`Individual`] is an immutable, hashable vector of real-valued genes.
//! Individuals are compared by value, so two individuals with identical genes
//! are the same individual: they share one cached fitness and take one slot
//! in selection. A [`Fitness`] holds one score per objective; lower is better.
//! One individual dominates another if it is strictly better on every
//! objective.
//!
//! # Operators
//!
//! The driver is assembled from operators, each represented with a trait:
//!
//! | Operator           | Trait              | Built-in                  |
//! |:-------------------|:------------------:|:-------------------------:|
//! | **Initialization** | [`Initialization`] | [`GaussianInitialization`] |
//! | **Evaluation**     | [`Evaluation`]     | -                         |
//! | **Reproduction**   | [`Reproduction`]   | [`StandardReproduction`]  |
//! | **Mutation**       | [`Mutation`]       | [`GaussianMutation`]      |
//! | **Termination**    | [`Terminator`]     | [`GenerationTerminator`], [`EvaluationTerminator`], [`NeverTerminator`] |
//!
//! Each operator trait is implemented by closures too, so an evaluator is
//! usually just a `Fn(&[f64]) -> anyhow::Result<Fitness>`. Consult the
//! *Implementors* section of operators' documentation to see what closures
//! implement them.
//!
//! Closures that take references to [`Breeding`] or [`Progress`] are easier
//! to write as plain functions, since Rust can't always infer that a closure
//! must accept any lifetime.
//!
//! # Parallelization
//!
//! Evaluation is the one expensive step and can be parallelized by calling
//! [`par_each()`] or [`par_batch()`] on an evaluator. This cheap conversion
//! only wraps the evaluator into a struct, tagging it, so the driver evaluates
//! individuals in parallel with [rayon], one by one or in batches of equal
//! size. All evaluations of a generation are finished before anything is
//! cached or compared.
//! ```
//! # use paretoga::{operator::ParBatch, score::Fitness};
//! let evaluation = |g: &[f64]| -> anyhow::Result<Fitness> {
//!   Ok(Fitness::from([g[0] + 1.0, g[0] * 2.0]))
//! };
//! let par_evaluation = evaluation.par_batch();
//! ```
//!
//! # Logging
//!
//! The crate logs through the [log] facade: the driver reports each
//! generation at `debug` level and selection reports truncated fronts at
//! `trace` level. Install any logger to see them.
//!
//! # Example
//!
//! Here's a solution for the textbook *Schaffer's Problem No.1*, whose Pareto
//! optimal solutions lie between 0 and 2.
//! ```no_run
//! # fn main() {
//! use paretoga::{
//!   config::Config,
//!   initialization::GaussianInitialization,
//!   operator::ParEach,
//!   optimizer::{nsga::Nsga2, Optimizer},
//!   reproduction::StandardReproduction,
//!   score::Fitness,
//!   termination::GenerationTerminator,
//! };
//! // objective functions `f1(x) = x^2` and `f2(x) = (x - 2)^2`
//! let evaluation = |g: &[f64]| -> anyhow::Result<Fitness> {
//!   Ok(Fitness::from([g[0].powi(2), (g[0] - 2.0).powi(2)]))
//! };
//! // start far away from the optimum
//! let config = Config::builder()
//!   .x0([10.0])
//!   .population_size(100)
//!   .mutation_probability(0.5)
//!   .build();
//! // a convenient builder with compile time verification from `typed-builder` crate
//! let nsga2 = Nsga2::builder()
//!   .reproducer(StandardReproduction::gaussian(&config))
//!   .config(config)
//!   .initializer(GaussianInitialization)
//!   // `evaluation` will be executed concurrently for each individual
//!   .evaluator(evaluation.par_each())
//!   .terminator(GenerationTerminator(100))
//!   .build();
//! // upon termination optimizer returns the best front it has found
//! let front = nsga2.optimize().unwrap();
//! # }
//! ```
//!
//! [`dominates`]: crate::pareto::dominates
//! [`non_dominated_front`]: crate::pareto::non_dominated_front
//! [`non_dominated_sort`]: crate::pareto::non_dominated_sort
//! [`crowding_distance`]: crate::crowding::crowding_distance
//! [`nsga2_select`]: crate::selection::nsga2_select
//! [`FitnessLookup`]: crate::score::FitnessLookup
//! [`HashMap`]: std::collections::HashMap
//! [`FitnessCache`]: crate::cache::FitnessCache
//! [`Nsga2`]: crate::optimizer::nsga::Nsga2
//! [`Individual`]: crate::individual::Individual
//! [`Fitness`]: crate::score::Fitness
//! [`Initialization`]: crate::initialization::Initialization
//! [`GaussianInitialization`]: crate::initialization::GaussianInitialization
//! [`Evaluation`]: crate::evaluation::Evaluation
//! [`Reproduction`]: crate::reproduction::Reproduction
//! [`StandardReproduction`]: crate::reproduction::StandardReproduction
//! [`Breeding`]: crate::reproduction::Breeding
//! [`Mutation`]: crate::mutation::Mutation
//! [`GaussianMutation`]: crate::mutation::GaussianMutation
//! [`Terminator`]: crate::termination::Terminator
//! [`Progress`]: crate::termination::Progress
//! [`GenerationTerminator`]: crate::termination::GenerationTerminator
//! [`EvaluationTerminator`]: crate::termination::EvaluationTerminator
//! [`NeverTerminator`]: crate::termination::NeverTerminator
//! [`par_each()`]: crate::operator::ParEach::par_each
//! [`par_batch()`]: crate::operator::ParBatch::par_batch
//! [rayon]: https://docs.rs/rayon
//! [log]: https://docs.rs/log

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod crowding;
pub mod error;
pub mod evaluation;
mod execution;
pub mod individual;
pub mod initialization;
pub mod mutation;
pub mod operator;
pub mod optimizer;
pub mod pareto;
pub mod reproduction;
pub mod score;
pub mod selection;
pub mod termination;
