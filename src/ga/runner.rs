//! GA evolutionary loop execution.
//!
//! [`Evolution`] is the stepwise state machine:
//! `Seeded → Evaluated → Reproduced → Evaluated → … → Terminated`.
//! [`GaRunner`] drives it to completion under a generation budget and an
//! optional wall-clock budget.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use super::config::GaConfig;
use super::progress::{notify, GenerationProgress, ProgressObserver};
use super::types::{GaProblem, Individual};
use crate::error::Result;

/// Lifecycle state of an [`Evolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionState {
    /// Population built, not yet scored.
    Seeded,
    /// Every member scored; population sorted best-first.
    Evaluated,
    /// Next generation built from elites and offspring, not yet scored.
    Reproduced,
    /// Run finished; no further steps are taken.
    Terminated,
}

/// Stepwise evolutionary loop over a borrowed problem.
///
/// The best individual ever observed is tracked separately from the
/// current population, so it survives even if a later generation regresses.
pub struct Evolution<'p, P: GaProblem> {
    problem: &'p P,
    config: GaConfig,
    rng: StdRng,
    population: Vec<P::Individual>,
    best: Option<P::Individual>,
    generation: usize,
    state: EvolutionState,
    started: Instant,
}

impl<'p, P: GaProblem> Evolution<'p, P> {
    /// Validates `config` and seeds a population of `population_size`.
    pub fn seed(problem: &'p P, config: &GaConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();

        Ok(Self {
            problem,
            config: config.clone(),
            rng,
            population,
            best: None,
            generation: 0,
            state: EvolutionState::Seeded,
            started: Instant::now(),
        })
    }

    /// Scores every member, sorts best-first and updates the best-ever.
    ///
    /// Evaluating an already evaluated population is a no-op.
    pub fn evaluate(&mut self) {
        if matches!(
            self.state,
            EvolutionState::Evaluated | EvolutionState::Terminated
        ) {
            return;
        }

        evaluate_population(self.problem, &mut self.population, self.config.parallel);
        self.population.sort_by(|a, b| {
            b.fitness()
                .partial_cmp(&a.fitness())
                .unwrap_or(Ordering::Equal)
        });

        let leader = &self.population[0];
        let improved = self
            .best
            .as_ref()
            .map_or(true, |best| leader.fitness() > best.fitness());
        if improved {
            self.best = Some(leader.clone());
        }

        if self.generation > 0 {
            self.problem
                .on_generation(self.generation, self.best_fitness());
        }

        debug!(
            generation = self.generation,
            leader = leader.fitness(),
            best = self.best_fitness(),
            mean = mean_fitness(&self.population),
            "generation evaluated"
        );
        self.state = EvolutionState::Evaluated;
    }

    /// Builds the next generation.
    ///
    /// Keeps the top [`GaConfig::elite_count`] members unchanged, then fills
    /// the population with children: two parents by selection, crossover,
    /// then mutation. Evaluates first if the population is not yet scored.
    pub fn reproduce(&mut self) {
        if self.state == EvolutionState::Terminated {
            return;
        }
        self.evaluate();

        let size = self.config.population_size;
        let elite_count = self.config.elite_count();
        let mut next_gen: Vec<P::Individual> = Vec::with_capacity(size);
        next_gen.extend_from_slice(&self.population[..elite_count]);

        while next_gen.len() < size {
            let p1 = self.config.selection.select(&self.population, &mut self.rng);
            let p2 = self.config.selection.select(&self.population, &mut self.rng);

            let mut child =
                self.problem
                    .crossover(&self.population[p1], &self.population[p2], &mut self.rng);
            self.problem
                .mutate(&mut child, self.config.mutation_rate, &mut self.rng);
            next_gen.push(child);
        }

        self.population = next_gen;
        self.generation += 1;
        self.state = EvolutionState::Reproduced;
    }

    /// Marks the run finished.
    pub fn terminate(&mut self) {
        self.state = EvolutionState::Terminated;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EvolutionState {
        self.state
    }

    /// Number of reproduction steps taken so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current population; sorted best-first while [`EvolutionState::Evaluated`].
    pub fn population(&self) -> &[P::Individual] {
        &self.population
    }

    /// Best individual observed so far, once anything has been evaluated.
    pub fn best(&self) -> Option<&P::Individual> {
        self.best.as_ref()
    }

    /// Fitness of the best-ever individual, or `0.0` before evaluation.
    pub fn best_fitness(&self) -> f64 {
        self.best.as_ref().map_or(0.0, Individual::fitness)
    }

    /// Wall-clock time since seeding.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whether the configured wall-clock budget has run out.
    pub fn time_exhausted(&self) -> bool {
        self.config
            .time_limit_ms
            .is_some_and(|ms| self.elapsed() >= Duration::from_millis(ms))
    }

    /// Consumes the evolution, returning the best-ever individual.
    pub fn into_best(mut self) -> P::Individual {
        self.evaluate();
        match self.best {
            Some(best) => best,
            // evaluate() always records a best for a non-empty population
            None => self.population.swap_remove(0),
        }
    }
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run stopped on the wall-clock budget.
    pub timed_out: bool,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,

    /// Best-ever fitness after seeding and after each generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA evolutionary loop to completion.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA until the generation or time budget is exhausted.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>> {
        Self::run_with_observer(problem, config, None)
    }

    /// Runs the GA, reporting progress once per generation.
    pub fn run_with_observer<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        mut observer: Option<&mut dyn ProgressObserver>,
    ) -> Result<GaResult<P::Individual>> {
        let mut evolution = Evolution::seed(problem, config)?;
        info!(
            population = config.population_size,
            generations = config.max_generations,
            time_limit_ms = config.time_limit_ms,
            "evolution started"
        );

        evolution.evaluate();
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(evolution.best_fitness());

        let mut timed_out = false;
        for _ in 0..config.max_generations {
            if evolution.time_exhausted() {
                timed_out = true;
                break;
            }

            evolution.reproduce();
            evolution.evaluate();
            fitness_history.push(evolution.best_fitness());

            if let Some(observer) = observer.as_deref_mut() {
                let progress = GenerationProgress {
                    generation: evolution.generation(),
                    total_generations: config.max_generations,
                    best_fitness: evolution.best_fitness(),
                    elapsed: evolution.elapsed(),
                };
                notify(observer, &progress);
            }
        }

        evolution.terminate();
        let generations = evolution.generation();
        let elapsed = evolution.elapsed();
        let best = evolution.into_best();

        info!(
            best_fitness = best.fitness(),
            generations,
            timed_out,
            elapsed_ms = elapsed.as_millis() as u64,
            "evolution finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations,
            timed_out,
            elapsed,
            fitness_history,
        })
    }
}

/// Evaluate all individuals in the population.
#[cfg(feature = "parallel")]
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) {
    if parallel {
        population.par_iter_mut().for_each(|ind| {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        });
    } else {
        evaluate_sequential(problem, population);
    }
}

/// Evaluate all individuals in the population.
#[cfg(not(feature = "parallel"))]
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    _parallel: bool,
) {
    evaluate_sequential(problem, population);
}

fn evaluate_sequential<P: GaProblem>(problem: &P, population: &mut [P::Individual]) {
    for ind in population.iter_mut() {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

fn mean_fitness<I: Individual>(population: &[I]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    population.iter().map(Individual::fitness).sum::<f64>() / population.len() as f64
}
