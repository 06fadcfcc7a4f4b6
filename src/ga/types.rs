//! Core trait definitions for the GA framework.
//!
//! The two central traits, [`Individual`] and [`GaProblem`], define the
//! contract between the generic evolutionary loop and a domain-specific
//! problem such as timetabling.

use rand::Rng;

/// A candidate solution in the GA population.
///
/// Individuals carry their own fitness value. The GA framework calls
/// [`GaProblem::evaluate`] to compute fitness, then stores it via
/// [`set_fitness`](Individual::set_fitness).
///
/// Fitness follows the **maximization** convention: higher is better.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct MySolution {
///     genes: Vec<u32>,
///     fitness: f64,
/// }
///
/// impl Individual for MySolution {
///     fn fitness(&self) -> f64 { self.fitness }
///     fn set_fitness(&mut self, f: f64) { self.fitness = f; }
/// }
/// ```
pub trait Individual: Clone + Send + Sync {
    /// Returns the current fitness of this individual.
    fn fitness(&self) -> f64;

    /// Sets the fitness of this individual.
    ///
    /// Called by the GA framework after evaluation.
    fn set_fitness(&mut self, fitness: f64);
}

/// Defines a GA optimization problem.
///
/// Covers the four hooks the evolutionary loop needs:
///
/// 1. **Initialization**: how to create random individuals
/// 2. **Evaluation**: how to compute fitness (higher is better)
/// 3. **Crossover**: how to recombine two parents into one child
/// 4. **Mutation**: how to perturb a child, given a per-gene rate
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate
/// individuals in parallel using rayon. Problems that memoize results must
/// guard their caches accordingly.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual.
    ///
    /// Called during population seeding. The implementation must always
    /// terminate and produce a structurally complete solution, even if it
    /// violates constraints.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual and returns its fitness.
    ///
    /// Must be deterministic for an unmodified individual.
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Produces one child by recombining two parents.
    ///
    /// The default implementation clones `parent1` (no crossover).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Self::Individual {
        parent1.clone()
    }

    /// Mutates an individual in place.
    ///
    /// `rate` is the configured per-gene mutation probability; the problem
    /// decides which genes it applies to. The default is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rate: f64, _rng: &mut R) {}

    /// Called after each reproduced generation has been evaluated.
    ///
    /// `generation` is 1-based. Useful for periodic housekeeping such as
    /// bounding memo caches. The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _best_fitness: f64) {}
}
