//! Parent selection strategies.
//!
//! Both strategies assume the **maximization** convention and expect the
//! population slice to be sorted best-first, which the evolutionary loop
//! guarantees before reproduction.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::Individual;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_timetable::ga::Selection;
///
/// // Binary tournament 80% of the time, top-10% pick otherwise
/// let sel = Selection::default();
/// assert_eq!(
///     sel,
///     Selection::EliteBiased { tournament_probability: 0.8, elite_fraction: 0.1 }
/// );
///
/// // Plain tournament of size 3
/// let sel = Selection::Tournament(3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Blend of exploration and exploitation.
    ///
    /// With probability `tournament_probability`, the better of two
    /// uniformly drawn members wins (binary tournament). Otherwise a
    /// member is drawn uniformly from the top `elite_fraction` of the
    /// sorted population (at least one member).
    EliteBiased {
        /// Probability of running a binary tournament (0.0–1.0).
        tournament_probability: f64,
        /// Fraction of the sorted population forming the elite pool.
        elite_fraction: f64,
    },

    /// Tournament selection: pick `k` members at random, keep the best.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::EliteBiased {
            tournament_probability: 0.8,
            elite_fraction: 0.1,
        }
    }
}

impl Selection {
    /// Selects a parent index from a best-first sorted population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match *self {
            Selection::EliteBiased {
                tournament_probability,
                elite_fraction,
            } => {
                if rng.random_bool(tournament_probability.clamp(0.0, 1.0)) {
                    tournament(population, 2, rng)
                } else {
                    elite_pick(population, elite_fraction, rng)
                }
            }
            Selection::Tournament(k) => tournament(population, k, rng),
        }
    }
}

/// Pick `k` random members (with replacement), return the fittest.
fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() > population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Uniform pick from the leading `fraction` of a sorted population.
fn elite_pick<I: Individual, R: Rng>(population: &[I], fraction: f64, rng: &mut R) -> usize {
    let n = population.len();
    let pool = ((n as f64 * fraction.clamp(0.0, 1.0)) as usize).clamp(1, n);
    rng.random_range(0..pool)
}
