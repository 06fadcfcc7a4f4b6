//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use serde::{Deserialize, Serialize};

use super::selection::Selection;
use crate::error::{Result, TimetableError};

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, selection strategy, mutation rate,
/// termination conditions, and parallelism. Deserializes from JSON with
/// every field optional, so callers can keep run settings in a file.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(80)
///     .with_selection(Selection::Tournament(3))
///     .with_elite_ratio(0.1)
///     .with_mutation_rate(0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of timetables in the population, held constant across
    /// generations.
    pub population_size: usize,

    /// Generation budget.
    pub max_generations: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Fraction of the population carried over unchanged (0.0–1.0).
    ///
    /// At least one elite is always kept.
    pub elite_ratio: f64,

    /// Per-gene mutation probability (0.0–1.0). Typical range: 0.05–0.1.
    pub mutation_rate: f64,

    /// Whether to evaluate the population in parallel.
    ///
    /// Only effective when the crate is built with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed per run.
    pub seed: Option<u64>,

    /// Optional wall-clock budget in milliseconds.
    ///
    /// Checked once per generation boundary, so a run may overshoot by up
    /// to one generation's worth of work. The best timetable found so far
    /// is still returned.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            selection: Selection::default(),
            elite_ratio: 0.1,
            mutation_rate: 0.1,
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Number of elites kept per generation: `max(1, floor(size * ratio))`.
    pub fn elite_count(&self) -> usize {
        ((self.population_size as f64 * self.elite_ratio) as usize).max(1)
    }

    /// Preset for quick feasibility checks.
    ///
    /// - Population: 30, Generations: 50, Time limit: 10s
    pub fn fast() -> Self {
        Self {
            population_size: 30,
            max_generations: 50,
            time_limit_ms: Some(10_000),
            ..Self::default()
        }
    }

    /// Preset trading solution quality against run time.
    ///
    /// - Population: 50, Generations: 100, Time limit: 30s
    pub fn balanced() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            time_limit_ms: Some(30_000),
            ..Self::default()
        }
    }

    /// Preset for large departments: bigger population, more generations.
    ///
    /// - Population: 100, Generations: 300, Time limit: 120s
    /// - Mutation rate: 0.05
    pub fn quality() -> Self {
        Self {
            population_size: 100,
            max_generations: 300,
            mutation_rate: 0.05,
            time_limit_ms: Some(120_000),
            ..Self::default()
        }
    }

    /// Picks a preset from the number of (class, course) pairings.
    ///
    /// - `pairings < 40` → [`fast()`](Self::fast)
    /// - `40 ≤ pairings < 200` → [`balanced()`](Self::balanced)
    /// - `pairings ≥ 200` → [`quality()`](Self::quality)
    pub fn auto_select(pairings: usize) -> Self {
        if pairings < 40 {
            Self::fast()
        } else if pairings < 200 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(invalid("population_size must be at least 2"));
        }
        if !(0.0..=1.0).contains(&self.elite_ratio) {
            return Err(invalid("elite_ratio must be within 0.0..=1.0"));
        }
        if self.elite_count() >= self.population_size {
            return Err(invalid(
                "elite_ratio too high: elites fill entire population",
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid("mutation_rate must be within 0.0..=1.0"));
        }
        if let Selection::EliteBiased {
            tournament_probability,
            elite_fraction,
        } = self.selection
        {
            if !(0.0..=1.0).contains(&tournament_probability)
                || !(0.0..=1.0).contains(&elite_fraction)
            {
                return Err(invalid("selection probabilities must be within 0.0..=1.0"));
            }
        }
        if self.time_limit_ms == Some(0) {
            return Err(invalid("time_limit_ms must be positive or None"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> TimetableError {
    TimetableError::InvalidConfig(msg.into())
}
