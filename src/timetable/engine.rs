//! Call-and-return facade over the timetabling GA.

use std::fmt;
use std::time::Duration;

use tracing::info;

use super::problem::{TimetableProblem, Variant};
use crate::constraints::ConstraintReport;
use crate::error::Result;
use crate::ga::{GaConfig, GaResult, GaRunner, ProgressObserver};
use crate::models::{Catalog, ScheduledEntry, Timetable};

/// Owns a timetabling problem, its GA configuration and an optional
/// progress observer.
///
/// Each engine owns its population and caches exclusively; `evolve` runs
/// on the calling thread until the generation or time budget is spent.
///
/// # Example
///
/// ```
/// use u_timetable::ga::GaConfig;
/// use u_timetable::models::{Catalog, ClassGroup, Course, Day, Room, TimeSlot};
/// use u_timetable::timetable::TimetableEngine;
///
/// let slots = ["08:00", "10:00", "13:00"]
///     .iter()
///     .zip(1..)
///     .map(|(start, id)| {
///         let start: u_timetable::models::TimeOfDay = start.parse().unwrap();
///         let end = u_timetable::models::TimeOfDay::new(start.hour() + 2, 0).unwrap();
///         TimeSlot::new(id, start, end)
///     })
///     .collect();
/// let catalog = Catalog::new()
///     .with_classes(vec![
///         ClassGroup::new(1, "CS-1", 25).with_courses(vec![10]),
///         ClassGroup::new(2, "CS-2", 25).with_courses(vec![11]),
///     ])
///     .with_courses(vec![Course::new(10, "Algorithms"), Course::new(11, "Networks")])
///     .with_rooms(vec![Room::new(1, "A101", 30)])
///     .with_days(&Day::WEEKDAYS)
///     .with_time_slots(slots);
///
/// let config = GaConfig::default().with_population_size(10).with_seed(7);
/// let mut engine = TimetableEngine::new(catalog, config).unwrap();
/// let result = engine.evolve(20).unwrap();
///
/// assert_eq!(result.best.len(), 2);
/// assert!(engine.constraint_report(&result.best).is_feasible());
/// let rows = engine.render(&result.best);
/// assert_eq!(rows[0].room_name, "A101");
/// ```
pub struct TimetableEngine {
    problem: TimetableProblem,
    config: GaConfig,
    observer: Option<Box<dyn ProgressObserver + Send>>,
}

impl TimetableEngine {
    /// Single-session engine.
    pub fn new(catalog: Catalog, config: GaConfig) -> Result<Self> {
        Self::from_problem(TimetableProblem::new(catalog, Variant::Standard)?, config)
    }

    /// Session-aware engine.
    pub fn session_aware(catalog: Catalog, config: GaConfig) -> Result<Self> {
        Self::from_problem(TimetableProblem::new(catalog, Variant::SessionAware)?, config)
    }

    /// Engine over a prepared problem, e.g. one with custom constraints.
    pub fn from_problem(problem: TimetableProblem, config: GaConfig) -> Result<Self> {
        config.validate()?;
        info!(
            variant = ?problem.variant(),
            pairings = problem.pairing_count(),
            domains = problem.plan().domains().len(),
            sessions = problem.plan().groups().len(),
            population = config.population_size,
            "timetable engine ready"
        );
        Ok(Self {
            problem,
            config,
            observer: None,
        })
    }

    /// Reports progress to `observer` once per generation.
    pub fn with_progress(mut self, observer: impl ProgressObserver + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Stops evolving once `budget` has elapsed, checked between
    /// generations.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.config = self
            .config
            .with_time_limit_ms(u64::try_from(budget.as_millis()).unwrap_or(u64::MAX).max(1));
        self
    }

    /// Seeds a fresh population and evolves it for up to `generations`
    /// generations, returning the best timetable ever observed.
    ///
    /// With `generations == 0` the best seeded timetable is returned.
    /// Fails only when the configuration is invalid.
    pub fn evolve(&mut self, generations: usize) -> Result<GaResult<Timetable>> {
        let config = self.config.clone().with_max_generations(generations);
        let observer = self
            .observer
            .as_deref_mut()
            .map(|o| o as &mut dyn ProgressObserver);
        GaRunner::run_with_observer(&self.problem, &config, observer)
    }

    /// Fitness in (0, 1].
    pub fn fitness(&self, timetable: &Timetable) -> f64 {
        self.problem.fitness(timetable)
    }

    /// Per-constraint violation breakdown.
    pub fn constraint_report(&self, timetable: &Timetable) -> ConstraintReport {
        self.problem.constraint_report(timetable)
    }

    /// Denormalized rows ready to persist.
    pub fn render(&self, timetable: &Timetable) -> Vec<ScheduledEntry> {
        self.problem.render(timetable)
    }

    /// The underlying problem.
    pub fn problem(&self) -> &TimetableProblem {
        &self.problem
    }

    /// The GA configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Genes per timetable.
    pub fn pairing_count(&self) -> usize {
        self.problem.pairing_count()
    }
}

impl fmt::Debug for TimetableEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimetableEngine")
            .field("problem", &self.problem)
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
