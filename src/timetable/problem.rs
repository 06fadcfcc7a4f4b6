//! The timetabling problem as seen by the GA framework.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::builder::CandidateBuilder;
use super::evaluator::{CacheKeyMode, FitnessEvaluator};
use super::operators;
use super::partition::SchedulingPlan;
use crate::constraints::{ConstraintCatalog, ConstraintReport};
use crate::error::Result;
use crate::ga::GaProblem;
use crate::models::{Catalog, IndexedCatalog, ScheduledEntry, Timetable};

/// Generations between fitness cache resets.
pub const DEFAULT_CACHE_RESET_INTERVAL: usize = 20;

/// Which flavour of the scheduler to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// One pool of days, slots and rooms shared by every pairing.
    #[default]
    Standard,
    /// Pairings are partitioned by academic session and scored against
    /// session legality and cross-session clashes.
    SessionAware,
}

/// Course timetabling as a [`GaProblem`].
///
/// Owns the validated catalog, the fixed pairing plan and the evaluator.
///
/// # Example
///
/// ```
/// use u_timetable::ga::{GaConfig, GaRunner};
/// use u_timetable::models::{Catalog, ClassGroup, Course, Day, Room, TimeSlot};
/// use u_timetable::timetable::TimetableProblem;
///
/// let catalog = Catalog::new()
///     .with_classes(vec![ClassGroup::new(1, "CS-1", 25).with_courses(vec![10])])
///     .with_courses(vec![Course::new(10, "Algorithms")])
///     .with_rooms(vec![Room::new(1, "A101", 30)])
///     .with_days(&Day::WEEKDAYS)
///     .with_time_slots(vec![TimeSlot::new(
///         1,
///         "08:00".parse().unwrap(),
///         "10:00".parse().unwrap(),
///     )]);
///
/// let problem = TimetableProblem::standard(catalog).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_max_generations(5)
///     .with_seed(1);
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert_eq!(result.best.len(), 1);
/// assert_eq!(result.best_fitness, 1.0);
/// ```
#[derive(Debug)]
pub struct TimetableProblem {
    catalog: IndexedCatalog,
    plan: SchedulingPlan,
    evaluator: FitnessEvaluator,
    variant: Variant,
    cache_reset_interval: usize,
}

impl TimetableProblem {
    /// Validates `catalog` and plans the gene layout for `variant`, using
    /// the variant's default constraint catalog.
    pub fn new(catalog: Catalog, variant: Variant) -> Result<Self> {
        let session_aware = variant == Variant::SessionAware;
        let catalog = IndexedCatalog::new(catalog, session_aware)?;
        let (plan, constraints) = if session_aware {
            (
                SchedulingPlan::session_aware(&catalog),
                ConstraintCatalog::session_aware(),
            )
        } else {
            (SchedulingPlan::standard(&catalog), ConstraintCatalog::standard())
        };

        Ok(Self {
            catalog,
            plan,
            evaluator: FitnessEvaluator::new(constraints),
            variant,
            cache_reset_interval: DEFAULT_CACHE_RESET_INTERVAL,
        })
    }

    /// Single-session problem.
    pub fn standard(catalog: Catalog) -> Result<Self> {
        Self::new(catalog, Variant::Standard)
    }

    /// Session-aware problem.
    pub fn session_aware(catalog: Catalog) -> Result<Self> {
        Self::new(catalog, Variant::SessionAware)
    }

    /// Scores against `constraints` instead of the variant default.
    pub fn with_constraints(mut self, constraints: ConstraintCatalog) -> Self {
        self.evaluator = FitnessEvaluator::new(constraints).with_key_mode(self.evaluator.key_mode());
        self
    }

    /// Sets how timetables are keyed in the fitness cache.
    pub fn with_cache_key_mode(mut self, mode: CacheKeyMode) -> Self {
        self.evaluator = self.evaluator.with_key_mode(mode);
        self
    }

    /// Clears the fitness cache every `generations` generations; `0` never
    /// clears it.
    pub fn with_cache_reset_interval(mut self, generations: usize) -> Self {
        self.cache_reset_interval = generations;
        self
    }

    /// The validated catalog.
    pub fn catalog(&self) -> &IndexedCatalog {
        &self.catalog
    }

    /// The gene layout.
    pub fn plan(&self) -> &SchedulingPlan {
        &self.plan
    }

    /// The fitness evaluator.
    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }

    /// The rules being scored.
    pub fn constraints(&self) -> &ConstraintCatalog {
        self.evaluator.constraints()
    }

    /// Scheduler flavour.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Generations between cache resets.
    pub fn cache_reset_interval(&self) -> usize {
        self.cache_reset_interval
    }

    /// Genes per timetable.
    pub fn pairing_count(&self) -> usize {
        self.plan.len()
    }

    /// Gene builder over this problem's plan.
    pub fn builder(&self) -> CandidateBuilder<'_> {
        CandidateBuilder::new(&self.catalog, &self.plan)
    }

    /// Fitness in (0, 1].
    pub fn fitness(&self, timetable: &Timetable) -> f64 {
        self.evaluator.fitness(&self.catalog, timetable)
    }

    /// Per-constraint violation breakdown.
    pub fn constraint_report(&self, timetable: &Timetable) -> ConstraintReport {
        self.evaluator.report(&self.catalog, timetable)
    }

    /// Denormalizes `timetable` into rows ready to persist.
    ///
    /// Names of records missing from the catalog render as empty strings.
    pub fn render(&self, timetable: &Timetable) -> Vec<ScheduledEntry> {
        timetable
            .iter()
            .map(|gene| {
                let slot = self.catalog.slot(gene.slot_id);
                ScheduledEntry {
                    class_id: gene.class_id,
                    class_name: self
                        .catalog
                        .class(gene.class_id)
                        .map(|c| c.name.clone())
                        .unwrap_or_default(),
                    course_id: gene.course_id,
                    course_name: self
                        .catalog
                        .course(gene.course_id)
                        .map(|c| c.name.clone())
                        .unwrap_or_default(),
                    lecturer_ids: gene.lecturer_ids.clone(),
                    lecturer_names: gene
                        .lecturer_ids
                        .iter()
                        .map(|&id| {
                            self.catalog
                                .lecturer(id)
                                .map(|l| l.name.clone())
                                .unwrap_or_default()
                        })
                        .collect(),
                    room_id: gene.room_id,
                    room_name: self
                        .catalog
                        .room(gene.room_id)
                        .map(|r| r.name.clone())
                        .unwrap_or_default(),
                    room_capacity: gene.room_capacity,
                    day: gene.day,
                    slot_id: gene.slot_id,
                    start_time: slot.map(|s| s.start.to_string()).unwrap_or_default(),
                    end_time: slot.map(|s| s.end.to_string()).unwrap_or_default(),
                    session_id: gene.session.map(|s| s.id),
                    session_type: gene.session.map(|s| s.session_type),
                }
            })
            .collect()
    }
}

impl GaProblem for TimetableProblem {
    type Individual = Timetable;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Timetable {
        self.builder().build(rng)
    }

    fn evaluate(&self, individual: &Timetable) -> f64 {
        self.fitness(individual)
    }

    fn crossover<R: Rng>(&self, parent1: &Timetable, parent2: &Timetable, rng: &mut R) -> Timetable {
        operators::crossover(&self.builder(), parent1, parent2, rng)
    }

    fn mutate<R: Rng>(&self, individual: &mut Timetable, rate: f64, rng: &mut R) {
        operators::mutate(&self.builder(), individual, rate, rng);
    }

    fn on_generation(&self, generation: usize, best_fitness: f64) {
        if self.cache_reset_interval > 0 && generation % self.cache_reset_interval == 0 {
            let (hits, misses) = self.evaluator.cache_stats();
            debug!(
                generation,
                best_fitness,
                entries = self.evaluator.cache_len(),
                hits,
                misses,
                "clearing fitness cache"
            );
            self.evaluator.clear_cache();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintKind;
    use crate::ga::Individual;
    use crate::models::{ClassGroup, Course, Day, Lecturer, Room, Session, SessionType, TimeSlot};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn slot(id: u32, start: &str, end: &str) -> TimeSlot {
        TimeSlot::new(id, start.parse().unwrap(), end.parse().unwrap())
    }

    fn catalog() -> Catalog {
        Catalog::new()
            .with_classes(vec![ClassGroup::new(1, "CS-1", 25).with_courses(vec![10])])
            .with_courses(vec![Course::new(10, "Algorithms").with_lecturers(vec![3])])
            .with_lecturers(vec![Lecturer::new(3, "Dr. Okafor")])
            .with_rooms(vec![Room::new(7, "A101", 30)])
            .with_days(&[Day::Wednesday])
            .with_time_slots(vec![slot(2, "09:30", "11:00")])
    }

    #[test]
    fn test_render_denormalizes() {
        let problem = TimetableProblem::standard(catalog()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let timetable = problem.create_individual(&mut rng);

        let rows = problem.render(&timetable);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.class_name, "CS-1");
        assert_eq!(row.course_name, "Algorithms");
        assert_eq!(row.lecturer_names, vec!["Dr. Okafor".to_string()]);
        assert_eq!(row.room_name, "A101");
        assert_eq!(row.room_capacity, 30);
        assert_eq!(row.day, Day::Wednesday);
        assert_eq!((row.start_time.as_str(), row.end_time.as_str()), ("09:30", "11:00"));
        assert_eq!(row.session_id, None);
    }

    #[test]
    fn test_variant_picks_constraints() {
        let standard = TimetableProblem::standard(catalog()).unwrap();
        assert_eq!(standard.variant(), Variant::Standard);
        assert!(!standard.constraints().contains(ConstraintKind::SessionViolation));

        let sessions = catalog().with_sessions(vec![Session::new(1, SessionType::Regular)]);
        let aware = TimetableProblem::session_aware(sessions).unwrap();
        assert!(aware.constraints().contains(ConstraintKind::CrossSessionConflict));
        assert_eq!(aware.plan().pairing(0).session.map(|s| s.id), Some(1));

        let custom = TimetableProblem::standard(catalog())
            .unwrap()
            .with_cache_key_mode(CacheKeyMode::Canonical)
            .with_constraints(ConstraintCatalog::standard().with_weight(ConstraintKind::RoomCapacity, 5));
        assert_eq!(custom.evaluator().key_mode(), CacheKeyMode::Canonical);
        assert_eq!(custom.constraints().weight(ConstraintKind::RoomCapacity), 5);
    }

    #[test]
    fn test_session_aware_requires_active_session() {
        assert!(TimetableProblem::session_aware(catalog()).is_err());
    }

    #[test]
    fn test_cache_reset_on_interval() {
        let problem = TimetableProblem::standard(catalog())
            .unwrap()
            .with_cache_reset_interval(3);
        let mut rng = StdRng::seed_from_u64(1);
        let mut t = problem.create_individual(&mut rng);
        t.set_fitness(problem.evaluate(&t));
        assert_eq!(problem.evaluator().cache_len(), 1);

        problem.on_generation(2, t.fitness());
        assert_eq!(problem.evaluator().cache_len(), 1);
        problem.on_generation(3, t.fitness());
        assert_eq!(problem.evaluator().cache_len(), 0);

        let never = TimetableProblem::standard(catalog())
            .unwrap()
            .with_cache_reset_interval(0);
        never.evaluate(&t);
        never.on_generation(20, 1.0);
        assert_eq!(never.evaluator().cache_len(), 1);
    }
}
