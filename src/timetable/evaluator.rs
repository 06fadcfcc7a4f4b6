//! Fitness evaluation against the constraint catalog.
//!
//! The evaluator is the authoritative scorer: every hard and soft rule
//! in its [`ConstraintCatalog`] is checked over the whole timetable and
//! summed into a penalty, mapped to fitness as `1 / (1 + penalty)`.
//!
//! Penalties are memoized by a 128-bit digest of the genes in a
//! concurrent map shared by parallel evaluations and cleared periodically
//! by the problem. A hit is not checked against the genes, so two
//! timetables with colliding digests would share a penalty.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::constraints::{fitness_from_penalty, ConstraintCatalog, ConstraintKind, ConstraintReport};
use crate::models::{
    Assignment, ClassId, Day, IndexedCatalog, LecturerId, RoomId, SessionType, SlotId,
    SlotPeriod, Timetable, TimeSlot,
};

/// How timetables are keyed in the fitness cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheKeyMode {
    /// Hash genes in order.
    #[default]
    Ordered,
    /// Hash the sorted per-gene hashes, so permuted gene lists share an entry.
    Canonical,
}

/// Scores timetables against a constraint catalog.
#[derive(Debug)]
pub struct FitnessEvaluator {
    constraints: ConstraintCatalog,
    key_mode: CacheKeyMode,
    cache: DashMap<u128, u64>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FitnessEvaluator {
    /// Creates an evaluator with an ordered cache key.
    pub fn new(constraints: ConstraintCatalog) -> Self {
        Self {
            constraints,
            key_mode: CacheKeyMode::default(),
            cache: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Sets the cache key mode.
    pub fn with_key_mode(mut self, mode: CacheKeyMode) -> Self {
        self.key_mode = mode;
        self
    }

    /// The rules being checked.
    pub fn constraints(&self) -> &ConstraintCatalog {
        &self.constraints
    }

    /// The cache key mode.
    pub fn key_mode(&self) -> CacheKeyMode {
        self.key_mode
    }

    /// Fitness in (0, 1]; memoized.
    pub fn fitness(&self, catalog: &IndexedCatalog, timetable: &Timetable) -> f64 {
        fitness_from_penalty(self.penalty(catalog, timetable))
    }

    /// Total penalty; memoized.
    pub fn penalty(&self, catalog: &IndexedCatalog, timetable: &Timetable) -> u64 {
        let key = self.cache_key(timetable);
        let cached = self.cache.get(&key).map(|entry| *entry);
        if let Some(penalty) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return penalty;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let penalty = self.report(catalog, timetable).total_penalty();
        self.cache.insert(key, penalty);
        penalty
    }

    /// Full per-constraint breakdown; never cached.
    pub fn report(&self, catalog: &IndexedCatalog, timetable: &Timetable) -> ConstraintReport {
        let mut report = ConstraintReport::default();
        let genes = &timetable.genes;

        self.score_double_bookings(genes, &mut report);
        for gene in genes {
            self.score_gene(catalog, gene, &mut report);
        }
        self.score_overloads(genes, &mut report);
        self.score_cross_session(catalog, genes, &mut report);

        report
    }

    /// Drops every memoized penalty.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of memoized penalties.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// `(hits, misses)` since construction.
    pub fn cache_stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    fn cache_key(&self, timetable: &Timetable) -> u128 {
        match self.key_mode {
            CacheKeyMode::Ordered => digest(&timetable.genes),
            CacheKeyMode::Canonical => {
                let mut parts: Vec<u128> = timetable.genes.iter().map(digest).collect();
                parts.sort_unstable();
                digest(&parts)
            }
        }
    }

    fn record(&self, report: &mut ConstraintReport, kind: ConstraintKind, units: u64) {
        if let Some(def) = self.constraints.get(kind) {
            report.record(def, units);
        }
    }

    /// Class, lecturer and room co-bookings at the same (day, slot),
    /// whatever the sessions involved. A group of `n` co-booked genes is
    /// `n - 1` units.
    fn score_double_bookings(&self, genes: &[Assignment], report: &mut ConstraintReport) {
        type Cell<K> = (Day, SlotId, K);

        let mut classes: HashMap<Cell<ClassId>, u64> = HashMap::new();
        let mut lecturers: HashMap<Cell<LecturerId>, u64> = HashMap::new();
        let mut rooms: HashMap<Cell<RoomId>, u64> = HashMap::new();

        for g in genes {
            *classes.entry((g.day, g.slot_id, g.class_id)).or_default() += 1;
            *rooms.entry((g.day, g.slot_id, g.room_id)).or_default() += 1;
            for &l in &g.lecturer_ids {
                *lecturers.entry((g.day, g.slot_id, l)).or_default() += 1;
            }
        }

        self.record(report, ConstraintKind::ClassConflict, excess(classes.values(), 1));
        self.record(report, ConstraintKind::LecturerConflict, excess(lecturers.values(), 1));
        self.record(report, ConstraintKind::RoomConflict, excess(rooms.values(), 1));
    }

    fn score_gene(&self, catalog: &IndexedCatalog, gene: &Assignment, report: &mut ConstraintReport) {
        use ConstraintKind::*;

        if gene.room_capacity < gene.class_size {
            self.record(report, RoomCapacity, 1);
        }

        let course = catalog.course(gene.course_id);
        let room = catalog.room(gene.room_id);
        let slot = catalog.slot(gene.slot_id);
        let session = gene.session_id().and_then(|id| catalog.session(id));

        if let (Some(course), Some(room)) = (course, room) {
            if let Some(required) = &course.required_room_type {
                if !required.eq_ignore_ascii_case(&room.room_type) {
                    self.record(report, RoomTypeMismatch, 1);
                }
            }
            if !course.preferred_room_types.is_empty()
                && !course
                    .preferred_room_types
                    .iter()
                    .any(|t| t.eq_ignore_ascii_case(&room.room_type))
            {
                self.record(report, RoomPreference, 1);
            }
        }

        if let Some(slot) = slot {
            let preferred: &[SlotPeriod] = match (course, session) {
                (Some(c), _) if !c.preferred_periods.is_empty() => &c.preferred_periods,
                (_, Some(s)) => &s.preferred_periods,
                _ => &[],
            };
            if !preferred.is_empty() && !preferred.contains(&slot.period()) {
                self.record(report, TimePreference, 1);
            }
        }

        let slot_invalid = match (slot, session) {
            (None, _) => true,
            (Some(slot), Some(session)) => !slot.admits(session),
            (Some(slot), None) => slot.is_break,
        };
        if slot_invalid {
            self.record(report, TimeSlotInvalid, 1);
        }

        let working_days = &catalog.catalog().working_days;
        let day_open = match session {
            Some(session) => working_days
                .iter()
                .any(|w| w.day == gene.day && w.admits(session)),
            None => working_days.iter().any(|w| w.day == gene.day && w.is_active),
        };
        if !day_open {
            self.record(report, WorkingDayViolation, 1);
        }

        if let Some(tag) = gene.session {
            let t = tag.session_type;
            let ineligible = [
                course.is_some_and(|c| !c.eligible_for(t)),
                catalog.class(gene.class_id).is_some_and(|c| !c.participates_in(t)),
                room.is_some_and(|r| !r.available_for(t)),
            ];
            let units = ineligible.iter().filter(|&&bad| bad).count() as u64;
            self.record(report, SessionViolation, units);
        }
    }

    fn score_overloads(&self, genes: &[Assignment], report: &mut ConstraintReport) {
        use ConstraintKind::*;

        if self.constraints.contains(DailyOverload) {
            let mut per_day: HashMap<(ClassId, Day), u64> = HashMap::new();
            for g in genes {
                *per_day.entry((g.class_id, g.day)).or_default() += 1;
            }
            let threshold = u64::from(self.constraints.threshold(DailyOverload));
            self.record(report, DailyOverload, excess(per_day.values(), threshold));
        }

        if self.constraints.contains(LecturerWorkload) {
            let mut per_day: HashMap<(LecturerId, Day), u64> = HashMap::new();
            for g in genes {
                for &l in &g.lecturer_ids {
                    *per_day.entry((l, g.day)).or_default() += 1;
                }
            }
            let threshold = u64::from(self.constraints.threshold(LecturerWorkload));
            self.record(report, LecturerWorkload, excess(per_day.values(), threshold));
        }

        if self.constraints.contains(LecturerSessionOverload) {
            let mut types: HashMap<LecturerId, BTreeSet<SessionType>> = HashMap::new();
            for g in genes {
                if let Some(tag) = g.session {
                    for &l in &g.lecturer_ids {
                        types.entry(l).or_default().insert(tag.session_type);
                    }
                }
            }
            let threshold = u64::from(self.constraints.threshold(LecturerSessionOverload));
            let units = types
                .values()
                .map(|set| (set.len() as u64).saturating_sub(threshold))
                .sum();
            self.record(report, LecturerSessionOverload, units);
        }
    }

    /// Pairs of genes from different sessions that share a class, room or
    /// lecturer at overlapping times on the same day. One unit per pair.
    fn score_cross_session(
        &self,
        catalog: &IndexedCatalog,
        genes: &[Assignment],
        report: &mut ConstraintReport,
    ) {
        if !self.constraints.contains(ConstraintKind::CrossSessionConflict) {
            return;
        }

        let slots: Vec<Option<&TimeSlot>> = genes.iter().map(|g| catalog.slot(g.slot_id)).collect();
        let mut units = 0u64;
        for (i, a) in genes.iter().enumerate() {
            for (j, b) in genes.iter().enumerate().skip(i + 1) {
                if a.session_id() == b.session_id() || a.day != b.day {
                    continue;
                }
                let overlapping = a.slot_id == b.slot_id
                    || matches!((slots[i], slots[j]), (Some(x), Some(y)) if x.overlaps(y));
                if overlapping && a.shares_resource(b) {
                    units += 1;
                }
            }
        }
        self.record(report, ConstraintKind::CrossSessionConflict, units);
    }
}

/// Two independent 64-bit SipHash digests of `value`.
fn digest<T: Hash + ?Sized>(value: &T) -> u128 {
    let mut low = DefaultHasher::new();
    value.hash(&mut low);
    let mut high = DefaultHasher::new();
    0x5eed_u16.hash(&mut high);
    value.hash(&mut high);
    (u128::from(high.finish()) << 64) | u128::from(low.finish())
}

/// Sum of `count - allowed` over counts above `allowed`.
fn excess<'a>(counts: impl Iterator<Item = &'a u64>, allowed: u64) -> u64 {
    counts.map(|&n| n.saturating_sub(allowed)).sum()
}
