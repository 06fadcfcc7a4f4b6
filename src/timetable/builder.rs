//! Candidate assignment builder.
//!
//! Proposes (day, slot, room) placements for a pairing by random draws
//! from its legal domain, steering away from bookings already recorded in
//! a [`ConflictIndex`]. Construction always terminates: once the retry
//! budget is spent the last draw is returned, flagged as conflicting.

use rand::Rng;
use tracing::debug;

use super::conflict_index::ConflictIndex;
use super::partition::SchedulingPlan;
use crate::models::{Assignment, IndexedCatalog, Timetable};

/// Draws tried per gene when seeding the population.
pub const CONSTRUCTION_RETRIES: usize = 50;
/// Re-placements tried when a crossover gene collides with the child.
pub const REPAIR_RETRIES: usize = 20;
/// Reassignments tried per mutated gene before falling back to a random one.
pub const MUTATION_RETRIES: usize = 10;

/// Outcome of a placement attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Free of class, lecturer and room clashes with the index.
    Placed(Assignment),
    /// Retry budget exhausted; the gene clashes and the evaluator will
    /// penalize it.
    PlacedWithKnownConflict(Assignment),
}

impl Placement {
    /// The placed gene.
    pub fn assignment(&self) -> &Assignment {
        match self {
            Placement::Placed(a) | Placement::PlacedWithKnownConflict(a) => a,
        }
    }

    /// Consumes the placement, returning the gene.
    pub fn into_assignment(self) -> Assignment {
        match self {
            Placement::Placed(a) | Placement::PlacedWithKnownConflict(a) => a,
        }
    }

    /// Whether the placement avoided every known clash.
    pub fn is_conflict_free(&self) -> bool {
        matches!(self, Placement::Placed(_))
    }
}

/// Builds genes and whole timetables for a fixed plan.
#[derive(Debug, Clone, Copy)]
pub struct CandidateBuilder<'a> {
    catalog: &'a IndexedCatalog,
    plan: &'a SchedulingPlan,
}

impl<'a> CandidateBuilder<'a> {
    /// Creates a builder over `plan`.
    pub fn new(catalog: &'a IndexedCatalog, plan: &'a SchedulingPlan) -> Self {
        Self { catalog, plan }
    }

    /// The plan genes are built for.
    pub fn plan(&self) -> &'a SchedulingPlan {
        self.plan
    }

    /// A uniformly random placement of pairing `idx` within its domain.
    pub fn random<R: Rng>(&self, idx: usize, rng: &mut R) -> Assignment {
        let pairing = self.plan.pairing(idx);
        let domain = self.plan.domain_of(idx);

        let day = domain.days[rng.random_range(0..domain.days.len())];
        let slot_id = domain.slots[rng.random_range(0..domain.slots.len())];
        let room_id = domain.rooms[rng.random_range(0..domain.rooms.len())];

        Assignment {
            class_id: pairing.class_id,
            course_id: pairing.course_id,
            lecturer_ids: pairing.lecturer_ids.clone(),
            room_id,
            day,
            slot_id,
            room_capacity: self.catalog.room(room_id).map_or(0, |r| r.capacity),
            class_size: pairing.class_size,
            session: pairing.session,
        }
    }

    /// Tries up to `retries` draws for pairing `idx` that `index` reports
    /// as free.
    pub fn propose<R: Rng>(
        &self,
        idx: usize,
        index: &ConflictIndex,
        retries: usize,
        rng: &mut R,
    ) -> Placement {
        let mut candidate = self.random(idx, rng);
        for _ in 1..retries {
            if !index.conflicts(&candidate) {
                return Placement::Placed(candidate);
            }
            candidate = self.random(idx, rng);
        }
        if index.conflicts(&candidate) {
            Placement::PlacedWithKnownConflict(candidate)
        } else {
            Placement::Placed(candidate)
        }
    }

    /// A complete timetable, one gene per pairing.
    ///
    /// Session groups are built one after another against a shared index,
    /// then merged back into gene order.
    pub fn build<R: Rng>(&self, rng: &mut R) -> Timetable {
        let mut index = ConflictIndex::new();
        let mut genes: Vec<Option<Assignment>> = vec![None; self.plan.len()];
        let mut clashes = 0usize;

        for group in self.plan.groups() {
            for &idx in &group.pairings {
                let placement = self.propose(idx, &index, CONSTRUCTION_RETRIES, rng);
                if !placement.is_conflict_free() {
                    clashes += 1;
                }
                let gene = placement.into_assignment();
                index.mark(&gene);
                genes[idx] = Some(gene);
            }
        }

        if clashes > 0 {
            debug!(clashes, "seeded timetable with known conflicts");
        }

        Timetable::new(
            genes
                .into_iter()
                .enumerate()
                .map(|(idx, gene)| gene.unwrap_or_else(|| self.random(idx, rng)))
                .collect(),
        )
    }
}
