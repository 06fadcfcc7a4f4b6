//! Conflict-aware crossover and targeted mutation.
//!
//! Both operators preserve the gene layout: position `i` always holds the
//! `i`-th pairing, so children are structurally complete timetables.

use rand::Rng;
use tracing::debug;

use super::builder::{CandidateBuilder, Placement, MUTATION_RETRIES, REPAIR_RETRIES};
use super::conflict_index::ConflictIndex;
use crate::models::{Assignment, Timetable};

/// Local conflict counting stops here.
pub const LOCAL_CONFLICT_CAP: usize = 10;

/// Number of genes other than `idx` that `candidate` would collide with,
/// capped at [`LOCAL_CONFLICT_CAP`].
pub fn local_conflicts(genes: &[Assignment], idx: usize, candidate: &Assignment) -> usize {
    genes
        .iter()
        .enumerate()
        .filter(|&(j, other)| j != idx && candidate.collides_with(other))
        .take(LOCAL_CONFLICT_CAP)
        .count()
}

/// Single-point crossover with repair.
///
/// The child takes genes `[0, k)` from `p1` and `[k, len)` from `p2`. A
/// gene from `p2` that collides with the child so far is re-placed; if no
/// free placement turns up, `p1`'s gene at that position is used instead.
///
/// # Panics
///
/// If a parent has more genes than `builder`'s plan has pairings.
pub fn crossover<R: Rng>(
    builder: &CandidateBuilder<'_>,
    p1: &Timetable,
    p2: &Timetable,
    rng: &mut R,
) -> Timetable {
    debug_assert_eq!(p1.len(), builder.plan().len(), "first parent does not match the plan");
    debug_assert_eq!(p2.len(), builder.plan().len(), "second parent does not match the plan");
    let len = p1.len().min(p2.len());
    if len == 0 {
        return Timetable::new(p1.genes.clone());
    }

    let cut = rng.random_range(0..len);
    let mut genes: Vec<Assignment> = Vec::with_capacity(len);
    genes.extend_from_slice(&p1.genes[..cut]);
    let mut index = ConflictIndex::from_assignments(&genes);
    let mut fallbacks = 0usize;

    for i in cut..len {
        let incoming = &p2.genes[i];
        let gene = if !index.conflicts(incoming) {
            incoming.clone()
        } else {
            match builder.propose(i, &index, REPAIR_RETRIES, rng) {
                Placement::Placed(repaired) => repaired,
                Placement::PlacedWithKnownConflict(_) => {
                    fallbacks += 1;
                    p1.genes[i].clone()
                }
            }
        };
        index.mark(&gene);
        genes.push(gene);
    }

    if fallbacks > 0 {
        debug!(cut, fallbacks, "crossover repair fell back to first parent");
    }
    Timetable::new(genes)
}

/// Per-gene mutation at probability `rate`.
///
/// A mutated gene takes the first of up to [`MUTATION_RETRIES`] random
/// reassignments that strictly lowers its local conflict count, or else
/// one unconditional random reassignment.
///
/// # Panics
///
/// If `timetable` has more genes than `builder`'s plan has pairings.
pub fn mutate<R: Rng>(builder: &CandidateBuilder<'_>, timetable: &mut Timetable, rate: f64, rng: &mut R) {
    debug_assert_eq!(timetable.len(), builder.plan().len(), "timetable does not match the plan");
    let rate = rate.clamp(0.0, 1.0);
    if rate == 0.0 {
        return;
    }

    for i in 0..timetable.genes.len() {
        if !rng.random_bool(rate) {
            continue;
        }
        let genes = &timetable.genes;
        let current = local_conflicts(genes, i, &genes[i]);

        let mut improved = None;
        for _ in 0..MUTATION_RETRIES {
            let candidate = builder.random(i, rng);
            if local_conflicts(genes, i, &candidate) < current {
                improved = Some(candidate);
                break;
            }
        }

        let replacement = match improved {
            Some(gene) => gene,
            None => builder.random(i, rng),
        };
        timetable.genes[i] = replacement;
    }
}
