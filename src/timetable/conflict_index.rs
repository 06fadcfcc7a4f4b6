//! Construction-time occupancy index.
//!
//! Tracks which classes, lecturers and rooms are already booked at each
//! (day, slot). Used to cheaply steer construction and repair away from
//! double-bookings; authoritative scoring happens in the evaluator.

use std::collections::{HashMap, HashSet};

use crate::models::{Assignment, ClassId, Day, LecturerId, RoomId, SlotId};

#[derive(Debug, Clone, Default)]
struct Occupancy {
    classes: HashSet<ClassId>,
    lecturers: HashSet<LecturerId>,
    rooms: HashSet<RoomId>,
}

/// Ephemeral `(day, slot) → occupied ids` lookup.
#[derive(Debug, Clone, Default)]
pub struct ConflictIndex {
    cells: HashMap<(Day, SlotId), Occupancy>,
}

impl ConflictIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// An index with every given assignment marked.
    pub fn from_assignments<'a>(assignments: impl IntoIterator<Item = &'a Assignment>) -> Self {
        let mut index = Self::new();
        for a in assignments {
            index.mark(a);
        }
        index
    }

    /// Records the class, lecturers and room of `a` as busy at its (day, slot).
    pub fn mark(&mut self, a: &Assignment) {
        let cell = self.cells.entry((a.day, a.slot_id)).or_default();
        cell.classes.insert(a.class_id);
        cell.lecturers.extend(a.lecturer_ids.iter().copied());
        cell.rooms.insert(a.room_id);
    }

    /// Whether `candidate` would double-book its class, a lecturer or its room.
    pub fn conflicts(&self, candidate: &Assignment) -> bool {
        self.cells
            .get(&(candidate.day, candidate.slot_id))
            .is_some_and(|cell| {
                cell.classes.contains(&candidate.class_id)
                    || cell.rooms.contains(&candidate.room_id)
                    || candidate
                        .lecturer_ids
                        .iter()
                        .any(|l| cell.lecturers.contains(l))
            })
    }

    /// Forgets all occupancy.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Number of (day, slot) cells with any booking.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}
