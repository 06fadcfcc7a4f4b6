//! Genes, chromosomes and the denormalized output record.

use serde::{Deserialize, Serialize};

use super::calendar::Day;
use super::session::SessionType;
use super::{ClassId, CourseId, LecturerId, RoomId, SessionId, SlotId};
use crate::ga::Individual;

/// Session a gene is scheduled under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionTag {
    /// Session id.
    pub id: SessionId,
    /// Session delivery mode.
    pub session_type: SessionType,
}

/// One scheduled teaching occurrence (a gene).
///
/// Carries the class size and room capacity so capacity checks need no
/// catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// Class being taught.
    pub class_id: ClassId,
    /// Course being taught.
    pub course_id: CourseId,
    /// Lecturers teaching this occurrence.
    pub lecturer_ids: Vec<LecturerId>,
    /// Room booked.
    pub room_id: RoomId,
    /// Day booked.
    pub day: Day,
    /// Time slot booked.
    pub slot_id: SlotId,
    /// Seats in the booked room.
    pub room_capacity: u32,
    /// Students in the class.
    pub class_size: u32,
    /// Session the occurrence belongs to (session-aware variant only).
    pub session: Option<SessionTag>,
}

impl Assignment {
    /// Whether both genes book the same (day, slot).
    pub fn same_period(&self, other: &Assignment) -> bool {
        self.day == other.day && self.slot_id == other.slot_id
    }

    /// Whether both genes involve the same class, room or any lecturer.
    pub fn shares_resource(&self, other: &Assignment) -> bool {
        self.class_id == other.class_id
            || self.room_id == other.room_id
            || self
                .lecturer_ids
                .iter()
                .any(|l| other.lecturer_ids.contains(l))
    }

    /// Whether the two genes double-book something at the same (day, slot).
    pub fn collides_with(&self, other: &Assignment) -> bool {
        self.same_period(other) && self.shares_resource(other)
    }

    /// Session id, if scheduled under one.
    pub fn session_id(&self) -> Option<SessionId> {
        self.session.map(|s| s.id)
    }
}

/// A complete candidate schedule (a chromosome).
///
/// Gene `i` always schedules the `i`-th (class, course) pairing, so the
/// length is fixed for the lifetime of an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// One assignment per pairing, in pairing order.
    pub genes: Vec<Assignment>,
    /// Fitness in (0, 1]; `0.0` until evaluated.
    #[serde(default)]
    pub fitness: f64,
}

impl Timetable {
    /// Wraps genes as an unevaluated timetable.
    pub fn new(genes: Vec<Assignment>) -> Self {
        Self { genes, fitness: 0.0 }
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the timetable has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Iterates over the genes.
    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.genes.iter()
    }
}

impl Individual for Timetable {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl<'a> IntoIterator for &'a Timetable {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.genes.iter()
    }
}

/// Denormalized output row, ready to persist without further joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEntry {
    /// Class id.
    pub class_id: ClassId,
    /// Class display name.
    pub class_name: String,
    /// Course id.
    pub course_id: CourseId,
    /// Course display name.
    pub course_name: String,
    /// Lecturer ids.
    pub lecturer_ids: Vec<LecturerId>,
    /// Lecturer names, parallel to `lecturer_ids`.
    pub lecturer_names: Vec<String>,
    /// Room id.
    pub room_id: RoomId,
    /// Room display name.
    pub room_name: String,
    /// Room capacity.
    pub room_capacity: u32,
    /// Day.
    pub day: Day,
    /// Time slot id.
    pub slot_id: SlotId,
    /// Start time as `HH:MM`.
    pub start_time: String,
    /// End time as `HH:MM`.
    pub end_time: String,
    /// Session id, when scheduled under a session.
    pub session_id: Option<SessionId>,
    /// Session type, when scheduled under a session.
    pub session_type: Option<SessionType>,
}
