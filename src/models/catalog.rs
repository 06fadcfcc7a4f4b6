//! The input catalog handed over by the persistence layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::calendar::{Day, TimeSlot, WorkingDay};
use super::resources::{ClassGroup, Course, Lecturer, Room};
use super::session::Session;
use super::{ClassId, CourseId, LecturerId, RoomId, SessionId, SlotId};
use crate::error::Result;
use crate::validation;

/// Every record the engine schedules against.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Catalog, ClassGroup, Course, Day, Room, TimeSlot};
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
/// assert_eq!(catalog.pairing_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Classes to schedule.
    pub classes: Vec<ClassGroup>,
    /// Courses taught.
    pub courses: Vec<Course>,
    /// Bookable rooms.
    pub rooms: Vec<Room>,
    /// Teaching staff.
    pub lecturers: Vec<Lecturer>,
    /// Bookable time slots.
    pub time_slots: Vec<TimeSlot>,
    /// Teaching days.
    pub working_days: Vec<WorkingDay>,
    /// Academic sessions (session-aware variant).
    pub sessions: Vec<Session>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the classes.
    pub fn with_classes(mut self, classes: Vec<ClassGroup>) -> Self {
        self.classes = classes;
        self
    }

    /// Sets the courses.
    pub fn with_courses(mut self, courses: Vec<Course>) -> Self {
        self.courses = courses;
        self
    }

    /// Sets the rooms.
    pub fn with_rooms(mut self, rooms: Vec<Room>) -> Self {
        self.rooms = rooms;
        self
    }

    /// Sets the lecturers.
    pub fn with_lecturers(mut self, lecturers: Vec<Lecturer>) -> Self {
        self.lecturers = lecturers;
        self
    }

    /// Sets the time slots.
    pub fn with_time_slots(mut self, slots: Vec<TimeSlot>) -> Self {
        self.time_slots = slots;
        self
    }

    /// Sets the working days.
    pub fn with_working_days(mut self, days: Vec<WorkingDay>) -> Self {
        self.working_days = days;
        self
    }

    /// Sets working days open to every session.
    pub fn with_days(self, days: &[Day]) -> Self {
        self.with_working_days(days.iter().copied().map(WorkingDay::new).collect())
    }

    /// Sets the sessions.
    pub fn with_sessions(mut self, sessions: Vec<Session>) -> Self {
        self.sessions = sessions;
        self
    }

    /// Number of (class, course) pairings to schedule.
    pub fn pairing_count(&self) -> usize {
        self.classes.iter().map(|c| c.course_ids.len()).sum()
    }
}

/// A validated catalog with id lookups.
///
/// Built once per engine; every lookup the builder and evaluator make goes
/// through here.
#[derive(Debug, Clone)]
pub struct IndexedCatalog {
    catalog: Catalog,
    classes: HashMap<ClassId, usize>,
    courses: HashMap<CourseId, usize>,
    rooms: HashMap<RoomId, usize>,
    lecturers: HashMap<LecturerId, usize>,
    slots: HashMap<SlotId, usize>,
    sessions: HashMap<SessionId, usize>,
}

impl IndexedCatalog {
    /// Validates the catalog and builds the lookups.
    ///
    /// `session_aware` additionally requires an active session and checks
    /// session references.
    pub fn new(catalog: Catalog, session_aware: bool) -> Result<Self> {
        validation::validate_catalog(&catalog, session_aware)?;

        Ok(Self {
            classes: positions(catalog.classes.iter().map(|c| c.id)),
            courses: positions(catalog.courses.iter().map(|c| c.id)),
            rooms: positions(catalog.rooms.iter().map(|r| r.id)),
            lecturers: positions(catalog.lecturers.iter().map(|l| l.id)),
            slots: positions(catalog.time_slots.iter().map(|s| s.id)),
            sessions: positions(catalog.sessions.iter().map(|s| s.id)),
            catalog,
        })
    }

    /// The underlying records.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Looks up a class by id.
    pub fn class(&self, id: ClassId) -> Option<&ClassGroup> {
        self.classes.get(&id).map(|&i| &self.catalog.classes[i])
    }

    /// Looks up a course by id.
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(&id).map(|&i| &self.catalog.courses[i])
    }

    /// Looks up a room by id.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id).map(|&i| &self.catalog.rooms[i])
    }

    /// Looks up a lecturer by id.
    pub fn lecturer(&self, id: LecturerId) -> Option<&Lecturer> {
        self.lecturers.get(&id).map(|&i| &self.catalog.lecturers[i])
    }

    /// Looks up a time slot by id.
    pub fn slot(&self, id: SlotId) -> Option<&TimeSlot> {
        self.slots.get(&id).map(|&i| &self.catalog.time_slots[i])
    }

    /// Looks up a session by id.
    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id).map(|&i| &self.catalog.sessions[i])
    }
}

fn positions(ids: impl Iterator<Item = u32>) -> HashMap<u32, usize> {
    ids.enumerate().map(|(i, id)| (id, i)).collect()
}
