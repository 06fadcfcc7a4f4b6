//! Input records: classes, courses, rooms and lecturers.
//!
//! Records arrive from the persistence layer already loaded into memory.
//! JSON-encoded session lists are parsed once here, at load time.

use serde::{Deserialize, Serialize};

use super::calendar::SlotPeriod;
use super::session::{list_admits, SessionType};
use super::{ClassId, CourseId, LecturerId, RoomId};
use crate::error::Result;

/// A cohort of students taught together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassGroup {
    /// Class id.
    pub id: ClassId,
    /// Display name.
    pub name: String,
    /// Number of students.
    pub student_count: u32,
    /// Courses this class must be scheduled for, one assignment each.
    #[serde(default)]
    pub course_ids: Vec<CourseId>,
    /// Session types the class takes part in; empty means regular only.
    #[serde(default)]
    pub session_types: Vec<SessionType>,
}

impl ClassGroup {
    /// A class with no courses yet.
    pub fn new(id: ClassId, name: impl Into<String>, student_count: u32) -> Self {
        Self {
            id,
            name: name.into(),
            student_count,
            course_ids: Vec::new(),
            session_types: Vec::new(),
        }
    }

    /// Sets the courses the class takes.
    pub fn with_courses(mut self, course_ids: Vec<CourseId>) -> Self {
        self.course_ids = course_ids;
        self
    }

    /// Sets the session types the class takes part in.
    pub fn with_session_types(mut self, types: Vec<SessionType>) -> Self {
        self.session_types = types;
        self
    }

    /// Whether the class takes part in sessions of type `t`.
    pub fn participates_in(&self, t: SessionType) -> bool {
        list_admits(&self.session_types, t)
    }
}

/// A course taught to one or more classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course id.
    pub id: CourseId,
    /// Display name.
    pub name: String,
    /// Lecturers teaching the course.
    #[serde(default)]
    pub lecturer_ids: Vec<LecturerId>,
    /// Room type the course cannot do without (e.g. `"lab"`).
    #[serde(default)]
    pub required_room_type: Option<String>,
    /// Room types the course prefers; empty means no preference.
    #[serde(default)]
    pub preferred_room_types: Vec<String>,
    /// Parts of the day the course prefers; empty means no preference.
    #[serde(default)]
    pub preferred_periods: Vec<SlotPeriod>,
    /// Session types the course may be delivered in; empty means regular.
    #[serde(default)]
    pub session_types: Vec<SessionType>,
    /// Shortest slot, in minutes, the course fits in.
    #[serde(default)]
    pub min_duration_minutes: Option<u16>,
}

impl Course {
    /// A course with no lecturers or preferences.
    pub fn new(id: CourseId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            lecturer_ids: Vec::new(),
            required_room_type: None,
            preferred_room_types: Vec::new(),
            preferred_periods: Vec::new(),
            session_types: Vec::new(),
            min_duration_minutes: None,
        }
    }

    /// Sets the teaching lecturers.
    pub fn with_lecturers(mut self, ids: Vec<LecturerId>) -> Self {
        self.lecturer_ids = ids;
        self
    }

    /// Requires a room of the given type.
    pub fn with_required_room_type(mut self, room_type: impl Into<String>) -> Self {
        self.required_room_type = Some(room_type.into());
        self
    }

    /// Sets preferred room types.
    pub fn with_preferred_room_types(mut self, types: Vec<String>) -> Self {
        self.preferred_room_types = types;
        self
    }

    /// Sets preferred parts of the day.
    pub fn with_preferred_periods(mut self, periods: Vec<SlotPeriod>) -> Self {
        self.preferred_periods = periods;
        self
    }

    /// Sets the session types the course may be delivered in.
    pub fn with_session_types(mut self, types: Vec<SessionType>) -> Self {
        self.session_types = types;
        self
    }

    /// Sets session affinity from its stored JSON form.
    pub fn with_session_types_json(mut self, json: &str) -> Result<Self> {
        self.session_types = SessionType::parse_list(json, "course.session_types")?;
        Ok(self)
    }

    /// Sets the minimum slot length hint.
    pub fn with_min_duration(mut self, minutes: u16) -> Self {
        self.min_duration_minutes = Some(minutes);
        self
    }

    /// Whether the course may be delivered in sessions of type `t`.
    pub fn eligible_for(&self, t: SessionType) -> bool {
        list_admits(&self.session_types, t)
    }
}

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Room id.
    pub id: RoomId,
    /// Display name.
    pub name: String,
    /// Seats.
    pub capacity: u32,
    /// Room type (e.g. `"lecture"`, `"lab"`).
    #[serde(default)]
    pub room_type: String,
    /// Session types the room is open to; `None` or empty means all.
    #[serde(default)]
    pub session_availability: Option<Vec<SessionType>>,
}

impl Room {
    /// A room open to every session.
    pub fn new(id: RoomId, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
            room_type: String::new(),
            session_availability: None,
        }
    }

    /// Sets the room type.
    pub fn with_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = room_type.into();
        self
    }

    /// Restricts the room to the given session types.
    pub fn with_session_availability(mut self, types: Vec<SessionType>) -> Self {
        self.session_availability = Some(types);
        self
    }

    /// Sets session availability from its stored JSON form.
    pub fn with_session_availability_json(mut self, json: &str) -> Result<Self> {
        let types = SessionType::parse_list(json, "room.session_availability")?;
        self.session_availability = (!types.is_empty()).then_some(types);
        Ok(self)
    }

    /// Whether the room may be used by sessions of type `t`.
    pub fn available_for(&self, t: SessionType) -> bool {
        self.session_availability
            .as_ref()
            .map_or(true, |types| types.is_empty() || types.contains(&t))
    }
}

/// A member of teaching staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecturer {
    /// Lecturer id.
    pub id: LecturerId,
    /// Display name.
    pub name: String,
}

impl Lecturer {
    /// Creates a lecturer.
    pub fn new(id: LecturerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
