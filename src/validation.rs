//! Catalog integrity checks run before an engine is built.
//!
//! Detects, in order:
//! - Duplicate ids within each record kind
//! - Catalogs that cannot yield any assignment (no rooms, no teachable
//!   slots, no active working days, no active sessions when session-aware)
//! - Nothing to schedule (no class declares a course)
//! - Class → course and course → lecturer references to unknown ids
//! - Slot / working-day references to unknown sessions (session-aware only)
//!
//! The first problem found is returned; evolution never starts on a
//! catalog that fails these checks.

use std::collections::HashSet;

use crate::error::{Result, TimetableError};
use crate::models::Catalog;

/// Validates `catalog` for scheduling.
pub fn validate_catalog(catalog: &Catalog, session_aware: bool) -> Result<()> {
    unique("class", catalog.classes.iter().map(|c| c.id))?;
    unique("course", catalog.courses.iter().map(|c| c.id))?;
    unique("room", catalog.rooms.iter().map(|r| r.id))?;
    unique("lecturer", catalog.lecturers.iter().map(|l| l.id))?;
    unique("time slot", catalog.time_slots.iter().map(|s| s.id))?;
    unique("session", catalog.sessions.iter().map(|s| s.id))?;

    if catalog.rooms.is_empty() {
        return Err(TimetableError::EmptyCatalog("rooms"));
    }
    if !catalog.time_slots.iter().any(|s| !s.is_break) {
        return Err(TimetableError::EmptyCatalog("time slots"));
    }
    if !catalog.working_days.iter().any(|d| d.is_active) {
        return Err(TimetableError::EmptyCatalog("working days"));
    }
    if session_aware && !catalog.sessions.iter().any(|s| s.is_active) {
        return Err(TimetableError::EmptyCatalog("active sessions"));
    }
    if catalog.pairing_count() == 0 {
        return Err(TimetableError::NoPairings);
    }

    let courses: HashSet<u32> = catalog.courses.iter().map(|c| c.id).collect();
    for class in &catalog.classes {
        if let Some(&id) = class.course_ids.iter().find(|id| !courses.contains(id)) {
            return Err(TimetableError::UnknownReference {
                kind: "course",
                id,
                referenced_by: format!("class {}", class.id),
            });
        }
    }

    let lecturers: HashSet<u32> = catalog.lecturers.iter().map(|l| l.id).collect();
    for course in &catalog.courses {
        if let Some(&id) = course.lecturer_ids.iter().find(|id| !lecturers.contains(id)) {
            return Err(TimetableError::UnknownReference {
                kind: "lecturer",
                id,
                referenced_by: format!("course {}", course.id),
            });
        }
    }

    if session_aware {
        let sessions: HashSet<u32> = catalog.sessions.iter().map(|s| s.id).collect();
        for slot in &catalog.time_slots {
            if let Some(id) = slot.session_id.filter(|id| !sessions.contains(id)) {
                return Err(TimetableError::UnknownReference {
                    kind: "session",
                    id,
                    referenced_by: format!("time slot {}", slot.id),
                });
            }
        }
        for day in &catalog.working_days {
            if let Some(id) = day.session_id.filter(|id| !sessions.contains(id)) {
                return Err(TimetableError::UnknownReference {
                    kind: "session",
                    id,
                    referenced_by: format!("working day {}", day.day),
                });
            }
        }
    }

    Ok(())
}

fn unique(kind: &'static str, ids: impl Iterator<Item = u32>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(TimetableError::DuplicateId { kind, id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ClassGroup, Course, Day, Lecturer, Room, Session, SessionType, TimeSlot, WorkingDay,
    };

    fn slot(id: u32) -> TimeSlot {
        TimeSlot::new(id, "08:00".parse().unwrap(), "09:00".parse().unwrap())
    }

    fn valid() -> Catalog {
        Catalog::new()
            .with_classes(vec![ClassGroup::new(1, "A", 20).with_courses(vec![10])])
            .with_courses(vec![Course::new(10, "Maths").with_lecturers(vec![5])])
            .with_lecturers(vec![Lecturer::new(5, "Dr. Ade")])
            .with_rooms(vec![Room::new(1, "R1", 30)])
            .with_days(&[Day::Monday])
            .with_time_slots(vec![slot(1)])
    }

    #[test]
    fn test_valid_catalog() {
        assert!(validate_catalog(&valid(), false).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let mut catalog = valid();
        catalog.rooms.push(Room::new(1, "R1 again", 10));
        assert!(matches!(
            validate_catalog(&catalog, false),
            Err(TimetableError::DuplicateId { kind: "room", id: 1 })
        ));
    }

    #[test]
    fn test_empty_catalogs() {
        let no_rooms = valid().with_rooms(vec![]);
        assert!(matches!(
            validate_catalog(&no_rooms, false),
            Err(TimetableError::EmptyCatalog("rooms"))
        ));

        let only_breaks = valid().with_time_slots(vec![slot(1).as_break()]);
        assert!(matches!(
            validate_catalog(&only_breaks, false),
            Err(TimetableError::EmptyCatalog("time slots"))
        ));

        let closed = valid().with_working_days(vec![WorkingDay {
            is_active: false,
            ..WorkingDay::new(Day::Monday)
        }]);
        assert!(matches!(
            validate_catalog(&closed, false),
            Err(TimetableError::EmptyCatalog("working days"))
        ));

        assert!(matches!(
            validate_catalog(&valid(), true),
            Err(TimetableError::EmptyCatalog("active sessions"))
        ));
    }

    #[test]
    fn test_no_pairings() {
        let catalog = valid().with_classes(vec![ClassGroup::new(1, "A", 20)]);
        assert!(matches!(
            validate_catalog(&catalog, false),
            Err(TimetableError::NoPairings)
        ));
    }

    #[test]
    fn test_unknown_references() {
        let catalog = valid().with_classes(vec![ClassGroup::new(1, "A", 20).with_courses(vec![99])]);
        assert!(matches!(
            validate_catalog(&catalog, false),
            Err(TimetableError::UnknownReference { kind: "course", id: 99, .. })
        ));

        let catalog = valid().with_lecturers(vec![]);
        assert!(matches!(
            validate_catalog(&catalog, false),
            Err(TimetableError::UnknownReference { kind: "lecturer", id: 5, .. })
        ));

        let catalog = valid()
            .with_sessions(vec![Session::new(1, SessionType::Regular)])
            .with_time_slots(vec![slot(1).with_session(4)]);
        assert!(validate_catalog(&catalog, false).is_ok());
        assert!(matches!(
            validate_catalog(&catalog, true),
            Err(TimetableError::UnknownReference { kind: "session", id: 4, .. })
        ));
    }
}
