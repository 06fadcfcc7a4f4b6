//! Timetabling domain models.
//!
//! # Input records
//! - [`ClassGroup`], [`Course`], [`Room`], [`Lecturer`]
//! - [`TimeSlot`], [`WorkingDay`], [`Session`], gathered in a [`Catalog`]
//!
//! # GA representation
//! - [`Assignment`]: one gene, a (class, course) bound to (day, slot, room)
//! - [`Timetable`]: one chromosome, an assignment per pairing
//!
//! # Output
//! - [`ScheduledEntry`]: denormalized row for persistence

mod assignment;
mod calendar;
mod catalog;
mod resources;
mod session;

pub use assignment::{Assignment, ScheduledEntry, SessionTag, Timetable};
pub use calendar::{Day, SlotPeriod, TimeOfDay, TimeSlot, WorkingDay};
pub use catalog::{Catalog, IndexedCatalog};
pub use resources::{ClassGroup, Course, Lecturer, Room};
pub use session::{Session, SessionType};

/// Class identifier.
pub type ClassId = u32;
/// Course identifier.
pub type CourseId = u32;
/// Lecturer identifier.
pub type LecturerId = u32;
/// Room identifier.
pub type RoomId = u32;
/// Time slot identifier.
pub type SlotId = u32;
/// Session identifier.
pub type SessionId = u32;
