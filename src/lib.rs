//! Course timetabling by genetic-algorithm search.
//!
//! Assigns every (class, course) pairing a (day, time slot, room) so that
//! no class, lecturer or room is double-booked, while honouring secondary
//! preferences such as workload balance, room suitability and preferred
//! times of day.
//!
//! - **ga**: domain-agnostic GA framework (problem traits, configuration,
//!   selection, stepwise evolution, run-to-completion runner, progress
//!   reporting).
//! - **models**: typed input records, the input [`Catalog`](models::Catalog),
//!   the gene [`Assignment`](models::Assignment), the chromosome
//!   [`Timetable`](models::Timetable) and the denormalized output row.
//! - **constraints**: the hard/soft constraint catalog and per-timetable
//!   violation reports.
//! - **timetable**: construction, scoring, genetic operators, session
//!   partitioning and the [`TimetableEngine`](timetable::TimetableEngine)
//!   facade.
//! - **validation**: catalog integrity checks run before evolution.
//!
//! # Architecture
//!
//! Scheduling knowledge lives in `models`, `constraints` and `timetable`;
//! `ga` knows nothing about timetables and drives any [`ga::GaProblem`].
//! The crate logs through `tracing` and installs no subscriber.

pub mod constraints;
pub mod error;
pub mod ga;
pub mod models;
pub mod timetable;
pub mod validation;

pub use error::{Result, TimetableError};
