//! Constraint catalog and violation reporting.
//!
//! - [`ConstraintCatalog`]: named hard/soft rules with weights, fixed per engine
//! - [`ConstraintReport`]: what a given timetable violates, and at what cost

mod catalog;
mod report;

pub use catalog::{ConstraintCatalog, ConstraintDefinition, ConstraintKind, Severity};
pub use report::{fitness_from_penalty, ConstraintReport, ViolationTally};
