//! Genetic-algorithm course timetabling.
//!
//! # Pipeline
//!
//! 1. [`SchedulingPlan`] fixes the gene layout: one gene per (class,
//!    course) pairing, each with a legal (day, slot, room) domain and, in
//!    the session-aware variant, a session.
//! 2. [`CandidateBuilder`] seeds timetables by random draws, steered away
//!    from double-bookings by a [`ConflictIndex`].
//! 3. [`FitnessEvaluator`] scores timetables against a
//!    [`ConstraintCatalog`](crate::constraints::ConstraintCatalog).
//! 4. [`crossover`] and [`mutate`] recombine and perturb timetables while
//!    preserving the layout.
//! 5. [`TimetableProblem`] plugs all of the above into the GA framework;
//!    [`TimetableEngine`] is the call-and-return facade.

mod builder;
mod conflict_index;
mod engine;
mod evaluator;
mod operators;
mod partition;
mod problem;

pub use builder::{
    CandidateBuilder, Placement, CONSTRUCTION_RETRIES, MUTATION_RETRIES, REPAIR_RETRIES,
};
pub use conflict_index::ConflictIndex;
pub use engine::TimetableEngine;
pub use evaluator::{CacheKeyMode, FitnessEvaluator};
pub use operators::{crossover, local_conflicts, mutate, LOCAL_CONFLICT_CAP};
pub use partition::{Pairing, SchedulingPlan, SessionGroup, SlotDomain};
pub use problem::{TimetableProblem, Variant, DEFAULT_CACHE_RESET_INTERVAL};
