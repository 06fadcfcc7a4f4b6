//! Error types for the timetabling engine.
//!
//! Evolution itself never fails: a bad timetable shows up as low fitness,
//! not as an error. Errors only arise while loading input records or
//! constructing an engine from an unusable catalog or configuration.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Error type for catalog loading, validation and engine construction.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// A catalog needed to build assignments is empty.
    #[error("cannot build a timetable: no {0} available")]
    EmptyCatalog(&'static str),

    /// No class declares any course, so there is nothing to schedule.
    #[error("no (class, course) pairings to schedule")]
    NoPairings,

    /// Two records of the same kind share an id.
    #[error("duplicate {kind} id {id}")]
    DuplicateId {
        /// Record kind (`"class"`, `"room"`, ...).
        kind: &'static str,
        /// The repeated id.
        id: u32,
    },

    /// A record references an id that is not in the catalog.
    #[error("{referenced_by} references unknown {kind} id {id}")]
    UnknownReference {
        /// Kind of the missing record.
        kind: &'static str,
        /// The missing id.
        id: u32,
        /// Description of the referencing record.
        referenced_by: String,
    },

    /// A JSON-encoded session list could not be parsed.
    #[error("malformed session list in {field}: {source}")]
    MalformedSessionList {
        /// Field the list was read from.
        field: &'static str,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A session type name that is not one of the known delivery modes.
    #[error("unknown session type {0:?}")]
    UnknownSessionType(String),

    /// A day name that is not one of the seven weekdays.
    #[error("unknown day {0:?}")]
    UnknownDay(String),

    /// A time of day that is not `HH:MM` or `HH:MM:SS`.
    #[error("invalid time of day {0:?}")]
    InvalidTime(String),

    /// GA configuration parameters are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
