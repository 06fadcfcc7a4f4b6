//! Named hard and soft constraints with their penalty weights.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every constraint the fitness evaluator knows how to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Same class twice in one (day, slot).
    ClassConflict,
    /// Same lecturer twice in one (day, slot).
    LecturerConflict,
    /// Same room twice in one (day, slot).
    RoomConflict,
    /// Room has fewer seats than the class has students.
    RoomCapacity,
    /// Room type differs from the type the course requires.
    RoomTypeMismatch,
    /// Slot is a break or does not belong to the gene's session.
    TimeSlotInvalid,
    /// Day is not an active working day of the gene's session.
    WorkingDayViolation,
    /// Course, class or room not eligible for the gene's session type.
    SessionViolation,
    /// Class, room or lecturer double-booked across two sessions at
    /// overlapping times on the same day.
    CrossSessionConflict,
    /// A class has more sessions in one day than the threshold.
    DailyOverload,
    /// A lecturer teaches more sessions in one day than the threshold.
    LecturerWorkload,
    /// A lecturer teaches in more distinct session types than the threshold.
    LecturerSessionOverload,
    /// Room type not among the course's preferred types.
    RoomPreference,
    /// Slot period not among the course's or session's preferred periods.
    TimePreference,
}

impl ConstraintKind {
    /// Snake-case constraint name.
    pub fn name(self) -> &'static str {
        match self {
            ConstraintKind::ClassConflict => "class_conflict",
            ConstraintKind::LecturerConflict => "lecturer_conflict",
            ConstraintKind::RoomConflict => "room_conflict",
            ConstraintKind::RoomCapacity => "room_capacity",
            ConstraintKind::RoomTypeMismatch => "room_type_mismatch",
            ConstraintKind::TimeSlotInvalid => "time_slot_invalid",
            ConstraintKind::WorkingDayViolation => "working_day_violation",
            ConstraintKind::SessionViolation => "session_violation",
            ConstraintKind::CrossSessionConflict => "cross_session_conflict",
            ConstraintKind::DailyOverload => "daily_overload",
            ConstraintKind::LecturerWorkload => "lecturer_workload",
            ConstraintKind::LecturerSessionOverload => "lecturer_session_overload",
            ConstraintKind::RoomPreference => "room_preference",
            ConstraintKind::TimePreference => "time_preference",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether violating a constraint makes a schedule unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Unusable schedule; heavily penalized.
    Hard,
    /// Degraded but usable schedule; lightly penalized.
    Soft,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintDefinition {
    /// Which rule.
    pub kind: ConstraintKind,
    /// Hard or soft.
    pub severity: Severity,
    /// Penalty per violation unit.
    pub weight: u32,
    /// Count tolerated before overload rules fire; `None` for other rules.
    pub threshold: Option<u32>,
    /// Human-readable description.
    pub description: &'static str,
}

impl ConstraintDefinition {
    fn new(
        kind: ConstraintKind,
        severity: Severity,
        weight: u32,
        description: &'static str,
    ) -> Self {
        Self {
            kind,
            severity,
            weight,
            threshold: None,
            description,
        }
    }

    fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = Some(threshold);
        self
    }
}

/// The constraint table an evaluator scores against.
///
/// Constraints absent from the catalog are not checked. The catalog is
/// fixed once handed to an engine.
///
/// ```
/// use u_timetable::constraints::{ConstraintCatalog, ConstraintKind, Severity};
///
/// let catalog = ConstraintCatalog::standard()
///     .with_severity(ConstraintKind::RoomTypeMismatch, Severity::Hard)
///     .with_weight(ConstraintKind::TimePreference, 5);
/// assert_eq!(catalog.weight(ConstraintKind::TimePreference), 5);
/// assert_eq!(catalog.weight(ConstraintKind::SessionViolation), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintCatalog {
    definitions: Vec<ConstraintDefinition>,
}

impl ConstraintCatalog {
    /// Constraints of the single-session timetable.
    pub fn standard() -> Self {
        use ConstraintKind::*;
        use Severity::*;

        Self {
            definitions: vec![
                ConstraintDefinition::new(
                    ClassConflict,
                    Hard,
                    1000,
                    "A class cannot attend two sessions at the same time",
                ),
                ConstraintDefinition::new(
                    LecturerConflict,
                    Hard,
                    1000,
                    "A lecturer cannot teach two sessions at the same time",
                ),
                ConstraintDefinition::new(
                    RoomConflict,
                    Hard,
                    1000,
                    "A room cannot host two sessions at the same time",
                ),
                ConstraintDefinition::new(
                    RoomCapacity,
                    Hard,
                    800,
                    "Room capacity must accommodate the class size",
                ),
                ConstraintDefinition::new(
                    RoomTypeMismatch,
                    Soft,
                    600,
                    "Room type should match the course requirement",
                ),
                ConstraintDefinition::new(
                    DailyOverload,
                    Soft,
                    50,
                    "A class should not have too many sessions in one day",
                )
                .with_threshold(3),
                ConstraintDefinition::new(
                    LecturerWorkload,
                    Soft,
                    25,
                    "A lecturer should not teach too many sessions in one day",
                )
                .with_threshold(4),
                ConstraintDefinition::new(
                    RoomPreference,
                    Soft,
                    20,
                    "Courses should use their preferred room types",
                ),
                ConstraintDefinition::new(
                    TimePreference,
                    Soft,
                    15,
                    "Sessions should fall in preferred parts of the day",
                ),
            ],
        }
    }

    /// Constraints of the multi-session timetable.
    ///
    /// Adds the session rules to [`standard`](Self::standard) and raises
    /// room type mismatches to hard.
    pub fn session_aware() -> Self {
        use ConstraintKind::*;
        use Severity::*;

        let mut catalog = Self::standard().with_severity(RoomTypeMismatch, Hard);
        catalog.definitions.extend([
            ConstraintDefinition::new(
                TimeSlotInvalid,
                Hard,
                1000,
                "Time slot must be a teaching slot of the session",
            ),
            ConstraintDefinition::new(
                WorkingDayViolation,
                Hard,
                1000,
                "Day must be an active working day of the session",
            ),
            ConstraintDefinition::new(
                SessionViolation,
                Hard,
                1200,
                "Course, class and room must be eligible for the session type",
            ),
            ConstraintDefinition::new(
                CrossSessionConflict,
                Hard,
                1200,
                "No class, room or lecturer may be booked by two sessions at once",
            ),
            ConstraintDefinition::new(
                LecturerSessionOverload,
                Soft,
                60,
                "A lecturer should not teach across too many session types",
            )
            .with_threshold(3),
        ]);
        catalog
    }

    /// Looks up a definition.
    pub fn get(&self, kind: ConstraintKind) -> Option<&ConstraintDefinition> {
        self.definitions.iter().find(|d| d.kind == kind)
    }

    /// Whether the rule is checked.
    pub fn contains(&self, kind: ConstraintKind) -> bool {
        self.get(kind).is_some()
    }

    /// Penalty weight, or `0` for rules not in the catalog.
    pub fn weight(&self, kind: ConstraintKind) -> u32 {
        self.get(kind).map_or(0, |d| d.weight)
    }

    /// Overload threshold, or `0` for rules without one.
    pub fn threshold(&self, kind: ConstraintKind) -> u32 {
        self.get(kind).and_then(|d| d.threshold).unwrap_or(0)
    }

    /// Iterates over all definitions.
    pub fn iter(&self) -> impl Iterator<Item = &ConstraintDefinition> {
        self.definitions.iter()
    }

    /// Overrides a rule's weight.
    pub fn with_weight(mut self, kind: ConstraintKind, weight: u32) -> Self {
        if let Some(def) = self.definitions.iter_mut().find(|d| d.kind == kind) {
            def.weight = weight;
        }
        self
    }

    /// Overrides a rule's severity.
    pub fn with_severity(mut self, kind: ConstraintKind, severity: Severity) -> Self {
        if let Some(def) = self.definitions.iter_mut().find(|d| d.kind == kind) {
            def.severity = severity;
        }
        self
    }

    /// Overrides an overload rule's threshold.
    pub fn with_threshold(mut self, kind: ConstraintKind, threshold: u32) -> Self {
        if let Some(def) = self.definitions.iter_mut().find(|d| d.kind == kind) {
            def.threshold = Some(threshold);
        }
        self
    }

    /// Stops checking a rule.
    pub fn without(mut self, kind: ConstraintKind) -> Self {
        self.definitions.retain(|d| d.kind != kind);
        self
    }
}

impl Default for ConstraintCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
