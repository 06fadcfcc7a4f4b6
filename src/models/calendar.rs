//! Calendar primitives: days, times of day, time slots and working days.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::session::{Session, SessionType};
use super::{SessionId, SlotId};
use crate::error::TimetableError;

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl Day {
    /// All seven days, Monday first.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Monday through Friday.
    pub const WEEKDAYS: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// English day name.
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TimetableError::UnknownDay(s.to_string()))
    }
}

/// Minutes since midnight, written as `HH:MM`.
///
/// Parses both `HH:MM` and the `HH:MM:SS` form stored by SQL `TIME`
/// columns; seconds are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Builds a time from hour and minute.
    ///
    /// Returns `None` when out of range.
    pub fn new(hour: u16, minute: u16) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self(hour * 60 + minute))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Hour component.
    pub fn hour(self) -> u16 {
        self.0 / 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimetableError::InvalidTime(s.to_string());
        let mut parts = s.trim().split(':');
        let hour = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let minute = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        if let Some(sec) = parts.next() {
            sec.parse::<u16>().ok().filter(|&s| s < 60).ok_or_else(invalid)?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        TimeOfDay::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimetableError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

/// Coarse part of the day a slot falls in, used for time preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotPeriod {
    /// Starts before 12:00.
    Morning,
    /// Starts from 12:00 up to 17:00.
    Afternoon,
    /// Starts at 17:00 or later.
    Evening,
}

impl SlotPeriod {
    /// Period containing the given start time.
    pub fn of(start: TimeOfDay) -> Self {
        match start.hour() {
            0..=11 => SlotPeriod::Morning,
            12..=16 => SlotPeriod::Afternoon,
            _ => SlotPeriod::Evening,
        }
    }
}

/// A bookable teaching period within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Slot id.
    pub id: SlotId,
    /// Start time.
    pub start: TimeOfDay,
    /// End time.
    pub end: TimeOfDay,
    /// Session the slot belongs to; `None` means shared by all sessions.
    #[serde(default)]
    pub session_id: Option<SessionId>,
    /// Breaks are never scheduled.
    #[serde(default)]
    pub is_break: bool,
    /// Session types allowed to use the slot; `None` means unrestricted.
    #[serde(default)]
    pub session_restrictions: Option<Vec<SessionType>>,
}

impl TimeSlot {
    /// A teaching slot open to every session.
    pub fn new(id: SlotId, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            id,
            start,
            end,
            session_id: None,
            is_break: false,
            session_restrictions: None,
        }
    }

    /// Binds the slot to one session.
    pub fn with_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Marks the slot as a break.
    pub fn as_break(mut self) -> Self {
        self.is_break = true;
        self
    }

    /// Restricts the slot to the given session types.
    pub fn with_restrictions(mut self, types: Vec<SessionType>) -> Self {
        self.session_restrictions = Some(types);
        self
    }

    /// Length in minutes (zero for malformed slots ending before they start).
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Part of the day this slot starts in.
    pub fn period(&self) -> SlotPeriod {
        SlotPeriod::of(self.start)
    }

    /// Whether two slots share any wall-clock time.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether the slot may host teaching for `session`.
    pub fn admits(&self, session: &Session) -> bool {
        if self.is_break {
            return false;
        }
        if self.session_id.is_some_and(|id| id != session.id) {
            return false;
        }
        self.session_restrictions
            .as_ref()
            .map_or(true, |types| types.is_empty() || types.contains(&session.session_type))
    }
}

/// A day on which teaching happens, optionally for one session only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingDay {
    /// The day.
    pub day: Day,
    /// Session the day applies to; `None` means every session.
    #[serde(default)]
    pub session_id: Option<SessionId>,
    /// Inactive days are never scheduled.
    #[serde(default = "active")]
    pub is_active: bool,
}

fn active() -> bool {
    true
}

impl WorkingDay {
    /// An active day for every session.
    pub fn new(day: Day) -> Self {
        Self {
            day,
            session_id: None,
            is_active: true,
        }
    }

    /// Binds the day to one session.
    pub fn with_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Whether the day is open to `session`.
    pub fn admits(&self, session: &Session) -> bool {
        self.is_active && self.session_id.map_or(true, |id| id == session.id)
    }
}
