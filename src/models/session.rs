//! Academic delivery sessions (regular, evening, weekend, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::calendar::SlotPeriod;
use super::SessionId;
use crate::error::{Result, TimetableError};

/// Delivery mode of a cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    /// Weekday daytime teaching; the default when nothing is declared.
    Regular,
    /// Weekday evening teaching.
    Evening,
    /// Saturday/Sunday teaching.
    Weekend,
    /// Block teaching alternating with work placements.
    Sandwich,
    /// Distance learning contact sessions.
    Distance,
}

impl SessionType {
    /// Lowercase name as stored in session lists.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionType::Regular => "regular",
            SessionType::Evening => "evening",
            SessionType::Weekend => "weekend",
            SessionType::Sandwich => "sandwich",
            SessionType::Distance => "distance",
        }
    }

    /// Parses a JSON-encoded list such as `["regular", "evening"]`.
    ///
    /// Names are matched case-insensitively. A blank string or JSON `null`
    /// yields an empty list.
    pub fn parse_list(json: &str, field: &'static str) -> Result<Vec<SessionType>> {
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        let names: Option<Vec<String>> = serde_json::from_str(json)
            .map_err(|source| TimetableError::MalformedSessionList { field, source })?;
        let mut types = Vec::new();
        for name in names.unwrap_or_default() {
            let t: SessionType = name.parse()?;
            if !types.contains(&t) {
                types.push(t);
            }
        }
        Ok(types)
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = TimetableError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(SessionType::Regular),
            "evening" => Ok(SessionType::Evening),
            "weekend" => Ok(SessionType::Weekend),
            "sandwich" => Ok(SessionType::Sandwich),
            "distance" => Ok(SessionType::Distance),
            _ => Err(TimetableError::UnknownSessionType(s.to_string())),
        }
    }
}

/// An academic session with its own legal days, hours and preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Session id.
    pub id: SessionId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Delivery mode.
    pub session_type: SessionType,
    /// Inactive sessions are not scheduled.
    #[serde(default = "active")]
    pub is_active: bool,
    /// Preferred parts of the day; empty means no preference.
    #[serde(default)]
    pub preferred_periods: Vec<SlotPeriod>,
}

fn active() -> bool {
    true
}

impl Session {
    /// An active session named after its type.
    pub fn new(id: SessionId, session_type: SessionType) -> Self {
        Self {
            id,
            name: session_type.as_str().to_string(),
            session_type,
            is_active: true,
            preferred_periods: Vec::new(),
        }
    }

    /// Sets the preferred parts of the day.
    pub fn with_preferred_periods(mut self, periods: Vec<SlotPeriod>) -> Self {
        self.preferred_periods = periods;
        self
    }

    /// Deactivates the session.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Whether a declared session list admits `t`; empty lists mean regular only.
pub(crate) fn list_admits(list: &[SessionType], t: SessionType) -> bool {
    if list.is_empty() {
        t == SessionType::Regular
    } else {
        list.contains(&t)
    }
}
