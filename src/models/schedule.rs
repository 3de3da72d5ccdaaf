use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Filming,
    Editing,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Filming => "filming",
            ActivityKind::Editing => "editing",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ActivityKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "filming" => Ok(ActivityKind::Filming),
            "editing" => Ok(ActivityKind::Editing),
            other => Err(format!("unsupported activity kind: {other}")),
        }
    }
}

/// Inclusive calendar-month window that bounds expansion and classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Intersects `[start, end]` with the window. `None` when they do not overlap.
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let clipped_start = start.max(self.start);
        let clipped_end = end.min(self.end);
        (clipped_start <= clipped_end).then_some((clipped_start, clipped_end))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonDay {
    pub person: String,
    pub date: NaiveDate,
}

/// One unit of nominal work for a person on a day, before the daily cap applies.
#[derive(Debug, Clone, PartialEq)]
pub struct Commitment {
    pub project: String,
    pub kind: ActivityKind,
    pub nominal_hours: f64,
}

pub type DailySchedule = BTreeMap<PersonDay, Vec<Commitment>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AllocationKey {
    pub person: String,
    pub date: NaiveDate,
    pub project: String,
}

pub type ResolvedAllocations = BTreeMap<AllocationKey, f64>;
