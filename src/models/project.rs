use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single day of filming work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilmingDate {
    pub date: NaiveDate,
    /// Free-text slot such as "AM", "PM" or "TBC". Not used in hour arithmetic.
    #[serde(default)]
    pub time_slot: String,
}

impl FilmingDate {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            time_slot: String::new(),
        }
    }

    pub fn with_slot(date: NaiveDate, time_slot: impl Into<String>) -> Self {
        Self {
            date,
            time_slot: time_slot.into(),
        }
    }
}

/// Inclusive span during which editing happens on weekdays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditingRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl EditingRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub status: String,
    /// Order is preserved and duplicates are kept; a repeated name is counted once per entry.
    #[serde(default)]
    pub assigned_people: Vec<String>,
    #[serde(default)]
    pub filming_dates: Vec<FilmingDate>,
    #[serde(default)]
    pub editing_ranges: Vec<EditingRange>,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: status.into(),
            assigned_people: Vec::new(),
            filming_dates: Vec::new(),
            editing_ranges: Vec::new(),
        }
    }

    pub fn with_people<I, S>(mut self, people: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assigned_people = people.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_filming(mut self, date: FilmingDate) -> Self {
        self.filming_dates.push(date);
        self
    }

    pub fn with_editing(mut self, range: EditingRange) -> Self {
        self.editing_ranges.push(range);
        self
    }
}
