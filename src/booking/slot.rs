use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::clock::ClockTime;

/// An admin-defined bookable window on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub is_booked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSlot {
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

impl TimeSlot {
    pub fn is_available(&self) -> bool {
        !self.is_booked
    }

    pub fn matches_window(&self, date: NaiveDate, start: ClockTime, end: ClockTime) -> bool {
        self.date == date && self.start_time == start && self.end_time == end
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.start_time, self.end_time)
    }
}
