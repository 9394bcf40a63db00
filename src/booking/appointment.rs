use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::clock::ClockTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub status: AppointmentStatus,
    pub category: Option<AppointmentCategory>,
    pub priority: Option<Priority>,
    /// Slot this appointment booked, if one matched its window at booking time.
    pub slot_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentCategory {
    Investment,
    Financial,
    Consultation,
    Property,
    Portfolio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Caller-supplied fields of an appointment; id, owner and status are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub category: Option<AppointmentCategory>,
    pub priority: Option<Priority>,
}

impl Appointment {
    pub fn is_active(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }

    pub fn duration_minutes(&self) -> i64 {
        self.end_time.minutes_since_midnight() as i64
            - self.start_time.minutes_since_midnight() as i64
    }

    pub fn same_window(&self, other: &Appointment) -> bool {
        self.date == other.date
            && self.start_time == other.start_time
            && self.end_time == other.end_time
    }
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppointmentCategory {
    pub const ALL: [AppointmentCategory; 5] = [
        AppointmentCategory::Investment,
        AppointmentCategory::Financial,
        AppointmentCategory::Consultation,
        AppointmentCategory::Property,
        AppointmentCategory::Portfolio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentCategory::Investment => "investment",
            AppointmentCategory::Financial => "financial",
            AppointmentCategory::Consultation => "consultation",
            AppointmentCategory::Property => "property",
            AppointmentCategory::Portfolio => "portfolio",
        }
    }
}

impl fmt::Display for AppointmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
