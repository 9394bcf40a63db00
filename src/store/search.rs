use chrono::NaiveDate;

use crate::booking::{Appointment, AppointmentCategory, AppointmentStatus};

/// Optional narrowing applied after the text query. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub category: Option<AppointmentCategory>,
    pub status: Option<AppointmentStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SearchFilters {
    pub fn on_date(date: NaiveDate) -> Self {
        Self {
            start_date: Some(date),
            end_date: Some(date),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_category(mut self, category: AppointmentCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn matches(&self, appointment: &Appointment) -> bool {
        if self.category.is_some() && appointment.category != self.category {
            return false;
        }
        if self.status.is_some_and(|status| appointment.status != status) {
            return false;
        }
        if self.start_date.is_some_and(|start| appointment.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| appointment.date > end) {
            return false;
        }
        true
    }
}

/// Case-insensitive substring match on title or description. An empty query
/// matches everything.
pub fn matches_query(appointment: &Appointment, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    appointment.title.to_lowercase().contains(&needle)
        || appointment
            .description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}
