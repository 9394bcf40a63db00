use chrono::NaiveDate;
use serde::Serialize;

use crate::booking::{Appointment, AppointmentStatus, TimeSlot};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingStats {
    pub total: usize,
    pub confirmed: usize,
    pub pending: usize,
    pub cancelled: usize,
    /// Not cancelled and dated today or later.
    pub upcoming: usize,
    /// Unbooked slots dated today or later.
    pub available_slots: usize,
}

impl BookingStats {
    pub fn compute(appointments: &[Appointment], slots: &[TimeSlot], today: NaiveDate) -> Self {
        let count_status = |status: AppointmentStatus| {
            appointments.iter().filter(|a| a.status == status).count()
        };

        Self {
            total: appointments.len(),
            confirmed: count_status(AppointmentStatus::Confirmed),
            pending: count_status(AppointmentStatus::Pending),
            cancelled: count_status(AppointmentStatus::Cancelled),
            upcoming: appointments
                .iter()
                .filter(|a| a.date >= today && a.is_active())
                .count(),
            available_slots: slots
                .iter()
                .filter(|s| s.is_available() && s.date >= today)
                .count(),
        }
    }
}
