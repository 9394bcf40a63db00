pub mod booking_store;
pub mod search;
pub mod stats;

use thiserror::Error;

use crate::booking::ClockTime;

pub use booking_store::BookingStore;
pub use search::SearchFilters;
pub use stats::BookingStats;

#[derive(Debug, Error, PartialEq)]
pub enum BookingError {
    #[error("User must be authenticated")]
    Unauthenticated,
    #[error("Only admins can manage time slots")]
    Unauthorized,
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),
    #[error("Time slot not found: {0}")]
    SlotNotFound(String),
    #[error("Start time {start} must be before end time {end}")]
    InvalidTimeRange { start: ClockTime, end: ClockTime },
}

pub(crate) fn check_time_range(start: ClockTime, end: ClockTime) -> Result<(), BookingError> {
    if start < end {
        Ok(())
    } else {
        Err(BookingError::InvalidTimeRange { start, end })
    }
}
