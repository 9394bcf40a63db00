pub mod appointment;
pub mod clock;
pub mod slot;

pub use appointment::{Appointment, AppointmentCategory, AppointmentStatus, NewAppointment, Priority};
pub use clock::{ClockTime, TimeParseError};
pub use slot::{NewSlot, TimeSlot};
