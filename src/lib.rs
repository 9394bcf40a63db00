pub mod auth;
pub mod booking;
pub mod demo;
pub mod session;
pub mod storage;
pub mod store;

pub use auth::{AuthService, CredentialVerifier, DemoVerifier, Role, User};
pub use booking::{Appointment, AppointmentStatus, ClockTime, TimeSlot};
pub use session::Session;
pub use store::{BookingError, BookingStore, SearchFilters};
