use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::User;
use crate::booking::{
    Appointment, AppointmentStatus, ClockTime, NewAppointment, NewSlot, TimeSlot,
};
use crate::storage::StoreConfig;

use super::search::{SearchFilters, matches_query};
use super::stats::BookingStats;
use super::{BookingError, check_time_range};

#[derive(Debug, Default)]
struct StoreState {
    appointments: Vec<Appointment>,
    slots: Vec<TimeSlot>,
}

impl StoreState {
    /// Picks the slot an appointment in this window should reference:
    /// the first free matching slot, else the first matching one.
    fn bind_slot(&self, date: NaiveDate, start: ClockTime, end: ClockTime) -> Option<String> {
        let mut matching = self
            .slots
            .iter()
            .filter(|slot| slot.matches_window(date, start, end))
            .peekable();
        let first = matching.peek().map(|slot| slot.id.clone());

        matching
            .find(|slot| slot.is_available())
            .map(|slot| slot.id.clone())
            .or(first)
    }

    /// A slot is booked iff an active appointment references it.
    fn refresh_bookings(&mut self) {
        let appointments = &self.appointments;
        for slot in self.slots.iter_mut() {
            slot.is_booked = appointments
                .iter()
                .any(|apt| apt.is_active() && apt.slot_id.as_deref() == Some(slot.id.as_str()));
        }
    }

    /// Binds active appointments without a slot reference to a slot with
    /// the same window, then recomputes booking flags.
    fn bind_unreferenced(&mut self) {
        self.refresh_bookings();
        for i in 0..self.appointments.len() {
            let apt = &self.appointments[i];
            if apt.slot_id.is_none() && apt.is_active() {
                let bound = self.bind_slot(apt.date, apt.start_time, apt.end_time);
                self.appointments[i].slot_id = bound;
                self.refresh_bookings();
            }
        }
    }

    fn position_of_appointment(&self, id: &str) -> Result<usize, BookingError> {
        self.appointments
            .iter()
            .position(|apt| apt.id == id)
            .ok_or_else(|| BookingError::AppointmentNotFound(id.to_string()))
    }
}

/// Appointment and slot collections for one signed-in caller.
///
/// Mutations wait out the configured latency before touching the
/// collections; privilege checks run first so rejected calls return at once.
pub struct BookingStore {
    caller: Option<User>,
    settings: StoreConfig,
    state: RwLock<StoreState>,
}

impl BookingStore {
    pub fn new(caller: Option<User>, settings: StoreConfig) -> Self {
        Self {
            caller,
            settings,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Replaces both collections, binding unreferenced active appointments
    /// to slots with the same window.
    pub async fn load(&self, appointments: Vec<Appointment>, slots: Vec<TimeSlot>) {
        let mut state = self.state.write().await;
        state.appointments = appointments;
        state.slots = slots;
        state.bind_unreferenced();

        tracing::info!(
            "Loaded {} appointments and {} slots",
            state.appointments.len(),
            state.slots.len()
        );
    }

    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.appointments.clear();
        state.slots.clear();
        tracing::debug!("Booking store cleared");
    }

    pub async fn create_appointment(&self, data: NewAppointment) -> Result<Appointment, BookingError> {
        let user = self.require_caller()?;
        check_time_range(data.start_time, data.end_time)?;

        tokio::time::sleep(self.settings.create_latency()).await;

        let mut state = self.state.write().await;
        let slot_id = state.bind_slot(data.date, data.start_time, data.end_time);
        let appointment = Appointment {
            id: format!("apt-{}", Uuid::new_v4().simple()),
            user_id: user.id.clone(),
            title: data.title,
            description: data.description,
            date: data.date,
            start_time: data.start_time,
            end_time: data.end_time,
            status: AppointmentStatus::Pending,
            category: data.category,
            priority: data.priority,
            slot_id,
        };

        state.appointments.push(appointment.clone());
        state.refresh_bookings();

        tracing::info!(
            "Appointment {} booked for {} {}-{} (slot {:?})",
            appointment.id,
            appointment.date,
            appointment.start_time,
            appointment.end_time,
            appointment.slot_id
        );
        Ok(appointment)
    }

    /// Replaces the stored record with the same id. The slot reference is
    /// managed here: it is kept while the window is unchanged and re-bound
    /// when the date or times move.
    pub async fn update_appointment(&self, updated: Appointment) -> Result<Appointment, BookingError> {
        self.require_caller()?;
        check_time_range(updated.start_time, updated.end_time)?;

        tokio::time::sleep(self.settings.mutation_latency()).await;

        let mut state = self.state.write().await;
        let index = state.position_of_appointment(&updated.id)?;

        let mut record = updated;
        let current = &state.appointments[index];
        record.slot_id = if record.same_window(current) {
            current.slot_id.clone()
        } else {
            state.appointments[index].slot_id = None;
            state.refresh_bookings();
            state.bind_slot(record.date, record.start_time, record.end_time)
        };

        state.appointments[index] = record.clone();
        state.refresh_bookings();

        tracing::info!("Appointment {} updated", record.id);
        Ok(record)
    }

    pub async fn update_appointment_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment, BookingError> {
        self.require_caller()?;
        tokio::time::sleep(self.settings.mutation_latency()).await;

        let mut state = self.state.write().await;
        let index = state.position_of_appointment(id)?;

        if status != AppointmentStatus::Cancelled && state.appointments[index].slot_id.is_none() {
            let apt = &state.appointments[index];
            let bound = state.bind_slot(apt.date, apt.start_time, apt.end_time);
            state.appointments[index].slot_id = bound;
        }
        state.appointments[index].status = status;
        state.refresh_bookings();

        let appointment = state.appointments[index].clone();
        tracing::info!("Appointment {} {}", appointment.id, status);
        Ok(appointment)
    }

    pub async fn delete_appointment(&self, id: &str) -> Result<Appointment, BookingError> {
        self.require_caller()?;
        tokio::time::sleep(self.settings.mutation_latency()).await;

        let mut state = self.state.write().await;
        let index = state.position_of_appointment(id)?;
        let removed = state.appointments.remove(index);
        state.refresh_bookings();

        tracing::info!("Appointment {} deleted", removed.id);
        Ok(removed)
    }

    /// Adds a slot. Active appointments that hold this window without a slot
    /// reference are bound to it, so the slot may come back already booked.
    pub async fn create_available_slot(&self, data: NewSlot) -> Result<TimeSlot, BookingError> {
        self.require_admin("create slot")?;
        check_time_range(data.start_time, data.end_time)?;

        tokio::time::sleep(self.settings.mutation_latency()).await;

        let slot = TimeSlot {
            id: format!("slot-{}", Uuid::new_v4().simple()),
            date: data.date,
            start_time: data.start_time,
            end_time: data.end_time,
            is_booked: false,
        };

        let mut state = self.state.write().await;
        state.slots.push(slot);
        state.bind_unreferenced();
        let slot = state.slots[state.slots.len() - 1].clone();

        tracing::info!(
            "Slot {} created for {} {} (booked: {})",
            slot.id,
            slot.date,
            slot.label(),
            slot.is_booked
        );
        Ok(slot)
    }

    /// Removes a slot. Appointments that referenced it keep their window but
    /// lose the reference.
    pub async fn delete_available_slot(&self, id: &str) -> Result<TimeSlot, BookingError> {
        self.require_admin("delete slot")?;

        tokio::time::sleep(self.settings.mutation_latency()).await;

        let mut state = self.state.write().await;
        let index = state
            .slots
            .iter()
            .position(|slot| slot.id == id)
            .ok_or_else(|| BookingError::SlotNotFound(id.to_string()))?;
        let removed = state.slots.remove(index);

        for apt in state.appointments.iter_mut() {
            if apt.slot_id.as_deref() == Some(id) {
                apt.slot_id = None;
            }
        }

        tracing::info!("Slot {} deleted", removed.id);
        Ok(removed)
    }

    pub async fn available_slots_for_date(&self, date: NaiveDate) -> Vec<TimeSlot> {
        let state = self.state.read().await;
        let mut slots: Vec<TimeSlot> = state
            .slots
            .iter()
            .filter(|slot| slot.date == date)
            .cloned()
            .collect();
        slots.sort_by_key(|slot| (slot.start_time, slot.end_time));
        tracing::debug!("{} slots on {}", slots.len(), date);
        slots
    }

    /// Slots dated `today` or later, in calendar order.
    pub async fn upcoming_slots(&self, today: NaiveDate) -> Vec<TimeSlot> {
        let state = self.state.read().await;
        let mut slots: Vec<TimeSlot> = state
            .slots
            .iter()
            .filter(|slot| slot.date >= today)
            .cloned()
            .collect();
        slots.sort_by_key(|slot| (slot.date, slot.start_time));
        slots
    }

    /// Everything for admins, the caller's own appointments otherwise, and
    /// nothing without a caller.
    pub async fn user_appointments(&self) -> Vec<Appointment> {
        let state = self.state.read().await;
        self.visible_appointments(&state)
    }

    pub async fn search_appointments(&self, query: &str, filters: &SearchFilters) -> Vec<Appointment> {
        let state = self.state.read().await;
        let results: Vec<Appointment> = self
            .visible_appointments(&state)
            .into_iter()
            .filter(|apt| matches_query(apt, query))
            .filter(|apt| filters.matches(apt))
            .collect();
        tracing::debug!("Search '{}' matched {} appointments", query, results.len());
        results
    }

    pub async fn stats(&self, today: NaiveDate) -> BookingStats {
        let state = self.state.read().await;
        let appointments = self.visible_appointments(&state);
        BookingStats::compute(&appointments, &state.slots, today)
    }

    pub async fn appointment(&self, id: &str) -> Option<Appointment> {
        let state = self.state.read().await;
        state.appointments.iter().find(|apt| apt.id == id).cloned()
    }

    pub async fn appointments(&self) -> Vec<Appointment> {
        self.state.read().await.appointments.clone()
    }

    pub async fn slots(&self) -> Vec<TimeSlot> {
        self.state.read().await.slots.clone()
    }

    fn visible_appointments(&self, state: &StoreState) -> Vec<Appointment> {
        let Some(user) = &self.caller else {
            return Vec::new();
        };

        let mut visible: Vec<Appointment> = state
            .appointments
            .iter()
            .filter(|apt| user.is_admin() || apt.user_id == user.id)
            .cloned()
            .collect();
        visible.sort_by_key(|apt| (apt.date, apt.start_time));
        visible
    }

    fn require_caller(&self) -> Result<&User, BookingError> {
        self.caller.as_ref().ok_or_else(|| {
            tracing::warn!("Rejected appointment change: no signed-in user");
            BookingError::Unauthenticated
        })
    }

    fn require_admin(&self, action: &str) -> Result<(), BookingError> {
        match &self.caller {
            None => {
                tracing::warn!("Rejected {}: no signed-in user", action);
                Err(BookingError::Unauthenticated)
            }
            Some(user) if !user.is_admin() => {
                tracing::warn!("Rejected {}: {} is not an admin", action, user.email);
                Err(BookingError::Unauthorized)
            }
            Some(_) => Ok(()),
        }
    }
}
