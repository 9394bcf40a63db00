use chrono::{Datelike, Days, Months, NaiveDate};

use crate::booking::{
    Appointment, AppointmentCategory, AppointmentStatus, ClockTime, Priority, TimeSlot,
};

const STATUSES: [AppointmentStatus; 3] = [
    AppointmentStatus::Confirmed,
    AppointmentStatus::Pending,
    AppointmentStatus::Cancelled,
];

const PRIORITIES: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

const SLOT_WINDOWS: [((u8, u8), (u8, u8)); 3] = [((9, 0), (10, 0)), ((14, 0), (15, 0)), ((16, 0), (17, 0))];

/// Deterministic sample data around `today`: five appointments for `user_id`
/// in the current month and three slots on most of the next `days_ahead`
/// days, never past the end of next month.
pub fn sample_data(user_id: &str, today: NaiveDate, days_ahead: u32) -> (Vec<Appointment>, Vec<TimeSlot>) {
    (sample_appointments(user_id, today), sample_slots(today, days_ahead))
}

pub fn sample_appointments(user_id: &str, today: NaiveDate) -> Vec<Appointment> {
    let Some(month_start) = today.with_day(1) else { return Vec::new() };

    (0..5u8)
        .filter_map(|i| {
            let date = month_start.checked_add_days(Days::new(1 + i as u64 * 4))?;
            let start_hour = 10 + (i * 2) % 8;
            let start_time = ClockTime::new(start_hour, 0)?;
            let end_time = ClockTime::new(start_hour + 1, 0)?;
            let n = i as usize;

            Some(Appointment {
                id: format!("apt-{}", i),
                user_id: user_id.to_string(),
                title: format!("Appointment {}", i + 1),
                description: Some(format!("Description for appointment {}", i + 1)),
                date,
                start_time,
                end_time,
                status: STATUSES[n % STATUSES.len()],
                category: Some(AppointmentCategory::ALL[n % AppointmentCategory::ALL.len()]),
                priority: Some(PRIORITIES[n % PRIORITIES.len()]),
                slot_id: None,
            })
        })
        .collect()
}

pub fn sample_slots(today: NaiveDate, days_ahead: u32) -> Vec<TimeSlot> {
    let Some(last_day) = end_of_next_month(today) else { return Vec::new() };
    let mut slots = Vec::new();

    for day in 1..=days_ahead {
        if day % 3 == 0 {
            continue;
        }
        let Some(date) = today.checked_add_days(Days::new(day as u64)) else { break };
        if date > last_day {
            break;
        }

        for (n, ((sh, sm), (eh, em))) in SLOT_WINDOWS.iter().enumerate() {
            let (Some(start_time), Some(end_time)) = (ClockTime::new(*sh, *sm), ClockTime::new(*eh, *em)) else {
                continue;
            };
            slots.push(TimeSlot {
                id: format!("slot-{}-{}", day, n + 1),
                date,
                start_time,
                end_time,
                is_booked: false,
            });
        }
    }

    slots
}

fn end_of_next_month(today: NaiveDate) -> Option<NaiveDate> {
    today
        .with_day(1)?
        .checked_add_months(Months::new(2))?
        .pred_opt()
}
