use std::env;

use anyhow::Context;
use chrono::{Local, NaiveDate};

use slotbook::{
    auth::{AuthService, DemoVerifier},
    booking::{Appointment, ClockTime, NewAppointment, TimeSlot},
    demo,
    session::Session,
    storage::{Config, LocalStorage},
    store::{BookingStats, SearchFilters},
};

const USAGE: &str = "Usage: slotbook [--email EMAIL --password PW [--signup]] [--date YYYY-MM-DD] \
[--demo] [--book HH:MM-HH:MM [--title TITLE]] [--logout]";

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub email: Option<String>,
    pub password: Option<String>,
    pub signup: bool,
    pub date: NaiveDate,
    pub demo: bool,
    pub book: Option<(ClockTime, ClockTime)>,
    pub title: Option<String>,
    pub logout: bool,
}

pub enum CliMode {
    Run(CliOptions),
    Help,
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1), Local::now().date_naive())
}

pub fn usage() -> &'static str {
    USAGE
}

fn parse_args<I>(args: I, today: NaiveDate) -> Result<CliMode, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = CliOptions {
        email: None,
        password: None,
        signup: false,
        date: today,
        demo: false,
        book: None,
        title: None,
        logout: false,
    };
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("{} requires a value", name))
        };

        match arg.as_str() {
            "--email" => options.email = Some(value("--email")?),
            "--password" => options.password = Some(value("--password")?),
            "--signup" => options.signup = true,
            "--date" => {
                let date_str = value("--date")?;
                options.date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                    .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD.", date_str))?;
            }
            "--demo" => options.demo = true,
            "--book" => options.book = Some(parse_window(&value("--book")?)?),
            "--title" => options.title = Some(value("--title")?),
            "--logout" => options.logout = true,
            "--help" => return Ok(CliMode::Help),
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    if options.email.is_some() != options.password.is_some() {
        return Err("--email and --password must be given together".to_string());
    }

    Ok(CliMode::Run(options))
}

fn parse_window(window: &str) -> Result<(ClockTime, ClockTime), String> {
    let (start, end) = window
        .split_once('-')
        .ok_or_else(|| format!("Invalid window '{}'. Use HH:MM-HH:MM.", window))?;
    let start = start.parse::<ClockTime>().map_err(|e| e.to_string())?;
    let end = end.parse::<ClockTime>().map_err(|e| e.to_string())?;
    Ok((start, end))
}

pub async fn run(options: CliOptions) -> anyhow::Result<()> {
    let config = Config::load_or_create().context("loading config")?;
    let storage = LocalStorage::open(&config.session.storage_path)
        .context("opening session storage")?;
    let mut auth = AuthService::new(DemoVerifier::new(), storage);

    if options.logout {
        auth.logout()?;
        println!("You have been logged out");
        return Ok(());
    }

    let user = match (&options.email, &options.password) {
        (Some(email), Some(password)) if options.signup => Some(auth.signup(email, password).await?),
        (Some(email), Some(password)) => Some(auth.login(email, password).await?),
        _ => auth.restore().cloned(),
    };

    let Some(user) = user else {
        println!("Not signed in.");
        println!("{}", USAGE);
        return Ok(());
    };

    let session = Session::start(user, config.store.clone());
    let store = session.store();

    if options.demo || config.demo.enabled {
        let today = Local::now().date_naive();
        let (appointments, slots) = demo::sample_data(&session.user().id, today, config.demo.days_ahead);
        store.load(appointments, slots).await;
    }

    if let Some((start_time, end_time)) = options.book {
        let booked = store
            .create_appointment(NewAppointment {
                title: options.title.clone().unwrap_or_else(|| "Appointment".to_string()),
                description: None,
                date: options.date,
                start_time,
                end_time,
                category: None,
                priority: None,
            })
            .await?;
        println!("Appointment booked successfully! ({})", booked.id);
    }

    let slots = store.available_slots_for_date(options.date).await;
    let appointments = store
        .search_appointments("", &SearchFilters::on_date(options.date))
        .await;
    let stats = store.stats(Local::now().date_naive()).await;

    println!("{}", format_agenda_text(options.date, &slots, &appointments, &stats));

    session.end().await;
    Ok(())
}

fn format_agenda_text(
    date: NaiveDate,
    slots: &[TimeSlot],
    appointments: &[Appointment],
    stats: &BookingStats,
) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Agenda – {}", date.format("%A, %B %d, %Y")));
    lines.push(String::new());

    lines.push("Slots:".to_string());
    if slots.is_empty() {
        lines.push("  No slots available.".to_string());
    } else {
        for slot in slots {
            let state = if slot.is_booked { "booked" } else { "open" };
            lines.push(format!("  {:<13} {}", slot.label(), state));
        }
    }

    lines.push(String::new());
    lines.push("Appointments:".to_string());
    if appointments.is_empty() {
        lines.push("  No appointments scheduled.".to_string());
    } else {
        for apt in appointments {
            let time_label = format!("{}-{}", apt.start_time, apt.end_time);
            let mut line = format!(
                "  {:<13} {} [{}] {} min",
                time_label,
                apt.title,
                apt.status,
                apt.duration_minutes()
            );
            if let Some(category) = apt.category {
                line.push_str(&format!(" ({})", category));
            }
            lines.push(line);
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} total, {} upcoming, {} confirmed, {} pending, {} cancelled, {} open slots",
        stats.total, stats.upcoming, stats.confirmed, stats.pending, stats.cancelled, stats.available_slots
    ));

    lines.join("\n")
}
