use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static CLOCK_RE: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Error, PartialEq)]
pub enum TimeParseError {
    #[error("Invalid time '{0}'. Use zero-padded HH:MM.")]
    InvalidFormat(String),
}

/// A wall-clock time of day with minute precision, written as zero-padded
/// `HH:MM` (24-hour).
///
/// Ordering is by hour then minute, which is the same order the padded
/// strings sort in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = CLOCK_RE.get_or_init(|| {
            Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("valid clock regex")
        });
        let caps = re
            .captures(s)
            .ok_or_else(|| TimeParseError::InvalidFormat(s.to_string()))?;

        let hour = caps[1]
            .parse()
            .map_err(|_| TimeParseError::InvalidFormat(s.to_string()))?;
        let minute = caps[2]
            .parse()
            .map_err(|_| TimeParseError::InvalidFormat(s.to_string()))?;

        Ok(Self { hour, minute })
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_zero_padded_time() {
        let time: ClockTime = "09:30".parse().unwrap();
        assert_eq!(time.hour(), 9);
        assert_eq!(time.minute(), 30);
    }

    #[test]
    fn rejects_unpadded_hour() {
        let result = "9:30".parse::<ClockTime>();
        assert_eq!(result, Err(TimeParseError::InvalidFormat("9:30".to_string())));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("12:60".parse::<ClockTime>().is_err());
        assert!("noon".parse::<ClockTime>().is_err());
    }

    #[test]
    fn displays_as_padded_string() {
        let time = ClockTime::new(7, 5).unwrap();
        assert_eq!(time.to_string(), "07:05");
    }

    #[test]
    fn new_rejects_invalid_components() {
        assert!(ClockTime::new(24, 0).is_none());
        assert!(ClockTime::new(0, 60).is_none());
    }

    #[test]
    fn serializes_as_json_string() {
        let time = ClockTime::new(14, 0).unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"14:00\"");

        let parsed: ClockTime = serde_json::from_str("\"16:45\"").unwrap();
        assert_eq!(parsed, ClockTime::new(16, 45).unwrap());
    }

    #[test]
    fn deserializing_malformed_time_fails() {
        let result: Result<ClockTime, _> = serde_json::from_str("\"4pm\"");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn ordering_matches_string_ordering(
            h1 in 0u8..24, m1 in 0u8..60,
            h2 in 0u8..24, m2 in 0u8..60,
        ) {
            let a = ClockTime::new(h1, m1).unwrap();
            let b = ClockTime::new(h2, m2).unwrap();
            prop_assert_eq!(a.cmp(&b), a.to_string().cmp(&b.to_string()));
        }

        #[test]
        fn display_round_trips_through_parse(h in 0u8..24, m in 0u8..60) {
            let time = ClockTime::new(h, m).unwrap();
            prop_assert_eq!(time.to_string().parse::<ClockTime>().unwrap(), time);
        }
    }
}
