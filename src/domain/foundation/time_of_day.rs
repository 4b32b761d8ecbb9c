//! Time-of-day value object for activity scheduling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A wall-clock time in 24h `HH:MM` form, no seconds, no timezone.
///
/// Activities within a day are kept sorted by this value ascending;
/// the derived `Ord` gives hour-then-minute ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Creates a time of day from hour and minute components.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if hour > 23 or minute > 59
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::invalid_format(
                "time",
                format!("{:02}:{:02} is not a valid 24h time", hour, minute),
            ));
        }
        Ok(Self { hour, minute })
    }

    /// Returns the hour component (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute component (0-59).
    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s.split_once(':').ok_or_else(|| {
            ValidationError::invalid_format("time", format!("'{}' is not in HH:MM form", s))
        })?;
        let hour: u8 = h.parse().map_err(|_| {
            ValidationError::invalid_format("time", format!("'{}' has a non-numeric hour", s))
        })?;
        let minute: u8 = m.parse().map_err(|_| {
            ValidationError::invalid_format("time", format!("'{}' has a non-numeric minute", s))
        })?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_times() {
        let t: TimeOfDay = "09:30".parse().unwrap();
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 30);
        assert_eq!(t.to_string(), "09:30");
    }

    #[test]
    fn rejects_out_of_range() {
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("12:60".parse::<TimeOfDay>().is_err());
        assert!(TimeOfDay::new(24, 0).is_err());
    }

    #[test]
    fn rejects_malformed() {
        assert!("noon".parse::<TimeOfDay>().is_err());
        assert!("12".parse::<TimeOfDay>().is_err());
        assert!("a:b".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn orders_by_hour_then_minute() {
        let early: TimeOfDay = "08:15".parse().unwrap();
        let later: TimeOfDay = "08:45".parse().unwrap();
        let evening: TimeOfDay = "19:00".parse().unwrap();
        assert!(early < later);
        assert!(later < evening);
    }

    #[test]
    fn serde_round_trip_as_string() {
        let t: TimeOfDay = "14:05".parse().unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"14:05\"");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
