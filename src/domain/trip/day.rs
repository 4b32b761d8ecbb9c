//! Day itineraries and the activities scheduled within them.
//!
//! Days are derived from the trip date range, never independently
//! authored. Each day exclusively owns its activities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ActivityId, AttachmentId, DayId, TimeOfDay};

/// Kind of activity, used for presentation grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Sightseeing,
    Food,
    Transport,
    Lodging,
    WorkStudy,
    Other,
}

/// Transport-specific details for flight/train/bus legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportDetails {
    pub kind: TransportKind,
    pub code: Option<String>,
    pub terminal: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    Flight,
    Train,
    Bus,
    Transfer,
}

/// Kind of file attached to an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Pdf,
}

/// A file attached to an activity, carried inline as base64 text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub name: String,
    pub kind: AttachmentKind,
    pub data: String,
}

/// A leaf item scheduled within a day.
///
/// Always owned by exactly one `DayItinerary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub time: TimeOfDay,
    pub title: String,
    pub description: Option<String>,
    pub kind: ActivityType,
    pub location: Option<String>,
    /// Optional estimated cost, informational only.
    pub cost: Option<f64>,
    pub attachments: Vec<Attachment>,
    pub transport: Option<TransportDetails>,
}

/// One calendar day of the trip itinerary.
///
/// # Invariants
///
/// - `date` lies within the owning trip's `[start_date, end_date]`
/// - `day_number` is the 1-based ordinal position within the trip
/// - `activities` is sorted by `time` ascending (stable for ties)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayItinerary {
    pub id: DayId,
    pub date: NaiveDate,
    pub day_number: u32,
    pub activities: Vec<Activity>,
}

impl DayItinerary {
    /// Creates an empty day at the given position.
    pub fn empty(date: NaiveDate, day_number: u32) -> Self {
        Self {
            id: DayId::new(),
            date,
            day_number,
            activities: Vec::new(),
        }
    }

    /// Re-sorts activities by time ascending. `sort_by_key` is stable,
    /// so equal times keep their insertion order.
    pub fn sort_activities(&mut self) {
        self.activities.sort_by_key(|a| a.time);
    }

    /// Returns true if activities are in non-decreasing time order.
    pub fn activities_sorted(&self) -> bool {
        self.activities.windows(2).all(|w| w[0].time <= w[1].time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(time: &str, title: &str) -> Activity {
        Activity {
            id: ActivityId::new(),
            time: time.parse().unwrap(),
            title: title.to_string(),
            description: None,
            kind: ActivityType::Sightseeing,
            location: None,
            cost: None,
            attachments: Vec::new(),
            transport: None,
        }
    }

    #[test]
    fn empty_day_has_no_activities() {
        let day = DayItinerary::empty(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 1);
        assert!(day.activities.is_empty());
        assert_eq!(day.day_number, 1);
    }

    #[test]
    fn sort_orders_by_time() {
        let mut day = DayItinerary::empty(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 1);
        day.activities.push(activity("14:00", "Museum"));
        day.activities.push(activity("09:00", "Breakfast"));
        day.sort_activities();
        assert_eq!(day.activities[0].title, "Breakfast");
        assert!(day.activities_sorted());
    }

    #[test]
    fn sort_is_stable_for_equal_times() {
        let mut day = DayItinerary::empty(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 1);
        day.activities.push(activity("10:00", "First"));
        day.activities.push(activity("10:00", "Second"));
        day.sort_activities();
        assert_eq!(day.activities[0].title, "First");
        assert_eq!(day.activities[1].title, "Second");
    }
}
