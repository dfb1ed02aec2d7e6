//! Data types shared by the API client, map and prediction panel.

use chrono::{Datelike, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::availability::AvailabilityLevel;

pub type ZoneId = u32;

/// A parking zone. Reference data; never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub total_spaces: u32,
}

/// Hour of day, always in `0..=23`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Hour(u8);

impl Hour {
    pub fn new(h: u8) -> Option<Self> {
        (h < 24).then_some(Self(h))
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// The hour `i` hours later, wrapping past midnight.
    pub fn offset(&self, i: u8) -> Hour {
        Hour(((u16::from(self.0) + u16::from(i)) % 24) as u8)
    }

    pub fn now() -> Self {
        Self(Local::now().hour() as u8)
    }
}

/// 12-hour clock: `0` is "12:00 AM", `14` is "2:00 PM".
impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ampm = if self.0 >= 12 { "PM" } else { "AM" };
        let h = match self.0 % 12 {
            0 => 12,
            h => h,
        };
        write!(f, "{}:00 {}", h, ampm)
    }
}

/// Date and hour picked by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeQuery {
    pub date: NaiveDate,
    pub hour: Hour,
}

impl TimeQuery {
    pub fn new(date: NaiveDate, hour: Hour) -> Self {
        Self { date, hour }
    }

    /// Monday = 0 ... Sunday = 6, as the backend expects.
    pub fn day_of_week(&self) -> u8 {
        self.date.weekday().num_days_from_monday() as u8
    }

    /// `YYYY-MM-DD`.
    pub fn date_param(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// One hourly prediction for a zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub zone_id: ZoneId,
    pub hour: Hour,
    pub predicted_occupancy: f64,
    pub confidence_score: f64,
    pub available_spaces: u32,
    pub total_spaces: u32,
    /// Always derived from `predicted_occupancy`.
    pub availability_level: AvailabilityLevel,
    /// What the backend claimed, if it sent a level we recognize.
    pub reported_level: Option<AvailabilityLevel>,
}

impl PredictionResult {
    pub fn occupied_spaces(&self) -> u32 {
        self.total_spaces.saturating_sub(self.available_spaces)
    }
}

/// Expected demand impact of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    Low,
    Medium,
    High,
    /// Any impact name the backend sends that we don't know.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Impact::Low => "Low",
            Impact::Medium => "Medium",
            Impact::High => "High",
            Impact::Unknown => "Unknown",
        };
        f.pad(s)
    }
}

/// An event near a zone on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub expected_impact: Impact,
    #[serde(default)]
    pub zone_id: Option<ZoneId>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Event {
    pub fn start_hour(&self) -> Option<u8> {
        hour_of(&self.start_time)
    }

    pub fn end_hour(&self) -> Option<u8> {
        hour_of(&self.end_time)
    }

    /// Whether `hour` lies within `[start, end]`, both ends inclusive,
    /// compared as whole hours. Unparseable times never match.
    pub fn overlaps(&self, hour: Hour) -> bool {
        match (self.start_hour(), self.end_hour()) {
            (Some(start), Some(end)) => start <= hour.get() && hour.get() <= end,
            _ => false,
        }
    }
}

/// Leading hour component of `HH:MM` or `HH:MM:SS`. `24:00` is accepted as
/// end of day.
fn hour_of(time: &str) -> Option<u8> {
    let (hour, _) = time.trim().split_once(':')?;
    hour.parse::<u8>().ok().filter(|h| *h <= 24)
}
