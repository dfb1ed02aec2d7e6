#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_predictor::availability::classify;
use parking_predictor::error::ApiError;
use parking_predictor::model::{Event, Hour, Impact, PredictionResult, Zone, ZoneId};
use parking_predictor::services::prediction_api::PredictionApi;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory backend. Occupancy comes from a per-zone table (default 65),
/// and responses for earlier hours can be delayed so they finish last.
#[derive(Default)]
pub struct FakeApi {
    pub occupancy: HashMap<ZoneId, f64>,
    pub events: Vec<Event>,
    pub failing_zones: HashSet<ZoneId>,
    pub malformed_hours: HashSet<u8>,
    pub events_fail: bool,
    pub reverse_delay: bool,
    pub requests: Mutex<Vec<(ZoneId, NaiveDate, u8, u8)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn event(id: i64, start: &str, end: &str, impact: Impact) -> Event {
    Event {
        id,
        name: format!("Event {id}"),
        start_time: start.to_string(),
        end_time: end.to_string(),
        expected_impact: impact,
        zone_id: Some(1),
        date: Some("2025-06-01".to_string()),
    }
}

pub fn hour(h: u8) -> Hour {
    Hour::new(h).unwrap()
}

pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[async_trait]
impl PredictionApi for FakeApi {
    async fn fetch_prediction(
        &self,
        zone_id: ZoneId,
        date: NaiveDate,
        hour: Hour,
        day_of_week: u8,
    ) -> Result<PredictionResult, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push((zone_id, date, hour.get(), day_of_week));

        if self.reverse_delay {
            // Hour 0 waits longest.
            tokio::time::sleep(Duration::from_millis(5 * u64::from(24 - hour.get()))).await;
        }
        if self.failing_zones.contains(&zone_id) {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        if self.malformed_hours.contains(&hour.get()) {
            return Err(ApiError::Validation(
                "missing field `predicted_occupancy`".to_string(),
            ));
        }

        let occupancy = self.occupancy.get(&zone_id).copied().unwrap_or(65.0);
        let total = 40;
        let available = ((100.0 - occupancy) / 100.0 * f64::from(total)).round() as u32;
        Ok(PredictionResult {
            zone_id,
            hour,
            predicted_occupancy: occupancy,
            confidence_score: 0.8,
            available_spaces: available,
            total_spaces: total,
            availability_level: classify(occupancy).level,
            reported_level: None,
        })
    }

    async fn fetch_events(&self, _zone_id: ZoneId, _date: NaiveDate) -> Result<Vec<Event>, ApiError> {
        if self.events_fail {
            return Err(ApiError::Network("timed out".to_string()));
        }
        Ok(self.events.clone())
    }

    async fn fetch_zone(&self, zone_id: ZoneId) -> Result<Zone, ApiError> {
        if zone_id == 1 {
            Ok(Zone {
                id: 1,
                name: "Downtown Pike St".to_string(),
                lat: 47.6105,
                lng: -122.3380,
                total_spaces: 40,
            })
        } else {
            Err(ApiError::NotFound(format!("zone {zone_id}")))
        }
    }

    async fn list_zones(&self) -> Result<Vec<Zone>, ApiError> {
        Ok(Vec::new())
    }
}
