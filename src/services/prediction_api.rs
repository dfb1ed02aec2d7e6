//! Trait for the parking prediction backend.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ApiError;
use crate::model::{Event, Hour, PredictionResult, Zone, ZoneId};

/// Abstraction over the prediction backend.
///
/// Operations are independent and idempotent. None of them retry.
#[async_trait]
pub trait PredictionApi: Send + Sync {
    /// Predicted occupancy for one zone at one hour.
    ///
    /// `day_of_week` is Monday = 0 ... Sunday = 6. Fails with
    /// [`ApiError::Validation`] when the payload lacks a required number.
    async fn fetch_prediction(
        &self,
        zone_id: ZoneId,
        date: NaiveDate,
        hour: Hour,
        day_of_week: u8,
    ) -> Result<PredictionResult, ApiError>;

    /// Events for a zone on a day. No events is an empty vec, not an error.
    async fn fetch_events(&self, zone_id: ZoneId, date: NaiveDate) -> Result<Vec<Event>, ApiError>;

    /// Zone metadata. [`ApiError::NotFound`] for unknown ids.
    async fn fetch_zone(&self, zone_id: ZoneId) -> Result<Zone, ApiError>;

    /// Every zone the backend knows about.
    async fn list_zones(&self) -> Result<Vec<Zone>, ApiError>;
}
