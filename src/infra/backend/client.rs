use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::availability::{AvailabilityLevel, classify};
use crate::error::ApiError;
use crate::fetch::{self, HttpClient};
use crate::model::{Event, Hour, PredictionResult, Zone, ZoneId};
use crate::services::prediction_api::PredictionApi;

#[derive(Serialize)]
struct PredictRequest<'a> {
    zone_id: ZoneId,
    date: &'a str,
    hour: u8,
    day_of_week: u8,
}

/// `POST /predict` response. Every numeric field is required.
#[derive(Deserialize)]
struct PredictResponse {
    predicted_occupancy: f64,
    confidence_score: f64,
    available_spaces: u32,
    total_spaces: u32,
    #[serde(default)]
    availability_level: Option<String>,
}

/// Talks to the prediction backend over JSON/HTTP.
pub struct BackendClient<C> {
    http: C,
    base_url: String,
}

impl<C: HttpClient> BackendClient<C> {
    /// `base_url` is the API prefix, e.g. `http://localhost:8001/api/v1`.
    pub fn new(http: C, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Maps non-success statuses onto the error taxonomy.
async fn check_status(resp: Response, what: &str) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(what.to_string()));
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Network(format!(
        "{} returned status {}: {}",
        what, status, body
    )))
}

#[async_trait]
impl<C: HttpClient> PredictionApi for BackendClient<C> {
    #[tracing::instrument(skip(self), fields(date = %date, hour = hour.get()))]
    async fn fetch_prediction(
        &self,
        zone_id: ZoneId,
        date: NaiveDate,
        hour: Hour,
        day_of_week: u8,
    ) -> Result<PredictionResult, ApiError> {
        let date = date.format("%Y-%m-%d").to_string();
        let body = PredictRequest {
            zone_id,
            date: &date,
            hour: hour.get(),
            day_of_week,
        };
        let req = fetch::build_json_request(Method::POST, &self.url("/predict"), &body)?;
        let resp = fetch::send(&self.http, req).await?;
        let resp = check_status(resp, &format!("prediction for zone {zone_id}")).await?;
        let payload: PredictResponse = fetch::read_json(resp).await?;

        let classification = classify(payload.predicted_occupancy);
        let reported_level = payload
            .availability_level
            .as_deref()
            .and_then(AvailabilityLevel::parse);
        if reported_level.is_some_and(|l| l != classification.level) {
            debug!(
                reported = ?reported_level,
                derived = %classification.level,
                occupancy = payload.predicted_occupancy,
                "Backend level disagrees with occupancy thresholds"
            );
        }

        Ok(PredictionResult {
            zone_id,
            hour,
            predicted_occupancy: payload.predicted_occupancy,
            confidence_score: payload.confidence_score,
            available_spaces: payload.available_spaces,
            total_spaces: payload.total_spaces,
            availability_level: classification.level,
            reported_level,
        })
    }

    #[tracing::instrument(skip(self), fields(date = %date))]
    async fn fetch_events(&self, zone_id: ZoneId, date: NaiveDate) -> Result<Vec<Event>, ApiError> {
        let url = format!(
            "{}?zone_id={}&date={}",
            self.url("/events"),
            zone_id,
            date.format("%Y-%m-%d")
        );
        let req = fetch::build_request(Method::GET, &url)?;
        let resp = fetch::send(&self.http, req).await?;
        let resp = match check_status(resp, &format!("events for zone {zone_id}")).await {
            Ok(resp) => resp,
            Err(ApiError::NotFound(_)) => {
                debug!("No events endpoint data for zone");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        let events: Vec<Event> = fetch::read_json(resp).await?;
        debug!(count = events.len(), "Events fetched");
        Ok(events)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_zone(&self, zone_id: ZoneId) -> Result<Zone, ApiError> {
        let req = fetch::build_request(Method::GET, &self.url(&format!("/zones/{zone_id}")))?;
        let resp = fetch::send(&self.http, req).await?;
        let resp = check_status(resp, &format!("zone {zone_id}")).await?;
        let zone: Zone = fetch::read_json(resp).await?;
        if zone.id != zone_id {
            warn!(returned = zone.id, "Backend returned a different zone id");
        }
        Ok(zone)
    }

    #[tracing::instrument(skip(self))]
    async fn list_zones(&self) -> Result<Vec<Zone>, ApiError> {
        let req = fetch::build_request(Method::GET, &self.url("/zones"))?;
        let resp = fetch::send(&self.http, req).await?;
        let resp = check_status(resp, "zone list").await?;
        fetch::read_json(resp).await
    }
}
