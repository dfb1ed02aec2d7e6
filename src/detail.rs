//! Zone detail view: metadata, the day's events and one prediction.

use serde::Serialize;
use tracing::warn;

use crate::error::ApiError;
use crate::model::{Event, TimeQuery, Zone, ZoneId};
use crate::panel::PredictionCard;
use crate::services::prediction_api::PredictionApi;

#[derive(Debug, Clone, Serialize)]
pub struct ZoneDetail {
    pub zone: Zone,
    pub query: TimeQuery,
    pub events: Vec<Event>,
    /// The prediction card, or the error message shown in its place.
    pub prediction: Result<PredictionCard, String>,
}

/// Loads the detail view. Only an unknown or unreachable zone fails the
/// whole view; events and prediction failures degrade in place.
#[tracing::instrument(skip(api), fields(date = %query.date, hour = query.hour.get()))]
pub async fn load_zone_detail<A: PredictionApi + ?Sized>(
    api: &A,
    zone_id: ZoneId,
    query: TimeQuery,
) -> Result<ZoneDetail, ApiError> {
    let (zone, events, prediction) = tokio::join!(
        api.fetch_zone(zone_id),
        api.fetch_events(zone_id, query.date),
        api.fetch_prediction(zone_id, query.date, query.hour, query.day_of_week()),
    );

    let zone = zone?;

    let events = events.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load events");
        Vec::new()
    });

    let prediction = prediction
        .map(|p| PredictionCard::from_prediction(&p))
        .map_err(|e| {
            warn!(error = %e, "Failed to load prediction");
            e.to_string()
        });

    Ok(ZoneDetail {
        zone,
        query,
        events,
        prediction,
    })
}
