//! Prediction panel for a selected zone.
//!
//! Selecting a zone loads a four-hour window of predictions starting at the
//! chosen hour plus the zone's events for the day. The panel walks
//! `Idle -> Loading -> Ready | Failed`; every load is tagged so a response
//! for an older selection can't overwrite a newer one.

use futures::future::join_all;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::availability::{AvailabilityLevel, Color, classify};
use crate::error::ApiError;
use crate::model::{Event, Hour, Impact, PredictionResult, TimeQuery, ZoneId};
use crate::services::prediction_api::PredictionApi;

/// Number of hourly predictions in a window.
pub const WINDOW_HOURS: u8 = 4;

pub const FAILED_MESSAGE: &str = "Error loading predictions. Please try again.";

/// One hour of the window, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionCard {
    pub hour: Hour,
    pub time_label: String,
    pub level: AvailabilityLevel,
    pub color: Color,
    pub available_spaces: u32,
    pub total_spaces: u32,
    pub occupied_spaces: u32,
    pub occupancy_percent: f64,
    pub confidence_percent: f64,
}

impl PredictionCard {
    pub fn from_prediction(p: &PredictionResult) -> Self {
        let class = classify(p.predicted_occupancy);
        Self {
            hour: p.hour,
            time_label: p.hour.to_string(),
            level: class.level,
            color: class.color,
            available_spaces: p.available_spaces,
            total_spaces: p.total_spaces,
            occupied_spaces: p.occupied_spaces(),
            occupancy_percent: p.predicted_occupancy,
            confidence_percent: p.confidence_score * 100.0,
        }
    }
}

/// Events running during the selected hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventAlert {
    pub event_names: Vec<String>,
    /// Impact of the first overlapping event.
    pub impact: Impact,
}

/// Builds the alert for `hour`, if any event overlaps it.
pub fn event_alert(events: &[Event], hour: Hour) -> Option<EventAlert> {
    let happening: Vec<&Event> = events.iter().filter(|e| e.overlaps(hour)).collect();
    let first = happening.first()?;
    Some(EventAlert {
        event_names: happening.iter().map(|e| e.name.clone()).collect(),
        impact: first.expected_impact,
    })
}

/// A loaded window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub zone_id: ZoneId,
    pub query: TimeQuery,
    /// In window order: the selected hour first.
    pub cards: Vec<PredictionCard>,
    pub alert: Option<EventAlert>,
    /// Confidence of the selected hour's prediction.
    pub confidence_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelState {
    Idle,
    Loading { zone_id: ZoneId },
    Ready(PanelView),
    Failed { zone_id: ZoneId, message: String },
}

/// Identifies one load started by [`PredictionPanel::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag(u64);

/// Hours covered by the window starting at `hour`. Wraps past midnight
/// without changing the date.
pub fn window_hours(hour: Hour) -> Vec<Hour> {
    (0..WINDOW_HOURS).map(|i| hour.offset(i)).collect()
}

/// Fetches the prediction window and the day's events for a zone.
///
/// All requests are issued concurrently. Any failed prediction fails the
/// window; a failed events fetch is logged and treated as no events.
#[tracing::instrument(skip(api), fields(date = %query.date, hour = query.hour.get()))]
pub async fn load_window<A: PredictionApi + ?Sized>(
    api: &A,
    zone_id: ZoneId,
    query: TimeQuery,
) -> Result<PanelView, ApiError> {
    let day_of_week = query.day_of_week();

    let predictions = join_all(
        window_hours(query.hour)
            .into_iter()
            .map(|hour| api.fetch_prediction(zone_id, query.date, hour, day_of_week)),
    );
    let events = api.fetch_events(zone_id, query.date);
    let (predictions, events) = tokio::join!(predictions, events);

    let predictions = predictions.into_iter().collect::<Result<Vec<_>, _>>()?;

    let events = events.unwrap_or_else(|e| {
        warn!(error = %e, "Events fetch failed, continuing without events");
        Vec::new()
    });

    let cards: Vec<PredictionCard> = predictions.iter().map(PredictionCard::from_prediction).collect();
    let confidence_percent = cards.first().map(|c| c.confidence_percent).unwrap_or(0.0);

    Ok(PanelView {
        zone_id,
        query,
        cards,
        alert: event_alert(&events, query.hour),
        confidence_percent,
    })
}

/// State holder for the panel.
#[derive(Debug)]
pub struct PredictionPanel {
    generation: u64,
    state: PanelState,
}

impl Default for PredictionPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionPanel {
    pub fn new() -> Self {
        Self {
            generation: 0,
            state: PanelState::Idle,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Enters `Loading`, dropping any previous result and alert.
    pub fn begin(&mut self, zone_id: ZoneId) -> RequestTag {
        self.generation += 1;
        self.state = PanelState::Loading { zone_id };
        RequestTag(self.generation)
    }

    pub fn is_current(&self, tag: RequestTag) -> bool {
        tag.0 == self.generation
    }

    /// Applies the outcome of the load identified by `tag`.
    ///
    /// Returns false, leaving the state untouched, when a newer load has
    /// started since.
    pub fn apply(&mut self, tag: RequestTag, result: Result<PanelView, ApiError>) -> bool {
        if !self.is_current(tag) {
            info!(tag = tag.0, current = self.generation, "Discarding stale panel result");
            return false;
        }

        let zone_id = match &self.state {
            PanelState::Loading { zone_id } => *zone_id,
            _ => return false,
        };

        self.state = match result {
            Ok(view) => PanelState::Ready(view),
            Err(e) => {
                error!(zone_id, error = %e, "Error fetching predictions");
                PanelState::Failed {
                    zone_id,
                    message: FAILED_MESSAGE.to_string(),
                }
            }
        };
        true
    }

    /// Loads the window for `zone_id` and applies it.
    pub async fn refresh<A: PredictionApi + ?Sized>(
        &mut self,
        api: &A,
        zone_id: ZoneId,
        query: TimeQuery,
    ) -> &PanelState {
        let tag = self.begin(zone_id);
        let result = load_window(api, zone_id, query).await;
        self.apply(tag, result);
        &self.state
    }
}
