use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

use super::renderer::MapRenderer;
use super::surface::{MapSurface, MarkerStyle};
use crate::availability::{AvailabilityLevel, Color, classify, color_for};
use crate::model::{TimeQuery, ZoneId};
use crate::services::prediction_api::PredictionApi;
use crate::zones::ZoneRegistry;

/// Outcome of one coloring pass: a level per zone, or `None` where the
/// prediction could not be fetched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ZoneColors {
    levels: BTreeMap<ZoneId, Option<AvailabilityLevel>>,
}

impl ZoneColors {
    pub fn level(&self, id: ZoneId) -> Option<AvailabilityLevel> {
        self.levels.get(&id).copied().flatten()
    }

    /// Fallback gray for failed or unknown zones.
    pub fn color(&self, id: ZoneId) -> Color {
        color_for(self.level(id))
    }

    pub fn failed(&self) -> usize {
        self.levels.values().filter(|l| l.is_none()).count()
    }
}

/// Fetches the selected hour's prediction for every registered zone.
///
/// Requests run concurrently. A failed zone is logged and left without a
/// level; the others are unaffected.
#[tracing::instrument(skip(api, registry), fields(date = %query.date, hour = query.hour.get()))]
pub async fn color_zones<A: PredictionApi + ?Sized>(
    api: &A,
    registry: &ZoneRegistry,
    query: TimeQuery,
) -> ZoneColors {
    let day_of_week = query.day_of_week();

    let fetches = registry.iter().map(|zone| async move {
        let result = api
            .fetch_prediction(zone.id, query.date, query.hour, day_of_week)
            .await;
        (zone.id, result)
    });

    let mut levels = BTreeMap::new();
    for (zone_id, result) in join_all(fetches).await {
        let level = match result {
            Ok(prediction) => Some(classify(prediction.predicted_occupancy).level),
            Err(e) => {
                warn!(zone_id, error = %e, "Zone color fetch failed");
                None
            }
        };
        levels.insert(zone_id, level);
    }

    let colors = ZoneColors { levels };
    info!(
        zones = registry.len(),
        failed = colors.failed(),
        "Zone coloring pass complete"
    );
    colors
}

/// Draws or restyles one marker per registered zone.
pub fn paint<S: MapSurface>(
    renderer: &mut MapRenderer<'_, S>,
    registry: &ZoneRegistry,
    colors: &ZoneColors,
) {
    for zone in registry.iter() {
        renderer.upsert_marker(zone, MarkerStyle::filled(colors.color(zone.id)));
    }
}
