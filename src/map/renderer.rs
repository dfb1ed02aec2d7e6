use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::debug;

use super::surface::{LatLng, MapSurface, MarkerHandle, MarkerStyle};
use crate::model::{Zone, ZoneId};

/// Interaction state of one marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    Unselected,
    Hovered,
    Selected,
}

struct Marker {
    handle: MarkerHandle,
    style: MarkerStyle,
    state: MarkerState,
}

impl Marker {
    /// Style as drawn: selected markers get a heavier outline.
    fn drawn_style(&self) -> MarkerStyle {
        match self.state {
            MarkerState::Selected => self.style.with_weight(MarkerStyle::SELECTED_WEIGHT),
            _ => self.style,
        }
    }
}

/// Owns the markers placed on a borrowed [`MapSurface`].
///
/// At most one marker is selected at a time. Clicking a marker publishes its
/// zone id on the channel returned by [`MapRenderer::new`]; the renderer
/// never waits on whoever consumes it.
pub struct MapRenderer<'s, S: MapSurface> {
    surface: &'s mut S,
    markers: HashMap<ZoneId, Marker>,
    selected: Option<ZoneId>,
    selections: mpsc::UnboundedSender<ZoneId>,
}

impl<'s, S: MapSurface> MapRenderer<'s, S> {
    pub fn new(surface: &'s mut S) -> (Self, mpsc::UnboundedReceiver<ZoneId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let renderer = Self {
            surface,
            markers: HashMap::new(),
            selected: None,
            selections: tx,
        };
        (renderer, rx)
    }

    /// Places a marker for `zone`, or restyles the existing one.
    ///
    /// The surface is only touched when the style differs from what is
    /// already drawn.
    pub fn upsert_marker(&mut self, zone: &Zone, style: MarkerStyle) {
        if let Some(marker) = self.markers.get_mut(&zone.id) {
            if marker.style == style {
                return;
            }
            marker.style = style;
            self.surface.set_style(marker.handle, &marker.drawn_style());
            return;
        }

        let position = LatLng {
            lat: zone.lat,
            lng: zone.lng,
        };
        let handle = self.surface.add_marker(position, &style, &zone.name);
        self.markers.insert(
            zone.id,
            Marker {
                handle,
                style,
                state: MarkerState::Unselected,
            },
        );
    }

    /// Returns false if there was no marker for `id`.
    pub fn remove_marker(&mut self, id: ZoneId) -> bool {
        let Some(marker) = self.markers.remove(&id) else {
            return false;
        };
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.surface.remove_marker(marker.handle);
        true
    }

    pub fn pointer_enter(&mut self, id: ZoneId) {
        if let Some(marker) = self.markers.get_mut(&id) {
            if marker.state == MarkerState::Unselected {
                marker.state = MarkerState::Hovered;
                self.surface.set_tooltip_visible(marker.handle, true);
            }
        }
    }

    pub fn pointer_leave(&mut self, id: ZoneId) {
        if let Some(marker) = self.markers.get_mut(&id) {
            if marker.state == MarkerState::Hovered {
                marker.state = MarkerState::Unselected;
                self.surface.set_tooltip_visible(marker.handle, false);
            }
        }
    }

    /// Selects `id`, deselecting any previous marker, and notifies
    /// listeners. Returns false for unknown ids.
    pub fn click(&mut self, id: ZoneId) -> bool {
        if !self.markers.contains_key(&id) {
            return false;
        }

        if let Some(prev) = self.selected.filter(|prev| *prev != id) {
            if let Some(marker) = self.markers.get_mut(&prev) {
                marker.state = MarkerState::Unselected;
                self.surface.set_style(marker.handle, &marker.drawn_style());
                self.surface.set_tooltip_visible(marker.handle, false);
            }
        }

        if let Some(marker) = self.markers.get_mut(&id) {
            if marker.state != MarkerState::Selected {
                marker.state = MarkerState::Selected;
                self.surface.set_style(marker.handle, &marker.drawn_style());
                self.surface.set_tooltip_visible(marker.handle, true);
            }
        }
        self.selected = Some(id);

        if self.selections.send(id).is_err() {
            debug!(zone_id = id, "Zone selected with no listener");
        }
        true
    }

    pub fn selected(&self) -> Option<ZoneId> {
        self.selected
    }

    pub fn state(&self, id: ZoneId) -> Option<MarkerState> {
        self.markers.get(&id).map(|m| m.state)
    }

    /// Style currently drawn for `id`.
    pub fn style(&self, id: ZoneId) -> Option<MarkerStyle> {
        self.markers.get(&id).map(Marker::drawn_style)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn surface(&self) -> &S {
        &*self.surface
    }
}
