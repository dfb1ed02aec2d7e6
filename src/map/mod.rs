//! Zone map: marker ownership, selection state and availability coloring.
//!
//! [`MapSurface`] is whatever actually draws (a tile map, a terminal grid).
//! [`MapRenderer`] borrows one surface for the lifetime of a page view and
//! owns the marker handles it creates on it. [`color_zones`] fetches one
//! prediction per zone and [`paint`] pushes the resulting colors to the
//! renderer.

mod coloring;
mod renderer;
mod surface;
mod text;

pub use coloring::{ZoneColors, color_zones, paint};
pub use renderer::{MapRenderer, MarkerState};
pub use surface::{LatLng, MapSurface, MarkerHandle, MarkerStyle};
pub use text::TextMap;
