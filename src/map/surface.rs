use crate::availability::Color;

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Opaque id of a marker drawn on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Visual style of a zone marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub fill: Color,
    pub outline: Color,
    pub radius: u8,
    /// Outline width.
    pub weight: u8,
    pub fill_opacity: f32,
}

impl MarkerStyle {
    pub const RADIUS: u8 = 12;
    pub const WEIGHT: u8 = 2;
    pub const SELECTED_WEIGHT: u8 = 4;

    pub fn filled(fill: Color) -> Self {
        Self {
            fill,
            outline: Color::OUTLINE,
            radius: Self::RADIUS,
            weight: Self::WEIGHT,
            fill_opacity: 0.9,
        }
    }

    pub fn with_weight(self, weight: u8) -> Self {
        Self { weight, ..self }
    }
}

/// Something markers can be drawn on.
pub trait MapSurface {
    fn add_marker(&mut self, position: LatLng, style: &MarkerStyle, tooltip: &str) -> MarkerHandle;

    fn set_style(&mut self, handle: MarkerHandle, style: &MarkerStyle);

    fn set_tooltip_visible(&mut self, handle: MarkerHandle, visible: bool);

    fn remove_marker(&mut self, handle: MarkerHandle);
}
