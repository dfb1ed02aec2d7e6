use std::collections::BTreeMap;

use super::surface::{LatLng, MapSurface, MarkerHandle, MarkerStyle};
use crate::model::Zone;

const MARKER: char = '●';
const MARKER_SELECTED: char = '◉';

struct TextMarker {
    position: LatLng,
    style: MarkerStyle,
    tooltip: String,
    tooltip_visible: bool,
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
}

/// A [`MapSurface`] that draws markers on a character grid, north up.
///
/// The grid covers the bounding box of the zones it was created for, so
/// every zone lands inside it.
pub struct TextMap {
    width: usize,
    height: usize,
    bounds: Bounds,
    markers: BTreeMap<u64, TextMarker>,
    next: u64,
}

impl TextMap {
    pub fn new<'a>(width: usize, height: usize, zones: impl IntoIterator<Item = &'a Zone>) -> Self {
        let mut bounds: Option<Bounds> = None;
        for z in zones {
            bounds = Some(match bounds {
                None => Bounds {
                    min_lat: z.lat,
                    max_lat: z.lat,
                    min_lng: z.lng,
                    max_lng: z.lng,
                },
                Some(b) => Bounds {
                    min_lat: b.min_lat.min(z.lat),
                    max_lat: b.max_lat.max(z.lat),
                    min_lng: b.min_lng.min(z.lng),
                    max_lng: b.max_lng.max(z.lng),
                },
            });
        }

        Self {
            width: width.max(1),
            height: height.max(1),
            bounds: bounds.unwrap_or(Bounds {
                min_lat: 0.0,
                max_lat: 0.0,
                min_lng: 0.0,
                max_lng: 0.0,
            }),
            markers: BTreeMap::new(),
            next: 0,
        }
    }

    /// Grid cell `(column, row)` for a position, clamped to the grid.
    pub fn cell(&self, position: LatLng) -> (usize, usize) {
        let b = self.bounds;
        let col = scale(position.lng, b.min_lng, b.max_lng, self.width);
        // Row 0 is the northern edge.
        let row = self.height - 1 - scale(position.lat, b.min_lat, b.max_lat, self.height);
        (col, row)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Draws the grid with a border, followed by one line per visible
    /// tooltip. `ansi` colors markers with their fill color.
    pub fn render(&self, ansi: bool) -> String {
        let mut grid = vec![vec![String::from(" "); self.width]; self.height];

        for marker in self.markers.values() {
            let (col, row) = self.cell(marker.position);
            grid[row][col] = glyph(&marker.style, ansi);
        }

        let border = format!("+{}+", "-".repeat(self.width));
        let mut out = String::new();
        out.push_str(&border);
        out.push('\n');
        for row in grid {
            out.push('|');
            out.push_str(&row.concat());
            out.push_str("|\n");
        }
        out.push_str(&border);
        out.push('\n');

        for marker in self.markers.values().filter(|m| m.tooltip_visible) {
            out.push_str(&format!("  {} {}\n", glyph(&marker.style, ansi), marker.tooltip));
        }
        out
    }
}

fn scale(v: f64, min: f64, max: f64, cells: usize) -> usize {
    let span = max - min;
    if span <= f64::EPSILON || cells == 1 {
        return cells / 2;
    }
    let t = ((v - min) / span).clamp(0.0, 1.0);
    (t * (cells - 1) as f64).round() as usize
}

fn glyph(style: &MarkerStyle, ansi: bool) -> String {
    let ch = if style.weight >= MarkerStyle::SELECTED_WEIGHT {
        MARKER_SELECTED
    } else {
        MARKER
    };
    if ansi {
        let c = style.fill;
        format!("\x1b[38;2;{};{};{}m{}\x1b[0m", c.r, c.g, c.b, ch)
    } else {
        ch.to_string()
    }
}

impl MapSurface for TextMap {
    fn add_marker(&mut self, position: LatLng, style: &MarkerStyle, tooltip: &str) -> MarkerHandle {
        self.next += 1;
        self.markers.insert(
            self.next,
            TextMarker {
                position,
                style: *style,
                tooltip: tooltip.to_string(),
                tooltip_visible: false,
            },
        );
        MarkerHandle(self.next)
    }

    fn set_style(&mut self, handle: MarkerHandle, style: &MarkerStyle) {
        if let Some(m) = self.markers.get_mut(&handle.0) {
            m.style = *style;
        }
    }

    fn set_tooltip_visible(&mut self, handle: MarkerHandle, visible: bool) {
        if let Some(m) = self.markers.get_mut(&handle.0) {
            m.tooltip_visible = visible;
        }
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::Color;
    use crate::zones::ZoneRegistry;

    #[test]
    fn test_cell_maps_bounding_box_corners() {
        let reg = ZoneRegistry::builtin();
        let map = TextMap::new(40, 20, reg.iter());

        // Fremont is the westernmost zone, University Way the northernmost,
        // Occidental the southernmost.
        let fremont = reg.lookup(10).unwrap();
        let (col, _) = map.cell(LatLng { lat: fremont.lat, lng: fremont.lng });
        assert_eq!(col, 0);

        let north = reg.lookup(5).unwrap();
        let (_, row) = map.cell(LatLng { lat: north.lat, lng: north.lng });
        assert_eq!(row, 0);

        let south = reg.lookup(6).unwrap();
        let (_, row) = map.cell(LatLng { lat: south.lat, lng: south.lng });
        assert_eq!(row, 19);
    }

    #[test]
    fn test_single_zone_lands_in_center() {
        let zone = Zone {
            id: 1,
            name: "Only".to_string(),
            lat: 47.6,
            lng: -122.3,
            total_spaces: 0,
        };
        let map = TextMap::new(11, 5, [&zone]);
        assert_eq!(map.cell(LatLng { lat: 47.6, lng: -122.3 }), (5, 2));
    }

    #[test]
    fn test_render_draws_markers_and_visible_tooltips() {
        let reg = ZoneRegistry::builtin();
        let mut map = TextMap::new(60, 24, reg.iter());
        let a = map.add_marker(
            LatLng { lat: 47.6105, lng: -122.3380 },
            &MarkerStyle::filled(Color::HIGH),
            "Downtown Pike St",
        );
        map.add_marker(
            LatLng { lat: 47.6505, lng: -122.3493 },
            &MarkerStyle::filled(Color::LOW),
            "Fremont - Fremont Ave",
        );
        map.set_tooltip_visible(a, true);
        map.set_style(a, &MarkerStyle::filled(Color::HIGH).with_weight(MarkerStyle::SELECTED_WEIGHT));

        let out = map.render(false);
        assert_eq!(out.matches(MARKER).count(), 1);
        assert!(out.contains("◉ Downtown Pike St"));
        assert!(!out.contains("Fremont - Fremont Ave"));
    }

    #[test]
    fn test_render_ansi_uses_fill_color() {
        let reg = ZoneRegistry::builtin();
        let mut map = TextMap::new(20, 10, reg.iter());
        map.add_marker(
            LatLng { lat: 47.62, lng: -122.33 },
            &MarkerStyle::filled(Color::MEDIUM),
            "x",
        );
        assert!(map.render(true).contains("\x1b[38;2;255;192;67m"));
    }

    #[test]
    fn test_remove_marker() {
        let reg = ZoneRegistry::builtin();
        let mut map = TextMap::new(20, 10, reg.iter());
        let h = map.add_marker(LatLng { lat: 47.62, lng: -122.33 }, &MarkerStyle::filled(Color::LOW), "x");
        map.remove_marker(h);
        assert_eq!(map.marker_count(), 0);
    }
}
