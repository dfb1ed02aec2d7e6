//! Text and JSON rendering of the map legend, panel and detail views.

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;
use tracing::debug;

use crate::availability::{AvailabilityLevel, Color};
use crate::detail::ZoneDetail;
use crate::map::ZoneColors;
use crate::model::{Event, Zone};
use crate::panel::{EventAlert, PanelState, PanelView, PredictionCard};

/// Logs any view using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Writes any view to stdout as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn swatch(color: Color, ansi: bool) -> String {
    if ansi {
        format!("\x1b[38;2;{};{};{}m■\x1b[0m", color.r, color.g, color.b)
    } else {
        format!("[{}]", color.hex())
    }
}

/// One line: `■ High  ■ Medium  ■ Low`.
pub fn render_legend(ansi: bool) -> String {
    AvailabilityLevel::ALL
        .iter()
        .map(|l| format!("{} {}", swatch(l.color(), ansi), l))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Zone list with each zone's current color, as shown before a selection.
pub fn render_zone_list<'a>(
    zones: impl IntoIterator<Item = &'a Zone>,
    colors: &ZoneColors,
    ansi: bool,
) -> String {
    let mut out = String::new();
    for zone in zones {
        let level = colors
            .level(zone.id)
            .map(|l| l.as_str())
            .unwrap_or("unavailable");
        let _ = writeln!(
            out,
            "{} {:>2}  {:<40} {}",
            swatch(colors.color(zone.id), ansi),
            zone.id,
            zone.name,
            level
        );
    }
    out
}

pub fn render_card(card: &PredictionCard) -> String {
    format!(
        "{:>8}  {:<6}  {:>4} / {} spaces  {:.0}% occupied",
        card.time_label, card.level, card.available_spaces, card.total_spaces, card.occupancy_percent
    )
}

pub fn render_alert(alert: &EventAlert) -> String {
    format!(
        "Event nearby: {} ({} impact)",
        alert.event_names.join(", "),
        alert.impact
    )
}

fn render_view(view: &PanelView, zone_name: &str) -> String {
    let mut out = String::new();
    if let Some(alert) = &view.alert {
        let _ = writeln!(out, "{}", render_alert(alert));
    }
    let _ = writeln!(
        out,
        "{}  ({:.0}% confidence)",
        zone_name, view.confidence_percent
    );
    for card in &view.cards {
        let _ = writeln!(out, "  {}", render_card(card));
    }
    out
}

/// Renders whatever the panel currently shows.
pub fn render_panel(state: &PanelState, zone_name: &str) -> String {
    match state {
        PanelState::Idle => "Select a zone\n".to_string(),
        PanelState::Loading { .. } => "Loading predictions...\n".to_string(),
        PanelState::Ready(view) => render_view(view, zone_name),
        PanelState::Failed { message, .. } => format!("{message}\n"),
    }
}

pub fn render_event(event: &Event) -> String {
    format!(
        "{}  {} - {}  {} Impact",
        event.name, event.start_time, event.end_time, event.expected_impact
    )
}

pub fn render_detail(detail: &ZoneDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", detail.zone.name);
    let _ = writeln!(
        out,
        "Location: {:.4}, {:.4}",
        detail.zone.lat, detail.zone.lng
    );
    let _ = writeln!(
        out,
        "Time: {} {}",
        detail.query.date_param(),
        detail.query.hour
    );

    if !detail.events.is_empty() {
        let _ = writeln!(out, "Upcoming events:");
        for e in &detail.events {
            let _ = writeln!(out, "  {}", render_event(e));
        }
    }

    match &detail.prediction {
        Ok(card) => {
            let _ = writeln!(out, "Prediction: {}", render_card(card));
            let _ = writeln!(out, "  {}", card.level.label());
            let _ = writeln!(out, "  {:.0}% confidence", card.confidence_percent);
        }
        Err(msg) => {
            let _ = writeln!(out, "Prediction unavailable: {msg}");
        }
    }
    out
}
