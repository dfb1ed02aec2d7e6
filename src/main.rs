//! CLI entry point for the parking predictor.
//!
//! Each subcommand mirrors one client route: `map` is the landing page
//! (zone map plus prediction panel), `zone` the zone detail page.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use parking_predictor::{
    config::Settings,
    detail::load_zone_detail,
    fetch::{BasicClient, Bearer},
    infra::backend::BackendClient,
    map::{MapRenderer, TextMap, ZoneColors, color_zones, paint},
    model::{Hour, TimeQuery, ZoneId},
    output,
    panel::{PanelState, PredictionPanel},
    services::prediction_api::PredictionApi,
    zones::ZoneRegistry,
};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "parking_predictor")]
#[command(about = "Parking availability predictions for city zones", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Color the zone map for a date and hour, optionally selecting a zone
    Map {
        /// Date to predict for (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Hour of day (0-23), defaults to the current hour
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=23))]
        hour: Option<u8>,

        /// Zone to select after the map is drawn
        #[arg(short, long)]
        select: Option<ZoneId>,

        /// Map width in characters
        #[arg(long, default_value_t = 60)]
        width: usize,

        /// Map height in characters
        #[arg(long, default_value_t = 20)]
        height: usize,

        /// Disable ANSI colors
        #[arg(long, default_value_t = false)]
        no_color: bool,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show the detail view for one zone
    Zone {
        zone_id: ZoneId,

        #[arg(short, long)]
        date: Option<NaiveDate>,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=23))]
        hour: Option<u8>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List known zones
    Zones {
        /// Ask the backend instead of the local registry
        #[arg(short, long, default_value_t = false)]
        remote: bool,
    },
    /// List events for a zone on a date
    Events {
        zone_id: ZoneId,

        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Serialize)]
struct MapReport<'a> {
    query: TimeQuery,
    zones: &'a ZoneColors,
    selected: Option<ZoneId>,
    panel: &'a PanelState,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/parking_predictor.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("parking_predictor.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let settings = Settings::from_env()?;

    let registry = match &settings.zones_file {
        Some(path) => ZoneRegistry::load(path)
            .with_context(|| format!("Failed to load zones from '{path}'"))?,
        None => ZoneRegistry::builtin(),
    };
    let api = build_api(&settings)?;
    info!(api_url = %settings.api_url, zones = registry.len(), "Starting");

    match cli.command {
        Commands::Map {
            date,
            hour,
            select,
            width,
            height,
            no_color,
            json,
        } => {
            let query = time_query(date, hour)?;
            run_map(
                api.as_ref(),
                &registry,
                query,
                select,
                (width, height),
                !no_color,
                json,
            )
            .await?;
        }
        Commands::Zone {
            zone_id,
            date,
            hour,
            json,
        } => {
            let query = time_query(date, hour)?;
            let detail = load_zone_detail(api.as_ref(), zone_id, query).await?;
            output::print_pretty(&detail);
            if json {
                output::print_json(&detail)?;
            } else {
                print!("{}", output::render_detail(&detail));
            }
        }
        Commands::Zones { remote } => {
            let zones = if remote {
                api.list_zones().await?
            } else {
                registry.iter().cloned().collect()
            };
            for zone in &zones {
                println!(
                    "{:>3}  {:<40} {:.4}, {:.4}",
                    zone.id, zone.name, zone.lat, zone.lng
                );
            }
        }
        Commands::Events { zone_id, date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let events = api.fetch_events(zone_id, date).await?;
            if events.is_empty() {
                println!("No events");
            }
            for event in &events {
                println!("{}", output::render_event(event));
            }
        }
    }

    Ok(())
}

fn build_api(settings: &Settings) -> Result<Box<dyn PredictionApi>> {
    let http = BasicClient::new(settings.timeout)?;
    let api: Box<dyn PredictionApi> = match &settings.api_token {
        Some(token) => Box::new(BackendClient::new(
            Bearer::new(http, token).context("PARKING_API_TOKEN is not a valid header value")?,
            &settings.api_url,
        )),
        None => Box::new(BackendClient::new(http, &settings.api_url)),
    };
    Ok(api)
}

fn time_query(date: Option<NaiveDate>, hour: Option<u8>) -> Result<TimeQuery> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let hour = match hour {
        Some(h) => Hour::new(h).context("hour must be between 0 and 23")?,
        None => Hour::now(),
    };
    Ok(TimeQuery::new(date, hour))
}

/// Colors the map, applies an optional selection and renders the panel
/// for the selected zone.
#[tracing::instrument(skip(api, registry, size, ansi, json), fields(date = %query.date, hour = query.hour.get()))]
async fn run_map(
    api: &dyn PredictionApi,
    registry: &ZoneRegistry,
    query: TimeQuery,
    select: Option<ZoneId>,
    size: (usize, usize),
    ansi: bool,
    json: bool,
) -> Result<()> {
    let colors = color_zones(api, registry, query).await;

    let mut surface = TextMap::new(size.0, size.1, registry.iter());
    let selected = {
        let (mut renderer, mut selections) = MapRenderer::new(&mut surface);
        paint(&mut renderer, registry, &colors);

        if let Some(id) = select {
            if !renderer.click(id) {
                warn!(zone_id = id, "Unknown zone, nothing selected");
            }
        }
        selections.try_recv().ok()
    };

    let mut panel = PredictionPanel::new();
    if let Some(id) = selected {
        panel.refresh(api, id, query).await;
    }

    if json {
        return output::print_json(&MapReport {
            query,
            zones: &colors,
            selected,
            panel: panel.state(),
        });
    }

    println!(
        "Parking availability for {} at {}",
        query.date_param(),
        query.hour
    );
    print!("{}", surface.render(ansi));
    println!("{}", output::render_legend(ansi));
    println!();

    match selected {
        Some(id) => {
            let name = registry
                .lookup(id)
                .map(|z| z.name.as_str())
                .unwrap_or("Unknown zone");
            print!("{}", output::render_panel(panel.state(), name));
        }
        None => {
            print!("{}", output::render_panel(panel.state(), ""));
            print!("{}", output::render_zone_list(registry.iter(), &colors, ansi));
        }
    }

    Ok(())
}
