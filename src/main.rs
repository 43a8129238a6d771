//! Wavecast terminal front end: analyze a place and print its forecast
//! waveforms as text.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use wavecast_core::Config;
use wavecast_render::TextSurface;
use wavecast_ui::{AnalysisOutcome, ControllerSettings, DashboardController, Notifier};
use wavecast_weather::{
    ConfiguredLocator, ForecastClient, GeocodeClient, HttpOptions, Metric, RetryPolicy,
};

#[derive(Parser)]
#[command(
    name = "wavecast",
    version,
    about = "Hourly temperature, pressure and wind as animated waveforms"
)]
struct Cli {
    /// Place to analyze, e.g. "Berlin"
    #[arg(required_unless_present = "here", conflicts_with = "here")]
    place: Vec<String>,

    /// Use the device location from the config file
    #[arg(long)]
    here: bool,

    /// Animation frames to let run before printing
    #[arg(long, default_value_t = 30)]
    frames: u32,
}

/// Prints notifications to stderr.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("wavecast: {}", message);
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    wavecast_core::init()?;
    let cli = Cli::parse();

    // warnings are logged by the loader
    let (config, _) = Config::load_validated().context("Failed to load configuration")?;

    let options = HttpOptions {
        timeout: Duration::from_secs(config.network.timeout_secs),
        retry: RetryPolicy::new(
            config.network.max_retries,
            config.network.initial_backoff_ms,
            config.network.max_backoff_ms,
        ),
    };
    let locator = ConfiguredLocator::new(config.location.coordinates());
    if cli.here && !locator.is_available() {
        tracing::warn!("--here needs [location] latitude and longitude in config.toml");
    }
    let geocoder = GeocodeClient::new(&config.api.geocode_url, &options, locator)
        .context("Failed to create geocoding client")?
        .with_locate_timeout(Duration::from_secs(config.network.locate_timeout_secs));
    let forecast = ForecastClient::new(&config.api.forecast_url, &options)
        .context("Failed to create forecast client")?;

    let settings = ControllerSettings::from_config(&config);
    let frame_interval = settings.frame_interval;
    let (columns, rows) = (
        config.render.surface_width as usize,
        config.render.surface_height as usize,
    );
    let controller = DashboardController::new(geocoder, forecast, ConsoleNotifier, settings, |_| {
        TextSurface::new(columns, rows)
    });

    let outcome = if cli.here {
        controller.geolocate().await
    } else {
        controller.search_and_analyze(&cli.place.join(" ")).await
    };

    if let AnalysisOutcome::Rendered { .. } = outcome {
        tokio::time::sleep(frame_interval * cli.frames).await;
        print_dashboard(&controller);
    }

    controller.shutdown().await;

    Ok(match outcome {
        AnalysisOutcome::Rendered { .. } => ExitCode::SUCCESS,
        AnalysisOutcome::NoLocation | AnalysisOutcome::Failed | AnalysisOutcome::Superseded => {
            ExitCode::FAILURE
        }
    })
}

fn print_dashboard<G, F, N>(controller: &DashboardController<G, F, N, TextSurface>)
where
    G: wavecast_weather::Geocoder,
    F: wavecast_weather::ForecastSource,
    N: Notifier,
{
    if let Some(place) = controller.selected() {
        println!(
            "{} ({:.2}, {:.2})  [{} theme]",
            place.label(),
            place.latitude,
            place.longitude,
            controller.theme().as_str()
        );
    }

    for metric in Metric::ALL {
        let Some(panel) = controller.panel(metric) else {
            continue;
        };
        let marker = if panel.is_expanded() { '▾' } else { '▸' };
        let range = panel
            .view()
            .and_then(|view| view.stats())
            .map(|s| format!("  {:.1} to {:.1} {}", s.min, s.max, metric.unit()))
            .unwrap_or_default();
        println!("\n{} {} ({}){}", marker, metric.label(), metric.unit(), range);
        if panel.is_expanded() {
            println!("{}", panel.surface().lock().render());
        }
    }

    if let Some(insights) = controller.insights() {
        println!();
        for line in [
            &insights.surface,
            &insights.pressure,
            &insights.wind,
            &insights.context,
        ] {
            println!("{}", line);
        }
    }
}
