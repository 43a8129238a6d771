pub mod config;
pub mod error;

pub use config::{
    ApiConfig, Config, LocationConfig, NetworkConfig, RenderConfig, ThemePreference, UiConfig,
    ValidationResult,
};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt, WeatherError};

use anyhow::Result;

/// Initialize logging for the application.
///
/// Honors `RUST_LOG`; falls back to `info`. Logs go to stderr so stdout stays
/// free for rendered output. Safe to call more than once.
pub fn init() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    tracing::info!("Wavecast core initialized");
    Ok(())
}
