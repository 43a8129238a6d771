use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Smallest surface edge, in text cells, that still leaves room to draw.
pub const MIN_SURFACE_CELLS: u32 = 2;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Open-Meteo endpoints
    #[serde(default)]
    pub api: ApiConfig,

    /// Timeouts and retry policy for both endpoints
    #[serde(default)]
    pub network: NetworkConfig,

    /// Waveform animation settings
    #[serde(default)]
    pub render: RenderConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,

    /// Fixed device coordinates, used by the "use my location" trigger
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub geocode_url: String,
    pub forecast_url: String,
    /// How many suggestions a type-to-search request asks for
    pub suggestion_count: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            suggestion_count: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    /// How long to wait for a device location fix
    #[serde(default = "default_locate_timeout_secs")]
    pub locate_timeout_secs: u64,
}

fn default_locate_timeout_secs() -> u64 {
    10
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_retries: 2,
            initial_backoff_ms: 200,
            max_backoff_ms: 2000,
            locate_timeout_secs: default_locate_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Delay between animation frames (16 ms is roughly one display refresh)
    pub frame_interval_ms: u64,
    pub surface_width: u32,
    pub surface_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            surface_width: 72,
            surface_height: 12,
        }
    }
}

/// Theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    pub theme: ThemePreference,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationConfig {
    /// Both coordinates, if configured.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

impl Config {
    /// Load configuration from the user config directory, creating the
    /// default file if it doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, writing defaults there when absent.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns an error if validation fails with critical errors; warnings are logged.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.api.geocode_url, "api.geocode_url", &mut result);
        self.validate_url(&self.api.forecast_url, "api.forecast_url", &mut result);

        if self.api.suggestion_count == 0 {
            result.add_error("api.suggestion_count", "Suggestion count must be greater than 0");
        } else if self.api.suggestion_count > 100 {
            // Open-Meteo caps geocoding results at 100
            result.add_warning("api.suggestion_count", "Suggestion count above 100 is clamped");
        }

        if self.network.timeout_secs == 0 {
            result.add_error("network.timeout_secs", "Timeout must be greater than 0");
        } else if self.network.timeout_secs > 120 {
            result.add_warning("network.timeout_secs", "Timeout is unusually long (>120s)");
        }

        if self.network.max_retries > 10 {
            result.add_warning("network.max_retries", "More than 10 retries per request");
        }

        if self.network.initial_backoff_ms > self.network.max_backoff_ms {
            result.add_warning(
                "network.initial_backoff_ms",
                "Initial backoff exceeds max backoff; every retry waits the max",
            );
        }

        if self.render.frame_interval_ms == 0 {
            result.add_error("render.frame_interval_ms", "Frame interval must be greater than 0");
        }

        // one row and one column are taken by the text grid's edges
        if self.render.surface_width < MIN_SURFACE_CELLS {
            result.add_error("render.surface_width", "Surface width must be at least 2");
        }

        if self.render.surface_height < MIN_SURFACE_CELLS {
            result.add_error("render.surface_height", "Surface height must be at least 2");
        }

        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    result.add_error("location.latitude", "Latitude must be within [-90, 90]");
                }
                if !(-180.0..=180.0).contains(&lon) {
                    result.add_error("location.longitude", "Longitude must be within [-180, 180]");
                }
            }
            (None, None) => {}
            _ => result.add_warning(
                "location",
                "Only one coordinate configured - device location is unavailable",
            ),
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("wavecast");

        Ok(config_dir.join("config.toml"))
    }
}
