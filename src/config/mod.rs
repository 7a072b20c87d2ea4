pub mod cli;
pub mod toml_config;

use crate::core::render::OutputFormat;
use crate::core::ConfigProvider;
use crate::domain::model::MapStyle;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_allowed_values, validate_dataset_source, validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AIRPORTS_URL: &str =
    "https://raw.githubusercontent.com/jpatokal/openflights/master/data/airports.dat";
pub const DEFAULT_ROUTES_URL: &str =
    "https://raw.githubusercontent.com/jpatokal/openflights/master/data/routes.dat";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_FILE_STEM: &str = "flight_map";
pub const MAX_ZOOM: u8 = 18;

/// 使用者輸入統一去除空白並轉為大寫
pub fn normalize_iata(code: &str) -> String {
    code.trim().to_uppercase()
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "flight-map")]
#[command(about = "Plot the route between two airports on a map")]
pub struct CliConfig {
    /// Source airport IATA code (prompted for when omitted)
    #[arg(short, long)]
    pub source: Option<String>,

    /// Destination airport IATA code (prompted for when omitted)
    #[arg(short, long)]
    pub destination: Option<String>,

    /// URL or local path of airports.dat
    #[arg(long)]
    pub airports_url: Option<String>,

    /// URL or local path of routes.dat
    #[arg(long)]
    pub routes_url: Option<String>,

    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long)]
    pub zoom_start: Option<u8>,

    /// Output formats: html, geojson
    #[arg(long, value_delimiter = ',')]
    pub formats: Vec<String>,

    /// File name prefix; `{timestamp}` is replaced with the current UTC time
    #[arg(long)]
    pub file_stem: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU/memory after each phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    pub source_iata: String,
    pub destination_iata: String,
    pub airports_source: String,
    pub routes_source: String,
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub file_stem: String,
    pub style: MapStyle,
    pub monitor: bool,
}

impl RouteConfig {
    pub fn new(source_iata: &str, destination_iata: &str) -> Self {
        Self {
            source_iata: normalize_iata(source_iata),
            destination_iata: normalize_iata(destination_iata),
            airports_source: DEFAULT_AIRPORTS_URL.to_string(),
            routes_source: DEFAULT_ROUTES_URL.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            output_formats: vec!["html".to_string()],
            file_stem: DEFAULT_FILE_STEM.to_string(),
            style: MapStyle::default(),
            monitor: false,
        }
    }

    /// 先套用 TOML 設定，再由命令列參數覆蓋
    #[cfg(feature = "cli")]
    pub fn from_layers(
        cli: &CliConfig,
        file: Option<&toml_config::TomlConfig>,
        source_iata: &str,
        destination_iata: &str,
    ) -> Self {
        let mut config = Self::new(source_iata, destination_iata);
        if let Some(file) = file {
            file.apply_to(&mut config);
        }

        if let Some(url) = &cli.airports_url {
            config.airports_source = url.clone();
        }
        if let Some(url) = &cli.routes_url {
            config.routes_source = url.clone();
        }
        if let Some(path) = &cli.output_path {
            config.output_path = path.clone();
        }
        if let Some(zoom) = cli.zoom_start {
            config.style.zoom_start = zoom;
        }
        if !cli.formats.is_empty() {
            config.output_formats = cli.formats.clone();
        }
        if let Some(stem) = &cli.file_stem {
            config.file_stem = stem.clone();
        }
        config.monitor |= cli.monitor;
        config
    }
}

impl ConfigProvider for RouteConfig {
    fn airports_source(&self) -> &str {
        &self.airports_source
    }

    fn routes_source(&self) -> &str {
        &self.routes_source
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> Vec<OutputFormat> {
        self.output_formats
            .iter()
            .filter_map(|format| format.parse().ok())
            .collect()
    }

    fn file_stem(&self) -> &str {
        &self.file_stem
    }

    fn map_style(&self) -> MapStyle {
        self.style.clone()
    }

    fn source_iata(&self) -> &str {
        &self.source_iata
    }

    fn destination_iata(&self) -> &str {
        &self.destination_iata
    }
}

impl Validate for RouteConfig {
    fn validate(&self) -> Result<()> {
        validate_dataset_source("dataset.airports_url", &self.airports_source)?;
        validate_dataset_source("dataset.routes_url", &self.routes_source)?;
        validate_path("output.output_path", &self.output_path)?;
        validate_path("output.file_stem", &self.file_stem)?;

        let formats: Vec<String> = self
            .output_formats
            .iter()
            .map(|format| format.trim().to_ascii_lowercase())
            .collect();
        validate_allowed_values("output.formats", &formats, &OutputFormat::SUPPORTED)?;

        validate_range("map.zoom_start", self.style.zoom_start, 0, MAX_ZOOM)?;
        validate_range("map.line_weight", self.style.line_weight, 0.0, 50.0)?;
        validate_range("map.line_opacity", self.style.line_opacity, 0.0, 1.0)?;
        Ok(())
    }
}
