use crate::config::RouteConfig;
use crate::utils::error::{Result, RouteMapError};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub route: Option<RouteSection>,
    pub dataset: Option<DatasetConfig>,
    pub map: Option<MapConfig>,
    pub output: Option<OutputConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteSection {
    pub source: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub airports_url: Option<String>,
    pub routes_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapConfig {
    pub zoom_start: Option<u8>,
    pub line_color: Option<String>,
    pub line_weight: Option<f64>,
    pub line_opacity: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: Option<String>,
    pub formats: Option<Vec<String>>,
    pub file_stem: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RouteMapError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn source_iata(&self) -> Option<&str> {
        self.route.as_ref()?.source.as_deref()
    }

    pub fn destination_iata(&self) -> Option<&str> {
        self.route.as_ref()?.destination.as_deref()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    /// 將檔案中有設定的欄位覆蓋到 `config`
    pub fn apply_to(&self, config: &mut RouteConfig) {
        if let Some(dataset) = &self.dataset {
            if let Some(url) = &dataset.airports_url {
                config.airports_source = url.clone();
            }
            if let Some(url) = &dataset.routes_url {
                config.routes_source = url.clone();
            }
        }

        if let Some(map) = &self.map {
            if let Some(zoom) = map.zoom_start {
                config.style.zoom_start = zoom;
            }
            if let Some(color) = &map.line_color {
                config.style.line_color = color.clone();
            }
            if let Some(weight) = map.line_weight {
                config.style.line_weight = weight;
            }
            if let Some(opacity) = map.line_opacity {
                config.style.line_opacity = opacity;
            }
        }

        if let Some(output) = &self.output {
            if let Some(path) = &output.output_path {
                config.output_path = path.clone();
            }
            if let Some(formats) = &output.formats {
                config.output_formats = formats.clone();
            }
            if let Some(stem) = &output.file_stem {
                config.file_stem = stem.clone();
            }
        }

        config.monitor |= self.monitoring_enabled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[route]
source = "lhr"
destination = "JFK"

[dataset]
airports_url = "./data/airports.dat"
routes_url = "https://example.com/routes.dat"

[map]
zoom_start = 4
line_color = "green"
line_weight = 3.0

[output]
output_path = "./maps"
formats = ["html", "geojson"]
file_stem = "route_{timestamp}"

[monitoring]
enabled = true
"#;

        let file = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(file.source_iata(), Some("lhr"));
        assert_eq!(file.destination_iata(), Some("JFK"));
        assert!(file.monitoring_enabled());

        let mut config = RouteConfig::new("lhr", "JFK");
        file.apply_to(&mut config);

        assert_eq!(config.airports_source, "./data/airports.dat");
        assert_eq!(config.routes_source, "https://example.com/routes.dat");
        assert_eq!(config.style.zoom_start, 4);
        assert_eq!(config.style.line_color, "green");
        assert_eq!(config.style.line_weight, 3.0);
        assert_eq!(config.style.line_opacity, 1.0);
        assert_eq!(config.output_path, "./maps");
        assert_eq!(config.output_formats, vec!["html", "geojson"]);
        assert_eq!(config.file_stem, "route_{timestamp}");
        assert!(config.monitor);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_keeps_defaults() {
        let file = TomlConfig::from_toml_str("").unwrap();
        let mut config = RouteConfig::new("LHR", "JFK");
        file.apply_to(&mut config);

        assert_eq!(config.airports_source, crate::config::DEFAULT_AIRPORTS_URL);
        assert_eq!(config.style.zoom_start, 3);
        assert!(!config.monitor);
        assert!(file.source_iata().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FLIGHT_MAP_TEST_DATA_DIR", "/srv/openflights");

        let toml_content = r#"
[dataset]
airports_url = "${FLIGHT_MAP_TEST_DATA_DIR}/airports.dat"
routes_url = "${FLIGHT_MAP_TEST_UNSET_VAR}/routes.dat"
"#;

        let file = TomlConfig::from_toml_str(toml_content).unwrap();
        let dataset = file.dataset.unwrap();
        assert_eq!(
            dataset.airports_url.as_deref(),
            Some("/srv/openflights/airports.dat")
        );
        assert_eq!(
            dataset.routes_url.as_deref(),
            Some("${FLIGHT_MAP_TEST_UNSET_VAR}/routes.dat")
        );

        std::env::remove_var("FLIGHT_MAP_TEST_DATA_DIR");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[map]\nzoom_start = \"three\"\n");
        assert!(matches!(result, Err(RouteMapError::TomlError(_))));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\nformats = [\"geojson\"]\n")
            .unwrap();

        let file = TomlConfig::from_file(temp_file.path()).unwrap();
        let output = file.output.unwrap();
        assert_eq!(output.formats, Some(vec!["geojson".to_string()]));
    }
}
