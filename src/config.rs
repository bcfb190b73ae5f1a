use std::fs;
use std::path::Path;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize)]
#[serde(default)]
pub struct GeoRef {
    pub lat: f64,
    pub long: f64,
}

impl Default for GeoRef {
    fn default() -> Self {
        // Paris observatory
        GeoRef { lat: 48.8362, long: 2.3365 }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Files {
    pub favorites_file: String,
}

impl Default for Files {
    fn default() -> Self {
        Files { favorites_file: "favorites.json".to_string() }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            log_path: String::new(),
            log_level: LevelFilter::Info,
            log_to_stdout: false,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub geo_ref: GeoRef,
    pub files: Files,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items.
/// A missing file yields the default configuration so the tool runs unconfigured.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {

    let path = Path::new(config_path);
    if !path.exists() {
        return Ok(Config::default());
    }

    let toml = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&toml)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_a_full_config() {
        let toml = r#"
            [geo_ref]
            lat = 42.9365
            long = 0.1426

            [files]
            favorites_file = "/var/lib/nightwatch/favorites.json"

            [general]
            log_path = "/var/log/nightwatch.log"
            log_level = "DEBUG"
            log_to_stdout = true
        "#;

        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.geo_ref.lat, 42.9365);
        assert_eq!(config.files.favorites_file, "/var/lib/nightwatch/favorites.json");
        assert_eq!(config.general.log_level, LevelFilter::Debug);
        assert!(config.general.log_to_stdout);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[geo_ref]\nlat = 1.0\nlong = 2.0\n").unwrap();

        assert_eq!(config.geo_ref.lat, 1.0);
        assert_eq!(config.general.log_level, LevelFilter::Info);
        assert_eq!(config.files.favorites_file, "favorites.json");
    }

    #[test]
    fn missing_file_yields_the_default_config() {
        let config = load_config("/nonexistent/nightwatch.toml").unwrap();
        assert_eq!(config.geo_ref.lat, 48.8362);
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nightwatch.toml");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "[general]\nlog_to_stdout = true\n").unwrap();

        let config = load_config(path.to_str().unwrap()).unwrap();
        assert!(config.general.log_to_stdout);
    }
}
