pub mod errors;

use std::time::Duration;
use log::info;
use ureq::Agent;
use crate::manager_meteo::errors::MeteoError;
use crate::models::open_meteo::WeatherData;

/// Hourly series requested from Open-Meteo
const HOURLY_PARAMS: &str = "temperature_2m,relative_humidity_2m,dew_point_2m,\
cloud_cover,cloud_cover_low,cloud_cover_mid,cloud_cover_high,\
wind_speed_10m,wind_direction_10m,precipitation_probability";

/// Current conditions requested from Open-Meteo
const CURRENT_PARAMS: &str = "temperature_2m,relative_humidity_2m,cloud_cover,\
wind_speed_10m,wind_direction_10m,precipitation_probability,dew_point_2m";

/// Struct for managing weather forecasts produced by Open-Meteo
pub struct OpenMeteo {
    agent: Agent,
}

impl OpenMeteo {
    /// Returns an OpenMeteo struct ready for fetching weather forecasts
    pub fn new() -> OpenMeteo {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        let agent = config.into();

        Self { agent }
    }

    /// Retrieves a seven day hourly forecast for the given point.
    ///
    /// Timestamps in the returned document are local to the point, with
    /// the zone resolved by the provider, so they line up with the sun
    /// event times computed for the same point.
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude for the point to get forecasts for
    /// * 'long' - longitude for the point to get forecasts for
    pub fn get_forecast(&self, lat: f64, long: f64) -> Result<WeatherData, MeteoError> {
        info!("fetching forecast for lat {:.4}, long {:.4}", lat, long);

        let json = self.agent
            .get("https://api.open-meteo.com/v1/forecast")
            .query("latitude", &format!("{:.4}", lat))
            .query("longitude", &format!("{:.4}", long))
            .query("hourly", HOURLY_PARAMS)
            .query("current", CURRENT_PARAMS)
            .query("timezone", "auto")
            .query("forecast_days", "7")
            .query("models", "best_match")
            .call()?
            .body_mut()
            .read_to_string()?;

        let data: WeatherData = serde_json::from_str(&json)?;

        Ok(data)
    }
}
