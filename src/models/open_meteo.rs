use serde::Deserialize;

#[derive(Deserialize)]
pub struct WeatherData {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub utc_offset_seconds: i32,
    pub current: CurrentWeather,
    pub hourly: HourlyWeather,
}

#[derive(Deserialize)]
pub struct CurrentWeather {
    pub time: String,
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: u8,
    #[serde(rename = "cloud_cover")]
    pub cloud_cover: u8,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
    #[serde(rename = "wind_direction_10m")]
    pub wind_direction: f64,
    #[serde(rename = "precipitation_probability", default)]
    pub precipitation_probability: u8,
    #[serde(rename = "dew_point_2m")]
    pub dew_point: f64,
}

/// Hourly series as delivered by Open-Meteo. All series are index aligned
/// to the time array, but any of them may come back shorter (never longer)
/// when a model lacks a parameter, hence the defaults.
#[derive(Deserialize, Default)]
pub struct HourlyWeather {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m", default)]
    pub temperature: Vec<f64>,
    #[serde(rename = "relative_humidity_2m", default)]
    pub humidity: Vec<u8>,
    #[serde(rename = "cloud_cover", default)]
    pub cloud_cover: Vec<u8>,
    #[serde(rename = "cloud_cover_low", default)]
    pub cloud_cover_low: Vec<u8>,
    #[serde(rename = "cloud_cover_mid", default)]
    pub cloud_cover_mid: Vec<u8>,
    #[serde(rename = "cloud_cover_high", default)]
    pub cloud_cover_high: Vec<u8>,
    #[serde(rename = "wind_speed_10m", default)]
    pub wind_speed: Vec<f64>,
    #[serde(rename = "wind_direction_10m", default)]
    pub wind_direction: Vec<f64>,
    #[serde(rename = "precipitation_probability", default)]
    pub precipitation_probability: Vec<u8>,
    #[serde(rename = "dew_point_2m", default)]
    pub dew_point: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "latitude": 48.86,
        "longitude": 2.35,
        "generationtime_ms": 0.29,
        "utc_offset_seconds": 7200,
        "timezone": "Europe/Paris",
        "timezone_abbreviation": "CEST",
        "elevation": 38.0,
        "current": {
            "time": "2025-06-20T22:00",
            "interval": 900,
            "temperature_2m": 18.4,
            "relative_humidity_2m": 62,
            "cloud_cover": 25,
            "wind_speed_10m": 8.6,
            "wind_direction_10m": 310,
            "precipitation_probability": 5,
            "dew_point_2m": 11.1
        },
        "hourly": {
            "time": ["2025-06-20T22:00", "2025-06-20T23:00"],
            "temperature_2m": [18.4, 17.2],
            "relative_humidity_2m": [62, 68],
            "cloud_cover": [25, 10],
            "cloud_cover_low": [10, 5],
            "cloud_cover_mid": [15, 5],
            "cloud_cover_high": [0, 0],
            "wind_speed_10m": [8.6, 7.1],
            "wind_direction_10m": [310, 305],
            "precipitation_probability": [5, 0],
            "dew_point_2m": [11.1, 11.0]
        }
    }"#;

    #[test]
    fn deserializes_full_document() {
        let data: WeatherData = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(data.utc_offset_seconds, 7200);
        assert_eq!(data.timezone, "Europe/Paris");
        assert_eq!(data.current.humidity, 62);
        assert_eq!(data.hourly.time.len(), 2);
        assert_eq!(data.hourly.cloud_cover, vec![25, 10]);
        assert_eq!(data.hourly.wind_direction, vec![310.0, 305.0]);
    }

    #[test]
    fn missing_hourly_series_default_to_empty() {
        let json = r#"{
            "latitude": 0.0,
            "longitude": 0.0,
            "timezone": "UTC",
            "utc_offset_seconds": 0,
            "current": {
                "time": "2025-06-20T22:00",
                "temperature_2m": 10.0,
                "relative_humidity_2m": 50,
                "cloud_cover": 0,
                "wind_speed_10m": 0.0,
                "wind_direction_10m": 0,
                "dew_point_2m": 5.0
            },
            "hourly": {
                "time": ["2025-06-20T22:00"]
            }
        }"#;

        let data: WeatherData = serde_json::from_str(json).unwrap();

        assert_eq!(data.hourly.time.len(), 1);
        assert!(data.hourly.temperature.is_empty());
        assert!(data.hourly.precipitation_probability.is_empty());
        assert_eq!(data.current.precipitation_probability, 0);
    }
}
