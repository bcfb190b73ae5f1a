use std::fmt;
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use crate::models::open_meteo::HourlyWeather;
use crate::seeing::{calculate_rating, calculate_seeing};

/// Time format used by Open-Meteo for local timestamps
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// One hour of forecast data with the derived observation scores
#[derive(Clone, Copy, Serialize)]
pub struct ForecastHour {
    pub date_time: NaiveDateTime,
    pub hour: u32,
    pub clouds: u8,
    pub clouds_low: u8,
    pub clouds_mid: u8,
    pub clouds_high: u8,
    pub temperature: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub humidity: u8,
    pub dew_point: f64,
    pub precipitation_probability: u8,
    pub seeing: u8,
    pub rating: u8,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for ForecastHour {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:>2}h {:>5}% {:>3}/{:>3}/{:>3} {:>6.1}C {:>6.1}C {:>5.0}km/h {:>4}% {:>5}% {:>6} {:>6}",
               self.hour, self.clouds,
               self.clouds_low, self.clouds_mid, self.clouds_high,
               self.temperature, self.dew_point,
               self.wind_speed, self.humidity, self.precipitation_probability,
               self.seeing, self.rating)
    }
}

/// Builds the ordered hourly forecast sequence from the raw Open-Meteo
/// hourly series.
///
/// The value series are index aligned to the time series but may be
/// shorter; a missing element is read as zero so a partial provider
/// answer still yields a full sequence. A timestamp that does not parse
/// is an error, since a bad time would silently corrupt the night
/// windowing downstream.
///
/// # Arguments
///
/// * 'hourly' - the raw hourly series keyed by a common time series
pub fn build_forecast_hours(hourly: &HourlyWeather) -> Result<Vec<ForecastHour>, chrono::ParseError> {
    let mut forecast: Vec<ForecastHour> = Vec::with_capacity(hourly.time.len());

    for (i, time) in hourly.time.iter().enumerate() {
        let date_time = NaiveDateTime::parse_from_str(time, TIME_FORMAT)?;

        let temperature = value_at(&hourly.temperature, i);
        let dew_point = value_at(&hourly.dew_point, i);
        let wind_speed = value_at(&hourly.wind_speed, i);
        let humidity = value_at(&hourly.humidity, i);
        let clouds = value_at(&hourly.cloud_cover, i);

        let seeing = calculate_seeing(temperature, dew_point, wind_speed, humidity);
        let rating = calculate_rating(clouds, humidity, wind_speed, temperature, dew_point, seeing);

        forecast.push(ForecastHour {
            date_time,
            hour: date_time.hour(),
            clouds,
            clouds_low: value_at(&hourly.cloud_cover_low, i),
            clouds_mid: value_at(&hourly.cloud_cover_mid, i),
            clouds_high: value_at(&hourly.cloud_cover_high, i),
            temperature,
            wind_speed,
            wind_direction: value_at(&hourly.wind_direction, i),
            humidity,
            dew_point,
            precipitation_probability: value_at(&hourly.precipitation_probability, i),
            seeing,
            rating,
        });
    }

    Ok(forecast)
}

/// Reads one element from a value series, or zero when the series is
/// shorter than the time series
///
/// # Arguments
///
/// * 'values' - the value series
/// * 'idx' - index into the series
fn value_at<T: Copy + Default>(values: &[T], idx: usize) -> T {
    values.get(idx).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hourly(n: usize) -> HourlyWeather {
        HourlyWeather {
            time: (0..n).map(|i| format!("2025-06-20T{:02}:00", i % 24)).collect(),
            temperature: vec![12.5; n],
            humidity: vec![55; n],
            cloud_cover: vec![20; n],
            cloud_cover_low: vec![10; n],
            cloud_cover_mid: vec![5; n],
            cloud_cover_high: vec![5; n],
            wind_speed: vec![9.0; n],
            wind_direction: vec![270.0; n],
            precipitation_probability: vec![3; n],
            dew_point: vec![8.0; n],
        }
    }

    #[test]
    fn one_record_per_timestamp() {
        let hourly = sample_hourly(24);
        let forecast = build_forecast_hours(&hourly).unwrap();

        assert_eq!(forecast.len(), 24);
        assert_eq!(forecast[0].hour, 0);
        assert_eq!(forecast[23].hour, 23);
        assert!(forecast.windows(2).all(|w| w[0].date_time < w[1].date_time));
    }

    #[test]
    fn short_series_read_as_zero() {
        let mut hourly = sample_hourly(6);
        hourly.humidity.truncate(4);

        let forecast = build_forecast_hours(&hourly).unwrap();

        assert_eq!(forecast.len(), 6);
        assert_eq!(forecast[3].humidity, 55);
        assert_eq!(forecast[4].humidity, 0);
        assert_eq!(forecast[5].humidity, 0);
    }

    #[test]
    fn scores_are_computed_per_hour() {
        let hourly = sample_hourly(3);
        let forecast = build_forecast_hours(&hourly).unwrap();

        let expected = calculate_seeing(12.5, 8.0, 9.0, 55);
        assert!(forecast.iter().all(|h| h.seeing == expected));
        assert!(forecast.iter().all(|h| h.rating <= 5));
    }

    #[test]
    fn unparseable_timestamp_is_an_error() {
        let mut hourly = sample_hourly(3);
        hourly.time[1] = "not-a-time".to_string();

        assert!(build_forecast_hours(&hourly).is_err());
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        let forecast = build_forecast_hours(&HourlyWeather::default()).unwrap();
        assert!(forecast.is_empty());
    }
}
