use anyhow::Result;
use chrono::NaiveDateTime;
use log::{info, warn};
use crate::forecast::{build_forecast_hours, ForecastHour, TIME_FORMAT};
use crate::initialization::Mgr;
use crate::manager_astro::{moon_info, sun_times, MoonInfo, SunTimes};
use crate::models::open_meteo::WeatherData;
use crate::models::place::Place;
use crate::night::{analyze_night, night_hours, Cardinal};

/// Fetches the forecast for the place, analyzes tonight and prints the
/// report
///
/// # Arguments
///
/// * 'mgr' - the manager bundle
/// * 'place' - the place to report on
pub fn run_report(mgr: &Mgr, place: &Place) -> Result<()> {
    let weather = mgr.meteo.get_forecast(place.lat, place.long)?;
    let forecast = build_forecast_hours(&weather.hourly)?;

    let now = NaiveDateTime::parse_from_str(&weather.current.time, TIME_FORMAT)?;
    let sun = sun_times(place.lat, place.long, now.date(), weather.utc_offset_seconds);
    let moon = moon_info(now.date());

    info!("forecast covers {} hours from {} in zone {} ({:.2}, {:.2})",
          forecast.len(), now, weather.timezone, weather.latitude, weather.longitude);

    print_header(place, &weather, &sun, &moon);

    match (sun.sunset, sun.sunrise) {
        (Some(sunset), Some(sunrise)) => {
            let night = night_hours(&forecast, sunset, sunrise);
            if night.is_empty() {
                println!("No forecast hours fall within tonight.");
                return Ok(());
            }

            print_night_table(&night);

            let analysis = analyze_night(&forecast, sunset, sunrise);
            println!();
            println!("{}", analysis);
        },
        _ => {
            warn!("sun does not rise and set at lat {:.4} on {}", place.lat, now.date());
            println!("The sun does not set tonight at this latitude, so there is no");
            println!("astronomical night to plan an observation in.");
        }
    }

    Ok(())
}

/// Prints the place, current conditions, sun events and moon state
///
/// # Arguments
///
/// * 'place' - the place the report is for
/// * 'weather' - the raw weather document
/// * 'sun' - tonight's sun events
/// * 'moon' - the moon state
fn print_header(place: &Place, weather: &WeatherData, sun: &SunTimes, moon: &MoonInfo) {
    let current = &weather.current;

    println!("{}", place);
    println!("Now: {:.1}C (dew point {:.1}C), {}% humidity, {}% clouds",
             current.temperature, current.dew_point, current.humidity, current.cloud_cover);
    println!("Wind {:.0} km/h from {}, {}% rain chance",
             current.wind_speed, Cardinal::from_degrees(current.wind_direction),
             current.precipitation_probability);
    println!("Sunset {}   Dusk {}   Dawn {}   Sunrise {}",
             event_time(&sun.sunset), event_time(&sun.dusk),
             event_time(&sun.dawn), event_time(&sun.sunrise));
    println!("Moon: {} {} ({:.0}% illuminated)", moon.phase_name, moon.glyph, moon.illumination);
    println!();
}

/// Prints the hourly table for the night
///
/// # Arguments
///
/// * 'night' - the night hours
fn print_night_table(night: &[ForecastHour]) {
    println!("Hour Clouds L/M/H         Temp    Dew     Wind  Hum  Rain Seeing Rating");
    for hour in night {
        println!("{}", hour);
    }
}

/// Formats a sun event time, or a dash marker when the event does not
/// occur
///
/// # Arguments
///
/// * 'event' - the event time
fn event_time(event: &Option<NaiveDateTime>) -> String {
    match event {
        Some(t) => t.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}
