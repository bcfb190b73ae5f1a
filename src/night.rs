use std::fmt;
use chrono::NaiveDateTime;
use serde::Serialize;
use crate::forecast::ForecastHour;

/// Max cloud cover in percent for an hour to count as good for observation
pub const GOOD_CLOUD_COVER_THRESHOLD: u8 = 30;

/// Number of consecutive good hours needed before a window qualifies
pub const CONSECUTIVE_GOOD_HOURS_REQUIRED: u32 = 2;

/// Resultant vector lengths below this mean the wind directions cancel out
const NO_DOMINANT_DIRECTION: f64 = 1e-9;

/// Start and end hour-of-day labels of an observation window. The labels
/// follow the night slice, so a window crossing midnight reads e.g. 23 to 2.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:>02}h - {:>02}h", self.start, self.end)
    }
}

/// The first qualifying observation window of the night together with the
/// lowest cloud cover seen inside it
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct BestWindow {
    pub range: TimeRange,
    pub lowest_cloud_cover: u8,
}

/// Eight point compass rose
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum Cardinal {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Cardinal {
    /// Returns the compass point whose 45 degree sector contains the
    /// given direction
    ///
    /// # Arguments
    ///
    /// * 'degrees' - wind direction in degrees
    pub fn from_degrees(degrees: f64) -> Cardinal {
        const SECTORS: [Cardinal; 8] = [
            Cardinal::N, Cardinal::NE, Cardinal::E, Cardinal::SE,
            Cardinal::S, Cardinal::SW, Cardinal::W, Cardinal::NW,
        ];

        let degrees = degrees.rem_euclid(360.0);
        SECTORS[(((degrees + 22.5) / 45.0).floor() as usize) % 8]
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cardinal::N  => write!(f, "N"),
            Cardinal::NE => write!(f, "NE"),
            Cardinal::E  => write!(f, "E"),
            Cardinal::SE => write!(f, "SE"),
            Cardinal::S  => write!(f, "S"),
            Cardinal::SW => write!(f, "SW"),
            Cardinal::W  => write!(f, "W"),
            Cardinal::NW => write!(f, "NW"),
        }
    }
}

/// Mean wind direction over the night with its compass label
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct WindDirection {
    pub degrees: u16,
    pub cardinal: Cardinal,
}

/// Night level analysis of the forecast for astronomical observation
#[derive(Clone, Serialize)]
pub struct NightForecast {
    pub best_window: Option<BestWindow>,
    pub extreme_cloud_cover: u8,
    pub display_cloud_cover: u8,
    pub nightly_temperature: i32,
    pub nightly_humidity: i32,
    pub nightly_wind_speed: i32,
    pub nightly_dew_point: i32,
    pub max_precipitation_probability: u8,
    pub wind_direction: Option<WindDirection>,
    pub seeing_index: u8,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for NightForecast {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.best_window {
            Some(w) => writeln!(f, "Best window  : {} (down to {}% clouds)", w.range, w.lowest_cloud_cover)?,
            None => writeln!(f, "Best window  : no usable window tonight")?,
        }
        writeln!(f, "Cloud cover  : {}% (worst {}%)", self.display_cloud_cover, self.extreme_cloud_cover)?;
        writeln!(f, "Temperature  : {}C (dew point {}C)", self.nightly_temperature, self.nightly_dew_point)?;
        writeln!(f, "Humidity     : {}%", self.nightly_humidity)?;
        match &self.wind_direction {
            Some(w) => writeln!(f, "Wind         : {} km/h from {} ({})", self.nightly_wind_speed, w.cardinal, w.degrees)?,
            None => writeln!(f, "Wind         : {} km/h, variable direction", self.nightly_wind_speed)?,
        }
        writeln!(f, "Rain chance  : {}%", self.max_precipitation_probability)?;
        write!(f, "Seeing       : {}/5", self.seeing_index)
    }
}

/// State of the window scan. A run is built up hour by hour and becomes a
/// confirmed window once it is long enough.
enum RunState {
    Idle,
    Building { start: u32, hours: u32, lowest: u8 },
    Confirmed { start: u32, end: u32, lowest: u8 },
}

/// Returns the hours of the astronomical night, i.e. the contiguous part
/// of the forecast whose timestamps lie between sunset and the next
/// sunrise, both ends included. Pure time slicing, the weather plays no
/// role here.
///
/// # Arguments
///
/// * 'forecast' - the full hourly forecast sequence
/// * 'sunset' - sunset time tonight
/// * 'sunrise' - sunrise time the following day
pub fn night_hours(forecast: &[ForecastHour], sunset: NaiveDateTime, sunrise: NaiveDateTime) -> Vec<ForecastHour> {
    forecast.iter()
        .filter(|h| h.date_time >= sunset && h.date_time <= sunrise)
        .copied()
        .collect()
}

/// Analyzes the night for astronomical observation: locates the best
/// observation window and aggregates the night level figures.
///
/// # Arguments
///
/// * 'forecast' - the full hourly forecast sequence
/// * 'sunset' - sunset time tonight
/// * 'sunrise' - sunrise time the following day
pub fn analyze_night(forecast: &[ForecastHour], sunset: NaiveDateTime, sunrise: NaiveDateTime) -> NightForecast {
    let night = night_hours(forecast, sunset, sunrise);

    let best_window = best_observation_window(&night, GOOD_CLOUD_COVER_THRESHOLD, CONSECUTIVE_GOOD_HOURS_REQUIRED);
    let extreme_cloud_cover = night.iter().map(|h| h.clouds).max().unwrap_or(0);
    let display_cloud_cover = best_window
        .as_ref()
        .map_or(extreme_cloud_cover, |w| w.lowest_cloud_cover);

    NightForecast {
        best_window,
        extreme_cloud_cover,
        display_cloud_cover,
        nightly_temperature: nightly_average(&night, |h| h.temperature).floor() as i32,
        nightly_humidity: nightly_average(&night, |h| h.humidity as f64).floor() as i32,
        nightly_wind_speed: nightly_average(&night, |h| h.wind_speed).floor() as i32,
        nightly_dew_point: nightly_average(&night, |h| h.dew_point).floor() as i32,
        max_precipitation_probability: night.iter().map(|h| h.precipitation_probability).max().unwrap_or(0),
        wind_direction: mean_wind_direction(&night),
        seeing_index: mean_seeing(&night),
    }
}

/// Finds the first qualifying observation window of the night.
///
/// Single pass over the night hours: good hours (cloud cover at or below
/// the threshold) build up a run, and once the run reaches the required
/// length it is a confirmed window whose end keeps extending on every
/// further good hour. The first bad hour after confirmation ends the
/// scan, so the first qualifying run wins even if a longer or clearer
/// run follows later in the night. That matches how the tool has always
/// picked windows and keeps the pick stable from hour to hour.
///
/// # Arguments
///
/// * 'night' - the night hours in chronological order
/// * 'threshold' - max cloud cover for a good hour
/// * 'required_hours' - minimum number of consecutive good hours
pub fn best_observation_window(night: &[ForecastHour], threshold: u8, required_hours: u32) -> Option<BestWindow> {
    let mut state = RunState::Idle;

    for hour in night {
        if hour.clouds <= threshold {
            state = match state {
                RunState::Idle => grown_run(hour.hour, 1, hour.clouds, hour.hour, required_hours),
                RunState::Building { start, hours, lowest } =>
                    grown_run(start, hours + 1, lowest.min(hour.clouds), hour.hour, required_hours),
                RunState::Confirmed { start, lowest, .. } =>
                    RunState::Confirmed { start, end: hour.hour, lowest: lowest.min(hour.clouds) },
            };
        } else {
            match state {
                RunState::Confirmed { .. } => break,
                _ => state = RunState::Idle,
            }
        }
    }

    match state {
        RunState::Confirmed { start, end, lowest } => Some(BestWindow {
            range: TimeRange { start, end },
            lowest_cloud_cover: lowest,
        }),
        _ => None,
    }
}

/// Promotes a grown run to a confirmed window once it is long enough
///
/// # Arguments
///
/// * 'start' - start hour label of the run
/// * 'hours' - length of the run including the current hour
/// * 'lowest' - lowest cloud cover seen in the run
/// * 'end' - the current hour label
/// * 'required_hours' - minimum number of consecutive good hours
fn grown_run(start: u32, hours: u32, lowest: u8, end: u32, required_hours: u32) -> RunState {
    if hours >= required_hours {
        RunState::Confirmed { start, end, lowest }
    } else {
        RunState::Building { start, hours, lowest }
    }
}

/// Arithmetic mean of one field over the night, zero for an empty night
///
/// # Arguments
///
/// * 'night' - the night hours
/// * 'field' - accessor for the field to average
fn nightly_average<F>(night: &[ForecastHour], field: F) -> f64
where
    F: Fn(&ForecastHour) -> f64,
{
    if night.is_empty() {
        return 0.0;
    }

    night.iter().map(field).sum::<f64>() / night.len() as f64
}

/// Rounded mean of the per hour seeing scores, zero for an empty night
///
/// # Arguments
///
/// * 'night' - the night hours
fn mean_seeing(night: &[ForecastHour]) -> u8 {
    if night.is_empty() {
        return 0;
    }

    let total: u32 = night.iter().map(|h| h.seeing as u32).sum();
    (total as f64 / night.len() as f64).round() as u8
}

/// Circular mean of the wind directions over the night.
///
/// Each direction becomes a unit vector and the vectors are summed, which
/// avoids the wrap around error a plain mean has at the 0/360 boundary.
/// Hours with a negative direction reading carry no direction and are
/// skipped. When no hour has a reading, or the vectors cancel out (calm
/// rose, e.g. equal parts N, E, S and W), there is no dominant direction
/// and the mean is absent.
///
/// # Arguments
///
/// * 'night' - the night hours
fn mean_wind_direction(night: &[ForecastHour]) -> Option<WindDirection> {
    let (x, y, count) = night.iter()
        .filter(|h| h.wind_direction >= 0.0)
        .fold((0.0f64, 0.0f64, 0u32), |(x, y, n), h| {
            let radians = h.wind_direction.to_radians();
            (x + radians.cos(), y + radians.sin(), n + 1)
        });

    if count == 0 || x.hypot(y) < NO_DOMINANT_DIRECTION {
        return None;
    }

    let degrees = (y.atan2(x).to_degrees() + 360.0) % 360.0;

    Some(WindDirection {
        degrees: degrees.round() as u16 % 360,
        cardinal: Cardinal::from_degrees(degrees),
    })
}
