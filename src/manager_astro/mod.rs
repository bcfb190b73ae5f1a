use std::f64::consts::PI;
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};

/// Sun elevation angle at sunrise/sunset, accounting for refraction and
/// the apparent radius of the solar disc
const RISE_SET_ALTITUDE: f64 = -0.833;

/// Sun elevation angle at astronomical dusk/dawn, below which the sky is
/// fully dark
const ASTRONOMICAL_ALTITUDE: f64 = -18.0;

/// Mean length of the synodic month in days
const SYNODIC_MONTH: f64 = 29.530588;

/// Sun events bounding tonight: sunset and dusk for the given date,
/// dawn and sunrise for the following day. An event is None when the sun
/// never crosses its altitude that day (polar summer/winter, or no
/// astronomical darkness at mid latitudes around the summer solstice).
pub struct SunTimes {
    pub sunset: Option<NaiveDateTime>,
    pub dusk: Option<NaiveDateTime>,
    pub dawn: Option<NaiveDateTime>,
    pub sunrise: Option<NaiveDateTime>,
}

/// Moon phase for a date on the 0-28 scale (14 is full), with its name,
/// a glyph for the terminal and the illuminated fraction in percent
pub struct MoonInfo {
    pub phase: f64,
    pub phase_name: &'static str,
    pub glyph: &'static str,
    pub illumination: f64,
}

/// Calculates the sun events around the night that starts on the given
/// date, expressed in the same local clock as the weather timestamps
///
/// # Arguments
///
/// * 'lat' - latitude in decimal degrees
/// * 'long' - longitude in decimal degrees
/// * 'date' - the date the night starts on
/// * 'utc_offset_secs' - offset of the local clock from UTC in seconds
pub fn sun_times(lat: f64, long: f64, date: NaiveDate, utc_offset_secs: i32) -> SunTimes {
    let next_day = date + TimeDelta::days(1);

    let (_, sunset) = sun_crossings(lat, long, date, utc_offset_secs, RISE_SET_ALTITUDE);
    let (_, dusk) = sun_crossings(lat, long, date, utc_offset_secs, ASTRONOMICAL_ALTITUDE);
    let (dawn, _) = sun_crossings(lat, long, next_day, utc_offset_secs, ASTRONOMICAL_ALTITUDE);
    let (sunrise, _) = sun_crossings(lat, long, next_day, utc_offset_secs, RISE_SET_ALTITUDE);

    SunTimes { sunset, dusk, dawn, sunrise }
}

/// Calculates when the sun crosses the given elevation on its way up and
/// down on one date, or None when it never reaches that elevation.
///
/// Solar noon is derived from the equation of time and the longitude
/// correction as described here:
/// https://www.pveducation.org/pvcdrom/properties-of-sunlight/solar-time
/// The crossing times then follow from the sunrise hour angle, at four
/// minutes of clock time per degree.
///
/// # Arguments
///
/// * 'lat' - latitude in decimal degrees
/// * 'long' - longitude in decimal degrees
/// * 'date' - the local date
/// * 'utc_offset_secs' - offset of the local clock from UTC in seconds
/// * 'altitude' - the sun elevation angle of the crossing
fn sun_crossings(lat: f64, long: f64, date: NaiveDate, utc_offset_secs: i32, altitude: f64) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    let declination = get_declination(date);

    let cos_hour_angle = (sind(altitude) - sind(lat) * sind(declination))
        / (cosd(lat) * cosd(declination));

    if !(-1.0..=1.0).contains(&cos_hour_angle) {
        return (None, None);
    }

    let hour_angle = cos_hour_angle.acos() * 180.0 / PI;

    let lstm = 15.0 * (utc_offset_secs / 3600) as f64;
    let b = 360.0 / 365.0 * (date.ordinal0() as f64 - 81.0);
    let eot = 9.87 * sind(2.0 * b) - 7.53 * cosd(b) - 1.5 * sind(b);
    let tc = 4.0 * (long - lstm) + eot;
    let noon = 720.0 - tc;

    let midnight = date.and_hms_opt(0, 0, 0).unwrap();
    let up = midnight + TimeDelta::minutes((noon - 4.0 * hour_angle).round() as i64);
    let down = midnight + TimeDelta::minutes((noon + 4.0 * hour_angle).round() as i64);

    (Some(up), Some(down))
}

/// Calculates the declination given a medium exact algorithm as described
/// here: https://www.reuk.co.uk/wordpress/solar/solar-declination/
///
/// # Arguments
///
/// * 'date' - the local date
fn get_declination(date: NaiveDate) -> f64 {
    let day = date.ordinal0() as f64;

    let earth_tilt: f64 = -23.44;
    let p1 = sind(earth_tilt);
    let p2 = 360.0 / 365.24 * (day + 10.0);
    let p3 = 360.0 / PI * 0.0167 * sind(360.0 / 365.24 * (day - 2.0));

    (p1 * cosd(p2 + p3)).asin() * 180.0 / PI
}

/// Calculates the moon phase for a date from the age of the current
/// lunation, counted from the new moon of 2000-01-06 18:14 UTC
///
/// # Arguments
///
/// * 'date' - the local date
pub fn moon_info(date: NaiveDate) -> MoonInfo {
    let epoch = NaiveDate::from_ymd_opt(2000, 1, 6).unwrap()
        .and_hms_opt(18, 14, 0).unwrap();
    let noon = date.and_hms_opt(12, 0, 0).unwrap();

    let days = (noon - epoch).num_minutes() as f64 / 1440.0;
    let age = days.rem_euclid(SYNODIC_MONTH);
    let phase = age / SYNODIC_MONTH * 28.0;

    let (phase_name, glyph) = phase_name(phase);

    MoonInfo {
        phase,
        phase_name,
        glyph,
        illumination: illumination(phase),
    }
}

/// Maps the 0-28 phase scale to a phase name and glyph
///
/// # Arguments
///
/// * 'phase' - moon phase on the 0-28 scale
fn phase_name(phase: f64) -> (&'static str, &'static str) {
    if phase < 3.5 {
        ("New moon", "🌑")
    } else if phase < 7.0 {
        ("Waxing crescent", "🌒")
    } else if phase < 10.5 {
        ("First quarter", "🌓")
    } else if phase < 14.0 {
        ("Waxing gibbous", "🌔")
    } else if phase < 17.5 {
        ("Full moon", "🌕")
    } else if phase < 21.0 {
        ("Waning gibbous", "🌖")
    } else if phase < 24.5 {
        ("Last quarter", "🌗")
    } else {
        ("Waning crescent", "🌘")
    }
}

/// Calculates the illuminated percentage of the moon disc, peaking at
/// 100 at phase 14 and falling off linearly towards the new moons
///
/// # Arguments
///
/// * 'phase' - moon phase on the 0-28 scale
fn illumination(phase: f64) -> f64 {
    let normalized = phase / 28.0;
    let distance_from_full = (normalized - 0.5).abs();

    100.0 * (0.5 - distance_from_full) * 2.0
}

fn sind(degrees: f64) -> f64 {
    (degrees * PI / 180.0).sin()
}

fn cosd(degrees: f64) -> f64 {
    (degrees * PI / 180.0).cos()
}
