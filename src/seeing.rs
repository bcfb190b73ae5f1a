/// Weight of the temperature/dew point spread in the seeing score
const TEMP_WEIGHT: f64 = 0.25;

/// Weight of the wind speed in the seeing score
const WIND_WEIGHT: f64 = 0.40;

/// Weight of the relative humidity in the seeing score
const HUMIDITY_WEIGHT: f64 = 0.15;

/// Weight of the dew point margin in the seeing score
const DEW_POINT_WEIGHT: f64 = 0.20;

/// Estimates atmospheric steadiness for telescope use on a 1-5 scale.
///
/// This is a heuristic, not a physical model: wind shakes the tube and
/// stirs the boundary layer, and a small temperature to dew point spread
/// indicates moisture and near-ground turbulence. Each factor is clamped
/// to 0.1..1.0 so a single miserable reading never zeroes the score.
///
/// # Arguments
///
/// * 'temperature' - air temperature in degrees Celsius
/// * 'dew_point' - dew point in degrees Celsius
/// * 'wind_speed' - wind speed in km/h
/// * 'humidity' - relative humidity in percent
pub fn calculate_seeing(temperature: f64, dew_point: f64, wind_speed: f64, humidity: u8) -> u8 {
    let temp_diff = (temperature - dew_point).abs();

    let temp_factor = ((15.0 - temp_diff) / 15.0).clamp(0.1, 1.0);
    let wind_factor = (1.0 - wind_speed / 25.0).clamp(0.1, 1.0);
    let humidity_factor = (1.0 - humidity as f64 / 100.0).clamp(0.1, 1.0);
    let dew_point_factor = ((10.0 - temp_diff) / 10.0).clamp(0.1, 1.0);

    let weighted = TEMP_WEIGHT * temp_factor
        + WIND_WEIGHT * wind_factor
        + HUMIDITY_WEIGHT * humidity_factor
        + DEW_POINT_WEIGHT * dew_point_factor;

    (weighted * 5.0).max(1.0).round() as u8
}

/// Calculates an overall 0-5 sky quality rating for one hour.
///
/// Complements the seeing score with cloud cover, which dominates the
/// weighting since no transparency means no observation at all.
///
/// # Arguments
///
/// * 'clouds' - total cloud cover in percent
/// * 'humidity' - relative humidity in percent
/// * 'wind_speed' - wind speed in km/h
/// * 'temperature' - air temperature in degrees Celsius
/// * 'dew_point' - dew point in degrees Celsius
/// * 'seeing' - the seeing score for the same hour
pub fn calculate_rating(clouds: u8, humidity: u8, wind_speed: f64, temperature: f64, dew_point: f64, seeing: u8) -> u8 {
    let temp_diff = (temperature - 15.0).abs();
    let dew_point_diff = (temperature - dew_point).abs();

    let clouds_factor = 1 - clouds as i32 / 15;
    let humidity_factor = 5 - humidity as i32 / 20;
    let wind_factor = 5.0 - wind_speed / 10.0;
    let temp_factor = 5.0 - temp_diff / 10.0;
    let dew_point_factor = 5.0 - dew_point_diff / 5.0;
    let seeing_factor = 5 - seeing as i32;

    let rating = 0.5 * clouds_factor as f64
        + 0.2 * humidity_factor as f64
        + 0.2 * wind_factor
        + 0.1 * temp_factor
        + 0.15 * dew_point_factor
        + 0.5 * seeing_factor as f64;

    rating.clamp(0.0, 5.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeing_stays_within_scale() {
        for temp in [-30.0, -5.0, 0.0, 12.0, 35.0] {
            for dew in [-35.0, -10.0, 0.0, 11.0, 30.0] {
                for wind in [0.0, 10.0, 25.0, 80.0] {
                    for humidity in [0u8, 40, 85, 100] {
                        let s = calculate_seeing(temp, dew, wind, humidity);
                        assert!((1..=5).contains(&s), "seeing {} out of scale", s);
                    }
                }
            }
        }
    }

    #[test]
    fn seeing_never_improves_with_wind() {
        let mut previous = 5;
        for wind in 0..60 {
            let s = calculate_seeing(10.0, 8.0, wind as f64, 40);
            assert!(s <= previous, "seeing went up from {} to {} at {} km/h", previous, s, wind);
            previous = s;
        }
    }

    #[test]
    fn ideal_conditions_score_five() {
        assert_eq!(calculate_seeing(10.0, 10.0, 0.0, 0), 5);
    }

    #[test]
    fn hopeless_conditions_score_one() {
        assert_eq!(calculate_seeing(25.0, 0.0, 60.0, 100), 1);
    }

    #[test]
    fn rating_rewards_a_clear_calm_night() {
        let seeing = calculate_seeing(15.0, 10.0, 5.0, 40);
        let rating = calculate_rating(0, 40, 5.0, 15.0, 10.0, seeing);
        assert!(rating >= 3, "clear calm night rated {}", rating);
    }

    #[test]
    fn rating_stays_within_scale() {
        for clouds in [0u8, 30, 70, 100] {
            for humidity in [0u8, 50, 100] {
                for wind in [0.0, 30.0, 90.0] {
                    let seeing = calculate_seeing(10.0, 5.0, wind, humidity);
                    let r = calculate_rating(clouds, humidity, wind, 10.0, 5.0, seeing);
                    assert!(r <= 5, "rating {} out of scale", r);
                }
            }
        }
    }
}
