//! Sunrise, solar noon, sunset and twilight times.
//!
//! Times are minutes after 0h UT of the date whose Julian Day is passed in, and may
//! fall outside [0, 1440) when the event belongs to the neighbouring UT date.
//! Each event is refined in two fixed passes: the first evaluates the Sun at local
//! noon, the second at the first pass's estimate.

#[allow(unused_imports)]
use core_maths::CoreFloat;
use log::{debug, trace, warn};

use crate::geo::GeoCoordinate;
use crate::sun::{declination, equation_of_time};
use crate::time::{
    julian_centuries_since_j2000, julian_day_from_julian_centuries, MINUTES_PER_DAY, MINUTES_PER_DEGREE, NOON_MINUTES,
};
use crate::CalculationError;

/// Elevation of the Sun's centre at sunrise and sunset: 50 arcminutes of
/// refraction and solar semi-diameter below the geometric horizon.
pub const STANDARD_SUNRISE_ELEVATION: f64 = -0.833;

/// Depression of the Sun below the horizon bounding civil twilight.
pub const CIVIL_TWILIGHT: f64 = 6.0;

/// Depression of the Sun below the horizon bounding nautical twilight.
pub const NAUTICAL_TWILIGHT: f64 = 12.0;

/// Depression of the Sun below the horizon bounding astronomical twilight.
pub const ASTRONOMICAL_TWILIGHT: f64 = 18.0;

/// Result of a solar event calculation (sunrise, sunset, twilight).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SolarEventResult {
    /// Event occurs at the given number of minutes after 0h UT
    Occurs(f64),
    /// Sun stays above the threshold all day (e.g. midnight sun)
    AllDay,
    /// Sun stays below the threshold all day (e.g. polar night)
    AllNight,
}

impl SolarEventResult {
    /// Minutes after 0h UT, or `None` when the event does not happen.
    pub fn minutes(self) -> Option<f64> {
        match self {
            SolarEventResult::Occurs(minutes) => Some(minutes),
            _ => None,
        }
    }

    /// Turns the polar-condition errors into tagged results; other errors pass through.
    pub fn from_result(result: Result<f64, CalculationError>) -> Result<Self, CalculationError> {
        match result {
            Ok(minutes) => Ok(SolarEventResult::Occurs(minutes)),
            Err(CalculationError::AlwaysAbove { .. }) => Ok(SolarEventResult::AllDay),
            Err(CalculationError::AlwaysBelow { .. }) => Ok(SolarEventResult::AllNight),
            Err(e) => Err(e),
        }
    }
}

/// Sunrise, solar noon and sunset for one date at one place.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RiseSetResult {
    /// Sunrise, minutes after 0h UT
    pub sunrise: SolarEventResult,
    /// Solar noon, minutes after 0h UT
    pub solar_noon: f64,
    /// Sunset, minutes after 0h UT
    pub sunset: SolarEventResult,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Crossing {
    Rising,
    Setting,
}

/// Solar noon in minutes after 0h UT.
///
/// # Arguments
///
/// * `t` - Julian centuries since J2000.0 at 0h UT of the date
/// * `longitude_degrees` - Observer longitude, east positive
pub fn solar_noon_utc(t: f64, longitude_degrees: f64) -> f64 {
    let julian_day = julian_day_from_julian_centuries(t);

    let estimate = julian_centuries_since_j2000(julian_day + 0.5 - longitude_degrees / 360.0);
    let noon = NOON_MINUTES - MINUTES_PER_DEGREE * longitude_degrees - equation_of_time(estimate);
    trace!("solar noon pass 1: {noon} min");

    let refined = julian_centuries_since_j2000(julian_day + noon / MINUTES_PER_DAY);
    let noon = NOON_MINUTES - MINUTES_PER_DEGREE * longitude_degrees - equation_of_time(refined);
    trace!("solar noon pass 2: {noon} min");
    noon
}

/// Hour angle in radians at which the Sun's centre sits at `elevation_degrees`.
///
/// The angle is positive; negate it for the afternoon crossing.
///
/// # Errors
///
/// - [`CalculationError::AlwaysAbove`] when the Sun never drops to the elevation
/// - [`CalculationError::AlwaysBelow`] when the Sun never climbs to the elevation
pub fn hour_angle_at_elevation(
    latitude_degrees: f64,
    declination_degrees: f64,
    elevation_degrees: f64,
) -> Result<f64, CalculationError> {
    let lat = latitude_degrees.to_radians();
    let dec = declination_degrees.to_radians();
    let zenith = (90.0 - elevation_degrees).to_radians();

    let cos_ha = zenith.cos() / (lat.cos() * dec.cos()) - lat.tan() * dec.tan();

    if cos_ha < -1.0 {
        return Err(CalculationError::AlwaysAbove {
            elevation: elevation_degrees,
        });
    }
    if cos_ha > 1.0 {
        return Err(CalculationError::AlwaysBelow {
            elevation: elevation_degrees,
        });
    }
    if cos_ha.is_nan() {
        // degenerate geometry; fall back to the noon altitude
        let noon_altitude = 90.0 - (latitude_degrees - declination_degrees).abs();
        return Err(if noon_altitude < elevation_degrees {
            CalculationError::AlwaysBelow {
                elevation: elevation_degrees,
            }
        } else {
            CalculationError::AlwaysAbove {
                elevation: elevation_degrees,
            }
        });
    }

    Ok(cos_ha.acos())
}

/// Hour angle in radians at standard sunrise elevation.
pub fn hour_angle_sunrise(latitude_degrees: f64, declination_degrees: f64) -> Result<f64, CalculationError> {
    hour_angle_at_elevation(latitude_degrees, declination_degrees, STANDARD_SUNRISE_ELEVATION)
}

/// One pass: evaluates the Sun at `t` and places the crossing relative to noon.
fn crossing_time(
    t: f64,
    latitude_degrees: f64,
    longitude_degrees: f64,
    elevation_degrees: f64,
    crossing: Crossing,
) -> Result<f64, CalculationError> {
    let hour_angle = hour_angle_at_elevation(latitude_degrees, declination(t), elevation_degrees)?.to_degrees();
    let hour_angle = match crossing {
        Crossing::Rising => hour_angle,
        Crossing::Setting => -hour_angle,
    };
    Ok(NOON_MINUTES - MINUTES_PER_DEGREE * (longitude_degrees + hour_angle) - equation_of_time(t))
}

fn event_utc(
    julian_day: f64,
    latitude_degrees: f64,
    longitude_degrees: f64,
    elevation_degrees: f64,
    crossing: Crossing,
) -> Result<f64, CalculationError> {
    let noon = solar_noon_utc(julian_centuries_since_j2000(julian_day), longitude_degrees);

    let at_noon = julian_centuries_since_j2000(julian_day + noon / MINUTES_PER_DAY);
    let first = crossing_time(at_noon, latitude_degrees, longitude_degrees, elevation_degrees, crossing)
        .inspect_err(|e| warn!("{crossing:?} at {elevation_degrees}° not possible at latitude {latitude_degrees}: {e}"))?;
    trace!("{crossing:?} at {elevation_degrees}° pass 1: {first} min");

    let at_first = julian_centuries_since_j2000(julian_day + first / MINUTES_PER_DAY);
    let second = crossing_time(at_first, latitude_degrees, longitude_degrees, elevation_degrees, crossing)
        .inspect_err(|e| warn!("{crossing:?} at {elevation_degrees}° lost on refinement: {e}"))?;
    debug!("{crossing:?} at {elevation_degrees}°: {second} min after 0h UT");
    Ok(second)
}

/// Sunrise in minutes after 0h UT.
///
/// # Arguments
///
/// * `julian_day` - Julian Day at 0h UT of the date (see [`crate::time::julian_day`])
/// * `latitude_degrees` - Observer latitude, north positive
/// * `longitude_degrees` - Observer longitude, east positive
///
/// # Errors
///
/// [`CalculationError::AlwaysAbove`] or [`CalculationError::AlwaysBelow`] when the
/// Sun does not cross the horizon that day.
pub fn sunrise_utc(julian_day: f64, latitude_degrees: f64, longitude_degrees: f64) -> Result<f64, CalculationError> {
    event_utc(
        julian_day,
        latitude_degrees,
        longitude_degrees,
        STANDARD_SUNRISE_ELEVATION,
        Crossing::Rising,
    )
}

/// Sunset in minutes after 0h UT. Arguments and errors as for [`sunrise_utc`].
pub fn sunset_utc(julian_day: f64, latitude_degrees: f64, longitude_degrees: f64) -> Result<f64, CalculationError> {
    event_utc(
        julian_day,
        latitude_degrees,
        longitude_degrees,
        STANDARD_SUNRISE_ELEVATION,
        Crossing::Setting,
    )
}

/// Morning time at which the Sun's centre is `depression_degrees` below the horizon.
///
/// Pass [`CIVIL_TWILIGHT`], [`NAUTICAL_TWILIGHT`] or [`ASTRONOMICAL_TWILIGHT`] for
/// the usual dawns.
pub fn dawn_utc(
    julian_day: f64,
    latitude_degrees: f64,
    longitude_degrees: f64,
    depression_degrees: f64,
) -> Result<f64, CalculationError> {
    event_utc(
        julian_day,
        latitude_degrees,
        longitude_degrees,
        -depression_degrees,
        Crossing::Rising,
    )
}

/// Evening counterpart of [`dawn_utc`].
pub fn dusk_utc(
    julian_day: f64,
    latitude_degrees: f64,
    longitude_degrees: f64,
    depression_degrees: f64,
) -> Result<f64, CalculationError> {
    event_utc(
        julian_day,
        latitude_degrees,
        longitude_degrees,
        -depression_degrees,
        Crossing::Setting,
    )
}

/// Sunrise, solar noon and sunset with polar conditions reported as values.
pub fn rise_set(julian_day: f64, coordinate: &GeoCoordinate) -> Result<RiseSetResult, CalculationError> {
    let (latitude, longitude) = (coordinate.latitude(), coordinate.longitude());
    Ok(RiseSetResult {
        sunrise: SolarEventResult::from_result(sunrise_utc(julian_day, latitude, longitude))?,
        solar_noon: solar_noon_utc(julian_centuries_since_j2000(julian_day), longitude),
        sunset: SolarEventResult::from_result(sunset_utc(julian_day, latitude, longitude))?,
    })
}
