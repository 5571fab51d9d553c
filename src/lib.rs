//! # Solar Ephemeris
//!
//! A low-precision solar ephemeris for applications that need to know where the Sun is
//! and when it rises and sets, to within about a minute of time.
//!
//! The crate converts civil time to Julian Days and sidereal time, evaluates the
//! Sun's orbital and apparent coordinates, rotates ecliptic directions into the
//! observer's horizon frame, computes sunrise, solar noon, sunset and twilight, and
//! solves Kepler's equation for generic orbital positions.
//!
//! Angles are degrees at every public boundary (radians only where a name says so),
//! longitudes are east-positive and every time is UTC.
//!
//! ## Basic Usage
//!
//! ```
//! use solar_ephemeris::{GeoCoordinate, Instant, SolarCalculator, SolarEventResult};
//!
//! // London, 2021 June 21, 12:00 UTC
//! let instant = Instant::new(2021, 6, 21, 12, 0, 0, 0).unwrap();
//! let london = GeoCoordinate::new(51.5074, -0.1278).unwrap();
//! let calc = SolarCalculator::new(instant, london);
//!
//! let position = calc.horizon_position();
//! println!("Azimuth: {:.2}°", position.azimuth);
//! println!("Altitude: {:.2}°", position.altitude);
//!
//! // Rise/set times are minutes after 0h UT of the date
//! match calc.sunrise().unwrap() {
//!     SolarEventResult::Occurs(minutes) => println!("Sunrise {minutes:.1} min after midnight UTC"),
//!     SolarEventResult::AllDay => println!("Sun never sets (midnight sun)"),
//!     SolarEventResult::AllNight => println!("Sun never rises (polar night)"),
//! }
//! ```
//!
//! The free functions in [`time`], [`sun`], [`horizon`], [`riseset`] and [`kepler`]
//! are the building blocks; [`SolarCalculator`] wires them together for one instant
//! and place.
#![no_std]

pub mod geo;
pub mod horizon;
pub mod kepler;
pub mod math;
pub mod riseset;
pub mod sun;
pub mod time;

#[cfg(test)]
mod tests;

use chrono::NaiveDateTime;
#[allow(unused_imports)]
use core_maths::CoreFloat;
use log::debug;
use thiserror::Error;

pub use crate::geo::GeoCoordinate;
pub use crate::horizon::{Cartesian, HorizonCoordinates};
pub use crate::kepler::{solve_kepler, KeplerSolver};
pub use crate::riseset::{
    RiseSetResult, SolarEventResult, ASTRONOMICAL_TWILIGHT, CIVIL_TWILIGHT, NAUTICAL_TWILIGHT,
    STANDARD_SUNRISE_ELEVATION,
};
pub use crate::sun::SolarState;
pub use crate::time::{Instant, DAYS_PER_CENTURY, J2000_JD, SIDEREAL_RATE};

/// Solar position and event times for one instant at one place.
///
/// The calculator holds only its two inputs; every method recomputes what it needs,
/// so the value is `Copy` and can be shared freely between threads.
///
/// # Example
///
/// ```
/// use solar_ephemeris::{GeoCoordinate, Instant, SolarCalculator};
///
/// let instant = Instant::new(2024, 1, 15, 17, 0, 0, 0).unwrap();
/// let new_york = GeoCoordinate::new(40.7128, -74.006).unwrap();
/// let calc = SolarCalculator::new(instant, new_york);
///
/// let state = calc.solar_state();
/// assert!(state.declination < -20.0);
/// assert!(calc.horizon_position().altitude > 0.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolarCalculator {
    instant: Instant,
    coordinate: GeoCoordinate,
}

impl SolarCalculator {
    /// Creates a calculator for an already validated instant and observer.
    pub fn new(instant: Instant, coordinate: GeoCoordinate) -> Self {
        Self { instant, coordinate }
    }

    /// Builds a calculator from a chrono timestamp (UTC) and raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::LatitudeOutOfRange`] or
    /// [`CalculationError::LongitudeOutOfRange`] for an invalid observer.
    pub fn from_naive(
        ut: NaiveDateTime,
        latitude_degrees: f64,
        longitude_degrees: f64,
    ) -> Result<Self, CalculationError> {
        let coordinate = GeoCoordinate::new(latitude_degrees, longitude_degrees)?;
        Ok(Self::new(Instant::from(ut), coordinate))
    }

    /// The instant the calculator was built for.
    pub fn instant(&self) -> Instant {
        self.instant
    }

    /// The observer the calculator was built for.
    pub fn coordinate(&self) -> GeoCoordinate {
        self.coordinate
    }

    /// Continuous Julian Date of the instant.
    pub fn julian_date(&self) -> f64 {
        self.instant.julian_date()
    }

    /// Julian Day at 0h UT of the instant's date, the reference for event times.
    pub fn julian_day(&self) -> f64 {
        time::julian_day(&self.instant)
    }

    /// Julian centuries since J2000.0 at the instant.
    pub fn julian_centuries(&self) -> f64 {
        self.instant.julian_centuries()
    }

    /// Every derived solar quantity at the instant.
    pub fn solar_state(&self) -> SolarState {
        SolarState::at(self.julian_centuries())
    }

    /// Greenwich mean sidereal time in hours.
    pub fn greenwich_sidereal_time(&self) -> f64 {
        time::greenwich_sidereal_time(self.instant.days_since_j2000())
    }

    /// Local mean sidereal time in hours at the observer's longitude.
    pub fn local_sidereal_time(&self) -> f64 {
        time::local_sidereal_time(self.instant.days_since_j2000(), self.coordinate.longitude())
    }

    /// Azimuth and altitude of the Sun's centre, without refraction.
    pub fn horizon_position(&self) -> HorizonCoordinates {
        let t = self.julian_centuries();
        let longitude = sun::apparent_longitude(t).to_radians();
        let ecliptic = [longitude.cos(), longitude.sin(), 0.0];

        let position = horizon::horizon_coordinates(
            &ecliptic,
            self.local_sidereal_time(),
            sun::corrected_obliquity(t),
            self.coordinate.latitude(),
        );
        debug!(
            "sun at azimuth {}°, altitude {}° for JD {}",
            position.azimuth,
            position.altitude,
            self.julian_date()
        );
        position
    }

    /// Unit vector towards the Sun in the horizon frame (y up, x east, north along −z).
    pub fn sun_direction<V: Cartesian>(&self) -> V {
        self.horizon_position().to_direction()
    }

    /// Sunrise, solar noon and sunset on the instant's UTC date.
    pub fn rise_set(&self) -> Result<RiseSetResult, CalculationError> {
        riseset::rise_set(self.julian_day(), &self.coordinate)
    }

    /// Solar noon in minutes after 0h UT.
    pub fn solar_noon(&self) -> f64 {
        let t = time::julian_centuries_since_j2000(self.julian_day());
        riseset::solar_noon_utc(t, self.coordinate.longitude())
    }

    /// Sunrise using the standard −0.833° horizon.
    ///
    /// # Returns
    ///
    /// A `Result` containing a [`SolarEventResult`]:
    /// - `Occurs(minutes)`: sunrise at the given minutes after 0h UT
    /// - `AllDay`: Sun never sets (midnight sun / polar day)
    /// - `AllNight`: Sun never rises (polar night)
    pub fn sunrise(&self) -> Result<SolarEventResult, CalculationError> {
        SolarEventResult::from_result(riseset::sunrise_utc(
            self.julian_day(),
            self.coordinate.latitude(),
            self.coordinate.longitude(),
        ))
    }

    /// Sunset using the standard −0.833° horizon. See [`SolarCalculator::sunrise`].
    pub fn sunset(&self) -> Result<SolarEventResult, CalculationError> {
        SolarEventResult::from_result(riseset::sunset_utc(
            self.julian_day(),
            self.coordinate.latitude(),
            self.coordinate.longitude(),
        ))
    }

    /// Morning time at which the Sun is `depression_degrees` below the horizon.
    ///
    /// # Arguments
    ///
    /// * `depression_degrees` - Degrees below the horizon (6 civil, 12 nautical, 18 astronomical)
    pub fn dawn(&self, depression_degrees: f64) -> Result<SolarEventResult, CalculationError> {
        SolarEventResult::from_result(riseset::dawn_utc(
            self.julian_day(),
            self.coordinate.latitude(),
            self.coordinate.longitude(),
            depression_degrees,
        ))
    }

    /// Evening time at which the Sun is `depression_degrees` below the horizon.
    pub fn dusk(&self, depression_degrees: f64) -> Result<SolarEventResult, CalculationError> {
        SolarEventResult::from_result(riseset::dusk_utc(
            self.julian_day(),
            self.coordinate.latitude(),
            self.coordinate.longitude(),
            depression_degrees,
        ))
    }

    /// Start of civil twilight (Sun 6° below the horizon).
    pub fn civil_dawn(&self) -> Result<SolarEventResult, CalculationError> {
        self.dawn(CIVIL_TWILIGHT)
    }

    /// End of civil twilight.
    pub fn civil_dusk(&self) -> Result<SolarEventResult, CalculationError> {
        self.dusk(CIVIL_TWILIGHT)
    }

    /// Start of nautical twilight (Sun 12° below the horizon).
    pub fn nautical_dawn(&self) -> Result<SolarEventResult, CalculationError> {
        self.dawn(NAUTICAL_TWILIGHT)
    }

    /// End of nautical twilight.
    pub fn nautical_dusk(&self) -> Result<SolarEventResult, CalculationError> {
        self.dusk(NAUTICAL_TWILIGHT)
    }

    /// Start of astronomical twilight (Sun 18° below the horizon).
    pub fn astronomical_dawn(&self) -> Result<SolarEventResult, CalculationError> {
        self.dawn(ASTRONOMICAL_TWILIGHT)
    }

    /// End of astronomical twilight.
    pub fn astronomical_dusk(&self) -> Result<SolarEventResult, CalculationError> {
        self.dusk(ASTRONOMICAL_TWILIGHT)
    }

    /// UTC timestamp of an event on the instant's date, or `None` if it does not occur.
    pub fn event_datetime(&self, event: SolarEventResult) -> Result<Option<NaiveDateTime>, CalculationError> {
        event
            .minutes()
            .map(|minutes| time::minutes_to_datetime(self.julian_day(), minutes))
            .transpose()
    }
}

/// Errors that can occur during solar calculations.
///
/// # Variants
///
/// - `AlwaysAbove`: the Sun never drops to the requested elevation that day
/// - `AlwaysBelow`: the Sun never climbs to the requested elevation that day
/// - `NonConvergence`: Kepler iteration hit its cap or diverged
/// - `LatitudeOutOfRange`: latitude must be in range [-90°, 90°]
/// - `LongitudeOutOfRange`: longitude must be in range [-180°, 180°]
/// - `InvalidInstant`: calendar fields do not name a real date and time
/// - `TimeConversionError`: Julian Day outside the range chrono can represent
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CalculationError {
    /// Sun stays above `elevation` degrees all day (polar day)
    #[error("Sun never descends to {elevation}°")]
    AlwaysAbove {
        /// Requested elevation in degrees
        elevation: f64,
    },

    /// Sun stays below `elevation` degrees all day (polar night)
    #[error("Sun never rises to {elevation}°")]
    AlwaysBelow {
        /// Requested elevation in degrees
        elevation: f64,
    },

    /// Kepler's equation did not converge
    #[error("Kepler iteration did not converge after {iterations} steps (residual {residual}°)")]
    NonConvergence {
        /// Newton steps taken
        iterations: usize,
        /// Last change between iterates, in degrees
        residual: f64,
    },

    /// Latitude out of valid range [-90, 90] degrees
    #[error("Latitude out of range")]
    LatitudeOutOfRange,

    /// Longitude out of valid range [-180, 180] degrees
    #[error("Longitude out of range")]
    LongitudeOutOfRange,

    /// Calendar fields do not form a valid date and time
    #[error("Invalid instant")]
    InvalidInstant,

    /// Error converting between time representations
    #[error("Time conversion error")]
    TimeConversionError,
}
