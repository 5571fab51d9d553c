//! Calendar ⇄ Julian Day conversion and sidereal time.
//!
//! All functions here are pure and operate on UTC civil time. Julian Days are
//! continuous day counts; the J2000.0 epoch is JD 2451545.0 (2000-01-01 12:00 UTC).

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc, Weekday};
#[allow(unused_imports)]
use core_maths::CoreFloat;
use julian_day_converter::julian_day_to_unix_millis;

use crate::math::{polynomial, wrap, wrap_hours};
use crate::CalculationError;

/// Julian Day of the J2000.0 epoch.
pub const J2000_JD: f64 = 2_451_545.0;

/// Days in a Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Minutes in a day.
pub const MINUTES_PER_DAY: f64 = 1_440.0;

/// Minutes from 0h to 12h, mean solar noon on the prime meridian.
pub const NOON_MINUTES: f64 = 720.0;

/// Minutes of time per degree of Earth rotation.
pub const MINUTES_PER_DEGREE: f64 = 4.0;

/// Ratio of a sidereal day rate to a solar day rate.
pub const SIDEREAL_RATE: f64 = 1.002_737_909;

/// Greenwich sidereal time at 0h UT, in hours, as a polynomial in Julian centuries.
const GST_AT_MIDNIGHT: [f64; 3] = [6.697_374_558, 2_400.051_336, 0.000_025_862];

/// A UTC timestamp broken down into civil calendar fields.
///
/// The fields are not validated by the raw conversion functions; use
/// [`Instant::new`] or the [`From<NaiveDateTime>`] conversion to get a checked value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Instant {
    /// Proleptic Gregorian year (astronomical numbering, so 0 is 1 BC)
    pub year: i32,
    /// Month, January = 1
    pub month: u32,
    /// Day of month, 1-31
    pub day: u32,
    /// Hour, 0-23
    pub hour: u32,
    /// Minute, 0-59
    pub minute: u32,
    /// Second, 0-59
    pub second: u32,
    /// Millisecond, 0-999
    pub millisecond: u32,
}

impl Instant {
    /// Creates an instant from civil UTC fields, rejecting impossible dates and times.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidInstant`] if chrono cannot represent the
    /// date (e.g. month 13 or February 30) or the time of day. Leap-second
    /// milliseconds (1000 and up) are rejected too.
    ///
    /// # Example
    ///
    /// ```
    /// use solar_ephemeris::Instant;
    ///
    /// let j2000 = Instant::new(2000, 1, 1, 12, 0, 0, 0).unwrap();
    /// assert_eq!(j2000.julian_date(), 2_451_545.0);
    /// assert!(Instant::new(2000, 13, 1, 0, 0, 0, 0).is_err());
    /// ```
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
    ) -> Result<Self, CalculationError> {
        if millisecond > 999 {
            return Err(CalculationError::InvalidInstant);
        }
        NaiveDate::from_ymd_opt(year, month, day).ok_or(CalculationError::InvalidInstant)?;
        NaiveTime::from_hms_milli_opt(hour, minute, second, millisecond).ok_or(CalculationError::InvalidInstant)?;
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        })
    }

    /// Midnight (0h UT) of the given date.
    pub fn midnight(year: i32, month: u32, day: u32) -> Result<Self, CalculationError> {
        Self::new(year, month, day, 0, 0, 0, 0)
    }

    /// Continuous Julian Date: the 0h UT day number plus the fraction of the day.
    pub fn julian_date(&self) -> f64 {
        julian_day(self) + fraction_of_day(self)
    }

    /// Days elapsed since the J2000.0 epoch (negative before it).
    pub fn days_since_j2000(&self) -> f64 {
        self.julian_date() - J2000_JD
    }

    /// Julian centuries elapsed since the J2000.0 epoch.
    pub fn julian_centuries(&self) -> f64 {
        julian_centuries_since_j2000(self.julian_date())
    }

    /// Converts back to a chrono timestamp.
    pub fn to_naive(&self) -> Result<NaiveDateTime, CalculationError> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|d| d.and_hms_milli_opt(self.hour, self.minute, self.second, self.millisecond))
            .ok_or(CalculationError::InvalidInstant)
    }
}

impl From<NaiveDateTime> for Instant {
    fn from(dt: NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            // chrono encodes a leap second as nanoseconds >= 1e9
            millisecond: (dt.nanosecond() / 1_000_000).min(999),
        }
    }
}

/// Julian Day number at 0h UT of the instant's calendar date.
///
/// Uses the proleptic Gregorian calendar for every year: there is no switch to the
/// Julian calendar before 1582-10-15, so historical dates written in the Julian
/// calendar must be converted by the caller. The result always ends in `.5`.
///
/// Calendar fields are taken as given; out-of-range months or days produce a number
/// but not a meaningful one.
pub fn julian_day(instant: &Instant) -> f64 {
    let mut year = f64::from(instant.year);
    let mut month = f64::from(instant.month);

    // January and February count as months 13 and 14 of the previous year
    if instant.month <= 2 {
        year -= 1.0;
        month += 12.0;
    }

    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + f64::from(instant.day) + b - 1524.5
}

/// Time of day in UT as a fraction of a day, in [0, 1).
pub fn fraction_of_day(instant: &Instant) -> f64 {
    let seconds = f64::from(instant.second) + f64::from(instant.millisecond) / 1000.0;
    let minutes = f64::from(instant.minute) + seconds / 60.0;
    let hours = f64::from(instant.hour) + minutes / 60.0;
    hours / 24.0
}

/// Julian centuries (T) since the J2000.0 epoch for the given Julian Day.
pub fn julian_centuries_since_j2000(julian_day: f64) -> f64 {
    (julian_day - J2000_JD) / DAYS_PER_CENTURY
}

/// Julian Day for the given number of Julian centuries since J2000.0.
///
/// Inverse of [`julian_centuries_since_j2000`].
pub fn julian_day_from_julian_centuries(t: f64) -> f64 {
    t * DAYS_PER_CENTURY + J2000_JD
}

/// Greenwich mean sidereal time, in hours within [0, 24).
///
/// The slow polynomial term is evaluated at the preceding 0h UT and the time elapsed
/// since then is added at the sidereal rate, so integer day steps advance the result
/// by the daily drift of about 3m56s.
///
/// # Arguments
///
/// * `days_since_j2000` - Julian Date minus 2451545.0, including the fraction of day
pub fn greenwich_sidereal_time(days_since_j2000: f64) -> f64 {
    // J2000.0 falls at noon, so 0h UT sits on the half day
    let midnight = (days_since_j2000 - 0.5).floor() + 0.5;
    let ut_hours = 24.0 * (days_since_j2000 - midnight);
    let t = midnight / DAYS_PER_CENTURY;

    let gst_midnight = wrap_hours(polynomial(&GST_AT_MIDNIGHT, t));
    wrap_hours(gst_midnight + SIDEREAL_RATE * ut_hours)
}

/// Local mean sidereal time, in hours within [0, 24).
///
/// # Arguments
///
/// * `days_since_j2000` - Julian Date minus 2451545.0
/// * `longitude_degrees` - Observer longitude, east positive
pub fn local_sidereal_time(days_since_j2000: f64, longitude_degrees: f64) -> f64 {
    wrap_hours(greenwich_sidereal_time(days_since_j2000) + longitude_degrees / 15.0)
}

/// Returns true for Gregorian leap years.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Ordinal day of the year (January 1 = 1).
pub fn day_of_year(month: u32, day: u32, leap_year: bool) -> u32 {
    let k = if leap_year { 1 } else { 2 };
    (275 * month) / 9 - k * ((month + 9) / 12) + day - 30
}

/// Day of the week on which the given Julian Day falls.
pub fn day_of_week(julian_day: f64) -> Weekday {
    const WEEK: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];
    let index = wrap((julian_day + 1.5).floor(), 7.0) as usize;
    WEEK[index % 7]
}

/// Converts a Julian Day to a UTC timestamp.
pub fn julian_day_to_datetime(julian_day: f64) -> Result<NaiveDateTime, CalculationError> {
    if !julian_day.is_finite() {
        return Err(CalculationError::TimeConversionError);
    }
    let unix_millis = julian_day_to_unix_millis(julian_day);
    Utc.timestamp_millis_opt(unix_millis)
        .single()
        .map(|dt| dt.naive_utc())
        .ok_or(CalculationError::TimeConversionError)
}

/// Converts minutes after 0h UT of the given day into a UTC timestamp.
///
/// Rise/set results are expressed this way; values outside [0, 1440) roll into the
/// neighbouring day.
pub fn minutes_to_datetime(julian_day: f64, minutes: f64) -> Result<NaiveDateTime, CalculationError> {
    julian_day_to_datetime(julian_day + minutes / MINUTES_PER_DAY)
}
