//! Low-precision solar ephemeris.
//!
//! Every function takes `t`, Julian centuries since J2000.0, and returns degrees
//! unless stated otherwise. Trigonometry runs in radians inside each function only.
//! Accuracy is about 0.01° in longitude for dates within a few centuries of 2000.

#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::math::{polynomial, wrap_degrees};
use crate::time::MINUTES_PER_DEGREE;

/// Geometric mean longitude of the Sun at J2000.0 and its rates.
const MEAN_LONGITUDE: [f64; 3] = [280.466_46, 36_000.769_83, 0.000_303_2];

/// Geometric mean anomaly of the Sun at J2000.0 and its rates.
const MEAN_ANOMALY: [f64; 3] = [357.529_11, 35_999.050_29, -0.000_153_7];

/// Eccentricity of Earth's orbit.
const ECCENTRICITY: [f64; 3] = [0.016_708_634, -0.000_042_037, -0.000_000_126_7];

/// Mean obliquity of the ecliptic as arcseconds past 23°26'.
const MEAN_OBLIQUITY_SECONDS: [f64; 4] = [21.448, -46.815, -0.000_59, 0.001_813];

/// Longitude of the Moon's ascending node, driving the nutation approximation.
fn nutation_node(t: f64) -> f64 {
    125.04 - 1_934.136 * t
}

/// Geometric mean longitude of the Sun, in [0, 360).
pub fn mean_longitude(t: f64) -> f64 {
    wrap_degrees(polynomial(&MEAN_LONGITUDE, t))
}

/// Geometric mean anomaly of the Sun, in [0, 360).
pub fn mean_anomaly(t: f64) -> f64 {
    wrap_degrees(polynomial(&MEAN_ANOMALY, t))
}

/// Eccentricity of Earth's orbit (unitless).
pub fn eccentricity(t: f64) -> f64 {
    polynomial(&ECCENTRICITY, t)
}

/// Equation of center: true minus mean anomaly.
pub fn equation_of_center(t: f64) -> f64 {
    let m = mean_anomaly(t).to_radians();

    m.sin() * (1.914_602 - t * (0.004_817 + 0.000_014 * t))
        + (2.0 * m).sin() * (0.019_993 - 0.000_101 * t)
        + (3.0 * m).sin() * 0.000_289
}

/// True geometric longitude of the Sun, in [0, 360).
pub fn true_longitude(t: f64) -> f64 {
    wrap_degrees(mean_longitude(t) + equation_of_center(t))
}

/// True anomaly of the Sun, in [0, 360).
pub fn true_anomaly(t: f64) -> f64 {
    wrap_degrees(mean_anomaly(t) + equation_of_center(t))
}

/// Sun-Earth distance in astronomical units.
pub fn radius_vector(t: f64) -> f64 {
    let v = true_anomaly(t).to_radians();
    let e = eccentricity(t);
    (1.000_001_018 * (1.0 - e * e)) / (1.0 + e * v.cos())
}

/// Apparent longitude of the Sun, corrected for nutation and aberration, in [0, 360).
pub fn apparent_longitude(t: f64) -> f64 {
    let omega = nutation_node(t).to_radians();
    wrap_degrees(true_longitude(t) - 0.005_69 - 0.004_78 * omega.sin())
}

/// Mean obliquity of the ecliptic.
pub fn mean_obliquity(t: f64) -> f64 {
    let seconds = polynomial(&MEAN_OBLIQUITY_SECONDS, t);
    23.0 + (26.0 + seconds / 60.0) / 60.0
}

/// Obliquity of the ecliptic corrected for nutation.
pub fn corrected_obliquity(t: f64) -> f64 {
    let omega = nutation_node(t).to_radians();
    mean_obliquity(t) + 0.002_56 * omega.cos()
}

/// Apparent right ascension of the Sun, in [0, 360).
///
/// Computed with `atan2` so the quadrant follows the apparent longitude.
pub fn right_ascension(t: f64) -> f64 {
    let epsilon = corrected_obliquity(t).to_radians();
    let lambda = apparent_longitude(t).to_radians();

    wrap_degrees((epsilon.cos() * lambda.sin()).atan2(lambda.cos()).to_degrees())
}

/// Apparent declination of the Sun, in [−90, 90].
pub fn declination(t: f64) -> f64 {
    let epsilon = corrected_obliquity(t).to_radians();
    let lambda = apparent_longitude(t).to_radians();

    (epsilon.sin() * lambda.sin()).asin().to_degrees()
}

/// Equation of time in minutes: apparent minus mean solar time.
///
/// Positive when the sundial runs ahead of the clock (early November, about +16 min).
pub fn equation_of_time(t: f64) -> f64 {
    let epsilon = corrected_obliquity(t).to_radians();
    let l0 = mean_longitude(t).to_radians();
    let e = eccentricity(t);
    let m = mean_anomaly(t).to_radians();

    let y = (epsilon / 2.0).tan().powi(2);

    let e_time = y * (2.0 * l0).sin() - 2.0 * e * m.sin() + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();

    e_time.to_degrees() * MINUTES_PER_DEGREE
}

/// All derived solar quantities for one instant.
///
/// A plain value recomputed on demand; nothing is cached.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolarState {
    /// Geometric mean longitude (degrees)
    pub mean_longitude: f64,
    /// Geometric mean anomaly (degrees)
    pub mean_anomaly: f64,
    /// Orbital eccentricity (unitless)
    pub eccentricity: f64,
    /// Equation of center (degrees)
    pub equation_of_center: f64,
    /// True longitude (degrees)
    pub true_longitude: f64,
    /// True anomaly (degrees)
    pub true_anomaly: f64,
    /// Apparent longitude (degrees)
    pub apparent_longitude: f64,
    /// Mean obliquity of the ecliptic (degrees)
    pub mean_obliquity: f64,
    /// Nutation-corrected obliquity (degrees)
    pub corrected_obliquity: f64,
    /// Apparent right ascension (degrees)
    pub right_ascension: f64,
    /// Apparent declination (degrees)
    pub declination: f64,
    /// Sun-Earth distance (AU)
    pub radius_vector_au: f64,
    /// Equation of time (minutes)
    pub equation_of_time_minutes: f64,
}

impl SolarState {
    /// Evaluates every quantity at `t` Julian centuries since J2000.0.
    pub fn at(t: f64) -> Self {
        Self {
            mean_longitude: mean_longitude(t),
            mean_anomaly: mean_anomaly(t),
            eccentricity: eccentricity(t),
            equation_of_center: equation_of_center(t),
            true_longitude: true_longitude(t),
            true_anomaly: true_anomaly(t),
            apparent_longitude: apparent_longitude(t),
            mean_obliquity: mean_obliquity(t),
            corrected_obliquity: corrected_obliquity(t),
            right_ascension: right_ascension(t),
            declination: declination(t),
            radius_vector_au: radius_vector(t),
            equation_of_time_minutes: equation_of_time(t),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    extern crate std;

    use super::*;
    use crate::time::{julian_centuries_since_j2000, julian_day, Instant};

    fn close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    fn centuries(y: i32, m: u32, d: u32, h: u32) -> f64 {
        let i = Instant::new(y, m, d, h, 0, 0, 0).unwrap();
        julian_centuries_since_j2000(i.julian_date())
    }

    #[test]
    fn reference_values_at_j2000() {
        close(mean_longitude(0.0), 280.466_46, 1e-9);
        close(mean_anomaly(0.0), 357.529_11, 1e-9);
        close(eccentricity(0.0), 0.016_708_634, 1e-12);
        close(mean_obliquity(0.0), 23.439_291_1, 1e-6);
    }

    #[test]
    fn meeus_example_25a() {
        // 1992 October 13.0 TD, Astronomical Algorithms example 25.a
        let t = -0.072_183_436;
        close(mean_longitude(t), 201.807_19, 1e-4);
        close(mean_anomaly(t), 278.993_97, 1e-4);
        close(eccentricity(t), 0.016_711_668, 1e-8);
        close(equation_of_center(t), -1.897_32, 1e-4);
        close(true_longitude(t), 199.909_88, 1e-4);
        close(radius_vector(t), 0.997_66, 1e-4);
        close(apparent_longitude(t), 199.908_95, 1e-3);
        close(corrected_obliquity(t), 23.439_99, 1e-3);
        close(right_ascension(t), 198.380_83, 1e-3);
        close(declination(t), -7.785_07, 1e-3);
    }

    #[test]
    fn right_ascension_covers_all_quadrants() {
        // roughly one sample per season in 2021
        let samples = [
            (centuries(2021, 2, 5, 0), 270.0, 360.0),
            (centuries(2021, 5, 5, 0), 0.0, 90.0),
            (centuries(2021, 8, 5, 0), 90.0, 180.0),
            (centuries(2021, 11, 5, 0), 180.0, 270.0),
        ];
        for (t, low, high) in samples {
            let ra = right_ascension(t);
            assert!((low..high).contains(&ra), "ra {ra} not in [{low}, {high})");
            // RA stays within a few degrees of the apparent longitude
            let diff = wrap_degrees(ra - apparent_longitude(t) + 180.0) - 180.0;
            assert!(diff.abs() < 3.0);
        }
    }

    #[test]
    fn declination_at_solstices_and_equinox() {
        close(declination(centuries(2021, 6, 21, 4)), 23.44, 0.01);
        close(declination(centuries(2021, 12, 21, 16)), -23.44, 0.01);
        close(declination(centuries(2021, 3, 20, 10)), 0.0, 0.05);
    }

    #[test]
    fn equation_of_time_extremes() {
        // about +16.4 minutes in early November, about -14.2 in mid February
        close(equation_of_time(centuries(2021, 11, 3, 12)), 16.4, 0.2);
        close(equation_of_time(centuries(2021, 2, 11, 12)), -14.2, 0.2);
    }

    #[test]
    fn radius_vector_at_perihelion_and_aphelion() {
        close(radius_vector(centuries(2021, 1, 2, 14)), 0.983_26, 1e-3);
        close(radius_vector(centuries(2021, 7, 5, 22)), 1.016_73, 1e-3);
    }

    #[test]
    fn periodic_quantities_are_normalized() {
        for t in [-5.0, -0.25, 0.0, 0.123, 2.5, 10.0] {
            let s = SolarState::at(t);
            for angle in [
                s.mean_longitude,
                s.mean_anomaly,
                s.true_longitude,
                s.true_anomaly,
                s.apparent_longitude,
                s.right_ascension,
            ] {
                assert!((0.0..360.0).contains(&angle), "angle {angle} out of range at t = {t}");
            }
        }
    }

    #[test]
    fn state_bundle_matches_individual_functions() {
        let t = julian_centuries_since_j2000(julian_day(&Instant::midnight(2010, 4, 1).unwrap()));
        let s = SolarState::at(t);
        assert_eq!(s.mean_longitude, mean_longitude(t));
        assert_eq!(s.declination, declination(t));
        assert_eq!(s.equation_of_time_minutes, equation_of_time(t));
        assert_eq!(s.radius_vector_au, radius_vector(t));
    }
}
