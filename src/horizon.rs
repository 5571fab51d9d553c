//! Ecliptic → equatorial → horizon coordinate conversion.
//!
//! Vectors are supplied by the caller through the [`Cartesian`] trait; this module
//! only needs to build one from components and read components back.

#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::math::wrap_degrees;

/// Structural view of a caller-owned 3-component vector.
///
/// Implement this for the vector type of your graphics or math library to feed it
/// straight into the transforms. Implementations for `[f64; 3]` and
/// `(f64, f64, f64)` are provided.
pub trait Cartesian: Sized {
    /// Builds a vector from its components.
    fn from_xyz(x: f64, y: f64, z: f64) -> Self;
    /// First component.
    fn x(&self) -> f64;
    /// Second component.
    fn y(&self) -> f64;
    /// Third component.
    fn z(&self) -> f64;
}

impl Cartesian for [f64; 3] {
    fn from_xyz(x: f64, y: f64, z: f64) -> Self {
        [x, y, z]
    }
    fn x(&self) -> f64 {
        self[0]
    }
    fn y(&self) -> f64 {
        self[1]
    }
    fn z(&self) -> f64 {
        self[2]
    }
}

impl Cartesian for (f64, f64, f64) {
    fn from_xyz(x: f64, y: f64, z: f64) -> Self {
        (x, y, z)
    }
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
    fn z(&self) -> f64 {
        self.2
    }
}

/// Rotates about the x axis by `angle` radians.
fn rotate_x(x: f64, y: f64, z: f64, angle: f64) -> (f64, f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (x, y * cos - z * sin, y * sin + z * cos)
}

/// Rotates about the y axis by `angle` radians, in the sense that carries +x toward −z.
fn rotate_y(x: f64, y: f64, z: f64, angle: f64) -> (f64, f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (x * cos - z * sin, y, x * sin + z * cos)
}

/// Converts an ecliptic vector to the equatorial frame.
///
/// # Arguments
///
/// * `ecliptic` - Vector in ecliptic coordinates (x toward the vernal equinox)
/// * `obliquity_degrees` - Obliquity of the ecliptic
pub fn ecliptic_to_equatorial<V: Cartesian>(ecliptic: &V, obliquity_degrees: f64) -> V {
    let (x, y, z) = rotate_x(ecliptic.x(), ecliptic.y(), ecliptic.z(), obliquity_degrees.to_radians());
    V::from_xyz(x, y, z)
}

/// Right ascension of an equatorial vector, in degrees within [0, 360).
pub fn right_ascension<V: Cartesian>(equatorial: &V) -> f64 {
    wrap_degrees(equatorial.y().atan2(equatorial.x()).to_degrees())
}

/// Declination of an equatorial vector, in degrees within [−90, 90].
pub fn declination<V: Cartesian>(equatorial: &V) -> f64 {
    equatorial
        .z()
        .atan2(equatorial.x().hypot(equatorial.y()))
        .to_degrees()
}

/// Position of a body in the observer's sky.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HorizonCoordinates {
    /// Azimuth in degrees within [0, 360), clockwise from north (90 = east)
    pub azimuth: f64,
    /// Altitude above the horizon in degrees, negative below it
    pub altitude: f64,
}

impl HorizonCoordinates {
    /// Encodes the position as a unit direction vector with y up, x east and
    /// north along −z.
    pub fn to_direction<V: Cartesian>(&self) -> V {
        let (sin_az, cos_az) = self.azimuth.to_radians().sin_cos();
        let (sin_alt, cos_alt) = self.altitude.to_radians().sin_cos();
        V::from_xyz(sin_az * cos_alt, sin_alt, -cos_az * cos_alt)
    }
}

/// Azimuth and altitude of the body in direction `ecliptic`.
///
/// Three rotations in sequence: ecliptic to equatorial about x by the obliquity,
/// equatorial to the hour-angle frame via the local sidereal time, then about y by
/// the colatitude so the pole lines up with the local vertical.
///
/// # Arguments
///
/// * `ecliptic` - Direction in ecliptic coordinates; length is irrelevant
/// * `local_sidereal_time_hours` - Local sidereal time
/// * `obliquity_degrees` - Obliquity of the ecliptic
/// * `latitude_degrees` - Observer latitude, north positive
pub fn horizon_coordinates<V: Cartesian>(
    ecliptic: &V,
    local_sidereal_time_hours: f64,
    obliquity_degrees: f64,
    latitude_degrees: f64,
) -> HorizonCoordinates {
    let equatorial: V = ecliptic_to_equatorial(ecliptic, obliquity_degrees);
    let ra = right_ascension(&equatorial);
    let dec = declination(&equatorial).to_radians();
    let hour_angle = wrap_degrees(15.0 * local_sidereal_time_hours - ra).to_radians();

    let (x, y, z) = rotate_y(
        hour_angle.cos() * dec.cos(),
        hour_angle.sin() * dec.cos(),
        dec.sin(),
        (90.0 - latitude_degrees).to_radians(),
    );

    HorizonCoordinates {
        // the raw angle points at the anti-meridian; shift it to count from north
        azimuth: wrap_degrees(y.atan2(x).to_degrees() + 180.0),
        altitude: z.clamp(-1.0, 1.0).asin().to_degrees(),
    }
}

/// Converts an ecliptic direction into a horizon-frame unit vector.
///
/// Same as [`horizon_coordinates`] followed by [`HorizonCoordinates::to_direction`].
pub fn ecliptic_to_horizon<V: Cartesian>(
    ecliptic: &V,
    local_sidereal_time_hours: f64,
    obliquity_degrees: f64,
    latitude_degrees: f64,
) -> V {
    horizon_coordinates(ecliptic, local_sidereal_time_hours, obliquity_degrees, latitude_degrees).to_direction()
}
