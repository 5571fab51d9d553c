use crate::CalculationError;

/// An observer's position on Earth in degrees.
///
/// Longitude is east-positive throughout the crate (Greenwich = 0, New York ≈ −74).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Creates a validated coordinate.
    ///
    /// # Errors
    ///
    /// - [`CalculationError::LatitudeOutOfRange`] unless latitude is in [−90, 90]
    /// - [`CalculationError::LongitudeOutOfRange`] unless longitude is in [−180, 180]
    pub fn new(latitude_degrees: f64, longitude_degrees: f64) -> Result<Self, CalculationError> {
        if !(-90.0..=90.0).contains(&latitude_degrees) {
            return Err(CalculationError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&longitude_degrees) {
            return Err(CalculationError::LongitudeOutOfRange);
        }
        Ok(Self {
            latitude: latitude_degrees,
            longitude: longitude_degrees,
        })
    }

    /// Latitude in degrees, north positive.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, east positive.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    extern crate std;

    use super::*;

    #[test]
    fn accepts_the_full_range() {
        assert!(GeoCoordinate::new(90.0, 180.0).is_ok());
        assert!(GeoCoordinate::new(-90.0, -180.0).is_ok());
        let c = GeoCoordinate::new(40.7, -74.0).unwrap();
        assert_eq!(c.latitude(), 40.7);
        assert_eq!(c.longitude(), -74.0);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(GeoCoordinate::new(90.1, 0.0), Err(CalculationError::LatitudeOutOfRange));
        assert_eq!(GeoCoordinate::new(0.0, -180.5), Err(CalculationError::LongitudeOutOfRange));
        assert_eq!(GeoCoordinate::new(f64::NAN, 0.0), Err(CalculationError::LatitudeOutOfRange));
    }
}
