//! Kepler's equation `M = E − e·sin(E)` for elliptical orbits.
//!
//! Angles are in degrees; radians appear only inside the trigonometric calls.

#[allow(unused_imports)]
use core_maths::CoreFloat;
use log::{trace, warn};

use crate::math::wrap_degrees;
use crate::CalculationError;

/// Default convergence tolerance between successive iterates, in degrees.
pub const DEFAULT_TOLERANCE_DEGREES: f64 = 0.005;

/// Default cap on Newton-Raphson iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Newton-Raphson solver for the eccentric anomaly.
///
/// # Example
///
/// ```
/// use solar_ephemeris::KeplerSolver;
///
/// let solver = KeplerSolver::default().with_tolerance(1e-8);
/// let e = solver.solve(5.0, 0.1).unwrap();
/// assert!((e - 5.554_589).abs() < 1e-6);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KeplerSolver {
    tolerance_degrees: f64,
    max_iterations: usize,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self {
            tolerance_degrees: DEFAULT_TOLERANCE_DEGREES,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl KeplerSolver {
    /// Stops once successive iterates differ by at most `tolerance_degrees`.
    pub fn with_tolerance(self, tolerance_degrees: f64) -> Self {
        Self {
            tolerance_degrees,
            ..self
        }
    }

    /// Gives up after `max_iterations` Newton steps.
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations: max_iterations.max(1),
            ..self
        }
    }

    /// Convergence tolerance in degrees.
    pub fn tolerance_degrees(&self) -> f64 {
        self.tolerance_degrees
    }

    /// Iteration cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Eccentric anomaly in degrees within [0, 360).
    ///
    /// # Arguments
    ///
    /// * `mean_anomaly` - Mean anomaly in degrees
    /// * `eccentricity` - Orbital eccentricity, 0 ≤ e < 1 for an ellipse
    ///
    /// # Errors
    ///
    /// [`CalculationError::NonConvergence`] when the iteration cap is reached or an
    /// iterate stops being finite (e.g. e ≥ 1 with a vanishing derivative).
    pub fn solve(&self, mean_anomaly: f64, eccentricity: f64) -> Result<f64, CalculationError> {
        let m = mean_anomaly.to_radians();
        let newton_step = |e0: f64| {
            let e0_rad = e0.to_radians();
            e0 - (e0 - (eccentricity * e0_rad.sin()).to_degrees() - mean_anomaly) / (1.0 - eccentricity * e0_rad.cos())
        };

        let mut e0 = mean_anomaly + (eccentricity * m.sin() * (1.0 + eccentricity * m.cos())).to_degrees();
        let mut e1 = newton_step(e0);
        let mut iterations = 1;

        loop {
            let residual = (e1 - e0).abs();
            trace!("kepler iteration {iterations}: E = {e1}, |ΔE| = {residual}");

            if !e1.is_finite() {
                warn!("kepler iteration diverged for M = {mean_anomaly}, e = {eccentricity}");
                return Err(CalculationError::NonConvergence { iterations, residual });
            }
            if residual <= self.tolerance_degrees {
                return Ok(wrap_degrees(e1));
            }
            if iterations >= self.max_iterations {
                warn!("kepler iteration did not converge for M = {mean_anomaly}, e = {eccentricity}");
                return Err(CalculationError::NonConvergence { iterations, residual });
            }

            e0 = e1;
            e1 = newton_step(e0);
            iterations += 1;
        }
    }
}

/// Solves Kepler's equation with the default tolerance and iteration cap.
///
/// Returns the eccentric anomaly in degrees within [0, 360).
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> Result<f64, CalculationError> {
    KeplerSolver::default().solve(mean_anomaly, eccentricity)
}

/// True anomaly in degrees within [0, 360) for an eccentric anomaly in degrees.
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = eccentric_anomaly.to_radians() / 2.0;
    let v = 2.0
        * ((1.0 + eccentricity).sqrt() * half.sin()).atan2((1.0 - eccentricity).sqrt() * half.cos());
    wrap_degrees(v.to_degrees())
}

/// Position in the orbital plane, with x toward periapsis, in the units of
/// `semi_major_axis`.
pub fn orbital_position(
    semi_major_axis: f64,
    eccentricity: f64,
    mean_anomaly: f64,
) -> Result<(f64, f64), CalculationError> {
    let e_anomaly = solve_kepler(mean_anomaly, eccentricity)?.to_radians();
    let x = semi_major_axis * (e_anomaly.cos() - eccentricity);
    let y = semi_major_axis * (1.0 - eccentricity * eccentricity).sqrt() * e_anomaly.sin();
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    extern crate std;

    use super::*;

    fn close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn meeus_example_30a() {
        close(solve_kepler(5.0, 0.1).unwrap(), 5.554_589, 1e-4);
    }

    #[test]
    fn satisfies_keplers_equation() {
        for (m, e) in [(27.0, 0.5), (200.0, 0.9), (359.9, 0.2), (90.0, 0.0167)] {
            let big_e = solve_kepler(m, e).unwrap();
            let residual = big_e - (e * big_e.to_radians().sin()).to_degrees() - m;
            close(wrap_degrees(residual + 180.0) - 180.0, 0.0, 1e-3);
        }
    }

    #[test]
    fn circular_orbit_returns_mean_anomaly() {
        for m in [0.0, 45.0, 180.0, 359.5] {
            close(solve_kepler(m, 0.0).unwrap(), m, 1e-12);
        }
        close(solve_kepler(-30.0, 0.0).unwrap(), 330.0, 1e-12);
        close(solve_kepler(720.0, 0.0).unwrap(), 0.0, 1e-12);
    }

    #[test]
    fn result_is_wrapped() {
        let e = solve_kepler(-30.0, 0.3).unwrap();
        assert!((0.0..360.0).contains(&e));
        close(e, 318.642_44, 1e-3);
    }

    #[test]
    fn iteration_cap_is_reported() {
        let solver = KeplerSolver::default().with_tolerance(0.0).with_max_iterations(1);
        match solver.solve(100.0, 0.9) {
            Err(CalculationError::NonConvergence { iterations, residual }) => {
                assert_eq!(iterations, 1);
                assert!(residual > 0.0);
            }
            other => panic!("expected non-convergence, got {other:?}"),
        }
    }

    #[test]
    fn parabolic_orbit_at_periapsis_is_an_error() {
        // the derivative 1 - e cos(E) vanishes at E = 0 when e = 1
        assert!(matches!(
            solve_kepler(0.0, 1.0),
            Err(CalculationError::NonConvergence { .. })
        ));
    }

    #[test]
    fn builder_settings() {
        let solver = KeplerSolver::default();
        assert_eq!(solver.tolerance_degrees(), DEFAULT_TOLERANCE_DEGREES);
        assert_eq!(solver.max_iterations(), DEFAULT_MAX_ITERATIONS);
        assert_eq!(solver.with_max_iterations(0).max_iterations(), 1);
    }

    #[test]
    fn true_anomaly_from_eccentric_anomaly() {
        close(true_anomaly(0.0, 0.5), 0.0, 1e-12);
        close(true_anomaly(180.0, 0.5), 180.0, 1e-9);
        close(true_anomaly(90.0, 0.0), 90.0, 1e-9);
        // cos v = (cos E - e) / (1 - e cos E) = -0.5 at E = 90, e = 0.5
        close(true_anomaly(90.0, 0.5), 120.0, 1e-9);
        close(true_anomaly(270.0, 0.5), 240.0, 1e-9);
    }

    #[test]
    fn orbital_position_at_apsides() {
        let (x, y) = orbital_position(2.0, 0.5, 0.0).unwrap();
        close(x, 1.0, 1e-12);
        close(y, 0.0, 1e-12);

        let (x, y) = orbital_position(2.0, 0.5, 180.0).unwrap();
        close(x, -3.0, 1e-9);
        close(y, 0.0, 1e-9);
    }
}
